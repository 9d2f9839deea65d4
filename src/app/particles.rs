use leptos::prelude::*;

use crate::motion::PARTICLE_COUNT;

use super::motion::use_particles;

#[component]
pub fn FloatingParticles() -> impl IntoView {
    let particles = use_particles(PARTICLE_COUNT);

    view! {
        <div class="fixed inset-0 overflow-hidden pointer-events-none" aria-hidden="true">
            {move || {
                particles
                    .get()
                    .iter()
                    .map(|p| {
                        view! {
                            <span
                                class="particle absolute w-2 h-2 rounded-full bg-indigo-500/20"
                                style=p.style()
                            ></span>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
