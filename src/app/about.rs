use std::time::Duration;

use leptos::prelude::*;

use crate::site::{SiteConfig, Stat};

use super::motion::{use_count_up, use_reveal};

const COUNT_UP_DURATION: Duration = Duration::from_millis(2000);

#[component]
pub fn About(config: &'static SiteConfig) -> impl IntoView {
    let revealed = use_reveal("about-bio", Some(0.2));

    view! {
        <section id="about" class="py-20 px-6 bg-white dark:bg-slate-800/50 transition-colors duration-300">
            <div class="max-w-6xl mx-auto">
                <h2 class="text-4xl md:text-5xl font-bold mb-12 text-center">"About Me"</h2>
                <div class="grid md:grid-cols-2 gap-12 items-center">
                    <div
                        id="about-bio"
                        class="space-y-6 reveal"
                        class:revealed=move || revealed.get()
                    >
                        {config
                            .bio
                            .iter()
                            .map(|paragraph| {
                                view! {
                                    <p class="text-lg text-slate-600 dark:text-slate-400 leading-relaxed">
                                        {paragraph.clone()}
                                    </p>
                                }
                            })
                            .collect_view()}
                    </div>
                    <div class="grid grid-cols-2 gap-6">
                        {config
                            .stats
                            .iter()
                            .enumerate()
                            .map(|(index, stat)| view! { <StatCounter index stat /> })
                            .collect_view()}
                    </div>
                </div>
            </div>
        </section>
    }
}

#[component]
fn StatCounter(index: usize, stat: &'static Stat) -> impl IntoView {
    let id = format!("stat-{index}");
    let value = use_count_up(id.clone(), stat.value, COUNT_UP_DURATION);

    view! {
        <div
            id=id
            class="p-6 rounded-2xl bg-slate-50 dark:bg-slate-800 border border-slate-200 dark:border-slate-700 shadow-lg text-center"
        >
            <div class="text-4xl font-bold text-indigo-600 dark:text-indigo-400">
                {move || value.get()}
                {stat.suffix.clone()}
            </div>
            <div class="mt-2 text-sm text-slate-600 dark:text-slate-400">{stat.label.clone()}</div>
        </div>
    }
}
