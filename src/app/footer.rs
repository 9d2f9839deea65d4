use leptos::prelude::*;

use crate::site::SiteConfig;

const BUILD_YEAR: &str = env!("BUILD_YEAR");
const BUILD_TIME: &str = env!("BUILD_TIME");

#[component]
pub fn Footer(config: &'static SiteConfig) -> impl IntoView {
    view! {
        <footer class="py-12 px-6 border-t border-slate-200 dark:border-slate-800">
            <div class="max-w-6xl mx-auto flex flex-col md:flex-row justify-between items-center gap-4 text-slate-600 dark:text-slate-400">
                <p>{format!("© {BUILD_YEAR} {}. All rights reserved.", config.name)}</p>
                <p class="text-sm" title=format!("Built {BUILD_TIME}")>
                    "Built with Rust, Leptos and WebAssembly."
                </p>
            </div>
        </footer>
    }
}
