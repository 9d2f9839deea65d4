use leptos::prelude::*;

use crate::motion::TypingTimings;
use crate::site::SiteConfig;

use super::motion::use_typing;
use super::navigation::scroll_to_section;

#[component]
pub fn Hero(config: &'static SiteConfig) -> impl IntoView {
    let typed = use_typing(config.phrases.clone(), TypingTimings::default());

    view! {
        <section
            id="hero"
            class="min-h-screen pt-32 pb-24 px-6 flex items-center justify-center relative"
        >
            <div class="max-w-4xl mx-auto text-center">
                <p class="inline-flex items-center gap-2 px-4 py-2 bg-indigo-100 dark:bg-indigo-900/30 rounded-full mb-6 text-sm font-medium text-indigo-600 dark:text-indigo-400">
                    {config.tagline.clone()}
                </p>
                <h1 class="text-5xl md:text-7xl font-bold mb-6 leading-tight">
                    "Hello, I'm "
                    <span class="bg-gradient-to-r from-rose-500 via-purple-600 to-indigo-700 bg-clip-text text-transparent">
                        {config.name.clone()}
                    </span>
                </h1>
                <p class="text-2xl md:text-3xl text-slate-600 dark:text-slate-400 mb-10 h-10">
                    <span>{typed}</span>
                    <span class="typing-cursor" aria-hidden="true">"|"</span>
                </p>
                <div class="flex flex-wrap gap-4 justify-center">
                    <button
                        type="button"
                        class="px-8 py-4 bg-gradient-to-r from-indigo-600 to-purple-600 text-white rounded-xl font-semibold shadow-lg hover:shadow-xl transition-all"
                        on:click=move |_| scroll_to_section("projects")
                    >
                        "View my work"
                    </button>
                    <button
                        type="button"
                        class="px-8 py-4 border-2 border-indigo-600 text-indigo-600 dark:text-indigo-400 rounded-xl font-semibold hover:bg-indigo-50 dark:hover:bg-indigo-900/30 transition-all"
                        on:click=move |_| scroll_to_section("contact")
                    >
                        "Get in touch"
                    </button>
                </div>
            </div>
            <button
                type="button"
                class="absolute bottom-6 left-1/2 -translate-x-1/2 text-3xl text-indigo-600 dark:text-indigo-400 animate-bounce"
                aria-label="Scroll to about"
                on:click=move |_| scroll_to_section("about")
            >
                "⌄"
            </button>
        </section>
    }
}
