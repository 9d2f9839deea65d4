use leptos::prelude::*;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions, ScrollToOptions};

use crate::motion::ScrollChromeState;
use crate::site::SiteConfig;

use super::motion::use_active_section;
use super::theme::ThemeToggle;

/// Smooth-scrolls the element with `id` into view.
pub fn scroll_to_section(id: &str) {
    let Some(element) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
    else {
        log::debug!("no section #{id} to scroll to");
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

pub fn scroll_to_top() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let options = ScrollToOptions::new();
    options.set_top(0.0);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

#[component]
pub fn Navigation(
    config: &'static SiteConfig,
    chrome: ReadSignal<ScrollChromeState>,
) -> impl IntoView {
    let active = use_active_section(config.sections.clone());
    let (menu_open, set_menu_open) = signal(false);

    let go_to = move |id: &str| {
        set_menu_open.set(false);
        scroll_to_section(id);
    };

    let links = move |mobile: bool| {
        config
            .sections
            .iter()
            .skip(1)
            .map(|id| {
                let id = id.as_str();
                let label = SiteConfig::section_label(id);
                let class = move || {
                    let base = if mobile {
                        "block w-full text-left font-medium cursor-pointer transition-colors"
                    } else {
                        "text-lg cursor-pointer transition-colors"
                    };
                    if active.get().as_deref() == Some(id) {
                        format!("{base} text-indigo-600 dark:text-indigo-400")
                    } else {
                        format!("{base} hover:text-indigo-700 dark:hover:text-indigo-400")
                    }
                };
                view! {
                    <button type="button" class=class on:click=move |_| go_to(id)>
                        {label}
                    </button>
                }
            })
            .collect_view()
    };

    view! {
        <nav class=move || {
            let background = if chrome.get().is_past_nav_threshold {
                "bg-white/80 dark:bg-slate-900/80 backdrop-blur-xl shadow-md border-b border-slate-200 dark:border-slate-700"
            } else {
                "bg-transparent"
            };
            format!("fixed top-0 left-0 right-0 z-40 transition-all duration-300 {background}")
        }>
            <div class="max-w-7xl mx-auto px-6 py-4">
                <div class="flex justify-between items-center">
                    <button
                        type="button"
                        class="text-xl cursor-pointer font-bold bg-gradient-to-r from-indigo-400 to-purple-500 bg-clip-text text-transparent"
                        on:click=move |_| go_to("hero")
                    >
                        {config.initials.clone()}
                    </button>
                    <div class="hidden md:flex items-center gap-12">{links(false)}</div>
                    <div class="flex items-center gap-4">
                        <ThemeToggle />
                        <button
                            type="button"
                            class="md:hidden p-2"
                            aria-label="Toggle menu"
                            aria-expanded=move || menu_open.get().to_string()
                            on:click=move |_| set_menu_open.update(|open| *open = !*open)
                        >
                            {move || if menu_open.get() { "✕" } else { "☰" }}
                        </button>
                    </div>
                </div>
            </div>
            <Show when=move || menu_open.get()>
                <div class="md:hidden bg-white dark:bg-slate-900 border-t border-slate-200 dark:border-slate-700">
                    <div class="px-6 py-4 space-y-4">{links(true)}</div>
                </div>
            </Show>
        </nav>
    }
}
