use leptos::prelude::*;

use crate::motion::ScrollChromeState;

use super::navigation::scroll_to_top;

/// Thin bar across the top of the page that fills as the reader scrolls.
#[component]
pub fn ScrollProgress(chrome: ReadSignal<ScrollChromeState>) -> impl IntoView {
    view! {
        <div
            class="fixed top-0 left-0 right-0 h-0.5 bg-gradient-to-r from-indigo-500 via-purple-500 to-pink-500 origin-left z-50"
            style:transform=move || format!("scaleX({})", chrome.get().scroll_progress)
            role="progressbar"
            aria-valuemin="0"
            aria-valuemax="100"
            aria-valuenow=move || format!("{:.0}", chrome.get().scroll_progress * 100.0)
        ></div>
    }
}

#[component]
pub fn ScrollTopButton(chrome: ReadSignal<ScrollChromeState>) -> impl IntoView {
    view! {
        <button
            type="button"
            class=move || {
                let visibility = if chrome.get().is_past_top_button_threshold {
                    "opacity-100 scale-100"
                } else {
                    "opacity-0 scale-0 pointer-events-none"
                };
                format!(
                    "fixed bottom-8 right-8 p-4 rounded-full bg-gradient-to-r from-indigo-600 to-purple-600 text-white shadow-2xl z-40 transition-all duration-300 {visibility}"
                )
            }
            aria-label="Scroll to top"
            on:click=move |_| scroll_to_top()
        >
            "↑"
        </button>
    }
}
