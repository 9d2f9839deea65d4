use leptos::prelude::*;

#[cfg(feature = "hydrate")]
use codee::string::FromToStringCodec;
#[cfg(feature = "hydrate")]
use leptos_use::{storage::use_local_storage, use_preferred_dark};

use crate::theme::Theme;
#[cfg(feature = "hydrate")]
use crate::theme::{resolve_theme, STORAGE_KEY};

#[derive(Clone, Copy)]
pub struct ThemeContext {
    pub theme: Signal<Theme>,
    toggle: Callback<()>,
}

impl ThemeContext {
    pub fn toggle(&self) {
        self.toggle.run(());
    }
}

pub fn provide_theme() {
    #[cfg(feature = "hydrate")]
    let context = {
        let (stored, set_stored, _) = use_local_storage::<String, FromToStringCodec>(STORAGE_KEY);
        let prefers_dark = use_preferred_dark();
        let theme = Signal::derive(move || {
            stored.with(|value| resolve_theme(Some(value.as_str()), prefers_dark.get()))
        });
        Effect::new(move |_| apply_to_document(theme.get()));
        ThemeContext {
            theme,
            toggle: Callback::new(move |()| {
                let next = theme.get_untracked().toggled();
                set_stored.set(next.as_str().to_string());
            }),
        }
    };

    #[cfg(not(feature = "hydrate"))]
    let context = ThemeContext {
        theme: Signal::derive(|| Theme::Light),
        toggle: Callback::new(|()| {}),
    };

    provide_context(context);
}

pub fn use_theme() -> ThemeContext {
    expect_context::<ThemeContext>()
}

#[cfg(feature = "hydrate")]
fn apply_to_document(theme: Theme) {
    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };
    if let Err(err) = root.class_list().toggle_with_force("dark", theme.is_dark()) {
        log::warn!("couldn't apply theme: {err:?}");
    }
}

#[component]
pub fn ThemeToggle() -> impl IntoView {
    let context = use_theme();
    let is_dark = move || context.theme.get().is_dark();
    view! {
        <button
            type="button"
            class="p-2 rounded-lg cursor-pointer hover:bg-slate-200 dark:hover:bg-slate-700 transition-colors"
            aria-label="Toggle dark mode"
            aria-pressed=move || is_dark().to_string()
            title=move || {
                if is_dark() { "Switch to light mode" } else { "Switch to dark mode" }
            }
            on:click=move |_| context.toggle()
        >
            // glyph follows the class on <html>
            <span class="dark:hidden text-slate-700">"☾"</span>
            <span class="hidden dark:inline text-yellow-500">"☀"</span>
        </button>
    }
}
