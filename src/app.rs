mod about;
mod chrome;
mod contact;
mod footer;
mod hero;
pub mod motion;
mod navigation;
mod particles;
mod projects;
mod skills;
pub mod theme;

use leptos::{either::Either, prelude::*};
use leptos_meta::*;
use leptos_router::{components::*, path};

use crate::site::{self, SiteConfig, SiteError};

use about::About;
use chrome::{ScrollProgress, ScrollTopButton};
use contact::Contact;
use footer::Footer;
use hero::Hero;
use motion::{provide_motion, use_scroll_chrome};
use navigation::Navigation;
use particles::FloatingParticles;
use projects::Projects;
use skills::Skills;
use theme::provide_theme;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <meta name="color-scheme" content="light dark" />
                <link rel="shortcut icon" type="image/ico" href="/favicon.ico" />
                <link rel="stylesheet" id="leptos" href="/pkg/portfolio-site.css" />
                <MetaTags />
            </head>
            <body class="font-sans">
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();
    provide_motion();
    provide_theme();

    let owner = site::config().map(|c| c.name.as_str()).unwrap_or("Portfolio");

    view! {
        <Title formatter=move |title| format!("{owner} - {title}") />
        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=path!("/") view=HomePage />
            </Routes>
        </Router>
    }
}

#[component]
fn HomePage() -> impl IntoView {
    match site::config() {
        Ok(config) => Either::Left(view! { <Portfolio config /> }),
        Err(err) => Either::Right(view! { <ContentError err /> }),
    }
}

#[component]
fn Portfolio(config: &'static SiteConfig) -> impl IntoView {
    let chrome = use_scroll_chrome(config.chrome);

    view! {
        <Title text="Portfolio" />
        <div class="min-h-screen bg-gradient-to-br from-slate-50 via-white to-indigo-50 dark:from-slate-900 dark:via-slate-800 dark:to-indigo-950 text-slate-900 dark:text-white overflow-x-hidden transition-colors duration-300">
            <FloatingParticles />
            <ScrollProgress chrome />
            <Navigation config chrome />
            <main>
                <Hero config />
                <About config />
                <Skills config />
                <Projects config />
                <Contact config />
            </main>
            <Footer config />
            <ScrollTopButton chrome />
        </div>
    }
}

#[component]
fn ContentError(err: SiteError) -> impl IntoView {
    log::error!("site content unavailable: {err}");
    view! {
        <Title text="Unavailable" />
        <main class="min-h-screen flex items-center justify-center p-6">
            <p class="text-lg text-red-500">{err.to_string()}</p>
        </main>
    }
}
