use leptos::prelude::*;

use crate::site::{Project, SiteConfig};

use super::motion::use_reveal;

#[component]
pub fn Projects(config: &'static SiteConfig) -> impl IntoView {
    view! {
        <section id="projects" class="py-20 px-6 transition-colors duration-300">
            <div class="max-w-6xl mx-auto">
                <h2 class="text-4xl md:text-5xl font-bold mb-12 text-center">"Featured Projects"</h2>
                <div class="grid md:grid-cols-2 gap-8">
                    {config
                        .projects
                        .iter()
                        .enumerate()
                        .map(|(index, project)| view! { <ProjectCard index project /> })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}

#[component]
fn ProjectCard(index: usize, project: &'static Project) -> impl IntoView {
    let id = format!("project-{index}");
    let revealed = use_reveal(id.clone(), Some(0.25));
    let (image_failed, set_image_failed) = signal(false);

    view! {
        <article
            id=id
            class="group rounded-2xl overflow-hidden bg-white dark:bg-slate-800 border border-slate-200 dark:border-slate-700 shadow-lg hover:shadow-2xl transition-all duration-300 reveal"
            class:revealed=move || revealed.get()
        >
            <div class="h-48 overflow-hidden bg-slate-200 dark:bg-slate-700">
                <img
                    src=move || project.image_src(image_failed.get()).to_owned()
                    alt=project.title.clone()
                    loading="lazy"
                    on:error=move |_| set_image_failed.set(true)
                    class="w-full h-full object-cover group-hover:scale-110 transition-transform duration-700"
                />
            </div>
            <div class="p-6">
                <h3 class="text-2xl font-bold mb-3">{project.title.clone()}</h3>
                <p class="text-slate-600 dark:text-slate-400 mb-4">{project.description.clone()}</p>
                <ul class="flex flex-wrap gap-2 mb-6">
                    {project
                        .tags
                        .iter()
                        .map(|tag| {
                            view! {
                                <li class="px-3 py-1 text-sm rounded-full bg-indigo-100 dark:bg-indigo-900/30 text-indigo-600 dark:text-indigo-400">
                                    {tag.clone()}
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
                <div class="flex gap-4">
                    {project
                        .link
                        .clone()
                        .map(|href| {
                            view! {
                                <a
                                    href=href
                                    target="_blank"
                                    rel="noopener noreferrer"
                                    class="font-semibold text-indigo-600 dark:text-indigo-400 hover:underline"
                                >
                                    "Live demo"
                                </a>
                            }
                        })}
                    {project
                        .source
                        .clone()
                        .map(|href| {
                            view! {
                                <a
                                    href=href
                                    target="_blank"
                                    rel="noopener noreferrer"
                                    class="font-semibold hover:underline"
                                >
                                    "Source"
                                </a>
                            }
                        })}
                </div>
            </div>
        </article>
    }
}
