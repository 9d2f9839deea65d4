use leptos::prelude::*;

use crate::site::{SiteConfig, Skill};

use super::motion::use_reveal;

#[component]
pub fn Skills(config: &'static SiteConfig) -> impl IntoView {
    view! {
        <section id="skills" class="py-20 px-6 bg-slate-50 dark:bg-slate-800/30 transition-colors duration-300">
            <div class="max-w-4xl mx-auto">
                <h2 class="text-4xl md:text-5xl font-bold mb-12 text-center">"Skills"</h2>
                <div class="space-y-6">
                    {config
                        .skills
                        .iter()
                        .enumerate()
                        .map(|(index, skill)| view! { <SkillBar index skill /> })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}

/// Bar fills to the skill level once, the first time it is half visible.
#[component]
fn SkillBar(index: usize, skill: &'static Skill) -> impl IntoView {
    let id = format!("skill-{index}");
    let revealed = use_reveal(id.clone(), Some(0.5));
    let level = skill.level.min(100);

    view! {
        <div id=id>
            <div class="flex justify-between mb-2">
                <span class="font-semibold">{skill.name.clone()}</span>
                <span class="text-slate-500 dark:text-slate-400">{format!("{level}%")}</span>
            </div>
            <div
                class="h-2 rounded-full bg-slate-200 dark:bg-slate-700 overflow-hidden"
                role="progressbar"
                aria-valuemin="0"
                aria-valuemax="100"
                aria-valuenow=level.to_string()
            >
                <div
                    class="h-2 rounded-full bg-gradient-to-r from-indigo-500 to-purple-500 transition-all duration-1000 ease-out"
                    style:width=move || {
                        if revealed.get() { format!("{level}%") } else { "0%".to_string() }
                    }
                ></div>
            </div>
        </div>
    }
}
