use leptos::{ev::SubmitEvent, prelude::*};

use crate::contact::{ContactRecord, FormMachine, FormStatus};
#[cfg(feature = "hydrate")]
use crate::contact::{deliver, schedule_reset, EmailJsSubmitter};
#[cfg(feature = "hydrate")]
use crate::motion::TaskHandle;
use crate::site::SiteConfig;

#[cfg(feature = "hydrate")]
use super::motion::use_motion;
use super::motion::use_reveal;

const INPUT_CLASS: &str = "w-full px-4 py-3 rounded-xl border-2 border-slate-200 dark:border-slate-700 bg-slate-50 dark:bg-slate-900 focus:border-indigo-500 focus:ring-2 focus:ring-indigo-200 dark:focus:ring-indigo-900 outline-none transition-all placeholder-slate-400";

#[component]
pub fn Contact(config: &'static SiteConfig) -> impl IntoView {
    let revealed = use_reveal("contact-form", Some(0.2));
    let (form, set_form) = signal(FormMachine::default());
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let message = RwSignal::new(String::new());

    #[cfg(feature = "hydrate")]
    let motion = use_motion();
    // the pending "sent" reset; dropping the handle cancels it
    #[cfg(feature = "hydrate")]
    let reset_timer = StoredValue::new_local(None::<TaskHandle>);
    #[cfg(feature = "hydrate")]
    on_cleanup(move || {
        let _ = reset_timer.try_update_value(Option::take);
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let draft = ContactRecord::new(
            name.get_untracked(),
            email.get_untracked(),
            message.get_untracked(),
        );
        let Some(record) = set_form.try_update(|m| m.prepare(&draft)).flatten() else {
            return;
        };

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let submitter = EmailJsSubmitter::new(config.contact.clone());
            let outcome = deliver(&submitter, &record).await;
            let sent = outcome.is_ok();
            set_form.try_update(|m| m.finish(outcome));
            if sent {
                name.try_set(String::new());
                email.try_set(String::new());
                message.try_set(String::new());
                let scheduler = motion.and_then(|m| m.try_with_value(|m| m.scheduler.clone()));
                if let Some(scheduler) = scheduler {
                    let handle = schedule_reset(&*scheduler, move || {
                        set_form.try_update(FormMachine::reset);
                    });
                    // a disposed slot drops the handle, cancelling the reset
                    let _ = reset_timer.try_update_value(|slot| *slot = Some(handle));
                }
            }
        });

        #[cfg(not(feature = "hydrate"))]
        let _ = record;
    };

    let status = move || form.with(FormMachine::status);
    let error = move || form.with(|m| m.error().map(ToString::to_string));

    view! {
        <section id="contact" class="py-20 px-6 transition-colors duration-300">
            <div class="max-w-4xl mx-auto">
                <h2 class="text-4xl md:text-5xl font-bold mb-4 text-center">"Let's Work Together"</h2>
                <p class="text-xl text-slate-600 dark:text-slate-400 mb-12 text-center">
                    "Have a project in mind? Let's make something amazing."
                </p>
                <form
                    id="contact-form"
                    class="space-y-6 bg-white dark:bg-slate-800 rounded-3xl p-6 md:p-12 shadow-2xl border border-slate-200 dark:border-slate-700 reveal"
                    class:revealed=move || revealed.get()
                    novalidate=true
                    on:submit=on_submit
                >
                    <div class="grid md:grid-cols-2 gap-6">
                        <label class="block">
                            <span class="block text-sm font-semibold mb-2">"Full Name"</span>
                            <input
                                type="text"
                                name="name"
                                placeholder="Your name"
                                class=INPUT_CLASS
                                prop:value=move || name.get()
                                on:input=move |ev| name.set(event_target_value(&ev))
                            />
                        </label>
                        <label class="block">
                            <span class="block text-sm font-semibold mb-2">"Email Address"</span>
                            <input
                                type="email"
                                name="email"
                                placeholder="your@email.com"
                                class=INPUT_CLASS
                                prop:value=move || email.get()
                                on:input=move |ev| email.set(event_target_value(&ev))
                            />
                        </label>
                    </div>
                    <label class="block">
                        <span class="block text-sm font-semibold mb-2">"Your Message"</span>
                        <textarea
                            name="message"
                            rows="5"
                            placeholder="Tell me about your project..."
                            class=format!("{INPUT_CLASS} resize-none")
                            prop:value=move || message.get()
                            on:input=move |ev| message.set(event_target_value(&ev))
                        ></textarea>
                    </label>
                    <p class="text-red-500 text-sm min-h-5" role="alert">
                        {error}
                    </p>
                    <button
                        type="submit"
                        class="w-full py-4 rounded-xl font-semibold text-white bg-gradient-to-r from-indigo-600 to-purple-600 shadow-lg hover:shadow-xl transition-all disabled:opacity-60 disabled:cursor-not-allowed"
                        disabled=move || status() == FormStatus::Sending
                    >
                        {move || match status() {
                            FormStatus::Idle => "Send Message",
                            FormStatus::Sending => "Sending...",
                            FormStatus::Sent => "Message Sent!",
                        }}
                    </button>
                </form>
                <ul class="flex justify-center gap-6 mt-12">
                    {config
                        .socials
                        .iter()
                        .map(|social| {
                            view! {
                                <li>
                                    <a
                                        href=social.url.clone()
                                        target="_blank"
                                        rel="noopener noreferrer"
                                        class="font-medium hover:text-indigo-600 dark:hover:text-indigo-400 transition-colors"
                                    >
                                        {social.label.clone()}
                                    </a>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </div>
        </section>
    }
}
