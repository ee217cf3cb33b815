//! Reminder Bell Component
//!
//! Services due tomorrow, from the same rule as the start-up notification.

use leptos::prelude::*;
use shopdesk_core::reminders::{due_tomorrow, reminder_message};

use super::today;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ReminderBell() -> impl IntoView {
    let store = use_app_store();
    let (open, set_open) = signal(false);

    let messages = Memo::new(move |_| {
        store.services().with(|tasks| {
            due_tomorrow(tasks, today())
                .into_iter()
                .map(reminder_message)
                .collect::<Vec<_>>()
        })
    });

    view! {
        <div class="reminder-bell">
            <button class="bell-btn" on:click=move |_| set_open.update(|o| *o = !*o)>
                "🔔"
                <Show when=move || !messages.get().is_empty()>
                    <span class="bell-count">{move || messages.get().len()}</span>
                </Show>
            </button>
            <Show when=move || open.get()>
                <div class="bell-dropdown">
                    {move || {
                        let list = messages.get();
                        if list.is_empty() {
                            view! { <p class="bell-empty">"No services due tomorrow"</p> }.into_any()
                        } else {
                            list.into_iter()
                                .map(|m| view! { <p class="bell-item">{m}</p> })
                                .collect_view()
                                .into_any()
                        }
                    }}
                </div>
            </Show>
        </div>
    }
}
