//! Services Page
//!
//! Technician performance, task-type mix, the monthly service calendar and
//! upcoming visits.

use chrono::Datelike;
use leptos::prelude::*;
use leptos::task::spawn_local;
use shopdesk_core::aggregate::{
    task_type_distribution, technician_performance, ServiceHeatmap, MONTHS,
};

use super::today;
use crate::commands;
use crate::context::use_app_context;
use crate::models::ServiceTask;
use crate::store::{use_app_store, AppStateStoreFields};

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[component]
pub fn ServicesPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (report, set_report) = signal(Vec::<ServiceTask>::new());
    let (upcoming, set_upcoming) = signal(Vec::<ServiceTask>::new());

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            match commands::service_report().await {
                Ok(tasks) => set_report.set(tasks),
                Err(e) => ctx.error(format!("Failed to load service report: {}", e)),
            }
            match commands::upcoming_services().await {
                Ok(tasks) => set_upcoming.set(tasks),
                Err(e) => ctx.error(format!("Failed to load upcoming services: {}", e)),
            }
        });
    });

    let technicians = Memo::new(move |_| report.with(|tasks| technician_performance(tasks)));
    let task_types = Memo::new(move |_| report.with(|tasks| task_type_distribution(tasks)));

    view! {
        <section class="page services-page">
            <header class="page-header">
                <h2>"Services"</h2>
            </header>

            <div class="two-column">
                <div>
                    <h3>"Technician Performance"</h3>
                    <table class="data-table">
                        <thead>
                            <tr><th>"Technician"</th><th>"Tasks"</th><th>"Completed"</th><th>"Rate"</th></tr>
                        </thead>
                        <tbody>
                            {move || technicians.get().into_iter().map(|t| view! {
                                <tr>
                                    <td>{t.name}</td>
                                    <td>{t.total}</td>
                                    <td>{t.completed}</td>
                                    <td>
                                        <div class="rate-bar">
                                            <div class="rate-fill" style=format!("width: {}%", t.completion_rate)></div>
                                            <span>{format!("{}%", t.completion_rate)}</span>
                                        </div>
                                    </td>
                                </tr>
                            }).collect_view()}
                        </tbody>
                    </table>
                </div>
                <div>
                    <h3>"Task Types"</h3>
                    <ul class="share-list">
                        {move || task_types.get().into_iter().map(|s| view! {
                            <li>
                                <span>{s.task_type}</span>
                                <span class="muted">{format!("{} ({}%)", s.count, s.percentage)}</span>
                            </li>
                        }).collect_view()}
                    </ul>
                </div>
            </div>

            <h3>"Service Calendar"</h3>
            <ServiceCalendar tasks=Signal::derive(move || store.services().get()) />

            <h3>"Upcoming"</h3>
            <ul class="upcoming-list">
                {move || upcoming.get().into_iter().map(|t| {
                    let when = t.scheduled_on().map(|d| d.format("%a %-d %b").to_string()).unwrap_or_default();
                    view! {
                        <li>
                            <strong>{when}</strong>
                            {format!(" {} for {} ({})", t.kind(), t.customer_name(), t.technician())}
                        </li>
                    }
                }).collect_view()}
            </ul>
        </section>
    }
}

#[component]
fn ServiceCalendar(#[prop(into)] tasks: Signal<Vec<ServiceTask>>) -> impl IntoView {
    let now = today();
    let shown = RwSignal::new((now.year(), now.month()));

    let heatmap = Memo::new(move |_| {
        let (year, month) = shown.get();
        tasks.with(|list| ServiceHeatmap::build(list, year, month).ok())
    });
    let shift = move |delta: i32| {
        shown.update(|(year, month)| {
            let (y, m) = ServiceHeatmap::shifted(*year, *month, delta);
            *year = y;
            *month = m;
        });
    };

    view! {
        <div class="calendar">
            <div class="calendar-nav">
                <button on:click=move |_| shift(-1)>"‹"</button>
                <span>{move || {
                    let (year, month) = shown.get();
                    format!("{} {}", MONTHS[(month - 1) as usize], year)
                }}</span>
                <button on:click=move |_| shift(1)>"›"</button>
            </div>
            <div class="calendar-grid">
                {WEEKDAYS.iter().map(|d| view! { <span class="calendar-weekday">{*d}</span> }).collect_view()}
                {move || heatmap.get().map(|map| {
                    let blanks = (0..map.leading_blanks())
                        .map(|_| view! { <span class="calendar-cell blank"></span> })
                        .collect_view();
                    let cells = map.cells().into_iter().map(|cell| {
                        let title = format!("{} service(s)", cell.count);
                        view! {
                            <span class=format!("calendar-cell {}", cell.tier.css_class()) title=title>
                                {cell.day}
                            </span>
                        }
                    }).collect_view();
                    view! { {blanks} {cells} }
                })}
            </div>
            <p class="muted">
                {move || heatmap.get().map(|m| format!("{} services this month", m.total())).unwrap_or_default()}
            </p>
        </div>
    }
}
