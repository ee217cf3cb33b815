//! ShopDesk Frontend App
//!
//! Root component: host wiring (config, heartbeat, update channel), shared
//! reference data, header and tab navigation.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use shopdesk_core::ipc::UiConfig;
use shopdesk_core::reminders;
use shopdesk_core::{Theme, UpdateCommand, UpdateMachine, UpdatePhase};

use crate::commands;
use crate::components::{
    dispatch_update_command, today, BillingPage, CustomersPage, DashboardPage, InventoryPage,
    LoadingScreen, ReminderBell, ReportsPage, ServicesPage, ToastStack, UpdateBanner, WarrantyPage,
};
use crate::context::AppContext;
use crate::models::{Tab, ToastKind};
use crate::storage;
use crate::store::{AppState, AppStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    // State
    let (ui_config, set_ui_config) = signal(UiConfig::default());
    let (online, set_online) = signal::<Option<bool>>(None);
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let (tab, set_tab) = signal(Tab::Dashboard);
    let (theme, set_theme) = signal(storage::load_theme());
    let (loading, set_loading) = signal(true);
    let update = RwSignal::new(UpdateMachine::new());
    let store = Store::new(AppState::default());

    // Provide context to all children
    let ctx = AppContext::new(ui_config, online, (reload_trigger, set_reload_trigger));
    provide_context(ctx);
    provide_context(store);

    Effect::new(move |_| storage::apply_theme(theme.get()));

    // Host wiring, once per session
    spawn_local(async move {
        match commands::get_ui_config().await {
            Ok(config) => set_ui_config.set(config),
            Err(e) => web_sys::console::warn_1(&format!("[APP] Using default UI config: {}", e).into()),
        }
        if let Ok(version) = commands::get_app_version().await {
            store.app_version().set(version);
        }

        let subscribed = commands::listen_connection(move |status| {
            set_online.set(Some(status.online));
        })
        .await;
        if let Err(e) = subscribed {
            web_sys::console::error_1(&format!("[APP] {}", e).into());
        }

        let subscribed = commands::listen_update_events(move |event| {
            web_sys::console::log_1(&format!("[UPDATE] <- {}", event.name()).into());
            if let Some(Err(e)) = update.try_update(|m| m.handle(&event).map(|_| ())) {
                web_sys::console::log_1(&format!("[UPDATE] {}", e).into());
            }
        })
        .await;
        if let Err(e) = subscribed {
            // Updates are optional; the app carries on without them.
            web_sys::console::error_1(&format!("[UPDATE] {}", e).into());
        }

        // Catch up on anything the host sent before we subscribed
        if let Ok(phase) = commands::get_update_state().await {
            update.update(|m| m.sync(phase));
        }
    });

    // A failure stays on screen for the grace period, then the session resets
    Effect::new(move |was_failed: Option<bool>| {
        let failed = update.with(|m| matches!(m.phase(), UpdatePhase::Failed { .. }));
        if failed && was_failed != Some(true) {
            let grace = ui_config.get_untracked().update_grace_period_ms as u32;
            spawn_local(async move {
                TimeoutFuture::new(grace).await;
                update.update(|m| {
                    m.recover();
                });
            });
        }
        failed
    });

    // Reference data shared by several pages
    let reminded = StoredValue::new(false);
    Effect::new(move |_| {
        let _ = reload_trigger.get();
        spawn_local(async move {
            match commands::list_customers().await {
                Ok(list) => store.customers().set(list),
                Err(e) => ctx.error(format!("Failed to load customers: {}", e)),
            }
            match commands::list_products().await {
                Ok(list) => store.products().set(list),
                Err(e) => ctx.error(format!("Failed to load products: {}", e)),
            }
            match commands::list_services().await {
                Ok(list) => {
                    if !reminded.get_value() {
                        reminded.set_value(true);
                        let due = reminders::due_tomorrow(&list, today());
                        if let Some(message) = reminders::summary(&due) {
                            ctx.notify(ToastKind::Info, message);
                        }
                    }
                    store.services().set(list);
                }
                Err(e) => ctx.error(format!("Failed to load services: {}", e)),
            }
        });
    });

    let toggle_theme = move |_: leptos::ev::MouseEvent| {
        let next = theme.get_untracked().toggle();
        storage::save_theme(next);
        set_theme.set(next);
    };

    let connection = move || match online.get() {
        None => ("pill", "Connecting"),
        Some(true) => ("pill pill-ok", "Online"),
        Some(false) => ("pill pill-bad", "Offline"),
    };

    let page = move || match tab.get() {
        Tab::Dashboard => view! { <DashboardPage /> }.into_any(),
        Tab::Billing => view! { <BillingPage /> }.into_any(),
        Tab::Customers => view! { <CustomersPage /> }.into_any(),
        Tab::Inventory => view! { <InventoryPage /> }.into_any(),
        Tab::Services => view! { <ServicesPage /> }.into_any(),
        Tab::Warranty => view! { <WarrantyPage /> }.into_any(),
        Tab::Reports => view! { <ReportsPage /> }.into_any(),
    };

    view! {
        <Show
            when=move || !loading.get()
            fallback=move || view! { <LoadingScreen on_ready=Callback::new(move |_| set_loading.set(false)) /> }
        >
            <div class="app-layout">
                <UpdateBanner machine=update />

                <header class="app-header">
                    <h1>"ShopDesk"</h1>
                    <nav class="tab-bar">
                        {Tab::ALL.into_iter().map(|t| view! {
                            <button
                                class=move || if tab.get() == t { "tab active" } else { "tab" }
                                on:click=move |_| set_tab.set(t)
                            >
                                {t.label()}
                            </button>
                        }).collect_view()}
                    </nav>
                    <div class="header-tools">
                        <span class=move || connection().0>{move || connection().1}</span>
                        <ReminderBell />
                        <button
                            class="icon-btn"
                            title="Check for updates"
                            on:click=move |_| dispatch_update_command(update, UpdateCommand::ManualCheck)
                        >
                            "⟳"
                        </button>
                        <button class="icon-btn" title="Toggle theme" on:click=toggle_theme>
                            {move || if theme.get() == Theme::Light { "☾" } else { "☀" }}
                        </button>
                        <span class="app-version">{move || store.app_version().get()}</span>
                    </div>
                </header>

                <main class="main-content">{page}</main>
            </div>
        </Show>
        <ToastStack />
    }
}
