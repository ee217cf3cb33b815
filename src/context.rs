//! Application Context
//!
//! Shared state provided via Leptos Context API.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use shopdesk_core::ipc::UiConfig;

use crate::models::{Toast, ToastKind};

const TOAST_LIFETIME_MS: u32 = 4_000;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Tunables served by the host
    pub ui_config: ReadSignal<UiConfig>,
    /// Latest heartbeat result; `None` until the first one arrives
    pub online: ReadSignal<Option<bool>>,
    /// Trigger to reload data after a mutation - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload data after a mutation - write
    set_reload_trigger: WriteSignal<u32>,
    toasts: RwSignal<Vec<Toast>>,
    next_toast: StoredValue<u64>,
}

impl AppContext {
    pub fn new(
        ui_config: ReadSignal<UiConfig>,
        online: ReadSignal<Option<bool>>,
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
    ) -> Self {
        Self {
            ui_config,
            online,
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            toasts: RwSignal::new(Vec::new()),
            next_toast: StoredValue::new(0),
        }
    }

    /// Trigger a reload of page data
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn toasts(&self) -> Signal<Vec<Toast>> {
        self.toasts.into()
    }

    /// Show a toast that dismisses itself
    pub fn notify(&self, kind: ToastKind, message: impl Into<String>) {
        let id = self.next_toast.try_update_value(|n| {
            *n += 1;
            *n
        }).unwrap_or_default();
        self.toasts.update(|list| list.push(Toast { id, kind, message: message.into() }));

        let toasts = self.toasts;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_LIFETIME_MS).await;
            toasts.update(|list| list.retain(|t| t.id != id));
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(ToastKind::Success, message);
    }

    /// Surface a failed call
    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        web_sys::console::error_1(&format!("[APP] {}", message).into());
        self.notify(ToastKind::Error, message);
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|list| list.retain(|t| t.id != id));
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
