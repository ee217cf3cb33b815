//! Loading Screen Component
//!
//! Shown until the first heartbeat arrives (or a fallback timeout). Status
//! text advances on a timer; the timer task checks the mounted flag so it
//! never writes to signals after the screen is gone.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;

const STEPS: [&str; 4] = [
    "Starting ShopDesk…",
    "Connecting to the shop server…",
    "Loading your data…",
    "Almost there…",
];
const STEP_MS: u32 = 700;
/// Give up waiting for the heartbeat after this long
const FALLBACK_MS: u32 = 6_000;

#[component]
pub fn LoadingScreen(#[prop(into)] on_ready: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let (step, set_step) = signal(0usize);

    let mounted = Arc::new(AtomicBool::new(true));
    {
        let mounted = Arc::clone(&mounted);
        on_cleanup(move || mounted.store(false, Ordering::Relaxed));
    }

    spawn_local(async move {
        let mut waited = 0;
        while waited < FALLBACK_MS {
            TimeoutFuture::new(STEP_MS).await;
            waited += STEP_MS;
            if !mounted.load(Ordering::Relaxed) {
                return;
            }
            set_step.update(|s| *s = (*s + 1).min(STEPS.len() - 1));
        }
        if mounted.load(Ordering::Relaxed) {
            web_sys::console::log_1(&"[LOADING] No heartbeat yet, continuing".into());
            on_ready.run(());
        }
    });

    Effect::new(move |_| {
        if ctx.online.get().is_some() {
            on_ready.run(());
        }
    });

    view! {
        <div class="loading-screen">
            <div class="loading-spinner"></div>
            <p class="loading-text">{move || STEPS[step.get()]}</p>
        </div>
    }
}
