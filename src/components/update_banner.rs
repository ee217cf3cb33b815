//! Update Banner Component
//!
//! Renders the UI copy of the update session. Most buttons apply the command
//! to the local machine first and then tell the host; the host's next event
//! confirms or corrects the local phase.

use leptos::prelude::*;
use leptos::task::spawn_local;
use shopdesk_core::{UpdateCommand, UpdateMachine, UpdatePhase};

use crate::commands;

/// Apply `command` locally and forward it to the host when it has a counterpart.
/// Restart is the exception: `Installing` is terminal, so the UI waits for the
/// host to confirm the install (or report its failure) before leaving `Downloaded`.
pub fn dispatch_update_command(machine: RwSignal<UpdateMachine>, command: UpdateCommand) {
    if command == UpdateCommand::RestartApp {
        let ready = machine.with_untracked(|m| matches!(m.phase(), UpdatePhase::Downloaded { .. }));
        if let (true, Some(host_command)) = (ready, command.host_command()) {
            spawn_local(commands::send_update_command(host_command));
        }
        return;
    }
    match machine.try_update(|m| m.request(command)) {
        Some(Ok(Some(host_command))) => spawn_local(commands::send_update_command(host_command)),
        Some(Ok(None)) => {}
        Some(Err(e)) => web_sys::console::log_1(&format!("[UPDATE] {}", e).into()),
        None => {}
    }
}

#[component]
pub fn UpdateBanner(machine: RwSignal<UpdateMachine>) -> impl IntoView {
    let act = move |command: UpdateCommand| {
        move |_: leptos::ev::MouseEvent| dispatch_update_command(machine, command)
    };

    let body = move || {
        let phase = machine.with(|m| m.phase().clone());
        match phase {
            UpdatePhase::Idle => ().into_any(),
            UpdatePhase::Checking => view! {
                <span class="update-text">"Checking for updates…"</span>
            }.into_any(),
            UpdatePhase::Available { version } => view! {
                <span class="update-text">{format!("Version {} is available.", version)}</span>
                <button class="update-primary" on:click=act(UpdateCommand::StartDownload)>"Download Now"</button>
                <button class="update-secondary" on:click=act(UpdateCommand::Skip)>"Skip"</button>
            }.into_any(),
            UpdatePhase::Downloading { version, percent } => view! {
                <span class="update-text">{format!("Downloading {}… {}%", version, percent)}</span>
                <div class="update-progress">
                    <div class="update-progress-fill" style=format!("width: {}%", percent)></div>
                </div>
                <button class="update-secondary" on:click=act(UpdateCommand::Skip)>"Hide"</button>
            }.into_any(),
            UpdatePhase::Downloaded { version } => view! {
                <span class="update-text">{format!("Version {} is ready to install.", version)}</span>
                <button class="update-primary" on:click=act(UpdateCommand::RestartApp)>"Restart & Install"</button>
                <button class="update-secondary" on:click=act(UpdateCommand::Skip)>"Later"</button>
            }.into_any(),
            UpdatePhase::Installing => view! {
                <span class="update-text">"Installing update, the app will restart…"</span>
            }.into_any(),
            UpdatePhase::Failed { message } => view! {
                <span class="update-text update-error">
                    {format!("Update failed: {}. Continuing with the current version.", message)}
                </span>
                <button class="update-secondary" on:click=act(UpdateCommand::Skip)>"Dismiss"</button>
            }.into_any(),
        }
    };

    view! {
        <Show when=move || machine.with(|m| m.banner_visible())>
            <div class="update-banner">{body}</div>
        </Show>
    }
}
