//! Update Orchestrator
//!
//! One state machine, held by both processes. The host drives it from the
//! updater and pushes [`UpdateEvent`]s on [`UPDATE_EVENT_CHANNEL`]; the UI
//! applies the same events to its own copy and only ever reacts. User actions
//! travel the other way as [`UpdateCommand`]s, fire-and-forget: their effect is
//! observed through the next pushed event.
//!
//! ```text
//! Idle -> Checking -> Available -> Downloading -> Downloaded -> Installing
//!            |            |             |              |
//!            +-> Idle     +-------------+--------------+--> Failed -> Idle
//! ```

use serde::{Deserialize, Serialize};

use crate::clock::Millis;
use crate::error::TransitionError;

/// Host -> UI event channel
pub const UPDATE_EVENT_CHANNEL: &str = "updater://event";

/// How long a failure stays on screen before the app carries on
pub const UPDATE_GRACE_PERIOD_MS: Millis = 3_000;

/// Notifications pushed from host to UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum UpdateEvent {
    Checking,
    Available { version: String },
    NotAvailable,
    Progress { percent: u8 },
    Downloaded,
    Installing,
    Error { message: String },
}

impl UpdateEvent {
    pub fn name(&self) -> &'static str {
        match self {
            UpdateEvent::Checking => "checking",
            UpdateEvent::Available { .. } => "available",
            UpdateEvent::NotAvailable => "not-available",
            UpdateEvent::Progress { .. } => "progress",
            UpdateEvent::Downloaded => "downloaded",
            UpdateEvent::Installing => "installing",
            UpdateEvent::Error { .. } => "error",
        }
    }
}

/// User actions sent from UI to host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpdateCommand {
    ManualCheck,
    StartDownload,
    Skip,
    RestartApp,
}

impl UpdateCommand {
    pub const ALL: [UpdateCommand; 4] = [
        UpdateCommand::ManualCheck,
        UpdateCommand::StartDownload,
        UpdateCommand::Skip,
        UpdateCommand::RestartApp,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            UpdateCommand::ManualCheck => "check for updates",
            UpdateCommand::StartDownload => "download",
            UpdateCommand::Skip => "skip",
            UpdateCommand::RestartApp => "restart",
        }
    }

    /// Host command carrying this action. `Skip` never leaves the UI.
    pub fn host_command(&self) -> Option<&'static str> {
        match self {
            UpdateCommand::ManualCheck => Some("manual_check_update"),
            UpdateCommand::StartDownload => Some("start_download"),
            UpdateCommand::RestartApp => Some("restart_app"),
            UpdateCommand::Skip => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    Idle,
    Checking,
    Available,
    Downloading,
    Downloaded,
    Installing,
    Failed,
}

impl PhaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseKind::Idle => "idle",
            PhaseKind::Checking => "checking for updates",
            PhaseKind::Available => "an update is available",
            PhaseKind::Downloading => "downloading",
            PhaseKind::Downloaded => "ready to install",
            PhaseKind::Installing => "installing",
            PhaseKind::Failed => "failed",
        }
    }

    /// Phases reachable in one step
    pub fn successors(&self) -> &'static [PhaseKind] {
        use PhaseKind::*;
        match self {
            Idle => &[Checking],
            Checking => &[Idle, Available, Failed],
            Available => &[Idle, Downloading, Downloaded, Failed],
            Downloading => &[Downloading, Downloaded, Failed],
            Downloaded => &[Installing, Failed],
            Installing => &[],
            Failed => &[Idle],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "kebab-case")]
pub enum UpdatePhase {
    #[default]
    Idle,
    Checking,
    Available { version: String },
    Downloading { version: String, percent: u8 },
    Downloaded { version: String },
    /// Terminal: the host restarts into the new version
    Installing,
    Failed { message: String },
}

impl UpdatePhase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            UpdatePhase::Idle => PhaseKind::Idle,
            UpdatePhase::Checking => PhaseKind::Checking,
            UpdatePhase::Available { .. } => PhaseKind::Available,
            UpdatePhase::Downloading { .. } => PhaseKind::Downloading,
            UpdatePhase::Downloaded { .. } => PhaseKind::Downloaded,
            UpdatePhase::Installing => PhaseKind::Installing,
            UpdatePhase::Failed { .. } => PhaseKind::Failed,
        }
    }

    pub fn version(&self) -> Option<&str> {
        match self {
            UpdatePhase::Available { version }
            | UpdatePhase::Downloading { version, .. }
            | UpdatePhase::Downloaded { version } => Some(version),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, UpdatePhase::Installing)
    }

    fn ignored(&self, event: &UpdateEvent) -> TransitionError {
        TransitionError::Ignored {
            event: event.name(),
            phase: self.kind().as_str(),
        }
    }

    fn rejected(&self, command: UpdateCommand) -> TransitionError {
        TransitionError::Rejected {
            command: command.name(),
            phase: self.kind().as_str(),
        }
    }

    /// Phase after `event`. Events that make no sense from here (including a
    /// late `Available` during a download) leave the phase alone.
    pub fn on_event(&self, event: &UpdateEvent) -> Result<UpdatePhase, TransitionError> {
        use UpdateEvent as E;
        use UpdatePhase as P;

        let next = match (self, event) {
            (P::Idle, E::Checking) => P::Checking,
            (P::Checking, E::Available { version }) => P::Available {
                version: version.clone(),
            },
            (P::Checking, E::NotAvailable) => P::Idle,
            (P::Available { version }, E::Progress { percent }) => P::Downloading {
                version: version.clone(),
                percent: (*percent).min(100),
            },
            (P::Downloading { version, percent: current }, E::Progress { percent }) => {
                P::Downloading {
                    version: version.clone(),
                    percent: (*percent).min(100).max(*current),
                }
            }
            (P::Available { version } | P::Downloading { version, .. }, E::Downloaded) => {
                P::Downloaded {
                    version: version.clone(),
                }
            }
            (P::Downloaded { .. }, E::Installing) => P::Installing,
            (P::Idle | P::Installing | P::Failed { .. }, E::Error { .. }) => {
                return Err(self.ignored(event))
            }
            (_, E::Error { message }) => P::Failed {
                message: message.clone(),
            },
            _ => return Err(self.ignored(event)),
        };
        Ok(next)
    }
}

/// Update session plus banner visibility, one per process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateMachine {
    phase: UpdatePhase,
    banner_visible: bool,
}

impl UpdateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &UpdatePhase {
        &self.phase
    }

    pub fn banner_visible(&self) -> bool {
        self.banner_visible
    }

    fn enter(&mut self, next: UpdatePhase) {
        tracing::debug!(from = self.phase.kind().as_str(), to = next.kind().as_str(), "update phase");
        self.banner_visible = match &next {
            UpdatePhase::Idle => false,
            UpdatePhase::Available { .. }
            | UpdatePhase::Downloaded { .. }
            | UpdatePhase::Installing
            | UpdatePhase::Failed { .. } => true,
            // Progress keeps whatever the user chose (a skipped download stays hidden).
            UpdatePhase::Checking | UpdatePhase::Downloading { .. } => self.banner_visible,
        };
        self.phase = next;
    }

    /// Apply a host notification.
    pub fn handle(&mut self, event: &UpdateEvent) -> Result<&UpdatePhase, TransitionError> {
        let next = self.phase.on_event(event)?;
        self.enter(next);
        Ok(&self.phase)
    }

    /// Apply a user action locally. Returns the host command to send, if any.
    pub fn request(&mut self, command: UpdateCommand) -> Result<Option<&'static str>, TransitionError> {
        use UpdatePhase as P;

        match (&self.phase, command) {
            (P::Idle, UpdateCommand::ManualCheck) => {
                self.enter(P::Checking);
                self.banner_visible = true;
            }
            (P::Available { version }, UpdateCommand::StartDownload) => {
                let version = version.clone();
                self.enter(P::Downloading { version, percent: 0 });
                self.banner_visible = true;
            }
            (P::Downloaded { .. }, UpdateCommand::RestartApp) => self.enter(P::Installing),
            (P::Available { .. } | P::Failed { .. }, UpdateCommand::Skip) => self.enter(P::Idle),
            // Skipping mid-download only hides the banner; the download runs on.
            (P::Downloading { .. } | P::Downloaded { .. }, UpdateCommand::Skip) => {
                self.banner_visible = false;
            }
            (phase, command) => return Err(phase.rejected(command)),
        }
        Ok(command.host_command())
    }

    /// Leave `Failed` once the grace period is over.
    pub fn recover(&mut self) -> bool {
        if matches!(self.phase, UpdatePhase::Failed { .. }) {
            self.enter(UpdatePhase::Idle);
            true
        } else {
            false
        }
    }

    /// Adopt the host's phase wholesale (UI start-up, after missed events).
    pub fn sync(&mut self, phase: UpdatePhase) {
        if self.phase.is_terminal() {
            return;
        }
        self.enter(phase);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_phases() -> Vec<UpdatePhase> {
        vec![
            UpdatePhase::Idle,
            UpdatePhase::Checking,
            UpdatePhase::Available { version: "1.2.0".into() },
            UpdatePhase::Downloading { version: "1.2.0".into(), percent: 40 },
            UpdatePhase::Downloaded { version: "1.2.0".into() },
            UpdatePhase::Installing,
            UpdatePhase::Failed { message: "offline".into() },
        ]
    }

    fn sample_events() -> Vec<UpdateEvent> {
        vec![
            UpdateEvent::Checking,
            UpdateEvent::Available { version: "1.3.0".into() },
            UpdateEvent::NotAvailable,
            UpdateEvent::Progress { percent: 70 },
            UpdateEvent::Downloaded,
            UpdateEvent::Installing,
            UpdateEvent::Error { message: "boom".into() },
        ]
    }

    fn machine_in(phase: UpdatePhase) -> UpdateMachine {
        let mut machine = UpdateMachine::new();
        machine.sync(phase);
        machine
    }

    /// Every single-step outcome from every phase
    fn all_steps() -> Vec<(UpdatePhase, UpdatePhase)> {
        let mut steps = Vec::new();
        for phase in sample_phases() {
            for event in sample_events() {
                let mut m = machine_in(phase.clone());
                if m.handle(&event).is_ok() {
                    steps.push((phase.clone(), m.phase().clone()));
                }
            }
            for command in UpdateCommand::ALL {
                let mut m = machine_in(phase.clone());
                if m.request(command).is_ok() {
                    steps.push((phase.clone(), m.phase().clone()));
                }
            }
            let mut m = machine_in(phase.clone());
            if m.recover() {
                steps.push((phase.clone(), m.phase().clone()));
            }
        }
        steps
    }

    #[test]
    fn test_steps_follow_successor_table() {
        for (from, to) in all_steps() {
            if from == to {
                continue;
            }
            assert!(
                from.kind().successors().contains(&to.kind()),
                "{:?} -> {:?} not in table",
                from.kind(),
                to.kind()
            );
        }
    }

    #[test]
    fn test_idle_only_reaches_checking() {
        for (from, to) in all_steps() {
            if from == UpdatePhase::Idle && to != UpdatePhase::Idle {
                assert_eq!(to, UpdatePhase::Checking);
            }
        }
    }

    #[test]
    fn test_installing_only_from_downloaded() {
        for (from, to) in all_steps() {
            if to == UpdatePhase::Installing && from != UpdatePhase::Installing {
                assert_eq!(from.kind(), PhaseKind::Downloaded);
            }
        }
    }

    #[test]
    fn test_installing_is_terminal() {
        let mut m = machine_in(UpdatePhase::Installing);
        for event in sample_events() {
            assert!(m.handle(&event).is_err());
        }
        for command in UpdateCommand::ALL {
            assert!(m.request(command).is_err());
        }
        assert!(!m.recover());
        m.sync(UpdatePhase::Idle);
        assert_eq!(m.phase(), &UpdatePhase::Installing);
    }

    #[test]
    fn test_happy_path() {
        let mut m = UpdateMachine::new();
        m.handle(&UpdateEvent::Checking).unwrap();
        m.handle(&UpdateEvent::Available { version: "2.0.0".into() }).unwrap();
        assert!(m.banner_visible());

        assert_eq!(m.request(UpdateCommand::StartDownload), Ok(Some("start_download")));
        m.handle(&UpdateEvent::Progress { percent: 35 }).unwrap();
        m.handle(&UpdateEvent::Progress { percent: 90 }).unwrap();
        assert_eq!(
            m.phase(),
            &UpdatePhase::Downloading { version: "2.0.0".into(), percent: 90 }
        );

        m.handle(&UpdateEvent::Downloaded).unwrap();
        assert_eq!(m.phase().version(), Some("2.0.0"));
        assert_eq!(m.request(UpdateCommand::RestartApp), Ok(Some("restart_app")));
        assert!(m.phase().is_terminal());
    }

    #[test]
    fn test_no_update_returns_to_idle() {
        let mut m = UpdateMachine::new();
        assert_eq!(m.request(UpdateCommand::ManualCheck), Ok(Some("manual_check_update")));
        m.handle(&UpdateEvent::NotAvailable).unwrap();
        assert_eq!(m.phase(), &UpdatePhase::Idle);
        assert!(!m.banner_visible());
    }

    #[test]
    fn test_available_during_download_does_not_regress() {
        let mut m = machine_in(UpdatePhase::Downloading { version: "2.0.0".into(), percent: 50 });
        let err = m.handle(&UpdateEvent::Available { version: "2.0.1".into() });
        assert!(err.is_err());
        assert_eq!(
            m.phase(),
            &UpdatePhase::Downloading { version: "2.0.0".into(), percent: 50 }
        );
    }

    #[test]
    fn test_progress_is_clamped_and_monotonic() {
        let mut m = machine_in(UpdatePhase::Available { version: "2.0.0".into() });
        m.handle(&UpdateEvent::Progress { percent: 250 }).unwrap();
        assert_eq!(m.phase(), &UpdatePhase::Downloading { version: "2.0.0".into(), percent: 100 });

        let mut m = machine_in(UpdatePhase::Downloading { version: "2.0.0".into(), percent: 60 });
        m.handle(&UpdateEvent::Progress { percent: 20 }).unwrap();
        assert_eq!(m.phase(), &UpdatePhase::Downloading { version: "2.0.0".into(), percent: 60 });
    }

    #[test]
    fn test_skip_during_download_only_hides_banner() {
        let mut m = machine_in(UpdatePhase::Available { version: "2.0.0".into() });
        m.request(UpdateCommand::StartDownload).unwrap();
        assert_eq!(m.request(UpdateCommand::Skip), Ok(None));
        assert!(!m.banner_visible());
        assert_eq!(m.phase().kind(), PhaseKind::Downloading);

        m.handle(&UpdateEvent::Progress { percent: 80 }).unwrap();
        assert!(!m.banner_visible());

        m.handle(&UpdateEvent::Downloaded).unwrap();
        assert!(m.banner_visible());
    }

    #[test]
    fn test_skip_available_ends_session() {
        let mut m = machine_in(UpdatePhase::Available { version: "2.0.0".into() });
        m.request(UpdateCommand::Skip).unwrap();
        assert_eq!(m.phase(), &UpdatePhase::Idle);
        assert!(!m.banner_visible());
    }

    #[test]
    fn test_failure_then_recover() {
        let mut m = machine_in(UpdatePhase::Downloading { version: "2.0.0".into(), percent: 10 });
        m.handle(&UpdateEvent::Error { message: "disk full".into() }).unwrap();
        assert_eq!(m.phase(), &UpdatePhase::Failed { message: "disk full".into() });
        assert!(m.banner_visible());
        assert!(m.recover());
        assert_eq!(m.phase(), &UpdatePhase::Idle);
        assert!(!m.recover());
    }

    #[test]
    fn test_error_while_idle_is_ignored() {
        let mut m = UpdateMachine::new();
        assert!(m.handle(&UpdateEvent::Error { message: "x".into() }).is_err());
        assert_eq!(m.phase(), &UpdatePhase::Idle);
    }

    #[test]
    fn test_rejected_commands_report_phase() {
        let mut m = UpdateMachine::new();
        assert_eq!(
            m.request(UpdateCommand::RestartApp),
            Err(TransitionError::Rejected { command: "restart", phase: "idle" })
        );
    }

    #[test]
    fn test_event_wire_format() {
        let json = serde_json::to_value(UpdateEvent::Progress { percent: 42 }).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "progress", "percent": 42}));

        let parsed: UpdateEvent = serde_json::from_str(r#"{"kind": "available", "version": "3.1.0"}"#).unwrap();
        assert_eq!(parsed, UpdateEvent::Available { version: "3.1.0".into() });

        let phase = serde_json::to_value(UpdatePhase::Downloaded { version: "3.1.0".into() }).unwrap();
        assert_eq!(phase, serde_json::json!({"phase": "downloaded", "version": "3.1.0"}));
    }
}
