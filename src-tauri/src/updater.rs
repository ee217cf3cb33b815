//! Update Hub
//!
//! Host side of the update orchestrator. The hub owns the authoritative
//! [`UpdateMachine`], drives an [`UpdateSource`] and pushes every accepted
//! transition to the UI through an [`EventSink`].
//!
//! Commands arriving from the UI are fire-and-forget: anything the machine
//! rejects is logged and dropped, and the UI learns the outcome from the next
//! pushed event.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use shopdesk_core::update::{UpdateCommand, UpdateEvent, UpdateMachine, UpdatePhase, UPDATE_EVENT_CHANNEL};
use shopdesk_core::TransitionError;
use tauri::{AppHandle, Emitter, Runtime};
use tauri_plugin_updater::{Update, UpdaterExt};

pub type ProgressFn = Box<dyn Fn(u8) + Send + Sync>;

/// Where releases come from
#[async_trait]
pub trait UpdateSource: Send + Sync {
    /// `Some(version)` when a newer release is published
    async fn check(&self) -> Result<Option<String>, String>;
    /// Download the release found by the last `check` and keep it staged
    async fn download(&self, on_progress: ProgressFn) -> Result<(), String>;
    /// Install the staged release. On some platforms this never returns.
    fn install(&self) -> Result<(), String>;
    fn restart(&self);
}

pub trait EventSink: Send + Sync {
    fn push(&self, event: &UpdateEvent);
}

impl<R: Runtime> EventSink for AppHandle<R> {
    fn push(&self, event: &UpdateEvent) {
        if let Err(e) = self.emit(UPDATE_EVENT_CHANNEL, event) {
            tracing::warn!(event = event.name(), error = %e, "failed to emit update event");
        }
    }
}

pub struct UpdateHub {
    machine: Mutex<UpdateMachine>,
    source: Arc<dyn UpdateSource>,
    sink: Arc<dyn EventSink>,
    grace: Duration,
}

impl UpdateHub {
    pub fn new(source: Arc<dyn UpdateSource>, sink: Arc<dyn EventSink>, grace: Duration) -> Arc<Self> {
        Arc::new(Self {
            machine: Mutex::new(UpdateMachine::new()),
            source,
            sink,
            grace,
        })
    }

    fn machine(&self) -> MutexGuard<'_, UpdateMachine> {
        self.machine.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn phase(&self) -> UpdatePhase {
        self.machine().phase().clone()
    }

    /// Apply `event` and forward it. Returns false when the machine ignored it.
    fn publish(self: &Arc<Self>, event: UpdateEvent) -> bool {
        let applied = self.machine().handle(&event).map(|phase| phase.clone());
        match applied {
            Ok(phase) => {
                self.sink.push(&event);
                if let UpdatePhase::Failed { message } = &phase {
                    tracing::warn!(%message, "update failed");
                    self.schedule_recovery();
                }
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "update event dropped");
                false
            }
        }
    }

    fn command(&self, command: UpdateCommand) -> Result<(), TransitionError> {
        self.machine().request(command).map(|_| ())
    }

    /// Look for a release. A manual check restarts a session the user skipped
    /// or one still showing a failure.
    pub async fn check(self: &Arc<Self>, manual: bool) {
        if manual {
            let accepted = {
                let mut machine = self.machine();
                if matches!(
                    machine.phase(),
                    UpdatePhase::Available { .. } | UpdatePhase::Failed { .. }
                ) {
                    machine.sync(UpdatePhase::Idle);
                }
                machine.request(UpdateCommand::ManualCheck)
            };
            if let Err(e) = accepted {
                tracing::info!(error = %e, "manual update check dropped");
                return;
            }
        } else if !self.publish(UpdateEvent::Checking) {
            return;
        }

        tracing::info!(manual, "checking for updates");
        let event = match self.source.check().await {
            Ok(Some(version)) => {
                tracing::info!(%version, "update available");
                UpdateEvent::Available { version }
            }
            Ok(None) => UpdateEvent::NotAvailable,
            Err(message) => UpdateEvent::Error { message },
        };
        self.publish(event);
    }

    pub async fn download(self: &Arc<Self>) {
        if let Err(e) = self.command(UpdateCommand::StartDownload) {
            tracing::info!(error = %e, "download request dropped");
            return;
        }

        let hub = Arc::clone(self);
        let on_progress: ProgressFn = Box::new(move |percent| {
            hub.publish(UpdateEvent::Progress { percent });
        });
        let event = match self.source.download(on_progress).await {
            Ok(()) => UpdateEvent::Downloaded,
            Err(message) => UpdateEvent::Error { message },
        };
        self.publish(event);
    }

    /// Install the downloaded release, then restart. Only valid once the
    /// machine reached `Downloaded`; a failed install ends in `Failed`.
    pub fn restart(self: &Arc<Self>) {
        if !matches!(self.machine().phase(), UpdatePhase::Downloaded { .. }) {
            tracing::info!(phase = self.phase().kind().as_str(), "restart request dropped");
            return;
        }

        tracing::info!("installing update");
        if let Err(message) = self.source.install() {
            tracing::error!(%message, "update install failed");
            self.publish(UpdateEvent::Error { message });
            return;
        }
        if let Err(e) = self.command(UpdateCommand::RestartApp) {
            tracing::warn!(error = %e, "restart rejected after install");
            return;
        }
        self.sink.push(&UpdateEvent::Installing);
        tracing::info!("restarting into the new version");
        self.source.restart();
    }

    fn schedule_recovery(self: &Arc<Self>) {
        let hub = Arc::clone(self);
        let grace = self.grace;
        tauri::async_runtime::spawn(async move {
            tokio::time::sleep(grace).await;
            if hub.machine().recover() {
                tracing::info!("update session reset after failure");
            }
        });
    }
}

/// Percent of `total` received so far, if the size is known
pub fn download_percent(received: u64, total: Option<u64>) -> Option<u8> {
    match total {
        Some(total) if total > 0 => Some((received.saturating_mul(100) / total).min(100) as u8),
        _ => None,
    }
}

/// Releases served through the Tauri updater plugin
pub struct TauriUpdateSource<R: Runtime> {
    app: AppHandle<R>,
    pending: Mutex<Option<Update>>,
    /// Package bytes between download and install
    downloaded: Mutex<Option<Vec<u8>>>,
}

impl<R: Runtime> TauriUpdateSource<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self {
            app,
            pending: Mutex::new(None),
            downloaded: Mutex::new(None),
        }
    }

    fn pending(&self) -> MutexGuard<'_, Option<Update>> {
        self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn downloaded(&self) -> MutexGuard<'_, Option<Vec<u8>>> {
        self.downloaded.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl<R: Runtime> UpdateSource for TauriUpdateSource<R> {
    async fn check(&self) -> Result<Option<String>, String> {
        let updater = self.app.updater().map_err(|e| e.to_string())?;
        let update = updater.check().await.map_err(|e| e.to_string())?;
        let version = update.as_ref().map(|u| u.version.clone());
        *self.pending() = update;
        *self.downloaded() = None;
        Ok(version)
    }

    async fn download(&self, on_progress: ProgressFn) -> Result<(), String> {
        let update = self
            .pending()
            .clone()
            .ok_or_else(|| "no update to download".to_string())?;

        let mut received: u64 = 0;
        let mut last: Option<u8> = None;
        let bytes = update
            .download(
                |chunk, total| {
                    received += chunk as u64;
                    if let Some(percent) = download_percent(received, total) {
                        if last != Some(percent) {
                            last = Some(percent);
                            on_progress(percent);
                        }
                    }
                },
                || tracing::info!("update download finished"),
            )
            .await
            .map_err(|e| e.to_string())?;
        *self.downloaded() = Some(bytes);
        Ok(())
    }

    fn install(&self) -> Result<(), String> {
        let update = self
            .pending()
            .clone()
            .ok_or_else(|| "no update to install".to_string())?;
        let bytes = self
            .downloaded()
            .take()
            .ok_or_else(|| "update has not been downloaded".to_string())?;
        update.install(bytes).map_err(|e| e.to_string())
    }

    fn restart(&self) {
        self.app.restart()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    struct FakeSource {
        release: Result<Option<String>, String>,
        download: Result<(), String>,
        install: Result<(), String>,
        downloads: AtomicUsize,
        installs: AtomicUsize,
        restarted: AtomicBool,
    }

    impl FakeSource {
        fn new(release: Result<Option<String>, String>) -> Arc<Self> {
            Self::with_install(release, Ok(()))
        }

        fn with_install(release: Result<Option<String>, String>, install: Result<(), String>) -> Arc<Self> {
            Arc::new(Self {
                release,
                download: Ok(()),
                install,
                downloads: AtomicUsize::new(0),
                installs: AtomicUsize::new(0),
                restarted: AtomicBool::new(false),
            })
        }
    }

    #[async_trait]
    impl UpdateSource for FakeSource {
        async fn check(&self) -> Result<Option<String>, String> {
            self.release.clone()
        }

        async fn download(&self, on_progress: ProgressFn) -> Result<(), String> {
            self.downloads.fetch_add(1, Ordering::SeqCst);
            on_progress(30);
            on_progress(100);
            self.download.clone()
        }

        fn install(&self) -> Result<(), String> {
            self.installs.fetch_add(1, Ordering::SeqCst);
            self.install.clone()
        }

        fn restart(&self) {
            self.restarted.store(true, Ordering::SeqCst);
        }
    }

    #[derive(Default)]
    struct RecordingSink(Mutex<Vec<UpdateEvent>>);

    impl EventSink for RecordingSink {
        fn push(&self, event: &UpdateEvent) {
            self.0.lock().unwrap().push(event.clone());
        }
    }

    impl RecordingSink {
        fn take(&self) -> Vec<UpdateEvent> {
            std::mem::take(&mut *self.0.lock().unwrap())
        }
    }

    fn hub(source: Arc<FakeSource>) -> (Arc<UpdateHub>, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        let hub = UpdateHub::new(source, sink.clone(), Duration::from_millis(20));
        (hub, sink)
    }

    #[tokio::test]
    async fn test_auto_check_announces_checking() {
        let (hub, sink) = hub(FakeSource::new(Ok(Some("1.2.0".into()))));
        hub.check(false).await;
        assert_eq!(
            sink.take(),
            vec![UpdateEvent::Checking, UpdateEvent::Available { version: "1.2.0".into() }]
        );
        assert_eq!(hub.phase(), UpdatePhase::Available { version: "1.2.0".into() });
    }

    #[tokio::test]
    async fn test_manual_check_without_release() {
        let (hub, sink) = hub(FakeSource::new(Ok(None)));
        hub.check(true).await;
        // The UI already moved itself to Checking.
        assert_eq!(sink.take(), vec![UpdateEvent::NotAvailable]);
        assert_eq!(hub.phase(), UpdatePhase::Idle);
    }

    #[tokio::test]
    async fn test_full_download_and_restart() {
        let source = FakeSource::new(Ok(Some("2.0.0".into())));
        let (hub, sink) = hub(source.clone());
        hub.check(false).await;
        sink.take();

        hub.download().await;
        assert_eq!(
            sink.take(),
            vec![
                UpdateEvent::Progress { percent: 30 },
                UpdateEvent::Progress { percent: 100 },
                UpdateEvent::Downloaded,
            ]
        );

        hub.restart();
        assert_eq!(sink.take(), vec![UpdateEvent::Installing]);
        assert!(source.restarted.load(Ordering::SeqCst));
        assert_eq!(hub.phase(), UpdatePhase::Installing);
    }

    #[tokio::test]
    async fn test_install_waits_for_restart() {
        let source = FakeSource::new(Ok(Some("2.0.0".into())));
        let (hub, sink) = hub(source.clone());
        hub.check(false).await;
        hub.download().await;
        sink.take();

        assert_eq!(source.installs.load(Ordering::SeqCst), 0);
        assert_eq!(hub.phase(), UpdatePhase::Downloaded { version: "2.0.0".into() });

        hub.restart();
        assert_eq!(source.installs.load(Ordering::SeqCst), 1);
        assert!(source.restarted.load(Ordering::SeqCst));
        assert_eq!(sink.take(), vec![UpdateEvent::Installing]);
    }

    #[tokio::test]
    async fn test_restart_before_download_installs_nothing() {
        let source = FakeSource::new(Ok(Some("2.0.0".into())));
        let (hub, sink) = hub(source.clone());
        hub.check(false).await;
        sink.take();

        hub.restart();
        assert_eq!(source.installs.load(Ordering::SeqCst), 0);
        assert!(!source.restarted.load(Ordering::SeqCst));
        assert!(sink.take().is_empty());
    }

    #[tokio::test]
    async fn test_failed_install_does_not_restart() {
        let source = FakeSource::with_install(Ok(Some("2.0.0".into())), Err("signature mismatch".into()));
        let (hub, sink) = hub(source.clone());
        hub.check(false).await;
        hub.download().await;
        sink.take();

        hub.restart();
        assert!(!source.restarted.load(Ordering::SeqCst));
        assert_eq!(sink.take(), vec![UpdateEvent::Error { message: "signature mismatch".into() }]);
        assert!(matches!(hub.phase(), UpdatePhase::Failed { .. }));
    }

    #[tokio::test]
    async fn test_out_of_order_commands_are_dropped() {
        let source = FakeSource::new(Ok(Some("2.0.0".into())));
        let (hub, sink) = hub(source.clone());

        hub.download().await;
        hub.restart();
        assert_eq!(source.downloads.load(Ordering::SeqCst), 0);
        assert_eq!(source.installs.load(Ordering::SeqCst), 0);
        assert!(!source.restarted.load(Ordering::SeqCst));
        assert!(sink.take().is_empty());
        assert_eq!(hub.phase(), UpdatePhase::Idle);
    }

    #[tokio::test]
    async fn test_failure_recovers_after_grace() {
        let (hub, sink) = hub(FakeSource::new(Err("offline".into())));
        hub.check(false).await;
        assert_eq!(
            sink.take(),
            vec![UpdateEvent::Checking, UpdateEvent::Error { message: "offline".into() }]
        );
        assert!(matches!(hub.phase(), UpdatePhase::Failed { .. }));

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(hub.phase(), UpdatePhase::Idle);
    }

    #[tokio::test]
    async fn test_manual_check_after_skip() {
        let (hub, sink) = hub(FakeSource::new(Ok(Some("1.2.0".into()))));
        hub.check(false).await;
        sink.take();

        // The user skipped; the host still sits in Available.
        hub.check(true).await;
        assert_eq!(sink.take(), vec![UpdateEvent::Available { version: "1.2.0".into() }]);
    }

    #[tokio::test]
    async fn test_auto_check_skipped_while_busy() {
        let (hub, sink) = hub(FakeSource::new(Ok(Some("1.2.0".into()))));
        hub.check(false).await;
        sink.take();
        hub.check(false).await;
        assert!(sink.take().is_empty());
    }

    #[test]
    fn test_download_percent() {
        assert_eq!(download_percent(50, Some(200)), Some(25));
        assert_eq!(download_percent(300, Some(200)), Some(100));
        assert_eq!(download_percent(10, None), None);
        assert_eq!(download_percent(10, Some(0)), None);
    }
}
