//! ShopDesk Core
//!
//! Client-side derived state shared by the host and UI processes:
//! - models: API payload shapes, normalized at the deserialization boundary
//! - aggregate: pure rollups (ledger, technicians, revenue, heatmap, restock)
//! - debounce / pagination / cache: view synchronization helpers
//! - update: the update orchestrator state machine used on both ends
//! - ipc: channel names and payloads shared across the process boundary
//!
//! Nothing in here performs I/O. Time is injected through [`Clock`].

pub mod aggregate;
pub mod cache;
pub mod cart;
pub mod clock;
pub mod debounce;
pub mod error;
pub mod export;
pub mod ipc;
pub mod models;
pub mod pagination;
pub mod reminders;
pub mod search;
pub mod theme;
pub mod update;

pub use cache::{TtlCache, DASHBOARD_TTL_MS};
pub use clock::{Clock, ManualClock, Millis, SystemClock};
pub use debounce::{Debouncer, Ticket};
pub use error::{CoreError, TransitionError, ValidationError};
pub use pagination::{project, PageSlice, PageWindow};
pub use theme::Theme;
pub use update::{UpdateCommand, UpdateEvent, UpdateMachine, UpdatePhase};
