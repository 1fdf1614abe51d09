//! tse-room: the room process (C5).
//!
//! Only active once progression unlocks room controls (spec.md §3).
//! Integrates room temperature (burner spillover + AC PID + Newton
//! cooling to outside), atmosphere composition (vapor ingress +
//! scrubber exchange), pressure (ideal gas law once dynamic, ISA
//! otherwise), and alerts.

pub mod alert;
pub mod error;
pub mod state;
pub mod step;

pub use alert::{Alert, AlertKind, AlertSeverity};
pub use error::{RoomError, RoomResult};
pub use state::{CompositionLogEntry, HeatLogEntry, RoomState};
pub use step::{room_step, RoomStepInput, VaporInflow};
