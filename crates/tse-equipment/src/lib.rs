//! tse-equipment: the equipment catalog (C3).
//!
//! Loads and validates burner, AC-unit, air-handler, and room-config
//! JSON records (spec.md §3, §6). Equipment is read-only after load —
//! it never mutates, only the pot/room state that consumes it does.

pub mod ac_unit;
pub mod air_handler;
pub mod burner;
pub mod catalog;
pub mod error;
pub mod room_config;

pub use ac_unit::AcUnit;
pub use air_handler::{AirHandler, TOXIC_GENERIC_KEY};
pub use burner::Burner;
pub use catalog::EquipmentCatalog;
pub use error::{EquipmentError, EquipmentResult};
pub use room_config::{PressureMode, RoomConfig};
