//! Physical constants and tunable defaults, centralized in one place.
//!
//! Everything here was "a hard-coded numeric constant mixed into UI
//! code" in the source this engine replaces (see DESIGN.md, Open
//! Questions). Moving them here means every formula and process cites
//! a named constant instead of a magic number.

/// Universal gas constant, J/(mol·K).
pub const GAS_CONSTANT_J_PER_MOL_K: f64 = 8.314_462_618;

/// Standard gravity, m/s^2.
pub const STANDARD_GRAVITY_MPS2: f64 = 9.806_65;

/// mmHg per Pa, for Antoine's equation (which is conventionally
/// parameterized in mmHg).
pub const PA_PER_MMHG: f64 = 133.322;

/// ISA troposphere model parameters (sea level to ~11 km).
pub mod isa {
    /// Sea-level standard temperature, K.
    pub const T0_K: f64 = 288.15;
    /// Sea-level standard pressure, Pa.
    pub const P0_PA: f64 = 101_325.0;
    /// Temperature lapse rate, K/m.
    pub const LAPSE_RATE_K_PER_M: f64 = 0.0065;
    /// Tropopause altitude, m. Above this the model is clamped to the
    /// tropopause pressure (spec.md §4.1).
    pub const TROPOPAUSE_ALTITUDE_M: f64 = 11_000.0;
    /// Mean molar mass of dry air, kg/mol.
    pub const AIR_MOLAR_MASS_KG_PER_MOL: f64 = 0.028_964_4;
}

/// Default Newton's-law still-air cooling coefficient (1/s), used when
/// a substance record does not declare `cooling_coefficient`.
pub const DEFAULT_COOLING_COEFFICIENT_PER_S: f64 = 0.002;

/// Fraction of burner wattage that always leaks to room air, regardless
/// of whether a pot is present. The coupling is deliberately small so
/// it doesn't swamp the room AC's PID authority (see DESIGN.md Open
/// Questions).
pub const DEFAULT_BURNER_SPILLOVER_FRACTION: f64 = 0.10;

/// Outside-air Newton cooling coefficient applied to room temperature
/// (1/s), used when a room config does not override it.
pub const DEFAULT_ROOM_OUTSIDE_LEAK_COEFFICIENT_PER_S: f64 = 0.000_02;

/// Maximum internal sub-integration step, seconds (spec.md §4.5).
pub const MAX_SUBSTEP_S: f64 = 0.25;

/// Target observable tick cadence, Hz (spec.md §4.5).
pub const OBSERVABLE_TICK_HZ: f64 = 10.0;

/// Temperature band, in °C, within which the boiling clamp is
/// considered satisfied (spec.md invariant 4 and transition epsilon).
pub const BOILING_EPSILON_C: f64 = 0.05;

/// Alert thresholds for room atmosphere composition and pressure
/// (spec.md §4.4 item 4), expressed as mole fractions unless noted.
pub mod alerts {
    pub const O2_WARN_FRACTION: f64 = 0.195;
    pub const O2_CRITICAL_FRACTION: f64 = 0.16;
    pub const CO2_WARN_FRACTION: f64 = 0.01;
    pub const NH3_CRITICAL_PPM: f64 = 25.0;
}

/// Mass of substance a single `UnderTap` pot-position transition adds.
/// The fill mass itself is otherwise unspecified; this is the
/// documented default (see DESIGN.md Open Questions).
pub const DEFAULT_POT_FILL_MASS_KG: f64 = 1.0;

/// Liquid-mass fraction of a full fill below which the pot is
/// considered "below refill threshold" and eligible to refill on
/// `UnderTap` (spec.md §6).
pub const REFILL_THRESHOLD_FRACTION: f64 = 0.1;

/// Progression level at which room controls unlock, absent a
/// per-experiment `unlocks_room_controls` override (spec.md §9 Open
/// Questions: "the exact threshold ... is ambiguous").
pub const DEFAULT_ROOM_CONTROLS_UNLOCK_LEVEL: u32 = 4;
