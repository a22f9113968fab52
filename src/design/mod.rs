//! Design representation and validation.
//!
//! This module holds the user-facing design targets ([`DesignSpec`]), the
//! simulation limits ([`HardwareLimits`]) and the assembled [`Design`]
//! built from a parsed design file.

mod build;
mod types;
mod validate;

pub use build::Design;
pub use types::*;
pub use validate::validate_design;

/// Default switching frequency (Hz).
pub const DEFAULT_SWITCHING_FREQUENCY: f64 = 10e3;

/// Default inductor ripple (% of average inductor current).
pub const DEFAULT_INDUCTOR_RIPPLE_PERCENT: f64 = 20.0;

/// Default output voltage ripple (% of Vo).
pub const DEFAULT_OUTPUT_RIPPLE_PERCENT: f64 = 0.5;

/// Default efficiency (%).
pub const DEFAULT_EFFICIENCY_PERCENT: f64 = 100.0;

/// Default inductor saturation current for the waveform clamp (A).
pub const DEFAULT_SATURATION_CURRENT: f64 = 10.0;

/// Default gate drive voltage (V).
pub const DEFAULT_GATE_DRIVE_VOLTAGE: f64 = 10.0;

/// Core selected when a design names none.
pub const DEFAULT_CORE: &str = "pc40";
