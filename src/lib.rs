//! # DCDC Core
//!
//! Closed-form design of Buck and Boost DC-DC converters.
//!
//! This library provides:
//! - Steady-state sizing of duty cycle, inductance and output capacitance
//! - Gapped-core magnetic design (turns, air gap, stored energy, flux density)
//! - An advisory saturation check against the core material's Bsat
//! - Piecewise switching waveforms over a few periods
//! - A small design-file language and a CLI (`dcdc`) around all of the above
//!
//! ## Architecture
//!
//! - [`design`] - Design targets, limits, and validation
//! - [`dsl`] - Parser for the design file language
//! - [`converter`] - Topology resolver (electrical sizing)
//! - [`magnetics`] - Core material table, core sizer, saturation evaluator
//! - [`waveform`] - Per-sample waveform synthesis
//! - [`report`] - Text/JSON/CSV output (CLI only)
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! dcdc designs/buck_pc40.dcd
//! dcdc designs/boost_12_24.dcd --format csv > waveform.csv
//! ```
//!
//! ### Library
//!
//! ```
//! use dcdc_core::{evaluate_design, CoreMaterial, DesignSpec, HardwareLimits, Topology};
//!
//! let spec = DesignSpec::new(Topology::Buck, 12.0, 5.0, 20.0, 10e3);
//! let core = CoreMaterial::new(1950.0, 0.39, 120.0);
//! let eval = evaluate_design(&spec, &core, &HardwareLimits::default(), 3, 1000).unwrap();
//! assert_eq!(eval.magnetic.turns, 14);
//! ```
//!
//! ## Evaluation Order
//!
//! Every evaluation recomputes everything from its inputs:
//!
//! 1. Resolve the topology (fails with `InvalidSpec` on a bad voltage ordering)
//! 2. Size the core and classify its flux density against Bsat
//! 3. Synthesize the waveforms from the resolved current levels
//!
//! Steps 2 and 3 depend only on step 1, never on each other.

pub mod converter;
pub mod design;
pub mod dsl;
pub mod error;
pub mod evaluate;
pub mod magnetics;
pub mod waveform;

#[cfg(feature = "cli")]
pub mod report;

// Re-export main types for convenience
pub use converter::ElectricalResult;
pub use design::{Design, DesignSpec, HardwareLimits, Topology};
pub use error::{DesignError, Result};
pub use evaluate::{evaluate_design, evaluate_with_config, DesignEvaluation, EvaluationConfig};
pub use magnetics::{CoreMaterial, CoreTable, MagneticResult, SaturationReport, SaturationStatus};
pub use waveform::{Synthesizer, WaveformSample};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmDesigner;

/// Permeability of free space μ0 (H/m)
pub const MU_0: f64 = 4.0 * std::f64::consts::PI * 1e-7;

/// Default number of simulated switching periods
pub const DEFAULT_CYCLES: usize = 3;

/// Default number of waveform samples
pub const DEFAULT_SAMPLES: usize = 1000;

/// Upper bound on simulated switching periods
pub const MAX_CYCLES: usize = 1_000_000;

/// Upper bound on waveform samples held in memory
pub const MAX_SAMPLES: usize = 10_000_000;

/// Default fraction of Bsat considered safe
pub const DEFAULT_SAFETY_MARGIN: f64 = 0.8;
