//! Magnetic core design.
//!
//! The core is treated as a gapped magnetic circuit whose reluctance is
//! dominated by the air gap:
//!
//! ```text
//! L  = AL · N² · 1e-9          (AL in nH/N²)
//! lg = μ0 · N² · Ae / L
//! B  = L · Ipk / (N · Ae)  =  μ0 · N · Ipk / lg
//! ```
//!
//! - [`material`] - core materials and the named material table
//! - [`sizer`] - turns, gap, energy and flux density
//! - [`saturation`] - advisory safe/marginal/saturated classification

pub mod material;
pub mod saturation;
pub mod sizer;

pub use material::{CoreEntry, CoreMaterial, CoreTable};
pub use saturation::{classify, evaluate_saturation, SaturationReport, SaturationStatus};
pub use sizer::{size_core, MagneticResult};
