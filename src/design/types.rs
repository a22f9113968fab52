//! Core types for a converter design.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::{
    DEFAULT_EFFICIENCY_PERCENT, DEFAULT_GATE_DRIVE_VOLTAGE, DEFAULT_INDUCTOR_RIPPLE_PERCENT,
    DEFAULT_OUTPUT_RIPPLE_PERCENT, DEFAULT_SATURATION_CURRENT,
};

/// Converter topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    /// Step-down converter (Vo < Vin)
    Buck,
    /// Step-up converter (Vo > Vin)
    Boost,
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topology::Buck => write!(f, "Buck"),
            Topology::Boost => write!(f, "Boost"),
        }
    }
}

impl FromStr for Topology {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "buck" | "step-down" | "stepdown" => Ok(Self::Buck),
            "boost" | "step-up" | "stepup" => Ok(Self::Boost),
            other => Err(format!("unknown topology '{}'", other)),
        }
    }
}

/// User design targets for one converter.
///
/// All values are in base SI units (V, W, Hz); ripple and efficiency
/// figures are percentages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignSpec {
    pub topology: Topology,
    /// Input voltage Vin (V)
    pub input_voltage: f64,
    /// Target output voltage Vo (V)
    pub output_voltage: f64,
    /// Target output power Po (W)
    pub output_power: f64,
    /// Switching frequency fsw (Hz)
    pub switching_frequency: f64,
    /// Peak-to-peak inductor ripple as a percentage of the average inductor current
    pub inductor_ripple_percent: f64,
    /// Peak-to-peak output voltage ripple as a percentage of Vo
    pub output_ripple_percent: f64,
    /// Conversion efficiency (0, 100]
    pub efficiency_percent: f64,
}

impl DesignSpec {
    /// Create a spec with the default ripple and efficiency targets.
    pub fn new(
        topology: Topology,
        input_voltage: f64,
        output_voltage: f64,
        output_power: f64,
        switching_frequency: f64,
    ) -> Self {
        Self {
            topology,
            input_voltage,
            output_voltage,
            output_power,
            switching_frequency,
            inductor_ripple_percent: DEFAULT_INDUCTOR_RIPPLE_PERCENT,
            output_ripple_percent: DEFAULT_OUTPUT_RIPPLE_PERCENT,
            efficiency_percent: DEFAULT_EFFICIENCY_PERCENT,
        }
    }

    /// Set the inductor ripple target (percent of average inductor current).
    pub fn with_inductor_ripple(mut self, percent: f64) -> Self {
        self.inductor_ripple_percent = percent;
        self
    }

    /// Set the output voltage ripple target (percent of Vo).
    pub fn with_output_ripple(mut self, percent: f64) -> Self {
        self.output_ripple_percent = percent;
        self
    }

    /// Set the efficiency target (percent).
    pub fn with_efficiency(mut self, percent: f64) -> Self {
        self.efficiency_percent = percent;
        self
    }

    /// Efficiency as a fraction η.
    pub fn efficiency(&self) -> f64 {
        self.efficiency_percent / 100.0
    }

    /// Switching period T = 1/fsw (s).
    pub fn period(&self) -> f64 {
        1.0 / self.switching_frequency
    }
}

/// Physical limits used by the waveform synthesizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HardwareLimits {
    /// Inductor saturation current Isat (A); simulated current is clamped here
    pub saturation_current: f64,
    /// Gate drive voltage Vgs (V) during the ON interval
    pub gate_drive_voltage: f64,
}

impl HardwareLimits {
    /// Create limits from Isat (A) and the gate drive voltage (V).
    pub fn new(saturation_current: f64, gate_drive_voltage: f64) -> Self {
        Self {
            saturation_current,
            gate_drive_voltage,
        }
    }
}

impl Default for HardwareLimits {
    fn default() -> Self {
        Self::new(DEFAULT_SATURATION_CURRENT, DEFAULT_GATE_DRIVE_VOLTAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topology_from_str() {
        assert_eq!("buck".parse::<Topology>(), Ok(Topology::Buck));
        assert_eq!("BOOST".parse::<Topology>(), Ok(Topology::Boost));
        assert_eq!("step-down".parse::<Topology>(), Ok(Topology::Buck));
        assert!("flyback".parse::<Topology>().is_err());
    }

    #[test]
    fn test_spec_defaults() {
        let spec = DesignSpec::new(Topology::Buck, 12.0, 5.0, 20.0, 10e3);
        assert_eq!(spec.inductor_ripple_percent, 20.0);
        assert_eq!(spec.output_ripple_percent, 0.5);
        assert_eq!(spec.efficiency(), 1.0);
        assert!((spec.period() - 1e-4).abs() < 1e-18);
    }
}
