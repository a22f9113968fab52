//! Abstract Syntax Tree types for the design DSL.

use std::collections::HashMap;

/// Complete AST representation of a parsed design file.
#[derive(Debug, Clone, Default)]
pub struct DesignAst {
    /// Topology name from `.topology`
    pub topology: Option<Located<String>>,
    /// Electrical parameters keyed by canonical name
    pub parameters: HashMap<ParamKind, Located<f64>>,
    /// Selected core from `.core`
    pub core: Option<CoreRef>,
    /// Materials defined with `.material`
    pub materials: HashMap<String, MaterialDef>,
    /// `.limits` key/value pairs
    pub limits: HashMap<String, f64>,
    /// `.sim` key/value pairs
    pub sim: HashMap<String, f64>,
    /// Saturation safety margin from `.margin`
    pub margin: Option<f64>,
}

impl DesignAst {
    /// Create a new empty design AST.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a parameter value, if present.
    pub fn param(&self, kind: ParamKind) -> Option<f64> {
        self.parameters.get(&kind).map(|p| p.value)
    }
}

/// A value together with the source line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Located<T> {
    pub value: T,
    pub line: usize,
}

/// Electrical design parameters accepted on a parameter line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Input voltage (V)
    InputVoltage,
    /// Target output voltage (V)
    OutputVoltage,
    /// Target output power (W)
    OutputPower,
    /// Switching frequency (Hz)
    SwitchingFrequency,
    /// Inductor ripple (%)
    InductorRipple,
    /// Output voltage ripple (%)
    OutputRipple,
    /// Efficiency (%)
    Efficiency,
}

impl ParamKind {
    /// Parse a parameter kind from its name or alias.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "vin" => Some(Self::InputVoltage),
            "vout" | "vo" => Some(Self::OutputVoltage),
            "pout" | "po" | "power" => Some(Self::OutputPower),
            "fsw" | "frequency" => Some(Self::SwitchingFrequency),
            "ripple" => Some(Self::InductorRipple),
            "vripple" => Some(Self::OutputRipple),
            "eff" | "efficiency" => Some(Self::Efficiency),
            _ => None,
        }
    }

    /// Canonical DSL name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InputVoltage => "vin",
            Self::OutputVoltage => "vout",
            Self::OutputPower => "pout",
            Self::SwitchingFrequency => "fsw",
            Self::InductorRipple => "ripple",
            Self::OutputRipple => "vripple",
            Self::Efficiency => "eff",
        }
    }
}

/// Core selection: a table name plus optional field overrides.
#[derive(Debug, Clone)]
pub struct CoreRef {
    pub name: String,
    /// Overrides for `al`, `bsat`, `ae`
    pub overrides: HashMap<String, f64>,
    pub line: usize,
}

/// A user-defined core material (`.material`).
#[derive(Debug, Clone)]
pub struct MaterialDef {
    pub name: String,
    /// Material parameters (`al`, `bsat`, `ae`)
    pub params: HashMap<String, f64>,
    /// Source line number
    pub line: usize,
}
