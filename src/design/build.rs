//! Assembling a [`Design`] from a parsed design file.

use std::collections::HashMap;

use super::types::{DesignSpec, HardwareLimits, Topology};
use super::{
    DEFAULT_CORE, DEFAULT_EFFICIENCY_PERCENT, DEFAULT_GATE_DRIVE_VOLTAGE,
    DEFAULT_INDUCTOR_RIPPLE_PERCENT, DEFAULT_OUTPUT_RIPPLE_PERCENT, DEFAULT_SATURATION_CURRENT,
    DEFAULT_SWITCHING_FREQUENCY,
};
use crate::dsl::{DesignAst, ParamKind};
use crate::error::{DesignError, Result};
use crate::evaluate::{evaluate_with_config, DesignEvaluation, EvaluationConfig};
use crate::magnetics::{CoreMaterial, CoreTable};
use crate::{MAX_CYCLES, MAX_SAMPLES};

/// A complete design ready for evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Design {
    pub spec: DesignSpec,
    /// Name of the selected core as written in the design
    pub core_name: String,
    pub material: CoreMaterial,
    pub limits: HardwareLimits,
    pub config: EvaluationConfig,
}

impl Design {
    /// Build a design from a parsed AST using the built-in core table.
    pub fn from_ast(ast: DesignAst) -> Result<Self> {
        Self::from_ast_with_table(ast, &CoreTable::builtin())
    }

    /// Build a design from a parsed AST, resolving the core in `table`.
    ///
    /// Materials defined in the design are added to a copy of `table`.
    pub fn from_ast_with_table(ast: DesignAst, table: &CoreTable) -> Result<Self> {
        let topology_def = ast.topology.as_ref().ok_or_else(|| DesignError::MissingParameter {
            name: ".topology".to_string(),
        })?;
        let topology: Topology = topology_def
            .value
            .parse()
            .map_err(|message: String| DesignError::parse(topology_def.line, message))?;

        let required = |kind: ParamKind| {
            ast.param(kind).ok_or_else(|| DesignError::MissingParameter {
                name: kind.name().to_string(),
            })
        };
        let optional = |kind: ParamKind, default: f64| ast.param(kind).unwrap_or(default);

        let spec = DesignSpec {
            topology,
            input_voltage: required(ParamKind::InputVoltage)?,
            output_voltage: required(ParamKind::OutputVoltage)?,
            output_power: required(ParamKind::OutputPower)?,
            switching_frequency: optional(ParamKind::SwitchingFrequency, DEFAULT_SWITCHING_FREQUENCY),
            inductor_ripple_percent: optional(ParamKind::InductorRipple, DEFAULT_INDUCTOR_RIPPLE_PERCENT),
            output_ripple_percent: optional(ParamKind::OutputRipple, DEFAULT_OUTPUT_RIPPLE_PERCENT),
            efficiency_percent: optional(ParamKind::Efficiency, DEFAULT_EFFICIENCY_PERCENT),
        };

        // User materials extend the table
        let mut table = table.clone();
        for def in ast.materials.values() {
            let material = material_from_params(&def.name, &def.params)?;
            table.insert(&def.name, def.name.clone(), material);
        }

        let (core_name, material) = match &ast.core {
            Some(core) => {
                let material = table.material(&core.name)?.with_overrides(&core.overrides)?;
                (core.name.clone(), material)
            }
            None => (DEFAULT_CORE.to_string(), table.material(DEFAULT_CORE)?),
        };

        check_keys(".limits", &ast.limits, &["isat", "vgs"])?;
        let limits = HardwareLimits {
            saturation_current: ast.limits.get("isat").copied().unwrap_or(DEFAULT_SATURATION_CURRENT),
            gate_drive_voltage: ast.limits.get("vgs").copied().unwrap_or(DEFAULT_GATE_DRIVE_VOLTAGE),
        };

        check_keys(".sim", &ast.sim, &["cycles", "samples"])?;
        let mut config = EvaluationConfig::new();
        if let Some(&cycles) = ast.sim.get("cycles") {
            config = config.with_cycles(count(".sim cycles", cycles, MAX_CYCLES)?);
        }
        if let Some(&samples) = ast.sim.get("samples") {
            config = config.with_samples(count(".sim samples", samples, MAX_SAMPLES)?);
        }
        if let Some(margin) = ast.margin {
            config = config.with_safety_margin(margin);
        }

        Ok(Design {
            spec,
            core_name,
            material,
            limits,
            config,
        })
    }

    /// Run the full evaluation for this design.
    pub fn evaluate(&self) -> Result<DesignEvaluation> {
        evaluate_with_config(&self.spec, &self.material, &self.limits, &self.config)
    }
}

/// A `.material` definition must give all three fields.
fn material_from_params(name: &str, params: &HashMap<String, f64>) -> Result<CoreMaterial> {
    let field = |key: &str| {
        params.get(key).copied().ok_or_else(|| {
            DesignError::invalid_parameter(
                format!("{}.{}", name, key),
                "material definitions need al, bsat and ae",
            )
        })
    };
    CoreMaterial::new(field("al")?, field("bsat")?, field("ae")?).with_overrides(params)
}

fn check_keys(directive: &str, params: &HashMap<String, f64>, allowed: &[&str]) -> Result<()> {
    match params.keys().find(|k| !allowed.contains(&k.as_str())) {
        Some(key) => Err(DesignError::invalid_parameter(
            format!("{} {}", directive, key),
            format!("expected one of: {}", allowed.join(", ")),
        )),
        None => Ok(()),
    }
}

/// Convert a whole, non-negative number no larger than `max` to a count.
fn count(param: &str, value: f64, max: usize) -> Result<usize> {
    if value < 0.0 || value.fract() != 0.0 || !value.is_finite() {
        return Err(DesignError::invalid_parameter(param, "must be a whole number"));
    }
    if value > max as f64 {
        return Err(DesignError::invalid_parameter(
            param,
            format!("must be at most {}, got {}", max, value),
        ));
    }
    Ok(value as usize)
}
