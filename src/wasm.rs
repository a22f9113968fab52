//! WASM bindings for DCDC Core.
//!
//! This module provides JavaScript-friendly bindings so a browser front end
//! can evaluate designs and plot the resulting waveforms.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmDesigner } from 'dcdc_core';
//!
//! await init();
//!
//! const designDsl = `
//!   .topology buck
//!   .core pc40
//!   vin 12
//!   vout 5
//!   pout 20
//! `;
//!
//! const designer = new WasmDesigner(designDsl);
//! const result = JSON.parse(designer.evaluate());
//! const il = designer.channel("il");
//! ```

use wasm_bindgen::prelude::*;

use crate::design::{validate_design, Design};
use crate::dsl;
use crate::error::DesignError;
use crate::evaluate::DesignEvaluation;
use crate::magnetics::CoreTable;
use crate::waveform::Channel;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn js_error(e: DesignError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// WASM-compatible converter designer.
///
/// Parses and validates a design once; every call to [`WasmDesigner::evaluate`]
/// recomputes all results from scratch.
#[wasm_bindgen]
pub struct WasmDesigner {
    design: Design,
}

#[wasm_bindgen]
impl WasmDesigner {
    /// Create a designer from a design DSL string.
    ///
    /// # Returns
    /// A new `WasmDesigner` or an error if the design file is invalid.
    #[wasm_bindgen(constructor)]
    pub fn new(design_dsl: &str) -> Result<WasmDesigner, JsValue> {
        let ast = dsl::parse(design_dsl).map_err(js_error)?;
        let design = Design::from_ast(ast).map_err(js_error)?;
        validate_design(&design).map_err(js_error)?;
        Ok(WasmDesigner { design })
    }

    fn run(&self) -> Result<DesignEvaluation, JsValue> {
        self.design.evaluate().map_err(js_error)
    }

    /// Evaluate the design and return the full result as a JSON string.
    #[wasm_bindgen]
    pub fn evaluate(&self) -> Result<String, JsValue> {
        let eval = self.run()?;
        serde_json::to_string(&eval).map_err(|e| {
            js_error(DesignError::WasmError {
                message: e.to_string(),
            })
        })
    }

    /// Sample times in seconds.
    #[wasm_bindgen]
    pub fn times(&self) -> Result<Vec<f64>, JsValue> {
        Ok(self.run()?.waveform.iter().map(|s| s.time).collect())
    }

    /// Values of one waveform channel (`il`, `vin`, `vds`, `vgs`, `vout`, `iout`).
    #[wasm_bindgen]
    pub fn channel(&self, name: &str) -> Result<Vec<f64>, JsValue> {
        let channel: Channel = name.parse().map_err(|e: String| JsValue::from_str(&e))?;
        Ok(self.run()?.waveform.iter().map(|s| s.channel(channel)).collect())
    }

    /// Override the saturation safety margin (fraction of Bsat).
    #[wasm_bindgen]
    pub fn set_safety_margin(&mut self, margin: f64) {
        self.design.config = self.design.config.with_safety_margin(margin);
    }
}

/// Names of the built-in core materials.
#[wasm_bindgen]
pub fn material_names() -> Vec<String> {
    CoreTable::builtin().names().map(str::to_string).collect()
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
