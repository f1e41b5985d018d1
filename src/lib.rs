//! WebAssembly food-placement analyzer for the grid snake arcade game.
//!
//! Exports high-level functions callable from JavaScript via wasm-bindgen.
//! Game state crosses the boundary as a plain JS object (see `GameSnapshot`)
//! decoded with `serde-wasm-bindgen`; cells are `{ col, row }` objects.

pub mod config;
pub mod error;
pub mod placement;
pub mod reachability;
pub mod rng;
pub mod safety;
pub mod session;
pub mod types;
pub mod walls;

pub use error::{Error, Result};

// ─── WASM Exports (only compiled for wasm32 target) ─────────────────────────

#[cfg(target_arch = "wasm32")]
mod wasm_exports {
    use wasm_bindgen::prelude::*;

    use crate::config::PlacementConfig;
    use crate::error::Error;
    use crate::rng::WasmRng;
    use crate::types::{Cell, GameSnapshot, GridBounds};
    use crate::{placement, safety, walls};

    fn decode<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, Error> {
        serde_wasm_bindgen::from_value(value).map_err(|e| Error::Decode(e.to_string()))
    }

    fn encode<T: serde::Serialize>(value: &T) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
    }

    fn decode_snapshot(value: JsValue) -> Result<GameSnapshot, JsError> {
        let snapshot: GameSnapshot = decode(value).map_err(|e| JsError::new(&e.to_string()))?;
        snapshot.validate().map_err(|e| JsError::new(&e.to_string()))?;
        Ok(snapshot)
    }

    fn decode_config(value: JsValue) -> Result<PlacementConfig, JsError> {
        if value.is_undefined() || value.is_null() {
            return Ok(PlacementConfig::default());
        }
        let config: PlacementConfig = decode(value).map_err(|e| JsError::new(&e.to_string()))?;
        config.validate().map_err(|e| JsError::new(&e.to_string()))?;
        Ok(config)
    }

    /// Choose the next food cell.
    /// Returns `{ kind: "food", col, row }` or `{ kind: "levelComplete" }`.
    #[wasm_bindgen(js_name = "selectFoodCell")]
    pub fn wasm_select_food_cell(
        snapshot: JsValue,
        config: JsValue,
        seed: Option<u64>,
    ) -> Result<JsValue, JsError> {
        let snapshot = decode_snapshot(snapshot)?;
        let config = decode_config(config)?;
        let mut rng = WasmRng::from_optional_seed(seed);
        encode(&placement::select_food_cell(&snapshot, &config, &mut rng))
    }

    /// Check whether food at `(col, row)` passes every safety gate.
    /// `config` takes the same optional overrides as `selectFoodCell`.
    #[wasm_bindgen(js_name = "isSafeFoodCell")]
    pub fn wasm_is_safe_food_cell(
        snapshot: JsValue,
        config: JsValue,
        col: usize,
        row: usize,
    ) -> Result<bool, JsError> {
        let snapshot = decode_snapshot(snapshot)?;
        let config = decode_config(config)?;
        Ok(safety::is_safe_food_cell(&snapshot, Cell::new(col, row), &config.safety))
    }

    /// Generate level walls. Returns an array of `{ col, row }`.
    #[wasm_bindgen(js_name = "generateWalls")]
    pub fn wasm_generate_walls(
        width: usize,
        height: usize,
        count: usize,
        seed: Option<u64>,
    ) -> Result<JsValue, JsError> {
        let mut rng = WasmRng::from_optional_seed(seed);
        encode(&walls::generate_walls(GridBounds::new(width, height), count, &mut rng))
    }

    /// Ping function to verify WASM is loaded.
    #[wasm_bindgen(js_name = "ping")]
    pub fn wasm_ping() -> String {
        "WASM food placer ready".to_string()
    }
}
