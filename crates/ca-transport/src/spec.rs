//! The wire/storage shape of a simulation definition (§6's "Engine input"),
//! kept distinct from [`ca_core::Parameters`] — the engine's precomputed,
//! read-only runtime form — because a stored spec is just data, built and
//! validated into `Parameters` only when a run actually starts.

use ca_core::{CaError, Ingredient, JEntry, Parameters, Reaction, Result as CaResult, RotationSpec, Surface};
use ca_engine::CaEngine;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSpec {
    pub name: String,
    #[serde(rename = "iterationsNumber")]
    pub iterations_number: usize,
    #[serde(rename = "gridHeight")]
    pub grid_height: usize,
    /// Wire field name preserved verbatim (the source's own typo, per §6).
    #[serde(rename = "gridLenght")]
    pub grid_width: usize,
    #[serde(default = "default_surface")]
    pub surface: Surface,
    pub ingredients: Vec<Ingredient>,
    pub pm: Vec<f64>,
    #[serde(default)]
    pub j: Vec<JEntry>,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
    pub rotation: RotationSpec,
}

fn default_surface() -> Surface {
    Surface::Torus
}

impl SimulationSpec {
    /// Validate and build a runnable engine from this spec.
    pub fn build_engine(&self) -> CaResult<CaEngine> {
        if self.name.trim().is_empty() {
            return Err(CaError::Validation("simulation name must not be empty".into()));
        }
        let params = Parameters::build(
            &self.ingredients,
            self.pm.clone(),
            &self.j,
            self.reactions.clone(),
            self.rotation.clone(),
        )?;
        CaEngine::new(
            self.grid_height,
            self.grid_width,
            self.iterations_number,
            self.ingredients.clone(),
            params,
            self.surface,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_the_declared_wire_field_names() {
        let json = r#"{
            "name": "demo",
            "iterationsNumber": 20,
            "gridHeight": 10,
            "gridLenght": 10,
            "surface": "torus",
            "ingredients": [
                {"name": "A", "molar_fraction": 50.0, "color": "#f00"},
                {"name": "B", "molar_fraction": 50.0, "color": "#0f0"}
            ],
            "pm": [1.0, 1.0],
            "j": [],
            "reactions": [],
            "rotation": {"component": null, "prot": 0.0}
        }"#;
        let spec: SimulationSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.grid_height, 10);
        assert_eq!(spec.grid_width, 10);
        assert!(spec.build_engine().is_ok());
    }
}
