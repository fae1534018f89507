//! # ca-transport
//!
//! Library-level collaborators declared by the engine's external interfaces
//! (§6): chunked gzip+base64 compression of the iteration tensor, CSV
//! rendering of the molar-fraction table, and a repository abstraction over
//! stored simulation definitions and results. No HTTP server lives here —
//! there is nothing in this workspace that needs one.

pub mod compress;
pub mod csv_export;
pub mod error;
pub mod repository;
pub mod spec;

pub use compress::{compress, decompress, decompress_chunk, Chunk, CHUNK_SIZE};
pub use csv_export::to_csv;
pub use error::{Result, TransportError};
pub use repository::{InMemoryRepository, MolarFractionRecord, Repository};
pub use spec::SimulationSpec;
