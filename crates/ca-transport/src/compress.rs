//! Chunked compression of the iteration tensor: split the history into
//! chunks of 1000 snapshots, JSON-encode, gzip, base64 each chunk. Kept
//! outside the engine: storage and transfer format are a transport concern,
//! not something the simulation loop itself should know about.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::error::{Result, TransportError};

pub const CHUNK_SIZE: usize = 1000;

/// One compressed chunk of a 3D integer tensor, with its position in the
/// original sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub chunk_number: usize,
    /// base64(gzip(json(slice))).
    pub data: String,
}

/// Split `tensor` into ordered chunks of `CHUNK_SIZE` snapshots each,
/// compressing every chunk independently.
pub fn compress(tensor: &[Vec<Vec<i16>>]) -> Result<Vec<Chunk>> {
    tensor
        .chunks(CHUNK_SIZE)
        .enumerate()
        .map(|(chunk_number, slice)| {
            let json = serde_json::to_vec(slice)?;
            let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(&json)?;
            let gz = encoder.finish()?;
            Ok(Chunk {
                chunk_number,
                data: STANDARD.encode(gz),
            })
        })
        .collect()
}

/// Inverse of [`compress`]: decode, gunzip, and JSON-decode each chunk, then
/// concatenate them back into order.
pub fn decompress(chunks: &[Chunk]) -> Result<Vec<Vec<Vec<i16>>>> {
    let mut ordered = chunks.to_vec();
    ordered.sort_by_key(|c| c.chunk_number);

    let mut tensor = Vec::new();
    for chunk in &ordered {
        let gz = STANDARD
            .decode(&chunk.data)
            .map_err(|e| TransportError::CorruptChunk(e.to_string()))?;
        let mut decoder = GzDecoder::new(gz.as_slice());
        let mut json = Vec::new();
        decoder.read_to_end(&mut json)?;
        let slice: Vec<Vec<Vec<i16>>> = serde_json::from_slice(&json)?;
        tensor.extend(slice);
    }
    Ok(tensor)
}

/// Decode a single chunk by number, for the "single chunk lookup" interface
/// (`get_iterations`).
pub fn decompress_chunk(chunk: &Chunk) -> Result<Vec<Vec<Vec<i16>>>> {
    decompress(std::slice::from_ref(chunk))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_values_and_order() {
        let tensor = vec![
            vec![vec![1, 2], vec![3, 4]],
            vec![vec![5, 6], vec![7, 8]],
        ];
        let chunks = compress(&tensor).unwrap();
        let restored = decompress(&chunks).unwrap();
        assert_eq!(restored, tensor);
    }

    #[test]
    fn chunking_splits_on_1000_snapshot_boundaries() {
        let tensor: Vec<Vec<Vec<i16>>> = (0..2500).map(|i| vec![vec![i as i16]]).collect();
        let chunks = compress(&tensor).unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].chunk_number, 0);
        assert_eq!(chunks[2].chunk_number, 2);

        let restored = decompress(&chunks).unwrap();
        assert_eq!(restored.len(), 2500);
        assert_eq!(restored[2499][0][0], 2499);
    }

    #[test]
    fn single_chunk_lookup_matches_full_decompress() {
        let tensor = vec![vec![vec![9]]];
        let chunks = compress(&tensor).unwrap();
        let one = decompress_chunk(&chunks[0]).unwrap();
        assert_eq!(one, tensor);
    }
}
