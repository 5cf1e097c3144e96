//! Built-in board engine backends.
//!
//! The view treats the engine as an opaque collaborator: a square count and
//! a byte per square (see [`crate::BoardEngine`]). `FixedEngine` is the
//! minimal backend used by the CLI and tests; real engines live elsewhere
//! and only need to implement the trait.

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::{BoardEngine, Error, Result};

/// Standard-game placement in engine order: black's back rank at index 0,
/// white's at index 56 (the original engine indexes a8 as square 0).
pub const INITIAL_PLACEMENT: [u8; 64] = [
    10, 8, 9, 11, 12, 9, 8, 10, //
    7, 7, 7, 7, 7, 7, 7, 7, //
    0, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, //
    1, 1, 1, 1, 1, 1, 1, 1, //
    4, 2, 3, 5, 6, 3, 2, 4, //
];

/// A board engine that serves a fixed snapshot.
#[derive(Debug, Clone)]
pub struct FixedEngine {
    snapshot: Vec<u8>,
}

impl FixedEngine {
    /// An all-empty board of `squares` squares.
    pub fn empty(squares: usize) -> Self {
        Self {
            snapshot: vec![0; squares],
        }
    }

    /// The standard initial placement.
    pub fn initial() -> Self {
        Self {
            snapshot: INITIAL_PLACEMENT.to_vec(),
        }
    }

    /// An engine serving the given snapshot bytes verbatim.
    pub fn from_bytes(snapshot: Vec<u8>) -> Self {
        Self { snapshot }
    }

    /// Replace the served snapshot (simulates engine-side state change).
    pub fn set_snapshot(&mut self, snapshot: Vec<u8>) {
        self.snapshot = snapshot;
    }
}

impl BoardEngine for FixedEngine {
    fn square_count(&self) -> usize {
        self.snapshot.len()
    }

    fn snapshot_bytes(&self) -> Vec<u8> {
        self.snapshot.clone()
    }
}

/// On-disk snapshot format: JSON with the square count and the snapshot
/// bytes base64-encoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotFile {
    pub squares: usize,
    pub data: String,
}

impl SnapshotFile {
    /// Encode snapshot bytes for writing.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            squares: bytes.len(),
            data: BASE64.encode(bytes),
        }
    }

    /// Decode back into snapshot bytes, checking the declared length.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let bytes = BASE64
            .decode(&self.data)
            .map_err(|e| Error::SnapshotFileError(format!("bad base64 payload: {}", e)))?;
        if bytes.len() != self.squares {
            return Err(Error::SnapshotFileError(format!(
                "declared {} squares but payload holds {} bytes",
                self.squares,
                bytes.len()
            )));
        }
        Ok(bytes)
    }

    /// Load a snapshot file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::SnapshotFileError(format!("read {}: {}", path.display(), e)))?;
        serde_json::from_str(&raw)
            .map_err(|e| Error::SnapshotFileError(format!("parse {}: {}", path.display(), e)))
    }

    /// Write the snapshot file to disk.
    pub fn save(&self, path: &Path) -> Result<()> {
        let raw = serde_json::to_string_pretty(self)
            .map_err(|e| Error::SnapshotFileError(format!("serialize: {}", e)))?;
        std::fs::write(path, raw)
            .map_err(|e| Error::SnapshotFileError(format!("write {}: {}", path.display(), e)))?;
        log::debug!("wrote snapshot ({} squares) to {}", self.squares, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_placement_is_a_full_game() {
        let engine = FixedEngine::initial();
        assert_eq!(engine.square_count(), 64);
        let snapshot = engine.snapshot_bytes();
        assert_eq!(snapshot.iter().filter(|c| **c != 0).count(), 32);
        // black rook on the first square, white rook on the last
        assert_eq!(snapshot[0], 10);
        assert_eq!(snapshot[63], 4);
        // kings on the e-file
        assert_eq!(snapshot[4], 12);
        assert_eq!(snapshot[60], 6);
    }

    #[test]
    fn snapshot_bytes_is_a_copy() {
        let mut engine = FixedEngine::empty(64);
        let copy = engine.snapshot_bytes();
        engine.set_snapshot(INITIAL_PLACEMENT.to_vec());
        assert!(copy.iter().all(|c| *c == 0));
    }

    #[test]
    fn snapshot_file_round_trip() {
        let file = SnapshotFile::from_bytes(&INITIAL_PLACEMENT);
        assert_eq!(file.squares, 64);
        assert_eq!(file.to_bytes().unwrap(), INITIAL_PLACEMENT.to_vec());
    }

    #[test]
    fn snapshot_file_length_mismatch_is_rejected() {
        let mut file = SnapshotFile::from_bytes(&[0u8; 64]);
        file.squares = 65;
        assert!(file.to_bytes().is_err());
    }
}
