//! Purpose: Compression table model and frequency-based table generation.
//! Exports: `Table`, `DEFAULT_TABLE`.
//! Role: Maps byte values to codeword positions for the packing codec.
//! Invariants: A table holds exactly `TABLE_LEN` distinct byte values.
//! Invariants: Generated tables list entries by descending sample frequency,
//! ties breaking toward the smaller byte value.

use crate::core::error::{Error, ErrorKind};
use crate::core::palette::TABLE_LEN;

/// Frequency-ordered table derived from a reference corpus of wasm modules.
pub const DEFAULT_TABLE: [u8; TABLE_LEN] = [
    32, 0, 65, 2, 1, 106, 34, 33, 3, 128, 11, 4, 13, 64, 6, 253, 10, 7, 15, 116, 127, 5, 8, 12,
    40, 16, 19, 54, 20, 9, 27, 255, 113, 17, 42, 67, 24, 23, 146, 148, 18, 14, 22, 45, 70, 69, 56,
    114, 101, 21, 25, 63, 75, 136, 108, 28, 118, 29, 73, 115,
];

const POSITION_UNSET: i16 = -1;

#[derive(Clone, Debug)]
pub struct Table {
    entries: [u8; TABLE_LEN],
    positions: [i16; 256],
}

impl Table {
    /// Build a table from caller-supplied entries, rejecting duplicates.
    pub fn new(entries: [u8; TABLE_LEN]) -> Result<Self, Error> {
        let mut positions = [POSITION_UNSET; 256];
        for (position, &byte) in entries.iter().enumerate() {
            if positions[byte as usize] != POSITION_UNSET {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message(format!("table lists byte {byte} more than once")));
            }
            positions[byte as usize] = position as i16;
        }
        Ok(Self { entries, positions })
    }

    /// Derive a table from a sample corpus by byte-frequency analysis.
    ///
    /// The sample must cover at least `TABLE_LEN` distinct byte values;
    /// otherwise the table would be undefined for unseen bytes.
    pub fn generate(sample: &[u8]) -> Result<Self, Error> {
        let mut counts = [0u64; 256];
        for &byte in sample {
            counts[byte as usize] += 1;
        }

        let mut seen: Vec<u8> = (0u8..=255).filter(|&byte| counts[byte as usize] > 0).collect();
        if seen.len() < TABLE_LEN {
            return Err(Error::new(ErrorKind::InsufficientSample)
                .with_message(format!(
                    "sample covers {} distinct byte values, need {TABLE_LEN}",
                    seen.len()
                ))
                .with_hint(format!(
                    "Provide a sample with at least {TABLE_LEN} distinct byte values."
                )));
        }

        // Stable sort: equal counts keep ascending byte order.
        seen.sort_by(|a, b| counts[*b as usize].cmp(&counts[*a as usize]));

        let mut entries = [0u8; TABLE_LEN];
        entries.copy_from_slice(&seen[..TABLE_LEN]);
        Self::new(entries)
    }

    pub fn entries(&self) -> &[u8; TABLE_LEN] {
        &self.entries
    }

    /// Codeword position of `byte`, or `None` when the byte is off-table.
    pub fn position(&self, byte: u8) -> Option<usize> {
        let position = self.positions[byte as usize];
        (position != POSITION_UNSET).then_some(position as usize)
    }

    /// Byte value at `position`. Callers keep `position` below `TABLE_LEN`.
    pub fn byte_at(&self, position: usize) -> u8 {
        self.entries[position]
    }
}

impl Default for Table {
    fn default() -> Self {
        let mut positions = [POSITION_UNSET; 256];
        for (position, &byte) in DEFAULT_TABLE.iter().enumerate() {
            positions[byte as usize] = position as i16;
        }
        Self {
            entries: DEFAULT_TABLE,
            positions,
        }
    }
}
