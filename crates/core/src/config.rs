//! Simulation configuration
//!
//! The on-disk format is whitespace-separated integers: `rows`, `cols`,
//! `generations`, an advisory live-cell count, then zero or more `col row`
//! pairs. Any mix of spaces, tabs and newlines separates fields. Pair
//! reading stops at the first token that is not an unsigned integer, so
//! trailing garbage after the pairs is ignored.

use std::fs;
use std::path::Path;

use rustc_hash::FxHashSet;
use tracing::warn;

use crate::error::SimError;

/// Parsed simulation configuration
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Grid rows, positive
    pub rows: usize,
    /// Grid columns, positive
    pub cols: usize,
    /// Number of generations to simulate
    pub generations: usize,
    /// Live-cell count declared by the file; advisory only
    pub declared_live: usize,
    /// Initial live cells as `(col, row)` pairs, duplicates collapsed
    pub live_cells: FxHashSet<(usize, usize)>,
}

impl SimulationConfig {
    /// Parse a configuration from its text form
    ///
    /// # Errors
    ///
    /// `ConfigInvalid` when a header field is missing or not an unsigned
    /// integer, a dimension is zero, `rows * cols` overflows, or a live
    /// cell lies outside the board.
    pub fn parse(text: &str) -> Result<Self, SimError> {
        let mut tokens = text.split_whitespace();
        let rows = next_field(&mut tokens, "rows")?;
        let cols = next_field(&mut tokens, "cols")?;
        let generations = next_field(&mut tokens, "generations")?;
        let declared_live = next_field(&mut tokens, "initial live count")?;

        if rows == 0 || cols == 0 {
            return Err(SimError::ConfigInvalid(format!(
                "dimensions must be positive, got {rows}x{cols}"
            )));
        }
        if rows.checked_mul(cols).is_none() {
            return Err(SimError::ConfigInvalid(format!(
                "grid {rows}x{cols} exceeds addressable size"
            )));
        }

        let mut live_cells = FxHashSet::default();
        while let Some(token) = tokens.next() {
            let Ok(col) = token.parse::<usize>() else {
                break;
            };
            let Some(row_token) = tokens.next() else {
                break;
            };
            let Ok(row) = row_token.parse::<usize>() else {
                break;
            };
            if col >= cols || row >= rows {
                return Err(SimError::ConfigInvalid(format!(
                    "live cell ({col}, {row}) outside the {cols}x{rows} board"
                )));
            }
            live_cells.insert((col, row));
        }

        if live_cells.len() != declared_live {
            warn!(
                "configuration declares {declared_live} live cells but provides {}",
                live_cells.len()
            );
        }

        Ok(Self {
            rows,
            cols,
            generations,
            declared_live,
            live_cells,
        })
    }

    /// Read and parse a configuration file
    ///
    /// # Errors
    ///
    /// `ConfigInvalid` when the file cannot be read or its contents fail
    /// [`SimulationConfig::parse`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SimError> {
        let text = fs::read_to_string(&path).map_err(|e| {
            SimError::ConfigInvalid(format!("cannot read {}: {e}", path.as_ref().display()))
        })?;
        Self::parse(&text)
    }
}

fn next_field<'a, I>(tokens: &mut I, field: &str) -> Result<usize, SimError>
where
    I: Iterator<Item = &'a str>,
{
    let token = tokens
        .next()
        .ok_or_else(|| SimError::ConfigInvalid(format!("missing {field}")))?;
    token.parse().map_err(|_| {
        SimError::ConfigInvalid(format!("{field} must be an unsigned integer, got {token:?}"))
    })
}
