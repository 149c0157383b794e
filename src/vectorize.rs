//! Turns the raw `entity,region,region,...` line format into presence
//! data, and materializes that data into the dense vectors the
//! clustering stage works on.
//!
//! Parsing is deliberately unfiltered: every region code that appears
//! in a well-formed line is kept, whether or not it belongs to a
//! [`RegionUniverse`]. Filtering happens once, in
//! [`PresenceTable::materialize`], so that probes and pairwise
//! distances see the data exactly as it was recorded.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, warn};

use crate::error::Result;
use crate::universe::RegionUniverse;

/// Raw presence data: for each region code, the set of entities
/// recorded in it.
///
/// Built by reading lines of the form `entity,region,region,...`. A
/// line with fewer than two comma-separated fields carries no
/// recordable fact and is skipped with a warning; it contributes
/// neither entities nor regions. Everything else is kept verbatim,
/// including region codes outside any universe.
#[derive(Debug, Clone, Default)]
pub struct PresenceTable {
    regions: BTreeMap<String, BTreeSet<String>>,
    entities: Vec<String>,
}

impl PresenceTable {
    /// Reads a presence table from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<PresenceTable> {
        let path = path.as_ref();
        debug!("reading presence data from {}", path.display());
        let file = File::open(path)?;
        PresenceTable::from_reader(BufReader::new(file))
    }

    /// Reads a presence table from any buffered reader.
    ///
    /// The entity order of the resulting table is the alphabetical
    /// order of all distinct entities seen in well-formed lines. It is
    /// fixed here and reused unchanged by every later stage, so vectors
    /// built from the same input always agree coordinate by coordinate.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<PresenceTable> {
        let mut regions: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut entities: BTreeSet<String> = BTreeSet::new();
        let mut skipped = 0usize;

        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            match line.split_once(',') {
                None => {
                    skipped += 1;
                    warn!("line {}: fewer than 2 fields, skipped", lineno + 1);
                }
                Some((entity, rest)) => {
                    entities.insert(entity.to_string());
                    for code in rest.split(',') {
                        regions
                            .entry(code.to_string())
                            .or_default()
                            .insert(entity.to_string());
                    }
                }
            }
        }

        debug!(
            "presence table: {} regions, {} entities, {} lines skipped",
            regions.len(),
            entities.len(),
            skipped
        );
        Ok(PresenceTable {
            regions,
            entities: entities.into_iter().collect(),
        })
    }

    /// Whether `entity` was recorded as present in `region`.
    pub fn contains(&self, region: &str, entity: &str) -> bool {
        self.regions
            .get(region)
            .map_or(false, |set| set.contains(entity))
    }

    /// The set of entities recorded in `region`, if the region appears
    /// in the data at all.
    pub fn presence(&self, region: &str) -> Option<&BTreeSet<String>> {
        self.regions.get(region)
    }

    /// All region codes seen in the data, in alphabetical order.
    pub fn region_codes(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(String::as_str)
    }

    /// All distinct entities, in the canonical alphabetical order that
    /// defines vector coordinates.
    pub fn entity_order(&self) -> &[String] {
        &self.entities
    }

    /// Number of regions in the table.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the table holds no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Builds dense 0/1 vectors for every region of this table that
    /// belongs to `universe`.
    ///
    /// Rows are ordered alphabetically by region code. Each row has one
    /// coordinate per entity in [`entity_order`](Self::entity_order):
    /// 1.0 where the entity is present, 0.0 where it is not.
    pub fn materialize(&self, universe: &RegionUniverse) -> RegionVectors {
        let dims = self.entities.len();
        let mut codes = Vec::new();
        let mut values = Vec::new();
        for (code, present) in &self.regions {
            if !universe.contains(code) {
                continue;
            }
            codes.push(code.clone());
            values.extend(
                self.entities
                    .iter()
                    .map(|entity| if present.contains(entity) { 1.0 } else { 0.0 }),
            );
        }
        debug!(
            "materialized {} of {} regions into {}-dimensional vectors",
            codes.len(),
            self.regions.len(),
            dims
        );
        RegionVectors { codes, dims, values }
    }
}

/// Dense 0/1 region vectors in a single row-major buffer.
///
/// Produced by [`PresenceTable::materialize`]; region codes are sorted
/// alphabetically and every row has [`dims`](Self::dims) coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionVectors {
    codes: Vec<String>,
    dims: usize,
    values: Vec<f64>,
}

impl RegionVectors {
    /// The region codes, one per row, in alphabetical order.
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// Coordinates per vector. Equal to the number of distinct entities
    /// in the source table, not to the number of regions kept.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Number of region rows.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether no region of the source table belonged to the universe.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// The vector stored at `row`.
    ///
    /// Panics if `row` is out of bounds.
    pub fn vector(&self, row: usize) -> &[f64] {
        &self.values[row * self.dims..(row + 1) * self.dims]
    }

    /// The vector for `code`, if the code survived materialization.
    pub fn vector_for(&self, code: &str) -> Option<&[f64]> {
        self.codes
            .binary_search_by(|probe| probe.as_str().cmp(code))
            .ok()
            .map(|row| self.vector(row))
    }

    /// Iterates over `(code, vector)` rows in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.codes
            .iter()
            .map(String::as_str)
            .zip(self.values.chunks_exact(self.dims.max(1)))
    }
}
