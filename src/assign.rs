//! The assignment pass: every region vector goes to its nearest
//! centroid.
//!
//! Ties are not left to chance. When two centroids are equally near, a
//! region belongs to the one that comes first in centroid order, which
//! is the sampling order of the labels. The scan below keeps a
//! candidate only on a strictly smaller distance, so the first minimum
//! encountered wins.

use rayon::prelude::*;

use crate::distance::squared_euclidean;
use crate::vectorize::RegionVectors;

/// A labeled centroid vector.
///
/// The label is the region code the centroid was seeded from. It never
/// changes across iterations, even once the vector has been averaged
/// away from any real region's presence row.
#[derive(Debug, Clone, PartialEq)]
pub struct Centroid {
    /// Seeding region code.
    pub label: String,
    /// Dense position, one coordinate per entity.
    pub value: Vec<f64>,
}

impl Centroid {
    /// Convenience constructor.
    pub fn new(label: impl Into<String>, value: Vec<f64>) -> Centroid {
        Centroid {
            label: label.into(),
            value,
        }
    }
}

/// One full assignment of regions to centroids.
///
/// A partition always carries exactly one entry per centroid, in
/// centroid order, keyed by the centroid's label. Member lists are
/// alphabetically sorted and may be empty; a centroid that attracted
/// nothing still appears. Two partitions are equal when every entry
/// matches, which is exactly the fixed-point test the iteration loop
/// uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    entries: Vec<(String, Vec<String>)>,
}

impl Partition {
    /// The `(label, members)` entries in centroid order.
    pub fn entries(&self) -> &[(String, Vec<String>)] {
        &self.entries
    }

    /// Centroid labels in centroid order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    /// Members of the cluster labeled `label`, if such a cluster
    /// exists.
    pub fn members(&self, label: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, members)| members.as_slice())
    }

    /// Number of clusters. Always equal to the number of centroids the
    /// partition was built from.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the partition has no clusters at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Discards the labels and returns the bare member lists, still in
    /// centroid order.
    pub fn into_member_lists(self) -> Vec<Vec<String>> {
        self.entries.into_iter().map(|(_, members)| members).collect()
    }
}

/// Assigns every region of `vectors` to its nearest centroid.
///
/// Distance is squared Euclidean; ties go to the centroid that appears
/// first in `centroids`. The result has one entry per centroid, in
/// order, with alphabetically sorted member lists.
pub fn assign(vectors: &RegionVectors, centroids: &[Centroid]) -> Partition {
    debug_assert!(!centroids.is_empty());

    let nearest: Vec<usize> = (0..vectors.len())
        .into_par_iter()
        .map(|row| {
            let vector = vectors.vector(row);
            let mut best = 0usize;
            let mut best_dist = f64::INFINITY;
            for (idx, centroid) in centroids.iter().enumerate() {
                let dist = squared_euclidean(vector, &centroid.value);
                // strict comparison keeps the earliest centroid on ties
                if dist < best_dist {
                    best = idx;
                    best_dist = dist;
                }
            }
            best
        })
        .collect();

    let mut members: Vec<Vec<String>> = vec![Vec::new(); centroids.len()];
    for (row, &winner) in nearest.iter().enumerate() {
        // rows are visited in code order, which is alphabetical, so
        // each member list is built already sorted
        members[winner].push(vectors.codes()[row].clone());
    }

    let entries = centroids
        .iter()
        .zip(members)
        .map(|(centroid, list)| (centroid.label.clone(), list))
        .collect();
    Partition { entries }
}
