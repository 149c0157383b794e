//! The update pass: each centroid moves to the mean of its members.
//!
//! An empty cluster has no mean. Its centroid keeps the vector it
//! already had, so the entry survives with zero members and the loop
//! can still reach a fixed point.

use log::debug;
use rayon::prelude::*;

use crate::assign::{Centroid, Partition};
use crate::vectorize::RegionVectors;

/// Recomputes every centroid from `partition`, keeping labels and
/// centroid order.
///
/// `previous` must be the centroid set the partition was produced
/// from; a centroid whose cluster is empty is carried over from it
/// unchanged.
pub fn update_centroids(
    vectors: &RegionVectors,
    partition: &Partition,
    previous: &[Centroid],
) -> Vec<Centroid> {
    debug_assert_eq!(partition.len(), previous.len());

    previous
        .par_iter()
        .zip(partition.entries().par_iter())
        .map(|(centroid, (label, members))| {
            debug_assert_eq!(&centroid.label, label);

            let mut sums = vec![0.0f64; vectors.dims()];
            let mut count = 0usize;
            for code in members {
                if let Some(vector) = vectors.vector_for(code) {
                    for (sum, value) in sums.iter_mut().zip(vector) {
                        *sum += value;
                    }
                    count += 1;
                }
            }

            if count == 0 {
                debug!("cluster {} is empty, retaining its centroid", label);
                return centroid.clone();
            }
            let value = sums.into_iter().map(|sum| sum / count as f64).collect();
            Centroid {
                label: label.clone(),
                value,
            }
        })
        .collect()
}
