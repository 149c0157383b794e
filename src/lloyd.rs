//! The Lloyd iteration: seed, assign, update, repeat until the
//! partition stops moving.
//!
//! Convergence is structural. After every update pass the regions are
//! reassigned, and the loop stops as soon as the new partition equals
//! the previous one, labels, order, members and all. There is no
//! distance threshold; a run either reaches an exact fixed point
//! within the configured iteration bound or fails with
//! [`Error::IterationLimitExceeded`].

use log::{debug, info};

use crate::api::ClusterConfig;
use crate::assign::{assign, Centroid, Partition};
use crate::error::{Error, Result};
use crate::update::update_centroids;
use crate::vectorize::RegionVectors;

/// Iteration bound used when the caller does not set one.
pub const DEFAULT_MAX_ITER: usize = 300;

/// Final state of a converged run.
#[derive(Debug, Clone)]
pub struct LloydState {
    /// The fixed-point partition.
    pub partition: Partition,
    /// Final centroids, one per seeded label, in sampling order.
    pub centroids: Vec<Centroid>,
    /// Number of update passes needed to reach the fixed point.
    pub iterations: usize,
}

/// Builds the initial centroid set for the given labels.
///
/// A label that survived materialization seeds its own presence
/// vector. A label sampled from the universe but never observed in the
/// data has the empty presence set, so it seeds the zero vector.
pub(crate) fn seed_centroids(vectors: &RegionVectors, labels: Vec<String>) -> Vec<Centroid> {
    labels
        .into_iter()
        .map(|label| {
            let value = match vectors.vector_for(&label) {
                Some(vector) => vector.to_vec(),
                None => vec![0.0; vectors.dims()],
            };
            Centroid { label, value }
        })
        .collect()
}

/// Runs Lloyd iterations from the given centroid labels until the
/// partition reaches a fixed point.
///
/// The run starts by seeding one centroid per label and assigning
/// every region once; that initial partition is handed to the
/// `init_done` callback. Each following pass recomputes centroids from
/// the current partition and reassigns. `iteration_done` fires after
/// every pass with the fresh partition, the 1-based pass number and
/// whether anything moved.
///
/// Returns [`Error::IterationLimitExceeded`] when the bound from
/// [`ClusterConfig::max_iter`](crate::api::ClusterConfigBuilder::max_iter)
/// runs out before two consecutive passes agree.
pub fn calculate(
    vectors: &RegionVectors,
    labels: Vec<String>,
    config: &ClusterConfig<'_>,
) -> Result<LloydState> {
    if labels.is_empty() {
        return Err(Error::InvalidArgument {
            name: "labels",
            message: "at least one centroid label is required".to_string(),
        });
    }

    let mut centroids = seed_centroids(vectors, labels);
    let mut partition = assign(vectors, &centroids);
    (config.init_done)(&partition);

    for iteration in 1..=config.max_iter {
        centroids = update_centroids(vectors, &partition, &centroids);
        let next = assign(vectors, &centroids);
        let changed = next != partition;
        (config.iteration_done)(&next, iteration, changed);
        if !changed {
            info!("converged after {} iterations", iteration);
            return Ok(LloydState {
                partition: next,
                centroids,
                iterations: iteration,
            });
        }
        debug!("iteration {}: partition changed", iteration);
        partition = next;
    }
    Err(Error::IterationLimitExceeded {
        iterations: config.max_iter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::universe::RegionUniverse;
    use crate::vectorize::PresenceTable;
    use pretty_assertions::assert_eq;
    use std::cell::{Cell, RefCell};

    fn entry(label: &str, members: &[&str]) -> (String, Vec<String>) {
        (
            label.to_string(),
            members.iter().map(|m| m.to_string()).collect(),
        )
    }

    fn labels(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    // aa and bb share {p1, p2}, cc and dd share {p3, p4}
    const TWO_GROUPS: &str = "\
p1,aa,bb
p2,aa,bb
p3,cc,dd
p4,cc,dd
";

    fn two_group_vectors(universe: &RegionUniverse) -> RegionVectors {
        PresenceTable::from_reader(TWO_GROUPS.as_bytes())
            .unwrap()
            .materialize(universe)
    }

    // four regions on a chain of nested presence sets: r02 holds the
    // first 2 entities, r04 the first 4, r05 the first 5, r20 all 20
    fn chain_vectors() -> RegionVectors {
        let mut data = String::new();
        for entity in 1..=20usize {
            data.push_str(&format!("e{:02}", entity));
            for (code, position) in [("r02", 2), ("r04", 4), ("r05", 5), ("r20", 20)] {
                if entity <= position {
                    data.push(',');
                    data.push_str(code);
                }
            }
            data.push('\n');
        }
        PresenceTable::from_reader(data.as_bytes())
            .unwrap()
            .materialize(&RegionUniverse::new(["r02", "r04", "r05", "r20"]))
    }

    #[test]
    fn separated_groups_converge_in_one_pass() {
        let universe = RegionUniverse::new(["aa", "bb", "cc", "dd"]);
        let vectors = two_group_vectors(&universe);
        let config = ClusterConfig::default();

        let state = calculate(&vectors, labels(&["aa", "cc"]), &config).unwrap();
        assert_eq!(state.iterations, 1);
        assert_eq!(
            state.partition.entries(),
            [entry("aa", &["aa", "bb"]), entry("cc", &["cc", "dd"])]
        );
    }

    #[test]
    fn absent_label_seeds_the_zero_vector() {
        let universe = RegionUniverse::new(["aa", "bb", "cc", "dd", "zz"]);
        let vectors = two_group_vectors(&universe);
        let config = ClusterConfig::default();

        // zz is in the universe but not in the data; its zero seed is
        // nearer to the sparse cc/dd group than aa's seed is
        let state = calculate(&vectors, labels(&["aa", "zz"]), &config).unwrap();
        assert_eq!(state.iterations, 1);
        assert_eq!(
            state.partition.entries(),
            [entry("aa", &["aa", "bb"]), entry("zz", &["cc", "dd"])]
        );
        assert_eq!(state.centroids[1].label, "zz");
        assert_eq!(state.centroids[1].value, [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn empty_cluster_survives_to_convergence() {
        let universe = RegionUniverse::new(["aa", "bb", "zz"]);
        let vectors = PresenceTable::from_reader("p1,aa\np2,aa,bb".as_bytes())
            .unwrap()
            .materialize(&universe);
        let config = ClusterConfig::default();

        // bb is equidistant from aa's seed and zz's zero seed; the tie
        // goes to aa and zz stays empty through the whole run
        let state = calculate(&vectors, labels(&["aa", "zz"]), &config).unwrap();
        assert_eq!(state.iterations, 1);
        assert_eq!(
            state.partition.entries(),
            [entry("aa", &["aa", "bb"]), entry("zz", &[])]
        );
        assert_eq!(state.centroids[0].value, [0.5, 1.0]);
        // retained, not recomputed
        assert_eq!(state.centroids[1].value, [0.0, 0.0]);
    }

    #[test]
    fn chained_overlaps_need_three_passes() {
        let vectors = chain_vectors();
        let config = ClusterConfig::default();

        let state = calculate(&vectors, labels(&["r02", "r05"]), &config).unwrap();
        assert_eq!(state.iterations, 3);
        assert_eq!(
            state.partition.entries(),
            [entry("r02", &["r02", "r04", "r05"]), entry("r05", &["r20"])]
        );
    }

    #[test]
    fn iteration_bound_cuts_off_unfinished_runs() {
        let vectors = chain_vectors();
        let config = ClusterConfig::build().max_iter(2).build();

        let err = calculate(&vectors, labels(&["r02", "r05"]), &config).unwrap_err();
        assert!(matches!(
            err,
            Error::IterationLimitExceeded { iterations: 2 }
        ));
    }

    #[test]
    fn callbacks_observe_every_pass() {
        let vectors = chain_vectors();
        let inits = Cell::new(0usize);
        let passes: RefCell<Vec<(usize, bool)>> = RefCell::new(Vec::new());

        let init_done = |partition: &Partition| {
            assert_eq!(partition.len(), 2);
            inits.set(inits.get() + 1);
        };
        let iteration_done = |_: &Partition, iteration: usize, changed: bool| {
            passes.borrow_mut().push((iteration, changed));
        };
        let config = ClusterConfig::build()
            .init_done(&init_done)
            .iteration_done(&iteration_done)
            .build();

        calculate(&vectors, labels(&["r02", "r05"]), &config).unwrap();
        assert_eq!(inits.get(), 1);
        assert_eq!(
            passes.into_inner(),
            vec![(1, true), (2, true), (3, false)]
        );
    }

    #[test]
    fn rerunning_from_the_fixed_point_changes_nothing() {
        let vectors = chain_vectors();
        let config = ClusterConfig::default();
        let state = calculate(&vectors, labels(&["r02", "r05"]), &config).unwrap();

        let centroids = update_centroids(&vectors, &state.partition, &state.centroids);
        let again = assign(&vectors, &centroids);
        assert_eq!(again, state.partition);
    }

    #[test]
    fn empty_label_set_is_rejected() {
        let vectors = chain_vectors();
        let config = ClusterConfig::default();
        let err = calculate(&vectors, Vec::new(), &config).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { name: "labels", .. }));
    }
}
