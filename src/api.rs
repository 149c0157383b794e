//! File-level entry points of the pipeline, plus the configuration
//! structure shared by all of them.
//!
//! Each operation here takes a path to `entity,region,...` data, reads
//! it, and runs the corresponding slice of the pipeline. Everything is
//! also available as standalone building blocks over in-memory types,
//! see [`PresenceTable`](crate::vectorize::PresenceTable),
//! [`sample_centroids`](crate::sample::sample_centroids),
//! [`assign`](crate::assign::assign) and
//! [`calculate`](crate::lloyd::calculate).

use std::path::Path;

use crate::assign::Partition;
use crate::distance::sparse_squared_euclidean;
use crate::error::{Error, Result};
use crate::lloyd::{self, DEFAULT_MAX_ITER};
use crate::sample;
use crate::universe::RegionUniverse;
use crate::vectorize::PresenceTable;

pub type InitDoneCallbackFn<'a> = &'a dyn Fn(&Partition);
pub type IterationDoneCallbackFn<'a> = &'a dyn Fn(&Partition, usize, bool);

/// Configuration shared by the clustering operations: the region
/// universe, the iteration bound and a couple of callbacks for status
/// information from a running calculation.
///
/// For details on the individual options, have a look at
/// [`ClusterConfigBuilder`].
pub struct ClusterConfig<'a> {
    /// Region universe used for filtering and centroid sampling.
    pub(crate) universe: RegionUniverse,
    /// Upper bound on update passes before a run is aborted.
    pub(crate) max_iter: usize,
    /// Callback invoked once the initial assignment exists.
    /// ## Arguments
    /// - **partition**: the initial [`Partition`], before any update pass
    pub(crate) init_done: InitDoneCallbackFn<'a>,
    /// Callback invoked after each update pass.
    /// ## Arguments
    /// - **partition**: the [`Partition`] produced by the pass
    /// - **iteration**: 1-based number of the pass
    /// - **changed**: whether the partition differs from the previous one
    pub(crate) iteration_done: IterationDoneCallbackFn<'a>,
}

impl Default for ClusterConfig<'_> {
    fn default() -> Self {
        Self {
            universe: RegionUniverse::default(),
            max_iter: DEFAULT_MAX_ITER,
            init_done: &|_| {},
            iteration_done: &|_, _, _| {},
        }
    }
}

impl<'a> ClusterConfig<'a> {
    /// Use the [`ClusterConfigBuilder`] to build a [`ClusterConfig`]
    /// instance.
    pub fn build() -> ClusterConfigBuilder<'a> {
        ClusterConfigBuilder {
            config: ClusterConfig::default(),
        }
    }

    /// The configured region universe.
    pub fn universe(&self) -> &RegionUniverse {
        &self.universe
    }

    /// The configured iteration bound.
    pub fn max_iter(&self) -> usize {
        self.max_iter
    }
}

impl std::fmt::Debug for ClusterConfig<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClusterConfig")
            .field("universe", &self.universe.len())
            .field("max_iter", &self.max_iter)
            .finish_non_exhaustive()
    }
}

pub struct ClusterConfigBuilder<'a> {
    config: ClusterConfig<'a>,
}

impl<'a> ClusterConfigBuilder<'a> {
    /// Set the region universe to filter and sample from.
    /// ## Default
    /// The 68-region dataset universe
    /// ([`ALL_REGIONS`](crate::universe::ALL_REGIONS)).
    pub fn universe(mut self, universe: RegionUniverse) -> Self {
        self.config.universe = universe;
        self
    }

    /// Set the maximum number of update passes before a run is aborted
    /// with [`Error::IterationLimitExceeded`].
    /// ## Default
    /// [`DEFAULT_MAX_ITER`] (300)
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.config.max_iter = max_iter;
        self
    }

    /// Set the callback that should be called once the initial
    /// assignment exists, before the first update pass.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a>) -> Self {
        self.config.init_done = init_done;
        self
    }

    /// Set the callback that should be called after each update pass of
    /// a running calculation.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a>) -> Self {
        self.config.iteration_done = iteration_done;
        self
    }

    /// Return the internally built configuration structure.
    pub fn build(self) -> ClusterConfig<'a> {
        self.config
    }
}

/// Reads presence data from `path` into a raw [`PresenceTable`].
///
/// Every region code that appears in the input is kept, including
/// codes outside any universe; filtering only happens once a table is
/// materialized. Lines with fewer than two comma-separated fields are
/// skipped with a warning.
///
/// ## Example
/// ```no_run
/// use florapart::api;
///
/// let table = api::vectorize("data/plants.data").unwrap();
/// println!("{} regions, {} plants", table.len(), table.entity_order().len());
/// ```
pub fn vectorize(path: impl AsRef<Path>) -> Result<PresenceTable> {
    PresenceTable::from_path(path)
}

/// Computes the squared Euclidean distance between the presence
/// vectors of two regions recorded in the data at `path`.
///
/// This operates on the raw table: both regions only need to occur in
/// the data, universe membership is not required. An absent region is
/// an [`Error::UnknownRegion`].
///
/// ## Example
/// ```no_run
/// use florapart::api;
///
/// let d = api::distance("data/plants.data", "qc", "on").unwrap();
/// println!("squared distance {}", d);
/// ```
pub fn distance(path: impl AsRef<Path>, region_a: &str, region_b: &str) -> Result<f64> {
    let table = PresenceTable::from_path(path)?;
    let a = table.presence(region_a).ok_or_else(|| Error::UnknownRegion {
        code: region_a.to_string(),
    })?;
    let b = table.presence(region_b).ok_or_else(|| Error::UnknownRegion {
        code: region_b.to_string(),
    })?;
    Ok(sparse_squared_euclidean(a, b))
}

/// Samples `k` distinct centroid labels from the configured universe.
///
/// The same `(universe, k, seed)` triple always yields the same labels
/// in the same order; see [`crate::sample`] for the exact contract.
///
/// ## Example
/// ```rust
/// use florapart::api;
/// use florapart::ClusterConfig;
///
/// let config = ClusterConfig::default();
/// let labels = api::sample_centroids(5, 241, &config).unwrap();
/// assert_eq!(labels.len(), 5);
/// assert_eq!(labels, api::sample_centroids(5, 241, &config).unwrap());
/// ```
pub fn sample_centroids(k: usize, seed: u64, config: &ClusterConfig<'_>) -> Result<Vec<String>> {
    sample::sample_centroids(&config.universe, k, seed)
}

/// Runs exactly one assignment pass: seed `k` centroids, assign every
/// universe region of the data to its nearest one, and stop.
///
/// Useful for inspecting where a seeded run starts before any update
/// pass. The returned [`Partition`] has one entry per sampled label,
/// in sampling order, with alphabetically sorted member lists.
///
/// ## Example
/// ```no_run
/// use florapart::api;
/// use florapart::ClusterConfig;
///
/// let partition = api::assign_once("data/plants.data", 10, 241, &ClusterConfig::default()).unwrap();
/// for (label, members) in partition.entries() {
///     println!("{}: {} regions", label, members.len());
/// }
/// ```
pub fn assign_once(
    path: impl AsRef<Path>,
    k: usize,
    seed: u64,
    config: &ClusterConfig<'_>,
) -> Result<Partition> {
    let labels = sample::sample_centroids(&config.universe, k, seed)?;
    let table = PresenceTable::from_path(path)?;
    let vectors = table.materialize(&config.universe);
    let centroids = lloyd::seed_centroids(&vectors, labels);
    Ok(crate::assign::assign(&vectors, &centroids))
}

/// Runs the full pipeline: read, materialize, seed, iterate to the
/// fixed point.
///
/// ## Arguments
/// - **path**: file of `entity,region,region,...` lines
/// - **k**: number of clusters, between 1 and the universe size
/// - **seed**: seed for the centroid draw
/// - **config**: universe, iteration bound and status callbacks
///
/// ## Returns
/// The member lists of the converged partition, in centroid order,
/// with each list alphabetically sorted. Lists may be empty; there are
/// always exactly `k` of them, and together they hold every region of
/// the data that belongs to the universe.
///
/// ## Example
/// ```no_run
/// use florapart::api;
/// use florapart::ClusterConfig;
///
/// let clusters = api::cluster("data/plants.data", 10, 241, &ClusterConfig::default()).unwrap();
/// for (i, members) in clusters.iter().enumerate() {
///     println!("cluster {}: {:?}", i, members);
/// }
/// ```
pub fn cluster(
    path: impl AsRef<Path>,
    k: usize,
    seed: u64,
    config: &ClusterConfig<'_>,
) -> Result<Vec<Vec<String>>> {
    let labels = sample::sample_centroids(&config.universe, k, seed)?;
    let table = PresenceTable::from_path(path)?;
    let vectors = table.materialize(&config.universe);
    let state = lloyd::calculate(&vectors, labels, config)?;
    Ok(state.partition.into_member_lists())
}
