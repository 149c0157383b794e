//! # florapart - API documentation
//!
//! florapart is a small library that clusters geographic region codes
//! by the plants recorded in them, using a from-scratch k-means
//! (Lloyd) implementation over categorical presence data.
//!
//! ## Input model
//! The input is a file of `entity,region,region,...` lines, where each
//! line records one plant and the regions it occurs in. Parsing keeps
//! every region code it sees; a fixed [`RegionUniverse`] then decides
//! which regions take part in clustering. Each surviving region
//! becomes a dense 0/1 vector with one coordinate per distinct plant,
//! in alphabetical plant order.
//!
//! ## Determinism
//! Runs are reproducible by construction. The only random step is the
//! seeded draw of initial centroid labels ([`sample`]), distance ties
//! always resolve to the earliest centroid, and the iteration
//! converges on exact partition equality rather than a floating-point
//! threshold. The same input, `k` and seed therefore always produce
//! the same clusters.
//!
//! ## Example
//! ```rust
//! use florapart::{lloyd, sample, ClusterConfig, PresenceTable, RegionUniverse};
//!
//! let data = "\
//! fern,north,south
//! moss,north
//! cactus,south
//! ";
//! let universe = RegionUniverse::new(["north", "south"]);
//! let table = PresenceTable::from_reader(data.as_bytes()).unwrap();
//! let vectors = table.materialize(&universe);
//!
//! let labels = sample::sample_centroids(&universe, 2, 42).unwrap();
//! let config = ClusterConfig::build().universe(universe).build();
//! let state = lloyd::calculate(&vectors, labels, &config).unwrap();
//!
//! assert_eq!(state.partition.len(), 2);
//! assert_eq!(state.iterations, 1);
//! ```
//!
//! ## Example (clustering a file)
//! ```no_run
//! use florapart::api;
//! use florapart::ClusterConfig;
//!
//! let clusters = api::cluster("data/plants.data", 10, 241, &ClusterConfig::default()).unwrap();
//! for members in &clusters {
//!     println!("{}", members.join(","));
//! }
//! ```
//!
//! ## Example (using the status event callbacks)
//! ```rust
//! use florapart::{lloyd, sample, ClusterConfig, PresenceTable, RegionUniverse};
//!
//! let universe = RegionUniverse::new(["north", "south"]);
//! let table = PresenceTable::from_reader("fern,north,south\nmoss,north\n".as_bytes()).unwrap();
//! let vectors = table.materialize(&universe);
//!
//! let labels = sample::sample_centroids(&universe, 2, 7).unwrap();
//! let config = ClusterConfig::build()
//!     .universe(universe)
//!     .init_done(&|partition| println!("{} clusters seeded", partition.len()))
//!     .iteration_done(&|_, iteration, changed|
//!         println!("pass {} ({})", iteration, if changed { "moved" } else { "stable" }))
//!     .build();
//!
//! let state = lloyd::calculate(&vectors, labels, &config).unwrap();
//! println!("converged after {} iterations", state.iterations);
//! ```
//!
//! ## Short API-Overview / Description
//! The file-level operations live in [`api`]: [`api::vectorize`],
//! [`api::distance`], [`api::sample_centroids`], [`api::assign_once`]
//! and [`api::cluster`]. Each reads a data file and runs a slice of
//! the pipeline.
//!
//! Underneath, every stage is an ordinary function over in-memory
//! types, usable on its own: [`PresenceTable`] and [`RegionVectors`]
//! for the data ([`vectorize`]), [`distance`] for the two distance
//! forms, [`sample`] for the seeded label draw, [`assign`] and
//! [`update`] for the two halves of an iteration, and [`lloyd`] for
//! the loop that runs them to a fixed point. [`report`] renders
//! results as CSV.

pub mod api;
pub mod assign;
pub mod distance;
pub mod error;
pub mod lloyd;
pub mod report;
pub mod sample;
pub mod universe;
pub mod update;
pub mod vectorize;

pub use api::{ClusterConfig, ClusterConfigBuilder, InitDoneCallbackFn, IterationDoneCallbackFn};
pub use assign::{Centroid, Partition};
pub use error::{Error, Result};
pub use lloyd::{LloydState, DEFAULT_MAX_ITER};
pub use universe::{RegionUniverse, ALL_REGIONS};
pub use vectorize::{PresenceTable, RegionVectors};
