//! # Point Octree
//!
//! A bounded-region spatial index over 3D points. Positions, each optionally
//! tagged with arbitrary associated data, are stored inside an axis-aligned
//! cuboid region that subdivides into eight equal octants whenever a node
//! becomes crowded. Two query classes are answered by pruning subtrees whose
//! region cannot intersect the query:
//!
//! - **Box query**: all points within an axis-aligned cuboid
//! - **Radius query**: all points within a Euclidean distance of a location
//!
//! Queries are O(log n) for typical spread-out data and O(n) in the worst
//! case (for example, all points coincident). Rendering the partition is out
//! of scope: external collaborators read the tree through [`Octree::region`],
//! [`Octree::children`], and [`Octree::collect_all`].
//!
//! ## Quick Start
//!
//! ```rust
//! use point_octree::prelude::*;
//!
//! let mut tree = Octree::with_size(5.0)?;
//! assert!(tree.insert(Vec3::new(1.0, 2.0, 3.0), Some("beacon")));
//!
//! let nearby = tree.query_radius(Vec3::new(1.0, 2.0, 3.0), 0.5);
//! assert_eq!(nearby.len(), 1);
//! assert_eq!(nearby[0].1, Some(&"beacon"));
//! # Ok::<(), point_octree::OctreeError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod bounds;
pub mod config;
pub mod math;
pub mod octree;

pub use bounds::Aabb;
pub use config::{Config, ConfigError};
pub use math::Vec3;
pub use octree::{Octree, OctreeConfig, OctreeError, OctreePoint};

/// Common imports for crate users
pub mod prelude {
    pub use crate::bounds::Aabb;
    pub use crate::config::{Config, ConfigError};
    pub use crate::math::Vec3;
    pub use crate::octree::{Octree, OctreeConfig, OctreeError, OctreePoint};
}
