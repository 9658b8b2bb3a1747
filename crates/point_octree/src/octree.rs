//! Octree spatial partitioning structure
//!
//! Divides a bounded cuboid region of 3D space into hierarchical octants
//! for fast point queries. Each node holds a small buffer of points and
//! splits into 8 children when an insertion overflows its capacity.
//!
//! Points resident in a node when it splits stay where they are: the split
//! is O(1) with no redistribution pass, at the cost of slightly shallower
//! trees. Later insertions route into the children only.

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bounds::Aabb;
use crate::config::Config;
use crate::math::{self, Vec3};

/// Default number of points a node holds before it splits
pub const DEFAULT_CAPACITY: usize = 4;

/// Default depth limit guarding against unbounded subdivision
pub const DEFAULT_MAX_DEPTH: u32 = 16;

/// Errors raised while constructing an octree
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OctreeError {
    /// Capacity must allow at least one resident point per node
    #[error("capacity must be at least 1")]
    InvalidCapacity,

    /// Region corners contained NaN or infinite coordinates
    #[error("region bounds must be finite")]
    NonFiniteBounds,

    /// Region minimum exceeded its maximum on some axis
    #[error("region min must not exceed max on any axis")]
    InvertedBounds,
}

/// Options controlling octree construction
///
/// The bounding region is resolved from the first applicable option:
/// an explicit `region`, a scalar `size` s (region `[-s, s]` on every axis),
/// explicit `min`/`max` corners (missing corner defaults to the unit cube's),
/// the tight bounding box of a non-empty `points` set, and finally the
/// default unit cube `[-1, 1]` on every axis.
///
/// Every field has a default, so a partial TOML or RON file is a valid
/// option set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OctreeConfig {
    /// Explicit bounding region (highest precedence)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<Aabb>,

    /// Scalar half-extent: region spans `[-size, size]` on every axis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f32>,

    /// Explicit minimum corner, defaults to `(-1, -1, -1)` if only `max` is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<Vec3>,

    /// Explicit maximum corner, defaults to `(1, 1, 1)` if only `min` is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<Vec3>,

    /// Initial points, inserted position-only after the region is fixed;
    /// also used to infer the region when no bounds option is given
    pub points: Vec<Vec3>,

    /// Number of points a node holds before it splits
    pub capacity: usize,

    /// Depth limit; nodes at this depth accept points beyond capacity
    /// instead of splitting
    pub max_depth: u32,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            region: None,
            size: None,
            min: None,
            max: None,
            points: Vec::new(),
            capacity: DEFAULT_CAPACITY,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Config for OctreeConfig {}

/// A point stored in the octree, with optional associated data
#[derive(Debug, Clone, PartialEq)]
pub struct OctreePoint<T> {
    /// Position in 3D space
    pub position: Vec3,

    /// Opaque payload attached by the caller, if any
    pub data: Option<T>,
}

impl<T> OctreePoint<T> {
    /// Create a point with no attached data
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            data: None,
        }
    }

    /// Create a point with attached data
    pub fn with_data(position: Vec3, data: T) -> Self {
        Self {
            position,
            data: Some(data),
        }
    }
}

/// Subdivision state of a node
///
/// A node splits at most once; there is no un-split transition.
#[derive(Debug, Clone)]
enum NodeState<T> {
    /// No children yet
    Leaf,
    /// Eight children partitioning the node's region into equal octants
    Split(Box<[Octree<T>; 8]>),
}

/// Bounded-region octree over 3D points
///
/// A recursive structure: the tree is its own node type. Each node owns a
/// cuboid region, a buffer of points stored directly at its level, and
/// (after one overflow) eight children partitioning the region.
///
/// Range queries skip subtrees whose region cannot intersect the query,
/// which makes them O(log n) for typical spread-out data. The worst case
/// is O(n), for example when all points are coincident.
///
/// Insertion takes `&mut self`, so the borrow checker rules out concurrent
/// mutation; shared queries against a tree that is no longer being inserted
/// into are safe.
#[derive(Debug, Clone)]
pub struct Octree<T = ()> {
    region: Aabb,
    capacity: usize,
    max_depth: u32,
    depth: u32,
    points: Vec<OctreePoint<T>>,
    state: NodeState<T>,
}

impl<T> Default for Octree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Octree<T> {
    /// Create an octree over the default unit cube `[-1, 1]` on every axis
    pub fn new() -> Self {
        Self::node(
            Aabb::new(Vec3::repeat(-1.0), Vec3::repeat(1.0)),
            DEFAULT_CAPACITY,
            DEFAULT_MAX_DEPTH,
            0,
        )
    }

    /// Create an octree over an explicit region
    pub fn with_region(region: Aabb) -> Result<Self, OctreeError> {
        validate_region(&region)?;
        Ok(Self::node(region, DEFAULT_CAPACITY, DEFAULT_MAX_DEPTH, 0))
    }

    /// Create an octree spanning `[-size, size]` on every axis
    pub fn with_size(size: f32) -> Result<Self, OctreeError> {
        Self::with_region(Aabb::from_center_extents(Vec3::zeros(), Vec3::repeat(size)))
    }

    /// Create an octree bounded by the tight box of `points` and insert them
    ///
    /// Falls back to the default unit cube when `points` is empty.
    pub fn from_points(points: &[Vec3]) -> Result<Self, OctreeError> {
        Self::with_config(OctreeConfig {
            points: points.to_vec(),
            ..OctreeConfig::default()
        })
    }

    /// Create an octree from a full option set
    ///
    /// Resolves the region by the precedence documented on [`OctreeConfig`],
    /// validates it along with the capacity, then inserts any initial points
    /// position-only.
    pub fn with_config(config: OctreeConfig) -> Result<Self, OctreeError> {
        if config.capacity == 0 {
            return Err(OctreeError::InvalidCapacity);
        }

        let region = if let Some(region) = config.region {
            region
        } else if let Some(size) = config.size {
            Aabb::from_center_extents(Vec3::zeros(), Vec3::repeat(size))
        } else if config.min.is_some() || config.max.is_some() {
            Aabb::new(
                config.min.unwrap_or_else(|| Vec3::repeat(-1.0)),
                config.max.unwrap_or_else(|| Vec3::repeat(1.0)),
            )
        } else if let Some(bounds) = Aabb::from_points(&config.points) {
            bounds
        } else {
            // No bounds option and no points: default unit cube
            Aabb::new(Vec3::repeat(-1.0), Vec3::repeat(1.0))
        };
        validate_region(&region)?;

        let mut tree = Self::node(region, config.capacity, config.max_depth, 0);
        for &position in &config.points {
            tree.insert(position, None);
        }
        Ok(tree)
    }

    fn node(region: Aabb, capacity: usize, max_depth: u32, depth: u32) -> Self {
        Self {
            region,
            capacity,
            max_depth,
            depth,
            points: Vec::new(),
            state: NodeState::Leaf,
        }
    }

    /// Get the region this node covers
    ///
    /// External collaborators (wireframe or point-cloud rendering) read the
    /// partition through this accessor and [`Octree::children`]; the core
    /// performs no drawing itself.
    pub fn region(&self) -> Aabb {
        self.region
    }

    /// Get the split threshold shared by every node in this tree
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get this node's depth (0 at the root)
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Check if this node has no children
    pub fn is_leaf(&self) -> bool {
        matches!(self.state, NodeState::Leaf)
    }

    /// Get the eight children, if this node has split
    pub fn children(&self) -> Option<&[Octree<T>; 8]> {
        match &self.state {
            NodeState::Leaf => None,
            NodeState::Split(children) => Some(children),
        }
    }

    /// Get the points resident at this node's own level
    pub fn points(&self) -> &[OctreePoint<T>] {
        &self.points
    }

    /// Count every point stored in this subtree
    pub fn len(&self) -> usize {
        let mut count = self.points.len();
        if let NodeState::Split(children) = &self.state {
            count += children.iter().map(Self::len).sum::<usize>();
        }
        count
    }

    /// Check if this subtree stores no points
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert a point with optional data
    ///
    /// Returns `true` iff the point was stored somewhere in this subtree.
    /// A position outside the region, or with a NaN or infinite coordinate,
    /// is rejected with `false` and no mutation.
    pub fn insert(&mut self, position: Vec3, data: Option<T>) -> bool {
        self.insert_point(OctreePoint { position, data })
    }

    /// Insert a point given as separate coordinates
    pub fn insert_at(&mut self, x: f32, y: f32, z: f32, data: Option<T>) -> bool {
        self.insert_point(OctreePoint {
            position: Vec3::new(x, y, z),
            data,
        })
    }

    /// Insert a point with its data already attached
    ///
    /// While this node is a leaf with spare capacity the point is appended
    /// to its own buffer. The insertion that overflows the capacity splits
    /// the node (once, ever) and from then on points route into children;
    /// resident points are never migrated down. Nodes at the depth limit
    /// accept points beyond capacity instead of splitting, so pathological
    /// input such as many coincident points cannot recurse unboundedly.
    pub fn insert_point(&mut self, point: OctreePoint<T>) -> bool {
        if !math::is_finite(&point.position) {
            debug!(
                "rejecting insertion of non-finite position {:?}",
                point.position
            );
            return false;
        }
        if !self.region.contains_point(point.position) {
            return false;
        }

        if self.is_leaf() {
            if self.points.len() < self.capacity {
                self.points.push(point);
                return true;
            }
            if self.depth >= self.max_depth {
                debug!(
                    "depth limit {} reached, storing point beyond capacity",
                    self.max_depth
                );
                self.points.push(point);
                return true;
            }
            self.subdivide();
        }
        self.insert_into_child(point)
    }

    /// Split this node into 8 equal octants
    ///
    /// A no-op if already split.
    fn subdivide(&mut self) {
        if !self.is_leaf() {
            return;
        }
        trace!("subdividing {:?} at depth {}", self.region, self.depth);
        let children = self
            .region
            .octants()
            .map(|octant| Self::node(octant, self.capacity, self.max_depth, self.depth + 1));
        self.state = NodeState::Split(Box::new(children));
    }

    /// Route a point into the child octant it belongs to
    ///
    /// Octant selection is half-open: a coordinate on the center plane goes
    /// to the upper half. Every point gets exactly one home child, so a
    /// position on a shared boundary plane is stored once, not duplicated.
    fn insert_into_child(&mut self, point: OctreePoint<T>) -> bool {
        let center = self.region.center();
        let x_bit = usize::from(point.position.x >= center.x);
        let y_bit = usize::from(point.position.y >= center.y);
        let z_bit = usize::from(point.position.z >= center.z);
        let octant = (z_bit << 2) | (y_bit << 1) | x_bit;

        let NodeState::Split(children) = &mut self.state else {
            return false;
        };
        children[octant].insert_point(point)
    }

    /// Get every stored point whose position lies within `probe` (inclusive)
    ///
    /// Results are deterministic pre-order: this node's own points first,
    /// then children in octant order 0..7. Subtrees whose region does not
    /// intersect the probe box are skipped entirely.
    pub fn query_box(&self, probe: &Aabb) -> Vec<(Vec3, Option<&T>)> {
        let mut found = Vec::new();
        self.query_box_into(probe, &mut found);
        found
    }

    fn query_box_into<'a>(&'a self, probe: &Aabb, found: &mut Vec<(Vec3, Option<&'a T>)>) {
        if !self.region.intersects(probe) {
            return;
        }
        for point in &self.points {
            if probe.contains_point(point.position) {
                found.push((point.position, point.data.as_ref()));
            }
        }
        if let NodeState::Split(children) = &self.state {
            for child in children.iter() {
                child.query_box_into(probe, found);
            }
        }
    }

    /// Get every stored point within Euclidean distance `max_distance` of `center`
    ///
    /// Runs in two phases: a box query over the cuboid of half-extent
    /// `max_distance` around the center gathers a cheap tree-pruned superset,
    /// then an exact distance filter discards the box corners. Non-finite
    /// inputs yield an empty result.
    pub fn query_radius(&self, center: Vec3, max_distance: f32) -> Vec<(Vec3, Option<&T>)> {
        if !math::is_finite(&center) || !max_distance.is_finite() {
            return Vec::new();
        }
        let probe = Aabb::from_center_extents(center, Vec3::repeat(max_distance));
        let mut found = self.query_box(&probe);
        let limit_sq = max_distance * max_distance;
        found.retain(|(position, _)| (position - center).magnitude_squared() <= limit_sq);
        found
    }

    /// Check that no stored point lies within `max_distance` of `center`
    ///
    /// Equivalent to `query_radius(center, max_distance).is_empty()` but
    /// exits on the first point found, which is what minimum-separation
    /// placement loops (Poisson-disc sampling) want.
    ///
    /// A negative radius matches nothing, so the probe reports empty.
    pub fn is_region_empty(&self, center: Vec3, max_distance: f32) -> bool {
        // Squared-distance tests below would erase the sign of a negative
        // radius; bail out before it can match anything
        if !math::is_finite(&center) || !max_distance.is_finite() || max_distance < 0.0 {
            return true;
        }
        let probe = Aabb::from_center_extents(center, Vec3::repeat(max_distance));
        !self.any_within(&probe, center, max_distance * max_distance)
    }

    fn any_within(&self, probe: &Aabb, center: Vec3, limit_sq: f32) -> bool {
        if !self.region.intersects(probe) {
            return false;
        }
        if self
            .points
            .iter()
            .any(|p| (p.position - center).magnitude_squared() <= limit_sq)
        {
            return true;
        }
        match &self.state {
            NodeState::Leaf => false,
            NodeState::Split(children) => {
                children.iter().any(|c| c.any_within(probe, center, limit_sq))
            }
        }
    }

    /// Get every stored point in this subtree
    ///
    /// Same deterministic pre-order as [`Octree::query_box`], across any
    /// number of subdivision levels.
    pub fn collect_all(&self) -> Vec<(Vec3, Option<&T>)> {
        let mut found = Vec::new();
        self.collect_into(&mut found);
        found
    }

    fn collect_into<'a>(&'a self, found: &mut Vec<(Vec3, Option<&'a T>)>) {
        for point in &self.points {
            found.push((point.position, point.data.as_ref()));
        }
        if let NodeState::Split(children) = &self.state {
            for child in children.iter() {
                child.collect_into(found);
            }
        }
    }
}

fn validate_region(region: &Aabb) -> Result<(), OctreeError> {
    if !region.is_finite() {
        return Err(OctreeError::NonFiniteBounds);
    }
    if !region.is_well_formed() {
        return Err(OctreeError::InvertedBounds);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_tree() -> Octree<&'static str> {
        Octree::new()
    }

    fn deepest_level<T>(tree: &Octree<T>) -> u32 {
        match tree.children() {
            None => tree.depth(),
            Some(children) => children.iter().map(deepest_level).max().unwrap_or(0),
        }
    }

    #[test]
    fn test_default_region_is_unit_cube() {
        let mut tree = unit_tree();
        assert_eq!(tree.region().min, Vec3::repeat(-1.0));
        assert_eq!(tree.region().max, Vec3::repeat(1.0));

        // Region faces are inclusive
        assert!(tree.insert(Vec3::repeat(1.0), None));
        assert!(tree.insert(Vec3::repeat(-1.0), None));
        assert!(!tree.insert(Vec3::new(1.1, 0.0, 0.0), None));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_config_precedence_region_wins() {
        let config = OctreeConfig {
            region: Some(Aabb::new(Vec3::zeros(), Vec3::repeat(4.0))),
            size: Some(100.0),
            min: Some(Vec3::repeat(-50.0)),
            ..OctreeConfig::default()
        };
        let tree: Octree = Octree::with_config(config).unwrap();
        assert_eq!(tree.region().min, Vec3::zeros());
        assert_eq!(tree.region().max, Vec3::repeat(4.0));
    }

    #[test]
    fn test_config_precedence_size_over_corners() {
        let config = OctreeConfig {
            size: Some(5.0),
            min: Some(Vec3::repeat(-50.0)),
            ..OctreeConfig::default()
        };
        let tree: Octree = Octree::with_config(config).unwrap();
        assert_eq!(tree.region().min, Vec3::repeat(-5.0));
        assert_eq!(tree.region().max, Vec3::repeat(5.0));
    }

    #[test]
    fn test_config_partial_corners_default() {
        let config = OctreeConfig {
            min: Some(Vec3::repeat(-3.0)),
            ..OctreeConfig::default()
        };
        let tree: Octree = Octree::with_config(config).unwrap();
        assert_eq!(tree.region().min, Vec3::repeat(-3.0));
        assert_eq!(tree.region().max, Vec3::repeat(1.0));
    }

    #[test]
    fn test_region_inferred_from_points() {
        // Componentwise min/max of the inputs, degenerate in z
        let points = [
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(-2.0, 0.0, 0.0),
            Vec3::new(0.0, 3.0, 0.0),
        ];
        let tree: Octree = Octree::from_points(&points).unwrap();

        assert_eq!(tree.region().min, Vec3::new(-2.0, 0.0, 0.0));
        assert_eq!(tree.region().max, Vec3::new(2.0, 3.0, 0.0));
        // The initial points were inserted position-only
        assert_eq!(tree.len(), 3);
        assert!(tree.collect_all().iter().all(|(_, data)| data.is_none()));
    }

    #[test]
    fn test_empty_points_fall_back_to_unit_cube() {
        let tree: Octree = Octree::from_points(&[]).unwrap();
        assert_eq!(tree.region().min, Vec3::repeat(-1.0));
        assert_eq!(tree.region().max, Vec3::repeat(1.0));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = OctreeConfig {
            capacity: 0,
            ..OctreeConfig::default()
        };
        assert_eq!(
            Octree::<()>::with_config(config).unwrap_err(),
            OctreeError::InvalidCapacity
        );
    }

    #[test]
    fn test_malformed_region_rejected() {
        let inverted = Aabb::new(Vec3::repeat(1.0), Vec3::repeat(-1.0));
        assert_eq!(
            Octree::<()>::with_region(inverted).unwrap_err(),
            OctreeError::InvertedBounds
        );

        let non_finite = Aabb::new(Vec3::repeat(-1.0), Vec3::new(f32::NAN, 1.0, 1.0));
        assert_eq!(
            Octree::<()>::with_region(non_finite).unwrap_err(),
            OctreeError::NonFiniteBounds
        );
    }

    #[test]
    fn test_non_finite_insertion_rejected() {
        let mut tree = unit_tree();
        assert!(!tree.insert(Vec3::new(f32::NAN, 0.0, 0.0), None));
        assert!(!tree.insert_at(0.0, f32::INFINITY, 0.0, None));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_capacity_trigger_subdivides_once() {
        let mut tree = unit_tree();
        let collinear = [0.0, 0.1, 0.2, 0.3, 0.4];

        for (i, &x) in collinear.iter().enumerate() {
            assert!(tree.insert(Vec3::new(x, 0.0, 0.0), None));
            if i < DEFAULT_CAPACITY {
                assert!(tree.is_leaf());
            }
        }

        // The fifth insertion overflowed the root and split it
        assert!(tree.children().is_some());
        // Resident points stay put, the overflow point routed down
        assert_eq!(tree.points().len(), 4);
        assert_eq!(tree.len(), 5);

        // Later overflow routes into the existing children without
        // touching the root's own buffer again
        for i in 0..20 {
            assert!(tree.insert(Vec3::new(-0.9 + 0.05 * i as f32, 0.5, 0.5), None));
        }
        assert_eq!(tree.points().len(), 4);
        assert_eq!(tree.len(), 25);
    }

    #[test]
    fn test_five_collinear_points_scenario() {
        let mut tree = unit_tree();
        for &x in &[0.0, 0.1, 0.2, 0.3, 0.4] {
            assert!(tree.insert(Vec3::new(x, 0.0, 0.0), None));
        }

        assert_eq!(tree.collect_all().len(), 5);

        let near_origin = tree.query_radius(Vec3::zeros(), 0.05);
        assert_eq!(near_origin.len(), 1);
        assert_relative_eq!(near_origin[0].0.x, 0.0);

        let whole = tree.query_box(&tree.region());
        assert_eq!(whole.len(), 5);
    }

    #[test]
    fn test_query_results_are_pre_order() {
        let mut tree = unit_tree();
        let xs = [0.0, 0.1, 0.2, 0.3, 0.4];
        for &x in &xs {
            tree.insert(Vec3::new(x, 0.0, 0.0), None);
        }

        // Root's own points come first in insertion order, then the
        // overflow point found inside a child
        let found = tree.query_box(&tree.region());
        let found_xs: Vec<f32> = found.iter().map(|(p, _)| p.x).collect();
        assert_eq!(found_xs, xs);
        assert_eq!(tree.collect_all().len(), found.len());
    }

    #[test]
    fn test_disjoint_box_queries_return_empty() {
        let mut tree = unit_tree();
        tree.insert(Vec3::new(0.5, 0.5, 0.5), None);
        tree.insert(Vec3::new(0.6, 0.5, 0.5), None);

        let b1 = Aabb::new(Vec3::repeat(-1.0), Vec3::repeat(-0.5));
        let b2 = Aabb::new(Vec3::new(-0.4, -1.0, -1.0), Vec3::new(-0.1, 1.0, 1.0));
        assert!(tree.query_box(&b1).is_empty());
        assert!(tree.query_box(&b2).is_empty());
    }

    #[test]
    fn test_radius_query_exact_distance_gate() {
        let mut tree = Octree::<()>::with_size(2.0).unwrap();
        // Inside the probe box but outside the sphere
        tree.insert(Vec3::new(0.9, 0.9, 0.9), None);
        // Exactly on the sphere surface
        tree.insert(Vec3::new(1.0, 0.0, 0.0), None);

        let found = tree.query_radius(Vec3::zeros(), 1.0);
        assert_eq!(found.len(), 1);
        assert_relative_eq!(found[0].0.x, 1.0);

        // Zero radius returns the point itself
        let exact = tree.query_radius(Vec3::new(1.0, 0.0, 0.0), 0.0);
        assert_eq!(exact.len(), 1);
    }

    #[test]
    fn test_box_radius_consistency() {
        let mut tree = unit_tree();
        let points = [
            Vec3::new(0.1, 0.2, -0.3),
            Vec3::new(-0.7, 0.4, 0.9),
            Vec3::new(0.5, -0.5, 0.5),
            Vec3::new(-0.2, -0.9, 0.0),
            Vec3::new(0.8, 0.8, -0.8),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(-0.4, 0.6, 0.1),
        ];
        for &p in &points {
            assert!(tree.insert(p, None));
        }

        for &(center, radius) in &[
            (Vec3::zeros(), 0.5),
            (Vec3::new(0.5, 0.5, 0.5), 1.0),
            (Vec3::new(-0.5, -0.5, 0.0), 0.75),
        ] {
            let probe = Aabb::from_center_extents(center, Vec3::repeat(radius));
            let by_radius = tree.query_radius(center, radius);
            let by_box = tree.query_box(&probe);
            for (position, _) in &by_radius {
                // Every radius result is in the box superset and within range
                assert!(by_box.iter().any(|(p, _)| p == position));
                assert!((position - center).magnitude() <= radius);
            }
            assert!(by_radius.len() <= by_box.len());
        }
    }

    #[test]
    fn test_negative_radius_matches_nothing() {
        let mut tree = unit_tree();
        tree.insert(Vec3::new(0.3, 0.0, 0.0), None);

        // A negative radius can never be satisfied by any distance; the
        // probe and the radius query must agree on that
        assert!(tree.query_radius(Vec3::zeros(), -0.5).is_empty());
        assert!(tree.is_region_empty(Vec3::zeros(), -0.5));
        assert_eq!(
            tree.is_region_empty(Vec3::zeros(), -0.5),
            tree.query_radius(Vec3::zeros(), -0.5).is_empty()
        );
    }

    #[test]
    fn test_is_region_empty_matches_radius_query() {
        let mut tree = unit_tree();
        assert!(tree.is_region_empty(Vec3::zeros(), 10.0));

        tree.insert(Vec3::new(0.5, 0.0, 0.0), None);
        tree.insert(Vec3::new(-0.5, 0.5, 0.5), None);

        for &(center, radius) in &[
            (Vec3::zeros(), 0.4),
            (Vec3::zeros(), 0.5),
            (Vec3::new(0.5, 0.0, 0.0), 0.0),
            (Vec3::new(-1.0, -1.0, -1.0), 0.25),
        ] {
            assert_eq!(
                tree.is_region_empty(center, radius),
                tree.query_radius(center, radius).is_empty()
            );
        }
    }

    #[test]
    fn test_collect_all_traverses_every_level() {
        let config = OctreeConfig {
            capacity: 1,
            ..OctreeConfig::default()
        };
        let mut tree: Octree = Octree::with_config(config).unwrap();

        let mut inserted = 0;
        for i in 0..20 {
            let c = -0.9 + 0.09 * i as f32;
            assert!(tree.insert(Vec3::new(c, c, c), None));
            inserted += 1;
        }

        assert_eq!(tree.collect_all().len(), inserted);
        assert_eq!(tree.len(), inserted);
        // Capacity 1 on a diagonal forces several levels of subdivision
        assert!(deepest_level(&tree) >= 2);
    }

    #[test]
    fn test_boundary_point_stored_once() {
        let config = OctreeConfig {
            capacity: 1,
            ..OctreeConfig::default()
        };
        let mut tree: Octree = Octree::with_config(config).unwrap();

        assert!(tree.insert(Vec3::new(0.5, 0.5, 0.5), None));
        // Overflow point sits exactly on all three center planes; half-open
        // octant selection sends it to the upper child only
        assert!(tree.insert(Vec3::zeros(), None));

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.query_radius(Vec3::zeros(), 0.0).len(), 1);
        assert_eq!(tree.collect_all().len(), 2);
    }

    #[test]
    fn test_depth_limit_stops_subdivision() {
        let config = OctreeConfig {
            capacity: 1,
            max_depth: 4,
            ..OctreeConfig::default()
        };
        let mut tree: Octree = Octree::with_config(config).unwrap();

        // Coincident points would otherwise subdivide forever
        for _ in 0..20 {
            assert!(tree.insert(Vec3::new(0.3, 0.3, 0.3), None));
        }

        assert_eq!(tree.len(), 20);
        assert!(deepest_level(&tree) <= 4);
    }

    #[test]
    fn test_data_payloads_survive_queries() {
        let mut tree = unit_tree();
        assert!(tree.insert(Vec3::new(0.1, 0.0, 0.0), Some("beacon")));
        assert!(tree.insert_at(0.2, 0.0, 0.0, Some("buoy")));
        assert!(tree.insert_point(OctreePoint::with_data(Vec3::new(0.3, 0.0, 0.0), "mast")));
        assert!(tree.insert_point(OctreePoint::new(Vec3::new(0.4, 0.0, 0.0))));

        let found = tree.query_radius(Vec3::new(0.1, 0.0, 0.0), 0.001);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].1, Some(&"beacon"));

        let all = tree.collect_all();
        let tags: Vec<Option<&&str>> = all.iter().map(|(_, data)| *data).collect();
        assert_eq!(
            tags,
            vec![Some(&"beacon"), Some(&"buoy"), Some(&"mast"), None]
        );
    }

    #[test]
    fn test_structure_accessors_for_visualization() {
        let mut tree = Octree::<()>::with_size(8.0).unwrap();
        for i in 0..5 {
            tree.insert(Vec3::new(-7.0 + 3.0 * i as f32, 2.0, -2.0), None);
        }

        let children = tree.children().expect("root should have split");
        for child in children.iter() {
            assert_eq!(child.depth(), 1);
            assert_eq!(child.capacity(), tree.capacity());
            // Child regions stay within the parent region
            assert!(tree.region().contains_point(child.region().min));
            assert!(tree.region().contains_point(child.region().max));
            assert_eq!(child.region().size(), Vec3::repeat(8.0));
        }
        assert_eq!(tree.points().len(), tree.capacity());
    }
}
