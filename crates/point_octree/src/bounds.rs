//! Axis-aligned bounding boxes
//!
//! The cuboid regions the octree partitions. Containment is inclusive on
//! all six faces and intersection counts touching boxes, so the two tests
//! agree about points lying exactly on a boundary plane.

use serde::{Deserialize, Serialize};

use crate::math::{self, Vec3};

/// Axis-aligned bounding box defined by its minimum and maximum corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB from center point and half-extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Create the tight bounding box of a point set, or `None` if it is empty
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let first = *points.first()?;
        let mut min = first;
        let mut max = first;
        for p in &points[1..] {
            min = min.inf(p);
            max = max.sup(p);
        }
        Some(Self { min, max })
    }

    /// Get the center point of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the half-extents of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Get the full size of the AABB along each axis
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Check if a point is inside the AABB (inclusive on all faces)
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Check if this AABB intersects another (touching counts)
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y &&
        self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// Check that both corners have only finite coordinates
    pub fn is_finite(&self) -> bool {
        math::is_finite(&self.min) && math::is_finite(&self.max)
    }

    /// Check that min does not exceed max on any axis
    pub fn is_well_formed(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    /// Split the AABB into 8 equal octants by bisecting each axis
    ///
    /// Octant layout (index bits):
    /// - bit 0: -X / +X half
    /// - bit 1: -Y / +Y half
    /// - bit 2: -Z / +Z half
    ///
    /// Each octant corner is taken directly from the parent's corners and
    /// center, so sibling octants share boundary planes exactly.
    pub fn octants(&self) -> [Aabb; 8] {
        let center = self.center();
        std::array::from_fn(|octant| {
            let x = octant & 1 != 0;
            let y = octant & 2 != 0;
            let z = octant & 4 != 0;
            Aabb {
                min: Vec3::new(
                    if x { center.x } else { self.min.x },
                    if y { center.y } else { self.min.y },
                    if z { center.z } else { self.min.z },
                ),
                max: Vec3::new(
                    if x { self.max.x } else { center.x },
                    if y { self.max.y } else { center.y },
                    if z { self.max.z } else { center.z },
                ),
            }
        })
    }
}
