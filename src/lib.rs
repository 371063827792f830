//! Snapping and alignment engine for a 2D object-manipulation canvas.
//!
//! While the user drags or resizes a shape, [`SnapManager`] decides whether the shape's
//! edges, centers, or spacing relative to sibling shapes should snap to alignment guides or
//! equalized paddings, and produces both the corrected geometry and the guide-line segments
//! to render. The engine works in unscaled canvas coordinates, is driven synchronously by
//! pointer-event callbacks, and performs no painting of its own.

pub mod alignment_snapper;
pub mod candidate;
pub mod consts;
pub mod control;
pub mod distribution_snapper;
pub mod geometry;
pub mod snap_results;
pub mod snapping;

pub use alignment_snapper::AlignmentSnapper;
pub use candidate::{NearestMatch, nearest_points, number_equal};
pub use consts::{SNAP_DISTANCE_EPSILON, SNAP_TOLERANCE};
pub use control::ControlType;
pub use distribution_snapper::DistributionSnapper;
pub use geometry::{Axis, ObjectPoints, ObjectTransform, height_from_bbox, object_points, width_from_bbox};
pub use snap_results::{Helpline, RuleResult, SnapLine, merge_snap_lines};
pub use snapping::{AppliedTransform, ObjectId, SnapManager, SnapRule};
