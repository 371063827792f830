use crate::consts::SNAP_DISTANCE_EPSILON;
use crate::geometry::{Axis, ObjectPoints};
use glam::DVec2;

/// Epsilon comparison used for all snap-distance equality checks.
pub fn number_equal(a: f64, b: f64) -> bool {
	(a - b).abs() <= SNAP_DISTANCE_EPSILON
}

/// The nearest sibling point(s) found along one axis: the signed distance from a probe value
/// to the winning coordinate, and every sibling point tied at that distance.
#[derive(Clone, Debug, PartialEq)]
pub struct NearestMatch {
	/// Signed delta that would move the probe onto the winning sibling coordinate.
	pub distance: f64,
	pub distance_abs: f64,
	pub points: Vec<DVec2>,
}

impl Default for NearestMatch {
	fn default() -> Self {
		Self { distance: 0., distance_abs: f64::INFINITY, points: Vec::new() }
	}
}

impl NearestMatch {
	pub fn is_within(&self, threshold: f64) -> bool {
		// NaN distances must read as out of threshold, never crash or pass
		self.distance_abs <= threshold
	}
}

/// Finds, over every point of every sibling point-set and every probe value, the minimum
/// absolute distance along `axis`. Points tied at the current minimum (same signed delta,
/// within epsilon) accumulate; a strictly smaller distance resets the accumulator. Multiple
/// equally-near siblings must all surface as guides, so ties are never dropped.
pub fn nearest_points(point_sets: &[ObjectPoints], probe_values: &[f64], axis: Axis) -> NearestMatch {
	let mut nearest = NearestMatch::default();
	for points in point_sets {
		for point in points.all_points() {
			for &probe in probe_values {
				let distance = axis.of(point) - probe;
				let distance_abs = distance.abs();
				if nearest.distance_abs.is_finite() && number_equal(distance_abs, nearest.distance_abs) {
					// Opposite-sign ties are mutually exclusive snaps; keep the first
					if number_equal(distance, nearest.distance) {
						nearest.points.push(point);
					}
				} else if distance_abs < nearest.distance_abs {
					nearest = NearestMatch { distance, distance_abs, points: vec![point] };
				}
			}
		}
	}
	nearest
}

#[cfg(test)]
fn square_points(left: f64, top: f64, size: f64) -> ObjectPoints {
	use crate::geometry::{ObjectTransform, object_points};
	object_points(&ObjectTransform::from_rect(left, top, size, size))
}

#[test]
fn nearest_single_winner() {
	let sets = [square_points(0., 0., 100.), square_points(300., 0., 100.)];
	let nearest = nearest_points(&sets, &[108.], Axis::X);
	assert_eq!(nearest.distance, -8.);
	assert_eq!(nearest.distance_abs, 8.);
	// right edge of the first square: tr and br
	assert_eq!(nearest.points.len(), 2);
	assert!(nearest.points.iter().all(|point| point.x == 100.));
}

#[test]
fn nearest_accumulates_ties_across_sets() {
	let sets = [square_points(0., 0., 100.), square_points(0., 200., 100.), square_points(0., 400., 100.)];
	let nearest = nearest_points(&sets, &[95.], Axis::X);
	assert_eq!(nearest.distance, 5.);
	assert_eq!(nearest.points.len(), 6);
}

#[test]
fn nearest_resets_on_strictly_smaller() {
	let sets = [square_points(0., 0., 100.), square_points(104., 0., 100.)];
	let nearest = nearest_points(&sets, &[107.], Axis::X);
	assert_eq!(nearest.distance, -3.);
	assert_eq!(nearest.points.len(), 2);
	assert!(nearest.points.iter().all(|point| point.x == 104.));
}

#[test]
fn nearest_tolerates_nan() {
	use crate::geometry::{ObjectTransform, object_points};
	let broken = object_points(&ObjectTransform::from_rect(f64::NAN, 0., 10., 10.));
	let nearest = nearest_points(&[broken], &[5.], Axis::X);
	assert!(!nearest.is_within(1e9));

	let sets = [broken, square_points(0., 0., 100.)];
	let nearest = nearest_points(&sets, &[95.], Axis::X);
	assert_eq!(nearest.distance, 5.);
}
