use crate::candidate::{nearest_points, number_equal};
use crate::control::ControlType;
use crate::geometry::{Axis, ObjectPoints};
use crate::snap_results::{Helpline, RuleResult, SnapLine};
use crate::snapping::SnapRule;
use glam::DVec2;

/// Aligns the dragged control's edges or reference points to sibling edges/centers.
///
/// Which probes run depends on the control: edge and corner handles probe the edge they
/// manipulate, a pure move probes all four corners plus the middle point, axis by axis,
/// against the union of sibling corner and middle values.
#[derive(Clone, Debug, Default)]
pub struct AlignmentSnapper;

struct AxisWin {
	delta: f64,
	distance: f64,
	/// Winning probe points with the sibling points tied at the minimum distance.
	ties: Vec<(DVec2, Vec<DVec2>)>,
}

/// Reference points with epsilon-equal coordinates along `axis` probe the same scalar, so
/// only the first survives; without this, each coincident corner of an unrotated rectangle
/// would win the same tie and emit its own copy of the guide.
fn distinct_probes(points: &[DVec2], axis: Axis) -> Vec<DVec2> {
	let mut probes: Vec<DVec2> = Vec::new();
	for &point in points {
		if !probes.iter().any(|probe| number_equal(axis.of(*probe), axis.of(point))) {
			probes.push(point);
		}
	}
	probes
}

fn search_axis(others: &[ObjectPoints], probes: &[DVec2], axis: Axis, threshold: f64) -> Option<AxisWin> {
	let mut win: Option<AxisWin> = None;
	for &probe in probes {
		let nearest = nearest_points(others, &[axis.of(probe)], axis);
		if !nearest.is_within(threshold) {
			continue;
		}
		if let Some(current) = &mut win {
			if number_equal(nearest.distance_abs, current.distance) {
				// Equal-magnitude but opposite-sign deltas are mutually exclusive; keep the first
				if number_equal(nearest.distance, current.delta) {
					current.ties.push((probe, nearest.points));
				}
			} else if nearest.distance_abs < current.distance {
				*current = AxisWin {
					delta: nearest.distance,
					distance: nearest.distance_abs,
					ties: vec![(probe, nearest.points)],
				};
			}
		} else {
			win = Some(AxisWin {
				delta: nearest.distance,
				distance: nearest.distance_abs,
				ties: vec![(probe, nearest.points)],
			});
		}
	}
	win
}

/// One polyline through the target's post-snap reference point and every tied sibling point,
/// sorted along the perpendicular axis for clean rendering.
fn alignment_helpline(probe: DVec2, shift: DVec2, points: &[DVec2], axis: Axis) -> Helpline {
	let mut line: Helpline = std::iter::once(probe + shift).chain(points.iter().copied()).collect();
	let perp = axis.perpendicular();
	line.sort_unstable_by(|a, b| perp.of(*a).total_cmp(&perp.of(*b)));
	line
}

impl SnapRule for AlignmentSnapper {
	fn snap(&self, others: &[ObjectPoints], target: &ObjectPoints, threshold: f64, control: ControlType) -> RuleResult {
		let x_probes: Vec<DVec2> = if control.is_move() {
			distinct_probes(&target.all_points(), Axis::X)
		} else if control.touches_left() {
			vec![target.tl]
		} else if control.touches_right() {
			vec![target.tr]
		} else {
			Vec::new()
		};
		let y_probes: Vec<DVec2> = if control.is_move() {
			distinct_probes(&target.all_points(), Axis::Y)
		} else if control.touches_top() {
			vec![target.tl]
		} else if control.touches_bottom() {
			vec![target.bl]
		} else {
			Vec::new()
		};

		let x_win = search_axis(others, &x_probes, Axis::X, threshold);
		let y_win = search_axis(others, &y_probes, Axis::Y, threshold);

		// Guides are built only after both axes are decided: a simultaneous x+y snap shifts
		// the target's reference points on both axes, so the guide for one axis must use the
		// other axis's winning delta instead of going stale
		let shift = DVec2::new(x_win.as_ref().map_or(0., |win| win.delta), y_win.as_ref().map_or(0., |win| win.delta));

		let mut result = RuleResult::default();
		if let Some(win) = x_win {
			let helplines = win.ties.iter().map(|(probe, points)| alignment_helpline(*probe, shift, points, Axis::X)).collect();
			let line = SnapLine::snapped(win.delta, helplines);
			if control.touches_left() {
				// The right edge stays anchored: the position delta is compensated in width
				result.width = SnapLine::snapped_at_distance(-win.delta, win.distance, Vec::new());
				result.left = line;
			} else if control.touches_right() {
				result.width = line;
			} else {
				result.left = line;
			}
		}
		if let Some(win) = y_win {
			let helplines = win.ties.iter().map(|(probe, points)| alignment_helpline(*probe, shift, points, Axis::Y)).collect();
			let line = SnapLine::snapped(win.delta, helplines);
			if control.touches_top() {
				result.height = SnapLine::snapped_at_distance(-win.delta, win.distance, Vec::new());
				result.top = line;
			} else if control.touches_bottom() {
				result.height = line;
			} else {
				result.top = line;
			}
		}
		result
	}
}

#[cfg(test)]
use crate::geometry::{ObjectTransform, object_points};

#[test]
fn snaps_at_threshold_not_beyond() {
	let others = [object_points(&ObjectTransform::from_rect(0., 0., 100., 100.))];

	let target = object_points(&ObjectTransform::from_rect(110., 200., 40., 40.));
	let result = AlignmentSnapper.snap(&others, &target, 10., ControlType::Center);
	assert!(result.left.is_snap);
	assert_eq!(result.left.next, -10.);
	assert!(!result.top.is_snap);

	let target = object_points(&ObjectTransform::from_rect(110.5, 200., 40., 40.));
	let result = AlignmentSnapper.snap(&others, &target, 10., ControlType::Center);
	assert!(!result.left.is_snap);
}

#[test]
fn equidistant_siblings_all_in_helplines() {
	let others = [
		object_points(&ObjectTransform::from_rect(0., 0., 100., 50.)),
		object_points(&ObjectTransform::from_rect(0., 120., 100., 50.)),
		object_points(&ObjectTransform::from_rect(0., 240., 100., 50.)),
	];
	let target = object_points(&ObjectTransform::from_rect(105., 0., 50., 50.));
	let result = AlignmentSnapper.snap(&others, &target, 10., ControlType::Center);
	assert_eq!(result.left.next, -5.);
	assert_eq!(result.left.helplines.len(), 1);
	// target point plus two corners from each of the three siblings
	assert_eq!(result.left.helplines[0].len(), 7);
	let sorted_y: Vec<f64> = result.left.helplines[0].iter().map(|point| point.y).collect();
	assert!(sorted_y.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn coincident_corners_share_one_guide() {
	let others = [object_points(&ObjectTransform::from_rect(0., 0., 100., 100.))];
	let target = object_points(&ObjectTransform::from_rect(105., 0., 50., 50.));
	let result = AlignmentSnapper.snap(&others, &target, 10., ControlType::Center);
	// tl and bl probe the same x on an unrotated target: one guide, not one per corner
	assert_eq!(result.left.next, -5.);
	assert_eq!(result.left.helplines.len(), 1);
	assert!(result.left.helplines[0].iter().all(|point| point.x == 100.));
}

#[test]
fn diagonal_guides_reflect_both_axes() {
	let others = [object_points(&ObjectTransform::from_rect(0., 0., 100., 100.))];
	let target = object_points(&ObjectTransform::from_rect(103., 106., 50., 50.));
	let result = AlignmentSnapper.snap(&others, &target, 10., ControlType::Center);
	assert_eq!(result.left.next, -3.);
	assert_eq!(result.top.next, -6.);
	// the x guide is drawn at the snapped position on both axes
	assert!(result.left.helplines[0].iter().all(|point| point.x == 100.));
	assert!(result.left.helplines[0].contains(&DVec2::new(100., 100.)));
	assert!(result.top.helplines[0].iter().all(|point| point.y == 100.));
}

#[test]
fn top_left_resize_anchors_far_edges() {
	let others = [object_points(&ObjectTransform::from_rect(0., 0., 100., 50.))];
	let target = object_points(&ObjectTransform::from_rect(108., 30., 50., 40.));
	let result = AlignmentSnapper.snap(&others, &target, 10., ControlType::TopLeft);
	assert_eq!(result.left.next, -8.);
	assert_eq!(result.width.next, 8.);
	assert!(result.width.helplines.is_empty());
	assert_eq!(result.top.next, -5.);
	assert_eq!(result.height.next, 5.);
}

#[test]
fn right_resize_probes_only_its_axis() {
	let others = [object_points(&ObjectTransform::from_rect(105., 300., 100., 50.))];
	let target = object_points(&ObjectTransform::from_rect(0., 295., 95., 40.));
	let result = AlignmentSnapper.snap(&others, &target, 10., ControlType::Right);
	assert!(result.width.is_snap);
	assert_eq!(result.width.next, 10.);
	assert!(!result.left.is_snap);
	assert!(!result.top.is_snap && !result.height.is_snap);
}
