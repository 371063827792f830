use crate::candidate::number_equal;
use crate::control::ControlType;
use crate::geometry::{Axis, ObjectPoints};
use crate::snap_results::{Helpline, RuleResult, SnapLine};
use crate::snapping::SnapRule;

/// Detects when the gap between the dragged object and a neighbor equals, or can be made to
/// equal, an existing gap between two other siblings on the same row/column, and offers to
/// snap the drag so the gaps become equal (the "distribute evenly" guide).
///
/// Each axis is evaluated independently: siblings are restricted to those whose
/// perpendicular extent overlaps the target's, split into a chain before and a chain after
/// the target, and the adjacent-pair gaps of those chains serve as reference gaps.
#[derive(Clone, Debug, Default)]
pub struct DistributionSnapper;

/// How the active control moves geometry along one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AxisMode {
	/// The whole object shifts; the delta lands on `left`/`top`.
	Move,
	/// The leading edge moves; the delta lands on `left`/`top` with a compensating
	/// size delta anchoring the trailing edge.
	Lead,
	/// The trailing edge moves; the delta lands on `width`/`height`.
	Trail,
}

impl AxisMode {
	fn of(control: ControlType, axis: Axis) -> Option<Self> {
		if control.is_move() {
			return Some(AxisMode::Move);
		}
		let (lead, trail) = match axis {
			Axis::X => (control.touches_left(), control.touches_right()),
			Axis::Y => (control.touches_top(), control.touches_bottom()),
		};
		match (lead, trail) {
			(true, _) => Some(AxisMode::Lead),
			(_, true) => Some(AxisMode::Trail),
			_ => None,
		}
	}
}

/// An object's extent along the snap axis and the perpendicular axis.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Span {
	lead: f64,
	trail: f64,
	perp_lead: f64,
	perp_trail: f64,
}

impl Span {
	fn of(points: &ObjectPoints, axis: Axis) -> Self {
		let (lead, trail) = points.extent(axis);
		let (perp_lead, perp_trail) = points.extent(axis.perpendicular());
		Self { lead, trail, perp_lead, perp_trail }
	}

	/// Only objects plausibly in the same row/column participate.
	fn overlaps_perpendicular(&self, other: Span) -> bool {
		self.perp_lead <= other.perp_trail && other.perp_lead <= self.perp_trail
	}

	/// Perpendicular midpoint of the overlap between the two objects bounding a gap, so the
	/// guide visually sits between the objects it measures.
	fn gap_middle(&self, other: Span) -> f64 {
		(self.perp_lead.max(other.perp_lead) + self.perp_trail.min(other.perp_trail)) / 2.
	}
}

/// One accepted equalization on one axis.
#[derive(Clone, Debug)]
struct AxisSnap {
	position: SnapLine,
	size: SnapLine,
	distance: f64,
}

impl AxisSnap {
	fn new(mode: AxisMode, delta: f64, helplines: Vec<Helpline>) -> Self {
		let distance = delta.abs();
		let (position, size) = match mode {
			AxisMode::Move => (SnapLine::snapped(delta, helplines), SnapLine::default()),
			AxisMode::Lead => (SnapLine::snapped(delta, helplines), SnapLine::snapped_at_distance(-delta, distance, Vec::new())),
			AxisMode::Trail => (SnapLine::default(), SnapLine::snapped(delta, helplines)),
		};
		Self { position, size, distance }
	}

	fn carrier_helplines(&mut self) -> &mut Vec<Helpline> {
		if (self.position.is_snap && !self.position.helplines.is_empty()) || !self.size.is_snap {
			&mut self.position.helplines
		} else {
			&mut self.size.helplines
		}
	}
}

fn gap_segment(axis: Axis, from: f64, to: f64, middle: f64) -> Helpline {
	vec![axis.point(from, middle), axis.point(to, middle)]
}

/// Keeps the smallest-delta candidate, accumulating guide segments of epsilon-tied ones.
fn accumulate(best: &mut Option<AxisSnap>, mut candidate: AxisSnap) {
	if let Some(current) = best {
		if number_equal(candidate.distance, current.distance) {
			current.carrier_helplines().append(candidate.carrier_helplines());
			return;
		}
		if candidate.distance >= current.distance {
			return;
		}
	}
	*best = Some(candidate);
}

impl DistributionSnapper {
	fn snap_axis(others: &[ObjectPoints], target: &ObjectPoints, threshold: f64, control: ControlType, axis: Axis) -> Option<AxisSnap> {
		let mode = AxisMode::of(control, axis)?;
		let target_span = Span::of(target, axis);

		let row = others.iter().map(|points| Span::of(points, axis)).filter(|span| span.overlaps_perpendicular(target_span));
		let mut before: Vec<Span> = Vec::new();
		let mut after: Vec<Span> = Vec::new();
		for span in row {
			if span.trail <= target_span.lead {
				before.push(span);
			} else if span.lead >= target_span.trail {
				after.push(span);
			}
		}
		// both chains run outward from the target
		before.sort_unstable_by(|a, b| b.trail.total_cmp(&a.trail));
		after.sort_unstable_by(|a, b| a.lead.total_cmp(&b.lead));

		// Symmetric case: gaps on both sides whose difference is within 2×threshold equalize
		// around the midpoint; the control decides which edge absorbs the correction
		if let (Some(&prev), Some(&next)) = (before.first(), after.first()) {
			let gap_prev = target_span.lead - prev.trail;
			let gap_next = next.lead - target_span.trail;
			let diff = gap_next - gap_prev;
			if diff.abs() <= 2. * threshold {
				let (delta, lead_delta, trail_delta) = match mode {
					AxisMode::Move => (diff / 2., diff / 2., diff / 2.),
					AxisMode::Lead => (diff, diff, 0.),
					AxisMode::Trail => (diff, 0., diff),
				};
				let helplines = vec![
					gap_segment(axis, prev.trail, target_span.lead + lead_delta, prev.gap_middle(target_span)),
					gap_segment(axis, target_span.trail + trail_delta, next.lead, target_span.gap_middle(next)),
				];
				return Some(AxisSnap::new(mode, delta, helplines));
			}
		}

		// Asymmetric fallback: equalize one side's gap against an existing reference gap
		// further along the same chain; ties all contribute guide segments
		let mut best: Option<AxisSnap> = None;
		if mode != AxisMode::Lead {
			if let Some(&next) = after.first() {
				let gap_next = next.lead - target_span.trail;
				for pair in after.windows(2) {
					let reference = pair[1].lead - pair[0].trail;
					let delta = gap_next - reference;
					if !(delta.abs() <= threshold) {
						continue;
					}
					let trail_delta = delta;
					let helplines = vec![
						gap_segment(axis, target_span.trail + trail_delta, next.lead, target_span.gap_middle(next)),
						gap_segment(axis, pair[0].trail, pair[1].lead, pair[0].gap_middle(pair[1])),
					];
					accumulate(&mut best, AxisSnap::new(mode, delta, helplines));
				}
			}
		}
		if mode != AxisMode::Trail {
			if let Some(&prev) = before.first() {
				let gap_prev = target_span.lead - prev.trail;
				for pair in before.windows(2) {
					let reference = pair[0].lead - pair[1].trail;
					let delta = reference - gap_prev;
					if !(delta.abs() <= threshold) {
						continue;
					}
					let lead_delta = delta;
					let helplines = vec![
						gap_segment(axis, prev.trail, target_span.lead + lead_delta, prev.gap_middle(target_span)),
						gap_segment(axis, pair[1].trail, pair[0].lead, pair[1].gap_middle(pair[0])),
					];
					accumulate(&mut best, AxisSnap::new(mode, delta, helplines));
				}
			}
		}
		best
	}
}

impl SnapRule for DistributionSnapper {
	fn snap(&self, others: &[ObjectPoints], target: &ObjectPoints, threshold: f64, control: ControlType) -> RuleResult {
		let mut result = RuleResult::default();
		if let Some(snap) = Self::snap_axis(others, target, threshold, control, Axis::X) {
			result.left = snap.position;
			result.width = snap.size;
		}
		if let Some(snap) = Self::snap_axis(others, target, threshold, control, Axis::Y) {
			result.top = snap.position;
			result.height = snap.size;
		}
		result
	}
}

#[cfg(test)]
use crate::geometry::{ObjectTransform, object_points};
#[cfg(test)]
use glam::DVec2;

#[cfg(test)]
fn row_points(spans: &[(f64, f64)]) -> Vec<ObjectPoints> {
	spans.iter().map(|&(left, width)| object_points(&ObjectTransform::from_rect(left, 0., width, 100.))).collect()
}

#[test]
fn symmetric_center_splits_the_difference() {
	let others = row_points(&[(0., 100.), (300., 100.)]);
	let target = object_points(&ObjectTransform::from_rect(190., 0., 10., 100.));
	let result = DistributionSnapper.snap(&others, &target, 10., ControlType::Center);
	assert!(result.left.is_snap);
	assert_eq!(result.left.next, 5.);
	assert_eq!(result.left.snap_distance, 5.);
	assert!(!result.width.is_snap);
	assert_eq!(result.left.helplines.len(), 2);
	assert_eq!(result.left.helplines[0], vec![DVec2::new(100., 50.), DVec2::new(195., 50.)]);
	assert_eq!(result.left.helplines[1], vec![DVec2::new(205., 50.), DVec2::new(300., 50.)]);
}

#[test]
fn symmetric_left_resize_anchors_right_edge() {
	let others = row_points(&[(0., 100.), (300., 100.)]);
	let target = object_points(&ObjectTransform::from_rect(190., 0., 10., 100.));
	let result = DistributionSnapper.snap(&others, &target, 10., ControlType::Left);
	assert_eq!(result.left.next, 10.);
	assert_eq!(result.width.next, -10.);
	assert_eq!(result.left.helplines[0][1], DVec2::new(200., 50.));
	assert_eq!(result.left.helplines[1][0], DVec2::new(200., 50.));
}

#[test]
fn symmetric_right_resize_moves_trailing_edge() {
	let others = row_points(&[(0., 100.), (300., 100.)]);
	let target = object_points(&ObjectTransform::from_rect(190., 0., 10., 100.));
	let result = DistributionSnapper.snap(&others, &target, 10., ControlType::Right);
	assert!(!result.left.is_snap);
	assert_eq!(result.width.next, 10.);
	assert_eq!(result.width.helplines.len(), 2);
	assert_eq!(result.width.helplines[1], vec![DVec2::new(210., 50.), DVec2::new(300., 50.)]);
}

#[test]
fn asymmetric_matches_existing_gap() {
	// A-B gap is 50, B-target gap is 53; the drag should equalize to the existing 50
	let others = row_points(&[(0., 100.), (150., 100.)]);
	let target = object_points(&ObjectTransform::from_rect(303., 0., 100., 100.));
	let result = DistributionSnapper.snap(&others, &target, 10., ControlType::Center);
	assert!(result.left.is_snap);
	assert_eq!(result.left.next, -3.);
	assert_eq!(result.left.helplines.len(), 2);
	assert_eq!(result.left.helplines[0], vec![DVec2::new(250., 50.), DVec2::new(300., 50.)]);
	assert_eq!(result.left.helplines[1], vec![DVec2::new(100., 50.), DVec2::new(150., 50.)]);
}

#[test]
fn asymmetric_ties_accumulate_guides() {
	let others = row_points(&[(210., 50.), (310., 50.), (410., 50.)]);
	let target = object_points(&ObjectTransform::from_rect(100., 0., 55., 100.));
	let result = DistributionSnapper.snap(&others, &target, 10., ControlType::Center);
	assert_eq!(result.left.next, 5.);
	// both equal reference gaps contribute their segment pair
	assert_eq!(result.left.helplines.len(), 4);
}

#[test]
fn different_row_is_ignored() {
	let near = object_points(&ObjectTransform::from_rect(0., 0., 100., 100.));
	let far_row = object_points(&ObjectTransform::from_rect(300., 500., 100., 100.));
	let target = object_points(&ObjectTransform::from_rect(190., 0., 10., 100.));
	let result = DistributionSnapper.snap(&[near, far_row], &target, 10., ControlType::Center);
	assert!(!result.left.is_snap);
}

#[test]
fn control_limits_axes() {
	let others = row_points(&[(0., 100.), (300., 100.)]);
	let target = object_points(&ObjectTransform::from_rect(190., 0., 10., 100.));
	let result = DistributionSnapper.snap(&others, &target, 10., ControlType::Top);
	assert!(!result.left.is_snap && !result.width.is_snap);
}
