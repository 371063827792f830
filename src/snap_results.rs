use crate::candidate::number_equal;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A guide line to render: an ordered run of canvas-space points. The host projects these to
/// screen space (accounting for pan/zoom) and paints consecutive points as segments; the
/// engine itself never paints.
pub type Helpline = Vec<DVec2>;

/// The candidate outcome for one scalar axis: `next` is the delta to apply, `snap_distance`
/// its magnitude for arbitration, `helplines` the guides to draw if this candidate wins.
/// The default value is the "no snap" sentinel: infinite distance, zero delta, no guides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapLine {
	pub helplines: Vec<Helpline>,
	pub snap_distance: f64,
	pub next: f64,
	pub is_snap: bool,
}

impl Default for SnapLine {
	fn default() -> Self {
		Self { helplines: Vec::new(), snap_distance: f64::INFINITY, next: 0., is_snap: false }
	}
}

impl SnapLine {
	pub fn snapped(next: f64, helplines: Vec<Helpline>) -> Self {
		Self { helplines, snap_distance: next.abs(), next, is_snap: true }
	}

	/// A snap whose arbitration distance differs from the applied delta, e.g. the compensating
	/// size half of an opposite-edge anchor, or a midpoint split.
	pub fn snapped_at_distance(next: f64, snap_distance: f64, helplines: Vec<Helpline>) -> Self {
		Self { helplines, snap_distance, next, is_snap: true }
	}
}

/// The per-axis proposal from one rule invocation. Fields left at the sentinel propose
/// nothing for that degree of freedom.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuleResult {
	pub top: SnapLine,
	pub left: SnapLine,
	pub width: SnapLine,
	pub height: SnapLine,
}

/// Merges the proposals of multiple rules for the same axis: the smallest `snap_distance`
/// wins; proposals tied at that minimum (within epsilon) have their helplines unioned into
/// the winner rather than being dropped. The `next` of the first minimum encountered is kept,
/// so rule order decides ties.
pub fn merge_snap_lines(candidates: impl IntoIterator<Item = SnapLine>) -> SnapLine {
	let mut best = SnapLine::default();
	for candidate in candidates {
		if !candidate.is_snap {
			continue;
		}
		if best.is_snap && number_equal(candidate.snap_distance, best.snap_distance) {
			best.helplines.extend(candidate.helplines);
		} else if candidate.snap_distance < best.snap_distance {
			best = candidate;
		}
	}
	best
}

#[test]
fn merge_smallest_distance_wins() {
	let further = SnapLine::snapped(5., vec![vec![DVec2::ZERO, DVec2::X]]);
	let nearer = SnapLine::snapped(-3., vec![vec![DVec2::ZERO, DVec2::Y]]);
	let merged = merge_snap_lines([further, nearer.clone()]);
	assert_eq!(merged, nearer);
}

#[test]
fn merge_ties_union_helplines() {
	let first = SnapLine::snapped(5., vec![vec![DVec2::ZERO, DVec2::X]]);
	let second = SnapLine::snapped(-5.005, vec![vec![DVec2::ZERO, DVec2::Y]]);
	let merged = merge_snap_lines([first, second]);
	assert_eq!(merged.next, 5.);
	assert_eq!(merged.helplines.len(), 2);
}

#[test]
fn merge_ignores_sentinels() {
	let merged = merge_snap_lines([SnapLine::default(), SnapLine::default()]);
	assert!(!merged.is_snap);
	assert!(merged.helplines.is_empty());
	assert_eq!(merged.next, 0.);
}
