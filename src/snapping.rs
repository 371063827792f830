use crate::alignment_snapper::AlignmentSnapper;
use crate::consts::SNAP_TOLERANCE;
use crate::control::ControlType;
use crate::distribution_snapper::DistributionSnapper;
use crate::geometry::{ObjectPoints, ObjectTransform, height_from_bbox, object_points, width_from_bbox};
use crate::snap_results::{Helpline, RuleResult, SnapLine, merge_snap_lines};
use glam::DVec2;
use log::trace;
use serde::{Deserialize, Serialize};
use std::fmt;

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

/// A snapping rule: a pure function from the frozen sibling snapshot and the target's current
/// point-set to per-axis snap proposals. Rules must treat the snapshot as read-only.
pub trait SnapRule {
	fn snap(&self, others: &[ObjectPoints], target: &ObjectPoints, threshold: f64, control: ControlType) -> RuleResult;
}

/// The attribute set actually applied by a snap pass. Callers that continue a drag relative
/// to the snapped position (e.g. drag-created duplicates) read it back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppliedTransform {
	pub left: f64,
	pub top: f64,
	pub width: f64,
	pub height: f64,
}

impl AppliedTransform {
	fn unchanged(object: &ObjectTransform) -> Self {
		Self { left: object.left, top: object.top, width: object.width, height: object.height }
	}
}

/// Handles snapping and the guide lines it produces. One instance per canvas, constructed at
/// canvas creation and destroyed at teardown; there is no process-wide instance.
///
/// The sibling snapshot is captured once per gesture by [`SnapManager::start_drag`],
/// consulted read-only on every move/resize tick, and discarded by [`SnapManager::destroy`].
pub struct SnapManager {
	points: Vec<ObjectPoints>,
	threshold: f64,
	/// Ordered: the distribution rule runs before alignment so that, at equal distance,
	/// equal-padding guides win the tie.
	rules: Vec<Box<dyn SnapRule>>,
	enabled: bool,
	guides: Vec<Helpline>,
}

impl fmt::Debug for SnapManager {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SnapManager")
			.field("points", &self.points.len())
			.field("threshold", &self.threshold)
			.field("rules", &self.rules.len())
			.field("enabled", &self.enabled)
			.field("guides", &self.guides.len())
			.finish()
	}
}

impl Default for SnapManager {
	fn default() -> Self {
		Self::new(SNAP_TOLERANCE)
	}
}

impl SnapManager {
	pub fn new(threshold: f64) -> Self {
		Self::with_rules(threshold, vec![Box::new(DistributionSnapper), Box::new(AlignmentSnapper)])
	}

	pub fn with_rules(threshold: f64, rules: Vec<Box<dyn SnapRule>>) -> Self {
		Self { points: Vec::new(), threshold, rules, enabled: true, guides: Vec::new() }
	}

	pub fn threshold(&self) -> f64 {
		self.threshold
	}

	pub fn set_threshold(&mut self, threshold: f64) {
		self.threshold = threshold;
	}

	pub fn is_enabled(&self) -> bool {
		self.enabled
	}

	/// Temporarily suppresses snapping, e.g. while a modifier key is held.
	pub fn set_enabled(&mut self, enabled: bool) {
		self.enabled = enabled;
	}

	/// Snapshots sibling geometry at gesture start. `ignore` must contain the dragged object
	/// and, if it is a group, all of its descendants, so an object never snaps to itself.
	/// This should be called at pointer-down, before the first move tick.
	pub fn start_drag<'a>(&mut self, objects: impl IntoIterator<Item = (ObjectId, &'a ObjectTransform)>, ignore: &[ObjectId]) {
		self.points = objects
			.into_iter()
			.filter(|(id, _)| !ignore.contains(id))
			.map(|(_, object)| object_points(object))
			.collect();
		self.guides.clear();
		trace!("snap snapshot captured: {} sibling point sets", self.points.len());
	}

	/// Snaps a plain drag. Mutates `target` in place and returns the applied attributes.
	pub fn move_object(&mut self, target: &mut ObjectTransform) -> AppliedTransform {
		self.snap_object(target, ControlType::Center)
	}

	/// Snaps a resize from the given handle. Resize snapping is undefined under rotation, so
	/// a rotated target skips the pass entirely and keeps its geometry.
	pub fn resize_object(&mut self, target: &mut ObjectTransform, control: ControlType) -> AppliedTransform {
		debug_assert!(!control.is_move(), "resize requires a corner or edge control");
		if target.angle != 0. {
			trace!("skipping resize snap: target rotated by {}", target.angle);
			self.guides.clear();
			return AppliedTransform::unchanged(target);
		}
		self.snap_object(target, control)
	}

	fn snap_object(&mut self, target: &mut ObjectTransform, control: ControlType) -> AppliedTransform {
		if !self.enabled {
			return AppliedTransform::unchanged(target);
		}

		let target_points = object_points(target);
		let results: Vec<RuleResult> = self.rules.iter().map(|rule| rule.snap(&self.points, &target_points, self.threshold, control)).collect();

		let top = merge_snap_lines(results.iter().map(|result| result.top.clone()));
		let left = merge_snap_lines(results.iter().map(|result| result.left.clone()));
		let width = merge_snap_lines(results.iter().map(|result| result.width.clone()));
		let height = merge_snap_lines(results.iter().map(|result| result.height.clone()));

		let mut applied = AppliedTransform::unchanged(target);
		if left.is_snap {
			applied.left = target.left + left.next;
		}
		if top.is_snap {
			applied.top = target.top + top.next;
		}
		// Size deltas are in bounding-box space; convert back to the intrinsic size the
		// object model stores
		if width.is_snap {
			applied.width = width_from_bbox(target.bbox_width() + width.next, target.scale_x, target.stroke_width);
		}
		if height.is_snap {
			applied.height = height_from_bbox(target.bbox_height() + height.next, target.scale_y, target.stroke_width);
		}

		target.left = applied.left;
		target.top = applied.top;
		target.width = applied.width;
		target.height = applied.height;

		self.guides = [top, left, width, height].into_iter().flat_map(|line: SnapLine| line.helplines).collect();
		if !self.guides.is_empty() {
			trace!("snap applied with {} guide lines ({control} control)", self.guides.len());
		}
		applied
	}

	/// The guide lines of the latest snap pass, in canvas space. The host projects them to
	/// screen space and paints them; the engine performs no painting.
	pub fn guides(&self) -> &[Helpline] {
		&self.guides
	}

	/// Clears rendered guide lines. Call at pointer-up or gesture cancel.
	pub fn reset(&mut self) {
		self.guides.clear();
	}

	/// Clears guides and the sibling snapshot. Safe to call multiple times; call at canvas
	/// teardown, and before replacing a canvas's manager with a new instance.
	pub fn destroy(&mut self) {
		self.guides.clear();
		self.points.clear();
	}

	/// Development aid: the five reference points an object contributes to snapping, for
	/// overlay visualization.
	pub fn debug_reference_points(target: &ObjectTransform) -> [DVec2; 5] {
		object_points(target).all_points()
	}
}

#[test]
fn rotated_resize_is_bypassed() {
	let mut manager = SnapManager::default();
	let sibling = ObjectTransform::from_rect(0., 0., 100., 100.);
	manager.start_drag([(ObjectId(1), &sibling)], &[ObjectId(2)]);

	let mut target = ObjectTransform { angle: 45., ..ObjectTransform::from_rect(108., 0., 50., 50.) };
	let before = target;
	let applied = manager.resize_object(&mut target, ControlType::Left);
	assert_eq!(target, before);
	assert_eq!(applied, AppliedTransform::unchanged(&before));
	assert!(manager.guides().is_empty());
}

#[test]
fn disabled_manager_applies_nothing() {
	let mut manager = SnapManager::default();
	let sibling = ObjectTransform::from_rect(0., 0., 100., 100.);
	manager.start_drag([(ObjectId(1), &sibling)], &[]);
	manager.set_enabled(false);

	let mut target = ObjectTransform::from_rect(108., 0., 50., 50.);
	manager.move_object(&mut target);
	assert_eq!(target.left, 108.);
	assert!(manager.guides().is_empty());
}

#[test]
fn snapshot_excludes_ignored_objects() {
	let mut manager = SnapManager::default();
	let target_transform = ObjectTransform::from_rect(108., 0., 50., 50.);
	// the only candidate is the dragged object itself, so nothing can snap
	manager.start_drag([(ObjectId(7), &target_transform)], &[ObjectId(7)]);

	let mut target = target_transform;
	manager.move_object(&mut target);
	assert_eq!(target.left, 108.);
}

#[test]
fn destroy_is_idempotent() {
	let mut manager = SnapManager::default();
	let sibling = ObjectTransform::from_rect(0., 0., 100., 100.);
	manager.start_drag([(ObjectId(1), &sibling)], &[]);
	manager.destroy();
	manager.destroy();
	assert!(manager.guides().is_empty());
}
