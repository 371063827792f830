use glam::DVec2;
use snap_guides::{ControlType, ObjectId, ObjectTransform, SnapManager};

fn init() {
	let _ = env_logger::builder().is_test(true).try_init();
}

fn square(left: f64, top: f64, size: f64) -> ObjectTransform {
	ObjectTransform::from_rect(left, top, size, size)
}

#[test]
fn drag_between_two_objects_snaps_to_equal_padding() {
	init();
	let a = square(0., 0., 100.);
	let b = square(300., 0., 100.);
	// a zero-sized object mid-creation participates like any other
	let mut target = ObjectTransform::from_rect(195., 11., 0., 28.);

	let mut manager = SnapManager::default();
	manager.start_drag([(ObjectId(1), &a), (ObjectId(2), &b), (ObjectId(3), &target)], &[ObjectId(3)]);

	let applied = manager.move_object(&mut target);
	assert_eq!(applied.left, 200.);
	assert_eq!(target.left, 200.);
	// one guide segment on each side of the equalized gaps
	assert_eq!(manager.guides().len(), 2);
	assert!(manager.guides().iter().all(|line| line.len() == 2));

	manager.reset();
	assert!(manager.guides().is_empty());
}

#[test]
fn dragging_matches_an_existing_reference_gap() {
	init();
	let a = square(0., 0., 100.);
	let b = square(150., 0., 100.);
	let mut c = square(303., 0., 100.);

	let mut manager = SnapManager::default();
	manager.start_drag([(ObjectId(1), &a), (ObjectId(2), &b), (ObjectId(3), &c)], &[ObjectId(3)]);
	manager.move_object(&mut c);

	// gap(B, C) equalizes to the existing gap(A, B) of 50; A and B are untouched
	assert_eq!(c.left, 300.);
	assert_eq!(c.left - (b.left + 100.), 50.);
	assert_eq!(b.left - (a.left + 100.), 50.);
	assert!(!manager.guides().is_empty());
}

#[test]
fn top_left_resize_keeps_the_far_edges_fixed() {
	init();
	let sibling = ObjectTransform::from_rect(0., 0., 100., 50.);
	let mut target = ObjectTransform::from_rect(108., 30., 50., 40.);

	let mut manager = SnapManager::default();
	manager.start_drag([(ObjectId(1), &sibling)], &[]);
	let applied = manager.resize_object(&mut target, ControlType::TopLeft);

	assert_eq!(applied.left, 100.);
	assert_eq!(applied.width, 58.);
	assert_eq!(applied.top, 25.);
	assert_eq!(applied.height, 45.);
	// the edges not being dragged stay put
	assert_eq!(target.left + target.bbox_width(), 158.);
	assert_eq!(target.top + target.bbox_height(), 70.);
}

#[test]
fn snap_triggers_at_threshold_but_not_beyond() {
	init();
	let sibling = square(0., 0., 100.);
	let mut manager = SnapManager::default();
	manager.start_drag([(ObjectId(1), &sibling)], &[]);

	let mut at_threshold = ObjectTransform::from_rect(110., 200., 40., 40.);
	manager.move_object(&mut at_threshold);
	assert_eq!(at_threshold.left, 100.);

	let mut beyond = ObjectTransform::from_rect(110.5, 200., 40., 40.);
	manager.move_object(&mut beyond);
	assert_eq!(beyond.left, 110.5);
	assert!(manager.guides().is_empty());
}

#[test]
fn aligned_object_stays_put() {
	init();
	let sibling = square(0., 0., 100.);
	let mut target = ObjectTransform::from_rect(100., 0., 50., 100.);

	let mut manager = SnapManager::default();
	manager.start_drag([(ObjectId(1), &sibling)], &[]);

	manager.move_object(&mut target);
	assert_eq!((target.left, target.top), (100., 0.));
	let guides_after_first = manager.guides().len();

	manager.move_object(&mut target);
	assert_eq!((target.left, target.top), (100., 0.));
	assert_eq!(manager.guides().len(), guides_after_first);
}

#[test]
fn rotated_resize_never_snaps() {
	init();
	let sibling = square(0., 0., 100.);
	let mut target = ObjectTransform { angle: 45., ..ObjectTransform::from_rect(105., 0., 50., 50.) };

	let mut manager = SnapManager::default();
	manager.start_drag([(ObjectId(1), &sibling)], &[]);
	let before = target;
	manager.resize_object(&mut target, ControlType::BottomRight);

	assert_eq!(target, before);
	assert!(manager.guides().is_empty());
}

#[test]
fn reference_points_cover_corners_and_middle() {
	let target = square(10., 20., 100.);
	let points = SnapManager::debug_reference_points(&target);
	assert!(points.contains(&DVec2::new(10., 20.)));
	assert!(points.contains(&DVec2::new(110., 120.)));
	assert!(points.contains(&DVec2::new(60., 70.)));
}
