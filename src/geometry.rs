use glam::DVec2;
use serde::{Deserialize, Serialize};

/// The raw transform of a canvas object as the host stores it: intrinsic size plus scale,
/// rotation about the top-left corner (in degrees) and stroke width.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectTransform {
	pub left: f64,
	pub top: f64,
	pub width: f64,
	pub height: f64,
	pub scale_x: f64,
	pub scale_y: f64,
	pub angle: f64,
	pub stroke_width: f64,
}

impl Default for ObjectTransform {
	fn default() -> Self {
		Self {
			left: 0.,
			top: 0.,
			width: 0.,
			height: 0.,
			scale_x: 1.,
			scale_y: 1.,
			angle: 0.,
			stroke_width: 0.,
		}
	}
}

impl ObjectTransform {
	pub fn from_rect(left: f64, top: f64, width: f64, height: f64) -> Self {
		Self { left, top, width, height, ..Default::default() }
	}

	/// Bounding-box width: intrinsic width under scale, plus stroke.
	pub fn bbox_width(&self) -> f64 {
		self.width * self.scale_x + self.stroke_width
	}

	/// Bounding-box height: intrinsic height under scale, plus stroke.
	pub fn bbox_height(&self) -> f64 {
		self.height * self.scale_y + self.stroke_width
	}
}

/// Recovers the intrinsic width that produces the given bounding-box width under the current
/// scale and stroke. Resize snapping reasons in bounding-box space but the object model stores
/// intrinsic size, so every applied width delta goes through this inverse.
pub fn width_from_bbox(bbox_width: f64, scale_x: f64, stroke_width: f64) -> f64 {
	(bbox_width - stroke_width) / scale_x
}

pub fn height_from_bbox(bbox_height: f64, scale_y: f64, stroke_width: f64) -> f64 {
	(bbox_height - stroke_width) / scale_y
}

/// The four projected corners of a (possibly rotated) object plus the derived middle point.
/// This is the unit of comparison for every snapping rule.
///
/// For nonzero rotation no corner ordering is assumed; extents are always computed by
/// min/max over the projected corners.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectPoints {
	pub tl: DVec2,
	pub tr: DVec2,
	pub bl: DVec2,
	pub br: DVec2,
	pub m: DVec2,
}

impl ObjectPoints {
	pub fn new(tl: DVec2, tr: DVec2, bl: DVec2, br: DVec2) -> Self {
		Self { tl, tr, bl, br, m: fixed_middle_point(tl, br) }
	}

	pub fn corners(&self) -> [DVec2; 4] {
		[self.tl, self.tr, self.bl, self.br]
	}

	/// The five reference points a rule may align on: four corners plus the middle.
	pub fn all_points(&self) -> [DVec2; 5] {
		[self.tl, self.tr, self.bl, self.br, self.m]
	}

	/// Min and max of the projected corners along the given axis. NaN corners are skipped by
	/// the IEEE min/max semantics rather than poisoning the extent.
	pub fn extent(&self, axis: Axis) -> (f64, f64) {
		let mut min = f64::INFINITY;
		let mut max = f64::NEG_INFINITY;
		for corner in self.corners() {
			min = min.min(axis.of(corner));
			max = max.max(axis.of(corner));
		}
		(min, max)
	}
}

/// The midpoint of the diagonal from `tl` to `br`.
pub fn fixed_middle_point(tl: DVec2, br: DVec2) -> DVec2 {
	(tl + br) / 2.
}

/// Projects an object's transform into its corner points via standard rotation-matrix
/// projection about the top-left anchor. Pure; zero or negative scale yields a degenerate
/// rectangle which participates in snapping like any other point set.
pub fn object_points(object: &ObjectTransform) -> ObjectPoints {
	let width = object.bbox_width();
	let height = object.bbox_height();
	let (sin, cos) = object.angle.to_radians().sin_cos();

	let tl = DVec2::new(object.left, object.top);
	let tr = tl + DVec2::new(width * cos, width * sin);
	let bl = tl + DVec2::new(-height * sin, height * cos);
	let br = tl + DVec2::new(width * cos - height * sin, width * sin + height * cos);
	ObjectPoints::new(tl, tr, bl, br)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
	X,
	Y,
}

impl Axis {
	pub fn of(self, point: DVec2) -> f64 {
		match self {
			Axis::X => point.x,
			Axis::Y => point.y,
		}
	}

	pub fn perpendicular(self) -> Axis {
		match self {
			Axis::X => Axis::Y,
			Axis::Y => Axis::X,
		}
	}

	/// Builds a point from a coordinate along this axis and one along the perpendicular axis.
	pub fn point(self, main: f64, perp: f64) -> DVec2 {
		match self {
			Axis::X => DVec2::new(main, perp),
			Axis::Y => DVec2::new(perp, main),
		}
	}
}

#[test]
fn project_unrotated() {
	let object = ObjectTransform { width: 40., height: 20., scale_x: 1.5, stroke_width: 2., ..Default::default() };
	let points = object_points(&object);
	assert_eq!(points.tl, DVec2::ZERO);
	assert_eq!(points.tr, DVec2::new(62., 0.));
	assert_eq!(points.bl, DVec2::new(0., 22.));
	assert_eq!(points.br, DVec2::new(62., 22.));
	assert_eq!(points.m, DVec2::new(31., 11.));
}

#[test]
fn project_rotated_quarter_turn() {
	let object = ObjectTransform { width: 10., height: 20., angle: 90., ..Default::default() };
	let points = object_points(&object);
	assert!(points.tr.abs_diff_eq(DVec2::new(0., 10.), 1e-9));
	assert!(points.bl.abs_diff_eq(DVec2::new(-20., 0.), 1e-9));
	assert!(points.br.abs_diff_eq(DVec2::new(-20., 10.), 1e-9));

	let (min, max) = points.extent(Axis::X);
	assert!((min - -20.).abs() < 1e-9);
	assert!(max.abs() < 1e-9);
}

#[test]
fn project_zero_scale() {
	let object = ObjectTransform { width: 100., height: 50., scale_x: 0., scale_y: 0., ..Default::default() };
	let points = object_points(&object);
	assert_eq!(points.tl, points.br);
}

#[test]
fn bbox_round_trip() {
	let object = ObjectTransform { width: 40., height: 30., scale_x: 1.5, scale_y: 2., stroke_width: 2., ..Default::default() };
	assert_eq!(width_from_bbox(object.bbox_width(), object.scale_x, object.stroke_width), 40.);
	assert_eq!(height_from_bbox(object.bbox_height(), object.scale_y, object.stroke_width), 30.);
}
