use serde::{Deserialize, Serialize};
use std::fmt;

/// Which handle the user is dragging. `Center` is a pure move; the eight corner/edge tags
/// are resize handles. Each tag determines which of `{top, left, width, height}` a rule may
/// mutate and which edge of the target participates in the distance search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlType {
	TopLeft,
	TopRight,
	BottomLeft,
	BottomRight,
	Top,
	Bottom,
	Left,
	Right,
	#[default]
	Center,
}

impl ControlType {
	/// Dragging this control moves the left edge; a left-edge snap carries a compensating
	/// width delta so the right edge stays anchored.
	pub fn touches_left(self) -> bool {
		matches!(self, ControlType::TopLeft | ControlType::Left | ControlType::BottomLeft)
	}

	pub fn touches_right(self) -> bool {
		matches!(self, ControlType::TopRight | ControlType::Right | ControlType::BottomRight)
	}

	pub fn touches_top(self) -> bool {
		matches!(self, ControlType::TopLeft | ControlType::Top | ControlType::TopRight)
	}

	pub fn touches_bottom(self) -> bool {
		matches!(self, ControlType::BottomLeft | ControlType::Bottom | ControlType::BottomRight)
	}

	pub fn is_move(self) -> bool {
		matches!(self, ControlType::Center)
	}
}

impl fmt::Display for ControlType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			ControlType::TopLeft => "Top Left",
			ControlType::TopRight => "Top Right",
			ControlType::BottomLeft => "Bottom Left",
			ControlType::BottomRight => "Bottom Right",
			ControlType::Top => "Top",
			ControlType::Bottom => "Bottom",
			ControlType::Left => "Left",
			ControlType::Right => "Right",
			ControlType::Center => "Center",
		};
		write!(f, "{name}")
	}
}

#[test]
fn corner_controls_touch_both_edges() {
	assert!(ControlType::TopLeft.touches_left() && ControlType::TopLeft.touches_top());
	assert!(ControlType::BottomRight.touches_right() && ControlType::BottomRight.touches_bottom());
	assert!(!ControlType::Top.touches_left() && !ControlType::Top.touches_right());
	assert!(ControlType::Center.is_move());
}
