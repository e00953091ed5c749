use bevy::math::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// A planar ellipse spanned by two orthonormal in-plane axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
	pub center: DVec3,
	pub x_axis: DVec3,
	pub y_axis: DVec3,
	/// Half-length along `x_axis` and half-width along `y_axis`.
	pub radii: DVec2,
}

impl Ellipse {
	/// An ellipse lying in the horizontal plane through `center`.
	pub fn horizontal(center: DVec3, radii: DVec2) -> Self {
		Self { center, x_axis: DVec3::X, y_axis: DVec3::Y, radii }
	}

	/// Point at angle `t` (radians) measured from `x_axis`.
	pub fn point_at(&self, t: f64) -> DVec3 {
		self.center
			+ self.x_axis * (self.radii.x * t.cos())
			+ self.y_axis * (self.radii.y * t.sin())
	}
}

/// How a loft blends between its section curves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoftStyle {
	/// Surface passes through every section.
	Normal,
	/// Sections act as control polygons, the surface only approaches them.
	#[default]
	Loose,
	/// Ruled surface between consecutive sections.
	Straight,
}
