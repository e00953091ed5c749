//! Capability seams between the tree generator and its CAD host.
//!
//! The generator never calls a concrete kernel or document. It is written against
//! [`GeometryKernel`] and [`DocumentStore`], which a host binding or the headless
//! `mesh-kernel` crate implements.

pub mod attributes;
pub mod error;
pub mod geometry;

pub use attributes::{AttributeSource, Color, GroupId, Handle, MaterialId, MaterialSpec, ObjectAttributes};
pub use error::{DocumentError, GeometryError};
pub use geometry::{Ellipse, LoftStyle};

use bevy::math::DVec3;

/// Curve and solid operations the generator needs from a geometry kernel.
///
/// Every operation takes its inputs by value or reference and returns a new value;
/// the caller exclusively owns whatever it is building until it hands it to a
/// [`DocumentStore`].
pub trait GeometryKernel {
	type Curve: Clone;
	type Solid: Clone;

	/// Smooth curve of the given degree through `points`.
	fn interpolate_curve(&self, points: &[DVec3], degree: usize) -> Result<Self::Curve, GeometryError>;

	/// Closed curve tracing `ellipse`.
	fn ellipse_curve(&self, ellipse: &Ellipse) -> Result<Self::Curve, GeometryError>;

	/// Rotates `curve` by `angle` radians about `axis` through `pivot`.
	fn rotate_curve(
		&self,
		curve: Self::Curve,
		angle: f64,
		axis: DVec3,
		pivot: DVec3,
	) -> Result<Self::Curve, GeometryError>;

	/// Lofts a surface through `curves`. A closed loft wraps the last curve back to the first.
	fn loft(
		&self,
		curves: &[Self::Curve],
		closed: bool,
		style: LoftStyle,
	) -> Result<Vec<Self::Solid>, GeometryError>;

	/// Fills every planar open boundary of `solid`.
	fn cap_planar_holes(&self, solid: Self::Solid, tolerance: f64) -> Result<Self::Solid, GeometryError>;

	/// Point on the surface of `solid` nearest to `point`.
	fn closest_point(&self, solid: &Self::Solid, point: DVec3) -> Result<DVec3, GeometryError>;

	/// Area-weighted centroid of the surface of `solid`.
	fn centroid(&self, solid: &Self::Solid) -> Result<DVec3, GeometryError>;

	fn translate(&self, solid: Self::Solid, offset: DVec3) -> Self::Solid;
}

/// Side-effecting document the generated solids are handed to.
///
/// Not assumed thread-safe: callers serialize every call.
pub trait DocumentStore<S> {
	fn add_material(&mut self, material: MaterialSpec) -> Result<MaterialId, DocumentError>;

	fn add_solid(&mut self, solid: S, attributes: &ObjectAttributes) -> Result<Handle, DocumentError>;

	fn group(&mut self, handles: &[Handle]) -> Result<GroupId, DocumentError>;

	fn redraw(&mut self);
}
