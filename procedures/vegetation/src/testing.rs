//! Kernels that wrap [`MeshKernel`] to observe or sabotage the generator in tests.

use bevy::math::DVec3;
use kernel::{Ellipse, GeometryError, GeometryKernel, LoftStyle};
use mesh_kernel::{MeshKernel, PolyCurve, TriSolid};
use std::cell::{Cell, RefCell};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoftCall {
	pub sections: usize,
	pub closed: bool,
	pub style: LoftStyle,
}

/// Records every rotation, loft and cap it is asked for.
#[derive(Debug, Default)]
pub struct RecordingKernel {
	inner: MeshKernel,
	lofts: RefCell<Vec<LoftCall>>,
	rotations: RefCell<Vec<f64>>,
	caps: Cell<usize>,
}

impl RecordingKernel {
	pub fn lofts(&self) -> Vec<LoftCall> {
		self.lofts.borrow().clone()
	}

	/// Angles passed to `rotate_curve`, in call order.
	pub fn rotations(&self) -> Vec<f64> {
		self.rotations.borrow().clone()
	}

	pub fn caps(&self) -> usize {
		self.caps.get()
	}
}

impl GeometryKernel for RecordingKernel {
	type Curve = PolyCurve;
	type Solid = TriSolid;

	fn interpolate_curve(&self, points: &[DVec3], degree: usize) -> Result<PolyCurve, GeometryError> {
		self.inner.interpolate_curve(points, degree)
	}

	fn ellipse_curve(&self, ellipse: &Ellipse) -> Result<PolyCurve, GeometryError> {
		self.inner.ellipse_curve(ellipse)
	}

	fn rotate_curve(
		&self,
		curve: PolyCurve,
		angle: f64,
		axis: DVec3,
		pivot: DVec3,
	) -> Result<PolyCurve, GeometryError> {
		self.rotations.borrow_mut().push(angle);
		self.inner.rotate_curve(curve, angle, axis, pivot)
	}

	fn loft(&self, curves: &[PolyCurve], closed: bool, style: LoftStyle) -> Result<Vec<TriSolid>, GeometryError> {
		self.lofts.borrow_mut().push(LoftCall { sections: curves.len(), closed, style });
		self.inner.loft(curves, closed, style)
	}

	fn cap_planar_holes(&self, solid: TriSolid, tolerance: f64) -> Result<TriSolid, GeometryError> {
		self.caps.set(self.caps.get() + 1);
		self.inner.cap_planar_holes(solid, tolerance)
	}

	fn closest_point(&self, solid: &TriSolid, point: DVec3) -> Result<DVec3, GeometryError> {
		self.inner.closest_point(solid, point)
	}

	fn centroid(&self, solid: &TriSolid) -> Result<DVec3, GeometryError> {
		self.inner.centroid(solid)
	}

	fn translate(&self, solid: TriSolid, offset: DVec3) -> TriSolid {
		self.inner.translate(solid, offset)
	}
}

/// Fails the n-th (1-based) capping call as if its end face were warped.
#[derive(Debug)]
pub struct FlakyKernel {
	inner: RecordingKernel,
	fail_on: usize,
}

impl FlakyKernel {
	pub fn failing_cap_on(fail_on: usize) -> Self {
		Self { inner: RecordingKernel::default(), fail_on }
	}
}

impl GeometryKernel for FlakyKernel {
	type Curve = PolyCurve;
	type Solid = TriSolid;

	fn interpolate_curve(&self, points: &[DVec3], degree: usize) -> Result<PolyCurve, GeometryError> {
		self.inner.interpolate_curve(points, degree)
	}

	fn ellipse_curve(&self, ellipse: &Ellipse) -> Result<PolyCurve, GeometryError> {
		self.inner.ellipse_curve(ellipse)
	}

	fn rotate_curve(
		&self,
		curve: PolyCurve,
		angle: f64,
		axis: DVec3,
		pivot: DVec3,
	) -> Result<PolyCurve, GeometryError> {
		self.inner.rotate_curve(curve, angle, axis, pivot)
	}

	fn loft(&self, curves: &[PolyCurve], closed: bool, style: LoftStyle) -> Result<Vec<TriSolid>, GeometryError> {
		self.inner.loft(curves, closed, style)
	}

	fn cap_planar_holes(&self, solid: TriSolid, tolerance: f64) -> Result<TriSolid, GeometryError> {
		let result = self.inner.cap_planar_holes(solid, tolerance);
		if self.inner.caps() == self.fail_on {
			return Err(GeometryError::NonPlanarHole { index: 0, deviation: 1.0, tolerance });
		}
		result
	}

	fn closest_point(&self, solid: &TriSolid, point: DVec3) -> Result<DVec3, GeometryError> {
		self.inner.closest_point(solid, point)
	}

	fn centroid(&self, solid: &TriSolid) -> Result<DVec3, GeometryError> {
		self.inner.centroid(solid)
	}

	fn translate(&self, solid: TriSolid, offset: DVec3) -> TriSolid {
		self.inner.translate(solid, offset)
	}
}
