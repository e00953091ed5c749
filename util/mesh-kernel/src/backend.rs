use crate::{
	cap,
	curve::PolyCurve,
	loft::{self, LoftResolution},
	measure,
	solid::TriSolid,
};
use bevy::math::DVec3;
use kernel::{Ellipse, GeometryError, GeometryKernel, LoftStyle};

/// Tessellation density of the [`MeshKernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshKernelConfig {
	/// Points each curve is resampled to before lofting.
	pub curve_samples: usize,
	/// Points used to trace an ellipse.
	pub ellipse_segments: usize,
	/// Points generated per span when interpolating control points.
	pub interpolation_steps: usize,
	/// Rows generated between two loft sections.
	pub loft_span_steps: usize,
}

impl Default for MeshKernelConfig {
	fn default() -> Self {
		Self { curve_samples: 24, ellipse_segments: 24, interpolation_steps: 8, loft_span_steps: 4 }
	}
}

/// Headless [`GeometryKernel`] over triangle meshes.
#[derive(Debug, Clone, Default)]
pub struct MeshKernel {
	config: MeshKernelConfig,
}

impl MeshKernel {
	pub fn new(config: MeshKernelConfig) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &MeshKernelConfig {
		&self.config
	}
}

impl GeometryKernel for MeshKernel {
	type Curve = PolyCurve;
	type Solid = TriSolid;

	fn interpolate_curve(&self, points: &[DVec3], degree: usize) -> Result<PolyCurve, GeometryError> {
		PolyCurve::interpolate(points, degree, self.config.interpolation_steps)
	}

	fn ellipse_curve(&self, ellipse: &Ellipse) -> Result<PolyCurve, GeometryError> {
		PolyCurve::from_ellipse(ellipse, self.config.ellipse_segments)
	}

	fn rotate_curve(
		&self,
		curve: PolyCurve,
		angle: f64,
		axis: DVec3,
		pivot: DVec3,
	) -> Result<PolyCurve, GeometryError> {
		curve.rotate(angle, axis, pivot)
	}

	fn loft(
		&self,
		curves: &[PolyCurve],
		closed: bool,
		style: LoftStyle,
	) -> Result<Vec<TriSolid>, GeometryError> {
		let resolution = LoftResolution {
			samples: self.config.curve_samples,
			span_steps: self.config.loft_span_steps,
		};
		Ok(vec![loft::loft(curves, closed, style, resolution)?])
	}

	fn cap_planar_holes(&self, solid: TriSolid, tolerance: f64) -> Result<TriSolid, GeometryError> {
		cap::cap_planar_holes(solid, tolerance)
	}

	fn closest_point(&self, solid: &TriSolid, point: DVec3) -> Result<DVec3, GeometryError> {
		measure::closest_point_on_solid(solid, point).ok_or(GeometryError::EmptySolid)
	}

	fn centroid(&self, solid: &TriSolid) -> Result<DVec3, GeometryError> {
		measure::area_centroid(solid).ok_or(GeometryError::EmptySolid)
	}

	fn translate(&self, solid: TriSolid, offset: DVec3) -> TriSolid {
		solid.translate(offset)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use bevy::math::DVec2;

	#[test]
	fn test_capped_cylinder_round_trip() {
		let kernel = MeshKernel::default();
		let rings = [0.0, 5.0, 10.0]
			.iter()
			.map(|&z| kernel.ellipse_curve(&Ellipse::horizontal(DVec3::new(0.0, 0.0, z), DVec2::ONE)))
			.collect::<Result<Vec<_>, _>>()
			.unwrap();

		let solids = kernel.loft(&rings, false, LoftStyle::Straight).unwrap();
		assert_eq!(solids.len(), 1);

		let solid = kernel.cap_planar_holes(solids[0].clone(), 1e-2).unwrap();
		assert!(solid.is_closed());

		let centroid = kernel.centroid(&solid).unwrap();
		assert!(centroid.abs_diff_eq(DVec3::new(0.0, 0.0, 5.0), 1e-9));

		let top = kernel.closest_point(&solid, DVec3::new(0.0, 0.0, 20.0)).unwrap();
		assert!((top.z - 10.0).abs() < 1e-9);

		let moved = kernel.translate(solid, DVec3::new(2.0, 0.0, 0.0));
		let centroid = kernel.centroid(&moved).unwrap();
		assert!(centroid.abs_diff_eq(DVec3::new(2.0, 0.0, 5.0), 1e-9));
	}

	#[test]
	fn test_empty_solid_measures_fail() {
		let kernel = MeshKernel::default();
		assert_eq!(kernel.centroid(&TriSolid::new()), Err(GeometryError::EmptySolid));
		assert_eq!(
			kernel.closest_point(&TriSolid::new(), DVec3::ZERO),
			Err(GeometryError::EmptySolid)
		);
	}
}
