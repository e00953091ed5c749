use crate::{
	error::TreeError,
	sampler::{sample_canopy_profile, ProfileCurve},
};
use bevy::math::DVec3;
use kernel::{GeometryError, GeometryKernel, LoftStyle};
use rand::Rng;
use std::f64::consts::FRAC_PI_2;

/// Petals around the canopy axis, a quarter turn apart.
pub const PETALS: usize = 4;

/// The sampled petal edges of one canopy, before rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct CanopySkeleton {
	pub profiles: [ProfileCurve; PETALS],
}

impl CanopySkeleton {
	/// Rotation of petal `k` about the vertical axis.
	pub fn petal_angle(k: usize) -> f64 {
		k as f64 * FRAC_PI_2
	}
}

/// Builds the tree-top: four petal edges lofted into a closed solid.
#[derive(Debug, Clone, PartialEq)]
pub struct CanopyBuilder {
	pub scale: f64,
	/// Free control points per petal edge.
	pub n_intermediate: usize,
	/// Degree of the curve interpolated through each petal edge.
	pub degree: usize,
	pub style: LoftStyle,
}

impl CanopyBuilder {
	pub fn new(scale: f64) -> Self {
		Self { scale, n_intermediate: 3, degree: 3, style: LoftStyle::Loose }
	}

	pub fn with_n_intermediate(mut self, n_intermediate: usize) -> Self {
		self.n_intermediate = n_intermediate;
		self
	}

	pub fn with_style(mut self, style: LoftStyle) -> Self {
		self.style = style;
		self
	}

	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> CanopySkeleton {
		CanopySkeleton {
			profiles: std::array::from_fn(|_| sample_canopy_profile(rng, self.scale, self.n_intermediate)),
		}
	}

	pub fn build<K: GeometryKernel>(&self, kernel: &K, skeleton: &CanopySkeleton) -> Result<K::Solid, TreeError> {
		let mut curves = Vec::with_capacity(PETALS);
		for (k, profile) in skeleton.profiles.iter().enumerate() {
			let curve = kernel.interpolate_curve(profile.points(), self.degree)?;
			curves.push(kernel.rotate_curve(curve, CanopySkeleton::petal_angle(k), DVec3::Z, DVec3::ZERO)?);
		}

		let canopy = kernel
			.loft(&curves, true, self.style)?
			.into_iter()
			.next()
			.ok_or(GeometryError::EmptyLoft)?;
		Ok(canopy)
	}
}

/// Samples and builds one canopy.
pub fn build_canopy<K: GeometryKernel, R: Rng + ?Sized>(
	kernel: &K,
	rng: &mut R,
	scale: f64,
	n_intermediate: usize,
) -> Result<K::Solid, TreeError> {
	let builder = CanopyBuilder::new(scale).with_n_intermediate(n_intermediate);
	let skeleton = builder.sample(rng);
	builder.build(kernel, &skeleton)
}
