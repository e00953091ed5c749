use crate::{
	error::TreeError,
	sampler::{jitter, sample_cross_section, CrossSection},
};
use bevy::math::DVec3;
use kernel::{GeometryError, GeometryKernel, LoftStyle};
use rand::Rng;
use std::f64::consts::TAU;

/// One trunk ring and the twist applied to it about the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrunkRing {
	pub section: CrossSection,
	/// Radians in `[0, 2π)`.
	pub twist: f64,
}

/// Rings of one trunk, ordered from base to top.
#[derive(Debug, Clone, PartialEq)]
pub struct TrunkSkeleton {
	pub rings: Vec<TrunkRing>,
}

impl TrunkSkeleton {
	pub fn sections(&self) -> impl Iterator<Item = &CrossSection> {
		self.rings.iter().map(|ring| &ring.section)
	}

	pub fn heights(&self) -> Vec<f64> {
		self.sections().map(CrossSection::height).collect()
	}
}

/// Builds the trunk: twisted elliptical rings lofted open, then capped.
#[derive(Debug, Clone, PartialEq)]
pub struct TrunkBuilder {
	pub scale: f64,
	/// Rings between the base and the top.
	pub n_intermediate: usize,
	/// Planarity tolerance for capping the two ends.
	pub cap_tolerance: f64,
	pub style: LoftStyle,
}

impl TrunkBuilder {
	pub fn new(scale: f64) -> Self {
		Self { scale, n_intermediate: 1, cap_tolerance: 1e-2, style: LoftStyle::Loose }
	}

	pub fn with_n_intermediate(mut self, n_intermediate: usize) -> Self {
		self.n_intermediate = n_intermediate;
		self
	}

	pub fn with_cap_tolerance(mut self, cap_tolerance: f64) -> Self {
		self.cap_tolerance = cap_tolerance;
		self
	}

	pub fn with_style(mut self, style: LoftStyle) -> Self {
		self.style = style;
		self
	}

	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> TrunkSkeleton {
		let scale = self.scale;
		let half = scale / 2.0;
		let mut sections = Vec::with_capacity(self.n_intermediate + 2);

		sections.push(sample_cross_section(rng, scale, DVec3::ZERO));

		for i in 0..self.n_intermediate {
			// jitter is symmetric around the axis with 20% relative noise
			let x = jitter(rng, half) - half;
			let y = jitter(rng, half) - half;
			let z = scale * (i + 1) as f64 / (self.n_intermediate + 1) as f64;
			sections.push(sample_cross_section(rng, half, DVec3::new(x, y, z)));
		}

		sections.push(sample_cross_section(rng, scale, DVec3::new(0.0, 0.0, scale)));

		let rings = sections
			.into_iter()
			.map(|section| TrunkRing { section, twist: rng.random::<f64>() * TAU })
			.collect();

		TrunkSkeleton { rings }
	}

	pub fn build<K: GeometryKernel>(&self, kernel: &K, skeleton: &TrunkSkeleton) -> Result<K::Solid, TreeError> {
		let mut curves = Vec::with_capacity(skeleton.rings.len());
		for (index, ring) in skeleton.rings.iter().enumerate() {
			ring.section.validate(index)?;
			let curve = kernel.ellipse_curve(&ring.section.ellipse())?;
			curves.push(kernel.rotate_curve(curve, ring.twist, DVec3::Z, DVec3::ZERO)?);
		}

		let open = kernel
			.loft(&curves, false, self.style)?
			.into_iter()
			.next()
			.ok_or(GeometryError::EmptyLoft)?;

		Ok(kernel.cap_planar_holes(open, self.cap_tolerance)?)
	}
}

/// Samples and builds one trunk.
pub fn build_trunk<K: GeometryKernel, R: Rng + ?Sized>(
	kernel: &K,
	rng: &mut R,
	scale: f64,
	n_intermediate: usize,
) -> Result<K::Solid, TreeError> {
	let builder = TrunkBuilder::new(scale).with_n_intermediate(n_intermediate);
	let skeleton = builder.sample(rng);
	builder.build(kernel, &skeleton)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::RecordingKernel;
	use bevy::math::DVec2;
	use mesh_kernel::MeshKernel;
	use rand::SeedableRng;
	use rand_chacha::ChaCha8Rng;

	#[test]
	fn test_ring_heights_are_evenly_spaced() {
		let mut rng = ChaCha8Rng::seed_from_u64(9);
		for scale in [1.0, 10.0, 33.3] {
			for n in 0..5 {
				let skeleton = TrunkBuilder::new(scale).with_n_intermediate(n).sample(&mut rng);
				let heights = skeleton.heights();

				assert_eq!(heights.len(), n + 2);
				for (i, height) in heights.iter().enumerate() {
					let expected = scale * i as f64 / (n + 1) as f64;
					assert!((height - expected).abs() < 1e-12, "ring {} at {}", i, height);
				}
			}
		}
	}

	#[test]
	fn test_end_rings_stay_on_axis() {
		let mut rng = ChaCha8Rng::seed_from_u64(2);
		let skeleton = TrunkBuilder::new(10.0).with_n_intermediate(3).sample(&mut rng);

		let first = skeleton.rings.first().unwrap().section;
		let last = skeleton.rings.last().unwrap().section;
		assert_eq!(first.center, DVec3::ZERO);
		assert_eq!(last.center, DVec3::new(0.0, 0.0, 10.0));
		assert!(skeleton.rings.iter().all(|ring| (0.0..TAU).contains(&ring.twist)));
	}

	#[test]
	fn test_middle_rings_are_half_scale_and_centered() {
		let mut rng = ChaCha8Rng::seed_from_u64(13);
		let scale = 10.0;
		let builder = TrunkBuilder::new(scale).with_n_intermediate(3);

		let mut radii = Vec::new();
		let mut xs = Vec::new();
		let mut ys = Vec::new();
		let mut end_radii = Vec::new();
		for _ in 0..500 {
			let skeleton = builder.sample(&mut rng);
			let last = skeleton.rings.len() - 1;
			for (i, ring) in skeleton.rings.iter().enumerate() {
				let section = ring.section;
				if i == 0 || i == last {
					end_radii.extend([section.radii.x, section.radii.y]);
				} else {
					radii.extend([section.radii.x, section.radii.y]);
					xs.push(section.center.x);
					ys.push(section.center.y);
				}
			}
		}

		let mean = |values: &[f64]| values.iter().sum::<f64>() / values.len() as f64;
		let spread = |values: &[f64]| {
			let m = mean(values);
			(values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64).sqrt()
		};

		assert!((mean(&radii) - 0.05 * scale).abs() < 0.02, "middle radius {}", mean(&radii));
		assert!((mean(&end_radii) - 0.1 * scale).abs() < 0.03, "end radius {}", mean(&end_radii));
		for centers in [&xs, &ys] {
			assert!(mean(centers).abs() < 0.15, "center mean {}", mean(centers));
			assert!((spread(centers) - 0.1 * scale).abs() < 0.1, "center spread {}", spread(centers));
		}
	}

	#[test]
	fn test_build_applies_each_ring_twist() {
		let kernel = RecordingKernel::default();
		let builder = TrunkBuilder::new(10.0).with_n_intermediate(2);
		let skeleton = builder.sample(&mut ChaCha8Rng::seed_from_u64(6));

		builder.build(&kernel, &skeleton).unwrap();

		let twists: Vec<f64> = skeleton.rings.iter().map(|ring| ring.twist).collect();
		assert_eq!(kernel.rotations(), twists);
		assert!(twists.iter().any(|twist| *twist > 0.0));
	}

	#[test]
	fn test_build_trunk_lofts_open_and_caps() {
		let kernel = RecordingKernel::default();
		let mut rng = ChaCha8Rng::seed_from_u64(4);

		let trunk = build_trunk(&kernel, &mut rng, 10.0, 1).unwrap();

		assert!(trunk.is_closed());
		let lofts = kernel.lofts();
		assert_eq!(lofts.len(), 1);
		assert_eq!(lofts[0].sections, 3);
		assert!(!lofts[0].closed);
		assert_eq!(kernel.caps(), 1);
	}

	#[test]
	fn test_degenerate_ring_is_rejected_before_lofting() {
		let kernel = RecordingKernel::default();
		let builder = TrunkBuilder::new(10.0);
		let mut skeleton = builder.sample(&mut ChaCha8Rng::seed_from_u64(4));
		skeleton.rings[1].section.radii = DVec2::new(0.4, -0.01);

		let result = builder.build(&kernel, &skeleton);

		assert!(matches!(result, Err(TreeError::DegenerateSample { index: 1, .. })));
		assert!(kernel.lofts().is_empty());
	}

	#[test]
	fn test_tight_tolerance_still_caps_flat_ends() {
		let kernel = MeshKernel::default();
		let builder = TrunkBuilder::new(10.0).with_n_intermediate(2).with_cap_tolerance(1e-9);
		let skeleton = builder.sample(&mut ChaCha8Rng::seed_from_u64(8));

		assert!(builder.build(&kernel, &skeleton).is_ok());
	}
}
