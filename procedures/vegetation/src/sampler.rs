use crate::error::TreeError;
use bevy::math::{DVec2, DVec3};
use kernel::Ellipse;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Control points of one canopy petal edge, from the base of the axis to its tip.
///
/// Points are `(0, lateral, height)`: the profile lies in the YZ half-plane and both
/// ends pinch onto the vertical axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileCurve {
	points: Vec<DVec3>,
}

impl ProfileCurve {
	pub fn new(points: Vec<DVec3>) -> Self {
		Self { points }
	}

	pub fn points(&self) -> &[DVec3] {
		&self.points
	}

	pub fn len(&self) -> usize {
		self.points.len()
	}

	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}

	pub fn heights(&self) -> impl Iterator<Item = f64> + '_ {
		self.points.iter().map(|p| p.z)
	}

	pub fn laterals(&self) -> impl Iterator<Item = f64> + '_ {
		self.points.iter().map(|p| p.y)
	}
}

/// A horizontal elliptical ring of the trunk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossSection {
	pub center: DVec3,
	/// Half-length along X, half-width along Y.
	pub radii: DVec2,
}

impl CrossSection {
	pub fn new(center: DVec3, radii: DVec2) -> Self {
		Self { center, radii }
	}

	pub fn height(&self) -> f64 {
		self.center.z
	}

	pub fn ellipse(&self) -> Ellipse {
		Ellipse::horizontal(self.center, self.radii)
	}

	/// Rejects radii the normal draw pushed to zero, below zero, or out of range.
	pub fn validate(&self, index: usize) -> Result<(), TreeError> {
		let ok = self.radii.is_finite() && self.radii.min_element() > 0.0 && self.center.is_finite();
		if ok {
			Ok(())
		} else {
			Err(TreeError::DegenerateSample { index, radii: self.radii })
		}
	}
}

/// Draws from `N(mean, std_dev)`.
pub fn normal<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
	let z: f64 = StandardNormal.sample(rng);
	mean + std_dev * z
}

/// Scales `n` by 20% relative noise around 1.
pub fn jitter<R: Rng + ?Sized>(rng: &mut R, n: f64) -> f64 {
	n * normal(rng, 1.0, 0.2)
}

/// Samples a petal edge with `n_intermediate` free points between the pinned base and tip.
///
/// Heights are uniform over `[0, scale]` and sorted; lateral offsets follow
/// `N(0.5, 0.2)` scaled by `scale`.
pub fn sample_canopy_profile<R: Rng + ?Sized>(rng: &mut R, scale: f64, n_intermediate: usize) -> ProfileCurve {
	let mut heights = Vec::with_capacity(n_intermediate + 2);
	let mut laterals = Vec::with_capacity(n_intermediate + 2);
	heights.push(0.0);
	laterals.push(0.0);

	for _ in 0..n_intermediate {
		heights.push(scale * rng.random::<f64>());
		laterals.push(normal(rng, 0.5, 0.2) * scale);
	}

	heights.sort_by(f64::total_cmp);
	heights.push(scale);
	laterals.push(0.0);

	let points = heights
		.into_iter()
		.zip(laterals)
		.map(|(height, lateral)| DVec3::new(0.0, lateral, height))
		.collect();

	ProfileCurve::new(points)
}

/// Samples a ring around `center` with both radii drawn from `scale · N(0.1, 0.02)`.
pub fn sample_cross_section<R: Rng + ?Sized>(rng: &mut R, scale: f64, center: DVec3) -> CrossSection {
	let half_length = scale * normal(rng, 0.1, 0.02);
	let half_width = scale * normal(rng, 0.1, 0.02);
	CrossSection::new(center, DVec2::new(half_length, half_width))
}
