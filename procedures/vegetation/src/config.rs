use crate::{error::TreeError, materials::TreeAttributes, tree::canopy::CanopyBuilder};
use kernel::ObjectAttributes;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// What the grid placer does when one cell's tree cannot be built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
	/// Stop the whole pass on the first failure.
	#[default]
	Abort,
	/// Log the failure and move on to the next cell.
	SkipCell,
}

/// Configuration of one grove generation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroveConfig {
	/// Size of one tree. Grid spacing is twice this.
	pub scale: f64,
	/// Grid half-width in tree units.
	pub side: u32,
	/// Free control points per canopy petal edge.
	pub n_intermediate_canopy: usize,
	/// Rings between the trunk base and top.
	pub n_intermediate_trunk: usize,
	/// Planarity tolerance when capping the trunk.
	pub cap_tolerance: f64,
	/// Fixed seed for reproducible groves. Unseeded runs draw from the thread RNG.
	pub seed: Option<u64>,
	pub failure_policy: FailurePolicy,
	pub trunk_attributes: ObjectAttributes,
	pub canopy_attributes: ObjectAttributes,
}

impl Default for GroveConfig {
	fn default() -> Self {
		let attributes = TreeAttributes::default();
		Self {
			scale: 10.0,
			side: 5,
			n_intermediate_canopy: 3,
			n_intermediate_trunk: 1,
			cap_tolerance: 1e-2,
			seed: None,
			failure_policy: FailurePolicy::Abort,
			trunk_attributes: attributes.trunk,
			canopy_attributes: attributes.canopy,
		}
	}
}

impl GroveConfig {
	pub fn with_scale(mut self, scale: f64) -> Self {
		self.scale = scale;
		self
	}

	pub fn with_side(mut self, side: u32) -> Self {
		self.side = side;
		self
	}

	pub fn with_seed(mut self, seed: u64) -> Self {
		self.seed = Some(seed);
		self
	}

	pub fn with_n_intermediate_canopy(mut self, n_intermediate: usize) -> Self {
		self.n_intermediate_canopy = n_intermediate;
		self
	}

	pub fn with_n_intermediate_trunk(mut self, n_intermediate: usize) -> Self {
		self.n_intermediate_trunk = n_intermediate;
		self
	}

	pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
		self.failure_policy = failure_policy;
		self
	}

	pub fn validate(&self) -> Result<(), TreeError> {
		if !self.scale.is_finite() || self.scale <= 0.0 {
			return Err(TreeError::InvalidConfig(format!("scale must be positive, got {}", self.scale)));
		}
		if !self.cap_tolerance.is_finite() || self.cap_tolerance <= 0.0 {
			return Err(TreeError::InvalidConfig(format!(
				"cap_tolerance must be positive, got {}",
				self.cap_tolerance
			)));
		}
		// a petal edge has two pinned ends and needs degree + 1 points to interpolate
		let min_canopy = CanopyBuilder::new(self.scale).degree.saturating_sub(1);
		if self.n_intermediate_canopy < min_canopy {
			return Err(TreeError::InvalidConfig(format!(
				"n_intermediate_canopy must be at least {}, got {}",
				min_canopy, self.n_intermediate_canopy
			)));
		}
		Ok(())
	}

	pub fn attributes(&self) -> TreeAttributes {
		TreeAttributes { trunk: self.trunk_attributes.clone(), canopy: self.canopy_attributes.clone() }
	}

	/// The random stream for one pass: seeded when `seed` is set.
	pub fn rng(&self) -> ChaCha8Rng {
		match self.seed {
			Some(seed) => ChaCha8Rng::seed_from_u64(seed),
			None => ChaCha8Rng::from_rng(&mut rand::rng()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::materials::{bark, leaves};
	use rand::Rng;

	#[test]
	fn test_defaults() {
		let config = GroveConfig::default();
		assert_eq!(config.scale, 10.0);
		assert_eq!(config.side, 5);
		assert_eq!(config.n_intermediate_canopy, 3);
		assert_eq!(config.n_intermediate_trunk, 1);
		assert_eq!(config.failure_policy, FailurePolicy::Abort);
		assert_eq!(config.trunk_attributes.material, Some(bark()));
		assert_eq!(config.canopy_attributes.material, Some(leaves()));
		assert!(config.validate().is_ok());
	}

	#[test]
	fn test_partial_toml_fills_defaults() {
		let config: GroveConfig = toml::from_str(
			r#"
			scale = 4.0
			side = 2
			seed = 99
			failure_policy = "skip_cell"
			"#,
		)
		.unwrap();

		assert_eq!(config.scale, 4.0);
		assert_eq!(config.side, 2);
		assert_eq!(config.seed, Some(99));
		assert_eq!(config.failure_policy, FailurePolicy::SkipCell);
		assert_eq!(config.n_intermediate_canopy, 3);
	}

	#[test]
	fn test_validate_rejects_bad_scale() {
		for scale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
			let config = GroveConfig::default().with_scale(scale);
			assert!(matches!(config.validate(), Err(TreeError::InvalidConfig(_))));
		}

		let mut config = GroveConfig::default();
		config.cap_tolerance = 0.0;
		assert!(config.validate().is_err());
	}

	#[test]
	fn test_validate_rejects_canopy_too_coarse_for_cubic() {
		for n in [0, 1] {
			let config = GroveConfig::default().with_n_intermediate_canopy(n);
			assert!(matches!(config.validate(), Err(TreeError::InvalidConfig(_))));
		}
		assert!(GroveConfig::default().with_n_intermediate_canopy(2).validate().is_ok());
	}

	#[test]
	fn test_seeded_rng_is_reproducible() {
		let config = GroveConfig::default().with_seed(5);
		let a: u64 = config.rng().random();
		let b: u64 = config.rng().random();
		assert_eq!(a, b);
	}
}
