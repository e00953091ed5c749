pub mod canopy;
pub mod trunk;

use crate::{config::GroveConfig, error::TreeError};
use bevy::math::DVec3;
use canopy::{CanopyBuilder, CanopySkeleton};
use kernel::GeometryKernel;
use rand::Rng;
use trunk::{TrunkBuilder, TrunkSkeleton};

/// Which part of a tree a solid is. The discriminant is its index in a [`SolidPair`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
	Trunk = 0,
	Canopy = 1,
}

impl Role {
	pub const ALL: [Role; 2] = [Role::Trunk, Role::Canopy];

	pub fn index(self) -> usize {
		self as usize
	}
}

/// The two solids of one tree, in role order.
#[derive(Debug, Clone, PartialEq)]
pub struct SolidPair<S> {
	pub trunk: S,
	pub canopy: S,
}

impl<S> SolidPair<S> {
	pub fn get(&self, role: Role) -> &S {
		match role {
			Role::Trunk => &self.trunk,
			Role::Canopy => &self.canopy,
		}
	}

	pub fn into_roles(self) -> [(Role, S); 2] {
		[(Role::Trunk, self.trunk), (Role::Canopy, self.canopy)]
	}

	pub fn translate<K: GeometryKernel<Solid = S>>(self, kernel: &K, offset: DVec3) -> Self {
		Self { trunk: kernel.translate(self.trunk, offset), canopy: kernel.translate(self.canopy, offset) }
	}
}

/// Every random draw needed to build one tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeSkeleton {
	pub canopy: CanopySkeleton,
	pub trunk: TrunkSkeleton,
}

/// Builds a trunk and a canopy and seats the canopy on the trunk apex.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeComposer {
	pub scale: f64,
	pub canopy: CanopyBuilder,
	pub trunk: TrunkBuilder,
}

impl TreeComposer {
	pub fn new(scale: f64) -> Self {
		Self { scale, canopy: CanopyBuilder::new(scale), trunk: TrunkBuilder::new(scale) }
	}

	pub fn from_config(config: &GroveConfig) -> Self {
		Self {
			scale: config.scale,
			canopy: CanopyBuilder::new(config.scale).with_n_intermediate(config.n_intermediate_canopy),
			trunk: TrunkBuilder::new(config.scale)
				.with_n_intermediate(config.n_intermediate_trunk)
				.with_cap_tolerance(config.cap_tolerance),
		}
	}

	/// Probe above the trunk whose closest trunk point stands in for the apex.
	///
	/// The top ring may be jittered off the axis, so the apex is found rather than assumed.
	pub fn apex_probe(&self) -> DVec3 {
		DVec3::new(0.0, 0.0, 2.0 * self.scale)
	}

	/// Draws the canopy first and the trunk second.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> TreeSkeleton {
		let canopy = self.canopy.sample(rng);
		let trunk = self.trunk.sample(rng);
		TreeSkeleton { canopy, trunk }
	}

	pub fn build<K: GeometryKernel>(
		&self,
		kernel: &K,
		skeleton: &TreeSkeleton,
	) -> Result<SolidPair<K::Solid>, TreeError> {
		let canopy = self.canopy.build(kernel, &skeleton.canopy)?;
		let trunk = self.trunk.build(kernel, &skeleton.trunk)?;

		let apex = kernel.closest_point(&trunk, self.apex_probe())?;
		let centroid = kernel.centroid(&canopy)?;
		let canopy = kernel.translate(canopy, apex - centroid);

		log::debug!("Seated canopy centroid {} on trunk apex {}", centroid, apex);

		Ok(SolidPair { trunk, canopy })
	}

	pub fn compose<K: GeometryKernel, R: Rng + ?Sized>(
		&self,
		kernel: &K,
		rng: &mut R,
	) -> Result<SolidPair<K::Solid>, TreeError> {
		let skeleton = self.sample(rng);
		self.build(kernel, &skeleton)
	}
}

/// Composes one tree of the given scale with default complexity.
pub fn compose_tree<K: GeometryKernel, R: Rng + ?Sized>(
	kernel: &K,
	rng: &mut R,
	scale: f64,
) -> Result<SolidPair<K::Solid>, TreeError> {
	TreeComposer::new(scale).compose(kernel, rng)
}
