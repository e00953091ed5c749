//! Procedural stylized trees: a twisted, capped trunk lofted from elliptical rings and
//! a four-petal canopy lofted from random profile curves, tiled over a grid.
//!
//! All geometry goes through a [`kernel::GeometryKernel`] and all placement through a
//! [`kernel::DocumentStore`]; randomness comes from an explicitly passed [`rand::Rng`].

pub mod config;
pub mod error;
pub mod grove;
pub mod materials;
pub mod sampler;
pub mod tree;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{FailurePolicy, GroveConfig};
pub use error::TreeError;
pub use grove::{grid_offsets, place_grid, GridPlacer, GroveReport};
pub use materials::{register_materials, TreeAttributes};
pub use sampler::{sample_canopy_profile, sample_cross_section, CrossSection, ProfileCurve};
pub use tree::{
	canopy::{build_canopy, CanopyBuilder, CanopySkeleton},
	compose_tree,
	trunk::{build_trunk, TrunkBuilder, TrunkRing, TrunkSkeleton},
	Role, SolidPair, TreeComposer, TreeSkeleton,
};
