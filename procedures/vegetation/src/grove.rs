use crate::{
	config::{FailurePolicy, GroveConfig},
	error::TreeError,
	materials::TreeAttributes,
	tree::{SolidPair, TreeComposer},
};
use bevy::math::DVec3;
use kernel::{DocumentStore, GeometryKernel, GroupId};
use rand::Rng;

/// Cell offsets of a square grid: `[-side·scale, side·scale)` stepping by `2·scale` on
/// both axes, X outer and Y inner.
pub fn grid_offsets(scale: f64, side: u32) -> Vec<DVec3> {
	let start = -(side as f64) * scale;
	let step = 2.0 * scale;

	let mut offsets = Vec::with_capacity((side as usize).pow(2));
	for i in 0..side {
		for j in 0..side {
			offsets.push(DVec3::new(start + i as f64 * step, start + j as f64 * step, 0.0));
		}
	}
	offsets
}

/// Outcome of one placement pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroveReport {
	/// One group per placed tree, in placement order.
	pub groups: Vec<GroupId>,
	/// Offsets of the placed trees.
	pub placed: Vec<DVec3>,
	/// Offsets whose tree failed to build under [`FailurePolicy::SkipCell`].
	pub skipped: Vec<DVec3>,
}

/// Tiles freshly composed trees over the placement grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPlacer {
	composer: TreeComposer,
	scale: f64,
	side: u32,
	failure_policy: FailurePolicy,
}

impl GridPlacer {
	pub fn new(config: &GroveConfig) -> Result<Self, TreeError> {
		config.validate()?;
		Ok(Self {
			composer: TreeComposer::from_config(config),
			scale: config.scale,
			side: config.side,
			failure_policy: config.failure_policy,
		})
	}

	pub fn composer(&self) -> &TreeComposer {
		&self.composer
	}

	pub fn offsets(&self) -> Vec<DVec3> {
		grid_offsets(self.scale, self.side)
	}

	/// Composes one tree per cell, moves it onto the cell and hands it to `emit`.
	///
	/// Composition failures follow the failure policy. Failures from `emit` always
	/// abort the pass.
	pub fn place<K, R, F>(&self, kernel: &K, rng: &mut R, mut emit: F) -> Result<GroveReport, TreeError>
	where
		K: GeometryKernel,
		R: Rng + ?Sized,
		F: FnMut(SolidPair<K::Solid>, DVec3) -> Result<GroupId, TreeError>,
	{
		let mut report = GroveReport::default();

		for offset in self.offsets() {
			let pair = match self.composer.compose(kernel, rng) {
				Ok(pair) => pair,
				Err(error) => match self.failure_policy {
					FailurePolicy::Abort => return Err(error),
					FailurePolicy::SkipCell => {
						log::warn!("Skipping tree at {}: {}", offset, error);
						report.skipped.push(offset);
						continue;
					}
				},
			};

			let group = emit(pair.translate(kernel, offset), offset)?;
			log::debug!("Placed tree at {} as {:?}", offset, group);

			report.groups.push(group);
			report.placed.push(offset);
		}

		log::info!(
			"Placed {} trees on a {}x{} grid ({} skipped)",
			report.placed.len(),
			self.side,
			self.side,
			report.skipped.len()
		);

		Ok(report)
	}

	/// Places the grove into `document`: each solid is added with its role's
	/// attributes, each tree becomes one group, and the document is redrawn once.
	pub fn populate<K, D, R>(
		&self,
		kernel: &K,
		document: &mut D,
		rng: &mut R,
		attributes: &TreeAttributes,
	) -> Result<GroveReport, TreeError>
	where
		K: GeometryKernel,
		D: DocumentStore<K::Solid>,
		R: Rng + ?Sized,
	{
		attributes.register(document)?;

		let report = self.place(kernel, rng, |pair, _offset| {
			let mut handles = Vec::with_capacity(2);
			for (role, solid) in pair.into_roles() {
				handles.push(document.add_solid(solid, attributes.for_role(role))?);
			}
			Ok(document.group(&handles)?)
		})?;

		document.redraw();
		Ok(report)
	}
}

/// Places a grove as described by `config`, returning one group id per tree.
pub fn place_grid<K, R, F>(
	kernel: &K,
	rng: &mut R,
	config: &GroveConfig,
	emit: F,
) -> Result<Vec<GroupId>, TreeError>
where
	K: GeometryKernel,
	R: Rng + ?Sized,
	F: FnMut(SolidPair<K::Solid>, DVec3) -> Result<GroupId, TreeError>,
{
	Ok(GridPlacer::new(config)?.place(kernel, rng, emit)?.groups)
}
