use anyhow::Context;
use clap::Parser;
use mesh_kernel::{measure, MeshKernel, SceneDocument, TriSolid};
use serde::Serialize;
use std::path::{Path, PathBuf};
use vegetation::{FailurePolicy, GridPlacer, GroveConfig};

/// Generate a grid of stylized trees into a headless scene.
#[derive(Debug, Default, Parser)]
#[command(name = "grove", version)]
pub struct Args {
	/// TOML file with a grove configuration. Flags below override it.
	#[arg(long)]
	pub config: Option<PathBuf>,

	/// Size of one tree.
	#[arg(long)]
	pub scale: Option<f64>,

	/// Grid half-width in tree units.
	#[arg(long)]
	pub side: Option<u32>,

	/// Seed for a reproducible grove.
	#[arg(long)]
	pub seed: Option<u64>,

	/// Free control points per canopy petal edge.
	#[arg(long)]
	pub canopy_complexity: Option<usize>,

	/// Rings between the trunk base and top.
	#[arg(long)]
	pub trunk_complexity: Option<usize>,

	/// Skip trees that fail to build instead of aborting.
	#[arg(long)]
	pub skip_failures: bool,
}

impl Args {
	pub fn grove_config(&self) -> anyhow::Result<GroveConfig> {
		let mut config = match &self.config {
			Some(path) => load_config(path)?,
			None => GroveConfig::default(),
		};

		if let Some(scale) = self.scale {
			config.scale = scale;
		}
		if let Some(side) = self.side {
			config.side = side;
		}
		if let Some(seed) = self.seed {
			config.seed = Some(seed);
		}
		if let Some(n) = self.canopy_complexity {
			config.n_intermediate_canopy = n;
		}
		if let Some(n) = self.trunk_complexity {
			config.n_intermediate_trunk = n;
		}
		if self.skip_failures {
			config.failure_policy = FailurePolicy::SkipCell;
		}

		config.validate()?;
		Ok(config)
	}
}

pub fn load_config(path: &Path) -> anyhow::Result<GroveConfig> {
	let raw = std::fs::read_to_string(path)
		.with_context(|| format!("failed to read grove config {}", path.display()))?;
	toml::from_str(&raw).with_context(|| format!("failed to parse grove config {}", path.display()))
}

/// What a generation pass put into the scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroveSummary {
	pub seed: Option<u64>,
	pub trees: usize,
	pub solids: usize,
	pub groups: usize,
	pub skipped: usize,
	pub surface_area: f64,
	pub bounds_min: [f64; 3],
	pub bounds_max: [f64; 3],
}

pub fn generate(config: &GroveConfig) -> anyhow::Result<(SceneDocument<TriSolid>, GroveSummary)> {
	let kernel = MeshKernel::default();
	let mut document = SceneDocument::new();
	let mut rng = config.rng();

	let placer = GridPlacer::new(config)?;
	let report = placer.populate(&kernel, &mut document, &mut rng, &config.attributes())?;

	let solids: Vec<&TriSolid> = document.objects().map(|(_, object)| &object.solid).collect();
	let bounds = solids
		.iter()
		.filter_map(|solid| solid.bounds())
		.reduce(|(min_a, max_a), (min_b, max_b)| (min_a.min(min_b), max_a.max(max_b)))
		.unwrap_or_default();

	let summary = GroveSummary {
		seed: config.seed,
		trees: report.placed.len(),
		solids: solids.len(),
		groups: document.group_count(),
		skipped: report.skipped.len(),
		surface_area: solids.iter().map(|solid| measure::surface_area(solid)).sum(),
		bounds_min: bounds.0.to_array(),
		bounds_max: bounds.1.to_array(),
	};

	Ok((document, summary))
}
