use bevy::math::DVec2;
use kernel::{DocumentError, GeometryError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TreeError {
	#[error(transparent)]
	Geometry(#[from] GeometryError),

	#[error(transparent)]
	Document(#[from] DocumentError),

	#[error("cross-section {index} has degenerate radii {radii}")]
	DegenerateSample { index: usize, radii: DVec2 },

	#[error("invalid grove configuration: {0}")]
	InvalidConfig(String),
}
