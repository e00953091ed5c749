use crate::{GroupId, Handle};
use thiserror::Error;

/// Errors raised by a [`crate::GeometryKernel`] when it rejects its inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
	#[error("curve of degree {degree} needs at least {min} points, got {actual}")]
	TooFewPoints { degree: usize, min: usize, actual: usize },

	#[error("unsupported curve degree: {0}")]
	UnsupportedDegree(usize),

	#[error("non-finite control point at index {index}")]
	NonFinitePoint { index: usize },

	#[error("rotation axis is degenerate")]
	DegenerateAxis,

	#[error("loft needs at least {min} curves, got {actual}")]
	TooFewCurves { min: usize, actual: usize },

	#[error("loft curves are incompatible: {0}")]
	IncompatibleCurves(String),

	#[error("loft produced no solids")]
	EmptyLoft,

	#[error("hole {index} deviates {deviation} from its plane (tolerance {tolerance})")]
	NonPlanarHole { index: usize, deviation: f64, tolerance: f64 },

	#[error("solid has no faces")]
	EmptySolid,
}

/// Errors raised by a [`crate::DocumentStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
	#[error("unknown object handle {0:?}")]
	UnknownHandle(Handle),

	#[error("material {0:?} is not registered")]
	UnknownMaterial(String),

	#[error("cannot create an empty group")]
	EmptyGroup,

	#[error("unknown group {0:?}")]
	UnknownGroup(GroupId),
}
