//! Headless geometry kernel and scene document.
//!
//! Curves are dense polylines and solids are triangle meshes, which is enough to run
//! the tree generator and check its geometric invariants without a CAD host.

pub mod backend;
pub mod cap;
pub mod curve;
pub mod document;
pub mod loft;
pub mod measure;
pub mod solid;

pub use backend::{MeshKernel, MeshKernelConfig};
pub use curve::PolyCurve;
pub use document::{SceneDocument, SceneObject};
pub use solid::TriSolid;
