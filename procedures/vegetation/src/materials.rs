use crate::tree::Role;
use kernel::{Color, DocumentError, DocumentStore, MaterialId, MaterialSpec, ObjectAttributes};
use serde::{Deserialize, Serialize};

pub const BARK_COLOR: Color = Color::rgb(200, 100, 30);
pub const LEAVES_COLOR: Color = Color::rgb(100, 200, 100);

pub fn bark() -> MaterialSpec {
	MaterialSpec::new("bark", BARK_COLOR)
}

pub fn leaves() -> MaterialSpec {
	MaterialSpec::new("leaves", LEAVES_COLOR)
}

/// Render attributes for each role of a tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeAttributes {
	pub trunk: ObjectAttributes,
	pub canopy: ObjectAttributes,
}

impl Default for TreeAttributes {
	fn default() -> Self {
		Self {
			trunk: ObjectAttributes::from_material(bark()),
			canopy: ObjectAttributes::from_material(leaves()),
		}
	}
}

impl TreeAttributes {
	pub fn for_role(&self, role: Role) -> &ObjectAttributes {
		match role {
			Role::Trunk => &self.trunk,
			Role::Canopy => &self.canopy,
		}
	}

	/// Registers every material these attributes refer to.
	pub fn register<S, D: DocumentStore<S>>(&self, document: &mut D) -> Result<Vec<MaterialId>, DocumentError> {
		let mut ids = Vec::new();
		for role in Role::ALL {
			if let Some(material) = &self.for_role(role).material {
				ids.push(document.add_material(material.clone())?);
			}
		}
		Ok(ids)
	}
}

/// Registers bark and leaves with `document` and returns attributes bound to them.
pub fn register_materials<S, D: DocumentStore<S>>(document: &mut D) -> Result<TreeAttributes, DocumentError> {
	let attributes = TreeAttributes::default();
	attributes.register(document)?;
	Ok(attributes)
}
