use serde::{Deserialize, Serialize};

/// Opaque id of an object added to a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Handle(pub u64);

/// Opaque id of a group of objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub u64);

/// Index of a registered render material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MaterialId(pub usize);

/// 8-bit ARGB color, the way CAD hosts store object colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
	pub a: u8,
	pub r: u8,
	pub g: u8,
	pub b: u8,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { a: 255, r, g, b }
	}

	pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
		Self { a, r, g, b }
	}
}

/// A basic render material: a name and a diffuse color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialSpec {
	pub name: String,
	pub diffuse: Color,
}

impl MaterialSpec {
	pub fn new(name: impl Into<String>, diffuse: Color) -> Self {
		Self { name: name.into(), diffuse }
	}
}

/// Where an object takes its material or display color from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeSource {
	#[default]
	Layer,
	Object,
}

/// Per-object render attributes attached when a solid enters the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectAttributes {
	pub name: Option<String>,
	pub material: Option<MaterialSpec>,
	pub material_source: AttributeSource,
	pub color: Option<Color>,
	pub color_source: AttributeSource,
}

impl ObjectAttributes {
	/// Attributes that take both material and display color from the object itself.
	pub fn from_material(material: MaterialSpec) -> Self {
		Self {
			name: None,
			color: Some(material.diffuse),
			material: Some(material),
			material_source: AttributeSource::Object,
			color_source: AttributeSource::Object,
		}
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}
}
