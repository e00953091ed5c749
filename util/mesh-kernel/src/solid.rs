use bevy::math::DVec3;

/// A triangulated surface standing in for a host Brep.
///
/// `boundaries` holds the open edge loops left by a loft, as vertex index loops.
/// A solid with no boundaries is watertight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriSolid {
	pub vertices: Vec<DVec3>,
	pub faces: Vec<[u32; 3]>,
	pub boundaries: Vec<Vec<u32>>,
}

impl TriSolid {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_closed(&self) -> bool {
		self.boundaries.is_empty()
	}

	pub fn is_empty(&self) -> bool {
		self.faces.is_empty()
	}

	pub fn triangles(&self) -> impl Iterator<Item = [DVec3; 3]> + '_ {
		self.faces.iter().map(|face| {
			[
				self.vertices[face[0] as usize],
				self.vertices[face[1] as usize],
				self.vertices[face[2] as usize],
			]
		})
	}

	/// Axis-aligned bounds as `(min, max)`, or `None` for a solid without vertices.
	pub fn bounds(&self) -> Option<(DVec3, DVec3)> {
		let first = *self.vertices.first()?;
		Some(self.vertices.iter().fold((first, first), |(min, max), v| (min.min(*v), max.max(*v))))
	}

	pub fn translate(mut self, offset: DVec3) -> Self {
		for vertex in &mut self.vertices {
			*vertex += offset;
		}
		self
	}

	pub(crate) fn push_vertex(&mut self, vertex: DVec3) -> u32 {
		self.vertices.push(vertex);
		(self.vertices.len() - 1) as u32
	}
}
