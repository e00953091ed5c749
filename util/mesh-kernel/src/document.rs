use kernel::{DocumentError, DocumentStore, GroupId, Handle, MaterialId, MaterialSpec, ObjectAttributes};
use std::collections::BTreeMap;

/// An object held by a [`SceneDocument`].
#[derive(Debug, Clone)]
pub struct SceneObject<S> {
	pub solid: S,
	pub attributes: ObjectAttributes,
}

/// In-memory [`DocumentStore`] standing in for a CAD host document.
#[derive(Debug, Clone)]
pub struct SceneDocument<S> {
	materials: Vec<MaterialSpec>,
	objects: BTreeMap<Handle, SceneObject<S>>,
	groups: BTreeMap<GroupId, Vec<Handle>>,
	next_handle: u64,
	next_group: u64,
	redraws: usize,
}

impl<S> Default for SceneDocument<S> {
	fn default() -> Self {
		Self {
			materials: Vec::new(),
			objects: BTreeMap::new(),
			groups: BTreeMap::new(),
			next_handle: 0,
			next_group: 0,
			redraws: 0,
		}
	}
}

impl<S> SceneDocument<S> {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn materials(&self) -> &[MaterialSpec] {
		&self.materials
	}

	pub fn material_id(&self, name: &str) -> Option<MaterialId> {
		self.materials.iter().position(|material| material.name == name).map(MaterialId)
	}

	pub fn object(&self, handle: Handle) -> Option<&SceneObject<S>> {
		self.objects.get(&handle)
	}

	pub fn objects(&self) -> impl Iterator<Item = (&Handle, &SceneObject<S>)> {
		self.objects.iter()
	}

	pub fn object_count(&self) -> usize {
		self.objects.len()
	}

	pub fn group_count(&self) -> usize {
		self.groups.len()
	}

	pub fn members(&self, group: GroupId) -> Result<&[Handle], DocumentError> {
		self.groups.get(&group).map(Vec::as_slice).ok_or(DocumentError::UnknownGroup(group))
	}

	pub fn redraws(&self) -> usize {
		self.redraws
	}
}

impl<S> DocumentStore<S> for SceneDocument<S> {
	fn add_material(&mut self, material: MaterialSpec) -> Result<MaterialId, DocumentError> {
		if let Some(id) = self.material_id(&material.name) {
			return Ok(id);
		}
		log::debug!("Registering material {:?}", material.name);
		self.materials.push(material);
		Ok(MaterialId(self.materials.len() - 1))
	}

	fn add_solid(&mut self, solid: S, attributes: &ObjectAttributes) -> Result<Handle, DocumentError> {
		if let Some(material) = &attributes.material {
			if self.material_id(&material.name).is_none() {
				return Err(DocumentError::UnknownMaterial(material.name.clone()));
			}
		}

		let handle = Handle(self.next_handle);
		self.next_handle += 1;
		self.objects.insert(handle, SceneObject { solid, attributes: attributes.clone() });
		Ok(handle)
	}

	fn group(&mut self, handles: &[Handle]) -> Result<GroupId, DocumentError> {
		if handles.is_empty() {
			return Err(DocumentError::EmptyGroup);
		}
		if let Some(unknown) = handles.iter().find(|handle| !self.objects.contains_key(handle)) {
			return Err(DocumentError::UnknownHandle(*unknown));
		}

		let group = GroupId(self.next_group);
		self.next_group += 1;
		self.groups.insert(group, handles.to_vec());
		Ok(group)
	}

	fn redraw(&mut self) {
		self.redraws += 1;
	}
}
