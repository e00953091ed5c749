use crate::solid::TriSolid;
use bevy::math::DVec3;
use kernel::GeometryError;

/// Closes every open boundary of `solid` with a fan of triangles.
///
/// Each boundary must lie within `tolerance` of the plane through its centroid with
/// the Newell normal of the loop.
pub fn cap_planar_holes(mut solid: TriSolid, tolerance: f64) -> Result<TriSolid, GeometryError> {
	if solid.is_empty() {
		return Err(GeometryError::EmptySolid);
	}

	let boundaries = std::mem::take(&mut solid.boundaries);
	for (index, boundary) in boundaries.iter().enumerate() {
		let points: Vec<DVec3> = boundary.iter().map(|&i| solid.vertices[i as usize]).collect();
		let center = points.iter().copied().sum::<DVec3>() / points.len() as f64;

		let deviation = match newell_normal(&points) {
			Some(normal) => points.iter().map(|p| (*p - center).dot(normal).abs()).fold(0.0, f64::max),
			None => f64::INFINITY,
		};
		if deviation > tolerance {
			return Err(GeometryError::NonPlanarHole { index, deviation, tolerance });
		}

		let hub = solid.push_vertex(center);
		for k in 0..boundary.len() {
			let next = boundary[(k + 1) % boundary.len()];
			solid.faces.push([hub, next, boundary[k]]);
		}
	}

	log::debug!("Capped {} planar holes", boundaries.len());

	Ok(solid)
}

fn newell_normal(points: &[DVec3]) -> Option<DVec3> {
	let n = points.len();
	let normal = (0..n).fold(DVec3::ZERO, |acc, i| acc + points[i].cross(points[(i + 1) % n]));
	normal.try_normalize()
}
