use crate::solid::TriSolid;
use bevy::math::DVec3;

/// Nearest point on the surface of `solid` to `point`, by brute force over its triangles.
pub fn closest_point_on_solid(solid: &TriSolid, point: DVec3) -> Option<DVec3> {
	let mut closest = None;
	let mut min_dist_sq = f64::INFINITY;

	for [a, b, c] in solid.triangles() {
		let p = closest_point_on_triangle(point, a, b, c);
		let dist_sq = p.distance_squared(point);

		if dist_sq < min_dist_sq {
			min_dist_sq = dist_sq;
			closest = Some(p);
		}
	}

	closest
}

/// Surface centroid: triangle centroids weighted by triangle area.
///
/// Falls back to the vertex mean when every triangle is degenerate.
pub fn area_centroid(solid: &TriSolid) -> Option<DVec3> {
	if solid.is_empty() {
		return None;
	}

	let mut weighted = DVec3::ZERO;
	let mut total_area = 0.0;
	for [a, b, c] in solid.triangles() {
		let area = triangle_area(a, b, c);
		weighted += (a + b + c) / 3.0 * area;
		total_area += area;
	}

	if total_area > 0.0 {
		Some(weighted / total_area)
	} else {
		let sum: DVec3 = solid.vertices.iter().copied().sum();
		Some(sum / solid.vertices.len() as f64)
	}
}

pub fn surface_area(solid: &TriSolid) -> f64 {
	solid.triangles().map(|[a, b, c]| triangle_area(a, b, c)).sum()
}

fn triangle_area(a: DVec3, b: DVec3, c: DVec3) -> f64 {
	(b - a).cross(c - a).length() * 0.5
}

/// Closest point on triangle `abc` to `p`, by barycentric region tests.
#[allow(clippy::many_single_char_names)]
fn closest_point_on_triangle(p: DVec3, a: DVec3, b: DVec3, c: DVec3) -> DVec3 {
	let ab = b - a;
	let ac = c - a;
	let ap = p - a;

	let d1 = ab.dot(ap);
	let d2 = ac.dot(ap);
	if d1 <= 0.0 && d2 <= 0.0 {
		return a;
	}

	let bp = p - b;
	let d3 = ab.dot(bp);
	let d4 = ac.dot(bp);
	if d3 >= 0.0 && d4 <= d3 {
		return b;
	}

	let vc = d1.mul_add(d4, -(d3 * d2));
	if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
		let v = d1 / (d1 - d3);
		return a + ab * v;
	}

	let cp = p - c;
	let d5 = ab.dot(cp);
	let d6 = ac.dot(cp);
	if d6 >= 0.0 && d5 <= d6 {
		return c;
	}

	let vb = d5.mul_add(d2, -(d1 * d6));
	if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
		let w = d2 / (d2 - d6);
		return a + ac * w;
	}

	let va = d3.mul_add(d6, -(d5 * d4));
	if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
		let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
		return b + (c - b) * w;
	}

	let denom = va + vb + vc;
	if denom.abs() <= f64::EPSILON {
		// Degenerate triangle, every region test above was inconclusive
		return a;
	}
	let v = vb / denom;
	let w = vc / denom;
	a + ab * v + ac * w
}
