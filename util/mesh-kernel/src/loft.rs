use crate::{
	curve::{b_spline, catmull_rom_closed, catmull_rom_through, PolyCurve},
	solid::TriSolid,
};
use bevy::math::DVec3;
use kernel::{GeometryError, LoftStyle};

/// Sampling density for [`loft`].
#[derive(Debug, Clone, Copy)]
pub struct LoftResolution {
	/// Points taken along each section curve.
	pub samples: usize,
	/// Rows generated between two consecutive sections.
	pub span_steps: usize,
}

/// Lofts a triangulated surface through `curves`.
///
/// Every curve is resampled to the same number of points, then each column of
/// corresponding points is blended across the sections according to `style`.
/// A closed loft wraps the last section back to the first.
pub fn loft(
	curves: &[PolyCurve],
	closed: bool,
	style: LoftStyle,
	resolution: LoftResolution,
) -> Result<TriSolid, GeometryError> {
	let min = if closed { 3 } else { 2 };
	if curves.len() < min {
		return Err(GeometryError::TooFewCurves { min, actual: curves.len() });
	}

	let curves_closed = curves[0].is_closed();
	if curves.iter().any(|curve| curve.is_closed() != curves_closed) {
		return Err(GeometryError::IncompatibleCurves("mixed open and closed sections".to_string()));
	}
	if let Some(index) = curves.iter().position(|curve| curve.points().is_empty()) {
		return Err(GeometryError::IncompatibleCurves(format!("section {} has no points", index)));
	}

	let samples = resolution.samples.max(3);
	let sections: Vec<Vec<DVec3>> = curves.iter().map(|curve| curve.resample(samples)).collect();

	// rows[r][j]: r runs across sections, j along each section
	let columns: Vec<Vec<DVec3>> = (0..samples)
		.map(|j| {
			let column: Vec<DVec3> = sections.iter().map(|section| section[j]).collect();
			blend(&column, closed, style, resolution.span_steps.max(1))
		})
		.collect();
	let row_count = columns[0].len();

	let mut solid = TriSolid::new();
	for r in 0..row_count {
		for column in &columns {
			solid.push_vertex(column[r]);
		}
	}

	let index = |r: usize, j: usize| (r * samples + j) as u32;
	let row_spans = if closed { row_count } else { row_count - 1 };
	let column_spans = if curves_closed { samples } else { samples - 1 };
	for r in 0..row_spans {
		let next_r = (r + 1) % row_count;
		for j in 0..column_spans {
			let next_j = (j + 1) % samples;
			solid.faces.push([index(r, j), index(next_r, j), index(next_r, next_j)]);
			solid.faces.push([index(r, j), index(next_r, next_j), index(r, next_j)]);
		}
	}

	let loops = match (closed, curves_closed) {
		(true, true) => Vec::new(),
		(false, true) => vec![
			(0..samples).map(|j| index(0, j)).collect(),
			(0..samples).map(|j| index(row_count - 1, j)).collect(),
		],
		(true, false) => vec![
			(0..row_count).map(|r| index(r, 0)).collect(),
			(0..row_count).map(|r| index(r, samples - 1)).collect(),
		],
		(false, false) => {
			let mut perimeter: Vec<u32> = (0..samples).map(|j| index(0, j)).collect();
			perimeter.extend((1..row_count).map(|r| index(r, samples - 1)));
			perimeter.extend((0..samples - 1).rev().map(|j| index(row_count - 1, j)));
			perimeter.extend((1..row_count - 1).rev().map(|r| index(r, 0)));
			vec![perimeter]
		}
	};

	let pinch = pinch_tolerance(&solid);
	solid.boundaries = loops
		.into_iter()
		.filter(|boundary| loop_extent(&solid.vertices, boundary) > pinch)
		.collect();

	log::debug!(
		"Lofted {} sections ({:?}, closed: {}) into {} faces with {} open boundaries",
		curves.len(),
		style,
		closed,
		solid.faces.len(),
		solid.boundaries.len()
	);

	Ok(solid)
}

/// Blends one column of section points into the rows of the loft.
fn blend(column: &[DVec3], closed: bool, style: LoftStyle, steps: usize) -> Vec<DVec3> {
	match (style, closed) {
		(LoftStyle::Normal, false) => catmull_rom_through(column, steps),
		(LoftStyle::Normal, true) => catmull_rom_closed(column, steps),
		(LoftStyle::Loose, false) => clamped_b_spline(column, steps),
		(LoftStyle::Loose, true) => periodic_b_spline(column, steps),
		(LoftStyle::Straight, false) => ruled(column, steps, false),
		(LoftStyle::Straight, true) => ruled(column, steps, true),
	}
}

/// Uniform cubic B-spline whose end points are pinned by tripling them.
fn clamped_b_spline(control: &[DVec3], steps: usize) -> Vec<DVec3> {
	let (Some(first), Some(last)) = (control.first().copied(), control.last().copied()) else {
		return Vec::new();
	};

	let mut padded = vec![first, first];
	padded.extend_from_slice(control);
	padded.extend([last, last]);

	let mut points = Vec::with_capacity((padded.len() - 3) * steps + 1);
	for window in padded.windows(4) {
		for k in 0..steps {
			points.push(b_spline(window[0], window[1], window[2], window[3], k as f64 / steps as f64));
		}
	}
	points.push(last);
	points
}

fn periodic_b_spline(control: &[DVec3], steps: usize) -> Vec<DVec3> {
	let n = control.len();
	let mut points = Vec::with_capacity(n * steps);
	for i in 0..n {
		let p0 = control[(i + n - 1) % n];
		let p1 = control[i];
		let p2 = control[(i + 1) % n];
		let p3 = control[(i + 2) % n];
		for k in 0..steps {
			points.push(b_spline(p0, p1, p2, p3, k as f64 / steps as f64));
		}
	}
	points
}

fn ruled(control: &[DVec3], steps: usize, closed: bool) -> Vec<DVec3> {
	let n = control.len();
	let spans = if closed { n } else { n - 1 };
	let mut points = Vec::with_capacity(spans * steps + 1);
	for i in 0..spans {
		let a = control[i];
		let b = control[(i + 1) % n];
		for k in 0..steps {
			points.push(a.lerp(b, k as f64 / steps as f64));
		}
	}
	if !closed {
		points.extend(control.last().copied());
	}
	points
}

fn pinch_tolerance(solid: &TriSolid) -> f64 {
	let diagonal = solid.bounds().map(|(min, max)| min.distance(max)).unwrap_or(0.0);
	1e-9 * diagonal.max(1.0)
}

fn loop_extent(vertices: &[DVec3], boundary: &[u32]) -> f64 {
	let Some(&first) = boundary.first() else {
		return 0.0;
	};
	let anchor = vertices[first as usize];
	boundary.iter().map(|&i| vertices[i as usize].distance(anchor)).fold(0.0, f64::max)
}
