use bevy::math::{DQuat, DVec3};
use kernel::{Ellipse, GeometryError};

/// A curve tessellated into a dense polyline.
///
/// Closed curves do not repeat their first point at the end.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyCurve {
	points: Vec<DVec3>,
	closed: bool,
}

impl PolyCurve {
	pub fn new(points: Vec<DVec3>, closed: bool) -> Self {
		Self { points, closed }
	}

	/// Interpolates `control` with a curve of `degree` (1 or 3), sampling `steps` points per span.
	pub fn interpolate(control: &[DVec3], degree: usize, steps: usize) -> Result<Self, GeometryError> {
		if degree != 1 && degree != 3 {
			return Err(GeometryError::UnsupportedDegree(degree));
		}
		if control.len() < degree + 1 {
			return Err(GeometryError::TooFewPoints {
				degree,
				min: degree + 1,
				actual: control.len(),
			});
		}
		if let Some(index) = control.iter().position(|p| !p.is_finite()) {
			return Err(GeometryError::NonFinitePoint { index });
		}

		let points = match degree {
			1 => polyline_through(control, steps),
			_ => catmull_rom_through(control, steps),
		};
		Ok(Self { points, closed: false })
	}

	pub fn from_ellipse(ellipse: &Ellipse, segments: usize) -> Result<Self, GeometryError> {
		if !ellipse.center.is_finite() || !ellipse.radii.is_finite() {
			return Err(GeometryError::NonFinitePoint { index: 0 });
		}
		let segments = segments.max(3);
		let points = (0..segments)
			.map(|i| ellipse.point_at(std::f64::consts::TAU * i as f64 / segments as f64))
			.collect();
		Ok(Self { points, closed: true })
	}

	pub fn points(&self) -> &[DVec3] {
		&self.points
	}

	pub fn is_closed(&self) -> bool {
		self.closed
	}

	pub fn rotate(mut self, angle: f64, axis: DVec3, pivot: DVec3) -> Result<Self, GeometryError> {
		let axis = axis.try_normalize().ok_or(GeometryError::DegenerateAxis)?;
		let rotation = DQuat::from_axis_angle(axis, angle);
		for point in &mut self.points {
			*point = pivot + rotation * (*point - pivot);
		}
		Ok(self)
	}

	pub fn length(&self) -> f64 {
		self.edges().map(|(a, b)| a.distance(b)).sum()
	}

	/// Resamples the curve to `count` points evenly spaced by arc length.
	///
	/// Open curves keep both end points. Closed curves start at their first point and
	/// stop one spacing short of it.
	pub fn resample(&self, count: usize) -> Vec<DVec3> {
		let count = count.max(2);
		let Some(first) = self.points.first().copied() else {
			return Vec::new();
		};

		let total = self.length();
		if total <= f64::EPSILON {
			return vec![first; count];
		}

		let spacing = if self.closed { total / count as f64 } else { total / (count - 1) as f64 };

		let mut samples = Vec::with_capacity(count);
		let mut edges = self.edges();
		let mut current = edges.next();
		let mut walked = 0.0;

		for k in 0..count {
			let target = spacing * k as f64;
			while let Some((a, b)) = current {
				let edge = a.distance(b);
				if walked + edge >= target {
					let t = if edge > 0.0 { ((target - walked) / edge).clamp(0.0, 1.0) } else { 0.0 };
					samples.push(a.lerp(b, t));
					break;
				}
				walked += edge;
				current = edges.next();
			}
			if current.is_none() {
				// Floating point walked past the last edge
				samples.push(if self.closed { first } else { self.points[self.points.len() - 1] });
			}
		}

		samples
	}

	fn edges(&self) -> impl Iterator<Item = (DVec3, DVec3)> + '_ {
		let closing = if self.closed && self.points.len() > 1 {
			Some((self.points[self.points.len() - 1], self.points[0]))
		} else {
			None
		};
		self.points.windows(2).map(|w| (w[0], w[1])).chain(closing)
	}
}

fn polyline_through(control: &[DVec3], steps: usize) -> Vec<DVec3> {
	let steps = steps.max(1);
	let mut points = Vec::with_capacity((control.len() - 1) * steps + 1);
	for pair in control.windows(2) {
		for k in 0..steps {
			points.push(pair[0].lerp(pair[1], k as f64 / steps as f64));
		}
	}
	points.extend(control.last().copied());
	points
}

/// Cubic through every control point, with Catmull-Rom tangents and chord tangents at the ends.
pub(crate) fn catmull_rom_through(control: &[DVec3], steps: usize) -> Vec<DVec3> {
	let steps = steps.max(1);
	let n = control.len();
	if n < 2 {
		return control.to_vec();
	}

	let mut points = Vec::with_capacity((n - 1) * steps + 1);
	for i in 0..n - 1 {
		let p0 = control[i];
		let p3 = control[i + 1];

		let tangent_start = if i == 0 { p3 - p0 } else { (control[i + 1] - control[i - 1]) * 0.5 };
		let tangent_end = if i == n - 2 { p3 - p0 } else { (control[i + 2] - control[i]) * 0.5 };

		let p1 = p0 + tangent_start / 3.0;
		let p2 = p3 - tangent_end / 3.0;

		for k in 0..steps {
			points.push(bezier(p0, p1, p2, p3, k as f64 / steps as f64));
		}
	}
	points.push(control[n - 1]);
	points
}

/// Periodic Catmull-Rom through a closed control loop. Does not repeat the first point.
pub(crate) fn catmull_rom_closed(control: &[DVec3], steps: usize) -> Vec<DVec3> {
	let steps = steps.max(1);
	let n = control.len();
	let mut points = Vec::with_capacity(n * steps);
	for i in 0..n {
		let prev = control[(i + n - 1) % n];
		let p0 = control[i];
		let p3 = control[(i + 1) % n];
		let next = control[(i + 2) % n];

		let p1 = p0 + (p3 - prev) * 0.5 / 3.0;
		let p2 = p3 - (next - p0) * 0.5 / 3.0;

		for k in 0..steps {
			points.push(bezier(p0, p1, p2, p3, k as f64 / steps as f64));
		}
	}
	points
}

pub(crate) fn bezier(p0: DVec3, p1: DVec3, p2: DVec3, p3: DVec3, t: f64) -> DVec3 {
	let u = 1.0 - t;
	p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

/// Uniform cubic B-spline point for the four control points of one segment.
pub(crate) fn b_spline(p0: DVec3, p1: DVec3, p2: DVec3, p3: DVec3, t: f64) -> DVec3 {
	let t2 = t * t;
	let t3 = t2 * t;
	let b0 = (1.0 - t).powi(3) / 6.0;
	let b1 = (3.0 * t3 - 6.0 * t2 + 4.0) / 6.0;
	let b2 = (-3.0 * t3 + 3.0 * t2 + 3.0 * t + 1.0) / 6.0;
	let b3 = t3 / 6.0;
	p0 * b0 + p1 * b1 + p2 * b2 + p3 * b3
}

#[cfg(test)]
mod tests {
	use super::*;
	use bevy::math::DVec2;

	#[test]
	fn test_interpolate_passes_through_control_points() {
		let control = vec![
			DVec3::ZERO,
			DVec3::new(0.0, 4.0, 2.0),
			DVec3::new(0.0, 6.0, 5.0),
			DVec3::new(0.0, 0.0, 10.0),
		];
		let curve = PolyCurve::interpolate(&control, 3, 8).unwrap();

		assert_eq!(curve.points().len(), 3 * 8 + 1);
		for (i, point) in control.iter().enumerate() {
			assert!(curve.points()[i * 8].abs_diff_eq(*point, 1e-12));
		}
		assert!(!curve.is_closed());
	}

	#[test]
	fn test_interpolate_rejects_short_input() {
		let control = vec![DVec3::ZERO, DVec3::Z];
		assert_eq!(
			PolyCurve::interpolate(&control, 3, 8),
			Err(GeometryError::TooFewPoints { degree: 3, min: 4, actual: 2 })
		);
		assert_eq!(
			PolyCurve::interpolate(&control, 2, 8),
			Err(GeometryError::UnsupportedDegree(2))
		);
		assert!(PolyCurve::interpolate(&control, 1, 8).is_ok());
	}

	#[test]
	fn test_interpolate_rejects_non_finite() {
		let control = vec![DVec3::ZERO, DVec3::Z, DVec3::new(f64::NAN, 0.0, 0.0), DVec3::X];
		assert_eq!(
			PolyCurve::interpolate(&control, 3, 8),
			Err(GeometryError::NonFinitePoint { index: 2 })
		);
	}

	#[test]
	fn test_rotate_quarter_turn_about_z() {
		let curve = PolyCurve::new(vec![DVec3::new(1.0, 0.0, 3.0)], false);
		let rotated = curve.rotate(std::f64::consts::FRAC_PI_2, DVec3::Z, DVec3::ZERO).unwrap();
		assert!(rotated.points()[0].abs_diff_eq(DVec3::new(0.0, 1.0, 3.0), 1e-12));

		let curve = PolyCurve::new(vec![DVec3::X], false);
		assert_eq!(curve.rotate(1.0, DVec3::ZERO, DVec3::ZERO), Err(GeometryError::DegenerateAxis));
	}

	#[test]
	fn test_resample_open_keeps_end_points() {
		let curve = PolyCurve::new(vec![DVec3::ZERO, DVec3::new(0.0, 0.0, 3.0), DVec3::new(0.0, 3.0, 3.0)], false);
		let samples = curve.resample(7);

		assert_eq!(samples.len(), 7);
		assert!(samples[0].abs_diff_eq(DVec3::ZERO, 1e-12));
		assert!(samples[3].abs_diff_eq(DVec3::new(0.0, 0.0, 3.0), 1e-12));
		assert!(samples[6].abs_diff_eq(DVec3::new(0.0, 3.0, 3.0), 1e-12));
	}

	#[test]
	fn test_resample_closed_spacing() {
		let square = PolyCurve::new(
			vec![DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y],
			true,
		);
		let samples = square.resample(8);

		assert_eq!(samples.len(), 8);
		assert!(samples[1].abs_diff_eq(DVec3::new(0.5, 0.0, 0.0), 1e-12));
		assert!(samples[7].abs_diff_eq(DVec3::new(0.0, 0.5, 0.0), 1e-12));
	}

	#[test]
	fn test_ellipse_is_closed_and_planar() {
		let ellipse = Ellipse::horizontal(DVec3::new(0.0, 0.0, 4.0), DVec2::new(1.0, 2.0));
		let curve = PolyCurve::from_ellipse(&ellipse, 16).unwrap();

		assert!(curve.is_closed());
		assert_eq!(curve.points().len(), 16);
		assert!(curve.points().iter().all(|p| (p.z - 4.0).abs() < 1e-12));
	}

	#[test]
	fn test_b_spline_partition_of_unity() {
		let p = DVec3::splat(2.0);
		for k in 0..=4 {
			let t = k as f64 / 4.0;
			assert!(b_spline(p, p, p, p, t).abs_diff_eq(p, 1e-12));
		}
	}
}
