#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	#[cfg(test)]
	pub fn distance(self, other: Point) -> f64 {
		(self.x - other.x).hypot(self.y - other.y)
	}
}

/// A point placed on a fan, along with the angle it was placed at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FanPosition {
	pub at: Point,
	pub angle: f64,
}

pub fn polar(center: Point, radius: f64, angle: f64) -> Point {
	Point::new(
		center.x + radius * angle.cos(),
		center.y + radius * angle.sin(),
	)
}

/// Spreads `count` points symmetrically around `base_angle`, `fan_spacing`
/// radians apart, at `base_radius + radius_offset` from `center`.
///
/// The first point sits at `base_angle - ((count - 1) / 2) * fan_spacing` and
/// the output follows input order.
pub fn fan_positions(
	center: Point,
	base_angle: f64,
	base_radius: f64,
	count: usize,
	fan_spacing: f64,
	radius_offset: f64,
) -> Vec<FanPosition> {
	if count == 0 {
		return Vec::new();
	}
	let start = -((count - 1) as f64 / 2.0) * fan_spacing;
	let radius = base_radius + radius_offset;

	(0..count)
		.map(|i| {
			let angle = base_angle + start + i as f64 * fan_spacing;
			FanPosition {
				at: polar(center, radius, angle),
				angle,
			}
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use std::f64::consts::PI;

	use super::*;

	const EPS: f64 = 1e-9;

	fn close(a: f64, b: f64) -> bool {
		(a - b).abs() < EPS
	}

	#[test]
	fn polar_keeps_requested_distance() {
		let center = Point::new(600.0, 350.0);
		for &radius in &[0.0, 1.0, 95.5, 300.0, 1e4] {
			for step in 0..24 {
				let angle = step as f64 * PI / 7.0 - 3.0;
				let p = polar(center, radius, angle);
				assert!(
					(center.distance(p) - radius).abs() < 1e-6,
					"radius {radius} angle {angle}"
				);
			}
		}
	}

	#[test]
	fn polar_points_down_at_half_pi() {
		// screen coordinates: +y is down
		let p = polar(Point::new(10.0, 10.0), 5.0, PI / 2.0);
		assert!(close(p.x, 10.0));
		assert!(close(p.y, 15.0));
	}

	#[test]
	fn empty_fan() {
		assert!(fan_positions(Point::default(), 1.0, 300.0, 0, 0.28, 95.0).is_empty());
	}

	#[test]
	fn fan_returns_one_position_per_child() {
		for n in 1..=9 {
			assert_eq!(
				fan_positions(Point::default(), 0.3, 300.0, n, 0.28, 95.0).len(),
				n
			);
		}
	}

	#[test]
	fn single_child_sits_on_base_angle() {
		let fan = fan_positions(Point::new(1.0, 2.0), 0.7, 300.0, 1, 0.28, 95.0);
		assert!(close(fan[0].angle, 0.7));
		assert!(close(fan[0].at.distance(Point::new(1.0, 2.0)), 395.0));
	}

	#[test]
	fn pair_is_symmetric_around_base_angle() {
		let base = -PI / 2.0;
		let fan = fan_positions(Point::default(), base, 300.0, 2, 0.28, 95.0);
		assert!(close(fan[0].angle, base - 0.14));
		assert!(close(fan[1].angle, base + 0.14));
		assert!(close(fan[1].angle - fan[0].angle, 0.28));
	}

	#[test]
	fn odd_fan_starts_at_offset_formula() {
		let fan = fan_positions(Point::default(), 1.0, 10.0, 5, 0.1, 0.0);
		let angles: Vec<f64> = fan.iter().map(|p| p.angle).collect();
		let expected = [0.8, 0.9, 1.0, 1.1, 1.2];
		for (a, e) in angles.iter().zip(expected) {
			assert!((a - e).abs() < 1e-12, "{angles:?}");
		}
	}
}
