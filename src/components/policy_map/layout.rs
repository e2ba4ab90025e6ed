use std::collections::HashMap;
use std::f64::consts::PI;

use super::catalog::{Catalog, UseCaseKey};
use super::config::DiagramConfig;
use super::geometry::{Point, fan_positions, polar};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutPosition {
	pub at: Point,
	pub angle: Option<f64>,
}

/// Node positions derived from the catalog and the current config. Never
/// authoritative; rebuilt whenever the config changes.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
	pub center: Point,
	pub hub: Point,
	categories: HashMap<String, LayoutPosition>,
	use_cases: HashMap<UseCaseKey, LayoutPosition>,
}

impl Layout {
	pub fn compute(catalog: &Catalog, config: &DiagramConfig) -> Self {
		let center = config.center();
		let hub = polar(center, config.inner_radius, config.hub_angle);
		let n = catalog.categories().len();

		let mut categories = HashMap::with_capacity(n);
		let mut use_cases = HashMap::new();
		for (i, category) in catalog.categories().iter().enumerate() {
			let angle = (i as f64 / n as f64) * PI * 2.0 + config.ring_rotation;
			categories.insert(
				category.id.clone(),
				LayoutPosition {
					at: polar(center, config.outer_radius, angle),
					angle: Some(angle),
				},
			);

			let fan = fan_positions(
				center,
				angle,
				config.outer_radius,
				category.use_cases.len(),
				config.fan_spacing,
				config.fan_offset,
			);
			for (key, p) in category.use_case_keys().zip(fan) {
				use_cases.insert(
					key,
					LayoutPosition {
						at: p.at,
						angle: Some(p.angle),
					},
				);
			}
		}

		Self {
			center,
			hub,
			categories,
			use_cases,
		}
	}

	pub fn category(&self, id: &str) -> Option<&LayoutPosition> {
		self.categories.get(id)
	}

	pub fn use_case(&self, key: &UseCaseKey) -> Option<&LayoutPosition> {
		self.use_cases.get(key)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn builtin() -> (Catalog, DiagramConfig) {
		let catalog = Catalog::builtin().unwrap();
		let config = catalog.layout.clone();
		(catalog, config)
	}

	#[test]
	fn center_and_hub_positions() {
		let (catalog, config) = builtin();
		let layout = Layout::compute(&catalog, &config);
		assert_eq!(layout.center, Point::new(600.0, 350.0));
		assert!((layout.hub.x - 600.0).abs() < 1e-9);
		assert!((layout.hub.y - 470.0).abs() < 1e-9);
	}

	#[test]
	fn first_category_sits_at_top_of_ring() {
		let (catalog, config) = builtin();
		let layout = Layout::compute(&catalog, &config);
		let first = layout
			.category("Digital Governance & Technology Policy")
			.unwrap();
		assert!((first.at.x - 600.0).abs() < 1e-9);
		assert!((first.at.y - 50.0).abs() < 1e-9);
		assert_eq!(first.angle, Some(-PI / 2.0));
	}

	#[test]
	fn categories_sit_on_outer_ring() {
		let (catalog, config) = builtin();
		let layout = Layout::compute(&catalog, &config);
		for c in catalog.categories() {
			let p = layout.category(&c.id).unwrap();
			assert!((p.at.distance(layout.center) - 300.0).abs() < 1e-6);
		}
	}

	#[test]
	fn use_cases_fan_around_their_category() {
		let (catalog, config) = builtin();
		let layout = Layout::compute(&catalog, &config);
		let id = "Healthcare & Medical Records";
		let base = layout.category(id).unwrap().angle.unwrap();
		let expected = fan_positions(layout.center, base, 300.0, 2, 0.28, 95.0);

		let health = catalog.category(id).unwrap();
		for (key, want) in health.use_case_keys().zip(expected) {
			let got = layout.use_case(&key).unwrap();
			assert_eq!(got.at, want.at);
			assert_eq!(got.angle, Some(want.angle));
		}
	}

	#[test]
	fn radius_change_moves_nodes() {
		let (catalog, config) = builtin();
		let wide = Layout::compute(&catalog, &config);
		let tight = Layout::compute(
			&catalog,
			&DiagramConfig {
				outer_radius: 200.0,
				..config
			},
		);
		assert_ne!(wide, tight);
		let p = tight.category("Democracy & Electoral Systems").unwrap();
		assert!((p.at.distance(tight.center) - 200.0).abs() < 1e-6);
	}

	#[test]
	fn unknown_ids_have_no_position() {
		let (catalog, config) = builtin();
		let layout = Layout::compute(&catalog, &config);
		assert!(layout.category("Space Policy").is_none());
		assert!(
			layout
				.use_case(&UseCaseKey::new("Healthcare & Medical Records", "Teleportation"))
				.is_none()
		);
	}
}
