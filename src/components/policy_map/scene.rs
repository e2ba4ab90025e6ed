use log::warn;

use super::capabilities::InputCapabilities;
use super::catalog::{Catalog, UseCaseKey};
use super::config::DiagramConfig;
use super::geometry::Point;
use super::layout::Layout;
use super::state::InteractionState;

pub const SPOKE_COLOR: &str = "#475569";
pub const RING_COLOR: &str = "#1f2937";
pub const CENTER_CARD_WIDTH: f64 = 300.0;
pub const CENTER_CARD_HEIGHT: f64 = 120.0;
pub const HUB_RADIUS: f64 = 36.0;
const HUB_SPOKE_ALPHA: f64 = 0.6;
const CONNECTOR_ALPHA: f64 = 0.8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrokeStyle {
	Solid,
	Dashed,
}

impl StrokeStyle {
	pub fn dash_array(self) -> Option<&'static str> {
		match self {
			Self::Solid => None,
			Self::Dashed => Some("3 3"),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Spoke {
	pub from: Point,
	pub to: Point,
	pub style: StrokeStyle,
	pub color: String,
	pub width: f64,
	pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ring {
	pub center: Point,
	pub radius: f64,
	pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnchorGlyph {
	pub at: Point,
	pub title: String,
	pub subtitle: String,
	pub color: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UseCaseGlyph {
	pub key: UseCaseKey,
	pub at: Point,
	pub radius: f64,
	pub label_at: Point,
	/// Line back to the owning category.
	pub connector_from: Point,
	pub connector_opacity: f64,
	pub connector_width: f64,
	pub stroke_width: f64,
	pub opacity: f64,
	pub focused: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryGlyph {
	pub id: String,
	pub color: String,
	pub at: Point,
	pub radius: f64,
	pub label_at: Point,
	pub opacity: f64,
	pub expanded: bool,
	/// Empty unless this category is expanded.
	pub use_cases: Vec<UseCaseGlyph>,
}

impl CategoryGlyph {
	pub fn use_case(&self, key: &UseCaseKey) -> Option<&UseCaseGlyph> {
		self.use_cases.iter().find(|u| &u.key == key)
	}
}

/// Everything the view draws, in paint order.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
	pub width: f64,
	pub height: f64,
	pub spokes: Vec<Spoke>,
	pub ring: Ring,
	pub center: AnchorGlyph,
	/// Hub subtitle is its badge ("baseline"), not the long subtitle.
	pub hub: AnchorGlyph,
	pub categories: Vec<CategoryGlyph>,
}

impl Scene {
	pub fn build(
		catalog: &Catalog,
		layout: &Layout,
		state: &InteractionState,
		caps: InputCapabilities,
		config: &DiagramConfig,
	) -> Self {
		let backdrop = state.backdrop_weight();
		let mut spokes = Vec::new();

		for c in catalog.categories() {
			let Some(p) = layout.category(&c.id) else {
				continue;
			};
			spokes.push(Spoke {
				from: layout.center,
				to: p.at,
				style: StrokeStyle::Dashed,
				color: SPOKE_COLOR.into(),
				width: 1.0,
				opacity: backdrop,
			});
		}
		spokes.push(Spoke {
			from: layout.center,
			to: layout.hub,
			style: StrokeStyle::Solid,
			color: catalog.hub.color.clone(),
			width: 2.0,
			opacity: backdrop,
		});
		for c in catalog.categories().iter().filter(|c| c.hub_linked) {
			let Some(p) = layout.category(&c.id) else {
				continue;
			};
			spokes.push(Spoke {
				from: layout.hub,
				to: p.at,
				style: StrokeStyle::Dashed,
				color: catalog.hub.color.clone(),
				width: 1.5,
				opacity: HUB_SPOKE_ALPHA * backdrop,
			});
		}

		let category_radius = config.category_radius(caps);
		let use_case_radius = config.use_case_radius(caps);
		let mut categories = Vec::with_capacity(catalog.categories().len());

		for c in catalog.categories() {
			let Some(p) = layout.category(&c.id) else {
				warn!("No layout position for category {:?}; skipping", c.id);
				continue;
			};
			let expanded = state.expanded() == Some(c.id.as_str());

			let use_cases = if expanded {
				c.use_case_keys()
					.filter_map(|key| {
						let Some(pos) = layout.use_case(&key) else {
							warn!("No layout position for {key:?}; skipping");
							return None;
						};
						let weight = state.use_case_weight(&key);
						let focused = state.focused() == Some(&key);
						Some(UseCaseGlyph {
							at: pos.at,
							radius: use_case_radius,
							label_at: Point::new(pos.at.x, pos.at.y - (use_case_radius + 6.0)),
							connector_from: p.at,
							connector_opacity: CONNECTOR_ALPHA * weight,
							connector_width: if focused { 2.6 } else { 1.6 },
							stroke_width: if focused { 3.0 } else { 2.0 },
							opacity: weight,
							focused,
							key,
						})
					})
					.collect()
			} else {
				Vec::new()
			};

			categories.push(CategoryGlyph {
				id: c.id.clone(),
				color: c.color.clone(),
				at: p.at,
				radius: category_radius,
				label_at: Point::new(p.at.x, p.at.y - (category_radius + 8.0)),
				opacity: state.category_weight(&c.id),
				expanded,
				use_cases,
			});
		}

		Self {
			width: config.width,
			height: config.height,
			spokes,
			ring: Ring {
				center: layout.center,
				radius: config.outer_radius,
				opacity: backdrop,
			},
			center: AnchorGlyph {
				at: layout.center,
				title: catalog.center.id.clone(),
				subtitle: catalog.center.subtitle.clone(),
				color: catalog.center.color.clone(),
			},
			hub: AnchorGlyph {
				at: layout.hub,
				title: catalog.hub.id.clone(),
				subtitle: catalog.hub.badge.clone().unwrap_or_default(),
				color: catalog.hub.color.clone(),
			},
			categories,
		}
	}

	pub fn category(&self, id: &str) -> Option<&CategoryGlyph> {
		self.categories.iter().find(|c| c.id == id)
	}

	pub fn category_ids(&self) -> Vec<String> {
		self.categories.iter().map(|c| c.id.clone()).collect()
	}
}
