use std::f64::consts::PI;
use std::time::Duration;

use serde::Deserialize;

use super::capabilities::InputCapabilities;
use super::geometry::Point;

/// Room left around the use-case fan for labels in the compact canvas.
const COMPACT_MARGIN: f64 = 60.0;

/// Layout and timing parameters for the map. Every field can be overridden
/// from the catalog's `[layout]` table.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagramConfig {
	pub width: f64,
	pub height: f64,
	pub inner_radius: f64,
	pub outer_radius: f64,
	pub hub_angle: f64,
	pub ring_rotation: f64,
	pub fan_spacing: f64,
	pub fan_offset: f64,
	pub collapse_delay_ms: u64,
	pub category_radius: f64,
	pub category_radius_coarse: f64,
	pub use_case_radius: f64,
	pub use_case_radius_coarse: f64,
	pub compact_breakpoint: f64,
}

impl Default for DiagramConfig {
	fn default() -> Self {
		Self {
			width: 1200.0,
			height: 700.0,
			inner_radius: 120.0,
			outer_radius: 300.0,
			hub_angle: PI / 2.0,
			ring_rotation: -PI / 2.0,
			fan_spacing: 0.28,
			fan_offset: 95.0,
			collapse_delay_ms: 260,
			category_radius: 26.0,
			category_radius_coarse: 30.0,
			use_case_radius: 18.0,
			use_case_radius_coarse: 22.0,
			compact_breakpoint: 768.0,
		}
	}
}

impl DiagramConfig {
	pub fn center(&self) -> Point {
		Point::new(self.width / 2.0, self.height / 2.0)
	}

	pub fn collapse_delay(&self) -> Duration {
		Duration::from_millis(self.collapse_delay_ms)
	}

	// Touch targets grow; ring geometry does not.
	pub fn category_radius(&self, caps: InputCapabilities) -> f64 {
		if caps.coarse {
			self.category_radius_coarse
		} else {
			self.category_radius
		}
	}

	pub fn use_case_radius(&self, caps: InputCapabilities) -> f64 {
		if caps.coarse {
			self.use_case_radius_coarse
		} else {
			self.use_case_radius
		}
	}

	/// Narrow viewports get a square canvas just large enough for the
	/// outermost fan, so the browser can scale it down without letterboxing.
	pub fn for_viewport(&self, viewport_width: f64) -> Self {
		if viewport_width >= self.compact_breakpoint {
			return self.clone();
		}
		let reach = self.outer_radius
			+ self.fan_offset
			+ self.use_case_radius_coarse.max(self.use_case_radius)
			+ COMPACT_MARGIN;
		let side = 2.0 * reach;
		Self {
			width: side,
			height: side,
			..self.clone()
		}
	}

	pub fn validate(&self) -> Result<(), &'static str> {
		let sizes = [
			self.width,
			self.height,
			self.inner_radius,
			self.outer_radius,
			self.category_radius,
			self.category_radius_coarse,
			self.use_case_radius,
			self.use_case_radius_coarse,
		];
		if sizes.iter().any(|v| !v.is_finite() || *v <= 0.0) {
			return Err("sizes and radii must be positive and finite");
		}
		if ![
			self.hub_angle,
			self.ring_rotation,
			self.fan_spacing,
			self.fan_offset,
		]
		.iter()
		.all(|v| v.is_finite())
		{
			return Err("angles and offsets must be finite");
		}
		if self.inner_radius >= self.outer_radius {
			return Err("inner_radius must be smaller than outer_radius");
		}
		Ok(())
	}
}
