use log::debug;

use super::capabilities::InputCapabilities;
use super::catalog::UseCaseKey;

pub const FULL_WEIGHT: f64 = 1.0;
pub const FOCUS_PARENT_WEIGHT: f64 = 0.6;
pub const SIBLING_WEIGHT: f64 = 0.45;
pub const BACKDROP_DIM_WEIGHT: f64 = 0.35;
pub const DIM_WEIGHT: f64 = 0.25;

/// Which category is open, and which of its use cases is focused.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Expansion {
	#[default]
	Idle,
	Expanded(String),
	/// The key's category is the expanded one.
	Focused(UseCaseKey),
}

impl Expansion {
	pub fn category(&self) -> Option<&str> {
		match self {
			Self::Idle => None,
			Self::Expanded(id) => Some(id),
			Self::Focused(key) => Some(&key.category),
		}
	}

	pub fn focused(&self) -> Option<&UseCaseKey> {
		match self {
			Self::Focused(key) => Some(key),
			_ => None,
		}
	}

	fn unfocus(&mut self) {
		if let Self::Focused(key) = self {
			*self = Self::Expanded(std::mem::take(&mut key.category));
		}
	}
}

/// What the info panel describes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SelectedNode {
	/// The center-to-hub pairing shown before anything is picked.
	#[default]
	Overview,
	Center,
	Hub,
	Category(String),
	UseCase(UseCaseKey),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
	Center,
	Hub,
}

/// Identifies one scheduled collapse. Only the most recently issued ticket
/// can collapse the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollapseTicket(u64);

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionState {
	expansion: Expansion,
	selected: SelectedNode,
	pending_collapse: Option<CollapseTicket>,
	issued: u64,
}

impl InteractionState {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn expanded(&self) -> Option<&str> {
		self.expansion.category()
	}

	pub fn focused(&self) -> Option<&UseCaseKey> {
		self.expansion.focused()
	}

	pub fn selected(&self) -> &SelectedNode {
		&self.selected
	}

	pub fn hover_enter(&mut self, category: &str, caps: InputCapabilities) {
		if !caps.hover {
			return;
		}
		if self.pending_collapse.take().is_some() {
			debug!("Collapse cancelled by hover on {category:?}");
		}
		if self.expansion.category() != Some(category) {
			debug!("Expand {category:?}");
			self.expansion = Expansion::Expanded(category.to_owned());
		}
	}

	/// Returns a ticket when leaving the open category; the map collapses
	/// only if that ticket is handed back to [`Self::collapse_elapsed`]
	/// before anything cancels it.
	pub fn hover_leave(&mut self, category: &str, caps: InputCapabilities) -> Option<CollapseTicket> {
		if !caps.hover || self.expansion.category() != Some(category) {
			return None;
		}
		self.issued += 1;
		let ticket = CollapseTicket(self.issued);
		self.pending_collapse = Some(ticket);
		Some(ticket)
	}

	pub fn collapse_elapsed(&mut self, ticket: CollapseTicket) -> bool {
		if self.pending_collapse != Some(ticket) {
			return false;
		}
		debug!("Collapse {:?}", self.expansion.category());
		self.pending_collapse = None;
		self.expansion = Expansion::Idle;
		true
	}

	/// Keyboard focus moving into a category's group. On hover devices the
	/// fan opens the same way it does for the pointer, so its use cases can
	/// be tabbed to; without hover, activation already toggles it.
	pub fn focus_enter(&mut self, category: &str, caps: InputCapabilities) {
		self.hover_enter(category, caps);
	}

	/// Focus leaving a category's group; same grace period as the pointer.
	pub fn focus_leave(&mut self, category: &str, caps: InputCapabilities) -> Option<CollapseTicket> {
		self.hover_leave(category, caps)
	}

	/// Click or Enter/Space on a category. With hover the category is
	/// already open, so this selects it; on touch it toggles the fan.
	pub fn activate_category(&mut self, category: &str, caps: InputCapabilities) {
		if caps.hover {
			self.expansion.unfocus();
			self.selected = SelectedNode::Category(category.to_owned());
			return;
		}
		self.pending_collapse = None;
		if self.expansion.category() == Some(category) {
			debug!("Collapse {category:?}");
			self.expansion = Expansion::Idle;
		} else {
			debug!("Expand {category:?}");
			self.expansion = Expansion::Expanded(category.to_owned());
		}
	}

	/// Use cases are only reachable while their category is open; anything
	/// else is ignored.
	pub fn activate_use_case(&mut self, key: &UseCaseKey) -> bool {
		if self.expansion.category() != Some(key.category.as_str()) {
			debug!("Ignoring {key:?}: category not expanded");
			return false;
		}
		debug!("Focus {key:?}");
		self.selected = SelectedNode::UseCase(key.clone());
		self.expansion = Expansion::Focused(key.clone());
		true
	}

	pub fn select_anchor(&mut self, anchor: Anchor) {
		self.expansion.unfocus();
		self.selected = match anchor {
			Anchor::Center => SelectedNode::Center,
			Anchor::Hub => SelectedNode::Hub,
		};
	}

	/// Background click: closes the fan and drops focus. The panel keeps
	/// showing the last selection.
	pub fn dismiss(&mut self) {
		if self.expansion != Expansion::Idle {
			debug!("Dismiss {:?}", self.expansion);
		}
		self.expansion = Expansion::Idle;
		self.pending_collapse = None;
	}

	pub fn category_weight(&self, id: &str) -> f64 {
		match self.focused() {
			None => FULL_WEIGHT,
			Some(key) if key.category == id => FOCUS_PARENT_WEIGHT,
			Some(_) => DIM_WEIGHT,
		}
	}

	pub fn use_case_weight(&self, key: &UseCaseKey) -> f64 {
		match self.focused() {
			None => FULL_WEIGHT,
			Some(focused) if focused == key => FULL_WEIGHT,
			Some(focused) if focused.category == key.category => SIBLING_WEIGHT,
			Some(_) => DIM_WEIGHT,
		}
	}

	/// Ring and spokes.
	pub fn backdrop_weight(&self) -> f64 {
		if self.focused().is_some() {
			BACKDROP_DIM_WEIGHT
		} else {
			FULL_WEIGHT
		}
	}
}
