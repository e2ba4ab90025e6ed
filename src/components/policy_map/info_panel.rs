use std::sync::Arc;

use leptos::prelude::*;

use super::catalog::Catalog;
use super::state::SelectedNode;

pub const ARROW: &str = "→";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelContent {
	pub title: String,
	pub body: String,
}

impl PanelContent {
	pub fn resolve(catalog: &Catalog, selected: &SelectedNode) -> Self {
		let overview = || Self {
			title: format!("{} {ARROW} {}", catalog.center.id, catalog.hub.id),
			body: catalog.overview.clone(),
		};
		let anchor = |title: &str, body: &str| Self {
			title: title.to_owned(),
			body: body.to_owned(),
		};

		match selected {
			SelectedNode::Overview => overview(),
			SelectedNode::Center => anchor(&catalog.center.id, &catalog.center.description),
			SelectedNode::Hub => anchor(&catalog.hub.id, &catalog.hub.description),
			SelectedNode::Category(id) => catalog
				.category(id)
				.map(|c| anchor(&c.id, &c.description))
				.unwrap_or_else(overview),
			SelectedNode::UseCase(key) => catalog
				.use_case(key)
				.map(|u| Self {
					title: format!("{} {ARROW} {}", key.category, u.id),
					body: u.description.clone(),
				})
				.unwrap_or_else(overview),
		}
	}
}

#[component]
pub fn InfoPanel(catalog: Arc<Catalog>, #[prop(into)] selected: Signal<SelectedNode>) -> impl IntoView {
	let content = Memo::new(move |_| selected.with(|s| PanelContent::resolve(&catalog, s)));

	view! {
		<aside class="info-panel" aria-live="polite">
			<div class="info-panel-title">{move || content.with(|c| c.title.clone())}</div>
			<div class="info-panel-body">{move || content.with(|c| c.body.clone())}</div>
		</aside>
	}
}
