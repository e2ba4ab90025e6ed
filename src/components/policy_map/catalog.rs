use std::collections::{BTreeMap, HashSet};

use log::info;
use serde::Deserialize;
use thiserror::Error;

use super::config::DiagramConfig;

pub const CATALOG_VERSION: u32 = 1;

const BUILTIN_CATALOG: &str = include_str!("catalog.toml");

/// The center card and the hub share a shape; only their placement differs.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnchorNode {
	pub id: String,
	pub subtitle: String,
	pub color: String,
	pub description: String,
	#[serde(default)]
	pub badge: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UseCaseNode {
	pub id: String,
	pub description: String,
}

/// Identifies a use case by its owning category.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UseCaseKey {
	pub category: String,
	pub use_case: String,
}

impl UseCaseKey {
	pub fn new(category: impl Into<String>, use_case: impl Into<String>) -> Self {
		Self {
			category: category.into(),
			use_case: use_case.into(),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Category {
	pub id: String,
	pub color: String,
	pub description: String,
	pub hub_linked: bool,
	pub use_cases: Vec<UseCaseNode>,
}

impl Category {
	pub fn use_case(&self, id: &str) -> Option<&UseCaseNode> {
		self.use_cases.iter().find(|u| u.id == id)
	}

	pub fn use_case_keys(&self) -> impl Iterator<Item = UseCaseKey> + '_ {
		self.use_cases
			.iter()
			.map(|u| UseCaseKey::new(&self.id, &u.id))
	}
}

#[derive(Error, Debug)]
pub enum CatalogError {
	#[error("Catalog parse error: {0}")]
	Parse(#[from] toml::de::Error),
	#[error("Unsupported catalog version {found}")]
	UnsupportedVersion { found: u32 },
	#[error("Catalog has no categories")]
	Empty,
	#[error("Duplicate category {0:?}")]
	DuplicateCategory(String),
	#[error("Use cases listed under unknown category {0:?}")]
	UnknownUseCaseCategory(String),
	#[error("Duplicate use case {use_case:?} under {category:?}")]
	DuplicateUseCase { category: String, use_case: String },
	#[error("Hub link to unknown category {0:?}")]
	UnknownHubLink(String),
	#[error("Invalid layout: {0}")]
	InvalidLayout(&'static str),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCategory {
	id: String,
	color: String,
	description: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCatalog {
	version: u32,
	overview: String,
	center: AnchorNode,
	hub: AnchorNode,
	#[serde(default)]
	hub_links: Vec<String>,
	categories: Vec<RawCategory>,
	#[serde(default)]
	use_cases: BTreeMap<String, Vec<UseCaseNode>>,
	#[serde(default)]
	layout: DiagramConfig,
}

/// Read-only content of the map, validated once at load.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
	pub version: u32,
	pub overview: String,
	pub center: AnchorNode,
	pub hub: AnchorNode,
	pub layout: DiagramConfig,
	categories: Vec<Category>,
}

impl Catalog {
	/// The catalog compiled into the binary.
	pub fn builtin() -> Result<Self, CatalogError> {
		let catalog = Self::from_toml(BUILTIN_CATALOG)?;
		info!(
			"Loaded catalog v{} with {} categories",
			catalog.version,
			catalog.categories.len()
		);
		Ok(catalog)
	}

	pub fn from_toml(source: &str) -> Result<Self, CatalogError> {
		let raw: RawCatalog = toml::from_str(source)?;
		Self::validate(raw)
	}

	fn validate(raw: RawCatalog) -> Result<Self, CatalogError> {
		if raw.version != CATALOG_VERSION {
			return Err(CatalogError::UnsupportedVersion { found: raw.version });
		}
		if raw.categories.is_empty() {
			return Err(CatalogError::Empty);
		}
		raw.layout.validate().map_err(CatalogError::InvalidLayout)?;

		let mut seen = HashSet::new();
		for c in &raw.categories {
			if !seen.insert(c.id.as_str()) {
				return Err(CatalogError::DuplicateCategory(c.id.clone()));
			}
		}
		if let Some(id) = raw.use_cases.keys().find(|id| !seen.contains(id.as_str())) {
			return Err(CatalogError::UnknownUseCaseCategory(id.clone()));
		}
		if let Some(id) = raw.hub_links.iter().find(|id| !seen.contains(id.as_str())) {
			return Err(CatalogError::UnknownHubLink(id.clone()));
		}

		let hub_links: HashSet<&str> = raw.hub_links.iter().map(String::as_str).collect();
		let mut use_cases = raw.use_cases;
		let mut categories = Vec::with_capacity(raw.categories.len());
		for c in raw.categories {
			let children = use_cases.remove(&c.id).unwrap_or_default();
			let mut ids = HashSet::new();
			if let Some(dup) = children.iter().find(|u| !ids.insert(u.id.as_str())) {
				return Err(CatalogError::DuplicateUseCase {
					category: c.id.clone(),
					use_case: dup.id.clone(),
				});
			}
			categories.push(Category {
				hub_linked: hub_links.contains(c.id.as_str()),
				id: c.id,
				color: c.color,
				description: c.description,
				use_cases: children,
			});
		}

		Ok(Self {
			version: raw.version,
			overview: raw.overview,
			center: raw.center,
			hub: raw.hub,
			layout: raw.layout,
			categories,
		})
	}

	pub fn categories(&self) -> &[Category] {
		&self.categories
	}

	pub fn category(&self, id: &str) -> Option<&Category> {
		self.categories.iter().find(|c| c.id == id)
	}

	pub fn use_case(&self, key: &UseCaseKey) -> Option<&UseCaseNode> {
		self.category(&key.category)?.use_case(&key.use_case)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const MINIMAL: &str = r##"
version = 1
overview = "overview"
hub_links = ["B"]

[center]
id = "Core"
subtitle = "sub"
color = "#000"
description = "core"

[hub]
id = "Hub"
subtitle = "sub"
color = "#111"
description = "hub"

[[categories]]
id = "A"
color = "#a00"
description = "a"

[[categories]]
id = "B"
color = "#b00"
description = "b"

[use_cases]
A = [{ id = "a1", description = "first" }, { id = "a2", description = "second" }]
"##;

	fn with_extra(extra: &str) -> String {
		format!("{MINIMAL}{extra}")
	}

	#[test]
	fn builtin_catalog_loads() {
		let catalog = Catalog::builtin().unwrap();
		assert_eq!(catalog.version, CATALOG_VERSION);
		assert_eq!(catalog.center.id, "Identity Layer");
		assert_eq!(catalog.hub.id, "RUBI");
		assert_eq!(catalog.hub.badge.as_deref(), Some("baseline"));
		assert_eq!(catalog.categories().len(), 12);
		assert_eq!(
			catalog.categories().iter().filter(|c| c.hub_linked).count(),
			6
		);
		assert_eq!(catalog.layout, DiagramConfig::default());
	}

	#[test]
	fn builtin_keeps_category_order_and_children() {
		let catalog = Catalog::builtin().unwrap();
		assert_eq!(
			catalog.categories()[0].id,
			"Digital Governance & Technology Policy"
		);
		let health = catalog.category("Healthcare & Medical Records").unwrap();
		let ids: Vec<&str> = health.use_cases.iter().map(|u| u.id.as_str()).collect();
		assert_eq!(
			ids,
			["Medical Record Portability", "Vaccination Credentials"]
		);
		assert!(!health.hub_linked);
	}

	#[test]
	fn minimal_catalog_links_children() {
		let catalog = Catalog::from_toml(MINIMAL).unwrap();
		let a = catalog.category("A").unwrap();
		assert_eq!(a.use_cases.len(), 2);
		assert!(!a.hub_linked);
		assert!(catalog.category("B").unwrap().hub_linked);
		assert!(catalog.category("B").unwrap().use_cases.is_empty());
		assert_eq!(
			catalog
				.use_case(&UseCaseKey::new("A", "a2"))
				.map(|u| u.description.as_str()),
			Some("second")
		);
		assert!(catalog.use_case(&UseCaseKey::new("B", "a2")).is_none());
	}

	#[test]
	fn rejects_use_cases_for_unknown_category() {
		let source = MINIMAL.replace("\nA = [", "\nZ = [");
		assert!(matches!(
			Catalog::from_toml(&source),
			Err(CatalogError::UnknownUseCaseCategory(id)) if id == "Z"
		));
	}

	#[test]
	fn rejects_unknown_hub_link() {
		let source = MINIMAL.replace(r#"hub_links = ["B"]"#, r#"hub_links = ["C"]"#);
		assert!(matches!(
			Catalog::from_toml(&source),
			Err(CatalogError::UnknownHubLink(id)) if id == "C"
		));
	}

	#[test]
	fn rejects_duplicate_category() {
		let source = MINIMAL.replace(r#"id = "B""#, r#"id = "A""#);
		assert!(matches!(
			Catalog::from_toml(&source),
			Err(CatalogError::DuplicateCategory(id)) if id == "A"
		));
	}

	#[test]
	fn rejects_duplicate_use_case() {
		let source = MINIMAL.replace(r#"id = "a2""#, r#"id = "a1""#);
		assert!(matches!(
			Catalog::from_toml(&source),
			Err(CatalogError::DuplicateUseCase { category, use_case })
				if category == "A" && use_case == "a1"
		));
	}

	#[test]
	fn rejects_other_versions() {
		let source = MINIMAL.replace("version = 1", "version = 2");
		assert!(matches!(
			Catalog::from_toml(&source),
			Err(CatalogError::UnsupportedVersion { found: 2 })
		));
	}

	#[test]
	fn rejects_empty_ring() {
		let source = r##"
version = 1
overview = ""
categories = []
[center]
id = "c"
subtitle = ""
color = "#000"
description = ""
[hub]
id = "h"
subtitle = ""
color = "#000"
description = ""
"##;
		assert!(matches!(Catalog::from_toml(source), Err(CatalogError::Empty)));
	}

	#[test]
	fn layout_table_overrides_defaults() {
		let catalog =
			Catalog::from_toml(&with_extra("\n[layout]\nouter_radius = 250.0\n")).unwrap();
		assert_eq!(catalog.layout.outer_radius, 250.0);
		assert_eq!(catalog.layout.inner_radius, 120.0);
	}

	#[test]
	fn rejects_invalid_layout() {
		let source = with_extra("\n[layout]\ninner_radius = 500.0\n");
		assert!(matches!(
			Catalog::from_toml(&source),
			Err(CatalogError::InvalidLayout(_))
		));
	}

	#[test]
	fn rejects_unknown_fields() {
		let source = MINIMAL.replace("overview = \"overview\"", "overview = \"o\"\ncolour = 1");
		assert!(matches!(
			Catalog::from_toml(&source),
			Err(CatalogError::Parse(_))
		));
	}
}
