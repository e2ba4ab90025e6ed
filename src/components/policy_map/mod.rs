mod capabilities;
mod catalog;
mod component;
mod config;
mod geometry;
mod info_panel;
mod layout;
mod scene;
mod state;

pub use catalog::Catalog;
pub use component::PolicyMap;
pub use config::DiagramConfig;
