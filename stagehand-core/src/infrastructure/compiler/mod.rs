pub mod discovery;
pub mod jinja;

pub use discovery::TemplateDiscovery;
pub use jinja::SqlRenderer;
