pub mod connection;
pub mod flow;

pub use connection::{ConnectionProfile, YamlCredentials, load_connections};
pub use flow::load_flow_config;
