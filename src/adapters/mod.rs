// Adapters layer: concrete implementations of the domain ports.

pub mod http_gateway;

pub use http_gateway::HttpGateway;
