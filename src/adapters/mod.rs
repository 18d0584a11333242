// Adapters layer: concrete implementations for external systems (http, files).

pub mod http;
pub mod snapshot;
