// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod embedded;
pub mod http_api;
pub mod svg_charts;
