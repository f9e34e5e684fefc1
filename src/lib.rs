pub mod config;
pub mod drop;
pub mod geometry;
pub mod layout;
pub mod persist;
pub mod resize;
pub mod tracing_sub;
pub mod ui;
pub mod workspace;
pub mod zones;
