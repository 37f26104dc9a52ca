// Library target for integration tests and criterion benchmarks. The binary
// entry point is main.rs, which declares the same module tree.

pub mod app;
pub mod config;
pub mod engine;
pub mod event;
pub mod generator;
pub mod session;
pub mod store;
pub mod ui;
