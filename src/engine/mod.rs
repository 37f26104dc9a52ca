pub mod key_stats;
pub mod metrics;
