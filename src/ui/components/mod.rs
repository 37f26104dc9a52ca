pub mod chart;
pub mod dashboard;
pub mod key_accuracy;
pub mod live_stats;
pub mod recent_tests;
pub mod selector;
pub mod typing_area;
