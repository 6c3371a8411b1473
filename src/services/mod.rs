pub mod mood_stats;
pub mod quiz_bank;
pub mod quiz_engine;
pub mod quiz_sessions;
pub mod resources;
pub mod scoring;
pub mod tags;
