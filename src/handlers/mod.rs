pub mod community;
pub mod health;
pub mod journal;
pub mod mood;
pub mod profile;
pub mod quiz;
pub mod resources;
