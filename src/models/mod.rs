pub mod community;
pub mod journal;
pub mod mood_record;
pub mod profile;
