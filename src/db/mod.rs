pub mod mood_records;
pub mod pool;
pub mod profiles;

pub use pool::create_pool;
