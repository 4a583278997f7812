pub mod pool;

pub use pool::create_pool;
pub use pool::run_migrations;
