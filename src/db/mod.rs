pub mod initialize;
pub mod local_storage;
pub mod log;
pub mod migrate;
pub mod pool;
