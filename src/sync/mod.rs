pub mod codec;
pub mod engine;
pub mod tickets;

pub use engine::SyncEngine;
