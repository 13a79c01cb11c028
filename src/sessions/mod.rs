pub mod link;

pub use link::{LinkOutcome, LinkState, SessionEdit, SessionLinker};
