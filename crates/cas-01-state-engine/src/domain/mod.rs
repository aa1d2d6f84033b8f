//! Domain logic for the State Engine.

pub mod codec;
pub mod engine;
pub mod errors;

pub use codec::PersistedState;
pub use engine::StateEngine;
pub use errors::{EngineError, EngineResult};
