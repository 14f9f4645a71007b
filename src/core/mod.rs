//! Core engine types: participants, errors, RNG.
//!
//! Everything in here is independent of the card game rules; the rules
//! modules build on these primitives.

pub mod error;
pub mod participant;
pub mod rng;

pub use error::{Container, EngineError};
pub use participant::{ParticipantId, ParticipantMap};
pub use rng::GameRng;
