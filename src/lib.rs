//! # duelboard
//!
//! A turn-based two-zone card battle engine. Participants draw from a
//! personal deck into a two-slot hand, play cards onto a shared board with
//! one of the card's three attributes, and attributes resolve (at once or
//! after a scheduled delay) against captured target cards, destroying
//! them into graveyards. Rounds are scored by total board power.
//!
//! ## Design Principles
//!
//! 1. **The engine decides nothing**: humans and scripted strategies sit
//!    behind the `Participant` trait and supply decisions; the engine only
//!    consumes the decision shape.
//!
//! 2. **Events over printing**: every engine operation returns structured
//!    `BoardEvent` values. Rendering is the caller's business.
//!
//! 3. **Fail before mutating**: capacity and index violations surface as
//!    `EngineError` before the failing operation touches state.
//!
//! ## Modules
//!
//! - `core`: participant ids and maps, errors, deterministic RNG
//! - `cards`: attributes, cards, deck/hand/graveyard containers, presets
//! - `board`: zones, the timed-effect schedule, the cascade algorithm
//! - `players`: the participant capability interface and scripted seats
//! - `game`: round/game orchestration and scoring

pub mod board;
pub mod cards;
pub mod core;
pub mod game;
pub mod players;

// Re-export commonly used types
pub use crate::core::{Container, EngineError, GameRng, ParticipantId, ParticipantMap};

pub use crate::cards::{
    Attribute, AttributeKind, Card, CardUid, Deck, Faction, Graveyard, Hand, Timing,
    CARD_ATTRIBUTES, HAND_SIZE, PRESET_DECK_SIZE,
};

pub use crate::board::{Board, BoardEvent, PlayDecision, TimedEffect};

pub use crate::players::{Choice, Participant, ParticipantState, RosterEntry, ScriptedAi, Strategy};

pub use crate::game::{Game, GameOutcome, GameUpdate, RoundResult};
