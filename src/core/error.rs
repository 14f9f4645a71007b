//! Engine error taxonomy.
//!
//! Every variant is a contract violation surfaced to the caller before the
//! failing operation mutates anything. Nothing here is retried internally;
//! re-prompting on bad input is the orchestrator's job.

use serde::{Deserialize, Serialize};

/// The bounded container an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Container {
    Deck,
    Hand,
}

impl std::fmt::Display for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Container::Deck => write!(f, "deck"),
            Container::Hand => write!(f, "hand"),
        }
    }
}

/// Errors raised by engine operations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineError {
    /// A bounded container is at capacity.
    Full(Container),

    /// A bounded container has no cards to give.
    Empty(Container),

    /// A hand or graveyard slot was addressed but holds no card.
    NoCardAtIndex(usize),

    /// A decision named a target slot past the target zone's card count.
    /// The orchestrator must validate slots against `Board::card_count`
    /// before constructing the decision.
    InvalidTargetIndex { index: usize, cards_on_board: usize },

    /// A decision named an attribute slot outside the card's fixed three.
    InvalidAttributeIndex(usize),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::Full(c) => write!(f, "{c} is full"),
            EngineError::Empty(c) => write!(f, "{c} is empty"),
            EngineError::NoCardAtIndex(i) => {
                write!(f, "no card at index {i}")
            }
            EngineError::InvalidTargetIndex { index, cards_on_board } => {
                write!(
                    f,
                    "target index {index} is out of range for a zone of {cards_on_board} cards"
                )
            }
            EngineError::InvalidAttributeIndex(i) => {
                write!(f, "attribute index {i} is outside the card's three attributes")
            }
        }
    }
}

impl std::error::Error for EngineError {}
