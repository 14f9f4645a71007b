//! Graveyard: where destroyed cards end up.
//!
//! An unbounded ordered list, one per participant. Adding a card marks it
//! as buried; taking it back out clears the mark.

use serde::{Deserialize, Serialize};

use crate::core::EngineError;

use super::card::Card;

/// A participant's pile of destroyed cards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graveyard {
    cards: Vec<Card>,
}

impl Graveyard {
    /// Create an empty graveyard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a card and mark it as buried.
    pub fn add(&mut self, mut card: Card) {
        card.set_in_graveyard(true);
        self.cards.push(card);
    }

    /// Remove the card at a position, clearing its burial mark.
    pub fn remove_at(&mut self, index: usize) -> Result<Card, EngineError> {
        if index >= self.cards.len() {
            return Err(EngineError::NoCardAtIndex(index));
        }
        let mut card = self.cards.remove(index);
        card.set_in_graveyard(false);
        Ok(card)
    }

    /// Whether a card with the given board identity rests here.
    #[must_use]
    pub fn contains(&self, card: &Card) -> bool {
        match card.uid() {
            Some(uid) => self.cards.iter().any(|c| c.uid() == Some(uid)),
            None => false,
        }
    }

    /// Number of buried cards.
    #[must_use]
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    /// Iterate over buried cards in burial order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}
