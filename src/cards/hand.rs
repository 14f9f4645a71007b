//! Hand: two stable card slots.
//!
//! Unlike the deck, the hand is not a queue. A card keeps its slot index
//! until it is removed, and new cards land in the lowest free slot.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::{Container, EngineError};

use super::card::Card;

/// Fixed hand capacity. The first-occupied-slot rule below is specific to
/// this value; do not grow it without revisiting that rule.
pub const HAND_SIZE: usize = 2;

/// A participant's hand of playable cards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    slots: [Option<Card>; HAND_SIZE],
    count: usize,
}

impl Hand {
    /// Create an empty hand.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a card in the lowest free slot.
    ///
    /// Fails with `Full` when both slots are taken, without mutating.
    pub fn add_card(&mut self, card: Card) -> Result<(), EngineError> {
        if self.count == HAND_SIZE {
            return Err(EngineError::Full(Container::Hand));
        }

        for (i, slot) in self.slots.iter_mut().enumerate() {
            if slot.is_none() {
                debug!("hand: added {} at slot {}", card.name(), i);
                *slot = Some(card);
                self.count += 1;
                return Ok(());
            }
        }

        unreachable!("hand count under capacity but no free slot");
    }

    /// Remove and return the card at a slot.
    ///
    /// Fails with `Empty` when the hand holds nothing at all, and with
    /// `NoCardAtIndex` when that particular slot is free.
    pub fn remove_at(&mut self, index: usize) -> Result<Card, EngineError> {
        if self.count == 0 {
            return Err(EngineError::Empty(Container::Hand));
        }

        let card = self
            .slots
            .get_mut(index)
            .and_then(Option::take)
            .ok_or(EngineError::NoCardAtIndex(index))?;
        self.count -= 1;
        Ok(card)
    }

    /// Whether a slot currently holds a card.
    #[must_use]
    pub fn has_card_at(&self, index: usize) -> bool {
        self.slots.get(index).map_or(false, Option::is_some)
    }

    /// Borrow the card at a slot.
    #[must_use]
    pub fn card_at(&self, index: usize) -> Option<&Card> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// The lowest occupied slot. Defaults to 1 when slot 0 is free, since
    /// a two-slot hand has nowhere else left.
    #[must_use]
    pub fn first_occupied_index(&self) -> usize {
        if self.slots[0].is_some() {
            0
        } else {
            1
        }
    }

    /// Number of cards held.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Iterate over occupied slots as (index, card) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Card)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|c| (i, c)))
    }
}
