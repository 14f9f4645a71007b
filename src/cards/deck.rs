//! Deck: a fixed-capacity FIFO of cards.
//!
//! Backed by a ring of slots with front/rear cursors. Shuffling permutes
//! the raw slots, not the logical queue, so the FIFO order after a shuffle
//! is whatever the new physical layout says. Because a shuffle can move
//! empty slots anywhere, the cursors are treated as starting points:
//! `dequeue` probes forward to the next occupied slot and `enqueue` to the
//! next free one.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::{Container, EngineError, GameRng, ParticipantId};

use super::card::Card;

/// A bounded FIFO of cards owned by one participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    slots: Box<[Option<Card>]>,
    front: usize,
    rear: usize,
    len: usize,
    name: String,
    owner: ParticipantId,
}

impl Deck {
    /// Create an empty deck with a fixed capacity.
    #[must_use]
    pub fn new(name: impl Into<String>, capacity: usize, owner: ParticipantId) -> Self {
        assert!(capacity > 0, "Deck capacity must be positive");
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            front: 0,
            rear: 0,
            len: 0,
            name: name.into(),
            owner,
        }
    }

    /// Add a card at the back of the queue.
    ///
    /// Fails with `Full` when the deck is at capacity, without mutating.
    pub fn enqueue(&mut self, card: Card) -> Result<(), EngineError> {
        if self.len == self.capacity() {
            return Err(EngineError::Full(Container::Deck));
        }

        while self.slots[self.rear].is_some() {
            self.rear = (self.rear + 1) % self.capacity();
        }
        debug!("deck '{}': enqueue {} at slot {}", self.name, card.name(), self.rear);
        self.slots[self.rear] = Some(card);
        self.rear = (self.rear + 1) % self.capacity();
        self.len += 1;
        Ok(())
    }

    /// Remove and return the oldest card.
    ///
    /// Fails with `Empty` when the deck has no cards, without mutating.
    pub fn dequeue(&mut self) -> Result<Card, EngineError> {
        if self.len == 0 {
            return Err(EngineError::Empty(Container::Deck));
        }

        loop {
            let slot = self.slots[self.front].take();
            self.front = (self.front + 1) % self.capacity();
            if let Some(card) = slot {
                debug!("deck '{}': dequeue {}", self.name, card.name());
                self.len -= 1;
                return Ok(card);
            }
        }
    }

    /// Unbiased Fisher-Yates permutation of the backing storage.
    ///
    /// Operates on slots regardless of where the cursors currently point.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        for i in (1..self.slots.len()).rev() {
            let j = rng.gen_range(0..i + 1);
            self.slots.swap(i, j);
        }
        debug!("deck '{}' has been shuffled", self.name);
    }

    /// Number of cards currently in the deck.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the deck has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Fixed capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Deck name (the faction name for preset decks).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The participant this deck belongs to.
    #[must_use]
    pub fn owner(&self) -> ParticipantId {
        self.owner
    }
}
