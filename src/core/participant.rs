//! Participant identification and per-participant data storage.
//!
//! `ParticipantId` is a type-safe index for the 1-255 participants of a
//! match. `ParticipantMap` stores one value per participant, backed by a
//! `Vec` for O(1) access and indexable by id.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Participant identifier. Indices are 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticipantId(pub u8);

impl ParticipantId {
    /// Create a new participant ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all participant IDs for a match of the given size.
    pub fn all(count: usize) -> impl Iterator<Item = ParticipantId> {
        (0..count as u8).map(ParticipantId)
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Participant {}", self.0)
    }
}

/// Per-participant data storage.
///
/// ## Example
///
/// ```
/// use duelboard::core::{ParticipantId, ParticipantMap};
///
/// let mut wins: ParticipantMap<u32> = ParticipantMap::with_value(2, 0);
/// wins[ParticipantId::new(1)] += 1;
/// assert_eq!(wins[ParticipantId::new(1)], 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantMap<T> {
    data: Vec<T>,
}

impl<T> ParticipantMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(count: usize, factory: impl Fn(ParticipantId) -> T) -> Self {
        assert!(count > 0, "Must have at least 1 participant");
        assert!(count <= 255, "At most 255 participants supported");

        let data = (0..count as u8).map(|i| factory(ParticipantId(i))).collect();
        Self { data }
    }

    /// Create a map with all entries set to the same value.
    pub fn with_value(count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(count, |_| value.clone())
    }

    /// Create a map with default values.
    pub fn with_default(count: usize) -> Self
    where
        T: Default,
    {
        Self::new(count, |_| T::default())
    }

    /// Number of participants.
    #[must_use]
    pub fn count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to one participant's entry.
    #[must_use]
    pub fn get(&self, id: ParticipantId) -> &T {
        &self.data[id.index()]
    }

    /// Get a mutable reference to one participant's entry.
    pub fn get_mut(&mut self, id: ParticipantId) -> &mut T {
        &mut self.data[id.index()]
    }

    /// Iterate over (ParticipantId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (ParticipantId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (ParticipantId(i as u8), v))
    }
}

impl<T> Index<ParticipantId> for ParticipantMap<T> {
    type Output = T;

    fn index(&self, id: ParticipantId) -> &Self::Output {
        self.get(id)
    }
}

impl<T> IndexMut<ParticipantId> for ParticipantMap<T> {
    fn index_mut(&mut self, id: ParticipantId) -> &mut Self::Output {
        self.get_mut(id)
    }
}
