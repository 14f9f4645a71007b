//! Card data model.
//!
//! A card is a named unit with mutable power and resilience, exactly three
//! attributes fixed at construction, and metadata describing where it
//! currently lives. Power at or below zero is the destruction condition.

use serde::{Deserialize, Serialize};

use crate::core::ParticipantId;

use super::attribute::Attribute;

/// Number of attributes every card carries.
pub const CARD_ATTRIBUTES: usize = 3;

/// Identity of a card once it has been on the board.
///
/// Assigned by the board at placement and kept for the rest of the card's
/// life; the timed-effect schedule captures targets by uid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardUid(pub u32);

impl std::fmt::Display for CardUid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card#{}", self.0)
    }
}

/// A card belonging to one participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    name: String,
    description: String,
    power: i64,
    resilience: i64,
    attributes: [Attribute; CARD_ATTRIBUTES],
    owner: ParticipantId,

    // Zone metadata. A card lives in exactly one place at a time; these
    // fields only say where within the board/graveyard it ended up.
    active_attribute: Option<usize>,
    uid: Option<CardUid>,
    board_position: Option<usize>,
    in_graveyard: bool,
}

impl Card {
    /// Create a card. Resilience starts at zero; zone metadata is unset
    /// until the card is played.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        power: i64,
        attributes: [Attribute; CARD_ATTRIBUTES],
        owner: ParticipantId,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            power,
            resilience: 0,
            attributes,
            owner,
            active_attribute: None,
            uid: None,
            board_position: None,
            in_graveyard: false,
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Current power. At or below zero the card is destroyed.
    #[must_use]
    pub fn power(&self) -> i64 {
        self.power
    }

    /// Set current power.
    pub fn set_power(&mut self, power: i64) {
        self.power = power;
    }

    /// Current resilience (damage shield).
    #[must_use]
    pub fn resilience(&self) -> i64 {
        self.resilience
    }

    /// Set current resilience.
    pub fn set_resilience(&mut self, resilience: i64) {
        self.resilience = resilience;
    }

    /// The card's three attributes, in selection order.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute; CARD_ATTRIBUTES] {
        &self.attributes
    }

    /// One attribute by selection index.
    #[must_use]
    pub fn attribute(&self, index: usize) -> Option<&Attribute> {
        self.attributes.get(index)
    }

    /// The attribute this card was played with, if it has been played.
    #[must_use]
    pub fn active_attribute(&self) -> Option<&Attribute> {
        self.active_attribute.and_then(|i| self.attributes.get(i))
    }

    pub(crate) fn set_active_attribute(&mut self, index: usize) {
        self.active_attribute = Some(index);
    }

    /// The participant who controls this card.
    #[must_use]
    pub fn owner(&self) -> ParticipantId {
        self.owner
    }

    /// Board identity, once placed.
    #[must_use]
    pub fn uid(&self) -> Option<CardUid> {
        self.uid
    }

    /// The zone position recorded at placement. Stable until the card
    /// leaves the board.
    #[must_use]
    pub fn board_position(&self) -> Option<usize> {
        self.board_position
    }

    pub(crate) fn place_on_board(&mut self, uid: CardUid, position: usize) {
        self.uid = Some(uid);
        self.board_position = Some(position);
    }

    pub(crate) fn leave_board(&mut self) {
        self.board_position = None;
    }

    /// Whether the card currently rests in a graveyard.
    #[must_use]
    pub fn in_graveyard(&self) -> bool {
        self.in_graveyard
    }

    pub(crate) fn set_in_graveyard(&mut self, buried: bool) {
        self.in_graveyard = buried;
    }
}
