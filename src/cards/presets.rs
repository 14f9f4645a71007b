//! Faction preset decks.
//!
//! Three fixed factions, five cards each. The card stats and attribute
//! triples are a frozen contract: tests treat them as golden fixtures, so
//! the strings and numbers here are carried over verbatim.

use serde::{Deserialize, Serialize};

use crate::core::ParticipantId;

use super::attribute::{Attribute, AttributeKind};
use super::card::Card;
use super::deck::Deck;

/// Number of cards in every preset deck.
pub const PRESET_DECK_SIZE: usize = 5;

/// The three playable factions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Elves,
    Pirates,
    Kingdom,
}

impl Faction {
    /// All factions, in selection order.
    pub const ALL: [Faction; 3] = [Faction::Elves, Faction::Pirates, Faction::Kingdom];

    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Faction::Elves => "Elves",
            Faction::Pirates => "Pirates",
            Faction::Kingdom => "Kingdom",
        }
    }

    /// Flavor description for setup screens.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Faction::Elves => {
                "A group of forest elves that advocate peace above all else.\n - Strong Resiliance\n - Weak power\n - Average Infliction"
            }
            Faction::Pirates => {
                "Ahoy! No, not that kind of pirates. These guys are more of the robin hood kind of group... except they have ships.. and curved swords.\n - Weak Resiliance\n - Strong Power\n - Average Infliction"
            }
            Faction::Kingdom => {
                "Knights, sourcerers, kings and queens.. what you expect from any fantasy kingdom.\n - Average Resiliance\n - Weak Power\n - Average Infliction"
            }
        }
    }

    /// Parse a user-supplied faction name, case-insensitively.
    #[must_use]
    pub fn parse(input: &str) -> Option<Faction> {
        match input.trim().to_ascii_lowercase().as_str() {
            "elves" => Some(Faction::Elves),
            "pirates" => Some(Faction::Pirates),
            "kingdom" => Some(Faction::Kingdom),
            _ => None,
        }
    }
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Deck {
    /// Build a preset deck for a faction, stamping deck and cards with
    /// their owner. Cards are enqueued in the fixed preset order.
    #[must_use]
    pub fn load_preset(faction: Faction, owner: ParticipantId) -> Deck {
        let mut deck = Deck::new(faction.name(), PRESET_DECK_SIZE, owner);
        let cards = match faction {
            Faction::Elves => elven_cards(owner),
            Faction::Pirates => pirate_cards(owner),
            Faction::Kingdom => kingdom_cards(owner),
        };
        for card in cards {
            deck.enqueue(card)
                .expect("preset deck capacity matches preset card count");
        }
        deck
    }
}

fn elven_cards(owner: ParticipantId) -> Vec<Card> {
    vec![
        Card::new(
            "Dol Blathanna Protector",
            "As long as we stand, no human foot shall trample Dol Blathanna's meadows.",
            24,
            [
                Attribute::new("War Cry", "", AttributeKind::Buff, 10, 1),
                Attribute::new("Percise Shot", "", AttributeKind::Inflict, 40, 1),
                Attribute::new("Sensibility", "", AttributeKind::Resilience, 15, 3).delayed(2),
            ],
            owner,
        ),
        Card::new(
            "Elf Infantry",
            "Elf infantry unit. They are... fast very fast.",
            45,
            [
                Attribute::new("War Cry", "", AttributeKind::Buff, 10, 1),
                Attribute::new("Quick Attack", "", AttributeKind::Inflict, 5, 5),
                Attribute::new("Sensibility", "", AttributeKind::Resilience, 15, 3).delayed(2),
            ],
            owner,
        ),
        Card::new(
            "Elf Commander",
            "Commander of the elf army. Hates humans! Hates meat too. Maybe related?",
            40,
            [
                Attribute::new("War Cry", "", AttributeKind::Buff, 10, 1),
                Attribute::new("Regroup, charge!", "", AttributeKind::Inflict, 15, 3),
                Attribute::new("Loyalty!", "", AttributeKind::Resilience, 20, 3),
            ],
            owner,
        ),
        Card::new(
            "Elf King",
            "King and ruler of the elf kingdom.",
            60,
            [
                Attribute::new("Peace and prosperity", "", AttributeKind::Buff, 5, 1),
                Attribute::new("King's word", "", AttributeKind::Inflict, 17, 3),
                Attribute::new("Immortality", "", AttributeKind::Resilience, 50, 2),
            ],
            owner,
        ),
        Card::new(
            "Elf Queen",
            "Queen of the beautiful kingdom of the elfs.",
            57,
            [
                Attribute::new("Queen's Love", "", AttributeKind::Buff, 8, 3),
                Attribute::new("Queen's Beauty", "", AttributeKind::Inflict, 20, 2),
                Attribute::new("Peace", "", AttributeKind::Resilience, 200, 1).delayed(2),
            ],
            owner,
        ),
    ]
}

fn pirate_cards(owner: ParticipantId) -> Vec<Card> {
    vec![
        Card::new(
            "Sailor",
            "Just a man part of a ship.",
            30,
            [
                Attribute::new("Ahoy!", "", AttributeKind::Buff, 20, 3).delayed(4),
                Attribute::new("Cannon ball!", "", AttributeKind::Inflict, 5, 2),
                Attribute::new("Pirate's true love is his ship.", "", AttributeKind::Resilience, 1, 1),
            ],
            owner,
        ),
        Card::new(
            "Quarter Master",
            "Second in command, when it comes to a ship.",
            45,
            [
                Attribute::new("Ahoy!", "", AttributeKind::Buff, 20, 3).delayed(4),
                Attribute::new("Hand's on deck!", "", AttributeKind::Inflict, 10, 2),
                Attribute::new("Pirate's true love is his ship.", "", AttributeKind::Resilience, 1, 1),
            ],
            owner,
        ),
        Card::new(
            "Captain",
            "Captain of this ship is here!",
            60,
            [
                Attribute::new("Captain. Ahoy!", "", AttributeKind::Buff, 20, 3).delayed(2),
                Attribute::new("Cannon balls!", "", AttributeKind::Inflict, 20, 2),
                Attribute::new("Pirate's true love is his ship.", "", AttributeKind::Resilience, 1, 1),
            ],
            owner,
        ),
        Card::new(
            "Black Beard",
            "The captain of his legendary ship.",
            75,
            [
                Attribute::new("Black Beard. Ahoy!", "", AttributeKind::Buff, 30, 3).delayed(2),
                Attribute::new("Cannon balls!", "", AttributeKind::Inflict, 25, 2),
                Attribute::new("Pirate's true love is his ship.", "", AttributeKind::Resilience, 1, 1),
            ],
            owner,
        ),
        Card::new(
            "Pirate King",
            "Not the guy from one piece.",
            90,
            [
                Attribute::new("King of the 7 Seas", "", AttributeKind::Buff, 100, 1),
                Attribute::new("Cannon balls!", "", AttributeKind::Inflict, 25, 2),
                Attribute::new("Pirate's true love is his ship.", "", AttributeKind::Resilience, 1, 1),
            ],
            owner,
        ),
    ]
}

fn kingdom_cards(owner: ParticipantId) -> Vec<Card> {
    vec![
        Card::new(
            "Peasent",
            "Just a man. Part of a big kingdom.",
            1,
            [
                Attribute::new("In god we trust.", "", AttributeKind::Buff, 3, 10),
                Attribute::new("To arms!", "", AttributeKind::Inflict, 10, 1),
                Attribute::new("Tax paying", "", AttributeKind::Resilience, 5, 2),
            ],
            owner,
        ),
        Card::new(
            "Assasin",
            "Peace cannot be achieved without bloodshed.",
            30,
            [
                Attribute::new("Silence", "", AttributeKind::Buff, 7, 3),
                Attribute::new("Assasination", "", AttributeKind::Inflict, 100, 1),
                Attribute::new("Death is the way out.", "", AttributeKind::Resilience, 1, 1),
            ],
            owner,
        ),
        Card::new(
            "Knight",
            "Loyal soldier to crown.",
            90,
            [
                Attribute::new("Loyalty and Honor!", "", AttributeKind::Buff, 20, 2),
                Attribute::new("Duel!", "", AttributeKind::Inflict, 30, 2),
                Attribute::new("To the death!", "", AttributeKind::Resilience, 20, 1),
            ],
            owner,
        ),
        Card::new(
            "Commander",
            "Commander of the forces of the kingdom.",
            105,
            [
                Attribute::new("Charge!", "", AttributeKind::Buff, 30, 2),
                Attribute::new("Spears!", "", AttributeKind::Inflict, 12, 4),
                Attribute::new("Rout.", "", AttributeKind::Resilience, 1, 1),
            ],
            owner,
        ),
        Card::new(
            "Prince",
            "Eldest son, heir to the crown. Fights well the lad.",
            60,
            [
                Attribute::new("Confort", "", AttributeKind::Buff, 10, 3),
                Attribute::new("Crown, isn't just for show", "", AttributeKind::Inflict, 20, 2),
                Attribute::new("Death of a monarch.", "", AttributeKind::Resilience, 20, 2),
            ],
            owner,
        ),
    ]
}
