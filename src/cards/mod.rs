//! Card data model and the containers cards move through.
//!
//! Lifecycle: a card is created by deck loading and owned immediately,
//! then moves Deck -> Hand (draw) -> Board (play) -> Graveyard
//! (destruction), never backwards. Stats mutate in place while the card
//! is on the board.

pub mod attribute;
pub mod card;
pub mod deck;
pub mod graveyard;
pub mod hand;
pub mod presets;

pub use attribute::{Attribute, AttributeKind, Timing};
pub use card::{Card, CardUid, CARD_ATTRIBUTES};
pub use deck::Deck;
pub use graveyard::Graveyard;
pub use hand::{Hand, HAND_SIZE};
pub use presets::{Faction, PRESET_DECK_SIZE};
