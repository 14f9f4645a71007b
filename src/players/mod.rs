//! Participant capability interface.
//!
//! The engine never decides anything. Whoever sits at the table, human
//! behind a prompt or scripted strategy, implements `Participant` and
//! supplies a [`Choice`] when asked; the engine consumes the decision
//! shape and nothing else.

pub mod scripted;

use serde::{Deserialize, Serialize};

use crate::board::{Board, PlayDecision};
use crate::cards::{Deck, Graveyard, Hand, HAND_SIZE};
use crate::core::{Container, EngineError, ParticipantId};

pub use scripted::{ScriptedAi, Strategy};

/// What a participant can answer when asked to act.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Choice {
    /// Play a card with the embedded decision.
    Play(PlayDecision),
    /// Sit the rest of the round out.
    Pass,
}

/// Name/id pair handed to `decide` so strategies can pick opponents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: ParticipantId,
    pub name: String,
}

/// One seat at the table.
///
/// Implementations own their zones; the engine reaches the graveyard
/// through this trait when a cascade destroys a card. `participants`
/// slices handed to the board must be ordered by id.
pub trait Participant {
    fn id(&self) -> ParticipantId;
    fn name(&self) -> &str;

    fn hand(&self) -> &Hand;
    fn hand_mut(&mut self) -> &mut Hand;

    fn deck(&self) -> &Deck;
    fn deck_mut(&mut self) -> &mut Deck;

    fn graveyard(&self) -> &Graveyard;
    fn graveyard_mut(&mut self) -> &mut Graveyard;

    fn has_passed(&self) -> bool;
    fn set_passed(&mut self, passed: bool);

    /// Install a fresh deck and clear hand, graveyard, and pass state.
    /// Called by the orchestrator at the start of every round.
    fn prepare_round(&mut self, deck: Deck);

    /// Produce a play decision or pass. Only called while the participant
    /// still has cards; the returned decision must be valid against the
    /// board (`Board::card_count` bounds every target slot).
    fn decide(&mut self, board: &Board, roster: &[RosterEntry]) -> Choice;

    /// Cards remaining in hand and deck together.
    fn cards_left(&self) -> usize {
        self.hand().count() + self.deck().len()
    }

    /// Draw the oldest deck card into the hand. Returns the drawn card's
    /// name. Checks the hand before touching the deck so a failure leaves
    /// both containers untouched.
    fn draw_card(&mut self) -> Result<String, EngineError> {
        if self.hand().count() == HAND_SIZE {
            return Err(EngineError::Full(Container::Hand));
        }
        let card = self.deck_mut().dequeue()?;
        let name = card.name().to_string();
        self.hand_mut()
            .add_card(card)
            .expect("hand capacity checked above");
        Ok(name)
    }
}

/// The state every participant kind carries: identity plus the three
/// owned zones. Implementations embed one and delegate the accessors.
#[derive(Clone, Debug)]
pub struct ParticipantState {
    pub id: ParticipantId,
    pub name: String,
    pub deck: Deck,
    pub hand: Hand,
    pub graveyard: Graveyard,
    pub passed: bool,
}

impl ParticipantState {
    /// Create a seat with an empty placeholder deck; `reset` installs the
    /// real one at round start.
    #[must_use]
    pub fn new(id: ParticipantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            deck: Deck::new("unassigned", 1, id),
            hand: Hand::new(),
            graveyard: Graveyard::new(),
            passed: false,
        }
    }

    /// Swap in a new deck and clear the per-round state.
    pub fn reset(&mut self, deck: Deck) {
        self.deck = deck;
        self.hand = Hand::new();
        self.graveyard = Graveyard::new();
        self.passed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Faction;

    #[test]
    fn test_draw_card_moves_deck_to_hand() {
        let id = ParticipantId::new(0);
        let mut ai = ScriptedAi::new(id, "pc", Strategy::Dumb, 1);
        ai.prepare_round(Deck::load_preset(Faction::Elves, id));

        let name = ai.draw_card().unwrap();
        assert_eq!(name, "Dol Blathanna Protector");
        assert_eq!(ai.hand().count(), 1);
        assert_eq!(ai.deck().len(), 4);
        assert_eq!(ai.cards_left(), 5);
    }

    #[test]
    fn test_draw_with_full_hand_fails_without_losing_a_card() {
        let id = ParticipantId::new(0);
        let mut ai = ScriptedAi::new(id, "pc", Strategy::Dumb, 1);
        ai.prepare_round(Deck::load_preset(Faction::Elves, id));

        ai.draw_card().unwrap();
        ai.draw_card().unwrap();
        let err = ai.draw_card().unwrap_err();

        assert_eq!(err, EngineError::Full(Container::Hand));
        assert_eq!(ai.deck().len(), 3);
        assert_eq!(ai.hand().count(), 2);
    }

    #[test]
    fn test_draw_from_empty_deck_fails() {
        let id = ParticipantId::new(0);
        let mut ai = ScriptedAi::new(id, "pc", Strategy::Dumb, 1);

        assert_eq!(ai.draw_card().unwrap_err(), EngineError::Empty(Container::Deck));
    }

    #[test]
    fn test_prepare_round_clears_state() {
        let id = ParticipantId::new(0);
        let mut ai = ScriptedAi::new(id, "pc", Strategy::Dumb, 1);
        ai.prepare_round(Deck::load_preset(Faction::Elves, id));
        ai.draw_card().unwrap();
        ai.set_passed(true);

        ai.prepare_round(Deck::load_preset(Faction::Pirates, id));

        assert_eq!(ai.deck().name(), "Pirates");
        assert_eq!(ai.hand().count(), 0);
        assert_eq!(ai.graveyard().count(), 0);
        assert!(!ai.has_passed());
    }
}
