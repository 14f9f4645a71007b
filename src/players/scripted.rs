//! Scripted participants.
//!
//! Three closed strategies reproducing the classic computer opponents.
//! The engine never sees the strategy, only the decision it returns.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::board::{Board, PlayDecision};
use crate::cards::{Card, Deck, Graveyard, Hand, CARD_ATTRIBUTES, HAND_SIZE};
use crate::core::{GameRng, ParticipantId};

use super::{Choice, Participant, ParticipantState, RosterEntry};

/// How a scripted participant plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Always the first held card with its Inflict attribute, aimed at the
    /// first opposing participant's slot 0.
    Logical,
    /// Uniformly random card, attribute, target participant, and slots.
    Random,
    /// First held card, first attribute, participant 0, slot 0.
    Dumb,
}

impl Strategy {
    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Logical => "Logical",
            Strategy::Random => "Random",
            Strategy::Dumb => "Dumb",
        }
    }

    /// One-line description for setup screens.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Strategy::Logical => "Tries to play in a smart way",
            Strategy::Random => "Plays randomly",
            Strategy::Dumb => "Plays with tunnel vision",
        }
    }

    /// Parse a user-supplied strategy name, case-insensitively.
    #[must_use]
    pub fn parse(input: &str) -> Option<Strategy> {
        match input.trim().to_ascii_lowercase().as_str() {
            "logical" => Some(Strategy::Logical),
            "random" => Some(Strategy::Random),
            "dumb" => Some(Strategy::Dumb),
            _ => None,
        }
    }
}

/// A computer-controlled seat.
#[derive(Debug)]
pub struct ScriptedAi {
    state: ParticipantState,
    strategy: Strategy,
    rng: GameRng,
}

impl ScriptedAi {
    /// Create a scripted participant with its own decision RNG.
    #[must_use]
    pub fn new(id: ParticipantId, name: impl Into<String>, strategy: Strategy, seed: u64) -> Self {
        Self {
            state: ParticipantState::new(id, name),
            strategy,
            rng: GameRng::new(seed),
        }
    }

    /// The strategy this participant plays with.
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    fn pick_card(&mut self) -> Option<(Card, usize)> {
        let slot = match self.strategy {
            Strategy::Random if self.state.hand.count() == HAND_SIZE => {
                self.rng.gen_range(0..HAND_SIZE)
            }
            _ => self.state.hand.first_occupied_index(),
        };
        let card = self.state.hand.remove_at(slot).ok()?;

        let attribute_index = match self.strategy {
            Strategy::Logical => 1,
            Strategy::Random => self.rng.gen_range(0..CARD_ATTRIBUTES),
            Strategy::Dumb => 0,
        };
        Some((card, attribute_index))
    }

    fn pick_target(&mut self, roster: &[RosterEntry]) -> ParticipantId {
        match self.strategy {
            Strategy::Logical => roster
                .iter()
                .map(|entry| entry.id)
                .find(|&id| id != self.state.id)
                .unwrap_or(self.state.id),
            Strategy::Random => roster[self.rng.gen_range(0..roster.len())].id,
            Strategy::Dumb => roster[0].id,
        }
    }

    fn pick_slots(&mut self, board: &Board, target: ParticipantId, wanted: usize) -> SmallVec<[usize; 4]> {
        let on_board = board.card_count(target);
        if on_board == 0 {
            return SmallVec::new();
        }
        match self.strategy {
            Strategy::Random => (0..wanted).map(|_| self.rng.gen_range(0..on_board)).collect(),
            Strategy::Logical | Strategy::Dumb => smallvec![0; wanted],
        }
    }
}

impl Participant for ScriptedAi {
    fn id(&self) -> ParticipantId {
        self.state.id
    }

    fn name(&self) -> &str {
        &self.state.name
    }

    fn hand(&self) -> &Hand {
        &self.state.hand
    }

    fn hand_mut(&mut self) -> &mut Hand {
        &mut self.state.hand
    }

    fn deck(&self) -> &Deck {
        &self.state.deck
    }

    fn deck_mut(&mut self) -> &mut Deck {
        &mut self.state.deck
    }

    fn graveyard(&self) -> &Graveyard {
        &self.state.graveyard
    }

    fn graveyard_mut(&mut self) -> &mut Graveyard {
        &mut self.state.graveyard
    }

    fn has_passed(&self) -> bool {
        self.state.passed
    }

    fn set_passed(&mut self, passed: bool) {
        self.state.passed = passed;
    }

    fn prepare_round(&mut self, deck: Deck) {
        self.state.reset(deck);
    }

    fn decide(&mut self, board: &Board, roster: &[RosterEntry]) -> Choice {
        let Some((card, attribute_index)) = self.pick_card() else {
            return Choice::Pass;
        };
        let target_participant = self.pick_target(roster);
        let wanted = card.attributes()[attribute_index].target_count();
        let target_slots = self.pick_slots(board, target_participant, wanted);

        Choice::Play(PlayDecision {
            participant: self.state.id,
            card,
            attribute_index,
            target_participant,
            target_slots,
        })
    }
}
