//! Round and game orchestration.
//!
//! `Game` owns the seats and drives the turn loop: load and shuffle preset
//! decks, deal the opening card, ask each non-passed participant for a
//! decision, hand it to the board, and score the round by total board
//! power once everyone has passed. The caller watches everything through a
//! `GameUpdate` observer.

use log::info;
use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardEvent};
use crate::cards::{Deck, Faction};
use crate::core::{EngineError, GameRng, ParticipantId, ParticipantMap};
use crate::players::{Choice, Participant, RosterEntry};

/// The outcome of one finished round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Round number, starting at 1.
    pub number: u32,
    /// Final board power per participant.
    pub scores: Vec<(ParticipantId, i64)>,
    /// Everyone who shared the highest power. More than one means a draw,
    /// and every one of them is credited with a round win.
    pub winners: Vec<ParticipantId>,
    pub draw: bool,
}

/// The outcome of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub rounds: Vec<RoundResult>,
    pub round_wins: Vec<(ParticipantId, u32)>,
    /// `None` when the top round-win count is shared.
    pub winner: Option<ParticipantId>,
}

/// Progress notifications streamed to the observer while a game runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameUpdate {
    RoundStarted { round: u32 },
    TurnStarted { turn: u32, participant: ParticipantId, name: String },
    CardDrawn { participant: ParticipantId, card: String },
    /// The deck was empty, so no draw this turn.
    UnableToDraw { participant: ParticipantId },
    /// Hand and deck are both spent; the participant passes automatically.
    OutOfCards { participant: ParticipantId, total_power: i64 },
    /// The participant chose to pass.
    Passed { participant: ParticipantId },
    /// A previously passed participant's turn went by.
    TurnSkipped { participant: ParticipantId },
    Board(BoardEvent),
    RoundFinished(RoundResult),
}

/// A full match: a fixed roster, one faction per seat, a fixed number of
/// rounds.
pub struct Game {
    participants: Vec<Box<dyn Participant>>,
    factions: Vec<Faction>,
    board: Board,
    rng: GameRng,
    turn: u32,
    current_round: u32,
    max_rounds: u32,
    round_wins: ParticipantMap<u32>,
    results: Vec<RoundResult>,
}

impl Game {
    /// Create a game. Participants must be ordered by id and each brings
    /// the faction it plays every round.
    #[must_use]
    pub fn new(
        participants: Vec<Box<dyn Participant>>,
        factions: Vec<Faction>,
        max_rounds: u32,
        seed: u64,
    ) -> Self {
        assert!(!participants.is_empty(), "A game needs participants");
        assert_eq!(
            participants.len(),
            factions.len(),
            "One faction per participant"
        );
        for (i, p) in participants.iter().enumerate() {
            assert_eq!(p.id().index(), i, "Participants must be ordered by id");
        }

        let count = participants.len();
        Self {
            participants,
            factions,
            board: Board::new(count),
            rng: GameRng::new(seed),
            turn: 0,
            current_round: 0,
            max_rounds,
            round_wins: ParticipantMap::with_value(count, 0),
            results: Vec::new(),
        }
    }

    /// Play every round to completion.
    pub fn run(&mut self, mut observe: impl FnMut(GameUpdate)) -> Result<GameOutcome, EngineError> {
        for _ in 0..self.max_rounds {
            self.current_round += 1;
            self.turn = 0;
            self.board = Board::new(self.participants.len());
            info!("round {} starting", self.current_round);
            observe(GameUpdate::RoundStarted { round: self.current_round });

            for i in 0..self.participants.len() {
                let id = self.participants[i].id();
                let mut deck = Deck::load_preset(self.factions[i], id);
                deck.shuffle(&mut self.rng);
                self.participants[i].prepare_round(deck);
                // Opening draw so every hand starts with a card.
                let card = self.participants[i].draw_card()?;
                observe(GameUpdate::CardDrawn { participant: id, card });
            }

            let result = self.play_round(&mut observe)?;
            for &winner in &result.winners {
                self.round_wins[winner] += 1;
            }
            info!(
                "round {} finished, winners: {:?}",
                result.number, result.winners
            );
            observe(GameUpdate::RoundFinished(result.clone()));
            self.results.push(result);
        }

        Ok(self.outcome())
    }

    fn play_round(
        &mut self,
        observe: &mut impl FnMut(GameUpdate),
    ) -> Result<RoundResult, EngineError> {
        while self.participants.iter().any(|p| !p.has_passed()) {
            for i in 0..self.participants.len() {
                let id = self.participants[i].id();
                if self.participants[i].has_passed() {
                    observe(GameUpdate::TurnSkipped { participant: id });
                    continue;
                }

                self.turn += 1;
                observe(GameUpdate::TurnStarted {
                    turn: self.turn,
                    participant: id,
                    name: self.participants[i].name().to_string(),
                });

                if self.participants[i].cards_left() == 0 {
                    self.participants[i].set_passed(true);
                    observe(GameUpdate::OutOfCards {
                        participant: id,
                        total_power: self.board.total_power(id),
                    });
                    continue;
                }

                if self.participants[i].deck().is_empty() {
                    observe(GameUpdate::UnableToDraw { participant: id });
                } else {
                    let card = self.participants[i].draw_card()?;
                    observe(GameUpdate::CardDrawn { participant: id, card });
                }

                let roster: Vec<RosterEntry> = self
                    .participants
                    .iter()
                    .map(|p| RosterEntry { id: p.id(), name: p.name().to_string() })
                    .collect();
                match self.participants[i].decide(&self.board, &roster) {
                    Choice::Pass => {
                        self.participants[i].set_passed(true);
                        observe(GameUpdate::Passed { participant: id });
                    }
                    Choice::Play(decision) => {
                        let events =
                            self.board
                                .play_card(decision, &mut self.participants, self.turn)?;
                        for event in events {
                            observe(GameUpdate::Board(event));
                        }
                    }
                }
            }
        }

        let scores: Vec<(ParticipantId, i64)> = self
            .participants
            .iter()
            .map(|p| (p.id(), self.board.total_power(p.id())))
            .collect();
        let top = scores.iter().map(|&(_, s)| s).max().unwrap_or(0);
        let winners: Vec<ParticipantId> = scores
            .iter()
            .filter(|&&(_, s)| s == top)
            .map(|&(id, _)| id)
            .collect();
        let draw = winners.len() > 1;

        Ok(RoundResult { number: self.current_round, scores, winners, draw })
    }

    fn outcome(&self) -> GameOutcome {
        let round_wins: Vec<(ParticipantId, u32)> =
            self.round_wins.iter().map(|(id, &w)| (id, w)).collect();
        let top = round_wins.iter().map(|&(_, w)| w).max().unwrap_or(0);
        let leaders: Vec<ParticipantId> = round_wins
            .iter()
            .filter(|&&(_, w)| w == top)
            .map(|&(id, _)| id)
            .collect();
        let winner = if leaders.len() == 1 { Some(leaders[0]) } else { None };

        GameOutcome { rounds: self.results.clone(), round_wins, winner }
    }

    /// The board for the round in progress.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Global turn counter within the current round.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Current round number, starting at 1 once running.
    #[must_use]
    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    /// Number of seats.
    #[must_use]
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Borrow one seat, e.g. to render its graveyard.
    #[must_use]
    pub fn participant(&self, id: ParticipantId) -> &dyn Participant {
        self.participants[id.index()].as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::players::{ScriptedAi, Strategy};

    fn ai_game(strategies: [Strategy; 2], factions: [Faction; 2], rounds: u32) -> Game {
        let participants: Vec<Box<dyn Participant>> = strategies
            .iter()
            .enumerate()
            .map(|(i, &s)| {
                Box::new(ScriptedAi::new(
                    ParticipantId::new(i as u8),
                    format!("PC{i}-{}", s.name()),
                    s,
                    100 + i as u64,
                )) as Box<dyn Participant>
            })
            .collect();
        Game::new(participants, factions.to_vec(), rounds, 42)
    }

    #[test]
    fn test_round_plays_out_all_cards() {
        let mut game = ai_game(
            [Strategy::Logical, Strategy::Logical],
            [Faction::Kingdom, Faction::Kingdom],
            1,
        );

        let mut updates = Vec::new();
        let outcome = game.run(|u| updates.push(u)).unwrap();

        assert_eq!(outcome.rounds.len(), 1);
        let result = &outcome.rounds[0];
        assert_eq!(result.scores.len(), 2);

        // Every card ends the round either on the board or buried.
        let on_board: usize = (0..2)
            .map(|i| game.board().card_count(ParticipantId::new(i)))
            .sum();
        let buried: usize = result
            .scores
            .iter()
            .map(|&(id, _)| {
                updates
                    .iter()
                    .filter(|u| {
                        matches!(u, GameUpdate::Board(BoardEvent::CardDestroyed { participant, .. }) if *participant == id)
                    })
                    .count()
            })
            .sum();
        assert_eq!(on_board + buried, 10);

        // Winners got the round-win credit.
        let credited: u32 = outcome.round_wins.iter().map(|&(_, w)| w).sum();
        assert_eq!(credited as usize, result.winners.len());
    }

    #[test]
    fn test_multi_round_game_produces_outcome() {
        let mut game = ai_game(
            [Strategy::Logical, Strategy::Dumb],
            [Faction::Pirates, Faction::Kingdom],
            3,
        );

        let outcome = game.run(|_| {}).unwrap();

        assert_eq!(outcome.rounds.len(), 3);
        let total_wins: u32 = outcome.round_wins.iter().map(|&(_, w)| w).sum();
        assert!(total_wins >= 3);
        match outcome.winner {
            Some(winner) => {
                let top = outcome.round_wins.iter().map(|&(_, w)| w).max().unwrap();
                let winner_wins = outcome
                    .round_wins
                    .iter()
                    .find(|&&(id, _)| id == winner)
                    .map(|&(_, w)| w)
                    .unwrap();
                assert_eq!(winner_wins, top);
            }
            None => {
                // Overall draw: the top count is shared.
                let top = outcome.round_wins.iter().map(|&(_, w)| w).max().unwrap();
                let leaders = outcome
                    .round_wins
                    .iter()
                    .filter(|&&(_, w)| w == top)
                    .count();
                assert!(leaders > 1);
            }
        }
    }

    #[test]
    fn test_turn_updates_are_sequential() {
        let mut game = ai_game(
            [Strategy::Dumb, Strategy::Dumb],
            [Faction::Kingdom, Faction::Kingdom],
            1,
        );

        let mut turns = Vec::new();
        game.run(|u| {
            if let GameUpdate::TurnStarted { turn, .. } = u {
                turns.push(turn);
            }
        })
        .unwrap();

        let expected: Vec<u32> = (1..=turns.len() as u32).collect();
        assert_eq!(turns, expected);
    }

    #[test]
    #[should_panic(expected = "One faction per participant")]
    fn test_mismatched_factions_rejected() {
        let participants: Vec<Box<dyn Participant>> = vec![Box::new(ScriptedAi::new(
            ParticipantId::new(0),
            "PC0",
            Strategy::Dumb,
            1,
        ))];
        let _ = Game::new(participants, vec![], 1, 42);
    }
}
