//! The board: per-participant zones, the timed-effect schedule, and the
//! cascade activation algorithm.
//!
//! `play_card` is the single mutating entry point. It first settles any
//! scheduled effects that are due this turn, then places the new card and
//! either resolves its attribute immediately or puts it on the schedule.
//! Destruction cascades: a card whose power drops to zero or below leaves
//! its zone for its owner's graveyard mid-resolution, and a source that
//! dies mid-cascade stops acting.

pub mod events;

use log::debug;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Attribute, Card, CardUid, Timing, CARD_ATTRIBUTES};
use crate::core::{EngineError, ParticipantId, ParticipantMap};
use crate::players::Participant;

pub use events::BoardEvent;

/// A validated play: who plays what, with which attribute, against whom.
///
/// `target_slots` index the target participant's zone as it stands when
/// the card lands (so a self-targeted play may name the slot the new card
/// itself occupies). An empty list is the no-legal-targets placement.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayDecision {
    pub participant: ParticipantId,
    pub card: Card,
    pub attribute_index: usize,
    pub target_participant: ParticipantId,
    pub target_slots: SmallVec<[usize; 4]>,
}

/// A scheduled attribute waiting for its turn.
///
/// Targets are captured as uids at scheduling time and never re-resolved;
/// a uid that has left the board is a destroyed target and gets skipped.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimedEffect {
    attribute: Attribute,
    due_turn: u32,
    source: CardUid,
    source_name: String,
    source_participant: ParticipantId,
    target_participant: ParticipantId,
    targets: SmallVec<[CardUid; 4]>,
}

impl TimedEffect {
    /// The attribute that will resolve.
    #[must_use]
    pub fn attribute(&self) -> &Attribute {
        &self.attribute
    }

    /// The turn this effect resolves on.
    #[must_use]
    pub fn due_turn(&self) -> u32 {
        self.due_turn
    }

    /// Name of the card that played the attribute.
    #[must_use]
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Whose zone the captured targets live in.
    #[must_use]
    pub fn target_participant(&self) -> ParticipantId {
        self.target_participant
    }
}

/// The shared battlefield.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Board {
    zones: ParticipantMap<Vec<Card>>,
    /// Which zone each on-board card sits in, by uid.
    locations: FxHashMap<CardUid, ParticipantId>,
    pending: Vec<TimedEffect>,
    next_uid: u32,
}

impl Board {
    /// Create an empty board with one zone per participant.
    #[must_use]
    pub fn new(participant_count: usize) -> Self {
        Self {
            zones: ParticipantMap::with_default(participant_count),
            locations: FxHashMap::default(),
            pending: Vec::new(),
            next_uid: 0,
        }
    }

    /// Resolve one play. Runs due timed effects, places the card, then
    /// triggers or schedules its attribute. Returns everything observable
    /// that happened, in order.
    ///
    /// The decision itself is validated before the card is placed: an
    /// out-of-range attribute or target slot fails without applying any
    /// part of the decision. Timed effects that were already due resolve
    /// regardless; they are owed from earlier turns.
    pub fn play_card(
        &mut self,
        decision: PlayDecision,
        participants: &mut [Box<dyn Participant>],
        current_turn: u32,
    ) -> Result<Vec<BoardEvent>, EngineError> {
        debug_assert_eq!(participants.len(), self.zones.count());

        let mut events = Vec::new();
        self.process_due_effects(current_turn, participants, &mut events);

        let PlayDecision {
            participant,
            mut card,
            attribute_index,
            target_participant,
            target_slots,
        } = decision;

        if attribute_index >= CARD_ATTRIBUTES {
            return Err(EngineError::InvalidAttributeIndex(attribute_index));
        }
        // Zone length as it will be once the card lands: a self-targeted
        // play may point at the new card's own slot.
        let zone_len = self.zones[target_participant].len()
            + usize::from(target_participant == participant);
        for &slot in &target_slots {
            if slot >= zone_len {
                return Err(EngineError::InvalidTargetIndex {
                    index: slot,
                    cards_on_board: zone_len,
                });
            }
        }

        card.set_active_attribute(attribute_index);
        let attribute = card.attributes()[attribute_index].clone();
        let uid = CardUid(self.next_uid);
        self.next_uid += 1;
        let position = self.zones[participant].len();
        card.place_on_board(uid, position);
        let card_name = card.name().to_string();
        debug!("{participant}: placing {card_name} as {uid} at position {position}");
        self.zones[participant].push(card);
        self.locations.insert(uid, participant);
        events.push(BoardEvent::CardPlaced {
            participant,
            card: card_name.clone(),
            position,
        });

        if target_slots.is_empty() {
            events.push(BoardEvent::PlacedWithoutTargets {
                participant,
                card: card_name,
                attribute: attribute.name().to_string(),
            });
            return Ok(events);
        }

        let targets: SmallVec<[CardUid; 4]> = target_slots
            .iter()
            .map(|&slot| {
                self.zones[target_participant][slot]
                    .uid()
                    .expect("cards on the board carry a uid")
            })
            .collect();

        let effect = TimedEffect {
            attribute,
            due_turn: current_turn,
            source: uid,
            source_name: card_name,
            source_participant: participant,
            target_participant,
            targets,
        };

        match effect.attribute.timing() {
            Timing::Delayed { turns } => {
                let effect = TimedEffect { due_turn: current_turn + turns, ..effect };
                events.push(BoardEvent::EffectScheduled {
                    participant,
                    card: effect.source_name.clone(),
                    attribute: effect.attribute.name().to_string(),
                    due_turn: effect.due_turn,
                });
                self.pending.push(effect);
            }
            Timing::Immediate => {
                self.run_cascade(&effect, participants, &mut events);
            }
        }

        Ok(events)
    }

    /// Settle the schedule for this turn: effects whose due turn equals
    /// `current_turn` resolve and leave the list; the rest report how long
    /// they still have.
    fn process_due_effects(
        &mut self,
        current_turn: u32,
        participants: &mut [Box<dyn Participant>],
        events: &mut Vec<BoardEvent>,
    ) {
        if self.pending.is_empty() {
            return;
        }

        let pending = std::mem::take(&mut self.pending);
        for effect in pending {
            if effect.due_turn == current_turn {
                events.push(BoardEvent::EffectTriggered {
                    card: effect.source_name.clone(),
                    attribute: effect.attribute.name().to_string(),
                });
                self.run_cascade(&effect, participants, events);
            } else {
                events.push(BoardEvent::EffectPending {
                    card: effect.source_name.clone(),
                    attribute: effect.attribute.name().to_string(),
                    turns_left: i64::from(effect.due_turn) - (i64::from(current_turn) + 1),
                });
                self.pending.push(effect);
            }
        }
    }

    /// Activate one attribute against its captured target list, in order.
    ///
    /// Targets that already died are skipped. A target dropping to zero
    /// power is destroyed on the spot. If the source itself drops to zero
    /// power, it is destroyed and the rest of the list is abandoned: a
    /// dead source cannot continue acting.
    fn run_cascade(
        &mut self,
        effect: &TimedEffect,
        participants: &mut [Box<dyn Participant>],
        events: &mut Vec<BoardEvent>,
    ) {
        for &target_uid in &effect.targets {
            let Some(position) = self.position_of(effect.target_participant, target_uid) else {
                continue;
            };

            let target_power = {
                let target = &mut self.zones[effect.target_participant][position];
                effect.attribute.activate(&effect.source_name, target, events);
                target.power()
            };

            if target_power <= 0 {
                self.destroy(effect.target_participant, position, participants, events);
                if target_uid == effect.source {
                    break;
                }
            }

            if let Some(source_position) =
                self.position_of(effect.source_participant, effect.source)
            {
                if self.zones[effect.source_participant][source_position].power() <= 0 {
                    self.destroy(effect.source_participant, source_position, participants, events);
                    break;
                }
            }
        }
    }

    /// Move the card at `position` out of a zone into the zone owner's
    /// graveyard, as one step.
    fn destroy(
        &mut self,
        zone_owner: ParticipantId,
        position: usize,
        participants: &mut [Box<dyn Participant>],
        events: &mut Vec<BoardEvent>,
    ) {
        let mut card = self.zones[zone_owner].remove(position);
        card.leave_board();
        if let Some(uid) = card.uid() {
            self.locations.remove(&uid);
        }
        debug!("{zone_owner}: {} destroyed", card.name());
        events.push(BoardEvent::CardDestroyed {
            participant: zone_owner,
            card: card.name().to_string(),
        });
        participants[zone_owner.index()].graveyard_mut().add(card);
    }

    fn position_of(&self, participant: ParticipantId, uid: CardUid) -> Option<usize> {
        if self.locations.get(&uid) != Some(&participant) {
            return None;
        }
        self.zones[participant].iter().position(|c| c.uid() == Some(uid))
    }

    /// Sum of power over a participant's zone.
    #[must_use]
    pub fn total_power(&self, participant: ParticipantId) -> i64 {
        self.zones[participant].iter().map(Card::power).sum()
    }

    /// Number of cards in a participant's zone.
    #[must_use]
    pub fn card_count(&self, participant: ParticipantId) -> usize {
        self.zones[participant].len()
    }

    /// A participant's zone, in placement order.
    #[must_use]
    pub fn zone(&self, participant: ParticipantId) -> &[Card] {
        &self.zones[participant]
    }

    /// Whether a card is currently on the board.
    #[must_use]
    pub fn contains(&self, uid: CardUid) -> bool {
        self.locations.contains_key(&uid)
    }

    /// Effects still waiting on the schedule.
    #[must_use]
    pub fn pending_effects(&self) -> &[TimedEffect] {
        &self.pending
    }

    /// Number of zones.
    #[must_use]
    pub fn participant_count(&self) -> usize {
        self.zones.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Attribute, AttributeKind, Deck, Faction};
    use crate::players::{Participant, ScriptedAi, Strategy};
    use smallvec::smallvec;

    fn seats(count: u8) -> Vec<Box<dyn Participant>> {
        (0..count)
            .map(|i| {
                Box::new(ScriptedAi::new(
                    ParticipantId::new(i),
                    format!("PC{i}"),
                    Strategy::Dumb,
                    u64::from(i),
                )) as Box<dyn Participant>
            })
            .collect()
    }

    fn attrs(kind: AttributeKind, magnitude: i64, targets: usize) -> [Attribute; 3] {
        [
            Attribute::new("First", "", kind, magnitude, targets),
            Attribute::new("Second", "", AttributeKind::Buff, 1, 1),
            Attribute::new("Third", "", AttributeKind::Resilience, 1, 1),
        ]
    }

    fn card_for(owner: u8, name: &str, power: i64, attributes: [Attribute; 3]) -> Card {
        Card::new(name, "", power, attributes, ParticipantId::new(owner))
    }

    fn play(
        board: &mut Board,
        participants: &mut Vec<Box<dyn Participant>>,
        turn: u32,
        owner: u8,
        card: Card,
        attribute_index: usize,
        target: u8,
        slots: &[usize],
    ) -> Vec<BoardEvent> {
        board
            .play_card(
                PlayDecision {
                    participant: ParticipantId::new(owner),
                    card,
                    attribute_index,
                    target_participant: ParticipantId::new(target),
                    target_slots: slots.iter().copied().collect(),
                },
                participants,
                turn,
            )
            .unwrap()
    }

    #[test]
    fn test_first_card_placement_without_targets() {
        let mut board = Board::new(2);
        let mut participants = seats(2);
        let card = card_for(0, "Opener", 30, attrs(AttributeKind::Buff, 10, 1));

        let events = play(&mut board, &mut participants, 1, 0, card, 0, 1, &[]);

        assert_eq!(board.card_count(ParticipantId::new(0)), 1);
        assert_eq!(board.total_power(ParticipantId::new(0)), 30);
        assert!(matches!(events[0], BoardEvent::CardPlaced { position: 0, .. }));
        assert!(matches!(events[1], BoardEvent::PlacedWithoutTargets { .. }));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_buff_resolves_immediately() {
        let mut board = Board::new(2);
        let mut participants = seats(2);

        let opener = card_for(0, "Opener", 30, attrs(AttributeKind::Buff, 10, 1));
        play(&mut board, &mut participants, 1, 0, opener, 0, 1, &[]);

        // Self-targeted buff on the opener.
        let booster = card_for(0, "Booster", 20, attrs(AttributeKind::Buff, 10, 1));
        play(&mut board, &mut participants, 2, 0, booster, 0, 0, &[0]);

        assert_eq!(board.zone(ParticipantId::new(0))[0].power(), 40);
        assert_eq!(board.total_power(ParticipantId::new(0)), 60);
    }

    #[test]
    fn test_destruction_moves_card_to_graveyard() {
        let mut board = Board::new(2);
        let mut participants = seats(2);

        let victim = card_for(1, "Victim", 10, attrs(AttributeKind::Buff, 1, 1));
        play(&mut board, &mut participants, 1, 1, victim, 0, 0, &[]);

        let hitter = card_for(0, "Hitter", 30, attrs(AttributeKind::Inflict, 25, 1));
        let events = play(&mut board, &mut participants, 2, 0, hitter, 0, 1, &[0]);

        assert_eq!(board.card_count(ParticipantId::new(1)), 0);
        assert_eq!(participants[1].graveyard().count(), 1);
        assert!(participants[1].graveyard().iter().next().unwrap().in_graveyard());
        assert!(events
            .iter()
            .any(|e| matches!(e, BoardEvent::CardDestroyed { card, .. } if card == "Victim")));
    }

    #[test]
    fn test_duplicate_targets_hit_twice_until_dead() {
        let mut board = Board::new(2);
        let mut participants = seats(2);

        let victim = card_for(1, "Victim", 25, attrs(AttributeKind::Buff, 1, 1));
        play(&mut board, &mut participants, 1, 1, victim, 0, 0, &[]);

        // Two hits of 15 at the same slot: first leaves 10 power, second kills.
        let hitter = card_for(0, "Hitter", 30, attrs(AttributeKind::Inflict, 15, 2));
        let events = play(&mut board, &mut participants, 2, 0, hitter, 0, 1, &[0, 0]);

        assert_eq!(board.card_count(ParticipantId::new(1)), 0);
        let destroyed = events
            .iter()
            .filter(|e| matches!(e, BoardEvent::CardDestroyed { .. }))
            .count();
        assert_eq!(destroyed, 1);
    }

    #[test]
    fn test_dead_target_is_skipped_not_double_buried() {
        let mut board = Board::new(2);
        let mut participants = seats(2);

        let victim = card_for(1, "Victim", 10, attrs(AttributeKind::Buff, 1, 1));
        play(&mut board, &mut participants, 1, 1, victim, 0, 0, &[]);

        // Three captured copies of the same slot; the card dies on the
        // first activation and the rest skip it.
        let hitter = card_for(0, "Hitter", 30, attrs(AttributeKind::Inflict, 40, 3));
        play(&mut board, &mut participants, 2, 0, hitter, 0, 1, &[0, 0, 0]);

        assert_eq!(participants[1].graveyard().count(), 1);
    }

    #[test]
    fn test_source_death_stops_cascade() {
        let mut board = Board::new(2);
        let mut participants = seats(2);

        let bystander = card_for(0, "Bystander", 50, attrs(AttributeKind::Buff, 1, 1));
        play(&mut board, &mut participants, 1, 0, bystander, 0, 1, &[]);

        // Suicide play: power 5 card inflicts 10 on itself first, then
        // would hit the bystander. It must never get to the bystander.
        let kamikaze = card_for(0, "Kamikaze", 5, attrs(AttributeKind::Inflict, 10, 2));
        let events = play(&mut board, &mut participants, 2, 0, kamikaze, 0, 0, &[1, 0]);

        assert_eq!(board.card_count(ParticipantId::new(0)), 1);
        assert_eq!(board.zone(ParticipantId::new(0))[0].name(), "Bystander");
        assert_eq!(board.zone(ParticipantId::new(0))[0].power(), 50);
        assert_eq!(participants[0].graveyard().count(), 1);
        assert!(events
            .iter()
            .any(|e| matches!(e, BoardEvent::CardDestroyed { card, .. } if card == "Kamikaze")));
    }

    #[test]
    fn test_timed_effect_waits_and_fires() {
        let mut board = Board::new(2);
        let mut participants = seats(2);

        let victim = card_for(1, "Victim", 40, attrs(AttributeKind::Buff, 1, 1));
        play(&mut board, &mut participants, 1, 1, victim, 0, 0, &[]);

        let bomber = Card::new(
            "Bomber",
            "",
            30,
            [
                Attribute::new("Fuse", "", AttributeKind::Inflict, 25, 1).delayed(2),
                Attribute::new("B", "", AttributeKind::Buff, 1, 1),
                Attribute::new("C", "", AttributeKind::Resilience, 1, 1),
            ],
            ParticipantId::new(0),
        );
        let events = play(&mut board, &mut participants, 2, 0, bomber, 0, 1, &[0]);
        assert!(events
            .iter()
            .any(|e| matches!(e, BoardEvent::EffectScheduled { due_turn: 4, .. })));
        assert_eq!(board.pending_effects().len(), 1);
        assert_eq!(board.zone(ParticipantId::new(1))[0].power(), 40);

        // Turn 3: not due. The pending note counts 0 full turns left.
        let filler = card_for(1, "Filler", 10, attrs(AttributeKind::Buff, 1, 1));
        let events = play(&mut board, &mut participants, 3, 1, filler, 0, 1, &[]);
        assert!(events
            .iter()
            .any(|e| matches!(e, BoardEvent::EffectPending { turns_left: 0, .. })));
        assert_eq!(board.pending_effects().len(), 1);
        assert_eq!(board.zone(ParticipantId::new(1))[0].power(), 40);

        // Turn 4: fires before the new card lands, then leaves the list.
        let filler = card_for(0, "Filler2", 10, attrs(AttributeKind::Buff, 1, 1));
        let events = play(&mut board, &mut participants, 4, 0, filler, 0, 0, &[]);
        assert!(events
            .iter()
            .any(|e| matches!(e, BoardEvent::EffectTriggered { .. })));
        assert!(board.pending_effects().is_empty());
        assert_eq!(board.zone(ParticipantId::new(1))[0].power(), 15);
    }

    #[test]
    fn test_invalid_target_index_rejected_before_placement() {
        let mut board = Board::new(2);
        let mut participants = seats(2);

        let card = card_for(0, "Opener", 30, attrs(AttributeKind::Inflict, 5, 1));
        let err = board
            .play_card(
                PlayDecision {
                    participant: ParticipantId::new(0),
                    card,
                    attribute_index: 0,
                    target_participant: ParticipantId::new(1),
                    target_slots: smallvec![2],
                },
                &mut participants,
                1,
            )
            .unwrap_err();

        assert_eq!(err, EngineError::InvalidTargetIndex { index: 2, cards_on_board: 0 });
        assert_eq!(board.card_count(ParticipantId::new(0)), 0);
    }

    #[test]
    fn test_invalid_attribute_index_rejected() {
        let mut board = Board::new(2);
        let mut participants = seats(2);

        let card = card_for(0, "Opener", 30, attrs(AttributeKind::Buff, 5, 1));
        let err = board
            .play_card(
                PlayDecision {
                    participant: ParticipantId::new(0),
                    card,
                    attribute_index: 3,
                    target_participant: ParticipantId::new(1),
                    target_slots: SmallVec::new(),
                },
                &mut participants,
                1,
            )
            .unwrap_err();

        assert_eq!(err, EngineError::InvalidAttributeIndex(3));
        assert_eq!(board.card_count(ParticipantId::new(0)), 0);
    }

    #[test]
    fn test_self_target_slot_of_new_card_is_legal() {
        let mut board = Board::new(2);
        let mut participants = seats(2);

        // Empty own zone; the card targets its own landing slot 0.
        let card = card_for(0, "Self-shield", 30, attrs(AttributeKind::Resilience, 15, 1));
        play(&mut board, &mut participants, 1, 0, card, 0, 0, &[0]);

        assert_eq!(board.zone(ParticipantId::new(0))[0].resilience(), 15);
    }

    #[test]
    fn test_preset_deck_flows_onto_board() {
        let mut board = Board::new(2);
        let mut participants = seats(2);

        let mut deck = Deck::load_preset(Faction::Elves, ParticipantId::new(0));
        let card = deck.dequeue().unwrap();
        let events = play(&mut board, &mut participants, 1, 0, card, 0, 1, &[]);

        assert!(matches!(
            &events[0],
            BoardEvent::CardPlaced { card, .. } if card == "Dol Blathanna Protector"
        ));
        let placed = &board.zone(ParticipantId::new(0))[0];
        assert_eq!(placed.active_attribute().unwrap().name(), "War Cry");
        assert!(board.contains(placed.uid().unwrap()));
    }
}
