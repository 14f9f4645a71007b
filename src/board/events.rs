//! Structured domain events.
//!
//! Every engine operation reports what happened as a list of `BoardEvent`
//! values instead of printing. The presentation layer decides how to render
//! them; the `Display` impl provides a plain-text rendering.

use serde::{Deserialize, Serialize};

use crate::core::ParticipantId;

/// One observable thing that happened during an engine operation.
///
/// Card and attribute fields carry display names, captured at the moment
/// the event was emitted. Participants are carried by id; the orchestrator
/// owns the id-to-name mapping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardEvent {
    /// A card entered a participant's zone.
    CardPlaced {
        participant: ParticipantId,
        card: String,
        position: usize,
    },

    /// A card was placed against an empty target zone; nothing triggered.
    PlacedWithoutTargets {
        participant: ParticipantId,
        card: String,
        attribute: String,
    },

    /// A timed attribute was put on the schedule.
    EffectScheduled {
        participant: ParticipantId,
        card: String,
        attribute: String,
        due_turn: u32,
    },

    /// A scheduled attribute is not due yet. `turns_left` is
    /// `due_turn - (current_turn + 1)` and is display-only.
    EffectPending {
        card: String,
        attribute: String,
        turns_left: i64,
    },

    /// A scheduled attribute came due and is about to resolve.
    EffectTriggered {
        card: String,
        attribute: String,
    },

    /// An Inflict activation. `absorbed` is true when resilience soaked
    /// the whole hit and power was untouched.
    Inflicted {
        source: String,
        target: String,
        amount: i64,
        absorbed: bool,
    },

    /// A Buff activation.
    Buffed {
        source: String,
        target: String,
        amount: i64,
    },

    /// A Resilience activation.
    ResilienceRaised {
        source: String,
        target: String,
        amount: i64,
    },

    /// Emitted after every activation, whatever the kind.
    AttributeActivated {
        attribute: String,
        source: String,
        target: String,
    },

    /// A card's power dropped to zero or below and it moved to its
    /// owner's graveyard.
    CardDestroyed {
        participant: ParticipantId,
        card: String,
    },
}

impl std::fmt::Display for BoardEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardEvent::CardPlaced { participant, card, position } => {
                write!(f, "{card} was added to {participant}'s board (position {position})")
            }
            BoardEvent::PlacedWithoutTargets { card, attribute, .. } => {
                write!(
                    f,
                    "No targets found for {attribute} of {card}! The card was placed without its attribute triggering"
                )
            }
            BoardEvent::EffectScheduled { card, attribute, due_turn, .. } => {
                write!(f, "Timed attribute! {card}'s {attribute} will deploy on turn {due_turn}")
            }
            BoardEvent::EffectPending { card, attribute, turns_left } => {
                write!(f, "Timed attribute! {card}'s '{attribute}' ({turns_left} turns left)")
            }
            BoardEvent::EffectTriggered { card, attribute } => {
                write!(f, "Timed attribute triggered! {card}'s {attribute}")
            }
            BoardEvent::Inflicted { source, target, amount, absorbed } => {
                if *absorbed {
                    write!(
                        f,
                        "{source} inflicted {amount} damage on {target}, but resilience protected the target's power"
                    )
                } else {
                    write!(f, "{source} inflicted {amount} damage on {target}")
                }
            }
            BoardEvent::Buffed { source, target, amount } => {
                write!(f, "{source} buffed {target} by {amount}")
            }
            BoardEvent::ResilienceRaised { source, target, amount } => {
                write!(f, "{source} raised {target}'s resilience by {amount}")
            }
            BoardEvent::AttributeActivated { attribute, source, target } => {
                write!(f, "Attribute '{attribute}' of {source} was activated targeting {target}")
            }
            BoardEvent::CardDestroyed { participant, card } => {
                write!(f, "{participant}'s card has been destroyed - {card}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_inflicted() {
        let hit = BoardEvent::Inflicted {
            source: "Sailor".to_string(),
            target: "Knight".to_string(),
            amount: 5,
            absorbed: false,
        };
        assert_eq!(hit.to_string(), "Sailor inflicted 5 damage on Knight");

        let soaked = BoardEvent::Inflicted {
            source: "Sailor".to_string(),
            target: "Knight".to_string(),
            amount: 5,
            absorbed: true,
        };
        assert!(soaked.to_string().contains("resilience protected"));
    }

    #[test]
    fn test_display_destroyed() {
        let event = BoardEvent::CardDestroyed {
            participant: ParticipantId::new(1),
            card: "Peasent".to_string(),
        };
        assert_eq!(
            event.to_string(),
            "Participant 1's card has been destroyed - Peasent"
        );
    }

    #[test]
    fn test_serialization() {
        let event = BoardEvent::Buffed {
            source: "Elf King".to_string(),
            target: "Elf Queen".to_string(),
            amount: 5,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: BoardEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
