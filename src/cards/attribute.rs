//! Attribute definitions and activation.
//!
//! An attribute is the effect a card is played with: a kind from a closed
//! set, a magnitude, how many cards it touches, and whether it resolves
//! immediately or a fixed number of turns later. Attributes are immutable
//! once built.

use serde::{Deserialize, Serialize};

use crate::board::events::BoardEvent;

use super::card::Card;

/// The closed set of attribute kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeKind {
    /// Deals damage to target cards, soaked by resilience first.
    Inflict,
    /// Raises a target card's power.
    Buff,
    /// Raises a target card's resilience.
    Resilience,
}

impl AttributeKind {
    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            AttributeKind::Inflict => "Inflict",
            AttributeKind::Buff => "Buff",
            AttributeKind::Resilience => "Resilience",
        }
    }

    /// One-line description for setup screens.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            AttributeKind::Inflict => "Deals damage to cards on the board",
            AttributeKind::Buff => "Buffs a card already on the board",
            AttributeKind::Resilience => "Shields a card on the board against damage",
        }
    }
}

/// When an attribute resolves relative to the turn it was played on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timing {
    /// Resolves during the play that deployed it.
    Immediate,
    /// Resolves `turns` turns after the play that deployed it.
    Delayed { turns: u32 },
}

/// An effect definition carried by a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    description: String,
    kind: AttributeKind,
    magnitude: i64,
    target_count: usize,
    timing: Timing,
}

impl Attribute {
    /// Create an immediate attribute. Magnitude must be non-negative.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        kind: AttributeKind,
        magnitude: i64,
        target_count: usize,
    ) -> Self {
        assert!(magnitude >= 0, "Attribute magnitude must be non-negative");
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            magnitude,
            target_count,
            timing: Timing::Immediate,
        }
    }

    /// Turn this attribute into a timed one resolving `turns` turns after
    /// it is played (builder pattern).
    #[must_use]
    pub fn delayed(mut self, turns: u32) -> Self {
        self.timing = Timing::Delayed { turns };
        self
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

    /// Effect kind.
    #[must_use]
    pub fn kind(&self) -> AttributeKind {
        self.kind
    }

    /// Effect strength.
    #[must_use]
    pub fn magnitude(&self) -> i64 {
        self.magnitude
    }

    /// How many cards this attribute must affect when it resolves.
    #[must_use]
    pub fn target_count(&self) -> usize {
        self.target_count
    }

    /// Resolution timing.
    #[must_use]
    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Whether resolution is delayed.
    #[must_use]
    pub fn is_timed(&self) -> bool {
        matches!(self.timing, Timing::Delayed { .. })
    }

    /// Activate this attribute from a source card against one target.
    ///
    /// The Inflict arithmetic is deliberately asymmetric and must stay so:
    /// `leftover = resilience - magnitude`. Power only changes when the
    /// leftover is negative, in which case resilience clamps to zero and
    /// the (negative) leftover is added to power. When resilience covers
    /// the hit, power is untouched and the hit counts as absorbed.
    pub fn activate(&self, source_name: &str, target: &mut Card, events: &mut Vec<BoardEvent>) {
        match self.kind {
            AttributeKind::Inflict => {
                let leftover = target.resilience() - self.magnitude;
                if leftover < 0 {
                    target.set_resilience(0);
                    target.set_power(target.power() + leftover);
                    events.push(BoardEvent::Inflicted {
                        source: source_name.to_string(),
                        target: target.name().to_string(),
                        amount: self.magnitude,
                        absorbed: false,
                    });
                } else {
                    target.set_resilience(leftover);
                    events.push(BoardEvent::Inflicted {
                        source: source_name.to_string(),
                        target: target.name().to_string(),
                        amount: self.magnitude,
                        absorbed: true,
                    });
                }
            }
            AttributeKind::Buff => {
                target.set_power(target.power() + self.magnitude);
                events.push(BoardEvent::Buffed {
                    source: source_name.to_string(),
                    target: target.name().to_string(),
                    amount: self.magnitude,
                });
            }
            AttributeKind::Resilience => {
                target.set_resilience(target.resilience() + self.magnitude);
                events.push(BoardEvent::ResilienceRaised {
                    source: source_name.to_string(),
                    target: target.name().to_string(),
                    amount: self.magnitude,
                });
            }
        }

        events.push(BoardEvent::AttributeActivated {
            attribute: self.name.clone(),
            source: source_name.to_string(),
            target: target.name().to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ParticipantId;

    fn target_card(power: i64, resilience: i64) -> Card {
        let mut card = Card::new(
            "Target",
            "",
            power,
            [
                Attribute::new("A", "", AttributeKind::Buff, 1, 1),
                Attribute::new("B", "", AttributeKind::Inflict, 1, 1),
                Attribute::new("C", "", AttributeKind::Resilience, 1, 1),
            ],
            ParticipantId::new(0),
        );
        card.set_resilience(resilience);
        card
    }

    #[test]
    fn test_inflict_breaks_through_resilience() {
        // Resilience 10, power 50, hit for 15: the leftover of -5 lands on power.
        let mut target = target_card(50, 10);
        let attr = Attribute::new("Shot", "", AttributeKind::Inflict, 15, 1);
        let mut events = Vec::new();

        attr.activate("Source", &mut target, &mut events);

        assert_eq!(target.resilience(), 0);
        assert_eq!(target.power(), 45);
        assert!(matches!(
            events[0],
            BoardEvent::Inflicted { absorbed: false, amount: 15, .. }
        ));
    }

    #[test]
    fn test_inflict_fully_absorbed() {
        // Same fixture, hit for 5: resilience soaks it, power untouched.
        let mut target = target_card(50, 10);
        let attr = Attribute::new("Shot", "", AttributeKind::Inflict, 5, 1);
        let mut events = Vec::new();

        attr.activate("Source", &mut target, &mut events);

        assert_eq!(target.resilience(), 5);
        assert_eq!(target.power(), 50);
        assert!(matches!(
            events[0],
            BoardEvent::Inflicted { absorbed: true, .. }
        ));
    }

    #[test]
    fn test_inflict_exact_absorption_leaves_power_alone() {
        // leftover == 0 goes down the absorbed branch.
        let mut target = target_card(50, 10);
        let attr = Attribute::new("Shot", "", AttributeKind::Inflict, 10, 1);
        let mut events = Vec::new();

        attr.activate("Source", &mut target, &mut events);

        assert_eq!(target.resilience(), 0);
        assert_eq!(target.power(), 50);
        assert!(matches!(
            events[0],
            BoardEvent::Inflicted { absorbed: true, .. }
        ));
    }

    #[test]
    fn test_inflict_with_no_resilience() {
        let mut target = target_card(20, 0);
        let attr = Attribute::new("Shot", "", AttributeKind::Inflict, 7, 1);
        let mut events = Vec::new();

        attr.activate("Source", &mut target, &mut events);

        assert_eq!(target.resilience(), 0);
        assert_eq!(target.power(), 13);
    }

    #[test]
    fn test_buff() {
        let mut target = target_card(20, 0);
        let attr = Attribute::new("War Cry", "", AttributeKind::Buff, 10, 1);
        let mut events = Vec::new();

        attr.activate("Source", &mut target, &mut events);

        assert_eq!(target.power(), 30);
        assert_eq!(events.len(), 2);
        assert!(matches!(events[1], BoardEvent::AttributeActivated { .. }));
    }

    #[test]
    fn test_resilience() {
        let mut target = target_card(20, 3);
        let attr = Attribute::new("Sensibility", "", AttributeKind::Resilience, 15, 3);
        let mut events = Vec::new();

        attr.activate("Source", &mut target, &mut events);

        assert_eq!(target.resilience(), 18);
        assert_eq!(target.power(), 20);
    }

    #[test]
    fn test_timing_builder() {
        let attr = Attribute::new("Peace", "", AttributeKind::Resilience, 200, 1).delayed(2);

        assert!(attr.is_timed());
        assert_eq!(attr.timing(), Timing::Delayed { turns: 2 });

        let plain = Attribute::new("Peace", "", AttributeKind::Resilience, 200, 1);
        assert!(!plain.is_timed());
    }

    #[test]
    #[should_panic(expected = "non-negative")]
    fn test_negative_magnitude_rejected() {
        let _ = Attribute::new("Bad", "", AttributeKind::Buff, -1, 1);
    }

    #[test]
    fn test_serialization() {
        let attr = Attribute::new("Ahoy!", "", AttributeKind::Buff, 20, 3).delayed(4);
        let json = serde_json::to_string(&attr).unwrap();
        let back: Attribute = serde_json::from_str(&json).unwrap();
        assert_eq!(attr, back);
    }
}
