#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure turn-flow system that alternates control between the two players.
//!
//! The world never decides who moves next; it only reports that the current
//! holder asked to end their turn. This system observes that event and emits
//! the `SetTurn` command naming the opposing player, keeping the handover
//! policy out of the authoritative state entirely.

use gridlock_core::{Command, EntityName, Event};

/// Alternates the turn between two fixed player entities.
#[derive(Debug)]
pub struct TurnFlow {
    players: [EntityName; 2],
}

impl TurnFlow {
    /// Creates a turn flow for the given pair of player entities.
    #[must_use]
    pub fn new(first: EntityName, second: EntityName) -> Self {
        Self {
            players: [first, second],
        }
    }

    /// The opposing player of `current`, if `current` is a known player.
    #[must_use]
    pub fn opponent(&self, current: &EntityName) -> Option<&EntityName> {
        if current == &self.players[0] {
            Some(&self.players[1])
        } else if current == &self.players[1] {
            Some(&self.players[0])
        } else {
            None
        }
    }

    /// Consumes world events and emits a handover command for every turn-end
    /// request raised by a known player.
    pub fn handle(&self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            if let Event::TurnEndRequested { current } = event {
                if let Some(next) = self.opponent(current) {
                    out.push(Command::SetTurn { name: next.clone() });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flow() -> TurnFlow {
        TurnFlow::new(EntityName::new("player-1"), EntityName::new("player-2"))
    }

    #[test]
    fn handover_names_the_opposing_player() {
        let flow = flow();
        let mut commands = Vec::new();

        flow.handle(
            &[Event::TurnEndRequested {
                current: EntityName::new("player-1"),
            }],
            &mut commands,
        );

        assert_eq!(
            commands,
            vec![Command::SetTurn {
                name: EntityName::new("player-2")
            }]
        );
    }

    #[test]
    fn handover_alternates_in_both_directions() {
        let flow = flow();
        let mut commands = Vec::new();

        flow.handle(
            &[Event::TurnEndRequested {
                current: EntityName::new("player-2"),
            }],
            &mut commands,
        );

        assert_eq!(
            commands,
            vec![Command::SetTurn {
                name: EntityName::new("player-1")
            }]
        );
    }

    #[test]
    fn unknown_entities_never_trigger_a_handover() {
        let flow = flow();
        let mut commands = Vec::new();

        flow.handle(
            &[Event::TurnEndRequested {
                current: EntityName::new("truck-1"),
            }],
            &mut commands,
        );

        assert!(commands.is_empty());
    }

    #[test]
    fn unrelated_events_are_ignored() {
        let flow = flow();
        let mut commands = Vec::new();

        flow.handle(
            &[Event::EntitySelected {
                name: EntityName::new("car-2"),
            }],
            &mut commands,
        );

        assert!(commands.is_empty());
    }
}
