#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Gridlock.
//!
//! The world owns the entity table built from a level definition and
//! mutates it exclusively through [`apply`], broadcasting [`Event`] values
//! that pure systems react to. Selection, turn permissions and the sliding
//! simulation all live here; blocking limits are delegated to the pure
//! collision system.

pub mod levels;

use std::time::Duration;

use gridlock_core::{
    Axis, BlockColor, BlockSize, Command, EntityLookupError, EntityName, EntitySnapshot,
    EntityView, Event, GridConfig, PixelPosition, BACKGROUND_NAME,
};
use gridlock_system_collision::{slide_limits, SlideLimits};

use crate::levels::Level;

/// Represents the authoritative Gridlock world state.
#[derive(Debug)]
pub struct World {
    grid: GridConfig,
    level_name: String,
    players: [EntityName; 2],
    entities: Vec<Entity>,
    selected: Option<usize>,
    turn_holder: Option<usize>,
}

impl World {
    /// Builds a world from a level definition and grid configuration.
    ///
    /// Entities are created once and mutated in place for the lifetime of
    /// the session. The caller establishes the initial turn state by
    /// applying [`Command::Reset`].
    #[must_use]
    pub fn from_level(level: &Level, grid: GridConfig) -> Self {
        let mut entities = Vec::with_capacity(level.objects.len() + 1);
        entities.push(Entity::background(level.background, grid));
        for definition in &level.objects {
            entities.push(Entity::from_definition(definition, grid));
        }

        Self {
            grid,
            level_name: level.name.to_string(),
            players: [
                EntityName::new(level.players[0]),
                EntityName::new(level.players[1]),
            ],
            entities,
            selected: None,
            turn_holder: None,
        }
    }

    fn index_of(&self, name: &EntityName) -> Option<usize> {
        self.entities.iter().position(|entity| &entity.name == name)
    }

    fn unselect_all(&mut self) {
        for entity in &mut self.entities {
            entity.unselect();
        }
        self.selected = None;
    }

    fn select_index(&mut self, index: usize) {
        self.unselect_all();
        self.entities[index].select();
        self.selected = Some(index);
    }

    fn set_turn(&mut self, name: &EntityName, out_events: &mut Vec<Event>) {
        if !self.players.contains(name) {
            return;
        }
        let Some(index) = self.index_of(name) else {
            return;
        };

        self.select_index(index);

        let holder = self.entities[index].name.clone();
        for entity in &mut self.entities {
            entity.allow = Some(holder.clone());
            entity.turn = false;
        }

        // Players can never grab each other's piece.
        for player in self.players.clone() {
            if player != holder {
                if let Some(player_index) = self.index_of(&player) {
                    self.entities[player_index].allow = None;
                }
            }
        }

        self.entities[index].turn = true;
        self.turn_holder = Some(index);
        out_events.push(Event::TurnChanged { name: holder });
    }

    fn advance_motion(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let Some(index) = self.selected else {
            return;
        };

        let mover = self.entities[index].snapshot();
        if !mover.in_motion || mover.scheduled_target.is_none() || mover.speed <= 0.0 {
            return;
        }

        let others: Vec<EntitySnapshot> = self
            .entities
            .iter()
            .enumerate()
            .filter(|(other_index, entity)| {
                *other_index != index && !entity.name.is_background()
            })
            .map(|(_, entity)| entity.snapshot())
            .collect();
        let limits = slide_limits(&mover, others.iter(), self.grid.cell_size());

        if let Some(position) = self.entities[index].advance(dt, limits, self.grid) {
            out_events.push(Event::SlideCompleted {
                name: mover.name,
                position,
            });
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Requests that reference entities the current turn holder may not touch,
/// or that arrive while nothing is selected, are silent no-ops by design;
/// the interaction model is permissive rather than error-driven.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::SelectEntity { name } => {
            let Some(holder_index) = world.turn_holder else {
                return;
            };
            let holder = world.entities[holder_index].name.clone();
            let Some(index) = world.index_of(&name) else {
                return;
            };

            let entity = &world.entities[index];
            if entity.name.is_background() || entity.speed <= 0.0 {
                return;
            }
            if !entity.can_select(&holder) {
                return;
            }

            world.select_index(index);
            out_events.push(Event::EntitySelected { name });
        }
        Command::ScheduleMovement { click } => {
            let Some(index) = world.selected else {
                return;
            };
            let grid = world.grid;
            let entity = &mut world.entities[index];
            match entity.schedule(click, grid) {
                Some(ScheduleOutcome::Armed) => out_events.push(Event::MovementArmed {
                    name: entity.name.clone(),
                }),
                Some(ScheduleOutcome::Committed { target }) => {
                    out_events.push(Event::MovementScheduled {
                        name: entity.name.clone(),
                        target,
                    })
                }
                None => {}
            }
        }
        Command::Tick { dt } => {
            out_events.push(Event::TimeAdvanced { dt });
            world.advance_motion(dt, out_events);
        }
        Command::SetTurn { name } => {
            world.set_turn(&name, out_events);
        }
        Command::EndTurn => {
            if let Some(index) = world.turn_holder {
                out_events.push(Event::TurnEndRequested {
                    current: world.entities[index].name.clone(),
                });
            }
        }
        Command::Reset => {
            let first = world.players[0].clone();
            world.set_turn(&first, out_events);
        }
        Command::MarkReady { name } => {
            if let Some(index) = world.index_of(&name) {
                if !world.entities[index].ready {
                    world.entities[index].ready = true;
                    out_events.push(Event::EntityReady { name });
                }
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{EntityLookupError, EntityName, EntitySnapshot, EntityView, GridConfig, World};

    /// Captures a read-only view of every entity on the board.
    #[must_use]
    pub fn entity_view(world: &World) -> EntityView {
        EntityView::from_snapshots(
            world
                .entities
                .iter()
                .map(super::Entity::snapshot)
                .collect(),
        )
    }

    /// Resolves a single entity by name.
    ///
    /// A failed lookup indicates a level-definition or programming bug and
    /// surfaces as a typed error rather than a silent default.
    pub fn entity(world: &World, name: &EntityName) -> Result<EntitySnapshot, EntityLookupError> {
        world
            .entities
            .iter()
            .find(|entity| &entity.name == name)
            .map(super::Entity::snapshot)
            .ok_or_else(|| EntityLookupError::NotFound { name: name.clone() })
    }

    /// Name of the entity currently holding the selection, if any.
    #[must_use]
    pub fn selected_entity(world: &World) -> Option<EntityName> {
        world
            .selected
            .map(|index| world.entities[index].name.clone())
    }

    /// Name of the player entity currently holding the turn, if any.
    #[must_use]
    pub fn turn_holder(world: &World) -> Option<EntityName> {
        world
            .turn_holder
            .map(|index| world.entities[index].name.clone())
    }

    /// Grid configuration the world was built with.
    #[must_use]
    pub fn grid(world: &World) -> GridConfig {
        world.grid
    }

    /// Display name of the loaded level.
    #[must_use]
    pub fn level_name(world: &World) -> &str {
        &world.level_name
    }

    /// Names of the two player entities in turn order.
    #[must_use]
    pub fn players(world: &World) -> [EntityName; 2] {
        world.players.clone()
    }

    /// Entities still waiting on a visual asset, with the asset reference.
    ///
    /// The adapter resolves each entry and reports completion through
    /// `Command::MarkReady`; entities without assets are born ready.
    #[must_use]
    pub fn pending_assets(world: &World) -> Vec<(EntityName, String)> {
        world
            .entities
            .iter()
            .filter(|entity| !entity.ready)
            .filter_map(|entity| {
                entity
                    .image_ref
                    .as_ref()
                    .map(|image| (entity.name.clone(), image.clone()))
            })
            .collect()
    }
}

enum ScheduleOutcome {
    Armed,
    Committed { target: f32 },
}

#[derive(Clone, Debug)]
struct Entity {
    name: EntityName,
    position: PixelPosition,
    size: BlockSize,
    axis: Axis,
    speed: f32,
    color: BlockColor,
    scheduled_target: Option<f32>,
    selected: bool,
    in_motion: bool,
    allow: Option<EntityName>,
    turn: bool,
    ready: bool,
    image_ref: Option<String>,
}

impl Entity {
    fn background(color: BlockColor, grid: GridConfig) -> Self {
        Self {
            name: EntityName::new(BACKGROUND_NAME),
            position: PixelPosition::new(0.0, 0.0),
            size: BlockSize::new(grid.board_cells(), grid.board_cells()),
            axis: Axis::X,
            speed: 0.0,
            color,
            scheduled_target: None,
            selected: false,
            in_motion: false,
            allow: None,
            turn: false,
            ready: true,
            image_ref: None,
        }
    }

    fn from_definition(definition: &levels::EntityDefinition, grid: GridConfig) -> Self {
        Self {
            name: EntityName::new(definition.name),
            position: PixelPosition::new(
                grid.to_pixels(definition.cell_x),
                grid.to_pixels(definition.cell_y),
            ),
            size: definition.size,
            axis: definition.axis,
            speed: grid.default_speed(),
            color: definition.color,
            scheduled_target: None,
            selected: false,
            in_motion: false,
            allow: None,
            turn: false,
            ready: definition.image_ref.is_none(),
            image_ref: definition.image_ref.map(str::to_string),
        }
    }

    fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            name: self.name.clone(),
            position: self.position,
            size: self.size,
            axis: self.axis,
            speed: self.speed,
            color: self.color,
            selected: self.selected,
            in_motion: self.in_motion,
            scheduled_target: self.scheduled_target,
            allowed_selector: self.allow.clone(),
            is_turn_holder: self.turn,
            ready: self.ready,
        }
    }

    fn can_select(&self, selector: &EntityName) -> bool {
        self.allow.as_ref() == Some(selector)
    }

    fn select(&mut self) {
        self.selected = true;
        // A freshly selected entity must not inherit a movement impulse
        // from the click that selected it.
        self.in_motion = false;
    }

    fn unselect(&mut self) {
        self.selected = false;
        self.scheduled_target = None;
        self.in_motion = false;
    }

    fn schedule(&mut self, click: PixelPosition, grid: GridConfig) -> Option<ScheduleOutcome> {
        if !self.selected {
            return None;
        }

        if !self.in_motion {
            self.in_motion = true;
            return Some(ScheduleOutcome::Armed);
        }

        let target = grid.snap_up(click.along(self.axis));
        self.scheduled_target = Some(target);
        Some(ScheduleOutcome::Committed { target })
    }

    /// Advances the slide by one timestep, clamped by the blocking limits.
    ///
    /// Returns the final resting position once the slide completes. The
    /// entity always comes to rest on a cell boundary: forward travel parks
    /// the leading edge on the target, backward travel parks the trailing
    /// edge on the left boundary of the clicked cell, and a slide that
    /// reaches a blocking limit terminates at the limit.
    fn advance(&mut self, dt: Duration, limits: SlideLimits, grid: GridConfig) -> Option<PixelPosition> {
        let target = self.scheduled_target?;
        let axis = self.axis;
        let cell = grid.cell_size();
        let extent = self.size.extent(axis, cell);
        let current = self.position.along(axis);
        let step = self.speed * dt.as_secs_f32();

        if target > current + extent {
            let mut stop = target - extent;
            if let Some(max) = limits.max() {
                stop = stop.min(max - extent);
            }
            // A limit behind the leading edge pins the mover in place.
            let stop = stop.max(current);
            let next = current + step;
            if next >= stop {
                Some(self.finish_at(axis, stop))
            } else {
                self.position = self.position.with_along(axis, next);
                None
            }
        } else if target - cell < current {
            let mut stop = target - cell;
            if let Some(min) = limits.min() {
                stop = stop.max(min);
            }
            let stop = stop.min(current);
            let next = current - step;
            if next <= stop {
                Some(self.finish_at(axis, stop))
            } else {
                self.position = self.position.with_along(axis, next);
                None
            }
        } else {
            // Target already within the entity's own span; nothing to do.
            Some(self.finish_at(axis, current))
        }
    }

    fn finish_at(&mut self, axis: Axis, resting: f32) -> PixelPosition {
        self.position = self.position.with_along(axis, resting);
        self.scheduled_target = None;
        self.in_motion = false;
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels;

    const STEP: Duration = Duration::from_nanos(16_666_667);

    fn world() -> World {
        let catalog = levels::catalog();
        let level = levels::pick(&catalog, 0).expect("catalog has levels");
        World::from_level(level, GridConfig::default())
    }

    fn reset(world: &mut World) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, Command::Reset, &mut events);
        events
    }

    fn name(value: &str) -> EntityName {
        EntityName::new(value)
    }

    fn select(world: &mut World, target: &str) -> Vec<Event> {
        let mut events = Vec::new();
        apply(
            world,
            Command::SelectEntity {
                name: name(target),
            },
            &mut events,
        );
        events
    }

    fn click(world: &mut World, x: f32, y: f32) -> Vec<Event> {
        let mut events = Vec::new();
        apply(
            world,
            Command::ScheduleMovement {
                click: PixelPosition::new(x, y),
            },
            &mut events,
        );
        events
    }

    fn tick_until_rest(world: &mut World, max_ticks: u32) -> Vec<Event> {
        let mut completed = Vec::new();
        for _ in 0..max_ticks {
            let mut events = Vec::new();
            apply(world, Command::Tick { dt: STEP }, &mut events);
            let done = events
                .iter()
                .any(|event| matches!(event, Event::SlideCompleted { .. }));
            completed.extend(events);
            if done {
                break;
            }
        }
        completed
    }

    #[test]
    fn from_level_converts_cells_to_pixels() {
        let world = world();
        let player = query::entity(&world, &name("player-1")).expect("player exists");
        assert_eq!(player.position, PixelPosition::new(100.0, 100.0));
        assert_eq!(player.size, BlockSize::new(2, 1));
        assert_eq!(player.axis, Axis::X);
        assert!(player.ready);
    }

    #[test]
    fn lookup_of_unknown_entity_is_a_typed_error() {
        let world = world();
        let missing = name("ambulance-9");
        assert_eq!(
            query::entity(&world, &missing),
            Err(EntityLookupError::NotFound { name: missing })
        );
    }

    #[test]
    fn reset_hands_the_turn_to_the_first_player() {
        let mut world = world();
        let events = reset(&mut world);

        assert_eq!(
            events,
            vec![Event::TurnChanged {
                name: name("player-1")
            }]
        );
        assert_eq!(query::turn_holder(&world), Some(name("player-1")));
        assert_eq!(query::selected_entity(&world), Some(name("player-1")));
    }

    #[test]
    fn set_turn_blanks_the_opposing_player_only() {
        let mut world = world();
        let _ = reset(&mut world);

        let view = query::entity_view(&world);
        let holder = name("player-1");
        for snapshot in view.iter() {
            if snapshot.name == name("player-2") {
                assert_eq!(snapshot.allowed_selector, None);
            } else {
                assert_eq!(snapshot.allowed_selector, Some(holder.clone()));
            }
        }
        assert!(view.get(&holder).expect("holder exists").is_turn_holder);
    }

    #[test]
    fn set_turn_marks_exactly_one_turn_holder() {
        let mut world = world();
        let _ = reset(&mut world);

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SetTurn {
                name: name("player-2"),
            },
            &mut events,
        );

        let view = query::entity_view(&world);
        let holders: Vec<&str> = view
            .iter()
            .filter(|snapshot| snapshot.is_turn_holder)
            .map(|snapshot| snapshot.name.as_str())
            .collect();
        assert_eq!(holders, vec!["player-2"]);
        assert_eq!(
            events,
            vec![Event::TurnChanged {
                name: name("player-2")
            }]
        );
    }

    #[test]
    fn set_turn_ignores_non_player_entities() {
        let mut world = world();
        let _ = reset(&mut world);

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SetTurn {
                name: name("truck-1"),
            },
            &mut events,
        );

        assert!(events.is_empty());
        assert_eq!(query::turn_holder(&world), Some(name("player-1")));
    }

    #[test]
    fn selection_is_gated_by_turn_permission() {
        let mut world = world();
        let _ = reset(&mut world);

        // The opposing player's piece is blanked out for this turn.
        let events = select(&mut world, "player-2");
        assert!(events.is_empty());
        assert_eq!(query::selected_entity(&world), Some(name("player-1")));

        // Any neutral piece is fair game.
        let events = select(&mut world, "truck-1");
        assert_eq!(
            events,
            vec![Event::EntitySelected {
                name: name("truck-1")
            }]
        );
        assert_eq!(query::selected_entity(&world), Some(name("truck-1")));
    }

    #[test]
    fn at_most_one_entity_is_selected() {
        let mut world = world();
        let _ = reset(&mut world);
        let _ = select(&mut world, "truck-1");
        let _ = select(&mut world, "car-2");

        let view = query::entity_view(&world);
        let selected: Vec<&str> = view
            .iter()
            .filter(|snapshot| snapshot.selected)
            .map(|snapshot| snapshot.name.as_str())
            .collect();
        assert_eq!(selected, vec!["car-2"]);
    }

    #[test]
    fn background_is_never_selectable() {
        let mut world = world();
        let _ = reset(&mut world);

        let events = select(&mut world, BACKGROUND_NAME);
        assert!(events.is_empty());
        assert_eq!(query::selected_entity(&world), Some(name("player-1")));
    }

    #[test]
    fn first_click_arms_and_second_commits_a_snapped_target() {
        let mut world = world();
        let _ = reset(&mut world);
        let _ = select(&mut world, "player-1");

        let armed = click(&mut world, 150.0, 125.0);
        assert_eq!(
            armed,
            vec![Event::MovementArmed {
                name: name("player-1")
            }]
        );

        let committed = click(&mut world, 301.0, 125.0);
        assert_eq!(
            committed,
            vec![Event::MovementScheduled {
                name: name("player-1"),
                target: 350.0
            }]
        );
    }

    #[test]
    fn scheduling_without_a_selection_is_a_silent_no_op() {
        let mut world = world();
        // No reset: nothing is selected yet.
        let events = click(&mut world, 150.0, 125.0);
        assert!(events.is_empty());
    }

    #[test]
    fn forward_slide_settles_exactly_on_the_target_minus_extent() {
        let mut world = world();
        let _ = reset(&mut world);
        // car-3 is a 2x1 block on row 3 with nothing ahead of it until
        // truck-5's column at x = 300.
        let _ = select(&mut world, "car-3");
        let _ = click(&mut world, 25.0, 175.0);
        let _ = click(&mut world, 210.0, 175.0);

        let events = tick_until_rest(&mut world, 600);
        let rest = events.iter().find_map(|event| match event {
            Event::SlideCompleted { position, .. } => Some(*position),
            _ => None,
        });

        // The click snaps up to x = 250 and the leading edge parks there.
        assert_eq!(rest, Some(PixelPosition::new(150.0, 150.0)));
        let car = query::entity(&world, &name("car-3")).expect("car exists");
        assert_eq!(car.scheduled_target, None);
        assert!(!car.in_motion);
        assert_eq!(car.position.x() % 50.0, 0.0);
    }

    #[test]
    fn backward_slide_parks_the_trailing_edge_on_the_clicked_cell() {
        let mut world = world();
        let _ = reset(&mut world);
        // truck-2 occupies column 1, rows 4..6; row 3 of its column is free.
        let _ = select(&mut world, "truck-2");
        let _ = click(&mut world, 75.0, 250.0);
        let _ = click(&mut world, 75.0, 160.0);

        let events = tick_until_rest(&mut world, 600);
        let rest = events.iter().find_map(|event| match event {
            Event::SlideCompleted { position, .. } => Some(*position),
            _ => None,
        });

        // The click snaps up to y = 200; the trailing edge parks on the
        // clicked cell's near boundary at y = 150.
        assert_eq!(rest, Some(PixelPosition::new(50.0, 150.0)));
    }

    #[test]
    fn slide_stops_at_the_nearest_blocking_neighbor() {
        let mut world = world();
        let _ = reset(&mut world);
        let _ = select(&mut world, "car-3");
        let _ = click(&mut world, 25.0, 175.0);
        let _ = click(&mut world, 340.0, 175.0);

        let events = tick_until_rest(&mut world, 600);
        let rest = events.iter().find_map(|event| match event {
            Event::SlideCompleted { position, .. } => Some(*position),
            _ => None,
        });

        // truck-5 occupies column 6 on rows 3..6, so car-3's slide along
        // row 3 must stop with its leading edge on x = 300.
        assert_eq!(rest, Some(PixelPosition::new(200.0, 150.0)));
    }

    #[test]
    fn touching_neighbor_pins_the_mover_in_place() {
        let mut world = world();
        let _ = reset(&mut world);
        // truck-4 occupies cell (4, 2) directly ahead of player-1.
        let _ = select(&mut world, "player-1");
        let _ = click(&mut world, 150.0, 125.0);
        let _ = click(&mut world, 340.0, 125.0);

        let events = tick_until_rest(&mut world, 10);
        let rest = events.iter().find_map(|event| match event {
            Event::SlideCompleted { position, .. } => Some(*position),
            _ => None,
        });

        assert_eq!(rest, Some(PixelPosition::new(100.0, 100.0)));
    }

    #[test]
    fn axis_never_changes_across_a_slide() {
        let mut world = world();
        let _ = reset(&mut world);
        let _ = select(&mut world, "truck-2");
        let before = query::entity(&world, &name("truck-2")).expect("exists");

        let _ = click(&mut world, 75.0, 250.0);
        let _ = click(&mut world, 75.0, 30.0);
        let _ = tick_until_rest(&mut world, 600);

        let after = query::entity(&world, &name("truck-2")).expect("exists");
        assert_eq!(before.axis, after.axis);
        assert_eq!(before.position.x(), after.position.x());
    }

    #[test]
    fn selecting_another_entity_cancels_a_scheduled_slide() {
        let mut world = world();
        let _ = reset(&mut world);
        let _ = select(&mut world, "player-1");
        let _ = click(&mut world, 150.0, 125.0);
        let _ = click(&mut world, 350.0, 125.0);

        let _ = select(&mut world, "truck-1");
        let player = query::entity(&world, &name("player-1")).expect("exists");
        assert!(!player.selected);
        assert_eq!(player.scheduled_target, None);
        assert!(!player.in_motion);
    }

    #[test]
    fn end_turn_requests_a_handover_without_mutating_state() {
        let mut world = world();
        let _ = reset(&mut world);

        let mut events = Vec::new();
        apply(&mut world, Command::EndTurn, &mut events);

        assert_eq!(
            events,
            vec![Event::TurnEndRequested {
                current: name("player-1")
            }]
        );
        assert_eq!(query::turn_holder(&world), Some(name("player-1")));
    }

    #[test]
    fn mark_ready_flips_the_readiness_flag_once() {
        let level = Level {
            name: "Asset Check",
            background: gridlock_core::BlockColor::from_rgb(0xd3, 0xd3, 0xd3),
            players: ["player-1", "player-2"],
            objects: vec![
                levels::EntityDefinition {
                    name: "player-1",
                    size: BlockSize::new(2, 1),
                    cell_x: 0,
                    cell_y: 0,
                    axis: Axis::X,
                    color: gridlock_core::BlockColor::from_rgb(0xb2, 0x22, 0x22),
                    image_ref: Some("images/monster.png"),
                },
                levels::EntityDefinition {
                    name: "player-2",
                    size: BlockSize::new(2, 1),
                    cell_x: 0,
                    cell_y: 2,
                    axis: Axis::X,
                    color: gridlock_core::BlockColor::from_rgb(0xb2, 0x22, 0x22),
                    image_ref: None,
                },
            ],
        };
        let mut world = World::from_level(&level, GridConfig::default());

        let pending = query::pending_assets(&world);
        assert_eq!(
            pending,
            vec![(name("player-1"), "images/monster.png".to_string())]
        );

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::MarkReady {
                name: name("player-1"),
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::MarkReady {
                name: name("player-1"),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::EntityReady {
                name: name("player-1")
            }]
        );
        assert!(query::pending_assets(&world).is_empty());
    }

    #[test]
    fn tick_always_reports_advanced_time() {
        let mut world = world();
        let mut events = Vec::new();
        apply(&mut world, Command::Tick { dt: STEP }, &mut events);
        assert_eq!(events, vec![Event::TimeAdvanced { dt: STEP }]);
    }
}
