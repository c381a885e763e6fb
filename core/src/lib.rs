#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Gridlock engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Name reserved for the board background entity.
///
/// The background is a real entity so it can carry the board color and size,
/// but it is never selectable, never moves, and never blocks a slide.
pub const BACKGROUND_NAME: &str = "background";

/// Axis a block is permitted to slide along, fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Horizontal travel along increasing column pixels.
    X,
    /// Vertical travel along increasing row pixels.
    Y,
}

impl Axis {
    /// Returns the axis orthogonal to this one.
    #[must_use]
    pub const fn perpendicular(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }
}

/// Unique identifier assigned to an entity by the level definition.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityName(String);

impl EntityName {
    /// Creates a new entity name from the provided string.
    #[must_use]
    pub fn new<T>(name: T) -> Self
    where
        T: Into<String>,
    {
        Self(name.into())
    }

    /// Borrows the underlying string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reports whether this is the reserved background entity name.
    #[must_use]
    pub fn is_background(&self) -> bool {
        self.0 == BACKGROUND_NAME
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Visual appearance applied to a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl BlockColor {
    /// Creates a new block color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Top-left corner of an entity expressed in board pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PixelPosition {
    x: f32,
    y: f32,
}

impl PixelPosition {
    /// Creates a new pixel position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate in pixels.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate in pixels.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Retrieves the coordinate along the provided axis.
    #[must_use]
    pub const fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Returns a copy with the coordinate along `axis` replaced by `value`.
    #[must_use]
    pub const fn with_along(&self, axis: Axis, value: f32) -> Self {
        match axis {
            Axis::X => Self::new(value, self.y),
            Axis::Y => Self::new(self.x, value),
        }
    }
}

/// Size of a block measured in whole grid cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockSize {
    columns: u32,
    rows: u32,
}

impl BlockSize {
    /// Creates a new size descriptor with explicit cell dimensions.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Width of the block in cells.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Height of the block in cells.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of cells the block spans along the provided axis.
    #[must_use]
    pub const fn cells_along(&self, axis: Axis) -> u32 {
        match axis {
            Axis::X => self.columns,
            Axis::Y => self.rows,
        }
    }

    /// Pixel extent along the provided axis, truncated to a whole pixel.
    #[must_use]
    pub fn extent(&self, axis: Axis, cell_size: f32) -> f32 {
        (self.cells_along(axis) as f32 * cell_size).trunc()
    }
}

/// Grid configuration injected into the world and adapters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    cell_size: f32,
    board_cells: u32,
    default_speed: f32,
}

impl GridConfig {
    /// Creates a new grid configuration.
    #[must_use]
    pub const fn new(cell_size: f32, board_cells: u32, default_speed: f32) -> Self {
        Self {
            cell_size,
            board_cells,
            default_speed,
        }
    }

    /// Pixel edge length of one grid cell.
    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of cells along each edge of the square board.
    #[must_use]
    pub const fn board_cells(&self) -> u32 {
        self.board_cells
    }

    /// Travel speed in pixels per second applied to blocks without one.
    #[must_use]
    pub const fn default_speed(&self) -> f32 {
        self.default_speed
    }

    /// Converts a count of whole cells to a pixel offset.
    #[must_use]
    pub fn to_pixels(&self, cells: u32) -> f32 {
        cells as f32 * self.cell_size
    }

    /// Snaps a raw pixel coordinate up to the next cell boundary.
    ///
    /// Snapping an already aligned coordinate is a no-op, which keeps
    /// adjacency checks exact equality comparisons rather than
    /// tolerance-based ones.
    #[must_use]
    pub fn snap_up(&self, pixel: f32) -> f32 {
        (pixel / self.cell_size).ceil() * self.cell_size
    }
}

impl Default for GridConfig {
    /// 50 pixel cells on a 7x7 board with blocks travelling at 200 pixels
    /// per second.
    fn default() -> Self {
        Self::new(50.0, 7, 200.0)
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Requests selection of the named entity for the current turn holder.
    SelectEntity {
        /// Identifier of the entity to select.
        name: EntityName,
    },
    /// Feeds a board-local click into the selected entity's movement
    /// scheduling. The first request while idle arms movement; the next
    /// commits a grid-snapped target.
    ScheduleMovement {
        /// Click location in board pixels.
        click: PixelPosition,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Hands the turn to the named player entity.
    SetTurn {
        /// Identifier of the player entity receiving the turn.
        name: EntityName,
    },
    /// Signals that the current turn holder is done; the turn-flow system
    /// answers with a `SetTurn` for the opposing player.
    EndTurn,
    /// Re-establishes the initial turn and selection state.
    Reset,
    /// Marks the named entity's visual asset as loaded.
    MarkReady {
        /// Identifier of the entity whose asset finished loading.
        name: EntityName,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that an entity became the sole selection.
    EntitySelected {
        /// Identifier of the selected entity.
        name: EntityName,
    },
    /// Confirms that the selected entity armed itself for movement.
    MovementArmed {
        /// Identifier of the armed entity.
        name: EntityName,
    },
    /// Confirms that a grid-snapped slide target was committed.
    MovementScheduled {
        /// Identifier of the scheduled entity.
        name: EntityName,
        /// Snapped pixel coordinate on the entity's movement axis.
        target: f32,
    },
    /// Confirms that a slide ran to completion and the entity came to rest
    /// on a grid boundary.
    SlideCompleted {
        /// Identifier of the entity that finished sliding.
        name: EntityName,
        /// Final resting position of the entity.
        position: PixelPosition,
    },
    /// Announces that the turn passed to a new player entity.
    TurnChanged {
        /// Identifier of the player entity now holding the turn.
        name: EntityName,
    },
    /// Reports that the current holder requested the turn to end.
    TurnEndRequested {
        /// Identifier of the player entity giving up the turn.
        current: EntityName,
    },
    /// Confirms that an entity's visual asset finished loading.
    EntityReady {
        /// Identifier of the entity that became ready.
        name: EntityName,
    },
}

/// Errors surfaced when resolving entities by name.
///
/// A failed lookup indicates a level-definition or programming bug rather
/// than a runtime condition to recover from.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EntityLookupError {
    /// No entity with the requested name exists in the world.
    #[error("could not find entity '{name}'")]
    NotFound {
        /// Name that failed to resolve.
        name: EntityName,
    },
}

/// Immutable representation of a single entity's state used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct EntitySnapshot {
    /// Unique identifier assigned to the entity.
    pub name: EntityName,
    /// Top-left corner of the entity in board pixels.
    pub position: PixelPosition,
    /// Size of the entity measured in grid cells.
    pub size: BlockSize,
    /// Axis the entity is locked to for its whole lifetime.
    pub axis: Axis,
    /// Travel speed in pixels per second; zero for immovable entities.
    pub speed: f32,
    /// Appearance assigned to the entity.
    pub color: BlockColor,
    /// Whether this entity is the current selection.
    pub selected: bool,
    /// Whether a movement impulse has been armed for this entity.
    pub in_motion: bool,
    /// Grid-snapped target coordinate on the movement axis, if sliding.
    pub scheduled_target: Option<f32>,
    /// Player entity permitted to select this entity, if any.
    pub allowed_selector: Option<EntityName>,
    /// Whether this player entity currently holds the turn.
    pub is_turn_holder: bool,
    /// Whether any associated visual asset finished loading.
    pub ready: bool,
}

impl EntitySnapshot {
    /// Reports whether this snapshot describes the background entity.
    #[must_use]
    pub fn is_background(&self) -> bool {
        self.name.is_background()
    }

    /// Checks whether the named player is permitted to select this entity.
    #[must_use]
    pub fn can_select(&self, selector: &EntityName) -> bool {
        self.allowed_selector.as_ref() == Some(selector)
    }

    /// Occupied pixel interval along the provided axis as `(start, end)`.
    #[must_use]
    pub fn span(&self, axis: Axis, cell_size: f32) -> (f32, f32) {
        let start = self.position.along(axis);
        (start, start + self.size.extent(axis, cell_size))
    }

    /// Point-in-bounding-box test used for click hit detection.
    #[must_use]
    pub fn contains(&self, point: PixelPosition, cell_size: f32) -> bool {
        let (min_x, max_x) = self.span(Axis::X, cell_size);
        let (min_y, max_y) = self.span(Axis::Y, cell_size);
        point.x() >= min_x && point.x() <= max_x && point.y() >= min_y && point.y() <= max_y
    }
}

/// Read-only snapshot describing all entities on the board.
#[derive(Clone, Debug, Default)]
pub struct EntityView {
    snapshots: Vec<EntitySnapshot>,
}

impl EntityView {
    /// Creates a new entity view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EntitySnapshot>) -> Self {
        snapshots.sort_by(|a, b| a.name.cmp(&b.name));
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic name order.
    pub fn iter(&self) -> impl Iterator<Item = &EntitySnapshot> {
        self.snapshots.iter()
    }

    /// Looks up a snapshot by entity name.
    #[must_use]
    pub fn get(&self, name: &EntityName) -> Option<&EntitySnapshot> {
        self.snapshots
            .iter()
            .find(|snapshot| &snapshot.name == name)
    }

    /// Returns the snapshot currently holding the selection, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&EntitySnapshot> {
        self.snapshots.iter().find(|snapshot| snapshot.selected)
    }

    /// Returns the player entity snapshot currently holding the turn.
    #[must_use]
    pub fn turn_holder(&self) -> Option<&EntitySnapshot> {
        self.snapshots
            .iter()
            .find(|snapshot| snapshot.is_turn_holder)
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EntitySnapshot> {
        self.snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn entity_name_round_trips_through_bincode() {
        assert_round_trip(&EntityName::new("truck-2"));
    }

    #[test]
    fn pixel_position_round_trips_through_bincode() {
        assert_round_trip(&PixelPosition::new(150.0, 250.0));
    }

    #[test]
    fn block_size_round_trips_through_bincode() {
        assert_round_trip(&BlockSize::new(2, 1));
    }

    #[test]
    fn axis_round_trips_through_bincode() {
        assert_round_trip(&Axis::X);
        assert_round_trip(&Axis::Y);
    }

    #[test]
    fn perpendicular_axis_swaps_x_and_y() {
        assert_eq!(Axis::X.perpendicular(), Axis::Y);
        assert_eq!(Axis::Y.perpendicular(), Axis::X);
    }

    #[test]
    fn snap_of_aligned_pixel_is_identity() {
        let grid = GridConfig::default();
        for cells in 0..10 {
            let aligned = grid.to_pixels(cells);
            assert_eq!(grid.snap_up(aligned), aligned);
        }
    }

    #[test]
    fn snap_rounds_up_to_next_boundary() {
        let grid = GridConfig::default();
        assert_eq!(grid.snap_up(350.0), 350.0);
        assert_eq!(grid.snap_up(301.0), 350.0);
        assert_eq!(grid.snap_up(349.9), 350.0);
    }

    #[test]
    fn block_extent_truncates_to_whole_pixels() {
        let size = BlockSize::new(2, 1);
        assert_eq!(size.extent(Axis::X, 50.0), 100.0);
        assert_eq!(size.extent(Axis::Y, 50.0), 50.0);
        // Fractional cell sizes still yield a whole-pixel extent.
        assert_eq!(size.extent(Axis::X, 33.4), 66.0);
    }

    #[test]
    fn along_and_with_along_address_the_requested_axis() {
        let position = PixelPosition::new(100.0, 200.0);
        assert_eq!(position.along(Axis::X), 100.0);
        assert_eq!(position.along(Axis::Y), 200.0);
        assert_eq!(
            position.with_along(Axis::Y, 250.0),
            PixelPosition::new(100.0, 250.0)
        );
    }

    fn snapshot(name: &str) -> EntitySnapshot {
        EntitySnapshot {
            name: EntityName::new(name),
            position: PixelPosition::new(100.0, 100.0),
            size: BlockSize::new(2, 1),
            axis: Axis::X,
            speed: 200.0,
            color: BlockColor::from_rgb(0xb2, 0x22, 0x22),
            selected: false,
            in_motion: false,
            scheduled_target: None,
            allowed_selector: None,
            is_turn_holder: false,
            ready: true,
        }
    }

    #[test]
    fn contains_includes_edges_of_the_bounding_box() {
        let block = snapshot("car-2");
        assert!(block.contains(PixelPosition::new(100.0, 100.0), 50.0));
        assert!(block.contains(PixelPosition::new(200.0, 150.0), 50.0));
        assert!(block.contains(PixelPosition::new(150.0, 125.0), 50.0));
        assert!(!block.contains(PixelPosition::new(201.0, 125.0), 50.0));
        assert!(!block.contains(PixelPosition::new(150.0, 151.0), 50.0));
    }

    #[test]
    fn can_select_matches_allowed_selector_exactly() {
        let mut block = snapshot("truck-1");
        let player = EntityName::new("player-1");
        assert!(!block.can_select(&player));

        block.allowed_selector = Some(player.clone());
        assert!(block.can_select(&player));
        assert!(!block.can_select(&EntityName::new("player-2")));
    }

    #[test]
    fn view_orders_snapshots_by_name() {
        let view = EntityView::from_snapshots(vec![
            snapshot("truck-1"),
            snapshot("background"),
            snapshot("car-3"),
        ]);
        let names: Vec<&str> = view.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["background", "car-3", "truck-1"]);
    }

    #[test]
    fn view_selected_finds_the_sole_selection() {
        let mut selected = snapshot("car-3");
        selected.selected = true;
        let view = EntityView::from_snapshots(vec![snapshot("truck-1"), selected]);

        assert_eq!(
            view.selected().map(|s| s.name.as_str()),
            Some("car-3"),
            "the selected snapshot should be discoverable"
        );
        assert!(view.turn_holder().is_none());
    }
}
