//! Static level catalog consumed once at startup.
//!
//! Each level names its entities, their size in cells, their starting cell,
//! their locked movement axis and their color. The catalog currently ships
//! a single board, "Testing Grounds".

use gridlock_core::{Axis, BlockColor, BlockSize};

const FIREBRICK: BlockColor = BlockColor::from_rgb(0xb2, 0x22, 0x22);
const TRUCK_BLUE: BlockColor = BlockColor::from_rgb(0x14, 0x85, 0xcc);
const DODGER_BLUE: BlockColor = BlockColor::from_rgb(0x1e, 0x90, 0xff);
const SLATE_GRAY: BlockColor = BlockColor::from_rgb(0x70, 0x80, 0x90);
const GOLD: BlockColor = BlockColor::from_rgb(0xff, 0xd7, 0x00);
const PLUM: BlockColor = BlockColor::from_rgb(0xdd, 0xa0, 0xdd);
const PURPLE: BlockColor = BlockColor::from_rgb(0x80, 0x00, 0x80);
const PINK: BlockColor = BlockColor::from_rgb(0xff, 0xc0, 0xcb);
const GREEN: BlockColor = BlockColor::from_rgb(0x00, 0x80, 0x00);
const PALE_GREEN: BlockColor = BlockColor::from_rgb(0x98, 0xfb, 0x98);
const PERU: BlockColor = BlockColor::from_rgb(0xcd, 0x85, 0x3f);
const SEA_GREEN: BlockColor = BlockColor::from_rgb(0x2e, 0x8b, 0x57);
const LIGHT_GRAY: BlockColor = BlockColor::from_rgb(0xd3, 0xd3, 0xd3);

/// Definition of a single entity within a level.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityDefinition {
    /// Unique name the entity is registered under.
    pub name: &'static str,
    /// Size of the entity in grid cells.
    pub size: BlockSize,
    /// Starting cell column.
    pub cell_x: u32,
    /// Starting cell row.
    pub cell_y: u32,
    /// Axis the entity is locked to.
    pub axis: Axis,
    /// Fill color used when drawing the block.
    pub color: BlockColor,
    /// Optional path to a visual asset; readiness is gated on its load.
    pub image_ref: Option<&'static str>,
}

impl EntityDefinition {
    const fn new(
        name: &'static str,
        columns: u32,
        rows: u32,
        cell_x: u32,
        cell_y: u32,
        axis: Axis,
        color: BlockColor,
    ) -> Self {
        Self {
            name,
            size: BlockSize::new(columns, rows),
            cell_x,
            cell_y,
            axis,
            color,
            image_ref: None,
        }
    }
}

/// Complete description of a playable board.
#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    /// Display name of the level.
    pub name: &'static str,
    /// Board background color.
    pub background: BlockColor,
    /// Names of the two required player entities, in turn order.
    pub players: [&'static str; 2],
    /// Movable entities populating the board.
    pub objects: Vec<EntityDefinition>,
}

/// Errors raised while resolving the level catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LevelError {
    /// The catalog holds no levels, so the game cannot start.
    #[error("no levels specified in the level catalog")]
    EmptyCatalog,
}

/// Returns every level known to the game.
#[must_use]
pub fn catalog() -> Vec<Level> {
    vec![testing_grounds()]
}

/// Picks a level from the catalog using the provided roll.
///
/// The roll wraps around the catalog length so any seed value is valid.
/// Starting with an empty catalog is a fatal configuration error.
pub fn pick(catalog: &[Level], roll: usize) -> Result<&Level, LevelError> {
    if catalog.is_empty() {
        return Err(LevelError::EmptyCatalog);
    }
    Ok(&catalog[roll % catalog.len()])
}

fn testing_grounds() -> Level {
    Level {
        name: "Testing Grounds",
        background: LIGHT_GRAY,
        players: ["player-1", "player-2"],
        objects: vec![
            EntityDefinition::new("player-1", 2, 1, 2, 2, Axis::X, FIREBRICK),
            EntityDefinition::new("player-2", 2, 1, 4, 5, Axis::X, FIREBRICK),
            EntityDefinition::new("truck-1", 3, 1, 0, 0, Axis::X, TRUCK_BLUE),
            EntityDefinition::new("truck-2", 1, 3, 1, 4, Axis::Y, DODGER_BLUE),
            EntityDefinition::new("truck-3", 3, 1, 4, 6, Axis::X, SLATE_GRAY),
            EntityDefinition::new("truck-4", 1, 3, 4, 0, Axis::Y, GOLD),
            EntityDefinition::new("truck-5", 1, 3, 6, 3, Axis::Y, PLUM),
            EntityDefinition::new("car-1", 1, 2, 0, 1, Axis::Y, PURPLE),
            EntityDefinition::new("car-2", 2, 1, 1, 1, Axis::X, PINK),
            EntityDefinition::new("car-3", 2, 1, 0, 3, Axis::X, GREEN),
            EntityDefinition::new("car-4", 2, 1, 2, 6, Axis::X, PALE_GREEN),
            EntityDefinition::new("car-5", 1, 2, 3, 0, Axis::Y, PERU),
            EntityDefinition::new("car-6", 1, 2, 6, 0, Axis::Y, SEA_GREEN),
        ],
    }
}
