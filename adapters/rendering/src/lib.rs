#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Gridlock adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use gridlock_core::{Axis, BlockColor, EntityName};
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Creates an opaque color from a core block color.
    #[must_use]
    pub const fn from_block(color: BlockColor) -> Self {
        Self::from_rgb_u8(color.red(), color.green(), color.blue())
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Click released this frame, expressed in board-space pixels.
    pub click: Option<Vec2>,
    /// Whether the adapter detected an end-turn press on this frame.
    pub end_turn: bool,
}

/// Describes the square board the blocks slide on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardPresentation {
    /// Number of cells along each board edge.
    pub cells: u32,
    /// Side length of a single cell expressed in pixels.
    pub cell_length: f32,
    /// Color used to fill the board area.
    pub background: Color,
    /// Color used when drawing cell grid lines.
    pub line_color: Color,
}

impl BoardPresentation {
    /// Creates a new board descriptor.
    ///
    /// Returns an error when `cell_length` is not positive.
    pub fn new(
        cells: u32,
        cell_length: f32,
        background: Color,
        line_color: Color,
    ) -> std::result::Result<Self, RenderingError> {
        if cell_length <= 0.0 {
            return Err(RenderingError::InvalidCellLength { cell_length });
        }

        Ok(Self {
            cells,
            cell_length,
            background,
            line_color,
        })
    }

    /// Calculates the side length of the board in pixels.
    #[must_use]
    pub const fn side_length(&self) -> f32 {
        self.cells as f32 * self.cell_length
    }
}

/// Single sliding block visible within the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockPresentation {
    /// Name the block is registered under.
    pub name: EntityName,
    /// Top-left corner of the block in board-space pixels.
    pub position: Vec2,
    /// Width and height of the block in pixels.
    pub size: Vec2,
    /// Axis the block travels along.
    pub axis: Axis,
    /// Fill color of the block body.
    pub color: Color,
    /// Whether the block currently holds the selection.
    pub selected: bool,
    /// Whether the current turn holder may grab the block.
    pub selectable: bool,
    /// Whether the block's visual assets finished loading.
    pub ready: bool,
}

/// Opt-in diagnostic layers drawn on top of the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct DebugOptions {
    /// Whether block names and grab permissions are labelled.
    pub show_labels: bool,
    /// Whether the frame rate is displayed.
    pub show_fps: bool,
}

/// Scene description combining the board, its blocks and the session HUD.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Board that composes the play area.
    pub board: BoardPresentation,
    /// Blocks currently parked or sliding on the board.
    pub blocks: Vec<BlockPresentation>,
    /// Display name of the loaded level.
    pub level_name: String,
    /// Name of the block holding the selection, if any.
    pub selected: Option<EntityName>,
    /// Name of the player holding the turn, if any.
    pub turn_holder: Option<EntityName>,
    /// Diagnostic layers requested by the adapter.
    pub debug: DebugOptions,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(board: BoardPresentation, level_name: String, debug: DebugOptions) -> Self {
        Self {
            board,
            blocks: Vec::new(),
            level_name,
            selected: None,
            turn_holder: None,
            debug,
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Gridlock scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// per-frame input captured by the adapter, and may mutate the scene
    /// before it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Cell length must be positive to avoid a zero-sized board.
    InvalidCellLength {
        /// Provided cell length that failed validation.
        cell_length: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCellLength { cell_length } => {
                write!(f, "cell_length must be positive (received {cell_length})")
            }
        }
    }
}

impl Error for RenderingError {}
