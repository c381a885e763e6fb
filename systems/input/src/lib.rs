#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure pointer-input system that translates clicks into world commands.
//!
//! The dispatcher owns the interaction policy: a click on a block the turn
//! holder may grab selects it, and every click then falls through to the
//! selected block's movement scheduler as long as the click lands in that
//! block's row (or column). The world decides what the scheduling click
//! means, so a selection click doubles as the arming click of the two-phase
//! movement gesture.

use gridlock_core::{Command, EntityView, GridConfig, PixelPosition};

/// Pointer state sampled by the adapter for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerInput {
    /// Board-space position of a click released this frame, if any.
    pub click: Option<PixelPosition>,
    /// Whether the player asked to end their turn this frame.
    pub end_turn: bool,
}

/// Translates sampled pointer input into world commands.
#[derive(Debug, Default)]
pub struct InputDispatch;

impl InputDispatch {
    /// Creates a new dispatcher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Consumes one frame of pointer input against the current entity view.
    pub fn handle(
        &self,
        input: PointerInput,
        view: &EntityView,
        grid: GridConfig,
        out: &mut Vec<Command>,
    ) {
        if input.end_turn {
            out.push(Command::EndTurn);
        }

        let Some(click) = input.click else {
            return;
        };

        let hit = self.hit_test(click, view, grid);
        if let Some(hit) = hit {
            out.push(Command::SelectEntity {
                name: hit.name.clone(),
            });
        }

        // The scheduling click is admitted only when it lands in the lane
        // the selected block travels through.
        let mover = hit.or_else(|| view.selected());
        if let Some(mover) = mover {
            // Inclusive on both edges, matching the hit-test bounds.
            let lane = mover.axis.perpendicular();
            let (lane_start, lane_end) = mover.span(lane, grid.cell_size());
            let coordinate = click.along(lane);
            if coordinate >= lane_start && coordinate <= lane_end {
                out.push(Command::ScheduleMovement { click });
            }
        }
    }

    fn hit_test<'a>(
        &self,
        click: PixelPosition,
        view: &'a EntityView,
        grid: GridConfig,
    ) -> Option<&'a gridlock_core::EntitySnapshot> {
        let holder = view.turn_holder()?;
        view.iter()
            .filter(|snapshot| !snapshot.is_background())
            .filter(|snapshot| snapshot.contains(click, grid.cell_size()))
            .find(|snapshot| snapshot.can_select(&holder.name))
    }
}
