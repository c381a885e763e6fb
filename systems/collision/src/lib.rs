#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure adjacency resolver that bounds how far a block may slide.
//!
//! For a moving entity the resolver inspects every other non-background
//! entity, keeps the ones occupying overlapping rows (or columns) on the
//! axis perpendicular to the mover's travel axis, and records the nearest
//! blocking edge in each direction. The world clamps every movement step
//! against these limits, which is what prevents a piece from tunnelling
//! through another piece parked in its path.

use gridlock_core::{Axis, EntitySnapshot};

/// Nearest blocking edges constraining a slide in each direction.
///
/// Both bounds are expressed on the mover's travel axis. `max` is the
/// leading edge of the nearest neighbor ahead of the mover, `min` the
/// trailing edge of the nearest neighbor behind it. An absent bound means
/// no neighbor constrains that direction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SlideLimits {
    min: Option<f32>,
    max: Option<f32>,
}

impl SlideLimits {
    /// Creates limits from explicit bounds.
    #[must_use]
    pub const fn new(min: Option<f32>, max: Option<f32>) -> Self {
        Self { min, max }
    }

    /// Pixel coordinate the mover's trailing edge may not pass when
    /// travelling in the negative direction.
    #[must_use]
    pub const fn min(&self) -> Option<f32> {
        self.min
    }

    /// Pixel coordinate the mover's leading edge may not pass when
    /// travelling in the positive direction.
    #[must_use]
    pub const fn max(&self) -> Option<f32> {
        self.max
    }
}

/// Computes the blocking limits for `mover` against all `others`.
///
/// Background entities and the mover itself never block. Ties between
/// equidistant neighbors collapse to the same clamp value, so no precedence
/// rule is needed.
#[must_use]
pub fn slide_limits<'a, I>(mover: &EntitySnapshot, others: I, cell_size: f32) -> SlideLimits
where
    I: IntoIterator<Item = &'a EntitySnapshot>,
{
    let axis = mover.axis;
    let (mover_start, mover_end) = mover.span(axis, cell_size);
    let mut min = None;
    let mut max = None;

    for other in others {
        if other.name == mover.name || other.is_background() {
            continue;
        }
        if !perpendicular_overlap(mover, other, cell_size) {
            continue;
        }

        let (other_start, other_end) = other.span(axis, cell_size);
        if other_start >= mover_end {
            max = Some(match max {
                None => other_start,
                Some(bound) => other_start.min(bound),
            });
        } else if other_end <= mover_start {
            min = Some(match min {
                None => other_end,
                Some(bound) => other_end.max(bound),
            });
        }
    }

    SlideLimits::new(min, max)
}

/// Reports whether `other` occupies rows (or columns) the mover travels
/// through, making it a candidate to block the slide.
///
/// The test is strict: a neighbor merely touching the mover's row boundary
/// shares no cells with it and cannot block.
#[must_use]
pub fn perpendicular_overlap(
    mover: &EntitySnapshot,
    other: &EntitySnapshot,
    cell_size: f32,
) -> bool {
    overlap_on(mover, other, mover.axis.perpendicular(), cell_size)
}

/// Axis-aligned bounding-box overlap test between two entities.
#[must_use]
pub fn aabb_overlap(a: &EntitySnapshot, b: &EntitySnapshot, cell_size: f32) -> bool {
    overlap_on(a, b, Axis::X, cell_size) && overlap_on(a, b, Axis::Y, cell_size)
}

fn overlap_on(a: &EntitySnapshot, b: &EntitySnapshot, axis: Axis, cell_size: f32) -> bool {
    let (a_start, a_end) = a.span(axis, cell_size);
    let (b_start, b_end) = b.span(axis, cell_size);
    a_start < b_end && b_start < a_end
}
