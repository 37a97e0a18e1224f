use alloc::vec::Vec;

use crate::*;
pub use random::*;
pub use scripted::*;

mod random;
mod scripted;

/// Source of the indices used to draw mines out of the candidate list.
pub trait IndexPicker {
    /// Picks an index into a list of `len` candidates.
    ///
    /// Anything outside `0..len` ends the draw early.
    fn pick(&mut self, len: usize) -> usize;
}

impl<P: IndexPicker + ?Sized> IndexPicker for &mut P {
    fn pick(&mut self, len: usize) -> usize {
        (**self).pick(len)
    }
}

/// Coordinates split around a start position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Partition {
    /// Within Chebyshev distance 1 of the start, never mined.
    pub safe: Vec<Coord2>,
    /// Everything else, in x-major order.
    pub candidates: Vec<Coord2>,
}

impl Partition {
    pub fn new(size: Coord2, start: Coord2) -> Self {
        let mut partition = Self::default();
        for x in 0..size.0 {
            for y in 0..size.1 {
                if neighbors::in_safe_zone((x, y), start) {
                    partition.safe.push((x, y));
                } else {
                    partition.candidates.push((x, y));
                }
            }
        }
        partition
    }
}

/// Draws up to `count` distinct coordinates out of `candidates`.
///
/// Each draw removes its pick with swap-and-pop so it cannot come up twice. An out-of-range
/// index stops the loop, leaving fewer picks than requested.
pub fn draw_mines(
    candidates: &mut Vec<Coord2>,
    count: CellCount,
    picker: &mut impl IndexPicker,
) -> Vec<Coord2> {
    let mut drawn = Vec::new();
    while (drawn.len() as CellCount) < count {
        let index = picker.pick(candidates.len());
        if index >= candidates.len() {
            log::warn!(
                "Index {} is out of range for {} candidates",
                index,
                candidates.len()
            );
            break;
        }
        drawn.push(candidates.swap_remove(index));
    }
    drawn
}
