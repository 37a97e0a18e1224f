use crate::*;

/// Displacement applied to a coordinate, `(dx, dy)`.
pub type Offset = (isize, isize);

/// Orthogonal neighbours: up, down, left, right.
pub const ADJACENT_PATTERN: [Offset; 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Diagonal neighbours.
pub const CORNER_PATTERN: [Offset; 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: Offset, bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx.try_into().ok()?)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy.try_into().ok()?)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

/// Walks a displacement pattern around `center`, skipping positions outside `bounds`.
#[derive(Clone, Debug)]
pub struct PatternIter {
    center: Coord2,
    bounds: Coord2,
    pattern: &'static [Offset],
    index: u8,
}

impl PatternIter {
    pub fn new(center: Coord2, bounds: Coord2, pattern: &'static [Offset]) -> Self {
        Self {
            center,
            bounds,
            pattern,
            index: 0,
        }
    }
}

impl Iterator for PatternIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *self.pattern.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.pattern.len() - usize::from(self.index)))
    }
}

/// Up to 4 orthogonal neighbours of `coords` that exist within `bounds`.
pub fn adjacent(coords: Coord2, bounds: Coord2) -> PatternIter {
    PatternIter::new(coords, bounds, &ADJACENT_PATTERN)
}

/// Up to 4 diagonal neighbours of `coords` that exist within `bounds`.
pub fn corner(coords: Coord2, bounds: Coord2) -> PatternIter {
    PatternIter::new(coords, bounds, &CORNER_PATTERN)
}

/// All adjacent neighbours first, then all corner neighbours.
pub fn neighbor(coords: Coord2, bounds: Coord2) -> core::iter::Chain<PatternIter, PatternIter> {
    adjacent(coords, bounds).chain(corner(coords, bounds))
}

/// Whether `coords` lies within Chebyshev distance 1 of `start`.
pub const fn in_safe_zone(coords: Coord2, start: Coord2) -> bool {
    coords.0.abs_diff(start.0) <= 1 && coords.1.abs_diff(start.1) <= 1
}
