use alloc::vec::Vec;
use core::ops::{BitOr, BitOrAssign};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    Detonated,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (Detonated, _) => Detonated,
            (_, Detonated) => Detonated,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

impl BitOrAssign for RevealOutcome {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

impl Grid {
    /// Opens the cell at `coords` and floods through orthogonally connected zero-count cells.
    ///
    /// Only the requested cell can detonate; cells reached by the fill are opened with
    /// `detonate` off. Cells that are already open are left untouched, which keeps the fill
    /// finite without a separate visited set.
    pub fn reveal(
        &mut self,
        coords: Coord2,
        detonate: bool,
        observer: &mut impl BoardObserver,
    ) -> RevealOutcome {
        let mut outcome = RevealOutcome::NoChange;
        let mut to_visit = Vec::from([(coords, detonate)]);

        while let Some((visit_coords, visit_detonate)) = to_visit.pop() {
            let Some(cell) = self.get(visit_coords) else {
                log::warn!("No cell at {:?} to reveal", visit_coords);
                continue;
            };
            if !cell.is_hidden() {
                continue;
            }

            let is_mine = cell.is_mine();
            if is_mine && visit_detonate {
                if let Some(cell) = self.get_mut(visit_coords) {
                    cell.transition(CellState::Detonated);
                }
                log::debug!("Mine at {:?} detonated", visit_coords);
                observer.state_changed(visit_coords, CellState::Detonated, is_mine);
                outcome |= RevealOutcome::Detonated;
                continue;
            }

            let mine_count = self.adjacent_mine_count(visit_coords);
            if let Some(cell) = self.get_mut(visit_coords) {
                cell.transition(CellState::Revealed);
                cell.set_value(mine_count).ok();
            }
            observer.state_changed(visit_coords, CellState::Revealed, is_mine);
            observer.value_changed(visit_coords, mine_count);
            outcome |= RevealOutcome::Revealed;

            if mine_count == 0 {
                to_visit.extend(
                    neighbors::adjacent(visit_coords, self.size())
                        .filter(|&pos| self.get(pos).is_some_and(Cell::is_hidden))
                        .map(|pos| (pos, false)),
                );
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(size: Coord2, mines: &[Coord2]) -> Grid {
        let mut grid = Grid::new(size);
        for x in 0..size.0 {
            for y in 0..size.1 {
                let mut cell = Cell::new();
                cell.set_coordinate(x, y).unwrap();
                cell.set_mine(mines.contains(&(x, y)));
                grid.set((x, y), cell).unwrap();
            }
        }
        grid
    }

    fn state(grid: &Grid, coords: Coord2) -> CellState {
        grid.get(coords).unwrap().state()
    }

    #[test]
    fn reveal_flood_fill_opens_zero_region() {
        let mut grid = grid((3, 3), &[(2, 2)]);

        let outcome = grid.reveal((0, 0), false, &mut ());

        assert_eq!(outcome, RevealOutcome::Revealed);
        assert_eq!(state(&grid, (0, 0)), CellState::Revealed);
        assert_eq!(grid.get((1, 1)).unwrap().value(), 0);
        assert_eq!(grid.get((2, 1)).unwrap().value(), 1);
        assert_eq!(grid.get((1, 2)).unwrap().value(), 1);
        assert_eq!(state(&grid, (2, 1)), CellState::Revealed);
        assert_eq!(state(&grid, (2, 2)), CellState::Hidden);
    }

    #[test]
    fn diagonal_mine_does_not_stop_the_fill() {
        let mut grid = grid((3, 3), &[(0, 0)]);

        grid.reveal((1, 1), false, &mut ());

        // (1, 1) only sees the corner mine diagonally so it counts zero and keeps spreading
        assert_eq!(grid.get((1, 1)).unwrap().value(), 0);
        assert_eq!(state(&grid, (0, 1)), CellState::Revealed);
        assert_eq!(state(&grid, (1, 0)), CellState::Revealed);
        assert_eq!(state(&grid, (0, 0)), CellState::Hidden);
    }

    #[test]
    fn positive_count_is_a_leaf() {
        let mut grid = grid((3, 1), &[(0, 0)]);

        let outcome = grid.reveal((1, 0), false, &mut ());

        assert_eq!(outcome, RevealOutcome::Revealed);
        assert_eq!(grid.get((1, 0)).unwrap().value(), 1);
        assert_eq!(state(&grid, (2, 0)), CellState::Hidden);
    }

    #[test]
    fn reveal_is_idempotent_and_silent_the_second_time() {
        let mut grid = grid((4, 4), &[(3, 3)]);
        let mut log = EventLog::new();

        assert_eq!(grid.reveal((0, 0), false, &mut log), RevealOutcome::Revealed);
        let first_pass = grid.clone();
        let recorded = log.drain();
        assert!(!recorded.is_empty());

        assert_eq!(grid.reveal((0, 0), false, &mut log), RevealOutcome::NoChange);
        assert_eq!(grid.reveal((1, 2), true, &mut log), RevealOutcome::NoChange);
        assert_eq!(grid, first_pass);
        assert!(log.is_empty());
    }

    #[test]
    fn each_cell_notifies_once() {
        let mut grid = grid((5, 5), &[]);
        let mut log = EventLog::new();

        grid.reveal((2, 2), false, &mut log);

        let state_events = log
            .events()
            .iter()
            .filter(|event| matches!(event, CellEvent::StateChanged(..)))
            .count();
        assert_eq!(state_events, 25);
        assert_eq!(log.len(), 50);
    }

    #[test]
    fn detonate_stops_at_the_mine() {
        let mut grid = grid((3, 3), &[(1, 1)]);
        let mut log = EventLog::new();

        let outcome = grid.reveal((1, 1), true, &mut log);

        assert_eq!(outcome, RevealOutcome::Detonated);
        assert_eq!(state(&grid, (1, 1)), CellState::Detonated);
        assert_eq!(grid.get((1, 1)).unwrap().value(), 0);
        assert_eq!(
            log.events(),
            [CellEvent::StateChanged((1, 1), CellState::Detonated, true)]
        );
        assert!(grid
            .iter()
            .filter(|&(coords, _)| coords != (1, 1))
            .all(|(_, cell)| cell.is_hidden()));
    }

    #[test]
    fn mine_without_detonate_reveals_count() {
        let mut grid = grid((3, 3), &[(1, 1), (1, 0)]);

        let outcome = grid.reveal((1, 1), false, &mut ());

        assert_eq!(outcome, RevealOutcome::Revealed);
        assert_eq!(state(&grid, (1, 1)), CellState::Revealed);
        assert_eq!(grid.get((1, 1)).unwrap().value(), 1);
    }

    #[test]
    fn missing_cells_are_skipped() {
        let mut grid = Grid::new((2, 2));
        let mut cell = Cell::new();
        cell.set_coordinate(0, 0).unwrap();
        grid.set((0, 0), cell).unwrap();

        assert_eq!(grid.reveal((1, 1), false, &mut ()), RevealOutcome::NoChange);
        assert_eq!(grid.reveal((0, 0), false, &mut ()), RevealOutcome::Revealed);
        assert_eq!(grid.populated_count(), 1);
    }

    #[test]
    fn large_open_grid_does_not_exhaust_the_stack() {
        let mut grid = grid((500, 500), &[]);

        grid.reveal((0, 0), false, &mut ());

        assert!(grid.iter().all(|(_, cell)| !cell.is_hidden()));
    }

    #[test]
    fn detonated_outranks_revealed_when_merging() {
        use RevealOutcome::*;
        assert_eq!(Revealed | Detonated, Detonated);
        assert_eq!(NoChange | Revealed, Revealed);
        assert_eq!(NoChange | NoChange, NoChange);
        assert!(!NoChange.has_update());
    }
}
