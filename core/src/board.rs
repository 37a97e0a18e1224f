use serde::{Deserialize, Serialize};

use crate::*;

pub const DEFAULT_GRID_SIZE: Coord = 25;
pub const DEFAULT_MINE_COUNT: CellCount = 20;

/// Parameters of a single `create_map` call.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub start: Coord2,
    pub mines: CellCount,
    pub size: Coord,
}

impl MapConfig {
    pub const fn new(start: Coord2, mines: CellCount, size: Coord) -> Self {
        Self { start, mines, size }
    }

    /// Board of `size` with the default mine count, started from its centre.
    pub const fn centered(size: Coord) -> Self {
        Self::new((size / 2, size / 2), DEFAULT_MINE_COUNT, size)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }

    /// Checks the preconditions of board creation.
    pub fn validate(&self) -> Result<()> {
        if self.mines >= self.total_cells() {
            return Err(GameError::TooManyMines);
        }
        if self.start.0 >= self.size || self.start.1 >= self.size {
            return Err(GameError::StartOutOfBounds);
        }
        Ok(())
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self::centered(DEFAULT_GRID_SIZE)
    }
}

/// What a `create_map` call ended up doing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSummary {
    pub candidates: CellCount,
    pub mines_requested: CellCount,
    pub mines_placed: CellCount,
}

impl MapSummary {
    /// Whether the mine draw stopped before placing every requested mine.
    pub const fn is_short(&self) -> bool {
        self.mines_placed < self.mines_requested
    }
}

/// Owns the active grid and rebuilds it on request.
#[derive(Debug)]
pub struct Board<P = RandomPicker, O = ()> {
    grid: Option<Grid>,
    picker: P,
    observer: O,
}

impl Board {
    /// Board drawing mines from a seeded RNG, without an observer.
    pub fn new(seed: u64) -> Self {
        Self::with_parts(RandomPicker::new(seed), ())
    }
}

impl<P: IndexPicker, O: BoardObserver> Board<P, O> {
    pub fn with_parts(picker: P, observer: O) -> Self {
        Self {
            grid: None,
            picker,
            observer,
        }
    }

    pub fn into_parts(self) -> (Option<Grid>, P, O) {
        (self.grid, self.picker, self.observer)
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn picker_mut(&mut self) -> &mut P {
        &mut self.picker
    }

    pub fn create_map_at(
        &mut self,
        start: Coord2,
        mines: CellCount,
        size: Coord,
    ) -> Result<MapSummary> {
        self.create_map(MapConfig::new(start, mines, size))
    }

    /// Tears down any previous grid, then builds, mines and opens a new one.
    ///
    /// Precondition failures leave the previous grid untouched.
    pub fn create_map(&mut self, config: MapConfig) -> Result<MapSummary> {
        config.validate()?;

        if let Some(mut grid) = self.grid.take() {
            grid.destroy_all(&mut self.observer);
        }

        let size = (config.size, config.size);
        let mut grid = self.spawn_grid(size)?;

        let Partition {
            safe,
            mut candidates,
        } = Partition::new(size, config.start);
        let candidate_count = candidates.len() as CellCount;
        log::info!("Possible mine positions: {}", candidate_count);

        let drawn = draw_mines(&mut candidates, config.mines, &mut self.picker);
        for &coords in &drawn {
            if let Some(cell) = grid.get_mut(coords) {
                cell.set_mine(true);
                self.observer.mine_changed(coords, true);
            }
        }
        log::info!("Mines placed: {}", drawn.len());

        for coords in safe {
            let Some(cell) = grid.get(coords) else {
                continue;
            };
            if cell.is_mine() || grid.adjacent_mine_count(coords) > 0 {
                continue;
            }
            grid.reveal(coords, false, &mut self.observer);
        }

        self.grid = Some(grid);

        Ok(MapSummary {
            candidates: candidate_count,
            mines_requested: config.mines,
            mines_placed: drawn.len() as CellCount,
        })
    }

    fn spawn_grid(&mut self, size: Coord2) -> Result<Grid> {
        let mut grid = Grid::new(size);
        for x in 0..size.0 {
            for y in 0..size.1 {
                if let Err(err) = self.observer.cell_spawned((x, y)) {
                    log::warn!("Could not spawn cell {:?}: {}", (x, y), err);
                    grid.destroy_all(&mut self.observer);
                    return Err(GameError::SpawnFailed);
                }
                let mut cell = Cell::new();
                cell.set_coordinate(x, y)?;
                grid.set((x, y), cell)?;
            }
        }
        Ok(grid)
    }

    pub fn get_cell(&self, coords: Coord2) -> Option<&Cell> {
        self.grid.as_ref()?.get(coords)
    }

    pub fn reveal(&mut self, coords: Coord2, detonate: bool) -> Result<RevealOutcome> {
        let grid = self.grid.as_mut().ok_or(GameError::NotBuilt)?;
        let coords = grid.validate_coords(coords)?;
        Ok(grid.reveal(coords, detonate, &mut self.observer))
    }

    /// Returns whether the flag changed.
    pub fn set_mine(&mut self, coords: Coord2, is_mine: bool) -> Result<bool> {
        let grid = self.grid.as_mut().ok_or(GameError::NotBuilt)?;
        let cell = grid.get_mut(coords).ok_or(GameError::InvalidCoords)?;
        let changed = cell.set_mine(is_mine);
        if changed {
            self.observer.mine_changed(coords, is_mine);
        }
        Ok(changed)
    }

    pub fn set_value(&mut self, coords: Coord2, value: u8) -> Result<()> {
        let grid = self.grid.as_mut().ok_or(GameError::NotBuilt)?;
        let cell = grid.get_mut(coords).ok_or(GameError::InvalidCoords)?;
        cell.set_value(value)?;
        self.observer.value_changed(coords, value);
        Ok(())
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> Result<u8> {
        let grid = self.grid.as_ref().ok_or(GameError::NotBuilt)?;
        let coords = grid.validate_coords(coords)?;
        Ok(grid.adjacent_mine_count(coords))
    }

    pub fn revealed_count(&self) -> CellCount {
        self.grid.as_ref().map_or(0, |grid| {
            grid.iter()
                .filter(|(_, cell)| cell.state() == CellState::Revealed)
                .count() as CellCount
        })
    }

    pub fn is_detonated(&self) -> bool {
        self.grid.as_ref().is_some_and(|grid| {
            grid.iter()
                .any(|(_, cell)| cell.state() == CellState::Detonated)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn scripted(indices: &[usize]) -> Board<ScriptedPicker, EventLog> {
        Board::with_parts(ScriptedPicker::new(indices.iter().copied()), EventLog::new())
    }

    #[test]
    fn rejects_too_many_mines() {
        let mut board = Board::new(0);

        assert_eq!(board.create_map_at((0, 0), 25, 5), Err(GameError::TooManyMines));
        assert!(board.grid().is_none());
    }

    #[test]
    fn rejects_start_out_of_bounds() {
        let mut board = Board::new(0);

        assert_eq!(board.create_map_at((5, 0), 1, 5), Err(GameError::StartOutOfBounds));
        assert_eq!(board.create_map_at((0, 5), 1, 5), Err(GameError::StartOutOfBounds));
    }

    #[test]
    fn bad_config_keeps_previous_grid() {
        let mut board = Board::new(3);
        board.create_map_at((2, 2), 4, 6).unwrap();
        let before = board.grid().cloned();

        assert!(board.create_map_at((9, 9), 4, 6).is_err());
        assert_eq!(board.grid().cloned(), before);
    }

    #[test]
    fn operations_before_creation_report_not_built() {
        let mut board = Board::new(0);

        assert!(board.get_cell((0, 0)).is_none());
        assert_eq!(board.reveal((0, 0), false), Err(GameError::NotBuilt));
        assert_eq!(board.set_mine((0, 0), true), Err(GameError::NotBuilt));
        assert_eq!(board.adjacent_mine_count((0, 0)), Err(GameError::NotBuilt));
        assert_eq!(board.revealed_count(), 0);
    }

    #[test]
    fn default_config_matches_stock_board() {
        let config = MapConfig::default();

        assert_eq!(config.size, 25);
        assert_eq!(config.mines, 20);
        assert_eq!(config.start, (12, 12));
    }

    #[test]
    fn every_cell_gets_its_own_coordinate() {
        let mut board = scripted(&[]);
        board.create_map_at((1, 1), 0, 4).unwrap();

        let grid = board.grid().unwrap();
        assert_eq!(grid.populated_count(), 16);
        assert!(grid.iter().all(|(coords, cell)| cell.coords() == Some(coords)));
    }

    #[test]
    fn mines_never_land_in_the_safe_zone() {
        let mut board = Board::new(99);
        let summary = board.create_map_at((0, 0), 30, 8).unwrap();

        let grid = board.grid().unwrap();
        assert_eq!(summary.mines_placed, 30);
        assert_eq!(grid.mine_count(), 30);
        assert!(grid
            .iter()
            .filter(|(_, cell)| cell.is_mine())
            .all(|(coords, _)| !neighbors::in_safe_zone(coords, (0, 0))));
    }

    #[test]
    fn safe_cell_with_count_is_opened_as_a_fill_leaf() {
        // candidates: (0,2) (1,2) (2,0) (2,1) (2,2); index 1 is (1,2)
        let mut board = scripted(&[1]);
        let summary = board.create_map_at((0, 0), 1, 3).unwrap();
        assert_eq!(summary.candidates, 5);
        assert!(!summary.is_short());

        let grid = board.grid().unwrap();
        assert!(grid.get((1, 2)).unwrap().is_mine());
        assert_eq!(grid.get((0, 0)).unwrap().state(), CellState::Revealed);
        // skipped by the initial pass, then reached from its zero-count neighbours
        assert_eq!(grid.get((1, 1)).unwrap().state(), CellState::Revealed);
        assert_eq!(grid.get((1, 1)).unwrap().value(), 1);
        assert_eq!(grid.get((1, 2)).unwrap().state(), CellState::Hidden);
        assert_eq!(board.revealed_count(), 8);
    }

    #[test]
    fn set_mine_notifies_only_on_change() {
        let mut board = scripted(&[]);
        board.create_map_at((0, 0), 0, 4).unwrap();
        board.observer_mut().drain();

        assert_eq!(board.set_mine((3, 3), true), Ok(true));
        assert_eq!(board.set_mine((3, 3), true), Ok(false));
        assert_eq!(board.set_mine((4, 4), true), Err(GameError::InvalidCoords));
        assert_eq!(
            board.observer().events(),
            [CellEvent::MineChanged((3, 3), true)]
        );
    }

    #[test]
    fn set_value_validates_and_notifies() {
        let mut board = scripted(&[]);
        board.create_map_at((0, 0), 0, 2).unwrap();
        board.observer_mut().drain();

        board.set_value((1, 1), 3).unwrap();
        assert_eq!(board.set_value((1, 1), 9), Err(GameError::InvalidValue));
        assert_eq!(board.get_cell((1, 1)).unwrap().value(), 3);
        assert_eq!(board.observer().events(), [CellEvent::ValueChanged((1, 1), 3)]);
    }

    #[test]
    fn detonation_is_reported() {
        let mut board = scripted(&[0]);
        board.create_map_at((4, 4), 1, 5).unwrap();
        assert!(!board.is_detonated());

        assert_eq!(board.reveal((0, 0), true), Ok(RevealOutcome::Detonated));
        assert!(board.is_detonated());
        assert_eq!(board.reveal((7, 7), false), Err(GameError::InvalidCoords));
    }

    struct FailingSpawner {
        spawned: Vec<Coord2>,
        destroyed: Vec<Coord2>,
        fail_at: Coord2,
    }

    impl BoardObserver for FailingSpawner {
        fn cell_spawned(&mut self, coords: Coord2) -> Result<()> {
            if coords == self.fail_at {
                return Err(GameError::SpawnFailed);
            }
            self.spawned.push(coords);
            Ok(())
        }

        fn cell_destroyed(&mut self, coords: Coord2) {
            self.destroyed.push(coords);
        }
    }

    #[test]
    fn failed_spawn_tears_down_partial_grid() {
        let observer = FailingSpawner {
            spawned: Vec::new(),
            destroyed: Vec::new(),
            fail_at: (1, 0),
        };
        let mut board = Board::with_parts(RandomPicker::new(1), observer);

        assert_eq!(board.create_map_at((0, 0), 1, 3), Err(GameError::SpawnFailed));
        assert!(board.grid().is_none());
        assert_eq!(board.observer().spawned, board.observer().destroyed);
        assert_eq!(board.observer().spawned, [(0, 0), (0, 1), (0, 2)]);
    }
}
