use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Fixed-size matrix of cells. Positions stay empty until populated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Option<Cell>>,
}

impl Grid {
    /// Allocates storage for `size`, no cells are populated yet.
    pub fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        // dimensions always come from a `Coord2`
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let size = self.size();
        coords.0 < size.0 && coords.1 < size.1
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn set(&mut self, coords: Coord2, cell: Cell) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        self.cells[coords.to_nd_index()] = Some(cell);
        Ok(())
    }

    pub fn get(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())?.as_ref()
    }

    pub fn get_mut(&mut self, coords: Coord2) -> Option<&mut Cell> {
        self.cells.get_mut(coords.to_nd_index())?.as_mut()
    }

    /// Populated cells with their coordinates, x-major.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.cells
            .indexed_iter()
            .filter_map(|((x, y), cell)| Some(((x as Coord, y as Coord), cell.as_ref()?)))
    }

    pub fn populated_count(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    pub fn mine_count(&self) -> CellCount {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_mine())
            .count() as CellCount
    }

    /// Detaches every populated cell and clears the storage.
    pub fn destroy_all(&mut self, observer: &mut impl BoardObserver) {
        let mut destroyed = 0usize;
        for ((x, y), slot) in self.cells.indexed_iter_mut() {
            if slot.take().is_some() {
                observer.cell_destroyed((x as Coord, y as Coord));
                destroyed += 1;
            }
        }
        log::debug!("Destroyed {} cells", destroyed);
    }

    pub fn adjacent_cells(&self, coords: Coord2) -> impl Iterator<Item = &Cell> {
        neighbors::adjacent(coords, self.size()).filter_map(|pos| self.get(pos))
    }

    pub fn corner_cells(&self, coords: Coord2) -> impl Iterator<Item = &Cell> {
        neighbors::corner(coords, self.size()).filter_map(|pos| self.get(pos))
    }

    /// Adjacent cells first, then corner cells.
    pub fn neighbor_cells(&self, coords: Coord2) -> impl Iterator<Item = &Cell> {
        neighbors::neighbor(coords, self.size()).filter_map(|pos| self.get(pos))
    }

    /// Orthogonal neighbours carrying a mine. Diagonals are not counted.
    pub fn mine_neighbors(&self, coords: Coord2) -> impl Iterator<Item = &Cell> {
        self.adjacent_cells(coords).filter(|cell| cell.is_mine())
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most 4 orthogonal neighbours
        self.mine_neighbors(coords).count() as u8
    }
}

impl Index<Coord2> for Grid {
    type Output = Option<Cell>;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
