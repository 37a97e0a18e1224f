use serde::{Deserialize, Serialize};

use crate::*;

/// Highest adjacent-mine value a cell can display.
pub const MAX_VALUE: u8 = 8;

/// Reveal status of a single cell. Non-hidden states are terminal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Revealed,
    Detonated,
}

impl CellState {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }
}

/// A single grid position.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    coords: Option<Coord2>,
    is_mine: bool,
    value: u8,
    state: CellState,
}

impl Cell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn coords(&self) -> Option<Coord2> {
        self.coords
    }

    /// Can only be called once per cell.
    pub fn set_coordinate(&mut self, x: Coord, y: Coord) -> Result<()> {
        if let Some(existing) = self.coords {
            log::warn!(
                "Cell already has a coordinate {:?}, ignoring {:?}",
                existing,
                (x, y)
            );
            return Err(GameError::AlreadyAssigned);
        }
        self.coords = Some((x, y));
        Ok(())
    }

    pub fn is_mine(&self) -> bool {
        self.is_mine
    }

    /// Returns whether the flag actually changed.
    pub fn set_mine(&mut self, is_mine: bool) -> bool {
        let changed = self.is_mine != is_mine;
        self.is_mine = is_mine;
        changed
    }

    /// Adjacent mine count stored by the last reveal.
    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn set_value(&mut self, value: u8) -> Result<()> {
        if value > MAX_VALUE {
            return Err(GameError::InvalidValue);
        }
        self.value = value;
        Ok(())
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn is_hidden(&self) -> bool {
        self.state.is_hidden()
    }

    /// Moves a hidden cell into `state`. Returns `false` when the cell was already open.
    pub(crate) fn transition(&mut self, state: CellState) -> bool {
        if !self.state.is_hidden() {
            return false;
        }
        self.state = state;
        true
    }
}
