use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Receives grid lifecycle and display changes so a rendering layer can follow along.
///
/// Every method defaults to doing nothing, so implementors only pick the events they draw.
pub trait BoardObserver {
    /// A cell is being created at `coords`. Returning an error aborts the board creation.
    fn cell_spawned(&mut self, coords: Coord2) -> Result<()> {
        let _ = coords;
        Ok(())
    }

    /// The cell at `coords` is being torn down together with its grid.
    fn cell_destroyed(&mut self, coords: Coord2) {
        let _ = coords;
    }

    /// The displayed adjacent-mine count of a cell changed.
    fn value_changed(&mut self, coords: Coord2, value: u8) {
        let _ = (coords, value);
    }

    /// A cell left the hidden state.
    fn state_changed(&mut self, coords: Coord2, state: CellState, is_mine: bool) {
        let _ = (coords, state, is_mine);
    }

    /// The mine flag of a cell changed.
    fn mine_changed(&mut self, coords: Coord2, is_mine: bool) {
        let _ = (coords, is_mine);
    }
}

/// Null observer.
impl BoardObserver for () {}

impl<O: BoardObserver + ?Sized> BoardObserver for &mut O {
    fn cell_spawned(&mut self, coords: Coord2) -> Result<()> {
        (**self).cell_spawned(coords)
    }

    fn cell_destroyed(&mut self, coords: Coord2) {
        (**self).cell_destroyed(coords)
    }

    fn value_changed(&mut self, coords: Coord2, value: u8) {
        (**self).value_changed(coords, value)
    }

    fn state_changed(&mut self, coords: Coord2, state: CellState, is_mine: bool) {
        (**self).state_changed(coords, state, is_mine)
    }

    fn mine_changed(&mut self, coords: Coord2, is_mine: bool) {
        (**self).mine_changed(coords, is_mine)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellEvent {
    Spawned(Coord2),
    Destroyed(Coord2),
    ValueChanged(Coord2, u8),
    StateChanged(Coord2, CellState, bool),
    MineChanged(Coord2, bool),
}

impl CellEvent {
    pub const fn coords(self) -> Coord2 {
        use CellEvent::*;
        match self {
            Spawned(coords)
            | Destroyed(coords)
            | ValueChanged(coords, _)
            | StateChanged(coords, _, _)
            | MineChanged(coords, _) => coords,
        }
    }
}

/// Observer that records every notification in order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<CellEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[CellEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Hands out the recorded events and starts over.
    pub fn drain(&mut self) -> Vec<CellEvent> {
        core::mem::take(&mut self.events)
    }
}

impl BoardObserver for EventLog {
    fn cell_spawned(&mut self, coords: Coord2) -> Result<()> {
        self.events.push(CellEvent::Spawned(coords));
        Ok(())
    }

    fn cell_destroyed(&mut self, coords: Coord2) {
        self.events.push(CellEvent::Destroyed(coords));
    }

    fn value_changed(&mut self, coords: Coord2, value: u8) {
        self.events.push(CellEvent::ValueChanged(coords, value));
    }

    fn state_changed(&mut self, coords: Coord2, state: CellState, is_mine: bool) {
        self.events
            .push(CellEvent::StateChanged(coords, state, is_mine));
    }

    fn mine_changed(&mut self, coords: Coord2, is_mine: bool) {
        self.events.push(CellEvent::MineChanged(coords, is_mine));
    }
}
