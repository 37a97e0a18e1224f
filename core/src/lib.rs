//! Minesweeper-style board engine.
//!
//! A [`Board`] owns a square [`Grid`] of [`Cell`]s, places mines outside a 3×3 safe zone around
//! the start cell and opens the starting area. Adjacent-mine counts only look at the four
//! orthogonal neighbours. Rendering layers follow along through a [`BoardObserver`].
#![no_std]

extern crate alloc;

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use observer::*;
pub use reveal::*;
pub use types::*;

pub use grid::Grid;

mod board;
mod cell;
mod error;
mod generator;
mod grid;
pub mod neighbors;
mod observer;
mod reveal;
mod types;
