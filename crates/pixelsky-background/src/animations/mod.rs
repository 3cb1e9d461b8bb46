//! Background layers, drawn back to front: grid, marks, clouds.

pub mod clouds;
pub mod grid;
pub mod marks;
