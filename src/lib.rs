#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod board;
mod cellset;
mod common;
mod config;
mod game;
#[cfg(feature = "std")]
mod logging;

pub use board::*;
pub use cellset::{CellSet, CellSetError, SetCells};
pub use common::*;
pub use config::*;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, init_logging_with};
