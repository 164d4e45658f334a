#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;
mod ai;
mod bitboard;
mod board;
mod common;
mod config;
mod game;
#[cfg(feature = "std")]
mod logging;
mod player;
mod ship;
#[cfg(feature = "std")]
pub mod ui;

pub use ai::*;
pub use bitboard::{BitBoard, SetBits};
pub use board::*;
pub use common::*;
pub use config::*;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, init_logging_with};
pub use player::*;
pub use ship::*;
