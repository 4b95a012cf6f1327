//! URL-shareable bingo board state.
//!
//! A board is three query parameters: `data` holds the 24 entries as a base64
//! token, `order` the shuffled display order and `marked` the marked cells.
//! Everything here is pure; reading and writing the real address bar is done
//! through a [`StateStore`] supplied by the host.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub use board::*;
pub use error::*;
pub use indices::*;
pub use lines::*;
pub use params::*;
pub use validate::*;

mod board;
mod error;
mod indices;
mod lines;
mod params;
mod validate;
