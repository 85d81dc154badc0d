//! PNG collaborators for boards and tunnel maps.
//!
//! These functions translate between image files and the automaton's types.
//! The automaton never sees colors: tunnel colors become opaque
//! [`PortalKey`](crate::automaton::PortalKey)s here.

pub mod board;
pub mod tunnels;

pub use board::{decode_board, encode_board, load_board, save_board};
pub use tunnels::{load_tunnels, portal_key, scan_tunnels};
