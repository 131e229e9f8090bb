//! Static game data

pub mod colors;
