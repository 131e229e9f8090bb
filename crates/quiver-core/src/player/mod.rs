//! Player system
//!
//! Contains the You struct: the character state the quiver reads.

mod you;

pub use you::{BodySize, CANT_GRASP_MSG, Species, You};
