//! Entity models
//!
//! Each entity owns its state and its scene nodes; subsystems operate on
//! them through the play state rather than entities reaching back into the
//! game.

mod asteroid;
mod missile;
mod ship;
mod sun;

pub use asteroid::{Asteroid, SplitSeed, ASTEROID_TIERS};
pub use missile::Missile;
pub use ship::{Eased, Ship};
pub use sun::Sun;
