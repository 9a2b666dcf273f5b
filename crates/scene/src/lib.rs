pub mod camera;
pub mod lights;
pub mod mobius;
pub mod particles;
pub mod state;

pub use state::*;
