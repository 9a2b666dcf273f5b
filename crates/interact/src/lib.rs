pub mod counter;
pub mod ripple;
pub mod scroll;
pub mod tilt;
pub mod typing;

pub use counter::*;
pub use ripple::*;
pub use scroll::*;
pub use tilt::*;
pub use typing::*;
