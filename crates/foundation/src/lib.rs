pub mod color;
pub mod hash;
pub mod math;
pub mod time;

// Foundation crate: small, well-tested primitives only.
pub use color::*;
pub use hash::*;
pub use time::*;
