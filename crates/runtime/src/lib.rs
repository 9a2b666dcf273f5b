pub mod frame;
pub mod pointer;

pub use frame::*;
pub use pointer::*;
