pub mod protocol;
pub mod submission;
pub mod submit;

pub use protocol::*;
pub use submission::*;
pub use submit::*;
