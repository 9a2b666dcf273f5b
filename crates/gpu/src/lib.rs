pub mod renderer;
pub mod tessellate;
pub mod viewport;

pub use renderer::*;
pub use tessellate::*;
pub use viewport::*;
