pub mod render;
pub mod workspace;

pub use render::*;
pub use workspace::*;
