pub mod common;
pub mod ingredient;
pub mod recipe;

pub use common::*;
pub use ingredient::*;
pub use recipe::*;
