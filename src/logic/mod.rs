pub mod edit_session;
pub mod resolve;

pub use edit_session::*;
pub use resolve::*;
