pub mod endpoints;
pub mod http;
pub mod in_process;
pub mod transport;

pub use http::HttpTransport;
pub use in_process::InProcessTransport;
pub use transport::*;
