mod endpoints;
mod icon;
mod service;
mod traits;
mod types;


pub use endpoints::*;
pub use icon::*;
pub use service::*;
pub use traits::*;
pub use types::*;
