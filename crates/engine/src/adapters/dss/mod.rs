// Backend protocol adapter - re-exports all public interfaces

mod constants;
mod content_detection;
mod endpoints;
mod request;
mod response;
mod runtime;
pub mod links;
pub mod mapper;

pub use constants::*;
pub use content_detection::*;
pub use endpoints::*;
pub use request::*;
pub use response::*;
pub use runtime::*;
