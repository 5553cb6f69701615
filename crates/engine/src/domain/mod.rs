pub mod constraints;
pub mod error;
pub mod service;
pub mod session;
pub mod types;
pub mod verify;
