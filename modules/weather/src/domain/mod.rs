pub mod error;
pub mod model;
pub mod repos;
pub mod service;
pub mod validate;


pub use error::DomainError;
