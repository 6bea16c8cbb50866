//! User domain module.
//!
//! This module contains the user entity and the repository interface used
//! to persist it together with its conversion history.

mod model;
mod repository;

pub use model::{User, validate_username};
pub use repository::UserRepository;
