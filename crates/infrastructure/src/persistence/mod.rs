//! File-backed repositories.

mod view_repository;

pub use view_repository::{ViewRepository, ViewRepositoryError};
