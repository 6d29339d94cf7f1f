//! Stateful working structures: the working-tree scanner, repository
//! handles and the backend/lifecycle registry.

pub mod registry;
pub mod repository;
pub mod workspace;
