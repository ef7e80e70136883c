//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence. The usecase
//! layer only sees the [`UserRepository`] trait; the relational store and the
//! in-memory store are interchangeable behind it.

pub(crate) mod entities;
mod memory;
mod user_repository;

pub use memory::InMemoryUserStore;
pub use user_repository::{UserRepository, UserStore};

#[cfg(test)]
pub use user_repository::MockUserRepository;
