//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on the repository trait, not on a
//! storage technology.

mod token_issuer;
mod user_service;

pub use token_issuer::{Claims, IssuedToken, TokenIssuer};
pub use user_service::{LoginOutcome, UserManager, UserService};
