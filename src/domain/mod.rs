//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod credentials;
pub mod password;
pub mod user;

pub use credentials::{validate_email_shape, validate_password_rule};
pub use password::Password;
pub use user::{
    ChangePasswordRequest, LoginRequest, NewUser, RegisterRequest, User, UserResponse,
};
