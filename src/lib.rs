//! Account service - user registration, login and management.
//!
//! A small HTTP service over a pluggable user store: accounts are created
//! with a validated email and an Argon2-hashed password, and a successful
//! login yields a signed, time-limited bearer token.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Users, credential rules and password hashing
//! - **services**: Token issuer and the user usecase
//! - **infra**: Database, migrations and user stores
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server against Postgres
//! cargo run -- serve
//!
//! # Start the server with process-local storage
//! cargo run -- serve --in-memory
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Password, User};
pub use errors::{AppError, AppResult};
pub use services::{TokenIssuer, UserManager, UserService};
