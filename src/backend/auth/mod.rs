//! Authentication Module
//!
//! This module handles user registration, login, token refresh and the
//! JWT session tokens protected routes verify.

/// HTTP handlers for auth endpoints
pub mod handlers;

/// JWT token creation and verification
pub mod sessions;

/// User records and database operations
pub mod users;
