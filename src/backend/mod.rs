//! Backend Module
//!
//! This module contains all server-side code for the MindMate REST service:
//! a thin layer over the database exposing identity endpoints and the
//! per-user journal collections. Route handlers verify a bearer token,
//! lazily upsert the user record the token names, and delegate persistence
//! to sqlx.

/// Identity: JWT sessions, user records, auth handlers
pub mod auth;

/// Error types and their HTTP mapping
pub mod error;

/// Journal collections: diary, gratitude wall, chat history
pub mod journal;

/// Request middleware (token verification)
pub mod middleware;

/// Route configuration
pub mod routes;

/// Server setup: config, state, app assembly
pub mod server;
