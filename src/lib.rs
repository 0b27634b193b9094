//! MindMate - Main Library
//!
//! MindMate is a mental-wellness journaling application: users write diary
//! entries that receive keyword-based emotion tagging, keep a gratitude wall,
//! and chat with a scripted companion bot. State lives in a REST backend;
//! the client keeps its local copy consistent under an expiring-credential
//! model.
//!
//! # Module Structure
//!
//! The library is organized into three main modules:
//!
//! - **`shared`** - Wire types used by both client and backend
//!   - Diary, gratitude and chat entry structures
//!   - The fixed emotion vocabulary and intensity clamping
//!   - Shared error types
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server with JWT-protected journal routes
//!   - Identity endpoints (signup, login, token refresh)
//!   - sqlx persistence and database operations
//!
//! - **`client`** - The session & data-synchronization core
//!   - Credential store with single-flight refresh
//!   - Authenticated request client (retry-once-on-401)
//!   - Typed resource gateway and local state reconcilers
//!   - Session controller state machine
//!   - Emotion analysis and canned-response bot helpers

pub mod backend;
pub mod client;
pub mod shared;
