//! Journal resources
//!
//! Diary, gratitude and chat storage plus the handlers that serve them
//! under `/api/users/*`.

pub mod db;
pub mod handlers;
