//! Route configuration

pub mod router;

pub use router::create_router;
