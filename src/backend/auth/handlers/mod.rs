//! Authentication request handlers

pub mod login;
pub mod refresh;
pub mod signup;
pub mod types;

pub use login::login;
pub use refresh::refresh;
pub use signup::signup;
