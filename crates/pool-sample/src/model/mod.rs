//! Domain types for the sample application.

pub mod connection;
pub mod settings;

pub use connection::*;
pub use settings::*;
