//! Application services: command and query handlers over a [`Session`].
//!
//! [`Session`]: crate::domain::session::Session

pub mod command_handlers;
pub mod query_handlers;
