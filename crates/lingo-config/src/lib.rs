//! # Lingo Config
//!
//! Type-safe configuration for lingo: where locale files live, which
//! language to start with and how to log.
//!
//! This crate provides configuration loading, validation and atomic saving.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod error;
pub mod loader;
pub mod schema;
pub mod validator;

pub use defaults::*;
pub use error::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
