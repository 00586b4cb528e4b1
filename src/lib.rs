//! ByteGen: a minimal random password generator.
//!
//! The library holds everything but process setup:
//!
//! - [`generator`]: alphabet construction and password sampling
//! - [`session`]: the current config/password pair, regenerated on change
//! - [`copy`]: clipboard writers and the copy action
//! - [`settings`]: saved defaults
//! - [`cli`], [`commands`], [`ui`]: the terminal front end

pub mod cli;
pub mod commands;
pub mod copy;
pub mod error;
pub mod generator;
pub mod session;
pub mod settings;
pub mod ui;

pub use error::{Error, Result};
pub use generator::{generate, CharacterAlphabet, GenerationConfig, Password};
pub use session::GeneratorSession;
