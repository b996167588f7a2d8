//! Structural editing of headlines.
//!
//! Edits are expressed as commands ([`Cmd`]) that compile to an
//! `xi_rope::Delta` against the buffer text. [`crate::Buffer::apply`] runs
//! the compilation with the original outline definitions active, so a
//! subtree only ever contains standard headlines no matter which language
//! support is installed on the buffer.

pub mod commands;
pub mod patch;

pub use commands::{Cmd, CommandError};
pub use patch::Patch;
