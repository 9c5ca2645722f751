//! Application Layer
//!
//! Console front-end: command parsing, the input loop and logging setup.

pub mod application;
pub mod command;
pub mod logging;
