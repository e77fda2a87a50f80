//! Core library for countdown.
//!
//! Duration literals, clock formatting, configuration and logging.
//! Nothing in here touches the terminal.

pub mod config;
pub mod duration;
pub mod logging;
