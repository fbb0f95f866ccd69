//! Text renderer for preview trees
//!
//! This module takes a Preview and produces plain or ANSI-styled text
//! suitable for a terminal.

pub mod config;
pub mod text;

pub use config::TextConfig;
pub use text::render_text;
