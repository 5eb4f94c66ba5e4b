//! scriptshot: renders a usage script, and what it prints, as SVG images.
//!
//! Two pipelines share the modules below:
//!
//! - `usage`: source text → syntect highlighting → numbered listing → SVG.
//! - `output`: pty capture → ANSI decode → transcript → padded lines → SVG.

pub mod ansi;
pub mod capture;
pub mod cli;
pub mod error;
pub mod highlight;
pub mod layout;
pub mod logging;
pub mod output;
pub mod svg;
pub mod transcript;
pub mod usage;

pub use error::{RenderError, Result};
