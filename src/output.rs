//! Session capture renderer: what a user sees running the script, as SVG.
//!
//! Capture the transcript, pad it to the canvas width, export, write.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::capture::{self, SessionSource};
use crate::error::Result;
use crate::svg::{self, SvgTheme};
use crate::transcript::Transcript;

/// Window title of the captured-output image.
pub const OUTPUT_TITLE: &str = "Output";

/// What `render_usage_output` produced.
#[derive(Debug)]
pub struct OutputSummary {
    pub path: PathBuf,
    pub lines: usize,
    pub columns: usize,
}

/// Serializes a finished transcript, every line padded to the canvas width.
pub fn transcript_svg(transcript: &Transcript) -> String {
    svg::export_svg(
        &transcript.padded_lines(),
        transcript.canvas_width(),
        OUTPUT_TITLE,
        &SvgTheme::TERMINAL,
    )
}

/// Runs `script` through `source`, renders its output, and writes the SVG to `out`.
///
/// Nothing is written unless the capture succeeds.
pub fn render_usage_output<S: SessionSource + ?Sized>(
    source: &S,
    script: &Path,
    out: &Path,
    timeout: Option<Duration>,
) -> Result<OutputSummary> {
    let transcript = capture::capture(source, script, timeout)?;
    svg::write_svg(out, &transcript_svg(&transcript))?;

    Ok(OutputSummary {
        path: out.to_path_buf(),
        lines: transcript.len(),
        columns: transcript.canvas_width(),
    })
}
