//! Entry point for `render-usage-output`: run Usage.sh in a pty, render what it prints.

use std::time::Duration;

use clap::Parser;
use scriptshot::capture::PtySource;
use scriptshot::cli::OutputCli;
use scriptshot::output::{self, OUTPUT_TITLE};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = OutputCli::parse();
    scriptshot::logging::init(&cli.log_level);

    let source = PtySource::new(cli.cols);
    let timeout = cli.timeout.map(Duration::from_secs);
    let summary = output::render_usage_output(&source, &cli.script, &cli.out, timeout)?;

    println!(
        "✅ SVG written to {} with window title “{}” ({} lines, {} columns)",
        summary.path.display(),
        OUTPUT_TITLE,
        summary.lines,
        summary.columns
    );
    Ok(())
}
