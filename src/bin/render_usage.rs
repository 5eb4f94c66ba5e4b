//! Entry point for `render-usage`: Usage.sh → highlighted SVG listing.

use clap::Parser;
use scriptshot::cli::UsageCli;

fn main() -> color_eyre::Result<()> {
    // Install color_eyre error/panic hooks for pretty backtraces.
    color_eyre::install()?;

    let cli = UsageCli::parse();
    scriptshot::logging::init(&cli.log_level);

    let summary = scriptshot::usage::render_usage(&cli.script, &cli.out)?;

    println!(
        "✅ Syntax-highlighted SVG written to {} using theme '{}'",
        summary.path.display(),
        summary.theme
    );
    Ok(())
}
