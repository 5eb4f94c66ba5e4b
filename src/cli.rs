//! CLI argument definitions for both renderers.
//!
//! This module is intentionally free of non-clap dependencies. Every flag
//! has a default, so each binary runs with no arguments from the repository
//! root.

use std::path::PathBuf;

use clap::Parser;

/// Script rendered and executed by default.
pub const DEFAULT_SCRIPT: &str = "docs/media/code_renderer/Usage.sh";

/// Renders a usage script as a syntax-highlighted SVG listing.
#[derive(Parser, Debug)]
#[command(name = "render-usage", version, about = "Render Usage.sh as a highlighted SVG")]
pub struct UsageCli {
    /// Script to render.
    #[arg(long, default_value = DEFAULT_SCRIPT)]
    pub script: PathBuf,

    /// Destination SVG, overwritten if it exists.
    #[arg(long, default_value = "docs/media/usage_code.svg")]
    pub out: PathBuf,

    /// Log level when RUST_LOG is unset.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Runs a usage script in a pseudo-terminal and renders its output as SVG.
#[derive(Parser, Debug)]
#[command(
    name = "render-usage-output",
    version,
    about = "Capture Usage.sh output in a pty and render it as SVG"
)]
pub struct OutputCli {
    /// Script to execute.
    #[arg(long, default_value = DEFAULT_SCRIPT)]
    pub script: PathBuf,

    /// Destination SVG, overwritten if it exists.
    #[arg(long, default_value = "docs/media/usage_output.svg")]
    pub out: PathBuf,

    /// Kill the script after this many seconds (default: wait forever).
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Width of the pseudo-terminal the script sees.
    #[arg(long, default_value_t = 120)]
    pub cols: u16,

    /// Log level when RUST_LOG is unset.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definitions_are_valid() {
        UsageCli::command().debug_assert();
        OutputCli::command().debug_assert();
    }

    #[test]
    fn test_cli_usage_defaults() {
        let cli = UsageCli::parse_from(["render-usage"]);
        assert_eq!(cli.script, PathBuf::from(DEFAULT_SCRIPT));
        assert_eq!(cli.out, PathBuf::from("docs/media/usage_code.svg"));
    }

    #[test]
    fn test_cli_output_defaults_wait_forever() {
        let cli = OutputCli::parse_from(["render-usage-output"]);
        assert_eq!(cli.out, PathBuf::from("docs/media/usage_output.svg"));
        assert_eq!(cli.timeout, None);
        assert_eq!(cli.cols, 120);
    }

    #[test]
    fn test_cli_output_overrides() {
        let cli = OutputCli::parse_from([
            "render-usage-output",
            "--script",
            "demo.sh",
            "--timeout",
            "10",
            "--cols",
            "80",
        ]);
        assert_eq!(cli.script, PathBuf::from("demo.sh"));
        assert_eq!(cli.timeout, Some(10));
        assert_eq!(cli.cols, 80);
    }
}
