//! Command-line interface for `tint`.
//!
//! # Examples
//!
//! ```bash
//! # Three themes from one brand color, as JSON
//! tint generate "#3b82f6"
//!
//! # CSS custom properties with explicit secondary/accent colors
//! tint generate "#3b82f6" --secondary "#8b5cf6" --accent "#10b981" -f css
//!
//! # Check a color pair
//! tint contrast "#64748b" "#ffffff" --level aaa
//!
//! # Fix a color pair
//! tint ensure "#ffffff" "#eeeeee" --ratio 4.5
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tincture::{ExportFormat, WcagLevel};

/// tint - accessible light/dark color themes from a single brand color.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "tint",
    author,
    version,
    about = "Generate accessible light/dark color themes",
    long_about = "Derives WCAG-checked light and dark palettes from a brand color, \
                  checks contrast between color pairs and exports themes as JSON, CSS or TOML."
)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, short = 'c', env = "TINT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (repeat for more)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build the three deterministic themes from a primary color
    Generate(GenerateArgs),

    /// Show the contrast ratio and WCAG grade of two colors
    Contrast(ContrastArgs),

    /// Adjust a foreground color until it reaches a contrast ratio
    Ensure(EnsureArgs),

    /// Build themes from a list of already extracted colors
    Extract(ExtractArgs),
}

/// Output options shared by theme-producing commands.
#[derive(Parser, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output format (defaults to the config file, then json)
    #[arg(long, short = 'f')]
    pub format: Option<FormatArg>,

    /// Write to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Append component CSS rules (css format only)
    #[arg(long)]
    pub components: bool,
}

/// Arguments for `tint generate`.
#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    /// Primary color as #rrggbb
    pub primary: String,

    /// Secondary color as #rrggbb
    #[arg(long, short = 's')]
    pub secondary: Option<String>,

    /// Accent color as #rrggbb
    #[arg(long, short = 'a')]
    pub accent: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for `tint contrast`.
#[derive(Parser, Debug, Clone)]
pub struct ContrastArgs {
    /// First color as #rrggbb
    pub first: String,

    /// Second color as #rrggbb
    pub second: String,

    /// Level used for the compliance verdict
    #[arg(long, short = 'l')]
    pub level: Option<LevelArg>,
}

/// Arguments for `tint ensure`.
#[derive(Parser, Debug, Clone)]
pub struct EnsureArgs {
    /// Background color as #rrggbb
    pub background: String,

    /// Foreground color as #rrggbb
    pub foreground: String,

    /// Target contrast ratio (defaults to the config file, then 4.5)
    #[arg(long, short = 'r')]
    pub ratio: Option<f64>,
}

/// Arguments for `tint extract`.
#[derive(Parser, Debug, Clone)]
pub struct ExtractArgs {
    /// Extracted colors, most dominant first
    #[arg(required = true, num_args = 1..)]
    pub colors: Vec<String>,

    /// Maximum palette size after diversity filtering
    #[arg(long, default_value_t = tincture::extract::DEFAULT_PALETTE_SIZE)]
    pub count: usize,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Export formats accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    /// JSON array of themes
    Json,
    /// CSS custom properties
    Css,
    /// TOML `[[themes]]` tables
    Toml,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => Self::Json,
            FormatArg::Css => Self::Css,
            FormatArg::Toml => Self::Toml,
        }
    }
}

/// WCAG levels accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelArg {
    /// 4.5:1 for normal text
    Aa,
    /// 7:1 for normal text
    Aaa,
}

impl From<LevelArg> for WcagLevel {
    fn from(arg: LevelArg) -> Self {
        match arg {
            LevelArg::Aa => Self::Aa,
            LevelArg::Aaa => Self::Aaa,
        }
    }
}

impl Cli {
    /// Parse command line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create CLI from iterator (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Get log level based on verbosity.
    #[must_use]
    pub const fn log_level(&self) -> LogLevel {
        if self.quiet {
            return LogLevel::Error;
        }
        match self.verbose {
            0 => LogLevel::Warn,
            1 => LogLevel::Info,
            2 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }
}

/// Log level for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Only show errors
    Error,
    /// Show warnings and errors
    Warn,
    /// Show info messages
    Info,
    /// Show debug messages
    Debug,
    /// Show all messages including trace
    Trace,
}

impl LogLevel {
    /// Filter directive understood by `tracing_subscriber::EnvFilter`.
    #[must_use]
    pub const fn as_filter(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_generate() {
        let cli = Cli::try_parse_from(["tint", "generate", "#3b82f6"]).unwrap();
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.primary, "#3b82f6");
                assert!(args.secondary.is_none());
                assert!(args.accent.is_none());
                assert!(args.output.format.is_none());
                assert!(!args.output.components);
            }
            other => panic!("Expected Generate command, got {other:?}"),
        }
    }

    #[test]
    fn cli_parses_generate_options() {
        let cli = Cli::try_parse_from([
            "tint",
            "generate",
            "#3b82f6",
            "--secondary",
            "#8b5cf6",
            "-a",
            "#10b981",
            "-f",
            "css",
            "--components",
            "-o",
            "/tmp/theme.css",
        ])
        .unwrap();
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.secondary.as_deref(), Some("#8b5cf6"));
                assert_eq!(args.accent.as_deref(), Some("#10b981"));
                assert_eq!(args.output.format, Some(FormatArg::Css));
                assert!(args.output.components);
                assert_eq!(args.output.output, Some(PathBuf::from("/tmp/theme.css")));
            }
            other => panic!("Expected Generate command, got {other:?}"),
        }
    }

    #[test]
    fn cli_parses_contrast() {
        let cli =
            Cli::try_parse_from(["tint", "contrast", "#000000", "#ffffff", "--level", "aaa"])
                .unwrap();
        match cli.command {
            Command::Contrast(args) => {
                assert_eq!(args.first, "#000000");
                assert_eq!(args.second, "#ffffff");
                assert_eq!(args.level, Some(LevelArg::Aaa));
            }
            other => panic!("Expected Contrast command, got {other:?}"),
        }
    }

    #[test]
    fn cli_parses_ensure() {
        let cli = Cli::try_parse_from(["tint", "ensure", "#ffffff", "#eeeeee", "-r", "7"]).unwrap();
        match cli.command {
            Command::Ensure(args) => assert_eq!(args.ratio, Some(7.0)),
            other => panic!("Expected Ensure command, got {other:?}"),
        }
    }

    #[test]
    fn cli_parses_extract() {
        let cli = Cli::try_parse_from(["tint", "extract", "#3b82f6", "#ef4444", "--count", "4"])
            .unwrap();
        match cli.command {
            Command::Extract(args) => {
                assert_eq!(args.colors, ["#3b82f6", "#ef4444"]);
                assert_eq!(args.count, 4);
            }
            other => panic!("Expected Extract command, got {other:?}"),
        }
    }

    #[test]
    fn cli_extract_requires_colors() {
        assert!(Cli::try_parse_from(["tint", "extract"]).is_err());
    }

    #[test]
    fn cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["tint", "generate", "#3b82f6", "-f", "yaml"]).is_err());
    }

    #[test]
    fn cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["tint"]).is_err());
    }

    #[test]
    fn cli_parses_verbose() {
        let cli = Cli::try_parse_from(["tint", "contrast", "#000000", "#ffffff"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.log_level(), LogLevel::Warn);

        let cli = Cli::try_parse_from(["tint", "-v", "contrast", "#000000", "#ffffff"]).unwrap();
        assert_eq!(cli.log_level(), LogLevel::Info);

        let cli = Cli::try_parse_from(["tint", "contrast", "#000000", "#ffffff", "-vv"]).unwrap();
        assert_eq!(cli.log_level(), LogLevel::Debug);

        let cli = Cli::try_parse_from(["tint", "-vvv", "contrast", "#000000", "#ffffff"]).unwrap();
        assert_eq!(cli.log_level(), LogLevel::Trace);
    }

    #[test]
    fn cli_quiet() {
        let cli = Cli::try_parse_from(["tint", "-q", "contrast", "#000000", "#ffffff"]).unwrap();
        assert_eq!(cli.log_level(), LogLevel::Error);
        assert_eq!(cli.log_level().as_filter(), "error");

        let result = Cli::try_parse_from(["tint", "-q", "-v", "contrast", "#000000", "#ffffff"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parses_config_path() {
        let cli = Cli::try_parse_from([
            "tint",
            "--config",
            "/tmp/tint.toml",
            "contrast",
            "#000000",
            "#ffffff",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/tint.toml")));
    }

    #[test]
    fn cli_help_works() {
        let result = Cli::try_parse_from(["tint", "--help"]);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn format_and_level_conversions() {
        assert_eq!(ExportFormat::from(FormatArg::Toml), ExportFormat::Toml);
        assert_eq!(WcagLevel::from(LevelArg::Aaa), WcagLevel::Aaa);
    }
}
