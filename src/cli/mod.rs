//! Command-line interface module

use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::conversion::{ConversionOptions, ConversionResult, FieldPolicy, Format};
use crate::error::{ConversionError, ErrorCategory};

pub mod path_mapping;

/// Main CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "tabconv")]
#[command(about = "Convert flat tabular data between CSV and JSON")]
#[command(version)]
#[command(long_about = None)]
pub struct Args {
    /// Input source (inline text, file, or directory)
    #[arg()]
    pub input: Option<String>,

    /// Output file path, or output directory for directory input (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Read source text from standard input
    #[arg(long)]
    pub stdin: bool,

    /// Source format (default: from the file extension, else guessed from the text)
    #[arg(long, value_enum)]
    pub from: Option<FormatArg>,

    /// Target format (default: the other format)
    #[arg(long, value_enum)]
    pub to: Option<FormatArg>,

    /// Compact JSON output instead of tab-indented
    #[arg(long)]
    pub compact: bool,

    /// Omit the header row when writing CSV
    #[arg(long)]
    pub no_header: bool,

    /// What to do with fields missing from the CSV header
    #[arg(long, value_enum, default_value_t = ExtraFields::Drop)]
    pub extra_fields: ExtraFields,

    /// Recursively process directories
    #[arg(long)]
    pub recursive: bool,

    /// Only parse and validate the source, don't convert
    #[arg(long)]
    pub validate_only: bool,

    /// Output conversion statistics
    #[arg(long)]
    pub stats: bool,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long)]
    pub quiet: bool,

    /// Continue converting other files when one file fails
    #[arg(long)]
    pub continue_on_error: bool,
}

/// Format names accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for Format {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Csv => Format::Csv,
            FormatArg::Json => Format::Json,
        }
    }
}

/// Extra field policies for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraFields {
    Drop,
    Reject,
}

impl From<ExtraFields> for FieldPolicy {
    fn from(policy: ExtraFields) -> Self {
        match policy {
            ExtraFields::Drop => FieldPolicy::Drop,
            ExtraFields::Reject => FieldPolicy::Reject,
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub args: Args,
}

impl CliConfig {
    /// Create CLI configuration from arguments
    pub fn from_args(args: Args) -> ConversionResult<Self> {
        if args.stdin && args.input.is_some() {
            return Err(ConversionError::configuration(
                "use either --stdin or an input argument, not both",
            ));
        }
        if let (Some(from), Some(to)) = (args.from, args.to) {
            if from == to {
                return Err(ConversionError::configuration(format!(
                    "source and target formats must differ (got {} to {})",
                    Format::from(from),
                    Format::from(to)
                )));
            }
        }
        if args.quiet && args.verbose {
            return Err(ConversionError::configuration(
                "--quiet and --verbose cannot be combined",
            ));
        }

        Ok(Self { args })
    }

    /// Build conversion options for one source.
    ///
    /// The source format comes from `--from`, else the file extension, else
    /// the counterpart of `--to`, else a guess from the text itself.
    pub fn resolve_options(
        &self,
        path: Option<&Path>,
        text: Option<&str>,
    ) -> ConversionResult<ConversionOptions> {
        let source = self
            .args
            .from
            .map(Format::from)
            .or_else(|| path.and_then(Format::from_path))
            .or_else(|| self.args.to.map(|t| Format::from(t).counterpart()))
            .or_else(|| text.map(Format::sniff))
            .ok_or_else(|| {
                ConversionError::unknown_source_format(
                    path.map(|p| format!("'{}'", p.display()))
                        .unwrap_or_else(|| self.input_description()),
                )
            })?;
        let target = self
            .args
            .to
            .map(Format::from)
            .unwrap_or_else(|| source.counterpart());

        let options = ConversionOptions::from_source(source)
            .with_target(target)
            .with_pretty(!self.args.compact)
            .with_header(!self.args.no_header)
            .with_field_policy(self.args.extra_fields.into());
        options.validate()?;

        Ok(options)
    }

    /// Check if we should continue on error
    pub fn continue_on_error(&self) -> bool {
        self.args.continue_on_error
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.args.quiet
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.args.verbose
    }

    /// Check if stats output is requested
    pub fn want_stats(&self) -> bool {
        self.args.stats
    }

    /// Check if only validation is requested
    pub fn is_validate_only(&self) -> bool {
        self.args.validate_only
    }

    /// Log filter directive matching the verbosity flags
    pub fn log_filter(&self) -> &'static str {
        if self.is_verbose() {
            "tabconv=debug"
        } else if self.args.quiet {
            "error"
        } else {
            "warn"
        }
    }

    /// Get input source description
    pub fn input_description(&self) -> String {
        if self.args.stdin {
            "standard input".to_string()
        } else if let Some(input) = &self.args.input {
            format!("'{}'", input)
        } else {
            "no input specified".to_string()
        }
    }

    /// Get output destination description
    pub fn output_description(&self) -> String {
        if let Some(output) = &self.args.output {
            format!("'{}'", output.display())
        } else {
            "standard output".to_string()
        }
    }
}

/// Heuristic for the positional argument: text that is not a path but looks like data
pub fn looks_like_inline_data(input: &str) -> bool {
    let trimmed = input.trim_start();
    trimmed.starts_with('[') || trimmed.starts_with('{') || input.contains('\n') || input.contains(',')
}

/// CLI utilities and helpers
pub struct CliUtils;

impl CliUtils {
    /// Format a file size in human-readable format
    pub fn format_file_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.1} {}", size, UNITS[unit_index])
        }
    }

    /// Format a duration in human-readable format
    pub fn format_duration(duration: Duration) -> String {
        let total_millis = duration.as_millis();

        if total_millis < 1000 {
            format!("{}ms", total_millis)
        } else if total_millis < 60_000 {
            format!("{:.1}s", total_millis as f64 / 1000.0)
        } else {
            let minutes = total_millis / 60_000;
            let seconds = (total_millis % 60_000) / 1000;
            format!("{}m {}s", minutes, seconds)
        }
    }

    /// Create a progress bar for file processing; hidden when quiet or not on a terminal
    pub fn create_progress_bar(total: u64, quiet: bool) -> indicatif::ProgressBar {
        if quiet || !console::Term::stderr().is_term() {
            return indicatif::ProgressBar::hidden();
        }

        let pb = indicatif::ProgressBar::new(total);
        if let Ok(style) = indicatif::ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }

    /// Success line (empty in quiet mode)
    pub fn success_line(message: &str, quiet: bool) -> Option<String> {
        (!quiet).then(|| format!("{} {}", console::style("✓").green(), message))
    }

    /// Show a success message on stderr (if not in quiet mode)
    pub fn show_success(message: &str, quiet: bool) {
        if let Some(line) = Self::success_line(message, quiet) {
            eprintln!("{}", line);
        }
    }

    /// Show an error message
    pub fn show_error(message: &str) {
        eprintln!("{} {}", console::style("✗").red(), message);
    }

    /// Show a warning message (if not in quiet mode)
    pub fn show_warning(message: &str, quiet: bool) {
        if !quiet {
            eprintln!("{} {}", console::style("⚠").yellow(), message);
        }
    }
}

/// Suggestion printed under an error
pub fn error_tip(error: &ConversionError) -> Option<&'static str> {
    if let ConversionError::UnknownSourceFormat { .. } = error {
        return Some("Name the source format with --from csv or --from json");
    }

    match error.category() {
        ErrorCategory::Parse => Some("Use --validate-only to check the source before converting"),
        ErrorCategory::Validation => {
            Some("JSON input must be an array of objects whose values are strings, numbers or booleans")
        }
        ErrorCategory::Write => Some("Use --extra-fields drop to ignore fields missing from the header"),
        ErrorCategory::Configuration => Some("Use --from and --to to choose two different formats"),
        ErrorCategory::Io | ErrorCategory::Internal => None,
    }
}

/// Handle CLI errors with user-friendly messages
pub fn handle_error(error: &ConversionError) {
    CliUtils::show_error(&error.user_message());

    if let ConversionError::ParseError(parse_error) = error {
        if let Some(preview) = &parse_error.input_preview {
            eprintln!("\n{}", preview);
        }
    }

    if let Some(tip) = error_tip(error) {
        eprintln!("\nTip: {}", tip);
    }

    if !error.is_user_error() {
        eprintln!("\nThis is a bug in tabconv; please report it.");
    }

    // Show usage hint
    eprintln!("\nTry 'tabconv --help' for usage information.");
}
