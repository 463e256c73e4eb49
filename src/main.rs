use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use tabconv::cli::path_mapping::map_input_to_output;
use tabconv::cli::{self, Args, CliConfig, CliUtils};
use tabconv::conversion::batch::convert_batch_sources;
use tabconv::conversion::{ConversionEngine, ConversionStatistics, ConvertedData};
use tabconv::error::ConversionError;
use tabconv::parser::directory::find_source_files;
use tabconv::parser::InputSource;

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match CliConfig::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            cli::handle_error(&e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config);

    let result = if config.is_validate_only() {
        handle_validation(&config)
    } else {
        handle_conversion(&config)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<ConversionError>() {
                Some(conversion_error) => cli::handle_error(conversion_error),
                None => CliUtils::show_error(&format!("{:#}", err)),
            }
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; stdout carries only converted text
fn init_tracing(config: &CliConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Where the positional argument (or --stdin) points
enum Input {
    Single(InputSource),
    Directory(PathBuf),
}

fn resolve_input(config: &CliConfig) -> Result<Input> {
    if config.args.stdin {
        return Ok(Input::Single(InputSource::Stdin));
    }

    let input = config
        .args
        .input
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("No input provided. Use --stdin or provide an input path"))?;
    let path = PathBuf::from(input);

    if path.is_file() {
        Ok(Input::Single(InputSource::File(path)))
    } else if path.is_dir() {
        Ok(Input::Directory(path))
    } else if cli::looks_like_inline_data(input) {
        Ok(Input::Single(InputSource::String(input.clone())))
    } else {
        Err(anyhow::anyhow!("Input path does not exist: {}", input))
    }
}

fn handle_validation(config: &CliConfig) -> Result<()> {
    match resolve_input(config)? {
        Input::Single(source) => {
            let text = source.read_content()?;
            let options = config.resolve_options(source.path().map(PathBuf::as_path), Some(text.as_str()))?;
            let records = ConversionEngine::new(options.clone()).validate_only(&text)?;
            CliUtils::show_success(
                &format!("Valid {} ({} records)", options.source, records.len()),
                config.is_quiet(),
            );
            Ok(())
        }
        Input::Directory(dir) => validate_directory(&dir, config),
    }
}

fn validate_directory(dir: &Path, config: &CliConfig) -> Result<()> {
    let options = config.resolve_options(None, None)?;
    let engine = ConversionEngine::new(options.clone());
    let files = find_source_files(dir, options.source, config.args.recursive)
        .with_context(|| format!("Failed finding {} files in {}", options.source, dir.display()))?;

    let mut failures = 0;
    for file in files {
        let relative = file.strip_prefix(dir).unwrap_or(&file).display().to_string();
        let outcome = InputSource::File(file.clone())
            .read_content()
            .and_then(|text| engine.validate_only(&text));
        match outcome {
            Ok(records) => CliUtils::show_success(
                &format!("{} ({} records)", relative, records.len()),
                config.is_quiet(),
            ),
            Err(e) => {
                failures += 1;
                CliUtils::show_error(&format!("{}: {}", relative, e.user_message()));
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} file(s) failed validation", failures);
    }
    Ok(())
}

fn handle_conversion(config: &CliConfig) -> Result<()> {
    match resolve_input(config)? {
        Input::Single(source) => convert_single(&source, config),
        Input::Directory(dir) => convert_directory(&dir, config),
    }
}

fn convert_single(source: &InputSource, config: &CliConfig) -> Result<()> {
    let text = source.read_content()?;
    let options = config.resolve_options(source.path().map(PathBuf::as_path), Some(text.as_str()))?;
    tracing::debug!(
        input = %config.input_description(),
        output = %config.output_description(),
        "converting {} to {}",
        options.source,
        options.target
    );

    let converted = ConversionEngine::new(options).convert(&text)?;

    if let Some(output_path) = &config.args.output {
        write_output(output_path, &converted.content)?;
        CliUtils::show_success(
            &format!("Converted to: {}", output_path.display()),
            config.is_quiet(),
        );
    } else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(converted.content.as_bytes())?;
        if !converted.content.ends_with('\n') {
            stdout.write_all(b"\n")?;
        }
        stdout.flush()?;
    }

    if config.want_stats() {
        output_statistics(&converted, config.is_quiet());
    }

    Ok(())
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

fn convert_directory(input_dir: &Path, config: &CliConfig) -> Result<()> {
    let output_dir = config
        .args
        .output
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("Output directory required for directory conversion"))?;
    let options = config.resolve_options(None, None)?;

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create directory {}", output_dir.display()))?;

    let files = find_source_files(input_dir, options.source, config.args.recursive)
        .with_context(|| format!("Failed finding {} files in {}", options.source, input_dir.display()))?;

    if files.is_empty() {
        CliUtils::show_warning(
            &format!("No {} files found in {}", options.source, input_dir.display()),
            config.is_quiet(),
        );
        return Ok(());
    }

    if !config.is_quiet() {
        eprintln!("Found {} {} files", files.len(), options.source);
    }

    let sources: Vec<InputSource> = files.into_iter().map(InputSource::File).collect();
    let pb = CliUtils::create_progress_bar(sources.len() as u64, config.is_quiet());
    let extension = options.target.extension();

    let stats = convert_batch_sources(&sources, &options, config.continue_on_error(), |source, result| {
        pb.inc(1);
        let Some(input_file) = source.path() else {
            return Ok(());
        };
        let relative = input_file.strip_prefix(input_dir).unwrap_or(input_file);

        match result {
            Ok(converted) => {
                let output_file = map_input_to_output(input_dir, input_file, output_dir, extension);
                write_output(&output_file, &converted.content).map_err(|e| {
                    ConversionError::io(format!("{:#}", e), Some(output_file.clone()))
                })?;
                if let Some(line) = CliUtils::success_line(
                    &format!("{} -> {}", relative.display(), output_file.display()),
                    config.is_quiet(),
                ) {
                    pb.suspend(|| eprintln!("{}", line));
                }
            }
            Err(e) => pb.suspend(|| {
                CliUtils::show_error(&format!(
                    "Error converting {}: {}",
                    relative.display(),
                    e.user_message()
                ))
            }),
        }
        Ok(())
    });
    pb.finish_and_clear();

    // Conversion failures were already reported per file
    let stats = stats.map_err(|e| match e {
        ConversionError::Io { .. } => anyhow::Error::new(e),
        other => anyhow::anyhow!("Aborting due to conversion error: {}", other.user_message()),
    })?;
    if config.want_stats() {
        output_batch_statistics(&stats, config.is_quiet());
    }

    if stats.failed_count > 0 {
        anyhow::bail!("{} of {} files failed to convert", stats.failed_count, stats.total_count());
    }
    Ok(())
}

fn output_statistics(converted: &ConvertedData, quiet: bool) {
    if quiet {
        return;
    }

    let meta = &converted.metadata;
    eprintln!("\nConversion Statistics:");
    eprintln!("Formats: {} -> {}", meta.source, meta.target);
    eprintln!("Records: {}", meta.record_count);
    eprintln!("Fields: {}", meta.field_count);
    eprintln!("Input size: {}", CliUtils::format_file_size(meta.input_size));
    eprintln!("Output size: {}", CliUtils::format_file_size(meta.output_size));
    eprintln!(
        "Processing time: {}",
        CliUtils::format_duration(std::time::Duration::from_millis(meta.processing_time_ms))
    );
}

fn output_batch_statistics(stats: &ConversionStatistics, quiet: bool) {
    if quiet {
        return;
    }

    eprintln!("\n{}", stats.summary());
    eprintln!("Input size: {}", CliUtils::format_file_size(stats.input_size_bytes));
    eprintln!("Output size: {}", CliUtils::format_file_size(stats.output_size_bytes));
    eprintln!("Collected at: {}", stats.collected_at.to_rfc3339());
}
