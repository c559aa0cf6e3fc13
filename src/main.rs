//! mccfmt - reformatter for embedded C blocks in McCode sources

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Context;
use glob::Pattern;
use mccfmt::format::ClangFormatter;
use mccfmt::process::format_document;
use mccfmt::{parse_args, CliArgs, Config, Result};
use rayon::prelude::*;
use walkdir::WalkDir;

/// Default maximum file size in bytes (100 MB)
/// Files larger than this are skipped to prevent memory exhaustion
const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

fn main() -> ExitCode {
    let args = parse_args();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::from(2);
        }
    };

    // Configure thread pool if --jobs specified
    if let Some(jobs) = args.jobs {
        if jobs > 0 {
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
            {
                eprintln!("Warning: failed to configure thread pool: {e}");
            }
        }
    }

    let files = collect_files(&args, &config);
    if files.is_empty() {
        if !args.silent {
            eprintln!("No McCode files found to process.");
        }
        return ExitCode::SUCCESS;
    }

    // The backend is chosen once for the whole run, never per block
    let clang = args
        .clang_format
        .as_ref()
        .map(|path| ClangFormatter::new(path, config.clang_style.clone()));

    let changed_count = AtomicUsize::new(0);
    let error_count = AtomicUsize::new(0);

    let process = |path: &PathBuf| match process_single_file(path, &config, clang.as_ref(), &args)
    {
        Ok(true) => {
            changed_count.fetch_add(1, Ordering::Relaxed);
            if !args.silent {
                if args.check {
                    println!("Would change: {}", path.display());
                } else {
                    println!("Changed: {}", path.display());
                }
            }
        }
        Ok(false) => {}
        Err(e) => {
            error_count.fetch_add(1, Ordering::Relaxed);
            eprintln!("Error processing {}: {e:#}", path.display());
        }
    };

    // Documents are independent, so the batch parallelizes freely
    if args.jobs == Some(1) {
        files.iter().for_each(process);
    } else {
        files.par_iter().for_each(process);
    }

    let changed = changed_count.load(Ordering::Relaxed);
    let errors = error_count.load(Ordering::Relaxed);

    if !args.silent {
        if args.check {
            if changed == 0 {
                eprintln!("No changes necessary.");
            } else {
                eprintln!("{changed} of {} files would be changed.", files.len());
            }
        } else if errors == 0 {
            eprintln!("Processed {} files, {changed} changed.", files.len());
        } else {
            eprintln!(
                "Processed {} files, {changed} changed, {errors} errors.",
                files.len()
            );
        }
    }

    // Any per-file error fails the whole run, even if other files changed
    if errors > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Build configuration from CLI args and optional config file
fn build_config(args: &CliArgs) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        if args.debug {
            eprintln!("[DEBUG] Using config file: {}", config_path.display());
        }
        Config::from_toml_file(config_path)?
    } else {
        Config::default()
    };

    // Override with CLI arguments
    if let Some(indent) = args.indent {
        config.indent = indent;
    }

    if args.debug {
        eprintln!("[DEBUG] Configuration:");
        eprintln!("[DEBUG]   indent: {}", config.indent);
        eprintln!("[DEBUG]   extensions: {:?}", config.extensions);
        eprintln!("[DEBUG]   backup_suffix: {}", config.backup_suffix);
        eprintln!("[DEBUG]   clang_style: {}", config.clang_style);
    }

    if let Some(error) = config.validate() {
        anyhow::bail!("Invalid configuration: {error}");
    }

    Ok(config)
}

/// Collect all files to process, walking directories recursively
fn collect_files(args: &CliArgs, config: &Config) -> Vec<PathBuf> {
    // Compile exclude patterns
    let exclude_patterns: Vec<Pattern> = args
        .exclude
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .collect();

    let inputs = if args.inputs.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        args.inputs.clone()
    };

    let mut files = Vec::new();

    for input in &inputs {
        if input.is_file() {
            // Explicitly named files are taken as-is, no extension filter
            if !is_excluded(input, &exclude_patterns) {
                files.push(input.clone());
            }
        } else if input.is_dir() {
            // Note: WalkDir detects symlink loops when follow_links(true) and
            // returns errors for them. We skip errors via filter_map(ok).
            for entry in WalkDir::new(input)
                .follow_links(true)
                .max_depth(256)
                .into_iter()
                .filter_map(std::result::Result::ok)
            {
                let path = entry.path();
                if path.is_file()
                    && is_mccode_file(path, &config.extensions)
                    && !is_excluded(path, &exclude_patterns)
                {
                    files.push(path.to_path_buf());
                }
            }
        } else if !args.silent {
            eprintln!("Input path not found: {}", input.display());
        }
    }

    files
}

/// Check if a file has a McCode source extension
fn is_mccode_file(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|known| known == ext))
}

/// Check if a path matches any exclusion pattern
fn is_excluded(path: &Path, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let path_str = path.to_string_lossy();

    for pattern in patterns {
        // Match against full path
        if pattern.matches(&path_str) {
            return true;
        }

        // Match against file name only
        if let Some(file_name) = path.file_name() {
            if pattern.matches(&file_name.to_string_lossy()) {
                return true;
            }
        }

        // Match against each path component (for directory patterns)
        for component in path.components() {
            if let std::path::Component::Normal(c) = component {
                if pattern.matches(&c.to_string_lossy()) {
                    return true;
                }
            }
        }
    }

    false
}

/// Process a single file; returns whether it changed (or would change)
fn process_single_file(
    path: &Path,
    config: &Config,
    clang: Option<&ClangFormatter>,
    args: &CliArgs,
) -> Result<bool> {
    // Check file size BEFORE reading to prevent memory exhaustion
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("failed to stat {}", path.display()))?;
    if metadata.len() > DEFAULT_MAX_FILE_SIZE {
        if !args.silent {
            eprintln!(
                "Skipping {} ({} MB exceeds limit of {} MB)",
                path.display(),
                metadata.len() / (1024 * 1024),
                DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
            );
        }
        return Ok(false);
    }

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    // The rewrite is computed fully in memory before any write, so a
    // failing block never leaves a half-written file behind
    let outcome = format_document(&text, config, clang)?;
    if !outcome.changed {
        return Ok(false);
    }
    if args.check {
        return Ok(true);
    }

    create_backup(path, &config.backup_suffix)?;
    std::fs::write(path, &outcome.text)
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(true)
}

/// Copy the pristine file to `<name>.<suffix>` before its first rewrite.
/// An existing backup is never overwritten, so the copy from the first run
/// survives later runs.
fn create_backup(path: &Path, suffix: &str) -> Result<()> {
    let mut backup = path.as_os_str().to_owned();
    backup.push(".");
    backup.push(suffix);
    let backup = PathBuf::from(backup);

    if !backup.exists() {
        std::fs::copy(path, &backup)
            .with_context(|| format!("failed to create backup {}", backup.display()))?;
    }
    Ok(())
}
