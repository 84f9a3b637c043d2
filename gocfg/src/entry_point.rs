//! Command-line entry point: argument parsing, file collection and
//! rendering of the selected output format.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use ignore::WalkBuilder;
use rayon::prelude::*;

use crate::cfg::{self, render, Graph};
use crate::frontend;

/// Command line interface configuration using `clap`.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "gocfg - control-flow graphs for Go functions",
    long_about = None
)]
pub struct Cli {
    /// Go files or directories to process (directories are walked,
    /// honoring .gitignore).
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Only build the graph of this function.
    #[arg(short, long, value_name = "NAME")]
    pub function: Option<String>,

    /// Emit one Graphviz DOT document instead of the text dump.
    #[arg(long)]
    pub dot: bool,

    /// Emit a JSON array instead of the text dump.
    #[arg(long, conflicts_with = "dot")]
    pub json: bool,

    /// Write output to this file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Graphs built from one input file, with per-function failures kept
/// separate so one bad function never hides its siblings.
struct FileReport {
    path: PathBuf,
    graphs: Vec<Graph>,
    errors: Vec<String>,
}

/// Runs the builder with the given arguments using stdout as the writer.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Run gocfg with the given arguments, writing output to the specified
/// writer. This is the testable version of [`run_with_args`].
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn run_with_args_to<W: std::io::Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["gocfg".to_owned()];
    program_args.extend(args);
    let cli = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                write!(writer, "{e}")?;
                writer.flush()?;
                return Ok(0);
            }
            _ => {
                eprint!("{e}");
                return Ok(1);
            }
        },
    };

    let files = collect_go_files(&cli.paths);
    if files.is_empty() {
        eprintln!("{}", "No Go files found in the given paths".yellow());
        return Ok(1);
    }

    let reports: Vec<FileReport> = files
        .par_iter()
        .map(|path| process_file(path, cli.function.as_deref()))
        .collect();

    let mut failed = false;
    for report in &reports {
        for error in &report.errors {
            failed = true;
            eprintln!(
                "{} {}: {error}",
                "error:".red().bold(),
                report.path.display()
            );
        }
    }

    let graphs: Vec<Graph> = reports.into_iter().flat_map(|r| r.graphs).collect();
    if let Some(name) = &cli.function {
        if graphs.is_empty() {
            eprintln!("{} function '{name}' not found", "error:".red().bold());
            return Ok(1);
        }
    }

    let rendered = if cli.dot {
        render::dot_document(&graphs)
    } else if cli.json {
        let mut json = Vec::with_capacity(graphs.len());
        for graph in &graphs {
            json.push(render::to_json(graph)?);
        }
        format!("[{}]", json.join(",\n"))
    } else {
        graphs
            .iter()
            .map(render::to_text)
            .collect::<Vec<_>>()
            .join("\n")
    };

    match &cli.output {
        Some(path) => {
            let mut file = fs::File::create(path)?;
            writeln!(file, "{rendered}")?;
        }
        None => {
            writeln!(writer, "{rendered}")?;
            writer.flush()?;
        }
    }

    Ok(i32::from(failed))
}

/// Builds every function graph of one file, or just the named one.
fn process_file(path: &Path, function: Option<&str>) -> FileReport {
    let mut report = FileReport {
        path: path.to_path_buf(),
        graphs: Vec::new(),
        errors: Vec::new(),
    };

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            report.errors.push(e.to_string());
            return report;
        }
    };
    let functions = match frontend::parse_functions(&source) {
        Ok(functions) => functions,
        Err(e) => {
            report.errors.push(e.to_string());
            return report;
        }
    };

    for func in functions {
        if function.is_some_and(|name| name != func.name) {
            continue;
        }
        match cfg::build(&source, &func) {
            Ok(graph) => report.graphs.push(graph),
            Err(e) => report.errors.push(format!("function '{}': {e}", func.name)),
        }
    }
    report
}

/// Collects all `.go` files under the given paths. Directories are
/// walked honoring .gitignore; explicit file paths are taken as-is.
fn collect_go_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        for entry in WalkBuilder::new(path).build().flatten() {
            let entry_path = entry.path();
            if entry_path.is_file() && entry_path.extension().is_some_and(|ext| ext == "go") {
                files.push(entry_path.to_path_buf());
            }
        }
    }
    files.sort();
    files.dedup();
    files
}
