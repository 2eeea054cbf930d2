mod error;
mod logging;

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::Parser;
use miette::Result;

use error::CliError;
use surplus_compile::{preprocess, Options, SourceMapMode};

#[derive(Parser, Debug)]
#[command(name = "surplus-compile")]
#[command(author, version, about = "Compiles inline markup expressions into reactive-DOM runtime calls", long_about = None)]
struct Cli {
    /// Input file to compile, or `-` to read from stdin.
    input: String,

    /// Only recognize `@`-prefixed native markup.
    #[arg(long, conflicts_with = "jsx")]
    native: bool,

    /// Only recognize `{<jsx>}` markup.
    #[arg(long, conflicts_with = "native")]
    jsx: bool,

    /// How to handle source maps: `none` (default), `extract`, or `append`.
    #[arg(long, value_name = "MODE")]
    sourcemap: Option<String>,

    /// Name recorded as the source map's `sources` entry.
    #[arg(long, value_name = "NAME")]
    sourcefile: Option<String>,

    /// Name recorded as the source map's `file` entry.
    #[arg(long, value_name = "NAME")]
    targetfile: Option<String>,

    /// Load base options from a JSON file before applying the flags above.
    #[arg(long, value_name = "PATH")]
    options_file: Option<PathBuf>,

    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted logs (stable, machine-readable).
    #[arg(long, global = true)]
    json_logs: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.json_logs);

    let options = build_options(&cli)?;
    let source = read_input(&cli.input)?;

    let output = preprocess(&source, &options).map_err(CliError::from)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(output.code.as_bytes()).map_err(|source| CliError::ReadFile {
        path: "<stdout>".to_string(),
        source,
    })?;

    if let Some(map) = &output.source_map {
        if matches!(options.source_map, SourceMapMode::Extract) {
            let json = serde_json::to_string(map).expect("SourceMap serializes");
            let map_path = format!("{}.map", options.target_file);
            fs::write(&map_path, json).map_err(|source| CliError::ReadFile { path: map_path, source })?;
        }
    }

    Ok(())
}

fn build_options(cli: &Cli) -> Result<Options, CliError> {
    let mut options = match &cli.options_file {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| CliError::ReadOptions {
                path: path.display().to_string(),
                source,
            })?;
            serde_json::from_str(&text).map_err(|source| CliError::ParseOptions {
                path: path.display().to_string(),
                source,
            })?
        }
        None => Options::default(),
    };

    if cli.native {
        options.jsx = false;
    } else if cli.jsx {
        options.jsx = true;
    }

    if let Some(mode) = &cli.sourcemap {
        options.source_map = match mode.as_str() {
            "extract" => SourceMapMode::Extract,
            "append" => SourceMapMode::Append,
            _ => SourceMapMode::None,
        };
    }
    if let Some(name) = &cli.sourcefile {
        options.source_file = name.clone();
    }
    if let Some(name) = &cli.targetfile {
        options.target_file = name.clone();
    }

    Ok(options)
}

fn read_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(|source| CliError::ReadFile {
            path: "<stdin>".to_string(),
            source,
        })?;
        Ok(buf)
    } else {
        fs::read_to_string(input).map_err(|source| CliError::ReadFile {
            path: input.to_string(),
            source,
        })
    }
}
