use std::io::{self, Write};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use glob::glob;
use goosecap_core::{InspectError, PacketSummary, default_registry, inspect_pcap_file};

const LOG_ENV: &str = "GOOSECAP_LOG";

#[derive(Parser, Debug)]
#[command(name = "goosecap")]
#[command(version)]
#[command(
    about = "Decode GOOSE frames from PCAP/PCAPNG captures and print a per-packet summary.",
    long_about = None,
    after_help = "Examples:\n  goosecap pcap inspect goose.pcap\n  goosecap pcap inspect capture.pcapng --json -c 10"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); GOOSECAP_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on PCAP/PCAPNG inputs.
    Pcap {
        #[command(subcommand)]
        command: PcapCommands,
    },
}

#[derive(Subcommand, Debug)]
enum PcapCommands {
    /// Decode every frame of a capture and print its layers.
    #[command(alias = "read")]
    Inspect {
        /// Path to a .pcap or .pcapng file
        input: PathBuf,

        /// Print one JSON object per packet instead of text
        #[arg(long)]
        json: bool,

        /// Stop after this many packets
        #[arg(short = 'c', long, value_parser = clap::value_parser!(u64).range(1..))]
        count: Option<u64>,

        /// Suppress the summary line on stderr
        #[arg(long)]
        quiet: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Pcap { command } => match command {
            PcapCommands::Inspect {
                input,
                json,
                count,
                quiet,
            } => cmd_pcap_inspect(input, json, count, quiet),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, default))
        .format_timestamp(None)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

fn cmd_pcap_inspect(
    input: PathBuf,
    json: bool,
    count: Option<u64>,
    quiet: bool,
) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input)?;
    log::debug!("inspecting {}", resolved_input.display());

    let registry = default_registry().context("failed to build layer registry")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut write_error = None;
    let mut printed = 0u64;

    let result = inspect_pcap_file(&registry, &resolved_input, |summary| {
        if let Err(err) = write_summary(&mut out, summary, json) {
            write_error = Some(err);
            return ControlFlow::Break(());
        }
        printed += 1;
        match count {
            Some(limit) if printed >= limit => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    });

    let stats = match result {
        Ok(stats) => stats,
        Err(InspectError::Open(err)) => {
            return Err(CliError::new(
                format!(
                    "failed to open capture {}: {}",
                    resolved_input.display(),
                    err
                ),
                Some("check that the file is a readable .pcap or .pcapng capture".to_string()),
            ));
        }
        Err(InspectError::Source(err)) => {
            return Err(CliError::new(
                format!("capture read failed after {} packets: {}", printed, err),
                Some("the capture may be truncated or corrupt".to_string()),
            ));
        }
    };

    if let Some(err) = write_error {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(anyhow::Error::new(err)
            .context("failed to write packet output")
            .into());
    }
    out.flush().context("failed to flush output")?;

    if !quiet {
        eprintln!(
            "OK: {} packets ({} GOOSE, {} decode failures)",
            stats.packets_total, stats.goose_packets, stats.decode_failures
        );
    }
    Ok(())
}

fn write_summary(out: &mut impl Write, summary: &PacketSummary, json: bool) -> io::Result<()> {
    if json {
        let line = summary.to_json().map_err(io::Error::other)?;
        writeln!(out, "{line}")
    } else {
        for line in summary.render_lines() {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("use a .pcap or .pcapng file".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("use a .pcap or .pcapng file".to_string()),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "pcap" && ext != "pcapng" {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected a .pcap or .pcapng file".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    let mut matches = Vec::new();
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    match matches.len() {
        0 => Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern; expected .pcap or .pcapng".to_string()),
        )),
        1 => Ok(matches.remove(0)),
        n => {
            let listed = matches
                .iter()
                .take(3)
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            let more = if n > 3 { ", ..." } else { "" };
            Err(CliError::new(
                format!(
                    "multiple files match pattern '{}' ({} matches); matches: {}{}",
                    pattern, n, listed, more
                ),
                Some("pass a single capture file, or run once per file".to_string()),
            ))
        }
    }
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
