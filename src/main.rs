//! CLI Bridge - run external CLIs and print their output as structured JSON.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli_bridge::ansi;
use cli_bridge::classify::classify_stderr;
use cli_bridge::commands::{RunCommand, RunOutcome};
use cli_bridge::config::{BridgeConfig, ConfigLoader};
use cli_bridge::display;
use cli_bridge::output::{detect, parse, parse_as, OutputFormat};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Table,
    Csv,
    Markdown,
    Text,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Markdown => OutputFormat::Markdown,
            FormatArg::Text => OutputFormat::Text,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "cli-bridge",
    about = "Run external CLIs and turn their output into structured data",
    version
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (defaults to .cli-bridge.toml, then the user config dir).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a program and print its parsed output as JSON.
    Run {
        /// Program to run. Defaults to the configured program, then the
        /// first argument.
        #[arg(short, long)]
        program: Option<String>,
        /// Timeout in milliseconds.
        #[arg(short, long)]
        timeout: Option<u64>,
        /// Print the raw execution result instead of parsing stdout.
        #[arg(long)]
        raw: bool,
        /// Parse as this format instead of detecting it.
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,
        /// Arguments passed to the program.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Parse text from a file or stdin.
    Parse {
        /// Input file; reads stdin when omitted.
        file: Option<PathBuf>,
        /// Parse as this format instead of detecting it.
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,
    },
    /// Print the detected format of text from a file or stdin.
    Detect {
        /// Input file; reads stdin when omitted.
        file: Option<PathBuf>,
    },
    /// Classify stderr text from a file or stdin.
    Classify {
        /// Exit code of the failed run.
        #[arg(short, long, default_value_t = 1, allow_hyphen_values = true)]
        exit_code: i32,
        /// Input file; reads stdin when omitted.
        file: Option<PathBuf>,
    },
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(path: Option<PathBuf>) -> Option<BridgeConfig> {
    let loader = path.map_or_else(ConfigLoader::new, ConfigLoader::with_path);
    match loader.load() {
        Ok(config) => Some(config),
        Err(e) => {
            display::print_error(&e.to_string());
            None
        }
    }
}

fn read_input(file: Option<PathBuf>) -> std::io::Result<String> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(ansi::strip(&text).into_owned())
}

fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            display::print_error(&format!("Failed to serialize output: {e}"));
            ExitCode::FAILURE
        }
    }
}

/// Map a child exit code onto ours, never reporting success for a failure.
fn failure_code(exit_code: i32) -> ExitCode {
    let code = u8::try_from(exit_code).ok().filter(|c| *c != 0).unwrap_or(1);
    ExitCode::from(code)
}

async fn run(command: RunCommand, config: &BridgeConfig) -> ExitCode {
    if let Ok(request) = command.request(config) {
        display::print_exec_start(request.program(), &request.build_args());
    }

    match command.execute(config).await {
        Ok(RunOutcome::Parsed { result, output }) => {
            display::print_exec_done(&result);
            if let Some(reason) = &output.parse_error {
                display::print_parse_fallback(reason);
            }
            print_json(&output)
        }
        Ok(RunOutcome::Raw(result)) => {
            display::print_exec_done(&result);
            print_json(&result)
        }
        Ok(RunOutcome::Failed { result, error }) => {
            display::print_exec_done(&result);
            display::print_classified_error(&error);
            let _ = print_json(&error);
            failure_code(result.exit_code)
        }
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            display::print_error(&e.to_string());
            ExitCode::from(e.exit_code())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            program,
            timeout,
            raw,
            format,
            args,
        } => {
            let Some(config) = load_config(cli.config) else {
                return ExitCode::FAILURE;
            };
            let mut command = RunCommand::new(args);
            if let Some(program) = program {
                command = command.program(program);
            }
            if let Some(millis) = timeout {
                command = command.timeout_ms(millis);
            }
            if raw {
                command = command.raw(true);
            }
            if let Some(format) = format {
                command = command.format(format.into());
            }
            run(command, &config).await
        }
        Commands::Parse { file, format } => match read_input(file) {
            Ok(text) => {
                let output = match format {
                    Some(format) => parse_as(&text, format.into()),
                    None => parse(&text),
                };
                print_json(&output)
            }
            Err(e) => {
                display::print_error(&format!("Failed to read input: {e}"));
                ExitCode::FAILURE
            }
        },
        Commands::Detect { file } => match read_input(file) {
            Ok(text) => {
                println!("{}", detect(&text));
                ExitCode::SUCCESS
            }
            Err(e) => {
                display::print_error(&format!("Failed to read input: {e}"));
                ExitCode::FAILURE
            }
        },
        Commands::Classify { exit_code, file } => match read_input(file) {
            Ok(text) => print_json(&classify_stderr(&text, exit_code)),
            Err(e) => {
                display::print_error(&format!("Failed to read input: {e}"));
                ExitCode::FAILURE
            }
        },
    }
}
