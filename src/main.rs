mod app;
mod command;
mod config;
mod consts;
mod game;
mod grid;
mod menu;
mod options;
mod theme;
mod util;
mod warning;
use crate::app::{App, Globals};
use crate::config::Config;
use crate::warning::Warning;
use anyhow::Context;
use crossterm::event::{DisableFocusChange, EnableFocusChange};
use crossterm::execute;
use lexopt::{Arg, Parser};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;

const USAGE: &str = "Usage: forest-snake [--config PATH] [--log-file PATH]";

const HELP: &str = "\
Usage: forest-snake [--config PATH] [--log-file PATH]

Play Snake in your terminal.

Options:
  -c, --config PATH     Read configuration from PATH
  -l, --log-file PATH   Append log messages to PATH
  -h, --help            Display this help message and exit
  -V, --version         Show the program version and exit
";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Cli {
    Run(Arguments),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    log_file: Option<PathBuf>,
}

impl Cli {
    fn from_parser(mut parser: Parser) -> Result<Cli, UsageError> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('l') | Arg::Long("log-file") => {
                    args.log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Cli::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Cli::Version),
                _ => return Err(arg.unexpected().into()),
            }
        }
        Ok(Cli::Run(args))
    }
}

#[derive(Debug, Error)]
#[error(transparent)]
struct UsageError(#[from] lexopt::Error);

fn main() -> ExitCode {
    match Cli::from_parser(Parser::from_env()) {
        Ok(Cli::Run(args)) => match run(args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) if is_broken_pipe(&e) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("forest-snake: {e:?}");
                ExitCode::from(2)
            }
        },
        Ok(Cli::Help) => {
            print!("{HELP}");
            ExitCode::SUCCESS
        }
        Ok(Cli::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("forest-snake: {e}");
            eprintln!("{USAGE}");
            ExitCode::from(2)
        }
    }
}

fn run(args: Arguments) -> anyhow::Result<()> {
    let (config, config_err) = match Config::locate_and_load(args.config.as_deref()) {
        Ok(cfg) => (cfg, None),
        Err(e) => (Config::default(), Some(e)),
    };
    if let Some(path) = args.log_file.as_deref().or(config.log_file.as_deref()) {
        init_logging(path)?;
    }
    let warning = config_err.map(|e| {
        let warning = Warning::from_error(&e);
        log::warn!("Using default configuration: {:#}", anyhow::Error::new(e));
        warning
    });
    let globals = Globals {
        options: config.options,
        theme: config.theme,
        best: 0,
    };
    log::info!("Starting forest-snake {}", env!("CARGO_PKG_VERSION"));
    let terminal = ratatui::init();
    let r = focus_reporting(&mut io::stdout(), true)
        .and_then(|()| App::new(globals, warning).run(terminal));
    let reset = focus_reporting(&mut io::stdout(), false);
    ratatui::restore();
    r.and(reset).context("terminal I/O failed")
}

/// Turn the terminal's focus-change reports on or off.  While on, losing
/// focus arrives as `Event::FocusLost`, which pauses a running game.
fn focus_reporting<W: Write>(out: &mut W, enable: bool) -> io::Result<()> {
    if enable {
        execute!(out, EnableFocusChange)
    } else {
        execute!(out, DisableFocusChange)
    }
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to initialize logging")
}

fn is_broken_pipe(e: &anyhow::Error) -> bool {
    e.chain()
        .filter_map(|src| src.downcast_ref::<io::Error>())
        .any(|ioe| ioe.kind() == ErrorKind::BrokenPipe)
}
