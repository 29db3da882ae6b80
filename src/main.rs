//! CLI entry point for jdu

use std::error::Error as _;
use std::ffi::OsString;
use std::io::{self, IsTerminal};
use std::num::IntErrorKind;
use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use jdu::tree::{DEFAULT_LIMIT, DEFAULT_MAX_DEPTH, MAX_DEPTH_BOUND};
use jdu::{
    JduError, JsonCollector, LoggingConfig, OutputConfig, SortOrder, StreamingFormatter,
    TreeWalker, WalkerConfig, init_logging, print_json, resolve_root,
};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Order of the children kept for each directory
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum SortArg {
    /// Largest first
    #[default]
    Size,
    /// By file name
    Name,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Size => SortOrder::Size,
            SortArg::Name => SortOrder::Name,
        }
    }
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // https://no-color.org/
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "jdu")]
#[command(about = "Disk usage as a tree: du meets tree")]
#[command(version)]
struct Args {
    /// File, directory or symlink to report on
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Recursion depth, also accepted as -depth
    #[arg(
        long = "depth",
        value_name = "N",
        allow_hyphen_values = true,
        default_value_t = DEFAULT_MAX_DEPTH,
        value_parser = parse_depth
    )]
    depth: usize,

    /// Children shown per directory, also accepted as -limit
    #[arg(
        long = "limit",
        value_name = "N",
        allow_hyphen_values = true,
        default_value_t = DEFAULT_LIMIT,
        value_parser = parse_limit
    )]
    limit: usize,

    /// Follow symlinks
    #[arg(short = 'L', long = "follow-symlinks")]
    follow_symlinks: bool,

    /// Order of the children kept for each directory
    #[arg(long = "sort", value_name = "ORDER", default_value = "size")]
    sort: SortArg,

    /// Output in JSON format
    #[arg(long = "json")]
    json: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,
}

impl Args {
    fn walker_config(&self) -> WalkerConfig {
        WalkerConfig {
            max_depth: self.depth,
            limit: self.limit,
            follow_symlinks: self.follow_symlinks,
            order: self.sort.into(),
        }
    }
}

fn parse_depth(value: &str) -> Result<usize, String> {
    parse_count("depth", value, Some(MAX_DEPTH_BOUND))
}

fn parse_limit(value: &str) -> Result<usize, String> {
    parse_count("limit", value, None)
}

/// Parse a non-negative option value, optionally below an exclusive `bound`.
///
/// Values too large for `usize` saturate, so they fail the bound rather than the
/// number check.
fn parse_count(option: &str, value: &str, bound: Option<usize>) -> Result<usize, String> {
    let trimmed = value.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, trimmed),
    };
    let count = match digits.parse::<usize>() {
        Ok(count) => count,
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => usize::MAX,
        Err(_) => return Err(format!("\"{}\" is not a number in option: {}", value, option)),
    };
    if negative && count > 0 {
        return Err(format!("\"{}\" is not a positive number in option: {}", value, option));
    }
    match bound {
        Some(bound) if count >= bound => Err(format!(
            "\"{}\" must be less than {} in option: {}",
            value, bound, option
        )),
        _ => Ok(count),
    }
}

/// Rewrite the single-dash long options `-depth` and `-limit` to their `--` form.
fn normalize_argv(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    let mut out = Vec::new();
    let mut options_done = false;
    for arg in args {
        if !options_done {
            if arg == "--" {
                options_done = true;
            } else if arg == "-depth" || arg == "-limit" {
                let mut long = OsString::from("-");
                long.push(&arg);
                out.push(long);
                continue;
            }
        }
        out.push(arg);
    }
    out
}

fn parse_args(argv: Vec<OsString>) -> Result<Args, JduError> {
    Args::try_parse_from(argv).map_err(|err| match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => err.exit(),
        // Keep the value parser's own message for bad counts.
        ErrorKind::ValueValidation if err.source().is_some() => {
            JduError::invalid_arguments(err.source().map(ToString::to_string).unwrap_or_default())
        }
        _ => {
            let rendered = err.to_string();
            let first = rendered.lines().next().unwrap_or_default();
            JduError::invalid_arguments(first.strip_prefix("error: ").unwrap_or(first))
        }
    })
}

fn run() -> Result<(), JduError> {
    let args = parse_args(normalize_argv(std::env::args_os()))?;
    let use_color = should_use_color(args.color);

    init_logging(&LoggingConfig {
        color: use_color && io::stderr().is_terminal(),
        ..Default::default()
    })?;

    let config = args.walker_config();
    let root = resolve_root(&args.path)?;
    let mut walker = TreeWalker::new(config);

    if args.json {
        let mut collector = JsonCollector::new();
        walker.walk(&root, &mut collector)?;
        if let Some(tree) = collector.into_tree() {
            print_json(io::stdout().lock(), &tree)?;
        }
    } else {
        let mut formatter = StreamingFormatter::stdout(OutputConfig { use_color });
        walker.walk(&root, &mut formatter)?;
    }
    Ok(())
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(JduError::Output(e)) if e.kind() == io::ErrorKind::BrokenPipe => {}
        Err(e) => {
            eprintln!("jdu: {}", e);
            process::exit(1);
        }
    }
}
