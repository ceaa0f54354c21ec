//! Command-line surface: command dispatch, option flags and the two
//! positional magnitudes.

use thiserror::Error;

use crate::fill::Pattern;
use crate::units::{self, UnitError};

const COMMANDS: [&str; 4] = ["zero", "random", "help", "version"];
const OPTIONS: [&str; 2] = ["dense", "quiet"];

/// Normalized invocation, built once and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub pattern: Pattern,
    /// Write every word instead of one word per page.
    pub dense: bool,
    /// Suppress progress notices.
    pub quiet: bool,
    /// Bytes to acquire; 0 means grow until the allocator refuses.
    pub space_bytes: usize,
    /// Seconds to hold the allocation; 0 means hold until interrupted.
    pub hold_seconds: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Run(Config),
    Help,
    Version,
}

#[derive(Debug, Error)]
pub enum UsageError {
    #[error("invalid invocation, no command given")]
    MissingCommand,
    #[error("unknown command: '{0}'")]
    UnknownCommand(String),
    #[error("unknown option: '{0}'")]
    UnknownOption(String),
    #[error(transparent)]
    Unit(#[from] UnitError),
}

impl UsageError {
    /// Invocation-shape errors get the "try help" hint; magnitude errors
    /// already say what was wrong with the value.
    pub fn wants_hint(&self) -> bool {
        !matches!(self, UsageError::Unit(_))
    }
}

/// Parse everything after the program name.
///
/// `help` and `version` win as soon as they are recognized and consume no
/// further arguments. Options must precede the positionals; extra trailing
/// positionals are warned about and dropped.
pub fn parse(args: &[String]) -> Result<Action, UsageError> {
    let Some(command) = args.first() else {
        return Err(UsageError::MissingCommand);
    };

    let pattern = match prefix_match(command, &COMMANDS) {
        Some("zero") => Pattern::Zero,
        Some("random") => Pattern::Random,
        Some("help") => return Ok(Action::Help),
        Some("version") => return Ok(Action::Version),
        _ => return Err(UsageError::UnknownCommand(command.clone())),
    };

    let mut dense = false;
    let mut quiet = false;
    let mut idx = 1;
    while let Some(arg) = args.get(idx) {
        if !arg.starts_with('-') {
            break;
        }
        match prefix_match(arg, &OPTIONS) {
            Some("dense") => dense = true,
            Some("quiet") => quiet = true,
            _ => {
                return Err(UsageError::UnknownOption(
                    arg.trim_start_matches('-').to_string(),
                ));
            }
        }
        idx += 1;
    }

    let space_bytes = match args.get(idx) {
        Some(text) => {
            idx += 1;
            units::parse_space(text)?
        }
        None => 0,
    };
    let hold_seconds = match args.get(idx) {
        Some(text) => {
            idx += 1;
            units::parse_time(text)?
        }
        None => 0,
    };
    if args.len() > idx {
        eprintln!("ignoring trailing arguments");
    }

    Ok(Action::Run(Config {
        pattern,
        dense,
        quiet,
        space_bytes,
        hold_seconds,
    }))
}

/// Match a token against a name table after stripping leading dashes. Any
/// prefix that selects exactly one name wins; an empty stripped token
/// selects nothing (a bare prefix check would match every name).
fn prefix_match<'a>(token: &str, names: &[&'a str]) -> Option<&'a str> {
    let stripped = token.trim_start_matches('-');
    if stripped.is_empty() {
        return None;
    }
    let mut hits = names.iter().filter(|name| name.starts_with(stripped));
    match (hits.next(), hits.next()) {
        (Some(name), None) => Some(name),
        _ => None,
    }
}

/// Help text, printed on stdout by the `help` command.
pub fn usage(prog: &str) -> String {
    format!(
        "\
Usage: {prog} command [options] [space[k|K|m|M|g|G]] [time[m|h|d|w]]

Commands:
    zero            fill memory with zeros
    random          fill memory with pseudo-random words
    help            print this help
    version         print version

Options:
    -d, --dense     write every word instead of one word per page
    -q, --quiet     suppress progress notices

Commands and options may be shortened to any unambiguous prefix.
Omitting space takes all the memory the host will give; omitting
time holds the allocation until the process is interrupted.
"
    )
}
