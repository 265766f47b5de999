use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Args;
use clap::Parser;
use clap::Subcommand;

use crate::app::structs::match_criterion::MatchCriterion;

fn valid_log_type(l: &str) -> Result<u8, String> {
    const ERROR_MSG: &str = "LOG_TYPE must be 0 (no log file), 1 (error log file) or 2 (all log files)";
    let log_type = l.parse::<u8>().map_err(|_| ERROR_MSG)?;
    match log_type <= 2 {
        true => Ok(log_type),
        false => Err(ERROR_MSG.to_owned()),
    }
}

fn valid_log_level(l: &str) -> Result<u8, String> {
    const ERROR_MSG: &str = "LOGLEVEL must be 0 (off), 1 (trace), 2 (debug), 3 (info), 4 (warn) or 5 (error)";
    let log_level = l.parse::<u8>().map_err(|_| ERROR_MSG)?;
    match log_level <= 5 {
        true => Ok(log_level),
        false => Err(ERROR_MSG.to_owned()),
    }
}

/// Accepts decimal or `0x`-prefixed hexadecimal handle values.
fn handle_value(h: &str) -> Result<isize, String> {
    let h = h.trim();
    let parsed = match h.strip_prefix("0x").or_else(|| h.strip_prefix("0X")) {
        Some(hex) => isize::from_str_radix(hex, 16),
        None => h.parse::<isize>(),
    };
    parsed.map_err(|_| format!("HWND must be a decimal or 0x-prefixed hexadecimal number, got '{h}'"))
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    #[arg(id = "LOG_TYPE", long = "log", global = true, help = "Can be 0 (no log file is created), 1 (error log file is created) or 2 (all log files are created)", value_parser = valid_log_type, default_value_t = 0)]
    log_enabled: u8,

    #[arg(long = "loglevel", global = true, help = "Can be 0 (off), 1 (trace), 2 (debug), 3 (info), 4 (warn) or 5 (error)", value_parser = valid_log_level, default_value_t = 3)]
    log_level: u8,

    #[arg(long = "config", global = true, help = "Configuration file (default: ~/.config/winctl/winctl.toml)")]
    pub config_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Hide the matching windows
    Hide(MatchArgs),
    /// Show the matching windows (Restore unless --status is given)
    Show(MatchArgs),
    /// Terminate the process given by --pid, or every process owning a window whose title matches --title
    Kill(MatchArgs),
    /// Set the text of the matching windows
    Title {
        #[arg(help = "New window text")]
        text: String,
        #[command(flatten)]
        target: MatchArgs,
    },
    /// Print the handles of the matching windows
    List {
        #[arg(long, help = "Skip the show rules and print every matching window")]
        all: bool,
        #[arg(long = "main", help = "Print only the root owner shared by most matches", conflicts_with = "all")]
        main_only: bool,
        #[command(flatten)]
        target: MatchArgs,
    },
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct MatchArgs {
    #[arg(long, allow_negative_numbers = true, help = "Process id")]
    pub pid: Option<i64>,

    #[arg(long, help = "Case-sensitive substring of the window title; empty matches every window")]
    pub title: Option<String>,

    #[arg(long, value_parser = handle_value, help = "Window handle, decimal or 0x-prefixed hexadecimal")]
    pub hwnd: Option<isize>,

    #[arg(long, allow_negative_numbers = true, help = "ShowWindow command, 0..11")]
    pub status: Option<i64>,
}

impl MatchArgs {
    /// The criterion to match with: pid first, then a non-empty title, then the handle.
    pub fn criterion(&self) -> Option<MatchCriterion> {
        if let Some(pid) = self.pid {
            return Some(MatchCriterion::ByProcessId(pid));
        }
        if let Some(title) = self.title.as_ref().filter(|t| !t.is_empty()) {
            return Some(MatchCriterion::title(title.as_str()));
        }
        self.hwnd.map(MatchCriterion::ByHandleValue)
    }
}

impl CliArgs {
    /// Exit code for a failed parse: 0 when help or version was requested, 1 for usage errors.
    pub fn parse_error_code(error: &clap::Error) -> i32 {
        match error.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
            _ => 1,
        }
    }

    pub fn is_file_all_enabled(&self) -> bool {
        self.log_enabled == 2
    }

    pub fn is_file_error_enabled(&self) -> bool {
        self.log_enabled >= 1
    }

    pub fn get_log_level(&self) -> log::LevelFilter {
        match self.log_level {
            0 => log::LevelFilter::Off,
            1 => log::LevelFilter::Trace,
            2 => log::LevelFilter::Debug,
            3 => log::LevelFilter::Info,
            4 => log::LevelFilter::Warn,
            5 => log::LevelFilter::Error,
            _ => log::LevelFilter::Info,
        }
    }
}
