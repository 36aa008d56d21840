use clap::{ArgGroup, Parser};
use std::path::PathBuf;

/// Bang File Copier
///
/// Scan a folder for files starting with '!' and copy them, renamed, to your destinations
#[derive(Parser, Debug)]
#[command(name = "bang")]
#[command(about, long_about = None, version)]
#[command(after_help = "\
Examples:
  bang <folder>                    # scan given folder
  bang --dry-run                   # show what would happen
  bang --list-dests                # show configured destinations
  bang --add-dest /path/to/dir     # add a new destination
  bang --remove-dest /path/to/dir  # remove a destination
  bang --clear-dests               # remove all destinations")]
#[command(group(
    ArgGroup::new("manage")
        .args(["list_dests", "add_dest", "remove_dest", "clear_dests"])
        .multiple(false)
))]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Source directory to scan
    #[arg(default_value = ".", value_name = "SOURCE")]
    pub source: PathBuf,

    /// Path to JSON config file (default: ~/.config/bang-copier/config.json)
    #[arg(long, value_name = "PATH", env = "BANG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Simulate operations without copying or writing logs
    #[arg(long)]
    pub dry_run: bool,

    /// Disable colored output
    #[arg(long)]
    pub plain: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Show configured destinations and exit
    #[arg(long)]
    pub list_dests: bool,

    /// Add a new destination directory to the config and exit
    #[arg(long, value_name = "PATH")]
    pub add_dest: Option<PathBuf>,

    /// Remove a destination directory from the config and exit
    #[arg(long, value_name = "PATH")]
    pub remove_dest: Option<PathBuf>,

    /// Remove all destinations from the config and exit
    #[arg(long)]
    pub clear_dests: bool,
}

/// Destination management requested on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestAction {
    /// Print configured destinations
    List,
    /// Add one destination
    Add(PathBuf),
    /// Remove one destination
    Remove(PathBuf),
    /// Remove all destinations
    Clear,
}

impl Cli {
    /// The destination management flag in use, if any
    pub fn dest_action(&self) -> Option<DestAction> {
        if self.list_dests {
            Some(DestAction::List)
        } else if let Some(path) = &self.add_dest {
            Some(DestAction::Add(path.clone()))
        } else if let Some(path) = &self.remove_dest {
            Some(DestAction::Remove(path.clone()))
        } else if self.clear_dests {
            Some(DestAction::Clear)
        } else {
            None
        }
    }
}
