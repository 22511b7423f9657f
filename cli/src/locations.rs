//! Default locations stored in `~/.showcue`
//!
//! .
//! └── log
//!    └── showcue.log

use std::path::PathBuf;

pub fn showcue() -> Option<PathBuf> {
    Some(dirs::home_dir()?.join(".showcue"))
}

pub fn log() -> Option<PathBuf> {
    Some(showcue()?.join("log"))
}

pub fn log_file() -> Option<PathBuf> {
    Some(log()?.join("showcue.log"))
}
