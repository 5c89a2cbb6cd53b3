//! Removal of the installed binary.

use std::fs;
use std::path::Path;

use log::debug;

use super::{UpdateError, UpdateResult};

/// Whether a prompt answer confirms the uninstall. Only `y` and `yes`
/// (any case) count; everything else, including an empty line, cancels.
pub fn is_confirmation(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    answer == "y" || answer == "yes"
}

/// Delete the executable at `path`.
pub fn remove_executable(path: &Path) -> UpdateResult<()> {
    debug!("removing {}", path.display());
    fs::remove_file(path).map_err(UpdateError::io("failed to remove executable"))
}
