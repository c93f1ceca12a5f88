//! Error helper functions for creating actionable error messages

use std::io;
use std::path::Path;

/// Check if an IO error is a permission denied error
pub fn is_permission_denied(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::PermissionDenied
}

/// Check if an IO error is a "not found" error
pub fn is_not_found(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::NotFound
}

/// Create an enhanced error message for file permission issues
pub fn permission_error(path: &Path, operation: &str) -> String {
    format!(
        "Permission denied when {} '{}'\n\n\
         Possible fixes:\n\
         1. Check file permissions: ls -l '{}'\n\
         2. Ensure write access with: chmod u+w '{}'",
        operation,
        path.display(),
        path.display(),
        path.display()
    )
}

/// Create an enhanced error message for a missing lock file
pub fn not_found_error(path: &Path) -> String {
    format!(
        "File not found: '{}'\n\n\
         Possible fixes:\n\
         1. Run mixfix from the root of the Mix project\n\
         2. Generate the lock file first: mix deps.get",
        path.display()
    )
}

/// Pick the message to attach to an IO error raised while `operation` ran on `path`
pub fn describe(err: &io::Error, path: &Path, operation: &str) -> String {
    if is_not_found(err) {
        not_found_error(path)
    } else if is_permission_denied(err) {
        permission_error(path, operation)
    } else {
        format!("Failed {} '{}'", operation, path.display())
    }
}
