// svn.rs — Subversion client shelling out to the `svn` binary.
//
// The commit message travels through a temp file with an explicit
// `--encoding`, and LC_ALL is set on the child process only — the tool
// must not reinterpret multi-byte text based on ambient locale, and we
// must not mutate our own process environment to prevent that.

use std::io::Write;
use std::path::Path;
use std::process::Command;

use land_reconcile::WorkingCopyStatus;

use crate::error::VcsError;
use crate::status::parse_status;
use crate::{Result, Vcs};

/// Shell-out client for Subversion working copies.
pub struct SvnClient {
    binary: String,
    /// Locale exported to the child process for encoding-safe output.
    locale: String,
}

impl SvnClient {
    pub fn new() -> Self {
        Self {
            binary: "svn".to_string(),
            locale: "en_US.UTF-8".to_string(),
        }
    }

    /// Use a different svn binary (name or path).
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Override the locale exported to svn invocations.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Run an svn command in the working copy, capturing stdout.
    fn svn_cmd(&self, root: &Path, args: &[&str]) -> Result<String> {
        tracing::debug!(binary = %self.binary, ?args, "running svn");
        let output = Command::new(&self.binary)
            .args(args)
            .current_dir(root)
            .env("LC_ALL", &self.locale)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(VcsError::CommandFailed {
                command: format!("{} {}", self.binary, args.join(" ")),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl Default for SvnClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Vcs for SvnClient {
    fn ensure_working_copy(&self, root: &Path) -> Result<()> {
        if root.join(".svn").is_dir() {
            return Ok(());
        }
        // Point at the actual backend when we can tell what it is.
        let hint = if root.join(".git").exists() {
            "; this looks like a git checkout, which land does not operate on".to_string()
        } else {
            String::new()
        };
        Err(VcsError::UnsupportedWorkingCopy {
            root: root.to_path_buf(),
            hint,
        })
    }

    fn status(&self, root: &Path) -> Result<WorkingCopyStatus> {
        let output = self.svn_cmd(root, &["status"])?;
        parse_status(&output)
    }

    fn commit(&self, root: &Path, paths: &[String], message: &str) -> Result<()> {
        // Message and path list both travel through files: the message so
        // svn takes our --encoding at face value, the targets so no path
        // is ever parsed as an option.
        let mut message_file = tempfile::NamedTempFile::new()?;
        message_file.write_all(message.as_bytes())?;
        message_file.flush()?;

        let mut targets_file = tempfile::NamedTempFile::new()?;
        for path in paths {
            writeln!(targets_file, "{}", path)?;
        }
        targets_file.flush()?;

        let message_path = message_file.path().to_string_lossy().to_string();
        let targets_path = targets_file.path().to_string_lossy().to_string();
        let args = [
            "commit",
            "--encoding",
            "utf-8",
            "--file",
            message_path.as_str(),
            "--targets",
            targets_path.as_str(),
        ];

        let stdout = self.svn_cmd(root, &args)?;
        tracing::info!(paths = paths.len(), "svn commit succeeded");
        tracing::debug!(%stdout, "svn commit output");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_working_copy_probe_accepts_svn_checkout() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".svn")).unwrap();

        let client = SvnClient::new();
        assert!(client.ensure_working_copy(dir.path()).is_ok());
    }

    #[test]
    fn test_working_copy_probe_rejects_plain_directory() {
        let dir = TempDir::new().unwrap();

        let client = SvnClient::new();
        let err = client.ensure_working_copy(dir.path()).unwrap_err();
        assert!(matches!(err, VcsError::UnsupportedWorkingCopy { .. }));
    }

    #[test]
    fn test_working_copy_probe_names_git_checkouts() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let client = SvnClient::new();
        let err = client.ensure_working_copy(dir.path()).unwrap_err();
        assert!(err.to_string().contains("git checkout"));
    }

    #[test]
    fn test_missing_binary_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let client = SvnClient::new().with_binary("svn-binary-that-does-not-exist");
        let err = client.svn_cmd(dir.path(), &["status"]).unwrap_err();
        assert!(matches!(err, VcsError::Io(_)));
    }
}
