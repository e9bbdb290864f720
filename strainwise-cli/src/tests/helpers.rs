//! Test helpers for driving CLI invocations against a temporary journal.

use super::*;
use tempfile::TempDir;

/// Temporary directory holding one journal database.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn database(&self) -> Utf8PathBuf {
        self.path("journal/strainwise.db")
    }

    /// Run one subcommand against the workspace journal and return stdout.
    pub(super) fn run(&self, args: &[&str]) -> Result<String, CliError> {
        let database = self.database();
        let mut invocation = vec!["strainwise"];
        invocation.extend_from_slice(args);
        invocation.extend(["--database", database.as_str()]);
        let cli = Cli::try_parse_from(invocation)?;
        let mut stdout = Vec::new();
        execute(cli.command, &mut stdout)?;
        Ok(String::from_utf8(stdout).expect("utf-8 output"))
    }

    /// Run a subcommand that must succeed and parse its JSON output.
    pub(super) fn run_json(&self, args: &[&str]) -> serde_json::Value {
        let output = self.run(args).expect("command should succeed");
        serde_json::from_str(&output).expect("output should be JSON")
    }
}

/// Look up a JSON pointer, failing the test when it is absent.
pub(super) fn field<'a>(value: &'a serde_json::Value, pointer: &str) -> &'a serde_json::Value {
    value
        .pointer(pointer)
        .unwrap_or_else(|| panic!("missing {pointer} in {value}"))
}
