//! External JSON-schema validation.
//!
//! Delegates to `ajv-cli` through `npx`. Its verdict feeds the failure
//! flag; the remaining checks run either way.

use std::path::Path;
use std::process::{Command, Stdio};

pub const DEFAULT_SCHEMA_PATH: &str = "scripts/schema.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaOutcome {
    Passed,
    Failed { status: Option<i32> },
    Unavailable { reason: String },
}

/// Build the validator command for `schema` and `registry`, relative to
/// `repo_root`.
pub fn schema_command(repo_root: &Path, schema: &Path, registry: &Path) -> Command {
    let mut command = Command::new("npx");
    command
        .args(["--yes", "ajv-cli", "validate", "-s"])
        .arg(schema)
        .arg("-d")
        .arg(registry)
        .args(["--all-errors", "--changes=js", "--errors=js"])
        .current_dir(repo_root)
        .stdin(Stdio::null());
    command
}

/// Run the validator with inherited output.
pub fn run_schema_validator(repo_root: &Path, schema: &Path, registry: &Path) -> SchemaOutcome {
    run_command(schema_command(repo_root, schema, registry))
}

pub(crate) fn run_command(mut command: Command) -> SchemaOutcome {
    match command.status() {
        Ok(status) if status.success() => SchemaOutcome::Passed,
        Ok(status) => SchemaOutcome::Failed {
            status: status.code(),
        },
        Err(err) => SchemaOutcome::Unavailable {
            reason: format!("failed to execute {:?}: {err}", command.get_program()),
        },
    }
}
