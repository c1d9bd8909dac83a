//! The format run: schema check, canonical formatting, remote audit,
//! icon normalization, local validation, and the final write-back.

use crate::document::{RegistryDocument, write_atomic};
use crate::error::RegistryError;
use crate::finding::failure_class;
use crate::icons::normalize_icon_names;
use crate::schema::{SchemaOutcome, run_schema_validator};
use crate::session::{EditMode, ValidationSession};
use crate::source::fetch_info;
use crate::validate::{audit_remote, validate_local};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FormatOptions {
    pub repo_root: PathBuf,
    /// Registry path, relative to `repo_root` unless absolute.
    pub registry: PathBuf,
    pub icons: PathBuf,
    /// `None` skips the external schema validator.
    pub schema: Option<PathBuf>,
    /// `None` skips the info endpoint audit.
    pub info_source: Option<String>,
    pub mode: EditMode,
}

#[derive(Debug)]
pub struct FormatOutcome {
    pub session: ValidationSession,
    /// Whether the registry file was rewritten.
    pub written: bool,
    pub remote_communities: Option<usize>,
}

impl FormatOutcome {
    pub fn passed(&self) -> bool {
        !self.session.failed()
    }
}

pub fn run_format(options: &FormatOptions) -> Result<FormatOutcome, RegistryError> {
    let registry_path = options.repo_root.join(&options.registry);
    let icons_dir = options.repo_root.join(&options.icons);
    let mut session = ValidationSession::new(options.mode);
    let mut written = false;

    if let Some(schema) = options.schema.as_deref() {
        record_schema_outcome(
            &mut session,
            &options.registry,
            run_schema_validator(&options.repo_root, schema, &options.registry),
        );
    }

    let (mut document, raw) = RegistryDocument::load(&registry_path)?;
    let mut baseline = raw;
    let formatted = document.render()?;
    if baseline != formatted {
        let shown = registry_path.display().to_string();
        written |= session.try_fixable(
            failure_class::NOT_FORMATTED,
            &shown,
            "JSON not formatted as standard JSON".to_string(),
            || write_atomic(&registry_path, &formatted),
        )?;
        baseline = formatted;
    }

    let remote_communities = match options.info_source.as_deref() {
        Some(source) => {
            let info = fetch_info(source)?;
            audit_remote(&info, &mut session);
            Some(info.communities.len())
        }
        None => None,
    };

    normalize_icon_names(&icons_dir, &mut session)?;
    validate_local(&mut document, &icons_dir, &mut session)?;

    if options.mode == EditMode::Fix {
        let edited = document.render()?;
        if edited != baseline {
            tracing::info!(path = %registry_path.display(), "edited registry JSON");
            write_atomic(&registry_path, &edited)?;
            written = true;
        }
    }

    Ok(FormatOutcome {
        session,
        written,
        remote_communities,
    })
}

fn record_schema_outcome(
    session: &mut ValidationSession,
    registry: &Path,
    outcome: SchemaOutcome,
) {
    let shown = registry.display().to_string();
    match outcome {
        SchemaOutcome::Passed => {}
        SchemaOutcome::Failed { status } => session.error(
            failure_class::SCHEMA_INVALID,
            &shown,
            format!("Schema validation failed (status {status:?}): {shown}"),
        ),
        SchemaOutcome::Unavailable { reason } => session.error(
            failure_class::SCHEMA_INVALID,
            &shown,
            format!("Schema validation could not run: {reason}"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::Severity;
    use crate::png::test_support::png_bytes;
    use crate::validate::ICON_URL_PREFIX;
    use serde_json::json;
    use sha2::{Digest, Sha256};
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    struct Repo {
        root: PathBuf,
    }

    impl Repo {
        fn new(prefix: &str) -> Self {
            let unique = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock should be after unix epoch")
                .as_nanos();
            let root = std::env::temp_dir().join(format!(
                "ddcc-pipeline-{prefix}-{}-{unique}",
                std::process::id()
            ));
            fs::create_dir_all(root.join("icons")).expect("icons dir should be created");
            Self { root }
        }

        fn icon(&self, name: &str) -> String {
            let bytes = png_bytes(128, 64);
            fs::write(self.root.join("icons").join(name), &bytes).expect("icon should write");
            format!("{:x}", Sha256::digest(&bytes))
        }

        fn registry(&self, contents: &str) {
            fs::write(self.root.join("registry.json"), contents).expect("registry should write");
        }

        fn read_registry(&self) -> String {
            fs::read_to_string(self.root.join("registry.json")).expect("registry should read")
        }

        fn options(&self, mode: EditMode) -> FormatOptions {
            FormatOptions {
                repo_root: self.root.clone(),
                registry: PathBuf::from("registry.json"),
                icons: PathBuf::from("icons"),
                schema: None,
                info_source: None,
                mode,
            }
        }
    }

    impl Drop for Repo {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.root);
        }
    }

    fn canonical(id: &str, sha: &str) -> String {
        let value = json!({
            "communities": [{
                "id": id,
                "name": "Name",
                "has_finishes": false,
                "icon": { "sha256": sha, "url": format!("{ICON_URL_PREFIX}a.png") },
                "contact_urls": []
            }]
        });
        crate::document::render_canonical(&value).expect("render")
    }

    #[test]
    fn canonical_clean_registry_is_untouched() {
        let repo = Repo::new("clean");
        let sha = repo.icon("a.png");
        let contents = canonical("a", &sha);
        repo.registry(&contents);
        let outcome = run_format(&repo.options(EditMode::Fix)).expect("run should succeed");
        assert!(outcome.passed(), "{:?}", outcome.session.findings());
        assert!(!outcome.written);
        assert_eq!(repo.read_registry(), contents);
    }

    #[test]
    fn unformatted_registry_is_rewritten_in_fix_mode() {
        let repo = Repo::new("reformat");
        let sha = repo.icon("a.png");
        let contents = canonical("a", &sha);
        let compact = serde_json::to_string(
            &serde_json::from_str::<serde_json::Value>(&contents).expect("parse"),
        )
        .expect("compact");
        repo.registry(&compact);

        let outcome = run_format(&repo.options(EditMode::Fix)).expect("run should succeed");
        assert!(outcome.written);
        assert!(outcome.passed(), "{:?}", outcome.session.findings());
        assert_eq!(outcome.session.findings()[0].severity, Severity::Fixed);
        assert_eq!(
            outcome.session.findings()[0].failure_class,
            failure_class::NOT_FORMATTED
        );
        assert_eq!(repo.read_registry(), contents);
    }

    #[test]
    fn fix_mode_persists_corrections_and_check_only_does_not() {
        let repo = Repo::new("fix");
        let sha = repo.icon("a.png");
        let original = canonical("Foo", &sha);

        repo.registry(&original);
        let outcome = run_format(&repo.options(EditMode::CheckOnly)).expect("run should succeed");
        assert!(!outcome.passed());
        assert!(!outcome.written);
        assert_eq!(outcome.session.findings()[0].severity, Severity::Fixable);
        assert_eq!(repo.read_registry(), original);

        let outcome = run_format(&repo.options(EditMode::Fix)).expect("run should succeed");
        assert!(outcome.passed(), "{:?}", outcome.session.findings());
        assert!(outcome.written);
        assert_eq!(outcome.session.findings()[0].severity, Severity::Fixed);
        assert_eq!(repo.read_registry(), canonical("foo", &sha));

        let outcome = run_format(&repo.options(EditMode::Fix)).expect("rerun should succeed");
        assert!(outcome.passed(), "{:?}", outcome.session.findings());
        assert!(outcome.session.findings().is_empty());
        assert!(!outcome.written);
    }

    #[test]
    fn remote_warnings_do_not_fail_the_run() {
        let repo = Repo::new("remote");
        let sha = repo.icon("a.png");
        repo.registry(&canonical("a", &sha));
        let info_path = repo.root.join("info.json");
        fs::write(
            &info_path,
            r#"{"communities":[
                {"id":"X","name":"X","icon":{}},
                {"id":"x","name":"X","icon":{}}
            ]}"#,
        )
        .expect("info should write");

        let mut options = repo.options(EditMode::Fix);
        options.info_source = Some(info_path.display().to_string());
        let outcome = run_format(&options).expect("run should succeed");
        assert!(outcome.passed(), "{:?}", outcome.session.findings());
        assert_eq!(outcome.remote_communities, Some(2));
        assert!(
            outcome
                .session
                .findings()
                .iter()
                .all(|finding| finding.severity == Severity::Warning)
        );
        assert_eq!(outcome.session.findings().len(), 2);
    }

    #[test]
    fn missing_registry_is_fatal() {
        let repo = Repo::new("missing");
        match run_format(&repo.options(EditMode::Fix)) {
            Err(RegistryError::Io { .. }) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn schema_failure_sets_the_failure_flag() {
        let mut session = ValidationSession::new(EditMode::Fix);
        record_schema_outcome(
            &mut session,
            Path::new("registry.json"),
            SchemaOutcome::Failed { status: Some(1) },
        );
        assert!(session.failed());
        assert_eq!(
            session.findings()[0].failure_class,
            failure_class::SCHEMA_INVALID
        );
    }
}
