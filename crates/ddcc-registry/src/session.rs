//! Validation session: the explicit context threaded through every check.
//!
//! Holds the edit mode, every finding recorded so far, and the observed
//! gamemode set. A fresh session per run keeps runs independent.

use crate::error::RegistryError;
use crate::finding::{Finding, Severity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Whether fixable issues are corrected in place or only reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    Fix,
    CheckOnly,
}

impl EditMode {
    pub fn from_noedit(noedit: bool) -> Self {
        if noedit { Self::CheckOnly } else { Self::Fix }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fix => "fix",
            Self::CheckOnly => "check_only",
        }
    }
}

#[derive(Debug)]
pub struct ValidationSession {
    mode: EditMode,
    findings: Vec<Finding>,
    gamemodes: BTreeSet<String>,
}

impl ValidationSession {
    pub fn new(mode: EditMode) -> Self {
        Self {
            mode,
            findings: Vec::new(),
            gamemodes: BTreeSet::new(),
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn gamemodes(&self) -> &BTreeSet<String> {
        &self.gamemodes
    }

    /// True once an unfixable error or an unapplied fix has been recorded.
    pub fn failed(&self) -> bool {
        self.findings
            .iter()
            .any(|finding| finding.severity.fails_run())
    }

    pub fn record_gamemode(&mut self, gamemode: &str) {
        self.gamemodes.insert(gamemode.to_string());
    }

    pub fn warn(&mut self, failure_class: &str, subject: impl Into<String>, message: String) {
        self.push(Severity::Warning, failure_class, subject.into(), message);
    }

    pub fn error(&mut self, failure_class: &str, subject: impl Into<String>, message: String) {
        self.push(Severity::Error, failure_class, subject.into(), message);
    }

    /// Report a correctable issue, applying `fix` only in fix mode.
    ///
    /// Returns whether the fix was applied.
    pub fn fixable(
        &mut self,
        failure_class: &str,
        subject: impl Into<String>,
        message: String,
        fix: impl FnOnce(),
    ) -> bool {
        self.try_fixable(failure_class, subject, message, || {
            fix();
            Ok(())
        })
        .unwrap_or(false)
    }

    /// Like [`Self::fixable`], for fixes that touch the filesystem.
    pub fn try_fixable(
        &mut self,
        failure_class: &str,
        subject: impl Into<String>,
        message: String,
        fix: impl FnOnce() -> Result<(), RegistryError>,
    ) -> Result<bool, RegistryError> {
        match self.mode {
            EditMode::CheckOnly => {
                self.push(Severity::Fixable, failure_class, subject.into(), message);
                Ok(false)
            }
            EditMode::Fix => {
                fix()?;
                self.push(Severity::Fixed, failure_class, subject.into(), message);
                Ok(true)
            }
        }
    }

    fn push(
        &mut self,
        severity: Severity,
        failure_class: &str,
        subject: String,
        message: String,
    ) {
        tracing::debug!(?severity, failure_class, %subject, "finding recorded");
        self.findings.push(Finding {
            severity,
            failure_class: failure_class.to_string(),
            subject,
            message,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::failure_class;

    #[test]
    fn warnings_do_not_fail_the_session() {
        let mut session = ValidationSession::new(EditMode::Fix);
        session.warn(
            failure_class::DUPLICATE_ID,
            "kog",
            "Non unique ID in master: kog".to_string(),
        );
        assert!(!session.failed());
        session.error(
            failure_class::DUPLICATE_NAME,
            "KoG",
            "Non unique name: KoG".to_string(),
        );
        assert!(session.failed());
    }

    #[test]
    fn fix_mode_applies_and_passes() {
        let mut session = ValidationSession::new(EditMode::Fix);
        let mut id = "Foo".to_string();
        let applied = session.fixable(
            failure_class::ID_NOT_LOWERCASE,
            "Foo",
            "Non lower case ID: Foo".to_string(),
            || id = id.to_lowercase(),
        );
        assert!(applied);
        assert_eq!(id, "foo");
        assert_eq!(session.findings()[0].severity, Severity::Fixed);
        assert!(!session.failed());
    }

    #[test]
    fn check_only_mode_reports_without_applying() {
        let mut session = ValidationSession::new(EditMode::CheckOnly);
        let mut id = "Foo".to_string();
        let applied = session.fixable(
            failure_class::ID_NOT_LOWERCASE,
            "Foo",
            "Non lower case ID: Foo".to_string(),
            || id = id.to_lowercase(),
        );
        assert!(!applied);
        assert_eq!(id, "Foo");
        assert_eq!(session.findings()[0].severity, Severity::Fixable);
        assert!(session.failed());
    }

    #[test]
    fn failed_filesystem_fix_propagates_and_records_nothing() {
        let mut session = ValidationSession::new(EditMode::Fix);
        let result = session.try_fixable(
            failure_class::ICON_FILE_NOT_LOWERCASE,
            "A.png",
            "Icon file not lower case: A.png".to_string(),
            || Err(RegistryError::Shape("boom".to_string())),
        );
        assert!(result.is_err());
        assert!(session.findings().is_empty());
    }

    #[test]
    fn gamemodes_are_collected_once() {
        let mut session = ValidationSession::new(EditMode::CheckOnly);
        session.record_gamemode("Gores");
        session.record_gamemode("DDNet");
        session.record_gamemode("Gores");
        let gamemodes: Vec<&str> = session.gamemodes().iter().map(String::as_str).collect();
        assert_eq!(gamemodes, vec!["DDNet", "Gores"]);
    }
}
