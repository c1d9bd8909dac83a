//! Icon directory normalization: every icon file name must be lowercase.

use crate::error::RegistryError;
use crate::finding::failure_class;
use crate::session::ValidationSession;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

pub const DEFAULT_ICONS_DIR: &str = "icons";

/// Rename icon files whose names are not lowercase, subject to the
/// session's edit mode. A rename that would replace another file, or the
/// target of an earlier rename in the same pass, is refused.
pub fn normalize_icon_names(
    icons_dir: &Path,
    session: &mut ValidationSession,
) -> Result<(), RegistryError> {
    if !icons_dir.is_dir() {
        let shown = icons_dir.display().to_string();
        session.error(
            failure_class::ICONS_DIR_MISSING,
            &shown,
            format!("Icons directory missing: {shown}"),
        );
        return Ok(());
    }

    let mut names = BTreeSet::new();
    for entry in fs::read_dir(icons_dir).map_err(|e| RegistryError::io(icons_dir, e))? {
        let entry = entry.map_err(|e| RegistryError::io(icons_dir, e))?;
        names.insert(entry.file_name().to_string_lossy().into_owned());
    }

    // Names occupied once the pass is done, including pending rename targets.
    let mut taken = names.clone();
    for name in &names {
        let lower = name.to_lowercase();
        if &lower == name {
            continue;
        }
        let old_path = icons_dir.join(name);
        let new_path = icons_dir.join(&lower);
        let shown = old_path.display().to_string();
        if taken.contains(&lower) {
            session.error(
                failure_class::ICON_FILE_COLLISION,
                &shown,
                format!(
                    "Icon not lower case and {} already exists: {shown}",
                    new_path.display()
                ),
            );
            continue;
        }
        session.try_fixable(
            failure_class::ICON_FILE_NOT_LOWERCASE,
            &shown,
            format!("Icon not lower case: {shown}"),
            || {
                fs::rename(&old_path, &new_path).map_err(|e| RegistryError::io(&old_path, e))?;
                tracing::info!(
                    from = %old_path.display(),
                    to = %new_path.display(),
                    "renamed icon"
                );
                Ok(())
            },
        )?;
        taken.insert(lower);
    }
    Ok(())
}
