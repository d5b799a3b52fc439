//! Non-fatal manifest checks.
//!
//! Hard errors (empty names, missing required fields, bad modes) are raised
//! when the catalog is built. The validators here only flag entries that
//! will load but probably do not do what the user intended.
use std::collections::BTreeMap;
use std::path::Path;

use super::Manifest;

/// Names of the items the registry always appends.
const BUILTIN_NAMES: &[&str] = &["Dotfiles", "Rogu"];

/// A validation warning detected while loading the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Manifest section (e.g. "scripts", "files").
    pub source: String,
    /// The entry that triggered the warning.
    pub item: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    /// Create a warning about `item` in manifest section `source`.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        item: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            item: item.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} '{}': {}", self.source, self.item, self.message)
    }
}

/// A check over one part of the manifest.
pub trait ConfigValidator {
    /// Validate and return any warnings found.
    fn validate(&self) -> Vec<ValidationWarning>;
}

/// Validator for script entries.
#[derive(Debug)]
pub struct ScriptValidator<'a> {
    scripts: &'a BTreeMap<String, super::ScriptEntry>,
}

impl<'a> ScriptValidator<'a> {
    /// Validate `scripts`.
    #[must_use]
    pub const fn new(scripts: &'a BTreeMap<String, super::ScriptEntry>) -> Self {
        Self { scripts }
    }
}

impl ConfigValidator for ScriptValidator<'_> {
    fn validate(&self) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        for (name, script) in self.scripts {
            if script.is_installed.trim().is_empty() {
                warnings.push(ValidationWarning::new(
                    "scripts",
                    name,
                    "no is-installed snippet; sync will refuse this item",
                ));
            }
            if script.install.trim().is_empty() {
                warnings.push(ValidationWarning::new(
                    "scripts",
                    name,
                    "no install snippet; sync can only update it",
                ));
            }
            if script.update_with_install && !script.update.trim().is_empty() {
                warnings.push(ValidationWarning::new(
                    "scripts",
                    name,
                    "update is ignored because update-with-install is set",
                ));
            }
        }

        warnings
    }
}

/// Validator for file entries.
#[derive(Debug)]
pub struct FileValidator<'a> {
    files: &'a BTreeMap<String, super::FileEntry>,
}

impl<'a> FileValidator<'a> {
    /// Validate `files`.
    #[must_use]
    pub const fn new(files: &'a BTreeMap<String, super::FileEntry>) -> Self {
        Self { files }
    }
}

impl ConfigValidator for FileValidator<'_> {
    fn validate(&self) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        for (name, file) in self.files {
            let dest = file.destination.trim();
            if !dest.is_empty()
                && dest != "~"
                && !dest.starts_with("~/")
                && !Path::new(dest).is_absolute()
            {
                warnings.push(ValidationWarning::new(
                    "files",
                    name,
                    format!("destination '{dest}' is relative to the working directory"),
                ));
            }
        }

        warnings
    }
}

/// Flags names shared between sections or with built-in items. Both items
/// still run; the warning only points out the ambiguity for filters.
#[derive(Debug)]
pub struct DuplicateNameValidator<'a> {
    manifest: &'a Manifest,
}

impl<'a> DuplicateNameValidator<'a> {
    /// Validate names across the whole manifest.
    #[must_use]
    pub const fn new(manifest: &'a Manifest) -> Self {
        Self { manifest }
    }
}

impl ConfigValidator for DuplicateNameValidator<'_> {
    fn validate(&self) -> Vec<ValidationWarning> {
        let mut seen: BTreeMap<&str, &'static str> = BTreeMap::new();
        for builtin in BUILTIN_NAMES {
            seen.insert(builtin, "built-in");
        }

        let sections: [(&'static str, Vec<&str>); 3] = [
            ("scripts", self.manifest.scripts.keys().map(String::as_str).collect()),
            ("files", self.manifest.files.keys().map(String::as_str).collect()),
            ("templates", self.manifest.templates.keys().map(String::as_str).collect()),
        ];

        let mut warnings = Vec::new();
        for (section, names) in sections {
            for name in names {
                if let Some(previous) = seen.get(name) {
                    warnings.push(ValidationWarning::new(
                        section,
                        name,
                        format!("name is also used by {previous}"),
                    ));
                } else {
                    seen.insert(name, section);
                }
            }
        }
        warnings
    }
}

/// Run every validator over `manifest`.
#[must_use]
pub fn validate_all(manifest: &Manifest) -> Vec<ValidationWarning> {
    let validators: Vec<Box<dyn ConfigValidator>> = vec![
        Box::new(ScriptValidator::new(&manifest.scripts)),
        Box::new(FileValidator::new(&manifest.files)),
        Box::new(DuplicateNameValidator::new(manifest)),
    ];

    let mut all_warnings = Vec::new();
    for validator in validators {
        all_warnings.extend(validator.validate());
    }
    all_warnings
}
