//! License matching on file evidence from the definition manifest.

use std::sync::Arc;

use crate::license_file::DefaultLicenseFileClassifier;
use crate::model::{FileRecord, MatchVerdict, RevisionBundle};
use crate::traits::{LicenseFileClassifier, MatchPolicy};

/// A file property compared between license files.
///
/// Declaration order is comparison order: cryptographic hashes are
/// preferred over the fuzzy token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileProperty {
    Sha1,
    Sha256,
    Token,
}

impl FileProperty {
    pub const ORDERED: [FileProperty; 3] = [Self::Sha1, Self::Sha256, Self::Token];

    pub fn path(&self) -> &'static str {
        match self {
            Self::Sha1 => "hashes.sha1",
            Self::Sha256 => "hashes.sha256",
            Self::Token => "token",
        }
    }

    /// Present, non-empty value of this property on `file`.
    pub fn value<'a>(&self, file: &'a FileRecord) -> Option<&'a str> {
        let value = match self {
            Self::Sha1 => file.hashes.get("sha1"),
            Self::Sha256 => file.hashes.get("sha256"),
            Self::Token => file.token.as_ref(),
        };
        value.map(String::as_str).filter(|v| !v.is_empty())
    }
}

/// Matches when any target license file shares a hash or token with any
/// source license file.
#[derive(Clone)]
pub struct DefinitionPolicy {
    classifier: Arc<dyn LicenseFileClassifier>,
}

impl std::fmt::Debug for DefinitionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefinitionPolicy").finish_non_exhaustive()
    }
}

impl Default for DefinitionPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl DefinitionPolicy {
    pub const NAME: &'static str = "definition";

    pub fn new() -> Self {
        Self {
            classifier: Arc::new(DefaultLicenseFileClassifier::new()),
        }
    }

    /// Replaces the classifier deciding which manifest entries are license files.
    pub fn with_classifier<C>(mut self, classifier: C) -> Self
    where
        C: LicenseFileClassifier + 'static,
    {
        self.classifier = Arc::new(classifier);
        self
    }

    fn license_files<'a>(&self, bundle: &'a RevisionBundle) -> Vec<&'a FileRecord> {
        let coordinates = bundle.coordinates();
        bundle
            .definition
            .files
            .iter()
            .filter(|file| self.classifier.is_license_file(&file.path, coordinates))
            .collect()
    }
}

impl MatchPolicy for DefinitionPolicy {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn is_matching(&self, source: &RevisionBundle, target: &RevisionBundle) -> MatchVerdict {
        let source_license_files = self.license_files(source);
        let target_license_files = self.license_files(target);

        for file in &target_license_files {
            for property in FileProperty::ORDERED {
                let Some(value) = property.value(file) else {
                    continue;
                };
                let shared = source_license_files
                    .iter()
                    .any(|candidate| property.value(candidate) == Some(value));
                if shared {
                    let reason = format!(
                        "{} and {} share the same {} in {}: {}",
                        source.revision(),
                        target.revision(),
                        property.path(),
                        file.path,
                        value
                    );
                    return MatchVerdict::matched(Self::NAME, reason);
                }
            }
        }

        MatchVerdict::no_match()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Coordinates, DefinitionRecord, HarvestRecord};

    fn file(path: &str, sha1: Option<&str>, sha256: Option<&str>, token: Option<&str>) -> FileRecord {
        let mut record = FileRecord {
            path: path.to_string(),
            ..Default::default()
        };
        if let Some(sha1) = sha1 {
            record.hashes.insert("sha1".to_string(), sha1.to_string());
        }
        if let Some(sha256) = sha256 {
            record.hashes.insert("sha256".to_string(), sha256.to_string());
        }
        record.token = token.map(str::to_string);
        record
    }

    fn bundle(coordinates: &str, files: Vec<FileRecord>) -> RevisionBundle {
        let coordinates: Coordinates = coordinates.parse().unwrap();
        let mut definition = DefinitionRecord::new(coordinates);
        definition.files = files;
        RevisionBundle::new(definition, HarvestRecord::new())
    }

    #[test]
    fn test_match_on_sha1() {
        let sha1 = "dbf8c7e394791d3de9a9fff305d8ee7b59196f26";
        let source = bundle(
            "npm/npmjs/-/foo/2.0.0",
            vec![file("package/LICENSE", Some(sha1), None, None)],
        );
        let target = bundle(
            "npm/npmjs/-/foo/1.0.0",
            vec![file("package/LICENSE", Some(sha1), None, None)],
        );

        let verdict = DefinitionPolicy::new().is_matching(&source, &target);
        assert!(verdict.is_matching);
        assert_eq!(verdict.policy.as_deref(), Some("definition"));
        assert_eq!(
            verdict.reason.as_deref(),
            Some(
                "2.0.0 and 1.0.0 share the same hashes.sha1 in package/LICENSE: \
                 dbf8c7e394791d3de9a9fff305d8ee7b59196f26"
            )
        );
    }

    #[test]
    fn test_match_on_sha256() {
        let sha256 = "d9fccda7d1daaec4c1a84d46b48d808e56ee8979c1b62ccc1492b7c27ab7010d";
        let source = bundle(
            "pypi/pypi/-/foo/1.0.0",
            vec![file("foo-1.0.0/LICENSE", None, Some(sha256), None)],
        );
        let target = bundle(
            "pypi/pypi/-/foo/1.0.0",
            vec![file("foo-1.0.0/LICENSE", None, Some(sha256), None)],
        );

        let verdict = DefinitionPolicy::new().is_matching(&source, &target);
        assert!(verdict.is_matching);
        assert!(verdict.reason.unwrap().contains("hashes.sha256"));
    }

    #[test]
    fn test_match_on_token_across_paths() {
        let token = "d9fccda7d1daaec4c1a84d46b48d808e56ee8979c1b62ccc1492b7c27ab7010d";
        let source = bundle(
            "maven/mavencentral/org.example/lib/2.0.0",
            vec![file("meta-inf/LICENSE", Some("aaa"), None, Some(token))],
        );
        let target = bundle(
            "maven/mavencentral/org.example/lib/1.0.0",
            vec![file("LICENSE.txt", Some("bbb"), None, Some(token))],
        );

        let verdict = DefinitionPolicy::new().is_matching(&source, &target);
        assert!(verdict.is_matching);
        let reason = verdict.reason.unwrap();
        assert!(reason.contains("token in LICENSE.txt"));
    }

    #[test]
    fn test_no_match_on_different_sha1() {
        let source = bundle(
            "crate/cratesio/-/foo/1.0.0",
            vec![file("license.md", Some("abc"), None, None)],
        );
        let target = bundle(
            "crate/cratesio/-/foo/0.9.0",
            vec![file("license.md", Some("abc-diff"), None, None)],
        );

        assert_eq!(
            DefinitionPolicy::new().is_matching(&source, &target),
            MatchVerdict::no_match()
        );
    }

    #[test]
    fn test_no_match_without_license_files() {
        let token = "d9fccda7d1daaec4c1a84d46b48d808e56ee8979c1b62ccc1492b7c27ab7010d";
        let source = bundle(
            "npm/npmjs/-/foo/2.0.0",
            vec![file("NOT-A-License-File", None, None, Some(token))],
        );
        let target = bundle(
            "npm/npmjs/-/foo/1.0.0",
            vec![file("NOT-A-License-File", None, None, Some(token))],
        );

        assert!(!DefinitionPolicy::new().is_matching(&source, &target).is_matching);
    }

    #[test]
    fn test_empty_values_never_match() {
        let source = bundle(
            "npm/npmjs/-/foo/2.0.0",
            vec![file("LICENSE", Some(""), None, Some(""))],
        );
        let target = bundle(
            "npm/npmjs/-/foo/1.0.0",
            vec![file("LICENSE", Some(""), None, Some(""))],
        );
        assert!(!DefinitionPolicy::new().is_matching(&source, &target).is_matching);

        let absent_source = bundle("npm/npmjs/-/foo/2.0.0", vec![file("LICENSE", None, None, None)]);
        let absent_target = bundle("npm/npmjs/-/foo/1.0.0", vec![file("LICENSE", None, None, None)]);
        assert!(
            !DefinitionPolicy::new()
                .is_matching(&absent_source, &absent_target)
                .is_matching
        );
    }

    #[test]
    fn test_hash_checked_before_token_per_target_file() {
        let source = bundle(
            "npm/npmjs/-/foo/2.0.0",
            vec![file("LICENSE", Some("same-sha1"), None, Some("same-token"))],
        );
        let target = bundle(
            "npm/npmjs/-/foo/1.0.0",
            vec![file("LICENSE", Some("same-sha1"), None, Some("same-token"))],
        );

        let verdict = DefinitionPolicy::new().is_matching(&source, &target);
        assert!(verdict.reason.unwrap().contains("hashes.sha1"));
    }

    #[test]
    fn test_target_files_exhausted_in_manifest_order() {
        let source = bundle(
            "npm/npmjs/-/foo/2.0.0",
            vec![file("LICENSE", Some("sha-b"), None, Some("token-a"))],
        );
        let target = bundle(
            "npm/npmjs/-/foo/1.0.0",
            vec![
                file("LICENSE", Some("sha-x"), None, Some("token-a")),
                file("COPYING", Some("sha-b"), None, None),
            ],
        );

        let verdict = DefinitionPolicy::new().is_matching(&source, &target);
        assert!(verdict.reason.unwrap().contains("token in LICENSE"));
    }

    #[test]
    fn test_custom_classifier() {
        let source = bundle(
            "npm/npmjs/-/foo/2.0.0",
            vec![file("docs/terms.txt", Some("abc"), None, None)],
        );
        let target = bundle(
            "npm/npmjs/-/foo/1.0.0",
            vec![file("docs/terms.txt", Some("abc"), None, None)],
        );

        assert!(!DefinitionPolicy::new().is_matching(&source, &target).is_matching);

        let policy = DefinitionPolicy::new()
            .with_classifier(|path: &str, _: &Coordinates| path.ends_with("terms.txt"));
        assert!(policy.is_matching(&source, &target).is_matching);
    }
}
