use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::traits::CoordinateError;

/// Package ecosystem a coordinate belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CoordinateType {
    Maven,
    Crate,
    Pod,
    Nuget,
    Npm,
    Composer,
    Gem,
    Pypi,
    Deb,
    Debsrc,
    Git,
    Go,
    SourceArchive,
    Conda,
    Condasrc,
    Other(String),
}

impl CoordinateType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Maven => "maven",
            Self::Crate => "crate",
            Self::Pod => "pod",
            Self::Nuget => "nuget",
            Self::Npm => "npm",
            Self::Composer => "composer",
            Self::Gem => "gem",
            Self::Pypi => "pypi",
            Self::Deb => "deb",
            Self::Debsrc => "debsrc",
            Self::Git => "git",
            Self::Go => "go",
            Self::SourceArchive => "sourcearchive",
            Self::Conda => "conda",
            Self::Condasrc => "condasrc",
            Self::Other(other) => other,
        }
    }
}

impl From<String> for CoordinateType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "maven" => Self::Maven,
            "crate" => Self::Crate,
            "pod" => Self::Pod,
            "nuget" => Self::Nuget,
            "npm" => Self::Npm,
            "composer" => Self::Composer,
            "gem" => Self::Gem,
            "pypi" => Self::Pypi,
            "deb" => Self::Deb,
            "debsrc" => Self::Debsrc,
            "git" => Self::Git,
            "go" => Self::Go,
            "sourcearchive" => Self::SourceArchive,
            "conda" => Self::Conda,
            "condasrc" => Self::Condasrc,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for CoordinateType {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<CoordinateType> for String {
    fn from(t: CoordinateType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for CoordinateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one version of a package artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(rename = "type")]
    pub coordinate_type: CoordinateType,
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub name: String,
    pub revision: String,
}

impl FromStr for Coordinates {
    type Err = CoordinateError;

    /// Parses `type/provider/namespace/name/revision`, where a `-`
    /// namespace means the package has none.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = input.split('/').collect();
        if segments.len() != 5 {
            return Err(CoordinateError::WrongSegmentCount {
                input: input.to_string(),
                found: segments.len(),
            });
        }

        for (index, label) in [(0, "type"), (1, "provider"), (3, "name"), (4, "revision")] {
            if segments[index].trim().is_empty() {
                return Err(CoordinateError::EmptySegment {
                    input: input.to_string(),
                    segment: label,
                });
            }
        }

        let namespace = match segments[2] {
            "" | "-" => None,
            ns => Some(ns.to_string()),
        };

        Ok(Self {
            coordinate_type: CoordinateType::from(segments[0]),
            provider: segments[1].to_string(),
            namespace,
            name: segments[3].to_string(),
            revision: segments[4].to_string(),
        })
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}/{}",
            self.coordinate_type,
            self.provider,
            self.namespace.as_deref().unwrap_or("-"),
            self.name,
            self.revision
        )
    }
}

/// One file discovered in a package's contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: String,
    /// Algorithm name (e.g. `sha1`, `sha256`) to hex digest
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub hashes: HashMap<String, String>,
    /// Fuzzy-matching fingerprint of the file content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Declared file manifest of one revision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefinitionRecord {
    pub coordinates: Coordinates,
    #[serde(default)]
    pub files: Vec<FileRecord>,
}

impl DefinitionRecord {
    pub fn new(coordinates: Coordinates) -> Self {
        Self {
            coordinates,
            files: Vec::new(),
        }
    }
}

/// Harvest output keyed by tool name, then by tool version.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HarvestRecord(pub HashMap<String, BTreeMap<String, serde_json::Value>>);

impl HarvestRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a snapshot produced by `tool` at `version`.
    pub fn insert(
        &mut self,
        tool: impl Into<String>,
        version: impl Into<String>,
        snapshot: serde_json::Value,
    ) {
        self.0
            .entry(tool.into())
            .or_default()
            .insert(version.into(), snapshot);
    }

    /// Returns the snapshot with the highest semantic version for `tool`.
    ///
    /// Version keys that are not valid semver are ignored. `None` when the
    /// tool has no entry or no parseable version.
    pub fn latest(&self, tool: &str) -> Option<&serde_json::Value> {
        let versions = self.0.get(tool)?;
        versions
            .iter()
            .filter_map(|(key, snapshot)| match semver::Version::parse(key) {
                Ok(version) => Some((version, snapshot)),
                Err(e) => {
                    warn!(tool, version = %key, error = %e, "Skipping unparseable harvest version");
                    None
                }
            })
            .max_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, snapshot)| snapshot)
    }
}

/// Everything known about one coordinate revision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevisionBundle {
    pub definition: DefinitionRecord,
    #[serde(default)]
    pub harvest: HarvestRecord,
}

impl RevisionBundle {
    pub fn new(definition: DefinitionRecord, harvest: HarvestRecord) -> Self {
        Self {
            definition,
            harvest,
        }
    }

    pub fn coordinates(&self) -> &Coordinates {
        &self.definition.coordinates
    }

    pub fn revision(&self) -> &str {
        &self.definition.coordinates.revision
    }
}

/// Outcome of a license comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchVerdict {
    pub is_matching: bool,
    /// Name of the policy that matched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl MatchVerdict {
    pub fn matched(policy: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            is_matching: true,
            policy: Some(policy.into()),
            reason: Some(reason.into()),
        }
    }

    pub fn no_match() -> Self {
        Self {
            is_matching: false,
            policy: None,
            reason: None,
        }
    }
}
