//! License matching on third-party harvest metadata.
//!
//! Each ecosystem exposes its declared license through different fields of
//! the harvest snapshot, so the compared fields are chosen per
//! [`CoordinateType`]. Every configured field must be structurally equal
//! between the latest snapshots of both revisions for the policy to match.

use tracing::warn;

use super::value::{deep_equal, render, PropertyPath};
use crate::model::{CoordinateType, MatchVerdict, RevisionBundle};
use crate::traits::MatchPolicy;

/// Harvest tool whose snapshots are compared by default.
pub const CLEARLYDEFINED_TOOL: &str = "clearlydefined";

const MAVEN_PATHS: &[PropertyPath] = &[PropertyPath::new("manifest.summary.licenses")];
const REGISTRY_LICENSE_PATHS: &[PropertyPath] = &[PropertyPath::new("registryData.license")];
const NUGET_PATHS: &[PropertyPath] = &[
    PropertyPath::new("manifest.licenseExpression"),
    PropertyPath::new("manifest.licenseUrl"),
];
const REGISTRY_MANIFEST_LICENSE_PATHS: &[PropertyPath] =
    &[PropertyPath::new("registryData.manifest.license")];
const GEM_PATHS: &[PropertyPath] = &[PropertyPath::new("registryData.licenses")];
const PYPI_PATHS: &[PropertyPath] = &[
    PropertyPath::new("declaredLicense"),
    PropertyPath::new("registryData.info.license"),
];
const DEBIAN_PATHS: &[PropertyPath] = &[
    PropertyPath::new("declaredLicenses"),
    PropertyPath::new("copyrightUrl"),
];

/// Matches when the latest harvest snapshots of both revisions agree on
/// every license field for the ecosystem.
#[derive(Debug, Clone)]
pub struct HarvestPolicy {
    tool: String,
}

impl Default for HarvestPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl HarvestPolicy {
    pub const NAME: &'static str = "harvest";

    pub fn new() -> Self {
        Self {
            tool: CLEARLYDEFINED_TOOL.to_string(),
        }
    }

    /// Compares snapshots from `tool` instead of `clearlydefined`.
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = tool.into();
        self
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Snapshot fields compared for `coordinate_type`, in comparison order.
    ///
    /// Empty for ecosystems without a known license field.
    pub fn property_paths(coordinate_type: &CoordinateType) -> &'static [PropertyPath] {
        match coordinate_type {
            CoordinateType::Maven => MAVEN_PATHS,
            CoordinateType::Crate | CoordinateType::Pod => REGISTRY_LICENSE_PATHS,
            CoordinateType::Nuget => NUGET_PATHS,
            CoordinateType::Npm | CoordinateType::Composer => REGISTRY_MANIFEST_LICENSE_PATHS,
            CoordinateType::Gem => GEM_PATHS,
            CoordinateType::Pypi => PYPI_PATHS,
            CoordinateType::Deb | CoordinateType::Debsrc => DEBIAN_PATHS,
            _ => &[],
        }
    }
}

impl MatchPolicy for HarvestPolicy {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn is_matching(&self, source: &RevisionBundle, target: &RevisionBundle) -> MatchVerdict {
        let paths = Self::property_paths(&source.coordinates().coordinate_type);
        if paths.is_empty() {
            return MatchVerdict::no_match();
        }

        let source_latest = source.harvest.latest(&self.tool);
        let target_latest = target.harvest.latest(&self.tool);

        let mut shared = Vec::with_capacity(paths.len());
        for path in paths {
            let source_value = path.resolve(source_latest);
            let target_value = path.resolve(target_latest);
            if !deep_equal(source_value, target_value) {
                return MatchVerdict::no_match();
            }
            shared.push(format!("{}: ```{}```", path, render(source_value)));
        }

        if source_latest.is_none() && target_latest.is_none() {
            // Absent on both sides compares equal for every field.
            warn!(
                tool = %self.tool,
                source = %source.coordinates(),
                target = %target.coordinates(),
                "Harvest match without harvest data on either side"
            );
        }

        let reason = format!(
            "{} and {} share the same {}.\n",
            source.revision(),
            target.revision(),
            shared.join(" and ")
        );
        MatchVerdict::matched(Self::NAME, reason)
    }
}
