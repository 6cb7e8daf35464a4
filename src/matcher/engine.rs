use tracing::{debug, instrument};

use super::definition::DefinitionPolicy;
use super::harvest::HarvestPolicy;
use crate::model::{MatchVerdict, RevisionBundle};
use crate::traits::MatchPolicy;

// ============================================================================
// License Matcher
// ============================================================================

/// Runs an ordered chain of [`MatchPolicy`] implementations over a pair of
/// revisions.
///
/// The first policy reporting a match wins; later policies are not
/// consulted. The default chain prefers file evidence
/// ([`DefinitionPolicy`]) over metadata evidence ([`HarvestPolicy`]).
///
/// # Thread Safety
///
/// The matcher holds only its policy list and is `Send + Sync`, so one
/// instance can serve concurrent callers.
///
/// # Example
///
/// ```ignore
/// use license_matcher::{LicenseMatcher, RevisionBundle};
///
/// let matcher = LicenseMatcher::new();
/// let verdict = matcher.process(&source, &target);
/// if verdict.is_matching {
///     println!("{}", verdict.reason.unwrap_or_default());
/// }
/// ```
pub struct LicenseMatcher {
    policies: Vec<Box<dyn MatchPolicy>>,
}

impl Default for LicenseMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LicenseMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LicenseMatcher")
            .field("policies", &self.policy_names())
            .finish()
    }
}

impl LicenseMatcher {
    /// Creates a matcher with the default chain: definition, then harvest.
    pub fn new() -> Self {
        Self::with_policies(vec![
            Box::new(DefinitionPolicy::new()),
            Box::new(HarvestPolicy::new()),
        ])
    }

    /// Creates a matcher that consults `policies` in the given order.
    pub fn with_policies(policies: Vec<Box<dyn MatchPolicy>>) -> Self {
        Self { policies }
    }

    /// Names of the configured policies, in evaluation order.
    pub fn policy_names(&self) -> Vec<&str> {
        self.policies.iter().map(|policy| policy.name()).collect()
    }

    /// Decides whether `source` and `target` carry the same license.
    ///
    /// Returns the verdict of the first matching policy, or a negative
    /// verdict without policy or reason when none matches.
    #[instrument(
        skip(self, source, target),
        fields(source = %source.coordinates(), target = %target.coordinates())
    )]
    pub fn process(&self, source: &RevisionBundle, target: &RevisionBundle) -> MatchVerdict {
        for policy in &self.policies {
            let verdict = policy.is_matching(source, target);
            debug!(policy = policy.name(), is_matching = verdict.is_matching, "Policy evaluated");
            if verdict.is_matching {
                return verdict;
            }
        }
        MatchVerdict::no_match()
    }
}

// ============================================================================
// Tests
// ============================================================================
