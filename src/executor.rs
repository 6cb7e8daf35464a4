use crate::matcher::LicenseMatcher;
use crate::model::{MatchVerdict, RevisionBundle};
use crate::traits::ExecutorError;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, instrument};

/// Evaluates many independent (source, target) pairs concurrently.
pub struct MatchExecutor {
    matcher: Arc<LicenseMatcher>,
    semaphore: Arc<Semaphore>,
}

impl MatchExecutor {
    pub fn new(concurrency_limit: usize) -> Self {
        Self {
            matcher: Arc::new(LicenseMatcher::new()),
            semaphore: Arc::new(Semaphore::new(concurrency_limit.max(1))),
        }
    }

    /// Uses `matcher` instead of the default policy chain.
    pub fn with_matcher(mut self, matcher: LicenseMatcher) -> Self {
        self.matcher = Arc::new(matcher);
        self
    }

    pub fn matcher(&self) -> &LicenseMatcher {
        &self.matcher
    }

    /// Returns one verdict per pair, in input order.
    #[instrument(skip(self, pairs), fields(pairs = pairs.len()))]
    pub async fn execute(
        &self,
        pairs: Vec<(RevisionBundle, RevisionBundle)>,
    ) -> Result<Vec<MatchVerdict>, ExecutorError> {
        let total = pairs.len();
        info!("Starting license match batch of {} pairs", total);

        let mut tasks = JoinSet::new();
        for (index, (source, target)) in pairs.into_iter().enumerate() {
            let permit = Arc::clone(&self.semaphore)
                .acquire_owned()
                .await
                .map_err(|e| ExecutorError::Semaphore(e.to_string()))?;
            let matcher = Arc::clone(&self.matcher);
            tasks.spawn(async move {
                let _permit = permit;
                (index, matcher.process(&source, &target))
            });
        }

        let mut verdicts: Vec<Option<MatchVerdict>> = vec![None; total];
        while let Some(joined) = tasks.join_next().await {
            let (index, verdict) = joined.map_err(|e| ExecutorError::Task(e.to_string()))?;
            verdicts[index] = Some(verdict);
        }

        let verdicts: Vec<MatchVerdict> = verdicts.into_iter().flatten().collect();
        if verdicts.len() != total {
            return Err(ExecutorError::Task(format!(
                "Expected {} verdicts, collected {}",
                total,
                verdicts.len()
            )));
        }

        let matched = verdicts.iter().filter(|v| v.is_matching).count();
        info!(matched, total, "Finished license match batch");
        Ok(verdicts)
    }
}
