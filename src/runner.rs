use crate::{CaseOutcome, Prober, Reporter, Result, RunSummary, TestCase};
use futures::{StreamExt, stream};
use std::io::Write;

/// Drives an ordered list of cases through a [`Prober`] and tallies outcomes.
pub struct Runner {
    prober: Prober,
    concurrency: usize,
}

impl Runner {
    pub fn new(prober: Prober) -> Self {
        Self {
            prober,
            concurrency: 1,
        }
    }

    /// Allows up to `concurrency` requests in flight. Outcomes are still
    /// reported and tallied in case order.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    fn display_url(&self, case: &TestCase) -> String {
        self.prober
            .endpoint(&case.path)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| case.path.clone())
    }

    pub async fn run<W: Write>(
        &self,
        cases: &[TestCase],
        reporter: &mut Reporter<W>,
    ) -> Result<RunSummary> {
        let base_url = self.prober.base_url();
        tracing::info!(cases = cases.len(), %base_url, concurrency = self.concurrency, "starting run");
        reporter.header(base_url)?;

        let mut summary = RunSummary::default();

        if self.concurrency == 1 {
            for case in cases {
                reporter.case_started(case, &self.display_url(case))?;
                let result = self.prober.probe(case).await;
                reporter.case_finished(&result)?;
                summary.record(CaseOutcome::classify(case, result));
            }
        } else {
            // `buffered` yields in input order regardless of completion order
            let mut results = stream::iter(cases)
                .map(|case| async move { (case, self.prober.probe(case).await) })
                .buffered(self.concurrency);

            while let Some((case, result)) = results.next().await {
                reporter.case_started(case, &self.display_url(case))?;
                reporter.case_finished(&result)?;
                summary.record(CaseOutcome::classify(case, result));
            }
        }

        reporter.summary(&summary)?;
        tracing::info!(passed = summary.passed, failed = summary.failed, "run completed");
        Ok(summary)
    }
}
