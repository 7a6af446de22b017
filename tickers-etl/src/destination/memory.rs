use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::destination::Destination;
use crate::error::EtlResult;
use crate::types::Company;

#[derive(Debug)]
struct Inner {
    writes: Vec<(NaiveDate, Vec<Company>)>,
}

/// In-memory destination for testing and dry runs.
///
/// [`MemoryDestination`] keeps every written batch together with its run date and logs the
/// rows instead of persisting them. Clones share the same storage, so a test can hand a clone
/// to a pipeline and inspect the original afterwards.
#[derive(Debug, Clone)]
pub struct MemoryDestination {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryDestination {
    /// Creates a new empty memory destination.
    pub fn new() -> Self {
        let inner = Inner { writes: Vec::new() };

        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    /// Returns a copy of every write received so far, oldest first.
    pub async fn writes(&self) -> Vec<(NaiveDate, Vec<Company>)> {
        let inner = self.inner.lock().await;
        inner.writes.clone()
    }

    /// Returns the companies of the most recent write, if any.
    pub async fn last_companies(&self) -> Option<Vec<Company>> {
        let inner = self.inner.lock().await;
        inner.writes.last().map(|(_, companies)| companies.clone())
    }
}

impl Default for MemoryDestination {
    fn default() -> Self {
        Self::new()
    }
}

impl Destination for MemoryDestination {
    fn name() -> &'static str {
        "memory"
    }

    async fn write_companies(&self, companies: &[Company], run_date: NaiveDate) -> EtlResult<()> {
        let mut inner = self.inner.lock().await;

        info!(%run_date, "writing a batch of {} companies:", companies.len());

        for company in companies {
            info!("  {:?}", company);
        }
        inner.writes.push((run_date, companies.to_vec()));

        Ok(())
    }
}
