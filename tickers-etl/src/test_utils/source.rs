use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{ErrorKind, EtlResult};
use crate::etl_error;
use crate::source::Source;
use crate::types::Company;

/// In-memory [`Source`] that returns a fixed outcome and counts how often it was read.
///
/// Clones share the read counter, so a test can keep a clone to check whether a pipeline
/// reached this source.
#[derive(Debug, Clone)]
pub struct ProbeSource {
    outcome: Result<Vec<Company>, ErrorKind>,
    reads: Arc<AtomicUsize>,
}

impl ProbeSource {
    /// Creates a source returning `companies` on every read.
    pub fn new(companies: Vec<Company>) -> Self {
        Self {
            outcome: Ok(companies),
            reads: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Creates a source failing with `kind` on every read.
    pub fn failing(kind: ErrorKind) -> Self {
        Self {
            outcome: Err(kind),
            reads: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Returns how many times the source was read.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl Source for ProbeSource {
    fn name() -> &'static str {
        "probe"
    }

    async fn read_companies(&self) -> EtlResult<Vec<Company>> {
        self.reads.fetch_add(1, Ordering::SeqCst);

        match &self.outcome {
            Ok(companies) => Ok(companies.clone()),
            Err(kind) => Err(etl_error!(*kind, "Probe source failed")),
        }
    }
}
