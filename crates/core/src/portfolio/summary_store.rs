use chrono::NaiveDate;
use log::debug;
use std::sync::{Arc, RwLock};

use super::portfolio_model::{PortfolioInput, PortfolioSummary};
use super::portfolio_traits::PortfolioServiceTrait;
use crate::errors::{Error, Result};
use crate::quotes::QuoteSnapshot;

/// Holds the most recently published summary.
///
/// A recomputation runs without holding the lock and is published with one
/// pointer swap, so readers see either the old summary or the new one.
#[derive(Debug)]
pub struct SummaryStore {
    current: RwLock<Arc<PortfolioSummary>>,
}

impl SummaryStore {
    pub fn new(initial: PortfolioSummary) -> Self {
        Self {
            current: RwLock::new(Arc::new(initial)),
        }
    }

    /// The latest published summary.
    pub fn current(&self) -> Result<Arc<PortfolioSummary>> {
        let guard = self
            .current
            .read()
            .map_err(|e| Error::SummaryStore(e.to_string()))?;
        Ok(Arc::clone(&*guard))
    }

    /// Replaces the published summary, returning the one it replaced.
    pub fn publish(&self, summary: PortfolioSummary) -> Result<Arc<PortfolioSummary>> {
        let next = Arc::new(summary);
        let mut guard = self
            .current
            .write()
            .map_err(|e| Error::SummaryStore(e.to_string()))?;
        Ok(std::mem::replace(&mut *guard, next))
    }

    /// Recomputes from a fresh snapshot and publishes the result.
    ///
    /// On failure the previously published summary stays in place.
    pub fn refresh(
        &self,
        service: &dyn PortfolioServiceTrait,
        input: &PortfolioInput,
        quotes: &QuoteSnapshot,
        as_of: NaiveDate,
    ) -> Result<Arc<PortfolioSummary>> {
        let summary = service.build_summary(input, quotes, as_of)?;
        debug!(
            "Publishing summary as of {} with {} holdings",
            summary.as_of,
            summary.holdings.len()
        );
        self.publish(summary)?;
        self.current()
    }
}
