//! Authoritative cost lookups and their sequencing.
//!
//! Every deferred price gets a fresh [`QuoteTicket`]. Only the answer to the most
//! recently issued ticket may change the label; anything older is dropped.

use crate::error::SponsorshipError;
use crate::form::ApplicationForm;
use serde::Serialize;
use std::fmt;
use std::future::Future;

/// Monotonic sequence number of a cost lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct QuoteTicket(u64);

impl QuoteTicket {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for QuoteTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A lookup the caller should perform and report back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub ticket: QuoteTicket,
    pub form: ApplicationForm,
}

/// What [`crate::Configurator::settle_quote`] did with an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteOutcome {
    /// The label now shows this price.
    Applied(u64),
    /// A newer lookup was issued, or the price settled locally meanwhile.
    Stale,
    /// The lookup failed; the label keeps saying "Updating cost...".
    Failed,
}

/// Ticket bookkeeping owned by a configurator.
#[derive(Debug, Default, Clone)]
pub(crate) struct QuoteBook {
    issued: u64,
    awaiting: Option<QuoteTicket>,
    outbox: Option<QuoteRequest>,
}

impl QuoteBook {
    pub(crate) fn issue(&mut self, form: ApplicationForm) -> QuoteTicket {
        self.issued += 1;
        let ticket = QuoteTicket(self.issued);
        self.awaiting = Some(ticket);
        self.outbox = Some(QuoteRequest { ticket, form });
        ticket
    }

    /// Forgets the in-flight lookup; its answer will be stale.
    pub(crate) fn invalidate(&mut self) {
        self.awaiting = None;
        self.outbox = None;
    }

    pub(crate) fn take(&mut self) -> Option<QuoteRequest> {
        self.outbox.take()
    }

    /// Consumes `ticket` if it is the one being awaited.
    pub(crate) fn accept(&mut self, ticket: QuoteTicket) -> bool {
        if self.awaiting == Some(ticket) {
            self.awaiting = None;
            true
        } else {
            false
        }
    }

    pub(crate) const fn awaiting(&self) -> Option<QuoteTicket> {
        self.awaiting
    }
}

/// Something that can price a form authoritatively.
pub trait CostSource: Send + Sync {
    fn fetch_cost(
        &self,
        form: &ApplicationForm,
    ) -> impl Future<Output = Result<u64, SponsorshipError>> + Send;
}

/// An answered lookup, ready for [`crate::Configurator::apply_quote`].
#[derive(Debug)]
pub struct SettledQuote {
    pub ticket: QuoteTicket,
    pub result: Result<u64, SponsorshipError>,
}

/// Runs lookups against a [`CostSource`].
///
/// Lookups may overlap; sequencing is enforced when the answers are applied,
/// not here.
#[derive(Debug, Clone)]
pub struct QuoteDriver<S> {
    source: S,
}

impl<S: CostSource> QuoteDriver<S> {
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    pub async fn quote(&self, request: QuoteRequest) -> SettledQuote {
        tracing::debug!(ticket = %request.ticket, "Requesting cost");
        let result = self.source.fetch_cost(&request.form).await;
        SettledQuote { ticket: request.ticket, result }
    }

    /// Sends the configurator's pending lookup, if any, and applies the answer.
    pub async fn drive<R>(&self, configurator: &mut crate::Configurator<R>) -> Option<QuoteOutcome>
    where
        R: crate::CostResolver,
    {
        let request = configurator.take_quote_request()?;
        let settled = self.quote(request).await;
        Some(configurator.apply_quote(settled))
    }
}
