use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::{CalendarDataSource, FetchError, FetchTicket};
use crate::models::record::RecordSet;

/// Result of one dispatched fetch, tagged with the ticket that issued it.
#[derive(Debug)]
pub struct FetchCompletion {
    pub ticket: FetchTicket,
    pub result: Result<RecordSet, FetchError>,
}

/// Runs blocking fetches off the async runtime and funnels their results
/// into a single channel, in completion order.
pub struct FetchDispatcher {
    source: Arc<dyn CalendarDataSource>,
    completions: mpsc::UnboundedSender<FetchCompletion>,
}

impl FetchDispatcher {
    pub fn new(
        source: Arc<dyn CalendarDataSource>,
    ) -> (Self, mpsc::UnboundedReceiver<FetchCompletion>) {
        let (completions, receiver) = mpsc::unbounded_channel();
        (
            Self {
                source,
                completions,
            },
            receiver,
        )
    }

    /// Start a fetch for `ticket`. Must be called from within a tokio runtime.
    pub fn dispatch(&self, ticket: FetchTicket) -> JoinHandle<()> {
        let source = Arc::clone(&self.source);
        let completions = self.completions.clone();

        log::debug!(
            "Dispatching fetch #{} for {}",
            ticket.generation,
            ticket.filter
        );

        tokio::task::spawn_blocking(move || {
            let result = source.fetch(&ticket.filter);
            let generation = ticket.generation;
            if completions.send(FetchCompletion { ticket, result }).is_err() {
                log::debug!("Fetch #{} finished after its receiver closed", generation);
            }
        })
    }
}
