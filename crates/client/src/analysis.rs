//! Start-then-poll driver for the `analyze` call.
//!
//! [`Analysis`] is an iterator: every `next()` performs exactly one request.
//! While the service reports `DNS` or `IN_PROGRESS` the decoded snapshot is
//! yielded and nothing else happens until the caller asks for the next one,
//! so pacing (sleeping, a progress display, an executor) is entirely up to
//! the caller. Once a terminal status arrives the snapshot is stored on the
//! [`Client`] and the iterator ends.

use crate::client::Client;
use crate::error::{Error, Result};
use crate::request::AnalyzeRequest;
use crate::transport::Transport;
use ssllabs_core::{AnalysisStatus, Host};

/// Where a run stands between two requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No request sent yet; the next one carries `startNew=on`.
    Starting,
    /// Last snapshot was `DNS` or `IN_PROGRESS`.
    Polling,
    /// Terminal snapshot stored on the client.
    Complete,
    /// A request or decode failed; nothing was stored.
    Failed,
}

impl Phase {
    /// Next phase after decoding a snapshot with `status`.
    pub fn advance(self, status: &AnalysisStatus) -> Phase {
        match self {
            Phase::Starting | Phase::Polling if status.is_terminal() => Phase::Complete,
            Phase::Starting | Phase::Polling => Phase::Polling,
            done => done,
        }
    }

    pub fn sends_start_new(self) -> bool {
        self == Phase::Starting
    }

    pub fn is_finished(self) -> bool {
        matches!(self, Phase::Complete | Phase::Failed)
    }
}

/// One assessment run. Created by [`Client::analyze`].
///
/// Yields `Ok(partial)` for every non-terminal snapshot and at most one
/// `Err`, after which it is exhausted. Dropping it early leaves the client's
/// stored host untouched.
pub struct Analysis<'c, T: Transport> {
    client: &'c mut Client<T>,
    request: AnalyzeRequest,
    phase: Phase,
    polls: usize,
}

impl<'c, T: Transport> Analysis<'c, T> {
    pub(crate) fn new(client: &'c mut Client<T>, request: AnalyzeRequest) -> Self {
        Analysis { client, request, phase: Phase::Starting, polls: 0 }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Requests sent so far.
    pub fn polls(&self) -> usize {
        self.polls
    }

    /// Drive the run to the end, calling `pause` with each partial snapshot
    /// before the following request. Sleep in `pause` to pace the polling.
    pub fn run_to_completion<F>(mut self, mut pause: F) -> Result<Host>
    where
        F: FnMut(&Host),
    {
        while let Some(snapshot) = self.next() {
            pause(&snapshot?);
        }
        self.client.host().cloned()
    }

    fn step(&mut self) -> Result<Option<Host>> {
        let mut url = self.client.entrypoint().endpoint("analyze")?;
        self.request.apply(&mut url, self.phase.sends_start_new());
        self.polls += 1;
        let host: Host = self.client.fetch(url)?;

        self.phase = self.phase.advance(&host.status);
        if self.phase == Phase::Complete {
            tracing::info!(
                host = %self.request.host,
                status = %host.status,
                polls = self.polls,
                "assessment finished"
            );
            self.client.store_host(host);
            Ok(None)
        } else {
            tracing::debug!(host = %self.request.host, status = %host.status, "assessment in progress");
            Ok(Some(host))
        }
    }
}

impl<T: Transport> Iterator for Analysis<'_, T> {
    type Item = Result<Host, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.phase.is_finished() {
            return None;
        }
        match self.step() {
            Ok(partial) => partial.map(Ok),
            Err(e) => {
                self.phase = Phase::Failed;
                Some(Err(e))
            }
        }
    }
}

impl<T: Transport> std::iter::FusedIterator for Analysis<'_, T> {}
