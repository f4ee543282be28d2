//! Long-poll synchronisation loop.
//!
//! Each cycle fetches the match state, then blocks on the server's update
//! long-poll. The loop re-arms while the long-poll keeps answering and the
//! stored status is not terminal.

use super::session::ClientSession;
use crate::error::{ClientError, Result};
use crate::model::GameStatus;
use crate::net::Transport;
use crate::util::{clog, cwarn};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Cancellation handle shared between the loop and whoever owns it.
#[derive(Clone, Default)]
pub struct PollControl {
    inner: Rc<PollInner>,
}

#[derive(Default)]
struct PollInner {
    cancelled: Cell<bool>,
    abort_in_flight: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl PollControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops the loop before its next request and aborts the one in flight.
    pub fn cancel(&self) {
        if self.inner.cancelled.replace(true) {
            return;
        }
        let abort = self.inner.abort_in_flight.borrow_mut().take();
        if let Some(abort) = abort {
            abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.get()
    }

    /// Registers how to abort the request currently in flight.
    pub fn set_abort(&self, abort: impl FnOnce() + 'static) {
        *self.inner.abort_in_flight.borrow_mut() = Some(Box::new(abort));
    }

    pub fn clear_abort(&self) {
        self.inner.abort_in_flight.borrow_mut().take();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StopReason {
    /// The match reached a win or tie.
    Finished(GameStatus),
    /// The long-poll timed out or failed; polling does not retry.
    PollFailed(ClientError),
    Cancelled,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Finished(status) => write!(f, "match finished ({})", status),
            StopReason::PollFailed(err) => write!(f, "long-poll failed: {}", err),
            StopReason::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// Whether another cycle should start after a long-poll completed.
///
/// Any delivered response counts, whatever its status code. The status
/// checked is the one in the store now, not the one the long-poll announced.
pub fn should_rearm(poll: &Result<u16>, current: &GameStatus) -> bool {
    poll.is_ok() && !current.is_terminal()
}

pub struct SyncLoop<T: Transport> {
    session: Rc<ClientSession>,
    transport: T,
    control: PollControl,
}

impl<T: Transport> SyncLoop<T> {
    pub fn new(session: Rc<ClientSession>, transport: T, control: PollControl) -> Self {
        Self {
            session,
            transport,
            control,
        }
    }

    /// Fetches the match state and, on success, replaces the store with it.
    /// Failures leave the stored state untouched. Cancellation aborts the fetch.
    pub async fn fetch_state(&self) -> Result<()> {
        let state = self
            .transport
            .game_state(self.session.match_id(), &self.control)
            .await?;
        self.session.replace(state);
        Ok(())
    }

    pub async fn run(self) -> StopReason {
        clog(&format!("polling match {}", self.session.match_id()));
        loop {
            if self.control.is_cancelled() {
                return StopReason::Cancelled;
            }
            let fetched = self.fetch_state().await;
            if self.control.is_cancelled() {
                return StopReason::Cancelled;
            }
            if let Err(err) = fetched {
                cwarn(&format!("state fetch failed: {}", err));
            }
            let poll = self
                .transport
                .wait_for_update(self.session.match_id(), &self.control)
                .await;
            if self.control.is_cancelled() {
                return StopReason::Cancelled;
            }
            let status = self.session.status();
            if should_rearm(&poll, &status) {
                continue;
            }
            return match poll {
                Err(err) => StopReason::PollFailed(err),
                Ok(_) => StopReason::Finished(status),
            };
        }
    }
}
