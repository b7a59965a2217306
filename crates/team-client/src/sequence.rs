//! Request sequencing for out-of-order completions
//!
//! Each fetch takes a ticket before it starts. When completions arrive the
//! consumer applies only the one holding the newest ticket; anything older
//! was superseded by a later leg or viewer change.

use std::fmt::{self, Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use team_hierarchy::Leg;

/// Position of one request in issue order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket {
    seq: u64,
    leg: Leg,
}

impl RequestTicket {
    /// Issue sequence number (first ticket is 1)
    #[inline]
    #[must_use]
    pub fn seq(self) -> u64 {
        self.seq
    }

    /// Leg the request was issued for
    #[inline]
    #[must_use]
    pub fn leg(self) -> Leg {
        self.leg
    }
}

impl Display for RequestTicket {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}({})", self.seq, self.leg)
    }
}

/// Monotonic ticket source
#[derive(Debug, Default)]
pub struct RequestSequencer {
    issued: AtomicU64,
}

impl RequestSequencer {
    /// Create sequencer with no tickets issued
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next ticket, superseding all earlier ones
    pub fn issue(&self, leg: Leg) -> RequestTicket {
        let seq = self.issued.fetch_add(1, Ordering::AcqRel) + 1;
        RequestTicket { seq, leg }
    }

    /// Whether no ticket was issued after this one
    #[inline]
    #[must_use]
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.issued.load(Ordering::Acquire) == ticket.seq
    }

    /// Sequence number of the newest ticket (0 before the first)
    #[inline]
    #[must_use]
    pub fn latest(&self) -> u64 {
        self.issued.load(Ordering::Acquire)
    }
}
