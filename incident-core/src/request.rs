/// Sequence number assigned when a request is issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

/// Decides whether a completed request may still touch view state.
///
/// A result applies only if it belongs to the most recently issued request
/// and the owning view has not been torn down.
#[derive(Clone, Debug, Default)]
pub struct RequestTracker {
    latest: u64,
    disposed: bool,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> RequestId {
        self.latest += 1;
        RequestId(self.latest)
    }

    pub fn is_current(&self, id: RequestId) -> bool {
        !self.disposed && id.0 == self.latest
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
