use chrono::{DateTime, Utc};

/// Source of "now" for default as-of resolution.
///
/// Engine stages never read the wall clock themselves; the handler resolves
/// the as-of instant once through the injected clock and threads it through
/// every stage, so a single request can never observe two different nows.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to a fixed instant.
///
/// Used by tests and by deployments that serve a static historical snapshot
/// (`server.reference_date` in the config file).
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
