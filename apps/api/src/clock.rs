use chrono::{DateTime, Utc};

/// Source of "now" for deadline comparisons.
///
/// Eligibility must be a pure function of its inputs and the current time,
/// so the time comes in through this seam: production uses the system clock,
/// tests pin a fixed instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
