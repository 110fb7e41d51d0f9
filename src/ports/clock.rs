use chrono::{DateTime, Utc};

/// Port for reading the current time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}
