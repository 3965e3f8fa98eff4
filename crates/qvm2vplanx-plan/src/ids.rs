use chrono::{Local, NaiveDateTime};
use uuid::Uuid;

pub const BUILD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Source of identifiers for identity-bearing nodes (plan, section, port, pattern).
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Random v4 UUIDs.
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> String { Uuid::new_v4().to_string() }
}

/// `prefix-1`, `prefix-2`, ... for reproducible documents.
#[derive(Clone, Debug)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    fn build_time(&self) -> String { self.now().format(BUILD_TIME_FORMAT).to_string() }
}

/// Local wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime { Local::now().naive_local() }
}

#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime { self.0 }
}
