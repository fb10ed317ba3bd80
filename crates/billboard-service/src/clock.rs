//! Source of "today" for date-relative listing filters.

use billboard_core::Interface;
use chrono::{NaiveDate, Utc};
use shaku::Component;

/// Supplies the current date.
pub trait Clock: Interface + Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall clock in UTC.
#[derive(Component, Debug, Default, Clone, Copy)]
#[shaku(interface = Clock)]
pub struct SystemClock {}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// A clock stuck on one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
