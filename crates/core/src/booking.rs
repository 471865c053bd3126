//! Booking status lifecycle and hostess assignment.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Review state of a booking. New bookings start as [`BookingStatus::Pending`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BookingStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// Valid status names, in declaration order.
pub const VALID_STATUSES: &[&str] = &["Pending", "Approved", "Rejected"];

impl BookingStatus {
    /// The name stored in the `bookings.status` column.
    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Approved => "Approved",
            BookingStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(BookingStatus::Pending),
            "Approved" => Ok(BookingStatus::Approved),
            "Rejected" => Ok(BookingStatus::Rejected),
            other => Err(CoreError::Validation(format!(
                "Invalid booking status '{other}'. Must be one of: {VALID_STATUSES:?}"
            ))),
        }
    }
}

/// Pick one element uniformly at random. Returns `None` for an empty slice.
pub fn pick_random<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let idx = rng.random_range(0..items.len());
    items.get(idx)
}
