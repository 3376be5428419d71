//! Customer, tier and status types.

use crate::error::{DispatchError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Monotonically increasing customer identity.
pub type CustomerId = u64;

/// Point in time in nanoseconds, as produced by a [`Clock`](super::Clock).
pub type Timestamp = u64;

const NANOS_PER_MINUTE: u64 = 60 * 1_000_000_000;

/// Customer priority class.
///
/// The set is closed. Each tier carries a static priority weight where a
/// lower number means higher priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Tier {
    /// Business accounts. Weight 1.
    Corporate,
    /// Elderly, pregnant and disabled customers. Weight 2.
    Preferential,
    /// Everyone else. Weight 3.
    Standard,
}

impl Tier {
    /// All tiers in priority order.
    pub const ALL: [Tier; 3] = [Tier::Corporate, Tier::Preferential, Tier::Standard];

    /// Priority weight (lower = served first).
    pub fn weight(self) -> u8 {
        match self {
            Tier::Corporate => 1,
            Tier::Preferential => 2,
            Tier::Standard => 3,
        }
    }

    /// Human-readable description of the tier.
    pub fn label(self) -> &'static str {
        match self {
            Tier::Corporate => "Corporate customer",
            Tier::Preferential => "Preferential customer (elderly/pregnant/disabled)",
            Tier::Standard => "Standard customer",
        }
    }

    /// Short lowercase name, also accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Corporate => "corporate",
            Tier::Preferential => "preferential",
            Tier::Standard => "standard",
        }
    }

    /// Position of this tier in [`Tier::ALL`].
    pub(crate) fn index(self) -> usize {
        self.weight() as usize - 1
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "corporate" => Ok(Tier::Corporate),
            "preferential" => Ok(Tier::Preferential),
            "standard" => Ok(Tier::Standard),
            _ => Err(DispatchError::UnknownTier {
                value: s.to_string(),
            }),
        }
    }
}

/// Lifecycle state of a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    Waiting,
    InService,
    Served,
    Cancelled,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Waiting => "waiting",
            Status::InService => "in-service",
            Status::Served => "served",
            Status::Cancelled => "cancelled",
        })
    }
}

/// A customer waiting for, receiving, or done with service.
///
/// Invariants maintained by the transition methods:
/// `service_start >= arrival` and `service_end >= service_start`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub tier: Tier,
    /// Estimated service duration in minutes (at least 1).
    pub estimated_minutes: u32,
    pub arrival: Timestamp,
    pub service_start: Option<Timestamp>,
    pub service_end: Option<Timestamp>,
    pub status: Status,
}

impl Customer {
    /// Creates a waiting customer.
    pub fn new(
        id: CustomerId,
        name: impl Into<String>,
        tier: Tier,
        estimated_minutes: u32,
        arrival: Timestamp,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            tier,
            estimated_minutes,
            arrival,
            service_start: None,
            service_end: None,
            status: Status::Waiting,
        }
    }

    /// Canonical ordering key: tier weight, then arrival.
    pub fn key(&self) -> (u8, Timestamp) {
        (self.tier.weight(), self.arrival)
    }

    /// Compares two customers under the canonical order.
    pub fn canonical_cmp(&self, other: &Customer) -> Ordering {
        self.key().cmp(&other.key())
    }

    /// `Waiting -> InService`. A start earlier than arrival is clamped to arrival.
    pub fn begin_service(&mut self, at: Timestamp) -> Result<()> {
        self.transition(Status::Waiting, Status::InService)?;
        self.service_start = Some(at.max(self.arrival));
        Ok(())
    }

    /// `InService -> Served`. An end earlier than the start is clamped to the start.
    pub fn finish_service(&mut self, at: Timestamp) -> Result<()> {
        self.transition(Status::InService, Status::Served)?;
        let start = self.service_start.unwrap_or(self.arrival);
        self.service_end = Some(at.max(start));
        Ok(())
    }

    /// `Waiting -> Cancelled`.
    pub fn cancel(&mut self) -> Result<()> {
        self.transition(Status::Waiting, Status::Cancelled)
    }

    fn transition(&mut self, from: Status, to: Status) -> Result<()> {
        if self.status != from {
            return Err(DispatchError::InvalidTransition {
                id: self.id,
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }

    /// Minutes spent waiting: until service start, or until `now` if not started.
    pub fn wait_minutes(&self, now: Timestamp) -> u64 {
        let until = self.service_start.unwrap_or(now);
        minutes_between(self.arrival, until)
    }

    /// Minutes from arrival to service end, or the wait so far if unfinished.
    pub fn total_minutes(&self, now: Timestamp) -> u64 {
        match self.service_end {
            Some(end) => minutes_between(self.arrival, end),
            None => self.wait_minutes(now),
        }
    }

    /// Actual service minutes; zero until the service has both started and ended.
    pub fn service_minutes(&self) -> u64 {
        match (self.service_start, self.service_end) {
            (Some(start), Some(end)) => minutes_between(start, end),
            _ => 0,
        }
    }
}

/// Whole minutes between two timestamps, truncated; zero if `to < from`.
pub(crate) fn minutes_between(from: Timestamp, to: Timestamp) -> u64 {
    to.saturating_sub(from) / NANOS_PER_MINUTE
}

/// Converts minutes into a [`Timestamp`] offset.
pub fn minutes(m: u64) -> Timestamp {
    m.saturating_mul(NANOS_PER_MINUTE)
}

/// Caller-supplied data for registering a customer.
///
/// Fields are optional so that absent values can be reported as
/// validation failures instead of being impossible to express.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomerRequest {
    pub name: String,
    pub tier: Option<Tier>,
    pub estimated_minutes: Option<u32>,
}

impl CustomerRequest {
    pub fn new(name: impl Into<String>, tier: Tier, estimated_minutes: u32) -> Self {
        Self {
            name: name.into(),
            tier: Some(tier),
            estimated_minutes: Some(estimated_minutes),
        }
    }

    /// Checks required fields and returns the tier and duration.
    pub fn validate(&self) -> Result<(Tier, u32)> {
        if self.name.trim().is_empty() {
            return Err(DispatchError::validation("name", "must not be blank"));
        }
        let tier = self
            .tier
            .ok_or_else(|| DispatchError::validation("tier", "is required"))?;
        let minutes = self
            .estimated_minutes
            .ok_or_else(|| DispatchError::validation("estimated_minutes", "is required"))?;
        if minutes < 1 {
            return Err(DispatchError::validation(
                "estimated_minutes",
                format!("must be at least 1, got {minutes}"),
            ));
        }
        Ok((tier, minutes))
    }
}
