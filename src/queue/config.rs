//! Fairness quota configuration.

use crate::model::Tier;

/// How many customers of each tier are served per fairness cycle.
///
/// The default pattern is one Corporate, one Preferential, then up to two
/// Standard, repeating (a 1:1:2 ratio).
///
/// # Examples
///
/// ```
/// use u_dispatch::queue::FairnessQuota;
///
/// let quota = FairnessQuota::default();
/// assert_eq!(quota.cycle_len(), 4);
///
/// let custom = FairnessQuota::default().with_standard(3);
/// assert!(custom.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FairnessQuota {
    /// Corporate slots per cycle.
    pub corporate: u32,
    /// Preferential slots per cycle.
    pub preferential: u32,
    /// Standard slots per cycle.
    pub standard: u32,
}

impl Default for FairnessQuota {
    fn default() -> Self {
        Self {
            corporate: 1,
            preferential: 1,
            standard: 2,
        }
    }
}

impl FairnessQuota {
    pub fn with_corporate(mut self, n: u32) -> Self {
        self.corporate = n;
        self
    }

    pub fn with_preferential(mut self, n: u32) -> Self {
        self.preferential = n;
        self
    }

    pub fn with_standard(mut self, n: u32) -> Self {
        self.standard = n;
        self
    }

    /// Slots for the given tier.
    pub fn slots(&self, tier: Tier) -> u32 {
        match tier {
            Tier::Corporate => self.corporate,
            Tier::Preferential => self.preferential,
            Tier::Standard => self.standard,
        }
    }

    /// Dispatches in one full cycle, saturating at `u32::MAX`.
    pub fn cycle_len(&self) -> u32 {
        self.corporate
            .saturating_add(self.preferential)
            .saturating_add(self.standard)
    }

    /// Validates the quota. Every tier needs at least one slot, otherwise
    /// the cycle could never close.
    pub fn validate(&self) -> Result<(), String> {
        for tier in Tier::ALL {
            if self.slots(tier) == 0 {
                return Err(format!("{tier} quota must be at least 1"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_quota() {
        let q = FairnessQuota::default();
        assert_eq!(q.slots(Tier::Corporate), 1);
        assert_eq!(q.slots(Tier::Preferential), 1);
        assert_eq!(q.slots(Tier::Standard), 2);
        assert!(q.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_slot() {
        let q = FairnessQuota::default().with_preferential(0);
        let err = q.validate().unwrap_err();
        assert!(err.contains("preferential"));
    }

    #[test]
    fn test_cycle_len_saturates() {
        let q = FairnessQuota::default()
            .with_corporate(u32::MAX)
            .with_standard(u32::MAX);
        assert_eq!(q.cycle_len(), u32::MAX);
        assert!(q.validate().is_ok());
    }
}
