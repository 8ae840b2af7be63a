use std::fmt;
use std::fmt::{Display, Formatter};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// FeeSchedule holds the tiered late fee rates, all amounts in cents.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub first_tier_days: i64,
    pub first_tier_daily_cents: i64,
    pub second_tier_daily_cents: i64,
    pub max_fee_cents: i64,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        FeeSchedule {
            first_tier_days: 7,
            first_tier_daily_cents: 50,
            second_tier_daily_cents: 100,
            max_fee_cents: 1500,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum FeeStatus {
    NotOverdue,
    Overdue,
    Capped,
}

impl Display for FeeStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            FeeStatus::NotOverdue => write!(f, "No late fee"),
            FeeStatus::Overdue => write!(f, "Late fee calculated"),
            FeeStatus::Capped => write!(f, "Late fee capped at maximum"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct LateFee {
    pub fee_amount: f64,
    pub fee_cents: i64,
    pub days_overdue: i64,
    pub status: FeeStatus,
}

impl LateFee {
    pub fn none() -> Self {
        LateFee { fee_amount: 0.0, fee_cents: 0, days_overdue: 0, status: FeeStatus::NotOverdue }
    }

    pub fn is_due(&self) -> bool {
        self.fee_cents > 0
    }

    pub fn formatted(&self) -> String {
        format_cents(self.fee_cents)
    }
}

pub fn format_cents(cents: i64) -> String {
    format!("{:.2}", cents as f64 / 100.0)
}

/// Maps how far past its due date a loan is to a late fee.
///
/// The calculator only does timestamp arithmetic; finding the borrow record is up to the caller.
#[derive(Debug, Clone, Default)]
pub struct LateFeeCalculator {
    schedule: FeeSchedule,
}

impl LateFeeCalculator {
    pub fn new(schedule: FeeSchedule) -> Self {
        Self { schedule }
    }

    // whole days elapsed since due_at, never negative
    pub fn days_overdue(due_at: NaiveDateTime, now: NaiveDateTime) -> i64 {
        (now - due_at).num_days().max(0)
    }

    pub fn fee_cents(&self, days_overdue: i64) -> i64 {
        let s = &self.schedule;
        let cents = if days_overdue <= 0 {
            0
        } else if days_overdue <= s.first_tier_days {
            days_overdue * s.first_tier_daily_cents
        } else {
            s.first_tier_days * s.first_tier_daily_cents
                + (days_overdue - s.first_tier_days) * s.second_tier_daily_cents
        };
        cents.min(s.max_fee_cents)
    }

    pub fn compute(&self, due_at: NaiveDateTime, now: NaiveDateTime) -> LateFee {
        let days_overdue = Self::days_overdue(due_at, now);
        let fee_cents = self.fee_cents(days_overdue);
        let status = if fee_cents == 0 {
            FeeStatus::NotOverdue
        } else if fee_cents >= self.schedule.max_fee_cents {
            FeeStatus::Capped
        } else {
            FeeStatus::Overdue
        };
        LateFee {
            fee_amount: fee_cents as f64 / 100.0,
            fee_cents,
            days_overdue,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use crate::fees::calculator::{FeeStatus, LateFeeCalculator};

    fn due() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_should_charge_nothing_before_due_date() {
        let calc = LateFeeCalculator::default();
        let fee = calc.compute(due(), due() - Duration::days(3));
        assert_eq!(0, fee.days_overdue);
        assert_eq!(0.0, fee.fee_amount);
        assert_eq!(FeeStatus::NotOverdue, fee.status);
        // less than a whole day late is not overdue yet
        let fee = calc.compute(due(), due() + Duration::hours(23));
        assert_eq!(0, fee.days_overdue);
        assert!(!fee.is_due());
    }

    #[tokio::test]
    async fn test_should_charge_first_tier() {
        let calc = LateFeeCalculator::default();
        let fee = calc.compute(due(), due() + Duration::days(3));
        assert_eq!(3, fee.days_overdue);
        assert_eq!(1.5, fee.fee_amount);
        let fee = calc.compute(due(), due() + Duration::days(7));
        assert_eq!("3.50", fee.formatted());
    }

    #[tokio::test]
    async fn test_should_charge_second_tier_for_ten_days() {
        let fee = LateFeeCalculator::default().compute(due(), due() + Duration::days(10));
        assert_eq!(10, fee.days_overdue);
        assert_eq!(6.5, fee.fee_amount);
        assert_eq!("6.50", fee.formatted());
        assert_eq!(FeeStatus::Overdue, fee.status);
    }

    #[tokio::test]
    async fn test_should_cap_fee_for_forty_days() {
        let fee = LateFeeCalculator::default().compute(due(), due() + Duration::days(40));
        assert_eq!(40, fee.days_overdue);
        assert_eq!(15.0, fee.fee_amount);
        assert_eq!("15.00", fee.formatted());
        assert_eq!(FeeStatus::Capped, fee.status);
    }

    #[tokio::test]
    async fn test_should_be_monotonic_until_cap() {
        let calc = LateFeeCalculator::default();
        let mut last = 0;
        for days in -5..60 {
            let cents = calc.fee_cents(days);
            assert!(cents >= last, "fee dropped at day {}", days);
            assert!(cents <= 1500);
            last = cents;
        }
        assert_eq!(1500, calc.fee_cents(19));
        assert_eq!(1450, calc.fee_cents(18));
    }
}
