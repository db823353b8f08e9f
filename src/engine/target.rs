//! Savings target calculator
//!
//! Sizes the savings-goal bucket from a duration picker: the goal is a number
//! of months of essential spending, reached by equal monthly contributions
//! over a fixed savings horizon.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PlannerError, PlannerResult};
use crate::models::Money;

/// Months of essential spending the savings goal should cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum SavingsDuration {
    ThreeMonths,
    SixMonths,
    TwelveMonths,
}

impl SavingsDuration {
    pub const ALL: [SavingsDuration; 3] = [Self::ThreeMonths, Self::SixMonths, Self::TwelveMonths];

    pub fn months(&self) -> u32 {
        match self {
            Self::ThreeMonths => 3,
            Self::SixMonths => 6,
            Self::TwelveMonths => 12,
        }
    }

    /// Interpret a raw picker value
    ///
    /// Only exactly 3, 6 or 12 are accepted; fractions, NaN and anything else
    /// fail with `InvalidDuration`.
    pub fn from_raw(value: f64) -> PlannerResult<Self> {
        if value.fract() != 0.0 || !value.is_finite() || value < 0.0 || value > u32::MAX as f64 {
            return Err(PlannerError::InvalidDuration(value.to_string()));
        }
        Self::try_from(value as u32)
    }
}

impl TryFrom<u32> for SavingsDuration {
    type Error = PlannerError;

    fn try_from(months: u32) -> Result<Self, Self::Error> {
        match months {
            3 => Ok(Self::ThreeMonths),
            6 => Ok(Self::SixMonths),
            12 => Ok(Self::TwelveMonths),
            other => Err(PlannerError::InvalidDuration(other.to_string())),
        }
    }
}

impl From<SavingsDuration> for u32 {
    fn from(duration: SavingsDuration) -> Self {
        duration.months()
    }
}

impl fmt::Display for SavingsDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} months", self.months())
    }
}

/// Result of sizing a savings goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsTarget {
    pub duration: SavingsDuration,
    /// Total amount to have saved
    pub target: Money,
    /// What the savings-goal bucket should receive each month
    pub monthly_contribution: Money,
}

/// Calculator bound to a savings horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetCalculator {
    horizon_months: u32,
}

impl TargetCalculator {
    /// Create a calculator; the horizon must be at least one month
    pub fn new(horizon_months: u32) -> PlannerResult<Self> {
        if horizon_months == 0 {
            return Err(PlannerError::Config(
                "Savings horizon must be at least one month".into(),
            ));
        }
        Ok(Self { horizon_months })
    }

    pub fn horizon_months(&self) -> u32 {
        self.horizon_months
    }

    /// Size a savings goal from monthly essential spending
    ///
    /// ```
    /// use bucket_planner::engine::{SavingsDuration, TargetCalculator};
    /// use bucket_planner::models::Money;
    ///
    /// let calc = TargetCalculator::new(24).unwrap();
    /// let result = calc.compute(SavingsDuration::TwelveMonths, Money::from_units(1500));
    /// assert_eq!(result.target, Money::from_units(18000));
    /// assert_eq!(result.monthly_contribution, Money::from_units(750));
    /// ```
    pub fn compute(&self, duration: SavingsDuration, essential_monthly: Money) -> SavingsTarget {
        let target = essential_monthly.times(duration.months() as i64);
        let monthly_contribution = target.div_round(self.horizon_months as i64);

        tracing::debug!(
            %duration,
            %target,
            %monthly_contribution,
            horizon = self.horizon_months,
            "computed savings target"
        );

        SavingsTarget {
            duration,
            target,
            monthly_contribution,
        }
    }
}
