//! Bucket model
//!
//! A bucket is one named slot of the monthly income. Whether it may be edited
//! is decided entirely by its kind.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BucketId;
use super::money::Money;

/// Kind of bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketKind {
    /// Essential spending, derived from transaction history (locked)
    Essential,
    /// Flexible day-to-day spending
    Discretionary,
    /// Emergency fund / savings target sized from a duration
    SavingsGoal,
    /// Long-term investing
    Investments,
    /// Extra debt repayment
    Debt,
}

impl BucketKind {
    /// All kinds, in display order
    pub const ALL: [BucketKind; 5] = [
        Self::Essential,
        Self::Discretionary,
        Self::SavingsGoal,
        Self::Investments,
        Self::Debt,
    ];

    /// Returns true if buckets of this kind are computed externally
    pub fn is_locked(&self) -> bool {
        match self {
            Self::Essential => true,
            Self::Discretionary | Self::SavingsGoal | Self::Investments | Self::Debt => false,
        }
    }

    /// Returns true if the rebalance engine may change buckets of this kind
    pub fn is_modifiable(&self) -> bool {
        !self.is_locked()
    }

    /// Returns true if this kind is sized by the duration picker
    pub fn is_duration_based(&self) -> bool {
        matches!(self, Self::SavingsGoal)
    }

    /// Short badge shown next to the bucket name
    pub fn badge(&self) -> &'static str {
        match self {
            Self::Essential => "LOCKED",
            Self::Discretionary => "FLEX",
            Self::SavingsGoal => "GOAL",
            Self::Investments => "INVEST",
            Self::Debt => "DEBT",
        }
    }

    /// Parse bucket kind from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "essential" | "essentials" | "needs" => Some(Self::Essential),
            "discretionary" | "wants" | "flex" => Some(Self::Discretionary),
            "savings_goal" | "savings-goal" | "savingsgoal" | "goal" | "savings" => {
                Some(Self::SavingsGoal)
            }
            "investments" | "investment" | "invest" => Some(Self::Investments),
            "debt" => Some(Self::Debt),
            _ => None,
        }
    }
}

impl fmt::Display for BucketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Essential => write!(f, "Essential"),
            Self::Discretionary => write!(f, "Discretionary"),
            Self::SavingsGoal => write!(f, "Savings Goal"),
            Self::Investments => write!(f, "Investments"),
            Self::Debt => write!(f, "Debt"),
        }
    }
}

/// One allocation slot of a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub id: BucketId,

    #[serde(rename = "type")]
    pub kind: BucketKind,

    pub amount: Money,
}

impl Bucket {
    /// Create a new bucket
    pub fn new(id: impl Into<BucketId>, kind: BucketKind, amount: Money) -> Self {
        Self {
            id: id.into(),
            kind,
            amount,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.kind.is_locked()
    }

    pub fn is_modifiable(&self) -> bool {
        self.kind.is_modifiable()
    }

    /// Copy of this bucket holding a different amount
    pub fn with_amount(&self, amount: Money) -> Self {
        Self {
            amount,
            ..self.clone()
        }
    }
}
