//! Four-band risk category with a total order.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity band assigned to a scored day. Variants are declared in
/// escalation order so the derived `Ord` is the clinical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    Green,
    Yellow,
    Orange,
    Red,
}

impl RiskCategory {
    /// All categories, lowest first.
    pub const ALL: [RiskCategory; 4] = [Self::Green, Self::Yellow, Self::Orange, Self::Red];

    /// Upper (exclusive) severity bounds for Green, Yellow and Orange.
    pub const BAND_LIMITS: [f64; 3] = [2.0, 4.5, 7.5];

    /// Band a severity value. Shared by the engine and the reference oracle.
    pub fn from_severity(value: f64) -> Self {
        let [green, yellow, orange] = Self::BAND_LIMITS;
        if value < green {
            Self::Green
        } else if value < yellow {
            Self::Yellow
        } else if value < orange {
            Self::Orange
        } else {
            Self::Red
        }
    }

    pub fn rank(self) -> usize {
        self as usize
    }

    /// Inverse of [`rank`](Self::rank); ranks past Red saturate.
    pub fn from_rank(rank: usize) -> Self {
        Self::ALL[rank.min(Self::ALL.len() - 1)]
    }

    /// Raise to `floor` if currently below it. Never lowers the category.
    pub fn at_least(self, floor: Self) -> Self {
        self.max(floor)
    }

    /// Orange and Red are the "unsafe" bands guarded by de-escalation hysteresis.
    pub fn is_escalated(self) -> bool {
        matches!(self, Self::Orange | Self::Red)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Green => "Green",
            Self::Yellow => "Yellow",
            Self::Orange => "Orange",
            Self::Red => "Red",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
