//! Status enums for various entities.

use serde::{Deserialize, Serialize};

/// Lifecycle of an [`Order`](crate::order::Order).
///
/// ```text
/// Pending ──pay──▶ Paid ──ship──▶ Shipped ──deliver──▶ Delivered
///    │  ╲                │
///    │   ╲─decline─▶ Payment Failed ──pay (retry)──▶ Paid
///    │                   │
///    └────── cancel ─────┴──▶ Cancelled   (also from Paid)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    PaymentFailed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Whether a payment attempt is allowed from this status.
    #[must_use]
    pub const fn can_pay(self) -> bool {
        matches!(self, Self::Pending | Self::PaymentFailed)
    }

    /// Whether the order may still be cancelled.
    #[must_use]
    pub const fn can_cancel(self) -> bool {
        matches!(self, Self::Pending | Self::Paid | Self::PaymentFailed)
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Paid => "Paid",
            Self::PaymentFailed => "Payment Failed",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether an account can transact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    #[default]
    Active,
    Locked,
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Locked => write!(f, "Locked"),
        }
    }
}
