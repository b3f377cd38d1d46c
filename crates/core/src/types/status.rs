//! Status enums for orders.
//!
//! The backend reports statuses as free-form labels ("Paid", "Shipped", ...).
//! Known labels map to variants; anything else is preserved verbatim in
//! `Other` so it can still be displayed and sent back unchanged.

use serde::{Deserialize, Serialize};

/// Order payment status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Failed,
    Refunded,
    Other(String),
}

impl PaymentStatus {
    /// Label as reported by the backend.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Paid => "Paid",
            Self::Pending => "Pending",
            Self::Failed => "Failed",
            Self::Refunded => "Refunded",
            Self::Other(label) => label,
        }
    }

    /// Whether payment has been captured.
    #[must_use]
    pub const fn is_paid(&self) -> bool {
        matches!(self, Self::Paid)
    }
}

impl From<String> for PaymentStatus {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Paid" => Self::Paid,
            "Pending" => Self::Pending,
            "Failed" => Self::Failed,
            "Refunded" => Self::Refunded,
            _ => Self::Other(label),
        }
    }
}

impl From<PaymentStatus> for String {
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order fulfillment status.
///
/// Staff can move an order between the four known states.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    /// Statuses offered in the staff status selector, in display order.
    pub const SELECTABLE: [Self; 4] = [
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Label as reported by the backend.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Processing" => Self::Processing,
            "Shipped" => Self::Shipped,
            "Delivered" => Self::Delivered,
            "Cancelled" => Self::Cancelled,
            _ => Self::Other(label),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_status_roundtrips_unknown_labels() {
        let status: PaymentStatus = serde_json::from_str("\"Awaiting COD\"").unwrap();
        assert_eq!(status, PaymentStatus::Other("Awaiting COD".to_string()));
        assert!(!status.is_paid());
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"Awaiting COD\"");
    }

    #[test]
    fn test_payment_status_is_case_sensitive() {
        assert!(PaymentStatus::from("Paid".to_string()).is_paid());
        assert!(!PaymentStatus::from("paid".to_string()).is_paid());
    }

    #[test]
    fn test_order_status_parse_and_display() {
        let status: OrderStatus = "Shipped".parse().unwrap();
        assert_eq!(status, OrderStatus::Shipped);
        assert_eq!(status.to_string(), "Shipped");
        assert_eq!(OrderStatus::SELECTABLE.len(), 4);
    }
}
