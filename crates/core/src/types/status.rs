//! Status and role enums for marketplace entities.

use serde::{Deserialize, Serialize};

/// Role a user account plays in the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// A shopper who places orders.
    #[default]
    Default,
    /// A seller who owns items and discounts.
    Merchant,
    /// Marketplace administrator.
    Admin,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Merchant => write!(f, "merchant"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "merchant" => Ok(Self::Merchant),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

/// Order lifecycle status.
///
/// Orders start `pending`, become `packaged` once every item is fulfilled and
/// `shipped` when they leave the warehouse. `cancelled` is terminal and never
/// counts toward sales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Packaged,
    Shipped,
    Cancelled,
}

impl OrderStatus {
    /// Statuses whose fulfilled items count as revenue.
    pub const SOLD: &'static [Self] = &[Self::Shipped];

    /// Statuses whose fulfilled items count as completed fulfillment work.
    pub const NON_CANCELLED_FULFILLMENT: &'static [Self] = &[Self::Packaged, Self::Shipped];
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Packaged => write!(f, "packaged"),
            Self::Shipped => write!(f, "shipped"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "packaged" => Ok(Self::Packaged),
            "shipped" => Ok(Self::Shipped),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip_through_strings() {
        for role in [UserRole::Default, UserRole::Merchant, UserRole::Admin] {
            assert_eq!(role.to_string().parse::<UserRole>().unwrap(), role);
        }
        assert!("owner".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_status_serde_is_snake_case() {
        let json = serde_json::to_string(&OrderStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");

        let parsed: OrderStatus = serde_json::from_str("\"packaged\"").unwrap();
        assert_eq!(parsed, OrderStatus::Packaged);
    }

    #[test]
    fn test_status_sets() {
        assert!(!OrderStatus::SOLD.contains(&OrderStatus::Packaged));
        assert!(OrderStatus::NON_CANCELLED_FULFILLMENT.contains(&OrderStatus::Packaged));
        assert!(!OrderStatus::NON_CANCELLED_FULFILLMENT.contains(&OrderStatus::Cancelled));
    }
}
