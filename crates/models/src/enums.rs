//! String-backed enumerations shared by entities and wire models.

use std::fmt;
use std::str::FromStr;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum Role {
    #[sea_orm(string_value = "Admin")]
    Admin,
    #[sea_orm(string_value = "Staff")]
    Staff,
    #[sea_orm(string_value = "Customer")]
    Customer,
    #[sea_orm(string_value = "LaundryStore")]
    LaundryStore,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Staff => "Staff",
            Role::Customer => "Customer",
            Role::LaundryStore => "LaundryStore",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(Role::Admin),
            "Staff" => Ok(Role::Staff),
            "Customer" => Ok(Role::Customer),
            "LaundryStore" => Ok(Role::LaundryStore),
            other => Err(ModelError::Validation(format!("unknown role: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum TimeFrame {
    #[sea_orm(string_value = "Morning")]
    Morning,
    #[sea_orm(string_value = "Afternoon")]
    Afternoon,
    #[sea_orm(string_value = "Evening")]
    Evening,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum OrderType {
    #[sea_orm(string_value = "OneWay")]
    OneWay,
    #[sea_orm(string_value = "TwoWay")]
    TwoWay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum PaymentType {
    #[sea_orm(string_value = "Cash")]
    Cash,
    #[sea_orm(string_value = "EWallet")]
    EWallet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum AllowedTransactionType {
    #[sea_orm(string_value = "Deposit")]
    Deposit,
    #[sea_orm(string_value = "Withdraw")]
    Withdraw,
    #[sea_orm(string_value = "Payment")]
    Payment,
    #[sea_orm(string_value = "Refund")]
    Refund,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum TripType {
    #[sea_orm(string_value = "Pickup")]
    Pickup,
    #[sea_orm(string_value = "Delivery")]
    Delivery,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Iterable;

    #[test]
    fn role_round_trips_through_str() {
        for role in Role::iter() {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn enums_serialize_as_variant_names() {
        assert_eq!(serde_json::to_string(&PaymentType::EWallet).unwrap(), "\"EWallet\"");
        assert_eq!(serde_json::to_string(&TripType::Pickup).unwrap(), "\"Pickup\"");
        assert_eq!(TimeFrame::Evening.to_value(), "Evening".to_string());
    }
}
