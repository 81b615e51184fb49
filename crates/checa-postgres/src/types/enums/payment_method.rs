//! Payment method enumeration for receipt metadata.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Payment method declared on an uploaded payment receipt.
///
/// Unlike the other enums this one is not a PostgreSQL type: it lives inside
/// the JSON payload embedded in a receipt document's note column, so it only
/// needs serde and string conversions.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PaymentMethod {
    /// Electronic funds transfer
    #[default]
    Eft,

    /// Internal vote (research grant) transfer
    VoteTransfer,

    /// University local purchase order
    LocalOrder,

    /// Over-the-counter cash payment
    Cash,
}

impl PaymentMethod {
    /// Returns the wire name as stored inside receipt metadata.
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Eft => "eft",
            PaymentMethod::VoteTransfer => "vote_transfer",
            PaymentMethod::LocalOrder => "local_order",
            PaymentMethod::Cash => "cash",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn wire_names() {
        assert_eq!(PaymentMethod::Eft.as_str(), "eft");
        assert_eq!(PaymentMethod::VoteTransfer.as_str(), "vote_transfer");
        assert_eq!(
            serde_json::to_string(&PaymentMethod::LocalOrder).unwrap(),
            "\"local_order\""
        );
    }

    #[test]
    fn from_str_matches_serde() {
        assert_eq!(
            PaymentMethod::from_str("vote_transfer").unwrap(),
            PaymentMethod::VoteTransfer
        );
        assert!(PaymentMethod::from_str("bitcoin").is_err());
    }

    #[test]
    fn default_is_eft() {
        assert_eq!(PaymentMethod::default(), PaymentMethod::Eft);
    }
}
