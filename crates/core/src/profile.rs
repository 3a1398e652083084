//! User profile classification

use serde::{Deserialize, Serialize};

/// User profile for personalized responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserProfile {
    /// Merchant evaluating the products for the first time
    NewMerchant,
    /// Already using one of the products
    ExistingCustomer,
    /// Developer or integrator asking technical questions
    TechnicalUser,
    /// Investor or analyst
    Investor,
    /// Partner or reseller
    Partner,
    /// Everyone else
    #[default]
    General,
}

impl UserProfile {
    /// Get profile display name
    pub fn display_name(&self) -> &'static str {
        match self {
            UserProfile::NewMerchant => "New Merchant",
            UserProfile::ExistingCustomer => "Existing Customer",
            UserProfile::TechnicalUser => "Technical User",
            UserProfile::Investor => "Investor",
            UserProfile::Partner => "Partner",
            UserProfile::General => "General",
        }
    }
}

impl std::fmt::Display for UserProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        assert_eq!(UserProfile::default(), UserProfile::General);
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&UserProfile::NewMerchant).unwrap();
        assert_eq!(json, "\"new_merchant\"");
    }
}
