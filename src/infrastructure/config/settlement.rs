//! Default settlement policy.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::distribution::DistributionPolicy;
use crate::error::{ConfigError, Result};

/// Policy names accepted in the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyName {
    #[default]
    Equal,
    Proportional,
    Odds,
}

/// `[settlement]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SettlementConfig {
    pub policy: PolicyName,
    /// Multiplier used when `policy = "odds"`.
    pub odds: Decimal,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            policy: PolicyName::Equal,
            odds: Decimal::new(19, 1),
        }
    }
}

impl SettlementConfig {
    /// The configured default policy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the odds policy is chosen
    /// with odds that are not positive.
    pub fn policy(&self) -> Result<DistributionPolicy> {
        Ok(match self.policy {
            PolicyName::Equal => DistributionPolicy::Equal,
            PolicyName::Proportional => DistributionPolicy::Proportional,
            PolicyName::Odds => {
                DistributionPolicy::odds(self.odds).map_err(|e| ConfigError::InvalidValue {
                    field: "settlement.odds",
                    reason: e.to_string(),
                })?
            }
        })
    }
}
