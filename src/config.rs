use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{InvestmentError, Result};
use crate::types::PackageId;

/// investment package definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageConfig {
    pub id: PackageId,
    pub name: String,
    pub minimum_investment: Money,
    pub daily_rate: Rate,
    pub duration_days: u32,
    pub description: Option<String>,
}

impl PackageConfig {
    pub fn new(
        id: PackageId,
        name: impl Into<String>,
        minimum_investment: Money,
        daily_rate: Rate,
        duration_days: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            minimum_investment,
            daily_rate,
            duration_days,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// create gold package configuration
    pub fn gold() -> Self {
        Self::new(1, "Gold Package", Money::from_major(1_000), Rate::from_percent_decimal(dec!(4.50)), 30)
            .with_description("Perfect for beginners")
    }

    /// create platinum package configuration
    pub fn platinum() -> Self {
        Self::new(2, "Platinum Package", Money::from_major(2_500), Rate::from_percent_decimal(dec!(8.50)), 30)
            .with_description("For serious investors")
    }

    /// create diamond package configuration
    pub fn diamond() -> Self {
        Self::new(3, "Diamond Package", Money::from_major(5_000), Rate::from_percent_decimal(dec!(15.00)), 30)
            .with_description("Premium investment opportunity")
    }

    pub fn validate(&self) -> Result<()> {
        if self.duration_days == 0 {
            return Err(InvestmentError::InvalidConfiguration {
                message: format!("package {} has zero duration", self.id),
            });
        }
        if self.minimum_investment.is_negative() {
            return Err(InvestmentError::InvalidConfiguration {
                message: format!("package {} has a negative minimum investment", self.id),
            });
        }
        if self.daily_rate.is_negative() {
            return Err(InvestmentError::InvalidConfiguration {
                message: format!("package {} has a negative daily rate", self.id),
            });
        }
        Ok(())
    }
}

/// the set of packages offered to users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageCatalog {
    packages: Vec<PackageConfig>,
}

impl PackageCatalog {
    /// build a catalog, rejecting invalid or duplicate packages
    pub fn new(packages: Vec<PackageConfig>) -> Result<Self> {
        for (i, package) in packages.iter().enumerate() {
            package.validate()?;
            if packages[..i].iter().any(|p| p.id == package.id) {
                return Err(InvestmentError::InvalidConfiguration {
                    message: format!("duplicate package id {}", package.id),
                });
            }
        }
        Ok(Self { packages })
    }

    /// load a catalog from a json array of packages
    pub fn from_json(json: &str) -> Result<Self> {
        let packages: Vec<PackageConfig> =
            serde_json::from_str(json).map_err(|e| InvestmentError::InvalidConfiguration {
                message: e.to_string(),
            })?;
        Self::new(packages)
    }

    pub fn find(&self, id: PackageId) -> Option<&PackageConfig> {
        self.packages.iter().find(|p| p.id == id)
    }

    pub fn get(&self, id: PackageId) -> Result<&PackageConfig> {
        self.find(id).ok_or(InvestmentError::PackageNotFound { id })
    }

    pub fn packages(&self) -> &[PackageConfig] {
        &self.packages
    }
}

impl Default for PackageCatalog {
    fn default() -> Self {
        Self {
            packages: vec![
                PackageConfig::gold(),
                PackageConfig::platinum(),
                PackageConfig::diamond(),
            ],
        }
    }
}

/// longest profit signal window, one year including a leap day
pub const MAX_SIGNAL_WINDOW_DAYS: u32 = 366;

/// accrual engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// number of days in the profit signal window
    pub signal_window_days: u32,
    /// divisor used for the cosmetic signal percentage label
    pub percentage_scale: Decimal,
    /// decimal places for amounts at the json boundary
    pub display_dp: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            signal_window_days: 7,
            percentage_scale: dec!(1000),
            display_dp: 2,
        }
    }
}

impl EngineConfig {
    pub fn with_window(mut self, days: u32) -> Self {
        self.signal_window_days = days;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.percentage_scale <= Decimal::ZERO {
            return Err(InvestmentError::InvalidConfiguration {
                message: "percentage scale must be positive".to_string(),
            });
        }
        if self.signal_window_days > MAX_SIGNAL_WINDOW_DAYS {
            return Err(InvestmentError::InvalidConfiguration {
                message: format!(
                    "signal window of {} days exceeds {MAX_SIGNAL_WINDOW_DAYS}",
                    self.signal_window_days
                ),
            });
        }
        Ok(())
    }
}
