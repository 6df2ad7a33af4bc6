//! Read-only lookup of tariff schedules by key.

use std::collections::BTreeMap;

use tracing::debug;

use super::builtin;
use super::types::{TariffKey, TariffSchedule};
use crate::bill::error::BillError;

/// Versioned, immutable set of tariff schedules.
///
/// Built once at startup and never mutated, so it can be shared across
/// threads behind an `Arc` without locking.
///
/// # Examples
///
/// ```
/// use mumbai_bill::tariff::{Category, NetworkType, TariffKey, TariffRegistry, Utility};
///
/// let registry = TariffRegistry::builtin();
/// let key = TariffKey::new(Utility::Adani, NetworkType::Direct, Category::Residential);
/// assert!(registry.resolve(key).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TariffRegistry {
    version: String,
    schedules: BTreeMap<TariffKey, TariffSchedule>,
}

impl TariffRegistry {
    /// Builds a registry from already validated schedules.
    ///
    /// A later schedule with the same key replaces an earlier one; use
    /// [`crate::config::TariffConfig::into_registry`] to reject duplicates.
    pub fn from_schedules(version: impl Into<String>, schedules: Vec<TariffSchedule>) -> Self {
        Self {
            version: version.into(),
            schedules: schedules.into_iter().map(|s| (s.key(), s)).collect(),
        }
    }

    /// Returns the compiled-in FY 2025-26 table.
    pub fn builtin() -> Self {
        Self::from_schedules(builtin::VERSION, builtin::schedules())
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = TariffKey> + '_ {
        self.schedules.keys().copied()
    }

    /// Registered schedules in key order.
    pub fn schedules(&self) -> impl Iterator<Item = &TariffSchedule> {
        self.schedules.values()
    }

    /// Looks up the schedule for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`BillError::UnknownTariff`] if no schedule is registered for
    /// the combination. No fallback schedule is substituted.
    pub fn resolve(&self, key: TariffKey) -> Result<&TariffSchedule, BillError> {
        let schedule = self
            .schedules
            .get(&key)
            .ok_or_else(|| BillError::UnknownTariff {
                utility: key.utility.to_string(),
                network: key.network.to_string(),
                category: key.category.to_string(),
            })?;
        debug!(tariff = %key, version = %self.version, "resolved tariff schedule");
        Ok(schedule)
    }
}
