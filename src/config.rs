//! TOML-based tariff table loading and validation.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tariff::{FixedChargeRule, PpcaRule, Slab, TariffRegistry, TariffSchedule, builtin};

/// A tariff table as written in TOML.
///
/// ```toml
/// version = "FY2025-26"
///
/// [[schedule]]
/// utility = "adani"
/// network = "direct"
/// category = "residential"
/// # ...
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TariffConfig {
    /// Label identifying the tariff order revision.
    pub version: String,
    #[serde(default, rename = "schedule")]
    pub schedules: Vec<TariffSchedule>,
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"schedule[0].slabs[2].up_to"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl TariffConfig {
    /// Returns the compiled-in table.
    pub fn builtin() -> Self {
        Self {
            version: builtin::VERSION.to_string(),
            schedules: builtin::schedules(),
        }
    }

    /// Parses a tariff table from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("tariffs", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a tariff table from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates every schedule and returns all problems found.
    ///
    /// Returns an empty vector if the table is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.version.trim().is_empty() {
            errors.push(ConfigError::new("version", "must not be empty"));
        }
        if self.schedules.is_empty() {
            errors.push(ConfigError::new("schedule", "at least one schedule is required"));
        }

        let mut seen = BTreeSet::new();
        for (i, schedule) in self.schedules.iter().enumerate() {
            let path = format!("schedule[{i}]");
            if !seen.insert(schedule.key()) {
                errors.push(ConfigError::new(
                    &path,
                    format!("duplicate schedule for {}", schedule.key()),
                ));
            }
            validate_schedule(&path, schedule, &mut errors);
        }

        errors
    }

    /// Validates the table and freezes it into a registry.
    ///
    /// # Errors
    ///
    /// Returns every validation problem if the table is invalid.
    pub fn into_registry(self) -> Result<TariffRegistry, Vec<ConfigError>> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(TariffRegistry::from_schedules(self.version, self.schedules))
    }
}

fn non_negative(errors: &mut Vec<ConfigError>, field: String, value: f64) {
    if !value.is_finite() || value < 0.0 {
        errors.push(ConfigError::new(field, format!("must be a finite value >= 0, got {value}")));
    }
}

fn validate_schedule(path: &str, s: &TariffSchedule, errors: &mut Vec<ConfigError>) {
    if !s.loss_factor.is_finite() || s.loss_factor < 1.0 {
        errors.push(ConfigError::new(
            format!("{path}.loss_factor"),
            format!("must be >= 1.0, got {}", s.loss_factor),
        ));
    }
    validate_slabs(&format!("{path}.slabs"), &s.slabs, errors);
    non_negative(errors, format!("{path}.wheeling_rate"), s.wheeling_rate);
    non_negative(errors, format!("{path}.solar_rebate_rate"), s.solar_rebate_rate);
    non_negative(errors, format!("{path}.duty_percent"), s.duty_percent);
    non_negative(errors, format!("{path}.tose_rate"), s.tose_rate);

    match &s.fixed_charge {
        FixedChargeRule::Tiered { tiers, three_phase } => {
            let fc = format!("{path}.fixed_charge.tiers");
            if tiers.is_empty() {
                errors.push(ConfigError::new(&fc, "at least one tier is required"));
            }
            let mut prev = 0.0_f64;
            for (j, tier) in tiers.iter().enumerate() {
                let last = j + 1 == tiers.len();
                match (tier.up_to, last) {
                    (None, false) => errors.push(ConfigError::new(
                        format!("{fc}[{j}].up_to"),
                        "only the last tier may be unbounded",
                    )),
                    (Some(_), true) => errors.push(ConfigError::new(
                        format!("{fc}[{j}].up_to"),
                        "last tier must be unbounded (omit up_to)",
                    )),
                    (Some(up_to), false) if !up_to.is_finite() || up_to <= prev => {
                        errors.push(ConfigError::new(
                            format!("{fc}[{j}].up_to"),
                            format!("must be finite and > {prev}, got {up_to}"),
                        ));
                    }
                    _ => {}
                }
                prev = tier.up_to.unwrap_or(prev);
                non_negative(errors, format!("{fc}[{j}].amount"), tier.amount);
            }
            if let Some(amount) = three_phase {
                non_negative(errors, format!("{path}.fixed_charge.three_phase"), *amount);
            }
        }
        FixedChargeRule::Flat {
            single_phase,
            three_phase,
        } => {
            non_negative(errors, format!("{path}.fixed_charge.single_phase"), *single_phase);
            non_negative(errors, format!("{path}.fixed_charge.three_phase"), *three_phase);
        }
        FixedChargeRule::Demand {
            rate_per_kw,
            bmd_fraction,
            penalty_multiplier,
        } => {
            non_negative(errors, format!("{path}.fixed_charge.rate_per_kw"), *rate_per_kw);
            if !(0.0..=1.0).contains(bmd_fraction) {
                errors.push(ConfigError::new(
                    format!("{path}.fixed_charge.bmd_fraction"),
                    "must be in [0.0, 1.0]",
                ));
            }
            if !penalty_multiplier.is_finite() || *penalty_multiplier < 1.0 {
                errors.push(ConfigError::new(
                    format!("{path}.fixed_charge.penalty_multiplier"),
                    "must be >= 1.0",
                ));
            }
        }
    }

    if let Some(rule) = &s.additional_load {
        non_negative(errors, format!("{path}.additional_load.threshold_kw"), rule.threshold_kw);
        if !rule.block_kw.is_finite() || rule.block_kw <= 0.0 {
            errors.push(ConfigError::new(
                format!("{path}.additional_load.block_kw"),
                "must be > 0",
            ));
        }
        non_negative(
            errors,
            format!("{path}.additional_load.charge_per_block"),
            rule.charge_per_block,
        );
    }

    match &s.ppca {
        PpcaRule::None => {}
        PpcaRule::Flat { rate } => non_negative(errors, format!("{path}.ppca.rate"), *rate),
        PpcaRule::Slabbed { slabs } => validate_slabs(&format!("{path}.ppca.slabs"), slabs, errors),
    }

    if let Some(floor) = &s.ppca_floor {
        non_negative(errors, format!("{path}.ppca_floor.below_units"), floor.below_units);
        non_negative(errors, format!("{path}.ppca_floor.amount"), floor.amount);
    }
}

/// Slabs must ascend strictly and end with exactly one unbounded slab.
fn validate_slabs(path: &str, slabs: &[Slab], errors: &mut Vec<ConfigError>) {
    if slabs.is_empty() {
        errors.push(ConfigError::new(path, "at least one slab is required"));
        return;
    }
    let mut prev = 0.0_f64;
    for (j, slab) in slabs.iter().enumerate() {
        let last = j + 1 == slabs.len();
        match (slab.up_to, last) {
            (None, false) => errors.push(ConfigError::new(
                format!("{path}[{j}].up_to"),
                "only the last slab may be unbounded",
            )),
            (Some(_), true) => errors.push(ConfigError::new(
                format!("{path}[{j}].up_to"),
                "last slab must be unbounded (omit up_to)",
            )),
            (Some(up_to), false) if !up_to.is_finite() || up_to <= prev => {
                errors.push(ConfigError::new(
                    format!("{path}[{j}].up_to"),
                    format!("must be finite and > {prev}, got {up_to}"),
                ));
            }
            _ => {}
        }
        prev = slab.up_to.unwrap_or(prev);
        non_negative(errors, format!("{path}[{j}].rate"), slab.rate);
    }
}
