//! Electricity duty and tax on sale of electricity.

use crate::bill::types::{Surcharges, Taxes};
use crate::tariff::TariffSchedule;

/// Pre-tax subtotal the electricity duty is charged on, floored at zero.
///
/// TOSE is never part of the base.
pub fn duty_base(energy_total: f64, surcharges: &Surcharges) -> f64 {
    let base = energy_total
        + surcharges.wheeling
        + surcharges.fixed
        + surcharges.additional_load
        + surcharges.ppca
        + surcharges.demand_penalty
        - surcharges.solar_rebate;
    base.max(0.0)
}

/// Duty as a percentage of `duty_base`, TOSE per billed unit.
pub fn compute_taxes(duty_base: f64, billed_units: f64, schedule: &TariffSchedule) -> Taxes {
    Taxes {
        duty_base,
        duty: duty_base * schedule.duty_percent / 100.0,
        tose: billed_units * schedule.tose_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tariff::{Category, NetworkType, TariffKey, TariffRegistry, Utility};
    use approx::assert_relative_eq;

    fn schedule() -> TariffSchedule {
        let key = TariffKey::new(Utility::Adani, NetworkType::Direct, Category::Residential);
        TariffRegistry::builtin().resolve(key).unwrap().clone()
    }

    #[test]
    fn duty_base_sums_pre_tax_components() {
        let s = Surcharges {
            wheeling: 690.0,
            fixed: 135.0,
            additional_load: 10.0,
            ppca: 20.0,
            demand_penalty: 5.0,
            solar_rebate: 40.0,
            ..Surcharges::default()
        };
        assert_relative_eq!(duty_base(980.0, &s), 1800.0, epsilon = 1e-9);
    }

    #[test]
    fn duty_base_clamps_at_zero() {
        let s = Surcharges {
            solar_rebate: 5_000.0,
            ..Surcharges::default()
        };
        assert_eq!(duty_base(100.0, &s), 0.0);
    }

    #[test]
    fn duty_and_tose_from_schedule() {
        let taxes = compute_taxes(1805.0, 250.0, &schedule());
        assert_relative_eq!(taxes.duty, 288.8, epsilon = 1e-9);
        assert_relative_eq!(taxes.tose, 250.0 * 0.2604, epsilon = 1e-9);
        assert_eq!(taxes.duty_base, 1805.0);
    }
}
