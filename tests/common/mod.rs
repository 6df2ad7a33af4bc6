//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use mumbai_bill::bill::BillInput;
use mumbai_bill::tariff::{
    Category, FixedChargeRule, FixedTier, NetworkType, PpcaRule, Slab, SlabBasis, TariffRegistry,
    TariffSchedule, UnitBasis, Utility,
};

/// Tata-Power-style residential schedule with hand-checkable rates
/// (2.00 / 5.20 slabs, 2.76 wheeling, 16% duty, 0.3594 TOSE).
pub fn reference_residential(network: NetworkType) -> TariffSchedule {
    TariffSchedule {
        utility: Utility::TataPower,
        network,
        category: Category::Residential,
        loss_factor: match network {
            NetworkType::Direct => 1.0,
            NetworkType::Welcome => 1.05785,
        },
        slabs: vec![
            Slab::bounded(100.0, 2.00),
            Slab::bounded(300.0, 5.20),
            Slab::bounded(500.0, 10.04),
            Slab::unbounded(11.25),
        ],
        slab_basis: SlabBasis::BilledUnits,
        wheeling_rate: 2.76,
        wheeling_basis: UnitBasis::Billed,
        fixed_charge: FixedChargeRule::Tiered {
            tiers: vec![
                FixedTier {
                    up_to: Some(100.0),
                    amount: 90.0,
                },
                FixedTier {
                    up_to: Some(500.0),
                    amount: 135.0,
                },
                FixedTier {
                    up_to: None,
                    amount: 160.0,
                },
            ],
            three_phase: Some(160.0),
        },
        additional_load: None,
        ppca: PpcaRule::None,
        ppca_floor: None,
        solar_rebate_rate: 1.0,
        duty_percent: 16.0,
        tose_rate: 0.3594,
    }
}

/// Commercial demand-charge schedule at 470 INR/kW, 21% duty.
pub fn reference_commercial() -> TariffSchedule {
    TariffSchedule {
        category: Category::Commercial,
        slabs: vec![Slab::bounded(500.0, 7.90), Slab::unbounded(9.40)],
        fixed_charge: FixedChargeRule::Demand {
            rate_per_kw: 470.0,
            bmd_fraction: 0.75,
            penalty_multiplier: 1.5,
        },
        duty_percent: 21.0,
        ..reference_residential(NetworkType::Direct)
    }
}

/// Registry holding the three reference schedules.
pub fn reference_registry() -> TariffRegistry {
    TariffRegistry::from_schedules(
        "reference",
        vec![
            reference_residential(NetworkType::Direct),
            reference_residential(NetworkType::Welcome),
            reference_commercial(),
        ],
    )
}

pub fn residential(network: NetworkType, metered_units: f64) -> BillInput {
    BillInput::new(Utility::TataPower, network, Category::Residential, metered_units)
}

pub fn commercial(metered_units: f64) -> BillInput {
    BillInput::new(
        Utility::TataPower,
        NetworkType::Direct,
        Category::Commercial,
        metered_units,
    )
}
