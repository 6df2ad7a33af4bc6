//! Compiled-in tariff table for FY 2025-26 (MERC 5th control period orders).
//!
//! `tariffs/fy2025_26.toml` is an editable copy of this table and must stay in
//! sync with it.

use super::types::{
    AdditionalLoadRule, Category, FixedChargeRule, FixedTier, NetworkType, PpcaRule, Slab,
    SlabBasis, TariffSchedule, UnitBasis, Utility,
};

/// Version label of the compiled-in table.
pub const VERSION: &str = "FY2025-26";

/// Loss factor applied to Welcome-network consumers.
const WELCOME_LOSS_FACTOR: f64 = 1.05785;

/// Default monthly PPCA rate (INR/kWh) until the month's rate is supplied.
const DEFAULT_PPCA_RATE: f64 = 0.45;

/// Net-metering credit per kWh of solar generation (INR/kWh).
const SOLAR_REBATE_RATE: f64 = 0.50;

const TOSE_RATE: f64 = 0.2604;
const RESIDENTIAL_DUTY_PERCENT: f64 = 16.0;
const COMMERCIAL_DUTY_PERCENT: f64 = 21.0;

fn residential_fixed_charge() -> FixedChargeRule {
    FixedChargeRule::Tiered {
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
    }
}

fn residential_additional_load() -> Option<AdditionalLoadRule> {
    Some(AdditionalLoadRule {
        threshold_kw: 10.0,
        block_kw: 10.0,
        charge_per_block: 160.0,
    })
}

fn residential(
    utility: Utility,
    network: NetworkType,
    slabs: Vec<Slab>,
    wheeling_rate: f64,
) -> TariffSchedule {
    TariffSchedule {
        utility,
        network,
        category: Category::Residential,
        loss_factor: match network {
            NetworkType::Direct => 1.0,
            NetworkType::Welcome => WELCOME_LOSS_FACTOR,
        },
        slabs,
        slab_basis: SlabBasis::BilledUnits,
        wheeling_rate,
        wheeling_basis: UnitBasis::Billed,
        fixed_charge: residential_fixed_charge(),
        additional_load: residential_additional_load(),
        ppca: PpcaRule::Flat {
            rate: DEFAULT_PPCA_RATE,
        },
        ppca_floor: None,
        solar_rebate_rate: SOLAR_REBATE_RATE,
        duty_percent: RESIDENTIAL_DUTY_PERCENT,
        tose_rate: TOSE_RATE,
    }
}

fn commercial(
    utility: Utility,
    network: NetworkType,
    slabs: Vec<Slab>,
    wheeling_rate: f64,
    demand_rate_per_kw: f64,
) -> TariffSchedule {
    TariffSchedule {
        utility,
        network,
        category: Category::Commercial,
        loss_factor: match network {
            NetworkType::Direct => 1.0,
            NetworkType::Welcome => WELCOME_LOSS_FACTOR,
        },
        slabs,
        slab_basis: SlabBasis::BilledUnits,
        wheeling_rate,
        wheeling_basis: UnitBasis::Billed,
        fixed_charge: FixedChargeRule::Demand {
            rate_per_kw: demand_rate_per_kw,
            bmd_fraction: 0.75,
            penalty_multiplier: 1.5,
        },
        additional_load: None,
        ppca: PpcaRule::Flat {
            rate: DEFAULT_PPCA_RATE,
        },
        ppca_floor: None,
        solar_rebate_rate: SOLAR_REBATE_RATE,
        duty_percent: COMMERCIAL_DUTY_PERCENT,
        tose_rate: TOSE_RATE,
    }
}

fn tata_residential_slabs() -> Vec<Slab> {
    vec![
        Slab::bounded(100.0, 2.02),
        Slab::bounded(300.0, 5.35),
        Slab::bounded(500.0, 10.04),
        Slab::unbounded(11.25),
    ]
}

fn adani_residential_slabs() -> Vec<Slab> {
    vec![
        Slab::bounded(100.0, 3.45),
        Slab::bounded(300.0, 6.70),
        Slab::bounded(500.0, 8.10),
        Slab::unbounded(9.05),
    ]
}

fn tata_commercial_slabs() -> Vec<Slab> {
    vec![Slab::bounded(500.0, 7.90), Slab::unbounded(9.40)]
}

fn adani_commercial_slabs() -> Vec<Slab> {
    vec![Slab::bounded(500.0, 8.40), Slab::unbounded(9.75)]
}

/// All compiled-in schedules, one per registered key.
pub fn schedules() -> Vec<TariffSchedule> {
    vec![
        residential(
            Utility::TataPower,
            NetworkType::Direct,
            tata_residential_slabs(),
            1.82,
        ),
        residential(
            Utility::TataPower,
            NetworkType::Welcome,
            tata_residential_slabs(),
            2.93,
        ),
        residential(
            Utility::Adani,
            NetworkType::Direct,
            adani_residential_slabs(),
            2.93,
        ),
        commercial(
            Utility::TataPower,
            NetworkType::Direct,
            tata_commercial_slabs(),
            1.82,
            470.0,
        ),
        commercial(
            Utility::TataPower,
            NetworkType::Welcome,
            tata_commercial_slabs(),
            2.93,
            470.0,
        ),
        commercial(
            Utility::Adani,
            NetworkType::Direct,
            adani_commercial_slabs(),
            2.93,
            470.0,
        ),
    ]
}
