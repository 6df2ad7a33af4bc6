//! Tariff schedules and the registry that resolves them.

pub mod builtin;
pub mod registry;
pub mod types;

pub use registry::TariffRegistry;
pub use types::{
    AdditionalLoadRule, Category, FixedChargeRule, FixedTier, NetworkType, Phase, PpcaFloor,
    PpcaRule, Slab, SlabBasis, TariffKey, TariffSchedule, UnitBasis, Utility,
};
