//! Read-only tables shared by the chart builder and the classifiers.

use crate::aspects::{AspectKind, AspectTable};
use crate::chart::PlacementStrategy;
use crate::ephemeris::HouseSystem;
use crate::western::{ElementWeight, DEFAULT_WEIGHTS};

#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Weighted chart factors, in reporting order
    pub element_weights: Vec<ElementWeight>,
    pub aspects: AspectTable,
    /// Used when a request names no house system or an unknown one
    pub default_house_system: HouseSystem,
    /// House-position strategies, tried in order
    pub placement: Vec<PlacementStrategy>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            element_weights: DEFAULT_WEIGHTS.to_vec(),
            aspects: AspectTable::default(),
            default_house_system: HouseSystem::WholeSign,
            placement: PlacementStrategy::DEFAULT_CHAIN.to_vec(),
        }
    }
}

impl ChartConfig {
    /// Override orbs while keeping the aspect priority order.
    pub fn with_orbs<I>(mut self, orbs: I) -> Self
    where
        I: IntoIterator<Item = (AspectKind, f64)>,
    {
        for (kind, orb) in orbs {
            self.aspects = self.aspects.with_orb(kind, orb);
        }
        self
    }

    pub fn with_default_house_system(mut self, system: HouseSystem) -> Self {
        self.default_house_system = system;
        self
    }

    pub fn weight_total(&self) -> u32 {
        self.element_weights.iter().map(|w| w.weight).sum()
    }
}
