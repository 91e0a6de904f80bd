pub mod dignities;
pub mod elements;
pub mod houses;
pub mod kings;
pub mod positions;
pub mod rulers;
pub mod types;

pub use dignities::{dignities_of, essential_dignity, Dignity};
pub use elements::{weigh_elements, ElementTable, ElementTotals, ElementWeight, WeightItem, DEFAULT_WEIGHTS};
pub use houses::{house_table, HouseRow};
pub use kings::{four_kings, KingRow};
pub use positions::{position_table, PositionRow};
pub use rulers::{chart_ruler, HouseRuler, HouseRulership};
pub use types::{Body, Element, House, Point, Sign};
