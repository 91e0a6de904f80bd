pub mod builder;
pub mod placement;
pub mod record;

pub use builder::ChartBuilder;
pub use placement::{PlacementStrategy, PointCoordinates, J2000_OBLIQUITY};
pub use record::{ChartRecord, Cusps, Placement};
