pub mod adapter;
pub mod house_system;
#[cfg(feature = "swiss")]
pub mod swiss;
pub mod types;

pub use adapter::{Ephemeris, EphemerisError};
pub use house_system::HouseSystem;
#[cfg(feature = "swiss")]
pub use swiss::SwissEphemerisAdapter;
pub use types::{BodyPosition, GeoLocation, HouseFrame, HousePositionQuery, Target};
