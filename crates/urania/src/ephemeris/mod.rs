pub mod adapter;
pub mod provider;
pub mod table;
pub mod types;

pub use adapter::SwissEphemerisAdapter;
pub use provider::{EphemerisError, PositionProvider};
pub use table::PositionTable;
pub use types::{BodyState, Positions};
