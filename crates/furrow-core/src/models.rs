pub mod boundary;
pub mod fix;
pub mod point;
pub mod ring;
pub mod session;
pub mod units;

pub use boundary::{BoundaryDraft, FinalizedBoundary};
pub use fix::GpsFix;
pub use point::GeoPoint;
pub use ring::Ring;
pub use session::{CellId, CoverageSessionSummary, CoverageSnapshot, PlotIdentity};
pub use units::{square_meters_to_acres, SQUARE_METERS_PER_ACRE};
