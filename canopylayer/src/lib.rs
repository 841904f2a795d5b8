//! CanopyLayer - Tile search and interaction history for tree-canopy data
//!
//! This library provides the analysis core behind an interactive
//! tree-canopy/deforestation dashboard: a sorted index over decoded
//! raster samples with range-bounded, predicate-filtered search, plus
//! the bounded history structures and area aggregation driven by point
//! inspection.
//!
//! Raster decoding, georeferencing, and rendering are external
//! collaborators: they supply [`record::TileRecord`] batches and
//! consume query results and formatted reports.

pub mod analysis;
pub mod batch;
pub mod history;
pub mod index;
pub mod record;
pub mod results;
pub mod session;
pub mod sort;

pub use analysis::{analyze_area, AreaSummary, GeoBox, NetChange};
pub use batch::{BatchError, BatchSummary, TileBatch};
pub use history::{InspectedPoint, InteractionLog, RecentPointsWindow};
pub use index::{TileIndex, TileSearch};
pub use record::{SearchCriteria, TileRecord};
pub use results::{ResultRow, SearchResults};
pub use session::{InspectionReport, InspectionSession};
pub use sort::SortStrategy;
