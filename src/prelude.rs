//! Convenient re-exports for common types and traits

pub use crate::PathTravelerPlugin;
pub use crate::config::TravelerConfig;
pub use crate::events::AppendCurrentPosition;
pub use crate::events::LoopComplete;
pub use crate::events::RestartTravel;
pub use crate::events::SegmentComplete;
pub use crate::events::SetTravelerActive;
pub use crate::events::TravelComplete;
pub use crate::facing::FacingMode;
pub use crate::facing::PositionOrientationSink;
pub use crate::traveler::PathTraveler;
pub use crate::traversal::LoopMode;
#[cfg(feature = "visualization")]
pub use crate::visualization::TravelPathGizmo;
#[cfg(feature = "visualization")]
pub use crate::visualization::TravelPathVisualizationPlugin;
