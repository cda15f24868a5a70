pub mod dataset;
pub mod flight;
pub mod graph_metadata;
pub mod metadata;
pub mod route;
pub mod stop;
pub mod stop_type;
pub mod unified_city;
pub mod virtual_route;
pub mod virtual_stop;

pub use dataset::{Dataset, DatasetCounts, DatasetSource};
pub use flight::Flight;
pub use graph_metadata::GraphMetadata;
pub use metadata::Metadata;
pub use route::{EdgeSource, Route, RouteStop, TransportType};
pub use stop::RealStop;
pub use stop_type::{classify_stop, StopType};
pub use unified_city::UnifiedCity;
pub use virtual_route::{TransportMode, VirtualRoute, VirtualRouteType};
pub use virtual_stop::{GridType, NearbyStop, VirtualStop};
