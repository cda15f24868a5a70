pub mod ferry;
pub mod graph;
pub mod report;
pub mod stop_filter;
pub mod structural;
pub mod transfer;

pub use ferry::validate_ferry_edges;
pub use graph::{GraphEdge, GraphNode, StopFacts};
pub use report::ValidationReport;
pub use stop_filter::is_admissible_stop;
pub use structural::validate_structure;
pub use transfer::validate_transfer_edges;
