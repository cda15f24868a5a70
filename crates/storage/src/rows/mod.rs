pub mod dataset;
pub mod flight;
pub mod graph_metadata;
pub mod route;
pub mod virtual_route;
pub mod virtual_stop;
pub mod stop;
