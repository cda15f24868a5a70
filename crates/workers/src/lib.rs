pub mod air_route;
pub mod error;
pub mod graph_builder;
pub mod outcome;
mod stop_ref;
pub mod virtual_entities;
pub mod worker;

pub use air_route::AirRouteWorker;
pub use error::{Result, WorkerError};
pub use graph_builder::GraphBuilderWorker;
pub use outcome::WorkerOutcome;
pub use virtual_entities::VirtualEntitiesWorker;
pub use worker::Worker;
