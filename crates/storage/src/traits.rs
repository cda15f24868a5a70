use std::future::Future;

use async_trait::async_trait;
use chrono::NaiveDate;
use model::{Dataset, DatasetCounts, Flight, GraphMetadata, RealStop, Route, VirtualRoute, VirtualStop};

use crate::error::Result;

#[async_trait]
pub trait DatasetRepo {
    async fn latest_dataset(&mut self) -> Result<Option<Dataset>>;
    async fn get_dataset_by_version(&mut self, version: &str) -> Result<Option<Dataset>>;
    async fn set_active_dataset(&mut self, version: &str) -> Result<()>;
    async fn delete_dataset(&mut self, id: i64) -> Result<()>;
    async fn exists_by_odata_hash(&mut self, hash: &str) -> Result<bool>;
    async fn update_dataset_counts(&mut self, version: &str, counts: DatasetCounts) -> Result<()>;
    async fn delete_old_datasets(&mut self, keep_count: usize) -> Result<u64>;
}

#[async_trait]
pub trait StopRepo {
    async fn save_real_stops_batch(&mut self, stops: &[RealStop]) -> Result<u64>;
    async fn find_real_stops_nearby(
        &mut self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Result<Vec<RealStop>>;
    async fn get_real_stops_by_city_name(&mut self, name: &str) -> Result<Vec<RealStop>>;
    async fn get_all_real_stops(&mut self) -> Result<Vec<RealStop>>;
    async fn find_real_stop_by_id(&mut self, id: &str) -> Result<Option<RealStop>>;
}

#[async_trait]
pub trait VirtualStopRepo {
    async fn save_virtual_stops_batch(&mut self, stops: &[VirtualStop]) -> Result<u64>;
    async fn get_virtual_stops_by_city_name(&mut self, name: &str) -> Result<Vec<VirtualStop>>;
    async fn get_all_virtual_stops(&mut self) -> Result<Vec<VirtualStop>>;
    async fn find_virtual_stop_by_id(&mut self, id: &str) -> Result<Option<VirtualStop>>;
    async fn virtual_stop_count(&mut self) -> Result<u64>;
    async fn delete_all_virtual_stops(&mut self) -> Result<u64>;
}

#[async_trait]
pub trait RouteRepo {
    async fn save_routes_batch(&mut self, routes: &[Route]) -> Result<u64>;
    async fn get_all_routes(&mut self) -> Result<Vec<Route>>;
    async fn find_direct_route(&mut self, from_stop_id: &str, to_stop_id: &str) -> Result<Option<Route>>;
}

#[async_trait]
pub trait VirtualRouteRepo {
    async fn save_virtual_routes_batch(&mut self, routes: &[VirtualRoute]) -> Result<u64>;
    async fn get_all_virtual_routes(&mut self) -> Result<Vec<VirtualRoute>>;
    async fn find_direct_virtual_route(
        &mut self,
        from_stop_id: &str,
        to_stop_id: &str,
    ) -> Result<Option<VirtualRoute>>;
    async fn delete_all_virtual_routes(&mut self) -> Result<u64>;
}

#[async_trait]
pub trait FlightRepo {
    async fn save_flights_batch(&mut self, flights: &[Flight]) -> Result<u64>;
    async fn get_flights_between_stops(
        &mut self,
        from_stop_id: &str,
        to_stop_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Flight>>;
    async fn get_all_flights(&mut self) -> Result<Vec<Flight>>;
    async fn delete_all_virtual_flights(&mut self) -> Result<u64>;
}

#[async_trait]
pub trait GraphMetadataRepo {
    async fn insert_graph_metadata(&mut self, metadata: GraphMetadata) -> Result<GraphMetadata>;
    async fn set_active_graph_metadata(&mut self, version: &str) -> Result<()>;
    async fn active_graph_metadata(&mut self) -> Result<Option<GraphMetadata>>;
    async fn graph_metadata_for_dataset_version(
        &mut self,
        dataset_version: &str,
    ) -> Result<Option<GraphMetadata>>;
    async fn delete_old_graph_metadata(&mut self, keep_count: usize) -> Result<u64>;
}

#[async_trait]
pub trait DatabaseOperations:
    DatasetRepo + StopRepo + VirtualStopRepo + RouteRepo + VirtualRouteRepo + FlightRepo + GraphMetadataRepo
{
}

impl<T> DatabaseOperations for T where
    T: DatasetRepo + StopRepo + VirtualStopRepo + RouteRepo + VirtualRouteRepo + FlightRepo + GraphMetadataRepo
{
}

#[async_trait]
pub trait DatabaseTransaction: DatabaseOperations {
    async fn commit(self) -> Result<()>;
}

pub trait DatabaseAutocommit: DatabaseOperations {}

/// A public-transport-style relational database handle. Multiple concurrent
/// accesses are possible by cloning the handle; transactions and autocommit
/// access are separate types so callers state their atomicity requirement at
/// the type level instead of by convention.
#[async_trait]
pub trait Database: Clone + Send + Sync + Sized {
    type Transaction: DatabaseTransaction + Send;
    type Autocommit: DatabaseAutocommit + Send;

    const BULK_INSERT_MAX: usize;

    async fn transaction(&self) -> Result<Self::Transaction>;

    fn auto(&self) -> Self::Autocommit;

    async fn perform_transaction<T, F, Fut>(&self, action: F) -> Result<T>
    where
        T: Send,
        F: Send + FnOnce(&mut Self::Transaction) -> Fut + Send,
        Fut: Future<Output = Result<T>> + Send;
}
