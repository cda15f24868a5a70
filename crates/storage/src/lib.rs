use std::future::Future;

use async_trait::async_trait;
use chrono::NaiveDate;
use model::{Dataset, DatasetCounts, Flight, GraphMetadata, RealStop, Route, VirtualRoute, VirtualStop};
use sqlx::Transaction;

pub mod connection;
pub mod error;
pub mod queries;
pub mod rows;
pub mod traits;

pub use connection::DatabaseConnectionInfo;
pub use error::{StorageError, Result};
pub use traits::{
    Database, DatabaseAutocommit, DatabaseOperations, DatabaseTransaction, DatasetRepo, FlightRepo,
    GraphMetadataRepo, RouteRepo, StopRepo, VirtualRouteRepo, VirtualStopRepo,
};

#[derive(Clone)]
pub struct PgDatabase {
    connection: sqlx::PgPool,
}

impl PgDatabase {
    pub async fn connect(info: DatabaseConnectionInfo) -> Result<Self> {
        let pool = sqlx::postgres::PgPool::connect(&info.postgres_url())
            .await
            .map_err(error::convert_error)?;
        Ok(Self { connection: pool })
    }
}

pub struct PgDatabaseTransaction<'a> {
    tx: Transaction<'a, sqlx::Postgres>,
}

pub struct PgDatabaseAutocommit {
    pool: sqlx::PgPool,
}

impl DatabaseAutocommit for PgDatabaseAutocommit {}

#[async_trait]
impl<'a> DatabaseTransaction for PgDatabaseTransaction<'a> {
    async fn commit(self) -> Result<()> {
        self.tx.commit().await.map_err(error::convert_error)
    }
}

#[async_trait]
impl Database for PgDatabase {
    type Transaction = PgDatabaseTransaction<'static>;
    type Autocommit = PgDatabaseAutocommit;

    const BULK_INSERT_MAX: usize = 1000;

    fn auto(&self) -> Self::Autocommit {
        PgDatabaseAutocommit {
            pool: self.connection.clone(),
        }
    }

    async fn transaction(&self) -> Result<Self::Transaction> {
        let tx = self.connection.begin().await.map_err(error::convert_error)?;
        Ok(PgDatabaseTransaction { tx })
    }

    async fn perform_transaction<T, F, Fut>(&self, action: F) -> Result<T>
    where
        T: Send,
        F: Send + FnOnce(&mut Self::Transaction) -> Fut + Send,
        Fut: Future<Output = Result<T>> + Send,
    {
        let tx = self.connection.begin().await.map_err(error::convert_error)?;
        let mut tx = PgDatabaseTransaction { tx };
        let result = action(&mut tx).await?;
        tx.commit().await?;
        Ok(result)
    }
}

macro_rules! impl_repos {
    ($ty:ty, $exec:expr) => {
        #[async_trait]
        impl DatasetRepo for $ty {
            async fn latest_dataset(&mut self) -> Result<Option<Dataset>> {
                queries::dataset::latest($exec(self)).await
            }

            async fn get_dataset_by_version(&mut self, version: &str) -> Result<Option<Dataset>> {
                queries::dataset::by_version($exec(self), version).await
            }

            async fn set_active_dataset(&mut self, version: &str) -> Result<()> {
                queries::dataset::set_active($exec(self), version).await
            }

            async fn delete_dataset(&mut self, id: i64) -> Result<()> {
                queries::dataset::delete($exec(self), id).await
            }

            async fn exists_by_odata_hash(&mut self, hash: &str) -> Result<bool> {
                queries::dataset::exists_by_odata_hash($exec(self), hash).await
            }

            async fn update_dataset_counts(&mut self, version: &str, counts: DatasetCounts) -> Result<()> {
                queries::dataset::update_counts($exec(self), version, counts).await
            }

            async fn delete_old_datasets(&mut self, keep_count: usize) -> Result<u64> {
                queries::dataset::delete_old($exec(self), keep_count as i64).await
            }
        }

        #[async_trait]
        impl StopRepo for $ty {
            async fn save_real_stops_batch(&mut self, stops: &[RealStop]) -> Result<u64> {
                queries::stop::save_batch($exec(self), stops).await
            }

            async fn find_real_stops_nearby(
                &mut self,
                latitude: f64,
                longitude: f64,
                radius_km: f64,
            ) -> Result<Vec<RealStop>> {
                queries::stop::find_nearby($exec(self), latitude, longitude, radius_km).await
            }

            async fn get_real_stops_by_city_name(&mut self, name: &str) -> Result<Vec<RealStop>> {
                queries::stop::get_by_city_name($exec(self), name).await
            }

            async fn get_all_real_stops(&mut self) -> Result<Vec<RealStop>> {
                queries::stop::get_all($exec(self)).await
            }

            async fn find_real_stop_by_id(&mut self, id: &str) -> Result<Option<RealStop>> {
                queries::stop::find_by_id($exec(self), id).await
            }
        }

        #[async_trait]
        impl VirtualStopRepo for $ty {
            async fn save_virtual_stops_batch(&mut self, stops: &[VirtualStop]) -> Result<u64> {
                queries::virtual_stop::save_batch($exec(self), stops).await
            }

            async fn get_virtual_stops_by_city_name(&mut self, name: &str) -> Result<Vec<VirtualStop>> {
                queries::virtual_stop::get_by_city_name($exec(self), name).await
            }

            async fn get_all_virtual_stops(&mut self) -> Result<Vec<VirtualStop>> {
                queries::virtual_stop::get_all($exec(self)).await
            }

            async fn find_virtual_stop_by_id(&mut self, id: &str) -> Result<Option<VirtualStop>> {
                queries::virtual_stop::find_by_id($exec(self), id).await
            }

            async fn virtual_stop_count(&mut self) -> Result<u64> {
                queries::virtual_stop::count($exec(self)).await
            }

            async fn delete_all_virtual_stops(&mut self) -> Result<u64> {
                queries::virtual_stop::delete_all($exec(self)).await
            }
        }

        #[async_trait]
        impl RouteRepo for $ty {
            async fn save_routes_batch(&mut self, routes: &[Route]) -> Result<u64> {
                queries::route::save_batch($exec(self), routes).await
            }

            async fn get_all_routes(&mut self) -> Result<Vec<Route>> {
                queries::route::get_all($exec(self)).await
            }

            async fn find_direct_route(&mut self, from_stop_id: &str, to_stop_id: &str) -> Result<Option<Route>> {
                queries::route::find_direct($exec(self), from_stop_id, to_stop_id).await
            }
        }

        #[async_trait]
        impl VirtualRouteRepo for $ty {
            async fn save_virtual_routes_batch(&mut self, routes: &[VirtualRoute]) -> Result<u64> {
                queries::virtual_route::save_batch($exec(self), routes).await
            }

            async fn get_all_virtual_routes(&mut self) -> Result<Vec<VirtualRoute>> {
                queries::virtual_route::get_all($exec(self)).await
            }

            async fn find_direct_virtual_route(
                &mut self,
                from_stop_id: &str,
                to_stop_id: &str,
            ) -> Result<Option<VirtualRoute>> {
                queries::virtual_route::find_direct($exec(self), from_stop_id, to_stop_id).await
            }

            async fn delete_all_virtual_routes(&mut self) -> Result<u64> {
                queries::virtual_route::delete_all($exec(self)).await
            }
        }

        #[async_trait]
        impl FlightRepo for $ty {
            async fn save_flights_batch(&mut self, flights: &[Flight]) -> Result<u64> {
                queries::flight::save_batch($exec(self), flights).await
            }

            async fn get_flights_between_stops(
                &mut self,
                from_stop_id: &str,
                to_stop_id: &str,
                date: NaiveDate,
            ) -> Result<Vec<Flight>> {
                queries::flight::get_between_stops($exec(self), from_stop_id, to_stop_id, date).await
            }

            async fn get_all_flights(&mut self) -> Result<Vec<Flight>> {
                queries::flight::get_all($exec(self)).await
            }

            async fn delete_all_virtual_flights(&mut self) -> Result<u64> {
                queries::flight::delete_all_virtual($exec(self)).await
            }
        }

        #[async_trait]
        impl GraphMetadataRepo for $ty {
            async fn insert_graph_metadata(&mut self, metadata: GraphMetadata) -> Result<GraphMetadata> {
                queries::graph_metadata::insert($exec(self), metadata).await
            }

            async fn set_active_graph_metadata(&mut self, version: &str) -> Result<()> {
                queries::graph_metadata::set_active($exec(self), version).await
            }

            async fn active_graph_metadata(&mut self) -> Result<Option<GraphMetadata>> {
                queries::graph_metadata::active($exec(self)).await
            }

            async fn graph_metadata_for_dataset_version(
                &mut self,
                dataset_version: &str,
            ) -> Result<Option<GraphMetadata>> {
                queries::graph_metadata::for_dataset_version($exec(self), dataset_version).await
            }

            async fn delete_old_graph_metadata(&mut self, keep_count: usize) -> Result<u64> {
                queries::graph_metadata::delete_old($exec(self), keep_count as i64).await
            }
        }
    };
}

impl_repos!(PgDatabaseAutocommit, |this: &PgDatabaseAutocommit| &this.pool);
impl_repos!(PgDatabaseTransaction<'static>, |this: &mut PgDatabaseTransaction<'static>| &mut *this.tx);
