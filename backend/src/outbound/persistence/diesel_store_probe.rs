//! Readiness probe issuing `SELECT 1` through the pool.

use async_trait::async_trait;
use diesel::dsl::sql;
use diesel::sql_types::Integer;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StoreProbe, StoreProbeError};

use super::diesel_helpers::{map_diesel_error_message, map_pool_error_message};
use super::pool::DbPool;

/// [`StoreProbe`] backed by the shared [`DbPool`].
#[derive(Clone)]
pub struct DieselStoreProbe {
    pool: DbPool,
}

impl DieselStoreProbe {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreProbe for DieselStoreProbe {
    async fn ping(&self) -> Result<(), StoreProbeError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| StoreProbeError::unavailable(map_pool_error_message(err)))?;
        diesel::select(sql::<Integer>("1"))
            .get_result::<i32>(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| StoreProbeError::unavailable(map_diesel_error_message(err, "ping")))
    }
}
