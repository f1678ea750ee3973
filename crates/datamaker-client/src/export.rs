//! Fan-out of generated records to API endpoints or the database bridge.
//!
//! One request is sent per record. By default requests are strictly
//! sequential: record `n + 1` is not sent before the response to record `n`
//! has been parsed. The first failure aborts the whole export and the
//! results collected so far are dropped.

use futures_util::stream::{self, StreamExt, TryStreamExt};
use http::Method;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use datamaker_core::EndpointRef;

use crate::client::DataMaker;
use crate::endpoint::ResolvedEndpoint;
use crate::errors::{ClientError, Result};
use crate::transport::HttpRequest;

/// Database bridge route, relative to the service base URL.
pub const DB_EXPORT_PATH: &str = "db-bridge/export";

/// Dispatch settings for an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Maximum requests in flight. 0 and 1 both mean sequential.
    pub concurrency: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::sequential()
    }
}

impl ExportOptions {
    pub const fn sequential() -> Self {
        Self { concurrency: 1 }
    }

    /// Up to `limit` requests in flight; results keep input order and the
    /// export still aborts on the first failure in input order.
    pub const fn concurrent(limit: usize) -> Self {
        Self { concurrency: limit }
    }

    fn limit(self) -> usize {
        self.concurrency.max(1)
    }
}

enum Destination<'a> {
    Api(&'a ResolvedEndpoint),
    Database {
        connection_id: &'a str,
        table: &'a str,
    },
}

impl Destination<'_> {
    fn label(&self) -> &'static str {
        match self {
            Destination::Api(_) => "api",
            Destination::Database { .. } => "database",
        }
    }
}

impl DataMaker {
    /// Send every record to an endpoint, one request per record, in order.
    pub async fn export_to_api<R>(
        &self,
        endpoint: impl Into<EndpointRef>,
        records: &[R],
    ) -> Result<Vec<Value>>
    where
        R: Serialize + Sync,
    {
        self.export_to_api_with(endpoint, records, ExportOptions::default())
            .await
    }

    /// [`DataMaker::export_to_api`] with explicit dispatch settings.
    pub async fn export_to_api_with<R>(
        &self,
        endpoint: impl Into<EndpointRef>,
        records: &[R],
        options: ExportOptions,
    ) -> Result<Vec<Value>>
    where
        R: Serialize + Sync,
    {
        let endpoint = endpoint.into();
        let target = self.resolve_endpoint_ref(&endpoint).await?;
        self.run_export(Destination::Api(&target), records, options)
            .await
    }

    /// Send every record to a table through the database bridge, in order.
    pub async fn export_to_db<R>(
        &self,
        connection_id: &str,
        table: &str,
        records: &[R],
    ) -> Result<Vec<Value>>
    where
        R: Serialize + Sync,
    {
        if connection_id.trim().is_empty() {
            return Err(ClientError::InvalidArgument(
                "connection id must not be empty".to_string(),
            ));
        }
        if table.trim().is_empty() {
            return Err(ClientError::InvalidArgument(
                "table name must not be empty".to_string(),
            ));
        }

        let destination = Destination::Database {
            connection_id,
            table,
        };
        self.run_export(destination, records, ExportOptions::default())
            .await
    }

    async fn run_export<R>(
        &self,
        destination: Destination<'_>,
        records: &[R],
        options: ExportOptions,
    ) -> Result<Vec<Value>>
    where
        R: Serialize + Sync,
    {
        let total = records.len();
        info!(
            event = "export_started",
            destination = destination.label(),
            records = total,
            concurrency = options.limit()
        );

        let outcome = if options.limit() == 1 {
            self.dispatch_sequential(&destination, records).await
        } else {
            self.dispatch_buffered(&destination, records, options.limit())
                .await
        };

        match outcome {
            Ok(results) => {
                info!(
                    event = "export_finished",
                    destination = destination.label(),
                    records = results.len()
                );
                Ok(results)
            }
            Err(err) => {
                warn!(
                    event = "export_aborted",
                    destination = destination.label(),
                    error = %err
                );
                Err(err)
            }
        }
    }

    async fn dispatch_sequential<R>(
        &self,
        destination: &Destination<'_>,
        records: &[R],
    ) -> Result<Vec<Value>>
    where
        R: Serialize + Sync,
    {
        let total = records.len();
        let mut results = Vec::with_capacity(total);
        for (index, record) in records.iter().enumerate() {
            let response = self
                .dispatch_record(destination, record)
                .await
                .map_err(|source| aborted(index, total, source))?;
            debug!(event = "export_record_sent", index = index);
            results.push(response);
        }
        Ok(results)
    }

    async fn dispatch_buffered<R>(
        &self,
        destination: &Destination<'_>,
        records: &[R],
        limit: usize,
    ) -> Result<Vec<Value>>
    where
        R: Serialize + Sync,
    {
        let total = records.len();
        stream::iter(records.iter().enumerate())
            .map(|(index, record)| async move {
                let response = self
                    .dispatch_record(destination, record)
                    .await
                    .map_err(|source| aborted(index, total, source))?;
                debug!(event = "export_record_sent", index = index);
                Ok::<Value, ClientError>(response)
            })
            .buffered(limit)
            .try_collect()
            .await
    }

    async fn dispatch_record<R>(&self, destination: &Destination<'_>, record: &R) -> Result<Value>
    where
        R: Serialize + Sync,
    {
        let data = serde_json::to_value(record)?;
        let request = match destination {
            Destination::Api(target) => HttpRequest {
                method: target.method.clone(),
                url: target.url.clone(),
                headers: target.headers.clone(),
                query: Vec::new(),
                body: Some(data),
            },
            Destination::Database {
                connection_id,
                table,
            } => self.service_request(
                Method::POST,
                DB_EXPORT_PATH,
                Some(json!({
                    "connectionId": connection_id,
                    "table": table,
                    "data": data,
                })),
            ),
        };
        self.call(request).await
    }
}

fn aborted(index: usize, total: usize, source: ClientError) -> ClientError {
    ClientError::ExportAborted {
        index,
        total,
        source: Box::new(source),
    }
}
