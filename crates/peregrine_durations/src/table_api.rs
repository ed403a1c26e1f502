use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{coordinate::Coordinate, transport_mode::OsrmProfile};

#[derive(Debug, Error)]
pub enum TableError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("table service error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("table service rejected the request: {code} - {message}")]
    Rejected { code: String, message: String },

    #[error("table response has no durations")]
    MissingDurations,

    #[error("table row has {got} entries for {expected} points")]
    MalformedRow { expected: usize, got: usize },

    #[error("deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct TableResponse {
    code: String,
    message: Option<String>,

    /// Square matrix of seconds; `null` cells are unroutable pairs.
    durations: Option<Vec<Vec<Option<f64>>>>,
}

pub struct TableConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            base_url: "https://router.project-osrm.org".to_owned(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Client for an OSRM-compatible table service.
pub struct TableClient {
    config: TableConfig,
    client: reqwest::Client,
}

impl TableClient {
    pub fn new(config: TableConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Durations in seconds from `start` to each of `ends`, in request
    /// order.
    ///
    /// Issues a single table request over the point list `[start] + ends`
    /// and reads the first row of the returned square matrix. A `None`
    /// entry means the service could not route that pair.
    pub async fn fetch_row(
        &self,
        start: &Coordinate,
        ends: &[Coordinate],
        profile: OsrmProfile,
    ) -> Result<Vec<Option<f64>>, TableError> {
        let url = self.table_url(start, ends, profile);

        debug!("TableClient: requesting durations for {} ends", ends.len());

        let response = self
            .client
            .get(&url)
            .query(&[("annotations", "duration")])
            .timeout(self.config.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(TableError::Api { status, message });
        }

        let body = response.text().await?;
        let table: TableResponse = serde_json::from_str(&body)?;

        start_row(table, ends.len())
    }

    fn table_url(&self, start: &Coordinate, ends: &[Coordinate], profile: OsrmProfile) -> String {
        let coordinates = std::iter::once(start)
            .chain(ends.iter())
            .map(|coordinate| format!("{},{}", coordinate.longitude, coordinate.latitude))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/table/v1/{}/{}",
            self.config.base_url, profile, coordinates
        )
    }
}

/// Extracts the start's row of a table response: one entry per requested
/// end, the leading self-to-self cell dropped.
fn start_row(table: TableResponse, num_ends: usize) -> Result<Vec<Option<f64>>, TableError> {
    if table.code != "Ok" {
        return Err(TableError::Rejected {
            code: table.code,
            message: table.message.unwrap_or_default(),
        });
    }

    let durations = table.durations.ok_or(TableError::MissingDurations)?;
    let row = durations
        .into_iter()
        .next()
        .ok_or(TableError::MissingDurations)?;

    if row.len() != num_ends + 1 {
        return Err(TableError::MalformedRow {
            expected: num_ends + 1,
            got: row.len(),
        });
    }

    Ok(row.into_iter().skip(1).collect())
}
