use crate::adapters::table::Table;
use crate::domain::model::{PlaceMetrics, PlaceRecord};
use crate::domain::ports::{ConfigProvider, StatsSource};
use crate::utils::error::{HomeScoreError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

const NAME_COLUMN: &str = "NAME";
const PLACE_COLUMN: &str = "place";

/// HTTP client for the census data API.
pub struct CensusClient {
    client: Client,
    base_url: String,
    regions_dataset: String,
    places_dataset: String,
    metrics_dataset: String,
    home_value_variable: String,
    income_variable: String,
}

impl CensusClient {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            regions_dataset: config.regions_dataset().trim_matches('/').to_string(),
            places_dataset: config.places_dataset().trim_matches('/').to_string(),
            metrics_dataset: config.metrics_dataset().trim_matches('/').to_string(),
            home_value_variable: config.home_value_variable().to_string(),
            income_variable: config.income_variable().to_string(),
        })
    }

    fn url(&self, dataset: &str) -> String {
        format!("{}/{}", self.base_url, dataset)
    }

    /// `None` when the service answers with no content.
    async fn get_table(&self, dataset: &str, query: &[(&str, &str)]) -> Result<Option<Table>> {
        let url = self.url(dataset);
        tracing::debug!("GET {} {:?}", url, query);

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        tracing::debug!("{} answered {}", url, status);

        let response = response.error_for_status()?;
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }

        let json: Value = serde_json::from_str(&body)
            .map_err(|e| HomeScoreError::format(dataset, format!("invalid JSON: {}", e)))?;

        Table::parse(dataset, &json).map(Some)
    }

    async fn fetch_value(
        &self,
        variable: &str,
        label: &str,
        region_code: &str,
        place_id: &str,
    ) -> Result<i64> {
        let place_filter = format!("place:{}", place_id);
        let region_filter = format!("state:{}", region_code);
        let table = self
            .get_table(
                &self.metrics_dataset,
                &[("get", variable), ("for", place_filter.as_str()), ("in", region_filter.as_str())],
            )
            .await?;

        let unavailable = || HomeScoreError::DataUnavailable {
            field: label.to_string(),
            subject: format!("place {} in state {}", place_id, region_code),
        };

        let table = table.ok_or_else(unavailable)?;
        let column = table.column(&self.metrics_dataset, variable)?;
        let cell = table
            .rows()
            .first()
            .and_then(|row| row[column].as_deref())
            .ok_or_else(unavailable)?;

        parse_metric(label, cell)?.ok_or_else(unavailable)
    }
}

/// Parses a metric cell. Census uses large negative sentinels such as
/// `-666666666` for suppressed estimates; those come back as `None`.
pub fn parse_metric(label: &str, cell: &str) -> Result<Option<i64>> {
    let value = cell
        .trim()
        .parse::<i64>()
        .map_err(|_| HomeScoreError::Parse {
            field: label.to_string(),
            value: cell.to_string(),
        })?;

    Ok((value >= 0).then_some(value))
}

#[async_trait]
impl StatsSource for CensusClient {
    async fn list_regions(&self) -> Result<Vec<String>> {
        let Some(table) = self
            .get_table(&self.regions_dataset, &[("get", NAME_COLUMN), ("for", "state:*")])
            .await?
        else {
            return Ok(Vec::new());
        };

        let name = table.column(&self.regions_dataset, NAME_COLUMN)?;
        Ok(table
            .rows()
            .iter()
            .filter_map(|row| row[name].clone())
            .collect())
    }

    async fn list_places(&self, region_code: &str) -> Result<Vec<PlaceRecord>> {
        let region_filter = format!("state:{}", region_code);
        let Some(table) = self
            .get_table(
                &self.places_dataset,
                &[("get", "NAME,POP"), ("for", "place:*"), ("in", region_filter.as_str())],
            )
            .await?
        else {
            return Ok(Vec::new());
        };

        let name = table.column(&self.places_dataset, NAME_COLUMN)?;
        let place = table.column(&self.places_dataset, PLACE_COLUMN)?;

        table
            .rows()
            .iter()
            .map(|row| match (&row[name], &row[place]) {
                (Some(full_name), Some(place_id)) => Ok(PlaceRecord {
                    full_name: full_name.clone(),
                    place_id: place_id.clone(),
                }),
                _ => Err(HomeScoreError::format(
                    &self.places_dataset,
                    "place row is missing its name or identifier",
                )),
            })
            .collect()
    }

    async fn fetch_metrics(&self, region_code: &str, place_id: &str) -> Result<PlaceMetrics> {
        let median_home_value = self
            .fetch_value(&self.home_value_variable, "median home value", region_code, place_id)
            .await?;
        let median_household_income = self
            .fetch_value(&self.income_variable, "median household income", region_code, place_id)
            .await?;

        Ok(PlaceMetrics {
            median_home_value,
            median_household_income,
        })
    }
}
