use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{CatalogSource, Cause};
use crate::core::errors::PipelineError;

/// Catalog backed by the campaign-listing endpoint of the platform backend
/// (`GET /api/all-campaigns`).
pub struct RemoteCatalog {
    url: String,
    client: Client,
}

/// Wire shape of one campaign as served by the backend.
#[derive(Debug, Deserialize)]
struct RemoteCampaign {
    #[serde(rename = "ID")]
    id: i64,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "Goal")]
    goal: Option<f64>,
    #[serde(rename = "Currency")]
    currency: Option<String>,
    #[serde(rename = "CreatorUsername")]
    creator_username: Option<String>,
}

impl From<RemoteCampaign> for Cause {
    fn from(campaign: RemoteCampaign) -> Self {
        Cause {
            id: campaign.id.to_string(),
            title: campaign.title,
            description: campaign.description,
            tags: String::new(),
            goal: campaign.goal,
            currency: campaign.currency,
            creator: campaign.creator_username,
        }
    }
}

impl RemoteCatalog {
    pub fn new(url: String, timeout: Duration) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(PipelineError::catalog)?;

        Ok(RemoteCatalog { url, client })
    }
}

#[async_trait]
impl CatalogSource for RemoteCatalog {
    fn name(&self) -> &str {
        "remote"
    }

    async fn fetch(&self) -> Result<Vec<Cause>, PipelineError> {
        let res = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(PipelineError::catalog)?;

        if !res.status().is_success() {
            return Err(PipelineError::CatalogFetch(format!(
                "campaign API returned {}",
                res.status()
            )));
        }

        let campaigns: Vec<RemoteCampaign> = res.json().await.map_err(PipelineError::catalog)?;

        if campaigns.is_empty() {
            tracing::warn!("Campaign API returned zero campaigns");
        } else {
            tracing::info!("Fetched {} campaigns from {}", campaigns.len(), self.url);
        }

        Ok(campaigns.into_iter().map(Cause::from).collect())
    }
}
