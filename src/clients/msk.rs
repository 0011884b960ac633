//! Cluster-management REST client.
//!
//! # Responsibilities
//! - Describe a cluster by ARN (`v2`: `/api/v2/clusters/{arn}`, `v1`: `/v1/clusters/{arn}`)
//! - List clusters, following `nextToken` pagination
//! - Map non-2xx answers to `ClientError::Status`
//!
//! Requests are sent unsigned; the endpoint is expected to be a signing proxy
//! or a local emulator.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::clients::{ClientError, ClientResult, ClusterManager};
use crate::cluster::{ClusterArn, ClusterDescriptor, ClusterState};
use crate::config::{ApiVersion, HealthCheckConfig};

const SERVICE: &str = "cluster API";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescribeClusterResponse {
    cluster_info: ClusterInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListClustersResponse {
    #[serde(default)]
    cluster_info_list: Vec<ClusterInfo>,
    next_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClusterInfo {
    cluster_arn: Option<String>,
    cluster_name: String,
    state: ClusterState,
}

/// REST client for the cluster-management API.
#[derive(Clone)]
pub struct MskRestClient {
    client: reqwest::Client,
    endpoint: Url,
    api_version: ApiVersion,
}

impl MskRestClient {
    /// Client for the configured endpoint, or the regional default when unset.
    pub fn new(config: &HealthCheckConfig) -> ClientResult<Self> {
        let raw = config.cluster_api_endpoint();
        let endpoint = Url::parse(&raw).map_err(|e| {
            ClientError::InvalidRequest(format!("Invalid endpoint '{}': {}", raw, e))
        })?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.cluster_api.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            api_version: config.cluster_api.api_version,
        })
    }

    fn base_segments(&self) -> &'static [&'static str] {
        match self.api_version {
            ApiVersion::V1 => &["v1", "clusters"],
            ApiVersion::V2 => &["api", "v2", "clusters"],
        }
    }

    /// Build `{endpoint}/<version path>[/<arn>]` with the ARN as one encoded segment.
    fn url(&self, arn: Option<&ClusterArn>) -> ClientResult<Url> {
        let mut url = self.endpoint.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                let reason = format!("Endpoint '{}' cannot be a base URL", self.endpoint);
                ClientError::InvalidRequest(reason)
            })?;
            segments.pop_if_empty().extend(self.base_segments());
            if let Some(arn) = arn {
                segments.push(arn.as_str());
            }
        }
        Ok(url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> ClientResult<T> {
        let response = request.header("accept", "application/json").send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                service: SERVICE,
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ClusterManager for MskRestClient {
    async fn list_clusters(&self) -> ClientResult<Vec<ClusterArn>> {
        let url = self.url(None)?;
        let mut arns = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let mut request = self.client.get(url.clone());
            if let Some(token) = &next_token {
                request = request.query(&[("nextToken", token)]);
            }
            let page: ListClustersResponse = self.get_json(request).await?;

            for info in page.cluster_info_list {
                match info.cluster_arn {
                    Some(arn) => arns.push(ClusterArn::new(arn)),
                    None => tracing::warn!(
                        cluster_name = %info.cluster_name,
                        "Listed cluster has no ARN, skipping"
                    ),
                }
            }

            match page.next_token.filter(|t| !t.is_empty()) {
                Some(token) => next_token = Some(token),
                None => break,
            }
        }

        tracing::debug!(count = arns.len(), "Listed clusters");
        Ok(arns)
    }

    async fn describe_cluster(&self, arn: &ClusterArn) -> ClientResult<ClusterDescriptor> {
        let url = self.url(Some(arn))?;
        let response: DescribeClusterResponse = self.get_json(self.client.get(url)).await?;
        let info = response.cluster_info;

        Ok(ClusterDescriptor::new(arn.clone(), info.cluster_name, info.state))
    }
}

impl std::fmt::Debug for MskRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MskRestClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_version", &self.api_version)
            .finish()
    }
}
