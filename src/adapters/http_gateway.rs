use crate::domain::model::AskContextItem;
use crate::domain::ports::{ConfigProvider, DataGateway, Resource};
use crate::utils::error::{InsightsError, Result};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Serialize)]
struct AskRequest<'a> {
    question: &'a str,
    forecast: &'a [AskContextItem],
}

#[derive(Deserialize)]
struct AskResponse {
    answer: String,
}

/// Data gateway backed by the labor-market REST backend.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
    paths: HashMap<Resource, String>,
    ask_path: String,
}

impl HttpGateway {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        validate_url("gateway.base_url", config.base_url())?;

        let client = Client::builder().timeout(config.timeout()).build()?;
        let paths = Resource::ALL
            .iter()
            .map(|r| (*r, config.resource_path(*r)))
            .collect();

        Ok(Self {
            client,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            paths,
            ask_path: config.ask_path(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn resource_url(&self, resource: Resource) -> String {
        let path = self
            .paths
            .get(&resource)
            .map(String::as_str)
            .unwrap_or_else(|| resource.default_path());
        self.endpoint(path)
    }

    async fn read_json<T>(resource: &str, url: String, response: Response) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        tracing::debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(InsightsError::GatewayStatus {
                status: response.status().as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            InsightsError::malformed(resource, format!("response is not valid JSON: {}", e))
        })
    }
}

#[async_trait]
impl DataGateway for HttpGateway {
    async fn fetch(&self, resource: Resource) -> Result<serde_json::Value> {
        let url = self.resource_url(resource);
        tracing::debug!("Making API request to: {}", url);

        let response = self.client.get(&url).send().await?;
        Self::read_json(resource.name(), url, response).await
    }

    async fn ask(&self, question: &str, context: &[AskContextItem]) -> Result<String> {
        let url = self.endpoint(&self.ask_path);
        tracing::debug!("Posting question with {} context rows to: {}", context.len(), url);

        let response = self
            .client
            .post(&url)
            .json(&AskRequest {
                question,
                forecast: context,
            })
            .send()
            .await?;

        let reply: AskResponse = Self::read_json("answer", url, response).await?;
        Ok(reply.answer)
    }
}
