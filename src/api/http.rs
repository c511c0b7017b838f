//! `reqwest` implementation of [`ReportBackend`].

use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::api::backend::ReportBackend;
use crate::api::endpoints::{Endpoint, Params, preview_params};
use crate::error::{Error, Result};
use crate::models::{TaskHandle, TaskStatus};
use crate::state::field_panel::{ChoicesQuery, FieldsQuery};
use crate::state::settings::ClientSettings;
use crate::state::tree::RelatedQuery;

/// Talks to a report-builder server over HTTP.
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: Url,
    prefix: String,
}

impl HttpBackend {
    pub fn new(settings: &ClientSettings) -> Result<Self> {
        let base_url =
            Url::parse(&settings.base_url).map_err(|e| Error::Parse(format!("base URL: {e}")))?;
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(settings.request_timeout())
            .build()?;
        Ok(Self { client, base_url, prefix: settings.path_prefix().to_string() })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn url(&self, endpoint: Endpoint<'_>, params: &Params) -> Result<Url> {
        let mut url = self
            .base_url
            .join(&endpoint.path(&self.prefix))
            .map_err(|e| Error::Parse(format!("endpoint URL: {e}")))?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn checked(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(Error::Server { status: status.as_u16(), body })
    }

    async fn get_text(&self, endpoint: Endpoint<'_>, params: Params) -> Result<String> {
        let url = self.url(endpoint, &params)?;
        log::debug!("GET {url}");
        let response = Self::checked(self.client.get(url).send().await?).await?;
        Ok(response.text().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: Endpoint<'_>) -> Result<T> {
        let url = self.url(endpoint, &Vec::new())?;
        log::debug!("GET {url}");
        let response = Self::checked(self.client.get(url).send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    async fn post_form(&self, endpoint: Endpoint<'_>, params: Params) -> Result<String> {
        let url = self.url(endpoint, &Vec::new())?;
        log::debug!("POST {url}");
        let response = Self::checked(self.client.post(url).form(&params).send().await?).await?;
        Ok(response.text().await?)
    }
}

impl ReportBackend for HttpBackend {
    async fn related_fields(&self, query: &RelatedQuery) -> Result<String> {
        self.get_text(Endpoint::Related, query.params()).await
    }

    async fn fields(&self, query: &FieldsQuery) -> Result<String> {
        self.get_text(Endpoint::Fields, query.params()).await
    }

    async fn choices(&self, query: &ChoicesQuery) -> Result<String> {
        self.get_text(Endpoint::Choices, query.params()).await
    }

    async fn formats(&self) -> Result<String> {
        self.get_text(Endpoint::Formats, Vec::new()).await
    }

    async fn preview(&self, csrf_token: &str, report_id: &str) -> Result<String> {
        self.post_form(Endpoint::Preview, preview_params(csrf_token, report_id)).await
    }

    async fn start_xlsx(&self, report_id: &str) -> Result<TaskHandle> {
        self.get_json(Endpoint::DownloadXlsx { report_id }).await
    }

    async fn check_status(&self, report_id: &str, task_id: &str) -> Result<TaskStatus> {
        self.get_json(Endpoint::CheckStatus { report_id, task_id }).await
    }
}
