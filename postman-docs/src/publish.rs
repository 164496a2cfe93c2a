#![doc = "Publisher integration for CLI and core: implements the core `PagePublisher` trait against a readme.io-style `/docs` API."]
//
//! # Publisher Integration (CLI <-> Core)
//!
//! [`ReadmeClient`] is the HTTP implementation of
//! [`postman_docs_core::contract::PagePublisher`] used by the `sync` command.
//!
//! ## Remote contract
//! - `GET /docs/<slug>`: 200 when the page exists, 404 when it does not
//! - `POST /docs`: 201 on create
//! - `PUT /docs/<slug>`: 200 on update
//! - `DELETE /docs/<slug>`: 204 on delete
//!
//! Every request carries `authorization: Basic <credential>` and `x-readme-version`.
//! Any other status is reported as [`PublishError::UnexpectedStatus`].

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::Serialize;

pub use postman_docs_core::contract::{NewPage, PagePublisher, PageUpdate};
use postman_docs_core::error::PublishError;

use crate::load_config::PublishConfig;

const VERSION_HEADER: &str = "x-readme-version";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateDocBody<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    title: &'a str,
    body: &'a str,
    hidden: bool,
    category_slug: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_doc_slug: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateDocBody<'a> {
    title: &'a str,
    body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category_slug: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_doc_slug: Option<&'a str>,
}

pub struct ReadmeClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    version: String,
}

impl ReadmeClient {
    pub fn new(config: &PublishConfig) -> Result<Self, PublishError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PublishError::Transport {
                url: config.endpoint.clone(),
                message: e.to_string(),
            })?;
        tracing::info!(
            endpoint = %config.endpoint,
            version = %config.version,
            api_key_set = !config.api_key.is_empty(),
            "Initialized ReadmeClient"
        );
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            version: config.version.clone(),
        })
    }

    fn docs_url(&self, slug: Option<&str>) -> String {
        match slug {
            Some(slug) => format!("{}/docs/{slug}", self.endpoint),
            None => format!("{}/docs", self.endpoint),
        }
    }

    /// Sends one request and checks the response status against `expected`.
    async fn call(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
        expected: StatusCode,
    ) -> Result<StatusCode, PublishError> {
        let mut request = self
            .http
            .request(method.clone(), url)
            .header(AUTHORIZATION, format!("Basic {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .header(VERSION_HEADER, &self.version);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(error = %e, %method, url, "Request to docs host failed");
            PublishError::Transport {
                url: url.to_owned(),
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        tracing::debug!(%method, url, status = status.as_u16(), "Docs host responded");
        if status == expected {
            Ok(status)
        } else {
            Err(PublishError::UnexpectedStatus {
                method: method.to_string(),
                url: url.to_owned(),
                status: status.as_u16(),
            })
        }
    }
}

#[async_trait]
impl PagePublisher for ReadmeClient {
    async fn page_exists(&self, slug: &str) -> Result<bool, PublishError> {
        let url = self.docs_url(Some(slug));
        match self.call(Method::GET, &url, None, StatusCode::OK).await {
            Ok(_) => Ok(true),
            Err(PublishError::UnexpectedStatus { status: 404, .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn create_page(&self, page: &NewPage) -> Result<(), PublishError> {
        tracing::info!(title = %page.title, parent = ?page.parent_slug, "Creating hidden page");
        let body = serde_json::to_vec(&CreateDocBody {
            kind: "basic",
            title: &page.title,
            body: &page.body,
            hidden: page.hidden,
            category_slug: &page.category_slug,
            parent_doc_slug: page.parent_slug.as_deref(),
        })?;
        self.call(Method::POST, &self.docs_url(None), Some(body), StatusCode::CREATED)
            .await?;
        Ok(())
    }

    async fn update_page(&self, slug: &str, update: &PageUpdate) -> Result<(), PublishError> {
        tracing::info!(slug, hidden = ?update.hidden, "Updating page");
        let body = serde_json::to_vec(&UpdateDocBody {
            title: &update.title,
            body: &update.body,
            hidden: update.hidden,
            category_slug: update.category_slug.as_deref(),
            parent_doc_slug: update.parent_slug.as_deref(),
        })?;
        self.call(Method::PUT, &self.docs_url(Some(slug)), Some(body), StatusCode::OK)
            .await?;
        Ok(())
    }

    async fn delete_page(&self, slug: &str) -> Result<(), PublishError> {
        tracing::info!(slug, "Deleting page");
        self.call(
            Method::DELETE,
            &self.docs_url(Some(slug)),
            None,
            StatusCode::NO_CONTENT,
        )
        .await?;
        Ok(())
    }
}
