//! # contract: interface to the remote documentation host
//!
//! The synchroniser only speaks to the remote page store through [`PagePublisher`].
//! The CLI crate provides the HTTP implementation; tests use the generated
//! [`MockPagePublisher`].
//!
//! ## Protocol
//! - Pages are addressed by slug.
//! - A new page is created hidden ([`NewPage`]) and then revealed with a [`PageUpdate`].
//! - Existing pages are updated in place; stale pages are deleted.

use async_trait::async_trait;
#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

use crate::error::PublishError;

/// Payload for creating a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPage {
    /// The remote derives the slug from the title, so creation uses the slug as title.
    pub title: String,
    pub body: String,
    pub hidden: bool,
    pub category_slug: String,
    pub parent_slug: Option<String>,
}

/// Payload for updating a page. `None` fields are left untouched remotely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageUpdate {
    pub title: String,
    pub body: String,
    pub hidden: Option<bool>,
    pub category_slug: Option<String>,
    pub parent_slug: Option<String>,
}

/// CRUD-by-slug access to a remote page store.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait PagePublisher: Send + Sync {
    /// Whether a page with this slug exists remotely.
    async fn page_exists(&self, slug: &str) -> Result<bool, PublishError>;

    async fn create_page(&self, page: &NewPage) -> Result<(), PublishError>;

    async fn update_page(&self, slug: &str, update: &PageUpdate) -> Result<(), PublishError>;

    async fn delete_page(&self, slug: &str) -> Result<(), PublishError>;
}
