//! Remote synchronisation: publishes generated pages and removes the ones that disappeared.
//!
//! # Steps
//! 1. Upsert every top-level page, then every sub-page, so a parent always exists
//!    remotely before a child names it.
//! 2. Record each processed slug in the new manifest, whether or not its upsert worked.
//! 3. Delete every slug of the previous manifest missing from the new one, children
//!    before parents (see [`SlugManifest::stale_since`]).
//!
//! # Error Handling
//! No step aborts the run. Every failed call is logged and collected in
//! [`SynchroniseReport::failures`]; callers decide how to surface them. Persisting the
//! new manifest is left to the caller.

use tracing::{error, info};

use crate::contract::{NewPage, PagePublisher, PageUpdate};
use crate::error::PublishError;
use crate::generate::Page;
use crate::manifest::SlugManifest;

#[derive(Debug, Clone)]
pub struct SynchroniseConfig {
    /// Category every published page is filed under.
    pub category_slug: String,
}

/// The remote call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    Lookup,
    Create,
    Reveal,
    Update,
    Delete,
}

#[derive(Debug)]
pub struct SyncFailure {
    pub slug: String,
    pub action: SyncAction,
    pub error: PublishError,
}

#[derive(Debug, Default)]
pub struct SynchroniseReport {
    /// Every slug processed this run, in upsert order.
    pub manifest: SlugManifest,
    pub created: Vec<String>,
    pub updated: Vec<String>,
    pub deleted: Vec<String>,
    pub failures: Vec<SyncFailure>,
}

impl SynchroniseReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn fail(&mut self, slug: &str, action: SyncAction, error: PublishError) {
        error!(slug, ?action, error = %error, "[SYNC][ERROR] Remote call failed");
        self.failures.push(SyncFailure {
            slug: slug.to_owned(),
            action,
            error,
        });
    }
}

pub async fn synchronise<P>(
    pages: &[Page],
    previous: &SlugManifest,
    config: &SynchroniseConfig,
    publisher: &P,
) -> SynchroniseReport
where
    P: PagePublisher + ?Sized,
{
    info!(
        pages = pages.len(),
        previous = previous.len(),
        "[SYNC] Starting page synchronisation"
    );
    let mut report = SynchroniseReport::default();

    let roots = pages.iter().filter(|p| p.parent_slug.is_none());
    let children = pages.iter().filter(|p| p.parent_slug.is_some());
    for page in roots.chain(children) {
        upsert(page, config, publisher, &mut report).await;
    }

    let stale = previous.stale_since(&report.manifest);
    info!(stale = stale.len(), "[SYNC] Removing stale pages");
    for slug in stale {
        match publisher.delete_page(&slug).await {
            Ok(()) => {
                info!(slug = %slug, "[SYNC][DELETE] Deleted page");
                report.deleted.push(slug);
            }
            Err(e) => report.fail(&slug, SyncAction::Delete, e),
        }
    }

    info!(
        created = report.created.len(),
        updated = report.updated.len(),
        deleted = report.deleted.len(),
        failures = report.failures.len(),
        "[SYNC] Synchronisation finished"
    );
    report
}

async fn upsert<P>(
    page: &Page,
    config: &SynchroniseConfig,
    publisher: &P,
    report: &mut SynchroniseReport,
) where
    P: PagePublisher + ?Sized,
{
    report.manifest.push(page.slug.clone());

    match publisher.page_exists(&page.slug).await {
        Ok(true) => {
            let update = PageUpdate {
                title: page.title.clone(),
                body: page.content.clone(),
                hidden: None,
                category_slug: Some(config.category_slug.clone()),
                parent_slug: page.parent_slug.clone(),
            };
            match publisher.update_page(&page.slug, &update).await {
                Ok(()) => {
                    info!(slug = %page.slug, "[SYNC][UPDATE] Updated page");
                    report.updated.push(page.slug.clone());
                }
                Err(e) => report.fail(&page.slug, SyncAction::Update, e),
            }
        }
        Ok(false) => {
            let new_page = NewPage {
                title: page.slug.clone(),
                body: page.content.clone(),
                hidden: true,
                category_slug: config.category_slug.clone(),
                parent_slug: page.parent_slug.clone(),
            };
            if let Err(e) = publisher.create_page(&new_page).await {
                report.fail(&page.slug, SyncAction::Create, e);
                return;
            }
            let reveal = PageUpdate {
                title: page.title.clone(),
                body: page.content.clone(),
                hidden: Some(false),
                ..PageUpdate::default()
            };
            match publisher.update_page(&page.slug, &reveal).await {
                Ok(()) => {
                    info!(slug = %page.slug, "[SYNC][CREATE] Created page");
                    report.created.push(page.slug.clone());
                }
                Err(e) => report.fail(&page.slug, SyncAction::Reveal, e),
            }
        }
        Err(e) => report.fail(&page.slug, SyncAction::Lookup, e),
    }
}
