//! Page generation: flattens a collection tree into an ordered list of markdown pages.
//!
//! # Layout
//! - Every top-level item becomes a root page with slug `<prefix>-<name>`.
//! - A page above the depth limit inlines its query children and splits every other
//!   child into a sub-page of its own, linked from a `# Subsections` list.
//! - A page at the depth limit renders its whole subtree inline, nested folders
//!   becoming headings one `#` deeper per level.
//!
//! # Ordering
//! Pages are returned in pre-order: a parent always precedes its children. The
//! synchroniser relies on this to create parents before the pages referencing them.
//!
//! # Errors
//! Only failing to create the output directory aborts generation. A page that cannot be
//! written is logged and recorded in [`GenerateReport::write_failures`]; it still appears
//! in [`GenerateReport::pages`] so it can be published.

use std::fs;
use std::path::PathBuf;
use tracing::{error, info};

use crate::collection::{Collection, Item};
use crate::error::GenerateError;
use crate::render::{clean, Renderer};
use crate::slug::{child_slug, root_slug};

/// Root pages plus one level of sub-pages.
pub const DEFAULT_MAX_PAGE_DEPTH: usize = 2;

#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Directory receiving one `<slug>.md` file per page.
    pub output_dir: PathBuf,
    /// Namespace prepended to every top-level slug.
    pub prefix: String,
    /// First path segment of subsection links: `/<link_base>/<slug>`.
    pub link_base: String,
    /// Substituted for `{{BaseURL}}` in request URLs.
    pub base_url: String,
    /// Number of page levels to produce; deeper folders are rendered inline.
    pub max_page_depth: usize,
}

/// One generated markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// `None` for top-level pages.
    pub parent_slug: Option<String>,
    pub slug: String,
    pub title: String,
    pub content: String,
}

#[derive(Debug)]
pub struct WriteFailure {
    pub slug: String,
    pub path: PathBuf,
    pub error: std::io::Error,
}

#[derive(Debug, Default)]
pub struct GenerateReport {
    pub pages: Vec<Page>,
    pub write_failures: Vec<WriteFailure>,
}

/// Renders every page of `collection` and writes it under `config.output_dir`.
pub fn generate(
    collection: &Collection,
    config: &GenerateConfig,
) -> Result<GenerateReport, GenerateError> {
    fs::create_dir_all(&config.output_dir).map_err(|source| GenerateError::OutputDir {
        path: config.output_dir.clone(),
        source,
    })?;

    let generator = PageGenerator {
        config,
        renderer: Renderer::new(&config.base_url),
    };
    let mut report = GenerateReport::default();
    for item in &collection.item {
        let slug = root_slug(&config.prefix, &item.name);
        generator.page(item, slug, None, 1, &mut report);
    }

    info!(
        pages = report.pages.len(),
        write_failures = report.write_failures.len(),
        output_dir = %config.output_dir.display(),
        "Generated markdown pages"
    );
    Ok(report)
}

struct PageGenerator<'a> {
    config: &'a GenerateConfig,
    renderer: Renderer<'a>,
}

impl PageGenerator<'_> {
    fn page(
        &self,
        item: &Item,
        slug: String,
        parent_slug: Option<&str>,
        level: usize,
        report: &mut GenerateReport,
    ) {
        let mut sub_pages = Vec::new();
        let content = if level < self.config.max_page_depth.max(1) {
            self.split_content(item, &slug, &mut sub_pages)
        } else {
            self.renderer.inline(item, 0)
        };

        self.emit(
            Page {
                parent_slug: parent_slug.map(str::to_owned),
                slug: slug.clone(),
                title: clean(&item.name).to_owned(),
                content,
            },
            report,
        );

        for (child, child_slug) in sub_pages {
            self.page(child, child_slug, Some(&slug), level + 1, report);
        }
    }

    /// Content of a page whose non-query children get pages of their own.
    fn split_content<'i>(
        &self,
        item: &'i Item,
        slug: &str,
        sub_pages: &mut Vec<(&'i Item, String)>,
    ) -> String {
        let mut content = String::new();
        let mut has_content = false;

        let description = item.description.as_deref().map(clean).unwrap_or_default();
        if !description.is_empty() {
            content.push_str(&format!("\n{description}\n\n"));
            has_content = true;
        }
        content.push('\n');

        if item.is_query() {
            content.push_str(&self.renderer.query(item));
            has_content = true;
        }

        let mut links = String::new();
        for child in &item.item {
            if child.is_query() {
                content.push_str(&format!("\n{}", self.renderer.query(child)));
                has_content = true;
            } else {
                let sub_slug = child_slug(slug, &child.name);
                links.push_str(&format!(
                    "- [{}](/{}/{})\n",
                    clean(&child.name),
                    self.config.link_base,
                    sub_slug
                ));
                sub_pages.push((child, sub_slug));
            }
        }

        if !sub_pages.is_empty() {
            if has_content {
                content.push_str("\n***\n");
            }
            content.push_str("\n# Subsections\n");
            content.push_str(&links);
        }
        content
    }

    fn emit(&self, page: Page, report: &mut GenerateReport) {
        let path = self.config.output_dir.join(format!("{}.md", page.slug));
        match fs::write(&path, &page.content) {
            Ok(()) => info!(slug = %page.slug, path = %path.display(), "Wrote page"),
            Err(e) => {
                error!(slug = %page.slug, path = %path.display(), error = %e, "Failed to write page");
                report.write_failures.push(WriteFailure {
                    slug: page.slug.clone(),
                    path,
                    error: e,
                });
            }
        }
        report.pages.push(page);
    }
}
