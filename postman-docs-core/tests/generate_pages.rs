use postman_docs_core::collection::Collection;
use postman_docs_core::error::GenerateError;
use postman_docs_core::generate::{generate, GenerateConfig, Page, DEFAULT_MAX_PAGE_DEPTH};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const FIXTURE: &str = include_str!("fixtures/collection.json");

fn config(output_dir: &Path) -> GenerateConfig {
    GenerateConfig {
        output_dir: output_dir.to_path_buf(),
        prefix: "api".to_string(),
        link_base: "reference".to_string(),
        base_url: "https://shop.test".to_string(),
        max_page_depth: DEFAULT_MAX_PAGE_DEPTH,
    }
}

fn page<'a>(pages: &'a [Page], slug: &str) -> &'a Page {
    pages
        .iter()
        .find(|p| p.slug == slug)
        .unwrap_or_else(|| panic!("no page {slug}"))
}

#[test]
fn test_pages_are_emitted_parents_first() {
    let out = tempdir().unwrap();
    let collection = Collection::from_json(FIXTURE).expect("fixture parses");
    let report = generate(&collection, &config(out.path())).expect("generation succeeds");

    let order: Vec<(&str, Option<&str>)> = report
        .pages
        .iter()
        .map(|p| (p.slug.as_str(), p.parent_slug.as_deref()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("api-health", None),
            ("api-users", None),
            ("api-orders", None),
            ("api-orders-refunds", Some("api-orders")),
            ("api-orders-archive", Some("api-orders")),
        ]
    );
    assert!(report.write_failures.is_empty());
}

#[test]
fn test_every_page_is_written_to_disk() {
    let out = tempdir().unwrap();
    let collection = Collection::from_json(FIXTURE).unwrap();
    let report = generate(&collection, &config(out.path())).unwrap();

    for p in &report.pages {
        let on_disk = fs::read_to_string(out.path().join(format!("{}.md", p.slug)))
            .expect("page file exists");
        assert_eq!(on_disk, p.content, "file content of {}", p.slug);
    }
}

#[test]
fn test_query_root_page_renders_request_block() {
    let out = tempdir().unwrap();
    let collection = Collection::from_json(FIXTURE).unwrap();
    let report = generate(&collection, &config(out.path())).unwrap();

    let health = page(&report.pages, "api-health");
    assert_eq!(health.title, "Health");
    assert_eq!(
        health.content,
        "\n**Health**\n\n```json js\n// GET https://shop.test/health\n\n```\n\n"
    );
}

#[test]
fn test_folder_of_queries_is_a_single_page() {
    let out = tempdir().unwrap();
    let collection = Collection::from_json(FIXTURE).unwrap();
    let report = generate(&collection, &config(out.path())).unwrap();

    assert!(!report.pages.iter().any(|p| p.slug.starts_with("api-users-")));
    let users = page(&report.pages, "api-users");
    assert!(users.content.starts_with("\nUser management.\n\n"));
    assert!(users.content.contains("**Create user**\n\nCreates a user account.\n"));
    assert!(users.content.contains("// POST https://shop.test/users\n"));
    assert!(users.content.contains("**Example: Created**"));
    assert!(users.content.contains("**Get user**"));
    assert!(!users.content.contains("Subsections"));
}

#[test]
fn test_mixed_folder_links_its_sub_pages() {
    let out = tempdir().unwrap();
    let collection = Collection::from_json(FIXTURE).unwrap();
    let report = generate(&collection, &config(out.path())).unwrap();

    let orders = page(&report.pages, "api-orders");
    assert!(orders.content.ends_with(
        "\n***\n\n# Subsections\n- [Refunds](/reference/api-orders-refunds)\n- [Archive](/reference/api-orders-archive)\n"
    ));
    assert!(orders.content.contains("// GET https://shop.test/orders"));

    let refunds = page(&report.pages, "api-orders-refunds");
    assert!(refunds.content.starts_with("\nRefund flows.\n\n**Create refund**"));
    assert!(refunds.content.contains("# Disputes\n\n**Open dispute**"));

    let archive = page(&report.pages, "api-orders-archive");
    assert_eq!(archive.content, "\nNothing here yet.");
}

#[test]
fn test_every_query_renders_exactly_one_request_block() {
    let out = tempdir().unwrap();
    let collection = Collection::from_json(FIXTURE).unwrap();
    let report = generate(&collection, &config(out.path())).unwrap();
    let all: String = report.pages.iter().map(|p| p.content.as_str()).collect();

    for line in [
        "GET https://shop.test/health",
        "POST https://shop.test/users",
        "GET https://shop.test/users/:id",
        "GET https://shop.test/orders",
        "POST https://shop.test/refunds",
        "POST https://shop.test/disputes",
    ] {
        let block = format!("```json js\n// {line}\n");
        assert_eq!(all.matches(&block).count(), 1, "{line}");
    }
}

#[test]
fn test_deeper_page_depth_splits_nested_folders() {
    let out = tempdir().unwrap();
    let collection = Collection::from_json(FIXTURE).unwrap();
    let mut cfg = config(out.path());
    cfg.max_page_depth = 3;
    let report = generate(&collection, &cfg).unwrap();

    let slugs: Vec<&str> = report.pages.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(
        slugs,
        vec![
            "api-health",
            "api-users",
            "api-orders",
            "api-orders-refunds",
            "api-orders-refunds-disputes",
            "api-orders-archive",
        ]
    );
    let disputes = page(&report.pages, "api-orders-refunds-disputes");
    assert_eq!(disputes.parent_slug.as_deref(), Some("api-orders-refunds"));
    assert!(page(&report.pages, "api-orders-refunds")
        .content
        .contains("- [Disputes](/reference/api-orders-refunds-disputes)\n"));
}

#[test]
fn test_single_page_depth_inlines_everything() {
    let out = tempdir().unwrap();
    let collection = Collection::from_json(FIXTURE).unwrap();
    let mut cfg = config(out.path());
    cfg.max_page_depth = 1;
    let report = generate(&collection, &cfg).unwrap();

    assert_eq!(report.pages.len(), 3);
    let orders = page(&report.pages, "api-orders");
    assert!(orders.content.contains("# Refunds\n"));
    assert!(orders.content.contains("## Disputes\n"));
}

#[test]
fn test_login_example() {
    let out = tempdir().unwrap();
    let collection = Collection::from_json(
        r#"{"item":[{"name":"Login","item":[],"request":{"method":"POST","url":"{{BaseURL}}/login","body":{"raw":"{}"}}}]}"#,
    )
    .unwrap();
    let mut cfg = config(out.path());
    cfg.base_url = "https://x.io".to_string();
    let report = generate(&collection, &cfg).unwrap();

    assert_eq!(report.pages.len(), 1);
    assert_eq!(report.pages[0].slug, "api-login");
    assert!(report.pages[0].content.contains("POST https://x.io/login"));
}

#[test]
fn test_unwritable_page_is_reported_and_kept() {
    let out = tempdir().unwrap();
    // A directory squatting on the file name makes the write fail.
    fs::create_dir(out.path().join("api-health.md")).unwrap();
    let collection = Collection::from_json(FIXTURE).unwrap();
    let report = generate(&collection, &config(out.path())).unwrap();

    assert_eq!(report.write_failures.len(), 1);
    assert_eq!(report.write_failures[0].slug, "api-health");
    assert_eq!(report.pages.len(), 5);
    assert!(out.path().join("api-orders-archive.md").is_file());
}

#[test]
fn test_output_dir_that_is_a_file_aborts() {
    let out = tempdir().unwrap();
    let blocker = out.path().join("docs");
    fs::write(&blocker, "not a directory").unwrap();
    let collection = Collection::from_json(FIXTURE).unwrap();

    let err = generate(&collection, &config(&blocker)).unwrap_err();
    assert!(matches!(err, GenerateError::OutputDir { .. }));
}
