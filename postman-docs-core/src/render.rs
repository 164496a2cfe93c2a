//! Markdown rendering of collection items.
//!
//! Requests are rendered as a synthetic pseudo-request inside a ```` ```json js ```` fence:
//! a `// METHOD URL` line, an optional authorization placeholder line and the raw body.

use crate::collection::{AuthKind, Item, Request, Response};

const BASE_URL_PLACEHOLDER: &str = "{{BaseURL}}";
const AUTH_PLACEHOLDER: &str = "Authorization: Bearer <token>";

/// Trims spaces, tabs and newlines from both ends.
pub fn clean(text: &str) -> &str {
    text.trim_matches(|c| c == ' ' || c == '\n' || c == '\t')
}

/// Markdown heading for an inline folder `depth` levels below the page root.
///
/// The page root itself (depth 0) gets no heading: its title is the page title.
pub fn heading(depth: usize, name: &str) -> String {
    if depth == 0 {
        String::new()
    } else {
        format!("{} {}\n", "#".repeat(depth), clean(name))
    }
}

pub struct Renderer<'a> {
    base_url: &'a str,
}

impl<'a> Renderer<'a> {
    pub fn new(base_url: &'a str) -> Self {
        Self { base_url }
    }

    /// Replaces every `{{BaseURL}}` token with the configured base URL.
    pub fn resolve_url(&self, raw: &str) -> String {
        raw.replace(BASE_URL_PLACEHOLDER, self.base_url)
    }

    /// Label, description, request block and worked examples of a query item.
    pub fn query(&self, item: &Item) -> String {
        let default_request = Request::default();
        let request = item.request.as_ref().unwrap_or(&default_request);

        let mut out = format!("**{}**\n", clean(&item.name));
        if let Some(description) = non_empty(request.description.as_deref()) {
            out.push_str(&format!("\n{description}\n"));
        }
        out.push_str(&format!(
            "\n```json js{}{}\n{}\n```\n\n",
            self.request_line(request),
            auth_line(request),
            clean(request.raw_body())
        ));
        for response in &item.response {
            out.push_str(&self.example(response));
        }
        out
    }

    /// Renders an item nested inside a page, `depth` levels below the page root.
    pub fn inline(&self, item: &Item, depth: usize) -> String {
        if item.is_query() {
            return format!("\n{}", self.query(item));
        }
        if item.item.is_empty() {
            return format!(
                "\n{}",
                non_empty(item.description.as_deref()).unwrap_or_default()
            );
        }

        let mut out = heading(depth, &item.name);
        if let Some(description) = non_empty(item.description.as_deref()) {
            out.push_str(&format!("\n{description}\n"));
        }
        for child in &item.item {
            out.push_str(&self.inline(child, depth + 1));
        }
        out
    }

    fn request_line(&self, request: &Request) -> String {
        format!(
            "\n// {} {}",
            request.method,
            clean(&self.resolve_url(request.raw_url()))
        )
    }

    fn example(&self, response: &Response) -> String {
        let mut out = format!("\n**Example: {}**\n", clean(&response.name));
        if let Some(request) = &response.original_request {
            out.push_str(&format!(
                "\n```json js\n// Request →{}{}\n{}\n```\n",
                self.request_line(request),
                auth_line(request),
                clean(request.raw_body())
            ));
        }
        out.push_str(&format!(
            "\n```json js\n// Response ←\n{}\n```\n\n",
            clean(response.body.as_deref().unwrap_or_default())
        ));
        out
    }
}

fn auth_line(request: &Request) -> String {
    match request.auth_kind() {
        AuthKind::NoAuth => String::new(),
        AuthKind::Bearer => format!("\n// {AUTH_PLACEHOLDER}"),
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.map(clean).filter(|t| !t.is_empty())
}
