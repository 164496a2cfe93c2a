//! Postman collection model.
//!
//! Only the subset of the Postman v2 schema that the page generator renders is modelled.
//! Unknown fields are ignored; missing optional fields default to empty.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::CollectionError;

/// Root of a Postman collection export.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub item: Vec<Item>,
}

impl Collection {
    pub fn from_json(json: &str) -> Result<Self, CollectionError> {
        let collection: Collection = serde_json::from_str(json)?;
        debug!(
            root_items = collection.item.len(),
            "Parsed Postman collection"
        );
        Ok(collection)
    }

    /// Reads and parses a collection file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CollectionError> {
        let path = path.as_ref();
        info!(source_file = %path.display(), "Loading Postman collection");
        let json = fs::read_to_string(path).map_err(|source| CollectionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

/// A folder or a request. See [`Item::is_query`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub item: Vec<Item>,
    #[serde(default)]
    pub request: Option<Request>,
    #[serde(default)]
    pub response: Vec<Response>,
}

impl Item {
    /// A query is a leaf carrying a non-empty request. Everything else is a folder.
    pub fn is_query(&self) -> bool {
        self.item.is_empty() && self.request.as_ref().is_some_and(|r| !r.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub url: Option<RequestUrl>,
    #[serde(default)]
    pub body: Option<Body>,
    #[serde(default)]
    pub header: Vec<Header>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub auth: Option<Auth>,
}

impl Request {
    pub fn is_empty(&self) -> bool {
        self.method.is_empty()
            && self.url.is_none()
            && self.raw_body().is_empty()
            && self.header.is_empty()
            && self.description.as_deref().unwrap_or_default().is_empty()
            && self.auth.as_ref().map_or(true, |a| a.kind.is_empty())
    }

    pub fn raw_url(&self) -> &str {
        self.url.as_ref().map_or("", RequestUrl::raw)
    }

    pub fn raw_body(&self) -> &str {
        self.body.as_ref().map_or("", |b| b.raw.as_str())
    }

    pub fn auth_kind(&self) -> AuthKind {
        match self.auth.as_ref().map(|a| a.kind.as_str()) {
            Some("noauth") => AuthKind::NoAuth,
            _ => AuthKind::Bearer,
        }
    }
}

/// Postman stores a request URL either as a plain string or as an object with a `raw` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestUrl {
    Raw(String),
    Object { raw: String },
}

impl RequestUrl {
    pub fn raw(&self) -> &str {
        match self {
            RequestUrl::Raw(raw) | RequestUrl::Object { raw } => raw,
        }
    }
}

impl<'de> Deserialize<'de> for RequestUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(raw) => Ok(RequestUrl::Raw(raw)),
            Value::Object(map) => match map.get("raw") {
                None => Ok(RequestUrl::Object { raw: String::new() }),
                Some(Value::String(raw)) => Ok(RequestUrl::Object { raw: raw.clone() }),
                Some(_) => Err(de::Error::custom("url.raw must be a string")),
            },
            _ => Err(de::Error::custom(
                "url field is neither a string nor a recognized object",
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Body {
    #[serde(default)]
    pub raw: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Header {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Auth {
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// How the authorization line of a rendered request is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthKind {
    NoAuth,
    Bearer,
}

/// A saved example response, rendered as a worked example under its query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(rename = "originalRequest", default)]
    pub original_request: Option<Request>,
}
