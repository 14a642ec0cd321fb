//! Remote table backend over a row-oriented HTTP data API (PostgREST style).
//!
//! Wire contract, relative to the configured base URL:
//!
//! | operation  | request                                  |
//! |------------|------------------------------------------|
//! | `read_all` | `GET    <base>/<table>?select=*`         |
//! | `create`   | `POST   <base>/<table>`                  |
//! | `update`   | `PATCH  <base>/<table>?id=eq.<id>`       |
//! | `delete`   | `DELETE <base>/<table>?id=eq.<id>`       |
//!
//! Predicates cannot be pushed down, so `find_*`, `update` and `delete` pull
//! the whole table first and filter locally. Unlike [`FileStore`](crate::FileStore),
//! failures are never swallowed: any non-2xx answer becomes
//! [`Error::Remote`] with the status and body.

use crate::backend::{Predicate, RecordStore};
use crate::error::{Error, Result};
use crate::record::{Patch, Record};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// HTTP verbs the table protocol needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Read rows.
    Get,
    /// Insert rows.
    Post,
    /// Partially update rows.
    Patch,
    /// Remove rows.
    Delete,
}

impl Method {
    /// Upper-case verb, as on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// One request against a table, independent of the HTTP library.
#[derive(Debug, Clone, PartialEq)]
pub struct RestRequest {
    /// Verb.
    pub method: Method,
    /// Table name, appended to the base URL as a path segment.
    pub table: String,
    /// Query pairs, unencoded.
    pub query: Vec<(String, String)>,
    /// Extra headers.
    pub headers: Vec<(&'static str, String)>,
    /// JSON body, if any.
    pub body: Option<Value>,
}

impl RestRequest {
    /// Value of a header, if set.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and raw body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestResponse {
    /// HTTP status code.
    pub status: u16,
    /// Body text.
    pub body: String,
}

impl RestResponse {
    /// `true` for any 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends [`RestRequest`]s somewhere and returns what came back.
///
/// Implementations report transport failures as [`Error::Http`] and otherwise
/// return the response as-is, including error statuses.
pub trait HttpClient: Send + Sync {
    /// Perform one request, blocking until the response body is read.
    fn send(&self, req: &RestRequest) -> Result<RestResponse>;
}

/// A collection stored as rows of a remote table.
pub struct RemoteTable<T> {
    client: Arc<dyn HttpClient>,
    table: String,
    api_key: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Record> RemoteTable<T> {
    /// Table `table` reached through `client`, authenticating with `api_key`.
    pub fn new(client: Arc<dyn HttpClient>, api_key: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
            api_key: api_key.into(),
            _marker: PhantomData,
        }
    }

    /// Name of the backing table.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    fn request(&self, method: Method, query: Vec<(String, String)>, body: Option<Value>) -> RestRequest {
        let mut headers = vec![
            ("apikey", self.api_key.clone()),
            ("Authorization", format!("Bearer {}", self.api_key)),
        ];
        if body.is_some() {
            headers.push(("Content-Type", "application/json".to_string()));
            headers.push(("Prefer", "return=representation".to_string()));
        }
        RestRequest {
            method,
            table: self.table.clone(),
            query,
            headers,
            body,
        }
    }

    fn execute(&self, req: RestRequest) -> Result<Vec<T>> {
        let resp = self.client.send(&req)?;
        debug!(
            method = req.method.as_str(),
            table = %self.table,
            status = resp.status,
            "remote table request"
        );
        if !resp.is_success() {
            return Err(Error::Remote {
                status: resp.status,
                body: resp.body,
            });
        }
        if resp.body.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&resp.body).map_err(|e| Error::Deserialize(e.to_string()))
    }
}

fn by_id(id: &str) -> Vec<(String, String)> {
    vec![("id".to_string(), format!("eq.{id}"))]
}

impl<T: Record> RecordStore<T> for RemoteTable<T> {
    fn read_all(&self) -> Result<Vec<T>> {
        let query = vec![("select".to_string(), "*".to_string())];
        self.execute(self.request(Method::Get, query, None))
    }

    fn create(&self, item: T) -> Result<T> {
        let body = serde_json::to_value(&item).map_err(|e| Error::Serialize(e.to_string()))?;
        let rows = self.execute(self.request(Method::Post, Vec::new(), Some(body)))?;
        Ok(rows.into_iter().next().unwrap_or(item))
    }

    fn update(&self, pred: Predicate<'_, T>, patch: &Patch) -> Result<Option<T>> {
        let Some(current) = self.find_one(pred)? else {
            return Ok(None);
        };
        let merged = patch.apply(&current)?;
        if patch.is_empty() {
            return Ok(Some(merged));
        }
        let body = Value::Object(patch.fields().clone());
        let rows = self.execute(self.request(Method::Patch, by_id(current.id()), Some(body)))?;
        Ok(Some(rows.into_iter().next().unwrap_or(merged)))
    }

    /// One `DELETE` per matching row, in `read_all` order. Not atomic: if a
    /// request fails, rows deleted before it stay deleted and the error is
    /// returned.
    fn delete(&self, pred: Predicate<'_, T>) -> Result<bool> {
        let doomed = self.find_many(pred)?;
        for record in &doomed {
            self.execute(self.request(Method::Delete, by_id(record.id()), None))?;
        }
        Ok(!doomed.is_empty())
    }
}

impl<T> std::fmt::Debug for RemoteTable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteTable")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

// ---- reqwest transport (feature-gated) ---------------------------------------

/// [`HttpClient`] backed by `reqwest`'s blocking client.
///
/// Do not call from inside an async runtime worker; wrap calls in
/// `spawn_blocking` there.
#[cfg(feature = "remote")]
pub struct RestClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

#[cfg(feature = "remote")]
impl RestClient {
    /// Client for the data API rooted at `base_url` (trailing `/` ignored).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::blocking::Client::builder().build()?;
        Self::with_http(http, base_url)
    }

    /// Like [`new`](Self::new), over a preconfigured `reqwest` client
    /// (timeouts, proxy settings, extra root certificates).
    pub fn with_http(http: reqwest::blocking::Client, base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(Error::Config("remote base url is empty".into()));
        }
        Ok(Self { http, base_url })
    }

    /// Base URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(feature = "remote")]
impl HttpClient for RestClient {
    fn send(&self, req: &RestRequest) -> Result<RestResponse> {
        let url = format!("{}/{}", self.base_url, req.table);
        let method = match req.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self.http.request(method, &url).query(&req.query);
        for (name, value) in &req.headers {
            builder = builder.header(*name, value.as_str());
        }
        if let Some(body) = &req.body {
            let bytes = serde_json::to_vec(body).map_err(|e| Error::Serialize(e.to_string()))?;
            builder = builder.body(bytes);
        }
        let resp = builder.send()?;
        let status = resp.status().as_u16();
        let body = resp.text()?;
        Ok(RestResponse { status, body })
    }
}

#[cfg(feature = "remote")]
impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
