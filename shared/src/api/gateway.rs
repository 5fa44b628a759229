use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::{ApiError, ApiResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully prepared request, handed to the transport as-is.
///
/// `url` never carries a query string; the transport is responsible for
/// encoding `query` onto it.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Request body parsed as JSON, `Value::Null` when there is none.
    pub fn json_body(&self) -> Value {
        self.body
            .as_deref()
            .and_then(|body| serde_json::from_str(body).ok())
            .unwrap_or(Value::Null)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and returns whatever the server answered.
///
/// Implementations report only transport failures as errors; a non-2xx
/// status is a successful exchange and is classified by the gateway.
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse>;
}

/// Source of the bearer token, consulted on every request.
pub trait SessionProvider {
    fn access_token(&self) -> Option<String>;
}

/// In-memory session for tests and non-browser callers.
#[derive(Debug, Default)]
pub struct StaticSession {
    token: RefCell<Option<String>>,
}

impl StaticSession {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: RefCell::new(token),
        }
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self::new(Some(token.into()))
    }

    pub fn set_token(&self, token: Option<String>) {
        *self.token.borrow_mut() = token;
    }
}

impl SessionProvider for StaticSession {
    fn access_token(&self) -> Option<String> {
        self.token.borrow().clone()
    }
}

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Shared HTTP client configuration used by every resource API.
#[derive(Clone)]
pub struct Gateway {
    base_url: String,
    transport: Rc<dyn HttpTransport>,
    session: Rc<dyn SessionProvider>,
    clock: Rc<dyn Clock>,
}

impl PartialEq for Gateway {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url
            && Rc::ptr_eq(&self.transport, &other.transport)
            && Rc::ptr_eq(&self.session, &other.session)
    }
}

impl fmt::Debug for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Gateway {
    pub fn new(
        base_url: impl Into<String>,
        transport: Rc<dyn HttpTransport>,
        session: Rc<dyn SessionProvider>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            transport,
            session,
            clock: Rc::new(SystemClock),
        }
    }

    /// Replace the clock used for client-side timestamps
    pub fn with_clock(mut self, clock: Rc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Issue one request. The session is read here, per call.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        query: &[(&str, String)],
    ) -> ApiResult<HttpResponse> {
        let mut headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Accept".to_string(), "application/json".to_string()),
        ];
        if let Some(token) = self.session.access_token() {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        let body = body
            .map(|value| serde_json::to_string(&value))
            .transpose()
            .map_err(|e| ApiError::Encode(e.to_string()))?;

        let request = HttpRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            query: query
                .iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect(),
            headers,
            body,
        };

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("{} {} failed: {}", method, path, e);
                return Err(e);
            }
        };

        log::debug!("{} {} -> {}", method, path, response.status);

        if response.is_success() {
            Ok(response)
        } else {
            let error = ApiError::from_status(response.status, &response.body);
            log::warn!("{} {} rejected: {}", method, path, error);
            Err(error)
        }
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let response = self.request(Method::Get, path, None, query).await?;
        decode(&response)
    }

    /// GET a collection from an endpoint that answers 404 when nothing
    /// matches. That 404 is an empty list here, not a failure.
    pub async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<Vec<T>> {
        match self.get_json(path, query).await {
            Err(e) if e.is_not_found() => {
                log::debug!("GET {} matched nothing: {}", path, e);
                Ok(Vec::new())
            }
            result => result,
        }
    }

    pub async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        let response = self.request(method, path, Some(body), &[]).await?;
        decode(&response)
    }

    /// POST a new entity, stamping `created_at` and `updated_at` first.
    pub async fn create<B, T>(&self, path: &str, payload: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let now = self.timestamp();
        let body = stamp(payload, &[("created_at", &now), ("updated_at", &now)])?;
        let response = self.request(Method::Post, path, Some(body), &[]).await?;
        decode(&response)
    }

    /// PATCH/PUT an entity, stamping `updated_at` first.
    pub async fn update<B, T>(&self, method: Method, path: &str, payload: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let now = self.timestamp();
        let body = stamp(payload, &[("updated_at", &now)])?;
        let response = self.request(method, path, Some(body), &[]).await?;
        decode(&response)
    }

    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        self.request(Method::Delete, path, None, &[]).await?;
        Ok(())
    }

    fn timestamp(&self) -> String {
        self.clock.now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> ApiResult<T> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn stamp<B: Serialize + ?Sized>(payload: &B, fields: &[(&str, &str)]) -> ApiResult<Value> {
    let mut value = serde_json::to_value(payload).map_err(|e| ApiError::Encode(e.to_string()))?;
    let object = value
        .as_object_mut()
        .ok_or_else(|| ApiError::Encode("payload must be a JSON object".to_string()))?;
    for (key, stamp) in fields {
        object.insert(key.to_string(), Value::String(stamp.to_string()));
    }
    Ok(value)
}
