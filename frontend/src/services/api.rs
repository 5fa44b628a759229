use std::rc::Rc;

use async_trait::async_trait;
use gloo::net::http::{Request, RequestBuilder};
use gloo::storage::{LocalStorage, Storage};
use shared::api::{
    ApiError, ApiResult, Gateway, HttpRequest, HttpResponse, HttpTransport, Method,
    SessionProvider,
};
use shared::{DashboardConfig, SchoolApi};

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const USERNAME_KEY: &str = "username";

/// Browser `fetch` transport built on gloo.
#[derive(Debug, Default)]
pub struct GlooTransport;

impl GlooTransport {
    fn builder(request: &HttpRequest) -> RequestBuilder {
        let builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Patch => Request::patch(&request.url),
            Method::Delete => Request::delete(&request.url),
        };

        let builder = request
            .headers
            .iter()
            .fold(builder, |builder, (name, value)| builder.header(name, value));

        if request.query.is_empty() {
            builder
        } else {
            builder.query(
                request
                    .query
                    .iter()
                    .map(|(key, value)| (key.as_str(), value.as_str())),
            )
        }
    }
}

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        let builder = Self::builder(&request);
        let prepared = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Transport(e.to_string()))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        Ok(HttpResponse::new(status, body))
    }
}

/// Reads the bearer token from local storage on every request, so a token
/// written by the login page is picked up without rebuilding the API.
#[derive(Debug, Default)]
pub struct LocalStorageSession;

impl SessionProvider for LocalStorageSession {
    fn access_token(&self) -> Option<String> {
        // Stored as a plain string, not JSON
        LocalStorage::raw()
            .get_item(ACCESS_TOKEN_KEY)
            .ok()
            .flatten()
            .filter(|token| !token.is_empty())
    }
}

/// Name written by the login page, shown in the header.
pub fn stored_username() -> Option<String> {
    LocalStorage::raw()
        .get_item(USERNAME_KEY)
        .ok()
        .flatten()
        .filter(|name| !name.trim().is_empty())
}

/// Build every resource API against the configured backend.
pub fn school_api(config: &DashboardConfig) -> SchoolApi {
    let gateway = Gateway::new(
        config.api_base_url.clone(),
        Rc::new(GlooTransport),
        Rc::new(LocalStorageSession),
    );
    SchoolApi::new(gateway)
}
