//! In-memory backend implementing [`HttpTransport`].
//!
//! Routes are matched on method and URL path. Unmatched requests get the
//! same `404 {"detail": "Not Found"}` the real backend produces, and every
//! request is recorded for later inspection.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::cell::RefCell;

use super::gateway::{HttpRequest, HttpResponse, HttpTransport, Method};
use super::{ApiError, ApiResult};

type Handler = Box<dyn Fn(&HttpRequest) -> HttpResponse>;

struct Route {
    method: Method,
    path: String,
    handler: Handler,
}

#[derive(Default)]
pub struct MockBackend {
    routes: RefCell<Vec<Route>>,
    requests: RefCell<Vec<HttpRequest>>,
    failure: RefCell<Option<String>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` with a fixed status and JSON body.
    pub fn on(&self, method: Method, path: &str, status: u16, body: Value) {
        let body = body.to_string();
        self.on_with(method, path, move |_| HttpResponse::new(status, body.clone()));
    }

    /// Answer `method path` by calling `handler`; replaces an earlier route.
    pub fn on_with<F>(&self, method: Method, path: &str, handler: F)
    where
        F: Fn(&HttpRequest) -> HttpResponse + 'static,
    {
        let mut routes = self.routes.borrow_mut();
        routes.retain(|route| !(route.method == method && route.path == path));
        routes.push(Route {
            method,
            path: path.to_string(),
            handler: Box::new(handler),
        });
    }

    /// Make every following request fail at the transport level.
    pub fn fail_with(&self, message: &str) {
        *self.failure.borrow_mut() = Some(message.to_string());
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<HttpRequest> {
        self.requests
            .borrow()
            .iter()
            .filter(|request| request.method == method && path_of(&request.url) == path)
            .cloned()
            .collect()
    }
}

#[async_trait(?Send)]
impl HttpTransport for MockBackend {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        self.requests.borrow_mut().push(request.clone());

        if let Some(message) = self.failure.borrow().as_ref() {
            return Err(ApiError::Transport(message.clone()));
        }

        let path = path_of(&request.url);
        let routes = self.routes.borrow();
        let response = routes
            .iter()
            .find(|route| route.method == request.method && route.path == path)
            .map(|route| (route.handler)(&request))
            .unwrap_or_else(|| HttpResponse::new(404, json!({ "detail": "Not Found" }).to_string()));

        Ok(response)
    }
}

fn path_of(url: &str) -> &str {
    let without_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    match without_scheme.find('/') {
        Some(index) => &without_scheme[index..],
        None => "/",
    }
}
