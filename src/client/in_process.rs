use crate::api::routes::create_router;
use crate::client::{ApiRequest, ApiResponse, Method, Transport};
use crate::error::{Result, SyncError};
use crate::store::MemoryStore;
use axum::body::Body;
use axum::http::{header, Request};
use axum::Router;
use log::debug;
use std::sync::Arc;
use tower::ServiceExt;

/// Dispatches requests straight into an axum router without opening a
/// socket. Used to run the client against the development service in-process.
#[derive(Clone)]
pub struct InProcessTransport {
    router: Router,
}

impl InProcessTransport {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    pub fn with_store(store: Arc<MemoryStore>) -> Self {
        Self::new(create_router().with_state(store))
    }
}

fn http_method(method: Method) -> axum::http::Method {
    match method {
        Method::Get => axum::http::Method::GET,
        Method::Post => axum::http::Method::POST,
        Method::Put => axum::http::Method::PUT,
        Method::Delete => axum::http::Method::DELETE,
    }
}

#[async_trait::async_trait]
impl Transport for InProcessTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        debug!("{} {} (in-process)", request.method, request.path);

        let mut builder = Request::builder()
            .method(http_method(request.method))
            .uri(&request.path);
        let body = match &request.body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(value)?)
            }
            None => Body::empty(),
        };
        let http_request = builder
            .body(body)
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        let response = match self.router.clone().oneshot(http_request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };
        let status = response.status().as_u16();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        Ok(ApiResponse {
            status,
            body: body.to_vec(),
        })
    }
}
