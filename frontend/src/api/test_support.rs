#[cfg(test)]
pub mod mock {
    use crate::api::client::{register_mock, MockResponse, TestResponder};
    use crate::api::ApiError;
    use reqwest::Method;
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    pub const GET: Method = Method::GET;
    pub const POST: Method = Method::POST;
    pub const PUT: Method = Method::PUT;
    pub const DELETE: Method = Method::DELETE;

    #[derive(Clone)]
    pub struct MockServer {
        inner: Arc<Mutex<Inner>>,
        base: String,
    }

    struct Inner {
        routes: Vec<Route>,
        received: Vec<RecordedRequest>,
    }

    #[derive(Clone)]
    struct Route {
        method: Method,
        path: String,
        query: Vec<(String, String)>,
        headers: Vec<(String, String)>,
        response: MockResponse,
    }

    #[derive(Clone, Debug)]
    pub struct RecordedRequest {
        pub method: Method,
        pub path: String,
        pub query: Vec<(String, String)>,
        pub headers: Vec<(String, String)>,
        pub body: Option<Value>,
    }

    impl MockServer {
        pub async fn start_async() -> Self {
            Self::start()
        }

        pub fn start() -> Self {
            static NEXT_ID: AtomicUsize = AtomicUsize::new(1);
            let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
            Self {
                inner: Arc::new(Mutex::new(Inner {
                    routes: Vec::new(),
                    received: Vec::new(),
                })),
                base: format!("http://mock-{}", id),
            }
        }

        pub fn url(&self, path: &str) -> String {
            let base_url = format!("{}{}", self.base, path);
            register_mock(base_url.clone(), Arc::new(self.clone()));
            base_url
        }

        pub fn mock<F>(&self, f: F)
        where
            F: FnOnce(&mut When, &mut Then),
        {
            let mut when = When::default();
            let mut then = Then::default();
            f(&mut when, &mut then);

            let method = when.method.clone().expect("mock requires method");
            let path = when.path.clone().expect("mock requires path");
            let response = MockResponse::json(
                then.status.unwrap_or(200),
                then.body.unwrap_or_else(|| serde_json::json!({})),
            );

            let mut inner = self.inner.lock().expect("mock lock");
            inner.routes.push(Route {
                method,
                path,
                query: when.query,
                headers: when.headers,
                response,
            });
        }

        pub fn received(&self) -> Vec<RecordedRequest> {
            self.inner.lock().expect("mock lock").received.clone()
        }

        pub fn hits(&self, method: Method, path: &str) -> usize {
            self.received()
                .iter()
                .filter(|req| req.method == method && req.path == path)
                .count()
        }
    }

    impl TestResponder for MockServer {
        fn respond(&self, request: &reqwest::Request) -> Result<MockResponse, ApiError> {
            let method = request.method().clone();
            let path = request.url().path().to_string();
            let query: Vec<(String, String)> = request
                .url()
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
            let headers: Vec<(String, String)> = request
                .headers()
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_ascii_lowercase(),
                        value.to_str().unwrap_or_default().to_string(),
                    )
                })
                .collect();
            let body = request
                .body()
                .and_then(|body| body.as_bytes())
                .and_then(|bytes| serde_json::from_slice(bytes).ok());

            let mut inner = self.inner.lock().map_err(|_| ApiError::unknown("mock lock"))?;
            inner.received.push(RecordedRequest {
                method: method.clone(),
                path: path.clone(),
                query: query.clone(),
                headers: headers.clone(),
                body,
            });

            let route = inner
                .routes
                .iter()
                .rev()
                .find(|route| {
                    route.method == method
                        && route.path == path
                        && route.query.iter().all(|pair| query.contains(pair))
                        && route.headers.iter().all(|pair| headers.contains(pair))
                })
                .cloned();

            route
                .map(|route| route.response)
                .ok_or_else(|| ApiError::unknown(format!("No mock for {} {}", method, path)))
        }
    }

    #[derive(Default)]
    pub struct When {
        method: Option<Method>,
        path: Option<String>,
        query: Vec<(String, String)>,
        headers: Vec<(String, String)>,
    }

    impl When {
        pub fn method(&mut self, method: Method) -> &mut Self {
            self.method = Some(method);
            self
        }

        pub fn path(&mut self, path: &str) -> &mut Self {
            self.path = Some(path.to_string());
            self
        }

        pub fn query_param(&mut self, key: &str, value: &str) -> &mut Self {
            self.query.push((key.to_string(), value.to_string()));
            self
        }

        pub fn header(&mut self, name: &str, value: &str) -> &mut Self {
            self.headers
                .push((name.to_ascii_lowercase(), value.to_string()));
            self
        }
    }

    #[derive(Default)]
    pub struct Then {
        status: Option<u16>,
        body: Option<Value>,
    }

    impl Then {
        pub fn status(&mut self, status: u16) -> &mut Self {
            self.status = Some(status);
            self
        }

        pub fn json_body(&mut self, body: Value) -> &mut Self {
            self.body = Some(body);
            self
        }
    }
}
