use http::{Method, Uri};

/// Identifies the request whose handling failed
///
/// Only used for logging; the resolver makes no other demands on the request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    method: Method,
    uri: Uri,
}

impl RequestContext {
    pub const fn new(method: Method, uri: Uri) -> Self {
        Self { method, uri }
    }

    /// Capture the request line from HTTP request parts
    pub fn from_parts(parts: &http::request::Parts) -> Self {
        Self::new(parts.method.clone(), parts.uri.clone())
    }

    pub fn from_request<B>(request: &http::Request<B>) -> Self {
        Self::new(request.method().clone(), request.uri().clone())
    }

    /// Context for failures raised outside of an HTTP request
    pub fn empty() -> Self {
        Self::new(Method::GET, Uri::from_static("/"))
    }

    pub const fn method(&self) -> &Method {
        &self.method
    }

    pub const fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Request path, without the query string
    pub fn path(&self) -> &str {
        self.uri.path()
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_method_and_path() {
        let request = http::Request::builder()
            .method(Method::POST)
            .uri("/orders/42/checkout?dry_run=true")
            .body(())
            .unwrap();

        let context = RequestContext::from_request(&request);

        assert_eq!(context.method(), Method::POST);
        assert_eq!(context.path(), "/orders/42/checkout");
    }

    #[test]
    fn empty_context_points_at_root() {
        let context = RequestContext::empty();
        assert_eq!(context.method(), Method::GET);
        assert_eq!(context.path(), "/");
    }
}
