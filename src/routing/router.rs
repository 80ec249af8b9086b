//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Hold the fixed route list
//! - Look up the route for a request path
//! - Fall back to 404 when nothing matches
//!
//! # Design Decisions
//! - Immutable after construction
//! - Linear scan; the list has three entries

use crate::http::request::RequestLine;
use crate::http::response::Response;
use crate::routing::handlers::{self, AppInfo};

/// Handler signature: every route renders from the same process facts.
pub type Handler = fn(&AppInfo) -> Response;

/// A literal path bound to a handler.
#[derive(Clone, Copy)]
pub struct Route {
    pub path: &'static str,
    pub handler: Handler,
}

const ROUTES: &[Route] = &[
    Route {
        path: "/hello",
        handler: handlers::hello,
    },
    Route {
        path: "/info",
        handler: handlers::info,
    },
    Route {
        path: "/doyoque",
        handler: handlers::doyoque,
    },
];

/// Dispatches parsed requests to the built-in routes.
#[derive(Debug, Clone)]
pub struct Router {
    info: AppInfo,
}

impl Router {
    pub fn new(info: AppInfo) -> Self {
        Self { info }
    }

    /// Find the route for an exact path.
    pub fn match_path(&self, path: &str) -> Option<&'static Route> {
        ROUTES.iter().find(|r| r.path == path)
    }

    /// Build the response for a request. Never fails.
    pub fn dispatch(&self, request: &RequestLine) -> Response {
        match self.match_path(request.path()) {
            Some(route) => (route.handler)(&self.info),
            None => handlers::not_found(),
        }
    }

    /// Paths served by this router, in lookup order.
    pub fn paths(&self) -> impl Iterator<Item = &'static str> {
        ROUTES.iter().map(|r| r.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response::{ContentType, StatusCode};

    fn router() -> Router {
        Router::new(AppInfo {
            env: Some("test".into()),
            telegram_url: None,
            port: 1234,
        })
    }

    fn dispatch(line: &str) -> Response {
        router().dispatch(&RequestLine::parse(line).unwrap())
    }

    #[test]
    fn hello_is_plain_text() {
        let res = dispatch("GET /hello HTTP/1.1\r\n");
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.content_type(), ContentType::Text);
        assert_eq!(res.body(), "Hello, World!");
    }

    #[test]
    fn info_and_doyoque_are_json() {
        let res = dispatch("GET /info HTTP/1.1\r\n");
        assert_eq!(res.content_type(), ContentType::Json);
        assert!(res.body().contains(r#""port":1234"#));

        let res = dispatch("GET /doyoque HTTP/1.1\r\n");
        assert_eq!(res.content_type(), ContentType::Json);
        assert!(res.body().starts_with(r#"{"name":"doyoque""#));
    }

    #[test]
    fn unknown_paths_are_404() {
        for line in [
            "GET / HTTP/1.1\r\n",
            "GET /hello/ HTTP/1.1\r\n",
            "GET /HELLO HTTP/1.1\r\n",
            "GET /hellothere HTTP/1.1\r\n",
        ] {
            let res = dispatch(line);
            assert_eq!(res.status(), StatusCode::NOT_FOUND, "{line:?}");
            assert_eq!(res.body(), "Not Found");
        }
    }

    #[test]
    fn method_does_not_change_dispatch() {
        let get = dispatch("GET /hello HTTP/1.1\r\n");
        let post = dispatch("POST /hello HTTP/1.1\r\n");
        let custom = dispatch("BREW /hello HTTP/1.1\r\n");
        assert_eq!(get, post);
        assert_eq!(get, custom);
    }

    #[test]
    fn query_string_is_ignored() {
        let res = dispatch("GET /hello?x=1 HTTP/1.1\r\n");
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[test]
    fn route_list() {
        assert_eq!(router().paths().collect::<Vec<_>>(), ["/hello", "/info", "/doyoque"]);
    }
}
