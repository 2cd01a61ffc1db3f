//! Request adapter
//!
//! Pulls the (method, host, path) triple the router matches on out of an
//! `http::Request`.

use crate::{Error, Result};
use http::header::HOST;
use http::Request;
use waypost_router::{Match, Router};

/// The parts of a request the router looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteParts<'a> {
    pub method: &'a str,
    /// Host without port; empty when the request names none
    pub host: &'a str,
    pub path: &'a str,
}

/// Extract routing parts from a request
///
/// The host comes from the URI authority (absolute-form targets and
/// HTTP/2), otherwise from the `Host` header. The port is dropped.
pub fn route_parts<B>(req: &Request<B>) -> Result<RouteParts<'_>> {
    let host = match req.uri().host() {
        Some(host) => host,
        None => match req.headers().get(HOST) {
            Some(value) => {
                let host = value.to_str().map_err(|_| {
                    Error::InvalidHost(String::from_utf8_lossy(value.as_bytes()).into_owned())
                })?;
                strip_port(host)
            }
            None => "",
        },
    };

    let path = req.uri().path();
    if !path.starts_with('/') {
        return Err(Error::InvalidPath(path.to_string()));
    }

    Ok(RouteParts {
        method: req.method().as_str(),
        host,
        path,
    })
}

/// Match a request against a router
///
/// # Returns
/// `Ok(None)` when no route matches; `Err` only when the request itself
/// cannot be routed
pub fn match_request<'r, H, B>(router: &'r Router<H>, req: &Request<B>) -> Result<Option<Match<'r, H>>> {
    let parts = route_parts(req)?;
    let found = router.at(parts.method, parts.host, parts.path);
    if found.is_none() {
        tracing::debug!(method = parts.method, host = parts.host, path = parts.path, "no route matched");
    }
    Ok(found)
}

/// `example.com:8080` -> `example.com`, `[::1]:8080` -> `[::1]`
fn strip_port(authority: &str) -> &str {
    if authority.starts_with('[') {
        return match authority.find(']') {
            Some(end) => &authority[..=end],
            None => authority,
        };
    }
    match authority.rsplit_once(':') {
        Some((host, _)) => host,
        None => authority,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    #[test]
    fn test_parts_from_absolute_uri() {
        let req = Request::get("https://api.example.com:8443/users/1?x=y").body(()).unwrap();
        let parts = route_parts(&req).unwrap();
        assert_eq!(
            parts,
            RouteParts {
                method: "GET",
                host: "api.example.com",
                path: "/users/1",
            }
        );
    }

    #[test]
    fn test_parts_from_host_header() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/users")
            .header(HOST, "api.example.com:8080")
            .body(())
            .unwrap();
        let parts = route_parts(&req).unwrap();
        assert_eq!(parts.method, "POST");
        assert_eq!(parts.host, "api.example.com");
        assert_eq!(parts.path, "/users");
    }

    #[test]
    fn test_parts_without_host() {
        let req = Request::get("/users").body(()).unwrap();
        assert_eq!(route_parts(&req).unwrap().host, "");
    }

    #[test]
    fn test_asterisk_form_is_rejected() {
        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("*")
            .body(())
            .unwrap();
        assert!(matches!(route_parts(&req), Err(Error::InvalidPath(_))));
    }

    #[test]
    fn test_strip_port() {
        assert_eq!(strip_port("example.com"), "example.com");
        assert_eq!(strip_port("example.com:80"), "example.com");
        assert_eq!(strip_port("[::1]:8080"), "[::1]");
        assert_eq!(strip_port("[::1]"), "[::1]");
    }

    #[test]
    fn test_match_request() {
        let mut router: Router<&str> = Router::new();
        router.handle("GET api.example.com/users/{id}", "api").unwrap();
        router.handle("GET /users/{id}", "any").unwrap();

        let req = Request::get("/users/5")
            .header(HOST, "api.example.com")
            .body(())
            .unwrap();
        let m = match_request(&router, &req).unwrap().unwrap();
        assert_eq!(*m.handler, "api");
        assert_eq!(m.param("id"), Some("5"));

        let req = Request::get("/users/5")
            .header(HOST, "www.example.com")
            .body(())
            .unwrap();
        assert_eq!(*match_request(&router, &req).unwrap().unwrap().handler, "any");

        let req = Request::delete("/users/5").body(()).unwrap();
        assert!(match_request(&router, &req).unwrap().is_none());
    }
}
