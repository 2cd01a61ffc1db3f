//! waypost-core: embedding helpers for the waypost router
//!
//! `waypost-router` only knows strings. This crate connects it to the
//! `http` crate's request types and provides the read/write-locked router
//! a server shares between its setup code and its connection tasks.
//!
//! ## Example
//! ```
//! use waypost_core::{match_request, Router};
//!
//! let mut router: Router<&str> = Router::new();
//! router.handle("GET api.example.com/users/{id}", "user").unwrap();
//!
//! let req = http::Request::get("http://api.example.com:8080/users/7")
//!     .body(())
//!     .unwrap();
//! let m = match_request(&router, &req).unwrap().unwrap();
//! assert_eq!(*m.handler, "user");
//! assert_eq!(m.param("id"), Some("7"));
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod error;
pub mod request;
pub mod shared;

// Re-exports
pub use error::{Error, Result};
pub use request::{match_request, route_parts, RouteParts};
pub use shared::{RouteMatch, SharedRouter};

pub use waypost_router::{
    Collision, Match, Pattern, PatternError, RouteError, RouteErrorKind, Router, RouterConfig,
    Segment,
};
