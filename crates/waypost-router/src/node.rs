//! Routing trie
//!
//! The trie is keyed host first, then method, then one level per path
//! segment. Host and method levels reuse the literal child map; the empty
//! host key holds patterns that apply to any host.
//!
//! ## Priority
//! At every level:
//! 1. Literal child
//! 2. Single-segment wildcard child
//! 3. Catch-all child
//!
//! A failed descent backtracks to the next candidate before giving up.

use crate::config::Collision;
use crate::error::RouteErrorKind;
use crate::pattern::{Pattern, Segment};
use smallvec::SmallVec;
use std::collections::HashMap;

/// Values bound by wildcards on the winning path, left to right.
/// A catch-all contributes one entry per segment it consumed.
pub(crate) type Captures<'p> = SmallVec<[&'p str; 8]>;

/// A registered route: handler plus the pattern that owns it
#[derive(Debug)]
pub(crate) struct Route<H> {
    pub(crate) handler: H,
    pub(crate) pattern: Pattern,
}

impl<H> Route<H> {
    /// Zip the pattern's wildcard names with captured values.
    pub(crate) fn params(&self, captures: &[&str]) -> HashMap<String, String> {
        let mut params = HashMap::new();
        let mut values = captures.iter().copied();

        for segment in self.pattern.segments() {
            match segment {
                Segment::Literal(_) => {}
                Segment::Wildcard(name) => {
                    if let Some(value) = values.next() {
                        params.insert(name.clone(), value.to_string());
                    }
                }
                Segment::CatchAll(name) => {
                    let rest: Vec<&str> = values.by_ref().collect();
                    params.insert(name.clone(), rest.join("/"));
                    break;
                }
            }
        }

        params
    }
}

/// Trie vertex
#[derive(Debug)]
pub(crate) struct Node<H> {
    /// Literal children (host, method, or path segment text)
    children: HashMap<String, Node<H>>,
    /// `{name}` child
    wildcard: Option<Box<Node<H>>>,
    /// `{name...}` child, always terminal
    catch_all: Option<Box<Node<H>>>,
    /// Set only on terminal nodes
    route: Option<Route<H>>,
}

impl<H> Default for Node<H> {
    fn default() -> Self {
        Self {
            children: HashMap::new(),
            wildcard: None,
            catch_all: None,
            route: None,
        }
    }
}

impl<H> Node<H> {
    /// Insert a route.
    ///
    /// Returns the pattern that was overwritten, if any. Under
    /// [`Collision::Reject`] a collision leaves the trie untouched.
    pub(crate) fn insert(
        &mut self,
        pattern: Pattern,
        handler: H,
        collision: Collision,
    ) -> Result<Option<Pattern>, RouteErrorKind> {
        if collision == Collision::Reject {
            if let Some(existing) = self.find(&pattern) {
                return Err(RouteErrorKind::Conflict {
                    existing: existing.pattern.to_string(),
                });
            }
        }

        let mut node = self.child_mut(pattern.host()).child_mut(pattern.method());
        for segment in pattern.segments() {
            node = match segment {
                Segment::Literal(text) => node.child_mut(text),
                Segment::Wildcard(_) => node.wildcard.get_or_insert_with(Box::default).as_mut(),
                Segment::CatchAll(_) => node.catch_all.get_or_insert_with(Box::default).as_mut(),
            };
        }

        let previous = node.route.replace(Route { handler, pattern });
        Ok(previous.map(|route| route.pattern))
    }

    fn child_mut(&mut self, key: &str) -> &mut Node<H> {
        self.children.entry(key.to_string()).or_default()
    }

    /// Route registered at exactly this pattern's position, if any
    fn find(&self, pattern: &Pattern) -> Option<&Route<H>> {
        let mut node = self.children.get(pattern.host())?.children.get(pattern.method())?;
        for segment in pattern.segments() {
            node = match segment {
                Segment::Literal(text) => node.children.get(text.as_str())?,
                Segment::Wildcard(_) => node.wildcard.as_deref()?,
                Segment::CatchAll(_) => node.catch_all.as_deref()?,
            };
        }
        node.route.as_ref()
    }

    /// Resolve a request against the trie rooted at `self`.
    ///
    /// The exact host is tried first, then the any-host subtree. With
    /// `head_fallback`, a `HEAD` request that matches nothing on a host
    /// level is retried as `GET` on that same level.
    pub(crate) fn lookup<'n, 'p>(
        &'n self,
        host: &str,
        method: &str,
        path: &'p str,
        head_fallback: bool,
    ) -> Option<(&'n Route<H>, Captures<'p>)> {
        let segments: SmallVec<[&str; 16]> = path.strip_prefix('/')?.split('/').collect();
        let mut captures = Captures::new();

        let hosts = [host, ""];
        let hosts = if host.is_empty() { &hosts[1..] } else { &hosts[..] };

        for host in hosts {
            let Some(host_node) = self.children.get(*host) else {
                continue;
            };
            if let Some(route) = host_node.lookup_method(method, &segments, &mut captures) {
                return Some((route, captures));
            }
            if head_fallback && method == "HEAD" {
                if let Some(route) = host_node.lookup_method("GET", &segments, &mut captures) {
                    return Some((route, captures));
                }
            }
        }

        None
    }

    fn lookup_method<'n, 'p>(
        &'n self,
        method: &str,
        segments: &[&'p str],
        captures: &mut Captures<'p>,
    ) -> Option<&'n Route<H>> {
        self.children.get(method)?.match_path(segments, captures)
    }

    /// Depth-first descent. On failure `captures` is left as it was found.
    fn match_path<'n, 'p>(
        &'n self,
        segments: &[&'p str],
        captures: &mut Captures<'p>,
    ) -> Option<&'n Route<H>> {
        let Some((&segment, rest)) = segments.split_first() else {
            return self.route.as_ref();
        };

        if let Some(child) = self.children.get(segment) {
            if let Some(route) = child.match_path(rest, captures) {
                return Some(route);
            }
        }

        // A trailing slash yields an empty final segment; only literals
        // (the `{$}` anchor) and catch-alls may consume it.
        if !segment.is_empty() {
            if let Some(child) = &self.wildcard {
                captures.push(segment);
                if let Some(route) = child.match_path(rest, captures) {
                    return Some(route);
                }
                captures.pop();
            }
        }

        let route = self.catch_all.as_ref()?.route.as_ref()?;
        captures.extend(segments.iter().copied());
        Some(route)
    }

    /// Every route in the subtree
    pub(crate) fn routes(&self) -> Vec<&Route<H>> {
        let mut routes = Vec::new();
        self.collect_routes(&mut routes);
        routes
    }

    fn collect_routes<'n>(&'n self, out: &mut Vec<&'n Route<H>>) {
        out.extend(self.route.as_ref());
        for child in self.children.values() {
            child.collect_routes(out);
        }
        for child in self.wildcard.iter().chain(self.catch_all.iter()) {
            child.collect_routes(out);
        }
    }

    /// Whether any host level has a subtree for `method`
    pub(crate) fn has_method(&self, method: &str) -> bool {
        self.children
            .values()
            .any(|host| host.children.contains_key(method))
    }
}
