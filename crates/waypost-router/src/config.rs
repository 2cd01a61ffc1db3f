//! Router configuration

/// What to do when a registration lands on a node that already has a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Collision {
    /// First registration wins; the later one is refused
    #[default]
    Reject,
    /// Last registration wins
    Replace,
}

/// Router configuration
#[derive(Debug, Clone, Default)]
pub struct RouterConfig {
    /// Policy for registrations that collide with an existing route
    pub collision: Collision,
    /// Retry unmatched `HEAD` requests against `GET` routes
    pub head_fallback: bool,
}

impl RouterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collision(mut self, collision: Collision) -> Self {
        self.collision = collision;
        self
    }

    pub fn head_fallback(mut self, enabled: bool) -> Self {
        self.head_fallback = enabled;
        self
    }
}
