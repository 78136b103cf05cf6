use thiserror::Error;
use tracing::debug;

const CATALOG_PATH: &str = "catalog";
const DETAIL_PREFIX: &str = "detail/";

/// A navigable destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Catalog,
    Detail { title: String },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RouteError {
    #[error("unknown route: {0}")]
    Unknown(String),
}

impl RouteError {
    pub fn user_message(&self) -> String {
        match self {
            RouteError::Unknown(path) => format!("No screen for \"{}\"", path),
        }
    }
}

impl Route {
    pub fn detail(title: impl Into<String>) -> Self {
        Route::Detail {
            title: title.into(),
        }
    }

    /// Parse a route path such as `catalog` or `detail/Dark`.
    ///
    /// The title is everything after the first `/`, so titles may themselves
    /// contain slashes.
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        if path == CATALOG_PATH {
            return Ok(Route::Catalog);
        }
        if let Some(title) = path.strip_prefix(DETAIL_PREFIX) {
            return Ok(Route::detail(title));
        }
        Err(RouteError::Unknown(path.to_string()))
    }

    pub fn path(&self) -> String {
        match self {
            Route::Catalog => CATALOG_PATH.to_string(),
            Route::Detail { title } => format!("{DETAIL_PREFIX}{title}"),
        }
    }
}

/// Back stack of routes. The start destination is never popped.
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Catalog)
    }
}

impl Navigator {
    pub fn new(start: Route) -> Self {
        Self { stack: vec![start] }
    }

    pub fn current(&self) -> &Route {
        // stack always holds the start destination
        &self.stack[self.stack.len() - 1]
    }

    pub fn navigate(&mut self, route: Route) {
        self.stack.push(route);
        debug!(route = %self.current().path(), depth = self.depth(), "navigate");
    }

    pub fn navigate_path(&mut self, path: &str) -> Result<(), RouteError> {
        let route = Route::parse(path)?;
        self.navigate(route);
        Ok(())
    }

    /// Returns `false` when already at the start destination.
    pub fn pop_back(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        self.stack.pop();
        debug!(route = %self.current().path(), "back");
        true
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}
