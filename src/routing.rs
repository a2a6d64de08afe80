//! Turning routes and row keys into URLs.

use url::Url;

use crate::error::BoxError;

/// What a button should link to: a route such as `item/view` plus the query
/// parameters which identify the row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteParams {
    pub route: String,
    pub params: Vec<(String, String)>,
}

impl RouteParams {
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            params: Vec::new(),
        }
    }

    pub fn param(
        mut self,
        name: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        self.params.push((name.into(), value.to_string()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

pub trait Router: Send + Sync {
    fn to_route(&self, params: &RouteParams) -> Result<String, BoxError>;
}

impl<F> Router for F
where
    F: Fn(&RouteParams) -> Result<String, BoxError> + Send + Sync,
{
    fn to_route(&self, params: &RouteParams) -> Result<String, BoxError> {
        self(params)
    }
}

/// Maps `item/view` with `id=5` to `/item/view?id=5`.
///
/// Routes without a `/` are taken to be relative to the current controller
/// (if one has been set).
#[derive(Clone, Debug, Default)]
pub struct PathRouter {
    prefix: String,
    current_controller: Option<String>,
    base: Option<Url>,
}

impl PathRouter {
    pub fn new() -> Self {
        Default::default()
    }

    /// A path which is prepended to every route, e.g. `/admin`.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into().trim_end_matches('/').to_string();
        self
    }

    pub fn current_controller(
        mut self,
        controller: impl Into<String>,
    ) -> Self {
        self.current_controller = Some(controller.into());
        self
    }

    /// Produce absolute URLs by joining every path onto `base`.
    pub fn absolute(mut self, base: Url) -> Self {
        self.base = Some(base);
        self
    }

    pub fn resolve_route(&self, route: &str) -> String {
        if let Some(route) = route.strip_prefix('/') {
            return route.to_string();
        }
        match &self.current_controller {
            Some(controller) if !route.contains('/') => {
                format!("{controller}/{route}")
            }
            _ => route.to_string(),
        }
    }
}

impl Router for PathRouter {
    fn to_route(&self, params: &RouteParams) -> Result<String, BoxError> {
        let mut path =
            format!("{}/{}", self.prefix, self.resolve_route(&params.route));
        if !params.params.is_empty() {
            path.push('?');
            path.push_str(&serde_urlencoded::to_string(&params.params)?);
        }

        match &self.base {
            Some(base) => Ok(base.join(&path)?.to_string()),
            None => Ok(path),
        }
    }
}
