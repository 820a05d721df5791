use matchit::Router;
use percent_encoding::percent_decode_str;
use std::collections::HashMap;
pub use url::Url;

mod error;
pub use error::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterScheme {
    Http,
    Https,
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostMatcher {
    Literal(String),
    AnyOf(Vec<HostMatcher>),
}

impl HostMatcher {
    pub fn matches(&self, host: &str) -> bool {
        match self {
            HostMatcher::Literal(literal) => literal.eq_ignore_ascii_case(host),
            HostMatcher::AnyOf(matchers) => matchers.iter().any(|m| m.matches(host)),
        }
    }
}

impl From<&str> for HostMatcher {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_string())
    }
}

impl<const N: usize> From<[&str; N]> for HostMatcher {
    fn from(value: [&str; N]) -> Self {
        Self::AnyOf(value.into_iter().map(HostMatcher::from).collect())
    }
}

struct PathRouter<T> {
    http: Router<T>,
    https: Router<T>,
    both: Router<T>,
}

impl<T> PathRouter<T> {
    fn new() -> Self {
        Self {
            http: Router::new(),
            https: Router::new(),
            both: Router::new(),
        }
    }

    fn insert(&mut self, scheme: RouterScheme, route: &str, value: T) -> Result<()> {
        if !route.starts_with('/') {
            return Err(RouteError::InvalidPathPattern(route.to_string()));
        }

        match scheme {
            RouterScheme::Http => self.http.insert(route, value)?,
            RouterScheme::Https => self.https.insert(route, value)?,
            RouterScheme::Both => self.both.insert(route, value)?,
        }
        Ok(())
    }

    fn at<'p>(&self, scheme: &str, path: &'p str) -> Option<matchit::Match<'_, 'p, &T>> {
        let scheme_router = match scheme {
            "http" => &self.http,
            "https" => &self.https,
            _ => return None,
        };

        self.both.at(path).or_else(|_| scheme_router.at(path)).ok()
    }
}

/// Routes `http`/`https` URLs to registered values by host and path.
///
/// Hosts are checked in registration order; the first host matcher that
/// accepts the URL host owns the path lookup.
pub struct UriMatcher<T> {
    hosts: Vec<(HostMatcher, PathRouter<T>)>,
}

impl<T> UriMatcher<T> {
    pub fn new() -> Self {
        Self { hosts: Vec::new() }
    }

    pub fn register_route<H>(
        &mut self,
        scheme: RouterScheme,
        host_matcher: H,
        route: &str,
        value: T,
    ) -> Result<()>
    where
        H: Into<HostMatcher>,
    {
        let host_matcher = host_matcher.into();

        let router = self
            .hosts
            .iter_mut()
            .find_map(|(h, router)| (*h == host_matcher).then_some(router));
        match router {
            Some(router) => router.insert(scheme, route, value)?,
            None => {
                let mut router = PathRouter::new();
                router.insert(scheme, route, value)?;
                self.hosts.push((host_matcher, router));
            }
        }

        Ok(())
    }

    pub fn try_match(&self, url: &Url) -> Option<RouteMatch<'_, T>> {
        let host = url.host_str()?;
        let (_, router) = self.hosts.iter().find(|(m, _)| m.matches(host))?;
        let matched = router.at(url.scheme(), url.path())?;

        let mut params = UriParams::with_host(host);
        // path params are handed out decoded, `Url::path` keeps them escaped
        for (key, value) in matched.params.iter() {
            let value = percent_decode_str(value).decode_utf8_lossy();
            params
                .path_params
                .insert(key.to_string(), value.into_owned());
        }
        for (key, value) in url.query_pairs() {
            params
                .query_params
                .insert(key.to_string(), value.to_string());
        }
        params.raw_query = url.query().map(|q| q.to_string());

        Some(RouteMatch {
            value: matched.value,
            params,
        })
    }

    pub fn try_match_str(&self, url: &str) -> Result<Option<RouteMatch<'_, T>>> {
        let url = Url::parse(url)?;
        Ok(self.try_match(&url))
    }
}

impl<T> Default for UriMatcher<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct RouteMatch<'a, T> {
    pub value: &'a T,
    pub params: UriParams,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UriParams {
    pub host: Option<String>,
    pub path_params: HashMap<String, String>,
    pub query_params: HashMap<String, String>,
    /// Query string as it appeared in the URL, for endpoints keyed by a bare `?value`
    pub raw_query: Option<String>,
}

impl UriParams {
    pub fn with_host(host: impl Into<String>) -> Self {
        UriParams {
            host: Some(host.into()),
            ..Default::default()
        }
    }

    pub fn path(&self, key: &str) -> Option<&str> {
        self.path_params.get(key).map(|s| s.as_str())
    }
}
