use crate::error::Result;
use std::fmt;
use url::Url;

pub const DEFAULT_ENTRYPOINT: &str = "https://api.ssllabs.com/api/v2";

/// Base URL of the API, kept as scheme, authority and path.
///
/// The URL is taken apart on parse and reassembled by [`Entrypoint::url`], so
/// the result is the same URL but not necessarily the same string: query and
/// fragment are dropped and trailing slashes on the path are stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entrypoint {
    scheme: String,
    authority: String,
    path: String,
}

impl Entrypoint {
    pub fn parse(value: &str) -> Result<Self> {
        let url = Url::parse(value)?;
        let host = url.host_str().ok_or(url::ParseError::EmptyHost)?;

        let mut authority = String::new();
        if !url.username().is_empty() {
            authority.push_str(url.username());
            if let Some(pw) = url.password() {
                authority.push(':');
                authority.push_str(pw);
            }
            authority.push('@');
        }
        // host_str() already brackets IPv6 literals
        authority.push_str(host);
        if let Some(port) = url.port() {
            authority.push(':');
            authority.push_str(&port.to_string());
        }

        Ok(Entrypoint {
            scheme: url.scheme().to_string(),
            authority,
            path: url.path().trim_end_matches('/').to_string(),
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn url(&self) -> String {
        format!("{}://{}{}", self.scheme, self.authority, self.path)
    }

    /// URL of an API call below the base path, e.g. `analyze`.
    pub fn endpoint(&self, name: &str) -> Result<Url> {
        Ok(Url::parse(&format!("{}/{}", self.url(), name))?)
    }
}

impl Default for Entrypoint {
    fn default() -> Self {
        Entrypoint {
            scheme: "https".into(),
            authority: "api.ssllabs.com".into(),
            path: "/api/v2".into(),
        }
    }
}

impl fmt::Display for Entrypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url())
    }
}
