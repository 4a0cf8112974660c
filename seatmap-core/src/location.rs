use std::str::FromStr;
use url::Url;

use crate::{ClientError, ClientResult};

/// Origin used to resolve site-relative locations such as `/seats?flight_id=7`.
const LOCAL_ORIGIN: &str = "http://localhost/";

/// The address a client flow was opened with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    url: Url,
}

impl PageLocation {
    pub fn parse(raw: &str) -> ClientResult<Self> {
        let raw = raw.trim();
        let url = match Url::parse(raw) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(LOCAL_ORIGIN)
                .and_then(|base| base.join(raw))
                .map_err(|e| ClientError::InvalidLocation(format!("{}: {}", raw, e)))?,
            Err(e) => return Err(ClientError::InvalidLocation(format!("{}: {}", raw, e))),
        };
        Ok(Self { url })
    }

    /// First value of a query parameter. Empty values count as absent.
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    pub fn require(&self, name: &str) -> ClientResult<String> {
        self.query_param(name)
            .ok_or_else(|| ClientError::MissingParameter(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl FromStr for PageLocation {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Refuses `.` and `..` as path segments. URL normalization would drop
/// them, so the built path would name a different resource.
pub fn check_segments(segments: &[&str]) -> ClientResult<()> {
    match segments.iter().find(|segment| matches!(**segment, "." | "..")) {
        Some(segment) => Err(ClientError::InvalidLocation(format!(
            "path segment {:?} is not allowed",
            segment
        ))),
        None => Ok(()),
    }
}

/// Builds a site path from a base route and percent-encoded segments,
/// e.g. `route("/payment", &["7", "12A"])` is `/payment/7/12A`.
pub fn route(base: &str, segments: &[&str]) -> ClientResult<String> {
    check_segments(segments)?;
    let mut url = Url::parse(LOCAL_ORIGIN)
        .and_then(|origin| origin.join(base))
        .map_err(|e| ClientError::InvalidLocation(format!("{}: {}", base, e)))?;
    url.path_segments_mut()
        .map_err(|_| ClientError::InvalidLocation(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url.path().to_string())
}
