use crate::analysis::Analysis;
use crate::entrypoint::Entrypoint;
use crate::error::{map_status, Error, Result};
use crate::request::AnalyzeRequest;
use crate::transport::{HttpTransport, Transport};
use serde::de::DeserializeOwned;
use ssllabs_core::{Host, Info, StatusCodes};
use url::Url;

/// Session against one API entrypoint.
///
/// Holds the host of the most recently completed analysis. A client is not
/// meant to be shared between concurrent analyses; use one per scan.
#[derive(Debug)]
pub struct Client<T: Transport = HttpTransport> {
    entrypoint: Entrypoint,
    transport: T,
    host: Option<Host>,
}

impl Client<HttpTransport> {
    /// Client for the public API with the default transport.
    pub fn new() -> Result<Self> {
        Ok(Client::with_transport(HttpTransport::new()?))
    }

    pub fn with_entrypoint(entrypoint: &str) -> Result<Self> {
        let entrypoint = Entrypoint::parse(entrypoint)?;
        Ok(Client { entrypoint, transport: HttpTransport::new()?, host: None })
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(transport: T) -> Self {
        Client { entrypoint: Entrypoint::default(), transport, host: None }
    }

    pub fn entrypoint(&self) -> &Entrypoint {
        &self.entrypoint
    }

    /// Replace the entrypoint. On error the previous one is kept.
    pub fn set_entrypoint(&mut self, value: &str) -> Result<()> {
        self.entrypoint = Entrypoint::parse(value)?;
        Ok(())
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn info(&self) -> Result<Info> {
        self.fetch(self.entrypoint.endpoint("info")?)
    }

    pub fn status_codes(&self) -> Result<StatusCodes> {
        self.fetch(self.entrypoint.endpoint("getStatusCodes")?)
    }

    /// Start a new assessment. No request is made until the returned
    /// [`Analysis`] is iterated; see its docs for the polling contract.
    pub fn analyze(&mut self, request: impl Into<AnalyzeRequest>) -> Analysis<'_, T> {
        Analysis::new(self, request.into())
    }

    /// Result of the last analysis that reached a terminal status.
    pub fn host(&self) -> Result<&Host> {
        self.host.as_ref().ok_or(Error::NoHost)
    }

    /// Move the stored host out, leaving the client without one.
    pub fn take_host(&mut self) -> Result<Host> {
        self.host.take().ok_or(Error::NoHost)
    }

    pub(crate) fn store_host(&mut self, host: Host) {
        self.host = Some(host);
    }

    pub(crate) fn fetch<R: DeserializeOwned>(&self, url: Url) -> Result<R> {
        let resp = self.transport.get(&url)?;
        if !resp.is_success() {
            return Err(map_status(resp.status, &resp.reason, &resp.body));
        }
        Ok(serde_json::from_str(&resp.body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTransport;
    use serde_json::json;

    #[test]
    fn host_before_analysis_is_an_error() {
        let mock = MockTransport::new();
        let mut client = Client::with_transport(&mock);
        assert!(matches!(client.host(), Err(Error::NoHost)));
        assert!(matches!(client.take_host(), Err(Error::NoHost)));
    }

    #[test]
    fn info_hits_info_path() {
        let mock = MockTransport::new();
        mock.push_json(&json!({ "engineVersion": "1.24.4", "criteriaVersion": "2009l" }));
        let client = Client::with_transport(&mock);
        let info = client.info().unwrap();
        assert_eq!(info.engine_version.as_deref(), Some("1.24.4"));
        assert_eq!(mock.requests()[0].as_str(), "https://api.ssllabs.com/api/v2/info");
    }

    #[test]
    fn status_codes_hits_get_status_codes() {
        let mock = MockTransport::new();
        mock.push_json(&json!({ "statusDetails": { "TESTING_SSL2": "Testing SSL 2.0" } }));
        let client = Client::with_transport(&mock);
        let codes = client.status_codes().unwrap();
        assert_eq!(codes.describe("TESTING_SSL2"), Some("Testing SSL 2.0"));
        assert_eq!(mock.requests()[0].path(), "/api/v2/getStatusCodes");
    }

    #[test]
    fn reference_calls_map_errors() {
        let mock = MockTransport::new();
        mock.push(503, "Service Unavailable", "");
        mock.push(404, "Not Found", "");
        let client = Client::with_transport(&mock);
        assert_eq!(client.info().unwrap_err().kind(), Some(crate::ResponseErrorKind::ServiceUnavailable));
        assert!(matches!(client.status_codes(), Err(Error::Status { status: 404, .. })));
    }

    #[test]
    fn bad_json_is_a_decode_error() {
        let mock = MockTransport::new();
        mock.push(200, "OK", "not json");
        let client = Client::with_transport(&mock);
        assert!(matches!(client.info(), Err(Error::Decode(_))));
    }

    #[test]
    fn set_entrypoint_replaces_all_parts() {
        let mock = MockTransport::new();
        let mut client = Client::with_transport(&mock);
        client.set_entrypoint("http://localhost:8080/api/v3/").unwrap();
        assert_eq!(client.entrypoint().scheme(), "http");
        assert_eq!(client.entrypoint().authority(), "localhost:8080");
        assert_eq!(client.entrypoint().path(), "/api/v3");

        assert!(client.set_entrypoint("::not a url::").is_err());
        assert_eq!(client.entrypoint().url(), "http://localhost:8080/api/v3");
    }
}
