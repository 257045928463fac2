use url::Url;

/// Parameters of one assessment run.
///
/// `publish` and `ignore_mismatch` are passed through as given; the service
/// decides whether a combination makes sense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeRequest {
    pub host: String,
    /// Publish results on the public SSL Labs boards.
    pub publish: bool,
    /// Proceed even when the certificate does not match the host name.
    pub ignore_mismatch: bool,
}

impl AnalyzeRequest {
    pub fn new(host: impl Into<String>) -> Self {
        AnalyzeRequest { host: host.into(), publish: false, ignore_mismatch: false }
    }

    pub fn publish(mut self, on: bool) -> Self {
        self.publish = on;
        self
    }

    pub fn ignore_mismatch(mut self, on: bool) -> Self {
        self.ignore_mismatch = on;
        self
    }

    /// Append the query for one `analyze` call. `start_new` is only set on
    /// the first call of a run.
    pub fn apply(&self, url: &mut Url, start_new: bool) {
        let mut q = url.query_pairs_mut();
        if start_new {
            q.append_pair("startNew", "on");
        }
        q.append_pair("host", &self.host);
        q.append_pair("all", "done");
        if self.publish {
            q.append_pair("publish", "on");
        }
        if self.ignore_mismatch {
            q.append_pair("ignoreMismatch", "on");
        }
    }
}

impl From<&str> for AnalyzeRequest {
    fn from(host: &str) -> Self {
        AnalyzeRequest::new(host)
    }
}

impl From<String> for AnalyzeRequest {
    fn from(host: String) -> Self {
        AnalyzeRequest::new(host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(req: &AnalyzeRequest, start_new: bool) -> String {
        let mut url = Url::parse("https://api.ssllabs.com/api/v2/analyze").unwrap();
        req.apply(&mut url, start_new);
        url.query().unwrap_or("").to_string()
    }

    #[test]
    fn minimal_query() {
        let req = AnalyzeRequest::new("example.com");
        assert_eq!(query(&req, false), "host=example.com&all=done");
        assert_eq!(query(&req, true), "startNew=on&host=example.com&all=done");
    }

    #[test]
    fn flags_combine_freely() {
        let req = AnalyzeRequest::new("example.com").publish(true).ignore_mismatch(true);
        assert_eq!(query(&req, false), "host=example.com&all=done&publish=on&ignoreMismatch=on");
    }

    #[test]
    fn host_is_encoded() {
        let req = AnalyzeRequest::from("exa mple.com&x=1");
        assert_eq!(query(&req, false), "host=exa+mple.com%26x%3D1&all=done");
    }
}
