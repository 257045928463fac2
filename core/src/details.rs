//! Per-endpoint assessment detail: key, certificate, chain, protocols,
//! cipher suites and handshake simulations.
//!
//! Integer fields that the service documents as bit flags (`renegSupport`,
//! `issues`, the `*Intolerance` fields) are kept as raw integers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDetails {
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub host_start_time: Option<i64>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub key: Option<Key>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub cert: Option<Cert>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub chain: Option<Chain>,
    #[serde(default, deserialize_with = "crate::lenient::vec")]
    pub protocols: Vec<Protocol>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub suites: Option<Suites>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub server_signature: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub prefix_delegation: Option<bool>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub non_prefix_delegation: Option<bool>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub vuln_beast: Option<bool>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub reneg_support: Option<i32>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub sts_response_header: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub sts_max_age: Option<i64>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub sts_subdomains: Option<bool>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub pkp_response_header: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub session_resumption: Option<i32>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub compression_methods: Option<i32>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub supports_npn: Option<bool>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub npn_protocols: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub session_tickets: Option<i32>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub ocsp_stapling: Option<bool>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub stapling_revocation_status: Option<i32>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub sni_required: Option<bool>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub http_status_code: Option<i32>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub http_forwarding: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub supports_rc4: Option<bool>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub rc4_with_modern: Option<bool>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub rc4_only: Option<bool>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub forward_secrecy: Option<i32>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub protocol_intolerance: Option<i32>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub misc_intolerance: Option<i32>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub sims: Option<SimDetails>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub heartbleed: Option<bool>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub heartbeat: Option<bool>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub open_ssl_ccs: Option<i32>,
    #[serde(default, deserialize_with = "crate::lenient::option", rename = "openSSLLuckyMinus20")]
    pub open_ssl_lucky_minus20: Option<i32>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub poodle: Option<bool>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub poodle_tls: Option<i32>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub fallback_scsv: Option<bool>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub freak: Option<bool>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub has_sct: Option<i32>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub logjam: Option<bool>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub drown_vulnerable: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Key {
    pub size: Option<i32>,
    pub strength: Option<i32>,
    pub alg: Option<String>,
    pub debian_flaw: Option<bool>,
    pub q: Option<i32>,
}

/// Leaf certificate of an endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cert {
    pub subject: Option<String>,
    #[serde(default)]
    pub common_names: Vec<String>,
    #[serde(default)]
    pub alt_names: Vec<String>,
    pub not_before: Option<i64>,
    pub not_after: Option<i64>,
    pub issuer_subject: Option<String>,
    pub sig_alg: Option<String>,
    pub issuer_label: Option<String>,
    pub revocation_info: Option<i32>,
    #[serde(default, rename = "crlURIs")]
    pub crl_uris: Vec<String>,
    #[serde(default, rename = "ocspURIs")]
    pub ocsp_uris: Vec<String>,
    pub revocation_status: Option<i32>,
    pub crl_revocation_status: Option<i32>,
    pub ocsp_revocation_status: Option<i32>,
    pub sgc: Option<i32>,
    pub validation_type: Option<String>,
    pub issues: Option<i32>,
    pub sct: Option<bool>,
    pub must_staple: Option<i32>,
    pub sha1_hash: Option<String>,
    pub pin_sha256: Option<String>,
}

impl Cert {
    pub fn not_before_at(&self) -> Option<OffsetDateTime> {
        self.not_before.and_then(crate::millis_to_datetime)
    }

    pub fn not_after_at(&self) -> Option<OffsetDateTime> {
        self.not_after.and_then(crate::millis_to_datetime)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chain {
    #[serde(default)]
    pub certs: Vec<ChainCert>,
    pub issues: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainCert {
    pub subject: Option<String>,
    pub label: Option<String>,
    pub not_before: Option<i64>,
    pub not_after: Option<i64>,
    pub issuer_subject: Option<String>,
    pub issuer_label: Option<String>,
    pub sig_alg: Option<String>,
    pub issues: Option<i32>,
    pub key_alg: Option<String>,
    pub key_size: Option<i32>,
    pub key_strength: Option<i32>,
    pub revocation_status: Option<i32>,
    pub crl_revocation_status: Option<i32>,
    pub ocsp_revocation_status: Option<i32>,
    /// PEM encoded certificate.
    pub raw: Option<String>,
    pub sha1_hash: Option<String>,
    pub pin_sha256: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Protocol {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub version: Option<String>,
    pub v2_suites_disabled: Option<bool>,
    pub q: Option<i32>,
}

impl Protocol {
    /// `"TLS 1.2"` style label.
    pub fn label(&self) -> String {
        match (self.name.as_deref(), self.version.as_deref()) {
            (Some(n), Some(v)) => format!("{} {}", n, v),
            (Some(n), None) => n.to_string(),
            (None, Some(v)) => v.to_string(),
            (None, None) => String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suites {
    #[serde(default)]
    pub list: Vec<Suite>,
    /// Whether the server enforces its own suite order.
    pub preference: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suite {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub cipher_strength: Option<i32>,
    pub dh_strength: Option<i32>,
    pub dh_p: Option<i32>,
    pub dh_g: Option<i32>,
    pub dh_ys: Option<i32>,
    pub ecdh_bits: Option<i32>,
    pub ecdh_strength: Option<i32>,
    pub q: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimDetails {
    #[serde(default)]
    pub results: Vec<Simulation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Simulation {
    pub client: Option<SimClient>,
    /// Zero on a successful handshake.
    pub error_code: Option<i32>,
    pub attempts: Option<i32>,
    pub protocol_id: Option<i32>,
    pub suite_id: Option<i32>,
}

impl Simulation {
    pub fn succeeded(&self) -> bool {
        self.error_code == Some(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimClient {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub platform: Option<String>,
    pub version: Option<String>,
    pub is_reference: Option<bool>,
}
