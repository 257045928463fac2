//! Client for the Qualys SSL Labs assessment API.
//!
//! ```no_run
//! use std::{thread, time::Duration};
//! use ssllabs_client::Client;
//!
//! # fn main() -> ssllabs_client::Result<()> {
//! let mut client = Client::new()?;
//! for snapshot in client.analyze("example.com") {
//!     let snapshot = snapshot?;
//!     eprintln!("{}", snapshot.status);
//!     thread::sleep(Duration::from_secs(10));
//! }
//! println!("{:?}", client.host()?.grades());
//! # Ok(())
//! # }
//! ```

mod analysis;
mod client;
mod entrypoint;
mod error;
mod request;
pub mod testing;
mod transport;

pub use analysis::{Analysis, Phase};
pub use client::Client;
pub use entrypoint::{Entrypoint, DEFAULT_ENTRYPOINT};
pub use error::{map_status, Error, ResponseErrorKind, Result};
pub use request::AnalyzeRequest;
pub use transport::{HttpTransport, HttpTransportBuilder, RawResponse, Transport};

pub use ssllabs_core as types;
pub use ssllabs_core::{AnalysisStatus, Endpoint, Host, Info, StatusCodes};
