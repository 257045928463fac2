use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ssllabs_client::{AnalyzeRequest, Client, HttpTransport, Host};
use std::path::PathBuf;
use std::time::Instant;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod config;

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_else(|_| String::new())
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat { Text, Json }

#[derive(Debug, Parser)]
#[command(name = "ssllabs", version, about = "SSL Labs assessment API client")]
struct Cli {
    /// Optional config file (YAML). If omitted, loads ./ssllabs.yaml if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// API entrypoint URL (overrides config; default https://api.ssllabs.com/api/v2)
    #[arg(long, global = true)]
    entrypoint: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print version information
    Version,
    /// Show engine/criteria versions and assessment capacity
    Info {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List status detail codes and their descriptions
    StatusCodes {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Run a fresh assessment and print the final host report as JSON
    Analyze {
        /// Hostname to assess
        host: String,
        /// Publish results on the public SSL Labs boards (--publish=false overrides config)
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        publish: Option<bool>,
        /// Continue even if the certificate does not match the hostname
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        ignore_mismatch: Option<bool>,
        /// Seconds to wait between polls (overrides config; default 10)
        #[arg(long)]
        interval_secs: Option<u64>,
        /// Emit one JSON line per intermediate snapshot on stderr
        #[arg(long, default_value_t = false)]
        progress: bool,
        /// Pretty-print the final JSON
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
}

fn init_logging() -> Result<()> {
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse::<Level>().ok())
        .unwrap_or(Level::WARN);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn build_client(cfg: &config::Config, entrypoint: Option<&str>) -> Result<Client<HttpTransport>> {
    let mut builder = HttpTransport::builder();
    if let Some(t) = cfg.timeout() {
        builder = builder.timeout(t);
    }
    let mut client = Client::with_transport(builder.build()?);
    if let Some(ep) = entrypoint.or(cfg.entrypoint.as_deref()) {
        client
            .set_entrypoint(ep)
            .with_context(|| format!("invalid entrypoint {}", ep))?;
    }
    Ok(client)
}

fn progress_line(host: &Host) -> serde_json::Value {
    let endpoints: Vec<_> = host
        .endpoints
        .iter()
        .map(|e| {
            serde_json::json!({
                "ip": e.ip_address,
                "progress": e.progress,
                "eta": e.eta,
                "detail": e.status_details_message.as_deref().or(e.status_message.as_deref()),
            })
        })
        .collect();
    serde_json::json!({
        "ts": now_rfc3339(),
        "host": host.host,
        "status": host.status.as_str(),
        "endpoints": endpoints,
    })
}

fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();
    let cfg = config::load_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Version => {
            println!("ssllabs {} (core {})", env!("CARGO_PKG_VERSION"), ssllabs_core::version());
        }
        Commands::Info { format } => {
            let client = build_client(&cfg, cli.entrypoint.as_deref())?;
            let info = client.info()?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string(&info)?),
                OutputFormat::Text => {
                    println!("engine: {}", info.engine_version.as_deref().unwrap_or("-"));
                    println!("criteria: {}", info.criteria_version.as_deref().unwrap_or("-"));
                    if let (Some(cur), Some(max)) = (info.current_assessments, info.max_assessments) {
                        println!("assessments: {}/{}", cur, max);
                    }
                    if let Some(ms) = info.new_assessment_cool_off {
                        println!("cool-off: {} ms", ms);
                    }
                    for m in &info.messages {
                        println!("message: {}", m);
                    }
                }
            }
        }
        Commands::StatusCodes { format } => {
            let client = build_client(&cfg, cli.entrypoint.as_deref())?;
            let codes = client.status_codes()?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string(&codes)?),
                OutputFormat::Text => {
                    for (code, text) in &codes.status_details {
                        println!("{}\t{}", code, text);
                    }
                }
            }
        }
        Commands::Analyze { host, publish, ignore_mismatch, interval_secs, progress, pretty } => {
            let mut client = build_client(&cfg, cli.entrypoint.as_deref())?;
            let interval = cfg.poll_interval(interval_secs);
            let req = AnalyzeRequest::new(host.clone())
                .publish(cfg.publish(publish))
                .ignore_mismatch(cfg.ignore_mismatch(ignore_mismatch));
            let start = Instant::now();
            info!(host = %host, interval_secs = interval.as_secs(), "starting assessment");
            let result = client.analyze(req).run_to_completion(|partial| {
                if progress {
                    eprintln!("{}", progress_line(partial));
                }
                std::thread::sleep(interval);
            })?;
            info!(host = %host, elapsed = ?start.elapsed(), "assessment complete");
            if pretty {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", serde_json::to_string(&result)?);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_analyze_flags() {
        let cli = Cli::try_parse_from([
            "ssllabs", "--entrypoint", "http://localhost:8080/api/v2", "analyze", "example.com", "--publish", "--interval-secs", "3",
        ])
        .unwrap();
        assert_eq!(cli.entrypoint.as_deref(), Some("http://localhost:8080/api/v2"));
        match cli.command {
            Commands::Analyze { host, publish, ignore_mismatch, interval_secs, .. } => {
                assert_eq!(host, "example.com");
                assert_eq!(publish, Some(true));
                assert_eq!(ignore_mismatch, None);
                assert_eq!(interval_secs, Some(3));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn cli_can_switch_off_config_flags() {
        let cli = Cli::try_parse_from(["ssllabs", "analyze", "example.com", "--publish=false", "--ignore-mismatch"]).unwrap();
        let cfg = config::Config { publish: Some(true), ignore_mismatch: Some(false), ..Default::default() };
        match cli.command {
            Commands::Analyze { publish, ignore_mismatch, .. } => {
                assert!(!cfg.publish(publish));
                assert!(cfg.ignore_mismatch(ignore_mismatch));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn bad_entrypoint_is_rejected_up_front() {
        let cfg = config::Config { entrypoint: Some("not a url".into()), ..Default::default() };
        assert!(build_client(&cfg, None).is_err());
        assert!(build_client(&config::Config::default(), Some("https://api.ssllabs.com/api/v3")).is_ok());
    }

    #[test]
    fn progress_line_shape() {
        let host: Host = serde_json::from_value(serde_json::json!({
            "host": "example.com",
            "status": "IN_PROGRESS",
            "endpoints": [{ "ipAddress": "93.184.216.34", "progress": 55, "statusDetailsMessage": "Testing cipher suites" }]
        }))
        .unwrap();
        let line = progress_line(&host);
        assert_eq!(line["status"], "IN_PROGRESS");
        assert_eq!(line["endpoints"][0]["progress"], 55);
        assert_eq!(line["endpoints"][0]["detail"], "Testing cipher suites");
    }
}
