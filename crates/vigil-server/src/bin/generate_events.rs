//! Synthetic event generator for end-to-end smoke testing
//!
//! Replays a small population of users against the ingest API. Most
//! traffic looks organic; occasionally one user fires a rapid login
//! volley with a scripted client user agent to exercise the escalation
//! path.

use anyhow::{Context, Result};
use chrono::Utc;
use rand::Rng;
use tracing::{info, warn};
use uuid::Uuid;
use vigil_core::{Buy, EventKind, Login};

const IPS: [&str; 4] = ["192.168.1.1", "10.0.0.1", "172.16.0.1", "8.8.8.8"];
const USER_AGENTS: [&str; 3] = [
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64)",
    "Mozilla/5.0 (X11; Linux x86_64)",
];
const SUSPICIOUS_USER_AGENT: &str = "Python/3.12 aiohttp/3.9.1";

/// Size of a bot login volley; comfortably above the default trigger
/// threshold of 10
const BURST_LOGINS: u32 = 12;

#[derive(Debug)]
struct GeneratorOptions {
    target: String,
    count: u64,
    interval_ms: u64,
}

impl GeneratorOptions {
    fn from_args() -> Result<Self> {
        let mut options = Self {
            target: "http://127.0.0.1:8080".to_string(),
            count: 100,
            interval_ms: 500,
        };

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--target" => {
                    options.target = args.next().context("--target needs a value")?;
                }
                "--count" => {
                    options.count = args
                        .next()
                        .context("--count needs a value")?
                        .parse()
                        .context("--count must be an integer")?;
                }
                "--interval-ms" => {
                    options.interval_ms = args
                        .next()
                        .context("--interval-ms needs a value")?
                        .parse()
                        .context("--interval-ms must be an integer")?;
                }
                other => anyhow::bail!("Unknown argument: {}", other),
            }
        }

        Ok(options)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let options = GeneratorOptions::from_args()?;
    info!("Generating events against {}: {:?}", options.target, options);

    let client = reqwest::Client::new();

    for iteration in 0..options.count {
        let (user_id, burst, ip, agent, success) = {
            let mut rng = rand::thread_rng();
            (
                format!("user_{}", rng.gen_range(1..=10)),
                rng.gen_bool(0.1),
                IPS[rng.gen_range(0..IPS.len())],
                USER_AGENTS[rng.gen_range(0..USER_AGENTS.len())],
                rng.gen_bool(0.9),
            )
        };

        if burst {
            info!("Iteration {}: bot burst for {}", iteration, user_id);
            send_login_burst(&client, &options.target, &user_id).await;
        } else {
            send_login(&client, &options.target, &user_id, ip, agent, success).await;

            let buys = {
                let mut rng = rand::thread_rng();
                rng.gen_bool(0.3)
            };
            if buys {
                send_buy(&client, &options.target, &user_id).await;
            }
        }

        tokio::time::sleep(std::time::Duration::from_millis(options.interval_ms)).await;
    }

    info!("Done: {} iterations", options.count);
    Ok(())
}

/// Rapid login volley from one user with a scripted client agent
async fn send_login_burst(client: &reqwest::Client, target: &str, user_id: &str) {
    for _ in 0..BURST_LOGINS {
        send_login(client, target, user_id, "8.8.8.8", SUSPICIOUS_USER_AGENT, true).await;
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }
}

async fn send_login(
    client: &reqwest::Client,
    target: &str,
    user_id: &str,
    ip: &str,
    agent: &str,
    success: bool,
) {
    let login = Login {
        user_id: user_id.to_string(),
        timestamp: Utc::now(),
        ip_address: ip.to_string(),
        device_id: format!("dev-{}", Uuid::new_v4()),
        success,
    };

    let mut payload = match serde_json::to_value(&login) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Failed to serialize login event: {}", e);
            return;
        }
    };
    payload["user_agent"] = serde_json::json!(agent);

    post_event(client, target, EventKind::Login, &payload).await;
}

async fn send_buy(client: &reqwest::Client, target: &str, user_id: &str) {
    let buy = Buy {
        user_id: user_id.to_string(),
        order_id: Uuid::new_v4().to_string(),
        timestamp: Utc::now(),
        payment_method: "credit_card".to_string(),
    };

    match serde_json::to_value(&buy) {
        Ok(payload) => post_event(client, target, EventKind::Buy, &payload).await,
        Err(e) => warn!("Failed to serialize buy event: {}", e),
    }
}

async fn post_event(
    client: &reqwest::Client,
    target: &str,
    kind: EventKind,
    payload: &serde_json::Value,
) {
    let url = format!("{}/v1/events/{}", target, kind.name());

    match client.post(&url).json(payload).send().await {
        Ok(response) if !response.status().is_success() => {
            warn!("Ingest rejected {} event: {}", kind.name(), response.status());
        }
        Ok(_) => {}
        Err(e) => warn!("Failed to deliver {} event: {}", kind.name(), e),
    }
}
