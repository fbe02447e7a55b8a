use clap::{Parser, Subcommand};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde_json::Value;
use std::time::Duration;

use handy_test_server::http::response::MessagesBody;

#[derive(Parser)]
#[command(name = "inbox-cli")]
#[command(about = "Client for the handy test server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://127.0.0.1:55155")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the server is up
    Health,
    /// Queue a message
    Send {
        text: String,
        /// Send TEXT as a raw JSON body instead of plain text
        #[arg(long)]
        json: bool,
    },
    /// Print buffered messages
    List {
        #[arg(long)]
        since: Option<i64>,
    },
    /// Poll for new messages, printing each once
    Watch {
        #[arg(long)]
        since: Option<i64>,
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Health => {
            let res = client.get(format!("{base}/health")).send().await?;
            print_response(res).await?;
        }
        Commands::Send { text, json } => {
            let content_type = if json {
                "application/json"
            } else {
                "text/plain; charset=utf-8"
            };
            let res = client
                .post(format!("{base}/messages"))
                .header(CONTENT_TYPE, HeaderValue::from_static(content_type))
                .body(text)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::List { since } => {
            let res = client.get(messages_url(base, since)).send().await?;
            print_response(res).await?;
        }
        Commands::Watch { since, interval_ms } => {
            watch(&client, base, since, Duration::from_millis(interval_ms)).await?;
        }
    }

    Ok(())
}

fn messages_url(base: &str, since: Option<i64>) -> String {
    match since {
        Some(since) => format!("{base}/messages?since={since}"),
        None => format!("{base}/messages"),
    }
}

async fn watch(
    client: &reqwest::Client,
    base: &str,
    mut cursor: Option<i64>,
    interval: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;

        let res = match client.get(messages_url(base, cursor)).send().await {
            Ok(res) => res,
            Err(e) => {
                eprintln!("Poll failed: {e}");
                continue;
            }
        };
        if !res.status().is_success() {
            eprintln!("Error: server returned status {}", res.status());
            continue;
        }

        let page: MessagesBody = res.json().await?;
        for message in &page.messages {
            println!("[{}] {}: {}", message.ts, message.id, message.text);
        }
        if page.next_cursor.is_some() {
            cursor = page.next_cursor;
        }
    }
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
