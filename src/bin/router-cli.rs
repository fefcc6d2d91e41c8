use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "router-cli")]
#[command(about = "Management CLI for the relay router", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[arg(short, long, default_value = "admin-secret-key")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every fleet node
    Status,
    /// Ask the router for a node
    Pick {
        /// Client country code (empty for no affinity)
        #[arg(short, long)]
        country: Option<String>,
    },
    /// Let a node receive traffic
    Enable { name: String },
    /// Take a node out of rotation
    Disable { name: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", cli.key))?,
    );

    let res = match cli.command {
        Commands::Status => client.get(format!("{}/status", cli.url)).send().await?,
        Commands::Pick { country: None } => client.get(format!("{}/server", cli.url)).send().await?,
        Commands::Pick { country: Some(code) } => {
            client
                .post(format!("{}/server", cli.url))
                .json(&json!({ "geo": { "country_code": code } }))
                .send()
                .await?
        }
        Commands::Enable { name } => set_enable(&client, &cli.url, headers, &name, true).await?,
        Commands::Disable { name } => set_enable(&client, &cli.url, headers, &name, false).await?,
    };

    print_response(res).await
}

async fn set_enable(
    client: &reqwest::Client,
    url: &str,
    headers: HeaderMap,
    name: &str,
    enable: bool,
) -> Result<reqwest::Response, reqwest::Error> {
    client
        .put(format!("{}/admin/servers/{}/enable", url, name))
        .headers(headers)
        .json(&json!({ "enable": enable }))
        .send()
        .await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: router returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
