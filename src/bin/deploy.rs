use anyhow::{Context, Result};
use clap::Parser;
use hf_deploy::{
    config,
    endpoint::{ApiKey, HfEndpointClient, Provisioner},
};
use tracing::info;
use uuid::Uuid;

/// Create a Hugging Face inference endpoint for a model repository and wait until it runs.
#[derive(Debug, Parser)]
#[command(name = "deploy", version)]
struct Args {
    /// Model repository, e.g. `username/my-finetune`
    #[arg(long)]
    repository: String,

    /// Endpoint name; a random hex id when omitted
    #[arg(long)]
    name: Option<String>,

    /// Hugging Face account that owns the endpoint
    #[arg(long, env = "HF_USERNAME")]
    username: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = config::load()
        .await
        .context("Failed to load configuration")?;
    config::init_logging(&config)?;

    let api_key = ApiKey::from_env()
        .context("Ensure all required settings are configured before deploying")?;
    let endpoint_name = args
        .name
        .unwrap_or_else(|| Uuid::new_v4().simple().to_string());

    let client = HfEndpointClient::new(&config.endpoint.api_base, &args.username, api_key);
    let provisioner = Provisioner::new(client, config.endpoint.clone());

    let endpoint = provisioner
        .create_inference_endpoint(&endpoint_name, &args.repository)
        .await
        .map_err(|e| anyhow::anyhow!("Deployment failed: {}", e))?;

    info!("Endpoint created: {}", endpoint_name);
    println!("{}", serde_json::to_string_pretty(&endpoint)?);

    Ok(())
}
