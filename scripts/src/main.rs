use clap::Parser;
use scripts::{cli::Cli, deployments::Deployments, errors::ScriptError, utils::setup_client};

#[tokio::main]
async fn main() -> Result<(), ScriptError> {
    let Cli {
        priv_key,
        rpc_url,
        network,
        deployments_path,
        artifacts_path,
        command,
    } = Cli::parse();

    tracing_subscriber::fmt().pretty().init();

    let client = setup_client(&priv_key, &rpc_url).await?;
    let deployments = Deployments::new(deployments_path);

    command
        .run(client, &network, &deployments, &artifacts_path)
        .await
}
