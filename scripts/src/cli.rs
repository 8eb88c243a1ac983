//! Definitions of CLI arguments and commands for the deploy and interaction
//! scripts

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use clap::{Args, Parser, Subcommand};
use ethers::providers::Middleware;

use crate::{
    commands::{
        create_auction, deploy_ccip_simulator, deploy_destination_chain, deploy_source_chain,
        mint_nft,
    },
    constants::{
        ARTIFACTS_DIR, AUCTION_DURATION_SECS, AUCTION_START_DELAY_SECS, DEPLOYMENTS_PATH,
        SEPOLIA_ETH_USD_PRICE_FEED,
    },
    deployments::Deployments,
    errors::ScriptError,
};

/// Deploy and drive the cross-chain NFT auction contracts
#[derive(Parser)]
pub struct Cli {
    /// Private key of the operator account
    // TODO: Better key management
    #[arg(short, long, env = "PKEY")]
    pub priv_key: String,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = "http://localhost:8545")]
    pub rpc_url: String,

    /// Name of the target network, used to partition the address ledger and
    /// to detect development chains
    #[arg(short, long, default_value = "localhost")]
    pub network: String,

    /// Path of the ledger file recording deployed contract addresses
    #[arg(short, long, default_value = DEPLOYMENTS_PATH)]
    pub deployments_path: PathBuf,

    /// Directory holding the compiled contract artifacts
    #[arg(short, long, default_value = ARTIFACTS_DIR)]
    pub artifacts_path: PathBuf,

    /// The script to run
    #[command(subcommand)]
    pub command: Command,
}

/// The deploy and interaction scripts
#[derive(Subcommand)]
pub enum Command {
    /// Deploy the local CCIP simulator (development chains only)
    DeployCcipSimulator,
    /// Deploy the source-chain contracts: NFT collection, auction
    /// implementations, factory proxy, and cross-chain messenger
    DeploySourceChain,
    /// Deploy the destination-chain contracts: auction implementations,
    /// factory proxy, and cross-chain gateway
    DeployDestinationChain,
    /// Mint an NFT from the deployed collection
    MintNft(MintNftArgs),
    /// Mint an NFT, auction it through the factory, and place an opening bid
    CreateAuction(CreateAuctionArgs),
}

impl Command {
    /// Runs the selected script against the given client and address ledger
    pub async fn run(
        self,
        client: Arc<impl Middleware>,
        network: &str,
        deployments: &Deployments,
        artifacts_dir: &Path,
    ) -> Result<(), ScriptError> {
        match self {
            Command::DeployCcipSimulator => {
                deploy_ccip_simulator(network, artifacts_dir, deployments, client).await
            }
            Command::DeploySourceChain => {
                deploy_source_chain(network, artifacts_dir, deployments, client).await
            }
            Command::DeployDestinationChain => {
                deploy_destination_chain(network, artifacts_dir, deployments, client).await
            }
            Command::MintNft(args) => mint_nft(args, network, deployments, client).await,
            Command::CreateAuction(args) => {
                create_auction(args, network, deployments, client).await
            }
        }
    }
}

/// Mint an NFT to the given recipient
#[derive(Args)]
pub struct MintNftArgs {
    /// Recipient of the minted token, defaulting to the operator account
    #[arg(short, long)]
    pub to: Option<String>,
}

/// Create an auction for a freshly minted NFT
#[derive(Args)]
pub struct CreateAuctionArgs {
    /// Identifier for the new auction
    #[arg(long, default_value_t = 1)]
    pub auction_id: u64,

    /// ERC20 token bids are denominated in; the zero address bids native ETH
    #[arg(long)]
    pub bid_token: Option<String>,

    /// Price feed the auction values bids against
    #[arg(long, default_value = SEPOLIA_ETH_USD_PRICE_FEED)]
    pub price_feed: String,

    /// Seconds from now until bidding opens
    #[arg(long, default_value_t = AUCTION_START_DELAY_SECS)]
    pub start_delay: u64,

    /// Seconds bidding stays open once started
    #[arg(long, default_value_t = AUCTION_DURATION_SECS)]
    pub duration: u64,

    /// Opening bid, denominated in ether
    #[arg(long, default_value = "1")]
    pub bid: String,
}
