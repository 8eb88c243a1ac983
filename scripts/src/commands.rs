//! Implementations of the deploy and interaction scripts

use std::{path::Path, sync::Arc};

use ethers::{
    abi::{Address, Token},
    providers::Middleware,
    types::{Bytes, U256},
    utils::parse_ether,
};
use tracing::info;

use crate::{
    artifacts::{load_artifact, ContractArtifact},
    cli::{CreateAuctionArgs, MintNftArgs},
    constants::{
        AUCTION_CONTROLLER_CONTRACT, AUCTION_FACTORY_CONTRACT, AUCTION_FACTORY_PROXY_CONTRACT,
        CCIP_SIMULATOR_CONTRACT, CROSS_CHAIN_GATEWAY_CONTRACT, CROSS_CHAIN_MESSENGER_CONTRACT,
        ERC1967_PROXY_CONTRACT, LATEST_AUCTION_KEY, MY_NFT_CONTRACT,
    },
    deployments::Deployments,
    errors::ScriptError,
    solidity::{AuctionControllerContract, AuctionFactoryContract, MyNftContract},
    utils::{
        deploy_contract, deployer_address, is_development_chain, parse_address,
        resolve_ccip_config, unix_timestamp,
    },
};

/// Deploys the local CCIP simulator on a development chain.
///
/// On any other network the simulator has no business existing, so the
/// script logs and exits without deploying.
pub async fn deploy_ccip_simulator(
    network: &str,
    artifacts_dir: &Path,
    deployments: &Deployments,
    client: Arc<impl Middleware>,
) -> Result<(), ScriptError> {
    if !is_development_chain(network) {
        info!("{network} is not a development chain, skipping CCIP simulator deployment");
        return Ok(());
    }

    let deployer = deployer_address(client.as_ref())?;
    info!("deploying contracts with account {deployer:#x}");

    let artifact = load_artifact(artifacts_dir, CCIP_SIMULATOR_CONTRACT)?;
    let simulator_address = deploy_contract(&artifact, (), client).await?;
    info!("{CCIP_SIMULATOR_CONTRACT} deployed at {simulator_address:#x}");

    deployments.save(
        network,
        CCIP_SIMULATOR_CONTRACT,
        &format!("{simulator_address:#x}"),
    )?;

    Ok(())
}

/// Deploys the source-chain contract suite: the NFT collection, the auction
/// implementation contracts, the initialized factory proxy, and the
/// cross-chain messenger, recording every address in the ledger
pub async fn deploy_source_chain(
    network: &str,
    artifacts_dir: &Path,
    deployments: &Deployments,
    client: Arc<impl Middleware>,
) -> Result<(), ScriptError> {
    let deployer = deployer_address(client.as_ref())?;
    info!("deploying contracts with account {deployer:#x}");

    let nft_artifact = load_artifact(artifacts_dir, MY_NFT_CONTRACT)?;
    let nft_address = deploy_contract(&nft_artifact, (), client.clone()).await?;
    info!("{MY_NFT_CONTRACT} deployed at {nft_address:#x}");
    deployments.save(network, MY_NFT_CONTRACT, &format!("{nft_address:#x}"))?;

    deploy_auction_factory(network, artifacts_dir, deployments, client.clone()).await?;

    let ccip = resolve_ccip_config(network, artifacts_dir, client.clone()).await?;
    let messenger_artifact = load_artifact(artifacts_dir, CROSS_CHAIN_MESSENGER_CONTRACT)?;
    let messenger_address =
        deploy_contract(&messenger_artifact, (ccip.router, ccip.link_token), client).await?;
    info!("{CROSS_CHAIN_MESSENGER_CONTRACT} deployed at {messenger_address:#x}");
    deployments.save(
        network,
        CROSS_CHAIN_MESSENGER_CONTRACT,
        &format!("{messenger_address:#x}"),
    )?;

    Ok(())
}

/// Deploys the destination-chain contract suite: the auction implementation
/// contracts, the initialized factory proxy, and the cross-chain gateway
/// wired to the auction controller, recording every address in the ledger
pub async fn deploy_destination_chain(
    network: &str,
    artifacts_dir: &Path,
    deployments: &Deployments,
    client: Arc<impl Middleware>,
) -> Result<(), ScriptError> {
    let deployer = deployer_address(client.as_ref())?;
    info!("deploying contracts with account {deployer:#x}");

    let (_, controller_address) =
        deploy_auction_factory(network, artifacts_dir, deployments, client.clone()).await?;

    let ccip = resolve_ccip_config(network, artifacts_dir, client.clone()).await?;
    let gateway_artifact = load_artifact(artifacts_dir, CROSS_CHAIN_GATEWAY_CONTRACT)?;
    let gateway_address =
        deploy_contract(&gateway_artifact, (ccip.router, controller_address), client).await?;
    info!("{CROSS_CHAIN_GATEWAY_CONTRACT} deployed at {gateway_address:#x}");
    deployments.save(
        network,
        CROSS_CHAIN_GATEWAY_CONTRACT,
        &format!("{gateway_address:#x}"),
    )?;

    Ok(())
}

/// Mints an NFT from the deployed collection to the requested recipient
pub async fn mint_nft(
    args: MintNftArgs,
    network: &str,
    deployments: &Deployments,
    client: Arc<impl Middleware>,
) -> Result<(), ScriptError> {
    let nft_address = parse_address(&deployments.require(network, MY_NFT_CONTRACT)?)?;
    let recipient = match args.to {
        Some(to) => parse_address(&to)?,
        None => deployer_address(client.as_ref())?,
    };

    let nft = MyNftContract::new(nft_address, client);
    nft.mint(recipient)
        .send()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    let next_token_id = nft
        .get_token_id()
        .call()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
    info!(
        "minted token {} to {recipient:#x}",
        next_token_id - U256::one()
    );

    Ok(())
}

/// Mints a token to the seller, lists it through the auction factory, and
/// places an opening bid on the resulting auction
pub async fn create_auction(
    args: CreateAuctionArgs,
    network: &str,
    deployments: &Deployments,
    client: Arc<impl Middleware>,
) -> Result<(), ScriptError> {
    let proxy_address =
        parse_address(&deployments.require(network, AUCTION_FACTORY_PROXY_CONTRACT)?)?;
    let nft_address = parse_address(&deployments.require(network, MY_NFT_CONTRACT)?)?;
    let seller = deployer_address(client.as_ref())?;

    let nft = MyNftContract::new(nft_address, client.clone());
    nft.mint(seller)
        .send()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
    let token_id = nft
        .get_token_id()
        .call()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
        - U256::one();
    info!("minted token {token_id} to seller {seller:#x}");

    // The factory pulls the token into escrow when the auction opens
    nft.approve(proxy_address, token_id)
        .send()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
    info!("approved auction factory for token {token_id}");

    let bid_token = match args.bid_token {
        Some(token) => parse_address(&token)?,
        None => Address::zero(),
    };
    let price_feed = parse_address(&args.price_feed)?;
    let now = unix_timestamp()?;
    let start_time = U256::from(now + args.start_delay);
    let end_time = U256::from(now + args.duration);

    let factory = AuctionFactoryContract::new(proxy_address, client.clone());
    factory
        .create_auction(
            U256::from(args.auction_id),
            nft_address,
            token_id,
            bid_token,
            price_feed,
            start_time,
            end_time,
            Address::zero(),
        )
        .send()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    let auction_address = factory
        .get_auction(nft_address, token_id)
        .call()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
    info!("auction created at {auction_address:#x}");
    deployments.save(network, LATEST_AUCTION_KEY, &format!("{auction_address:#x}"))?;

    let amount =
        parse_ether(&args.bid).map_err(|e| ScriptError::CalldataConstruction(e.to_string()))?;
    let auction = AuctionControllerContract::new(auction_address, client);
    auction
        .bid(amount)
        .value(amount)
        .send()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
    info!("opening bid of {amount} wei placed by {seller:#x}");

    Ok(())
}

/// Deploys the auction implementation contracts and the factory proxy,
/// recording each address. Returns the proxy and controller addresses for
/// downstream constructor wiring.
async fn deploy_auction_factory(
    network: &str,
    artifacts_dir: &Path,
    deployments: &Deployments,
    client: Arc<impl Middleware>,
) -> Result<(Address, Address), ScriptError> {
    let controller_artifact = load_artifact(artifacts_dir, AUCTION_CONTROLLER_CONTRACT)?;
    let controller_address = deploy_contract(&controller_artifact, (), client.clone()).await?;
    info!("{AUCTION_CONTROLLER_CONTRACT} deployed at {controller_address:#x}");
    deployments.save(
        network,
        AUCTION_CONTROLLER_CONTRACT,
        &format!("{controller_address:#x}"),
    )?;

    let factory_artifact = load_artifact(artifacts_dir, AUCTION_FACTORY_CONTRACT)?;
    let factory_address = deploy_contract(&factory_artifact, (), client.clone()).await?;
    info!("{AUCTION_FACTORY_CONTRACT} deployed at {factory_address:#x}");
    deployments.save(
        network,
        AUCTION_FACTORY_CONTRACT,
        &format!("{factory_address:#x}"),
    )?;

    let init_calldata =
        factory_initialize_calldata(&factory_artifact, factory_address, controller_address)?;
    let proxy_artifact = load_artifact(artifacts_dir, ERC1967_PROXY_CONTRACT)?;
    let proxy_address = deploy_contract(
        &proxy_artifact,
        (factory_address, Bytes::from(init_calldata)),
        client,
    )
    .await?;
    info!("{AUCTION_FACTORY_PROXY_CONTRACT} deployed at {proxy_address:#x}");
    deployments.save(
        network,
        AUCTION_FACTORY_PROXY_CONTRACT,
        &format!("{proxy_address:#x}"),
    )?;

    Ok((proxy_address, controller_address))
}

/// Encodes the factory's `initialize` call through its artifact ABI
fn factory_initialize_calldata(
    factory_artifact: &ContractArtifact,
    factory_address: Address,
    controller_address: Address,
) -> Result<Vec<u8>, ScriptError> {
    factory_artifact
        .abi
        .function("initialize")
        .map_err(|e| ScriptError::CalldataConstruction(e.to_string()))?
        .encode_input(&[
            Token::Address(factory_address),
            Token::Address(controller_address),
        ])
        .map_err(|e| ScriptError::CalldataConstruction(e.to_string()))
}
