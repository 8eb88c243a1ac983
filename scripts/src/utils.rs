//! Utilities for the deploy and interaction scripts

use std::{
    path::Path,
    str::FromStr,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use ethers::{
    abi::{Address, Tokenize},
    contract::ContractFactory,
    middleware::SignerMiddleware,
    providers::{Http, Middleware, Provider},
    signers::{LocalWallet, Signer},
};
use tracing::info;

use crate::{
    artifacts::{load_artifact, ContractArtifact},
    constants::{
        CcipNetworkConfig, CCIP_NETWORK_CONFIGS, CCIP_SIMULATOR_CONTRACT, DEVELOPMENT_CHAINS,
        NUM_DEPLOY_CONFIRMATIONS,
    },
    errors::ScriptError,
    solidity::CcipSimulatorContract,
};

/// CCIP routing configuration resolved for the active chain
#[derive(Clone, Copy)]
pub struct CcipConfig {
    /// The CCIP message router
    pub router: Address,
    /// The LINK fee token
    pub link_token: Address,
}

/// Sets up the client with which to deploy and call contracts, from the
/// operator's private key and the target node's RPC url
pub async fn setup_client(
    priv_key: &str,
    rpc_url: &str,
) -> Result<Arc<impl Middleware>, ScriptError> {
    let provider = Provider::<Http>::try_from(rpc_url)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    let wallet = LocalWallet::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let chain_id = provider
        .get_chainid()
        .await
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?
        .as_u64();
    let client = Arc::new(SignerMiddleware::new(
        provider,
        wallet.with_chain_id(chain_id),
    ));

    Ok(client)
}

/// Returns the address of the account the client signs with
pub fn deployer_address(client: &impl Middleware) -> Result<Address, ScriptError> {
    client.default_sender().ok_or_else(|| {
        ScriptError::ClientInitialization("client does not have sender attached".to_string())
    })
}

/// Deploys a contract from its compiled artifact with the given constructor
/// arguments, waiting for the deployment transaction to confirm
pub async fn deploy_contract<T: Tokenize>(
    artifact: &ContractArtifact,
    constructor_args: T,
    client: Arc<impl Middleware>,
) -> Result<Address, ScriptError> {
    let factory = ContractFactory::new(artifact.abi.clone(), artifact.bytecode.clone(), client);
    let contract = factory
        .deploy(constructor_args)
        .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?
        .confirmations(NUM_DEPLOY_CONFIRMATIONS)
        .send()
        .await
        .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

    Ok(contract.address())
}

/// Whether the named network is a local development chain
pub fn is_development_chain(network: &str) -> bool {
    DEVELOPMENT_CHAINS.contains(&network)
}

/// Looks up the static CCIP routing configuration for the given chain id
pub fn ccip_network_config(chain_id: u64) -> Option<&'static CcipNetworkConfig> {
    CCIP_NETWORK_CONFIGS
        .iter()
        .find(|config| config.chain_id == chain_id)
}

/// Resolves the CCIP router and LINK token for the active chain.
///
/// Development chains get a freshly deployed local simulator; public
/// networks are looked up in the static per-chain table by the node's
/// chain id.
pub async fn resolve_ccip_config(
    network: &str,
    artifacts_dir: &Path,
    client: Arc<impl Middleware>,
) -> Result<CcipConfig, ScriptError> {
    if is_development_chain(network) {
        let artifact = load_artifact(artifacts_dir, CCIP_SIMULATOR_CONTRACT)?;
        let simulator_address = deploy_contract(&artifact, (), client.clone()).await?;
        info!("{CCIP_SIMULATOR_CONTRACT} deployed at {simulator_address:#x}");

        let simulator = CcipSimulatorContract::new(simulator_address, client);
        let (_, source_router, _, _, link_token, _, _) = simulator
            .configuration()
            .call()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

        Ok(CcipConfig {
            router: source_router,
            link_token,
        })
    } else {
        let chain_id = client
            .get_chainid()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
            .as_u64();
        let config =
            ccip_network_config(chain_id).ok_or(ScriptError::UnsupportedChain(chain_id))?;

        Ok(CcipConfig {
            router: parse_address(config.router)?,
            link_token: parse_address(config.link_token)?,
        })
    }
}

/// Parses a hex string into an address
pub fn parse_address(address: &str) -> Result<Address, ScriptError> {
    Address::from_str(address).map_err(|e| ScriptError::CalldataConstruction(e.to_string()))
}

/// Current unix timestamp, in seconds
pub fn unix_timestamp() -> Result<u64, ScriptError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .map_err(|e| ScriptError::CalldataConstruction(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::missing_docs_in_private_items)]
mod tests {
    use super::{ccip_network_config, is_development_chain, parse_address};

    #[test]
    fn development_chains_are_detected() {
        assert!(is_development_chain("localhost"));
        assert!(is_development_chain("hardhat"));
        assert!(!is_development_chain("sepolia"));
    }

    #[test]
    fn known_chains_have_ccip_config() {
        let sepolia = ccip_network_config(11_155_111).unwrap();
        assert_eq!(sepolia.router, "0x0BF3dE8c5D3e8A2B34D2BEeB17ABfCeBaf363A59");

        let amoy = ccip_network_config(80_002).unwrap();
        assert_eq!(amoy.link_token, "0x0Fd9e8d3aF1aaee056EB9e802c3A762a667b1904");

        assert!(ccip_network_config(1).is_none());
    }

    #[test]
    fn addresses_parse_and_reject() {
        assert!(parse_address("0x694AA1769357215DE4FAC081bf1f309aDC325306").is_ok());
        assert!(parse_address("not an address").is_err());
    }
}
