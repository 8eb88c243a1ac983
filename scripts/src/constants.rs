//! Constants used in the deploy and interaction scripts

/// Default path of the ledger file recording deployed contract addresses
pub const DEPLOYMENTS_PATH: &str = "deployAddress.json";

/// Default directory holding the compiled contract artifacts
pub const ARTIFACTS_DIR: &str = "artifacts";

/// The number of confirmations to wait for each deployment transaction
pub const NUM_DEPLOY_CONFIRMATIONS: usize = 0;

/// Networks on which a local CCIP simulator stands in for the real router
pub const DEVELOPMENT_CHAINS: [&str; 2] = ["hardhat", "localhost"];

/// The NFT collection contract name, used as both artifact and ledger key
pub const MY_NFT_CONTRACT: &str = "MyNFT";

/// The auction controller implementation contract name
pub const AUCTION_CONTROLLER_CONTRACT: &str = "AuctionController";

/// The auction factory implementation contract name
pub const AUCTION_FACTORY_CONTRACT: &str = "AuctionFactory";

/// Ledger key under which the initialized factory proxy is recorded
pub const AUCTION_FACTORY_PROXY_CONTRACT: &str = "AuctionFactoryProxy";

/// The upgradeable proxy artifact the factory is deployed behind
pub const ERC1967_PROXY_CONTRACT: &str = "ERC1967Proxy";

/// The source-chain cross-chain messenger contract name
pub const CROSS_CHAIN_MESSENGER_CONTRACT: &str = "CrossChainMessenger";

/// The destination-chain cross-chain gateway contract name
pub const CROSS_CHAIN_GATEWAY_CONTRACT: &str = "CrossChainGateway";

/// The local CCIP simulator contract name
pub const CCIP_SIMULATOR_CONTRACT: &str = "CCIPSimulator";

/// Ledger key under which the most recently created auction is recorded
pub const LATEST_AUCTION_KEY: &str = "LatestAuction";

/// The Chainlink ETH/USD price feed on Sepolia, the default feed auctions
/// value bids against
pub const SEPOLIA_ETH_USD_PRICE_FEED: &str = "0x694AA1769357215DE4FAC081bf1f309aDC325306";

/// Seconds between auction creation and the start of bidding
pub const AUCTION_START_DELAY_SECS: u64 = 10;

/// Seconds bidding stays open once started
pub const AUCTION_DURATION_SECS: u64 = 86_400;

/// CCIP routing addresses for a public network
pub struct CcipNetworkConfig {
    /// Chain id the configuration applies to
    pub chain_id: u64,
    /// The CCIP message router
    pub router: &'static str,
    /// The LINK fee token
    pub link_token: &'static str,
}

/// CCIP routing configuration for the supported public networks
pub const CCIP_NETWORK_CONFIGS: [CcipNetworkConfig; 2] = [
    // Ethereum Sepolia
    CcipNetworkConfig {
        chain_id: 11_155_111,
        router: "0x0BF3dE8c5D3e8A2B34D2BEeB17ABfCeBaf363A59",
        link_token: "0x779877A7B0D9E8603169DdbD7836e478b4624789",
    },
    // Polygon Amoy
    CcipNetworkConfig {
        chain_id: 80_002,
        router: "0x9C32fCB86BF0f4a1A8921a9Fe46de3198bb884B2",
        link_token: "0x0Fd9e8d3aF1aaee056EB9e802c3A762a667b1904",
    },
];
