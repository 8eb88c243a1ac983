//! ABI definitions of the contract methods called after deployment

use ethers::contract::abigen;

abigen!(
    MyNftContract,
    r#"[
        function mint(address to) external
        function getTokenId() external view returns (uint256)
        function approve(address to, uint256 tokenId) external
    ]"#
);

abigen!(
    AuctionFactoryContract,
    r#"[
        function createAuction(uint256 auctionId, address nftContract, uint256 tokenId, address bidToken, address priceFeed, uint256 startTime, uint256 endTime, address router) external
        function getAuction(address nftContract, uint256 tokenId) external view returns (address)
    ]"#
);

abigen!(
    AuctionControllerContract,
    r#"[
        function bid(uint256 amount) external payable
    ]"#
);

abigen!(
    CcipSimulatorContract,
    r#"[
        function configuration() external view returns (uint64, address, address, address, address, address, address)
    ]"#
);
