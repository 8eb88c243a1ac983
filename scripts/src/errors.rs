//! Definitions of errors that can occur during the execution of the deploy
//! and interaction scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the deploy and interaction scripts
#[derive(Debug)]
pub enum ScriptError {
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// Error locating or parsing a compiled contract artifact
    ArtifactParsing(String),
    /// Error constructing calldata for a contract method
    CalldataConstruction(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// Error calling a contract method
    ContractInteraction(String),
    /// Error reading the deployments ledger
    ReadDeployments(String),
    /// Error writing the deployments ledger
    WriteDeployments(String),
    /// A contract address expected in the deployments ledger is absent
    MissingDeployment(String),
    /// The target chain has no known CCIP routing configuration
    UnsupportedChain(u64),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            ScriptError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            ScriptError::CalldataConstruction(s) => write!(f, "error constructing calldata: {}", s),
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
            ScriptError::ReadDeployments(s) => write!(f, "error reading deployments: {}", s),
            ScriptError::WriteDeployments(s) => write!(f, "error writing deployments: {}", s),
            ScriptError::MissingDeployment(s) => write!(f, "missing deployment: {}", s),
            ScriptError::UnsupportedChain(chain_id) => {
                write!(f, "no CCIP configuration for chain id {}", chain_id)
            }
        }
    }
}

impl Error for ScriptError {}
