//! The deployment address ledger: a durable mapping from (network, contract
//! name) to deployed address, shared across script invocations through a
//! JSON file

use std::{
    fs,
    path::{Path, PathBuf},
};

use json::JsonValue;

use crate::errors::ScriptError;

/// Number of spaces the ledger file is indented with
const LEDGER_INDENT: u16 = 2;

/// Handle to the deployments ledger backing file.
///
/// The ledger maps network name to contract name to address. Every write
/// reads the full file, mutates it in memory, and rewrites it; the last
/// writer wins. Scripts run sequentially under a single operator, so no
/// locking is layered on top.
pub struct Deployments {
    /// Path of the backing JSON file
    path: PathBuf,
}

impl Deployments {
    /// Creates a handle over the given backing path.
    ///
    /// The file itself is created lazily by the first `save`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Records `address` under `(network, contract_name)`, overwriting any
    /// previous entry for the pair. Entries under other networks and other
    /// contract names are preserved.
    pub fn save(
        &self,
        network: &str,
        contract_name: &str,
        address: &str,
    ) -> Result<(), ScriptError> {
        let mut ledger = if self.path.exists() {
            read_json(&self.path)?
        } else {
            JsonValue::new_object()
        };

        ledger[network][contract_name] = JsonValue::String(address.to_string());

        fs::write(&self.path, json::stringify_pretty(ledger, LEDGER_INDENT))
            .map_err(|e| ScriptError::WriteDeployments(e.to_string()))
    }

    /// Looks up the address recorded under `(network, contract_name)`,
    /// returning `None` when the pair, or the ledger file itself, is absent
    pub fn get(&self, network: &str, contract_name: &str) -> Result<Option<String>, ScriptError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let ledger = read_json(&self.path)?;

        Ok(ledger[network][contract_name].as_str().map(str::to_owned))
    }

    /// Like `get`, but treats an absent entry as fatal
    pub fn require(&self, network: &str, contract_name: &str) -> Result<String, ScriptError> {
        self.get(network, contract_name)?.ok_or_else(|| {
            ScriptError::MissingDeployment(format!(
                "no {} address recorded for network {}",
                contract_name, network
            ))
        })
    }
}

/// Reads and parses the JSON document at the given path
fn read_json(path: &Path) -> Result<JsonValue, ScriptError> {
    let contents =
        fs::read_to_string(path).map_err(|e| ScriptError::ReadDeployments(e.to_string()))?;

    json::parse(&contents).map_err(|e| ScriptError::ReadDeployments(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::missing_docs_in_private_items)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::Deployments;
    use crate::errors::ScriptError;

    const NFT_ADDRESS: &str = "0x5fbdb2315678afecb367f032d93f642f64180aa3";
    const FACTORY_ADDRESS: &str = "0xe7f1725e7734ce288f8367e1bb143e90bb3f0512";

    fn ledger_in(dir: &tempfile::TempDir) -> Deployments {
        Deployments::new(dir.path().join("deployAddress.json"))
    }

    #[test]
    fn save_then_get_round_trips() {
        let dir = tempdir().unwrap();
        let deployments = ledger_in(&dir);

        deployments.save("sepolia", "MyNFT", NFT_ADDRESS).unwrap();

        assert_eq!(
            deployments.get("sepolia", "MyNFT").unwrap().as_deref(),
            Some(NFT_ADDRESS)
        );
    }

    #[test]
    fn get_on_missing_file_is_absent() {
        let dir = tempdir().unwrap();
        let deployments = ledger_in(&dir);

        assert_eq!(deployments.get("amoy", "MyNFT").unwrap(), None);
    }

    #[test]
    fn get_on_missing_entry_is_absent() {
        let dir = tempdir().unwrap();
        let deployments = ledger_in(&dir);
        deployments.save("sepolia", "MyNFT", NFT_ADDRESS).unwrap();

        assert_eq!(deployments.get("sepolia", "AuctionFactory").unwrap(), None);
        assert_eq!(deployments.get("amoy", "MyNFT").unwrap(), None);
    }

    #[test]
    fn networks_are_partitioned() {
        let dir = tempdir().unwrap();
        let deployments = ledger_in(&dir);

        deployments.save("sepolia", "MyNFT", NFT_ADDRESS).unwrap();
        deployments.save("amoy", "MyNFT", FACTORY_ADDRESS).unwrap();

        assert_eq!(
            deployments.get("sepolia", "MyNFT").unwrap().as_deref(),
            Some(NFT_ADDRESS)
        );
        assert_eq!(
            deployments.get("amoy", "MyNFT").unwrap().as_deref(),
            Some(FACTORY_ADDRESS)
        );
    }

    #[test]
    fn later_save_wins() {
        let dir = tempdir().unwrap();
        let deployments = ledger_in(&dir);

        deployments.save("sepolia", "MyNFT", NFT_ADDRESS).unwrap();
        deployments.save("sepolia", "MyNFT", FACTORY_ADDRESS).unwrap();

        assert_eq!(
            deployments.get("sepolia", "MyNFT").unwrap().as_deref(),
            Some(FACTORY_ADDRESS)
        );
    }

    #[test]
    fn sibling_entries_survive_saves() {
        let dir = tempdir().unwrap();
        let deployments = ledger_in(&dir);

        deployments.save("sepolia", "MyNFT", NFT_ADDRESS).unwrap();
        deployments
            .save("sepolia", "AuctionFactory", FACTORY_ADDRESS)
            .unwrap();

        assert_eq!(
            deployments.get("sepolia", "MyNFT").unwrap().as_deref(),
            Some(NFT_ADDRESS)
        );
        assert_eq!(
            deployments
                .get("sepolia", "AuctionFactory")
                .unwrap()
                .as_deref(),
            Some(FACTORY_ADDRESS)
        );
    }

    #[test]
    fn ledger_is_pretty_printed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deployAddress.json");
        let deployments = Deployments::new(&path);

        deployments.save("sepolia", "MyNFT", NFT_ADDRESS).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\n  \"sepolia\""));
        assert!(contents.contains("\n    \"MyNFT\""));
    }

    #[test]
    fn corrupt_ledger_is_fatal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deployAddress.json");
        fs::write(&path, "{{{{").unwrap();
        let deployments = Deployments::new(&path);

        assert!(matches!(
            deployments.get("sepolia", "MyNFT").unwrap_err(),
            ScriptError::ReadDeployments(_)
        ));
        assert!(matches!(
            deployments.save("sepolia", "MyNFT", NFT_ADDRESS).unwrap_err(),
            ScriptError::ReadDeployments(_)
        ));
    }

    #[test]
    fn require_reports_missing_entry() {
        let dir = tempdir().unwrap();
        let deployments = ledger_in(&dir);

        let err = deployments.require("sepolia", "AuctionFactoryProxy").unwrap_err();
        match err {
            ScriptError::MissingDeployment(message) => {
                assert!(message.contains("AuctionFactoryProxy"));
                assert!(message.contains("sepolia"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
