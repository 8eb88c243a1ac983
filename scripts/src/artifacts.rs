//! Loading of compiled contract artifacts produced by the Solidity toolchain

use std::{
    fs,
    path::{Path, PathBuf},
};

use ethers::{abi::Abi, types::Bytes};
use serde::Deserialize;

use crate::errors::ScriptError;

/// A compiled contract artifact, as emitted by the Solidity toolchain
#[derive(Clone, Debug, Deserialize)]
pub struct ContractArtifact {
    /// The contract's ABI
    pub abi: Abi,
    /// The contract's creation bytecode, hex-encoded
    pub bytecode: Bytes,
}

/// Loads the compiled artifact for the given contract from the artifacts
/// directory.
///
/// The toolchain nests artifacts by source path, so the directory tree is
/// searched for a file named `<contract_name>.json`.
pub fn load_artifact(
    artifacts_dir: &Path,
    contract_name: &str,
) -> Result<ContractArtifact, ScriptError> {
    let file_name = format!("{contract_name}.json");
    let artifact_path = find_artifact_file(artifacts_dir, &file_name)?.ok_or_else(|| {
        ScriptError::ArtifactParsing(format!(
            "no {} artifact found under {}",
            file_name,
            artifacts_dir.display()
        ))
    })?;

    let contents = fs::read_to_string(artifact_path)
        .map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;

    serde_json::from_str(&contents).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))
}

/// Searches the directory tree rooted at `dir` for a file with the given name
fn find_artifact_file(dir: &Path, file_name: &str) -> Result<Option<PathBuf>, ScriptError> {
    for entry in fs::read_dir(dir).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))? {
        let path = entry
            .map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?
            .path();
        if path.is_dir() {
            if let Some(found) = find_artifact_file(&path, file_name)? {
                return Ok(Some(found));
            }
        } else if path.file_name().is_some_and(|name| name == file_name) {
            return Ok(Some(path));
        }
    }

    Ok(None)
}

#[cfg(test)]
#[allow(clippy::missing_docs_in_private_items)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::load_artifact;
    use crate::errors::ScriptError;

    const NFT_ARTIFACT: &str = r#"{
        "contractName": "MyNFT",
        "abi": [
            {
                "type": "function",
                "name": "mint",
                "inputs": [{ "name": "to", "type": "address" }],
                "outputs": [],
                "stateMutability": "nonpayable"
            }
        ],
        "bytecode": "0x6080604052"
    }"#;

    #[test]
    fn artifacts_are_found_in_nested_directories() {
        let dir = tempdir().unwrap();
        let artifact_dir = dir.path().join("contracts/MyNFT.sol");
        fs::create_dir_all(&artifact_dir).unwrap();
        fs::write(artifact_dir.join("MyNFT.json"), NFT_ARTIFACT).unwrap();

        let artifact = load_artifact(dir.path(), "MyNFT").unwrap();
        assert!(artifact.abi.function("mint").is_ok());
        assert_eq!(
            artifact.bytecode.to_vec(),
            vec![0x60, 0x80, 0x60, 0x40, 0x52]
        );
    }

    #[test]
    fn missing_artifacts_are_an_error() {
        let dir = tempdir().unwrap();

        let err = load_artifact(dir.path(), "MyNFT").unwrap_err();
        assert!(matches!(err, ScriptError::ArtifactParsing(_)));
    }

    #[test]
    fn malformed_artifacts_are_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("MyNFT.json"), "{}").unwrap();

        let err = load_artifact(dir.path(), "MyNFT").unwrap_err();
        assert!(matches!(err, ScriptError::ArtifactParsing(_)));
    }
}
