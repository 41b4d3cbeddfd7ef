//! ABI type definitions
//!
//! JSON shapes follow the node REST API (`GET /accounts/{addr}/module/{name}`).

use serde::{Deserialize, Serialize};

use super::AbiError;
use crate::move_types::MoveType;
use crate::transaction::ModuleId;
use crate::types::AccountAddress;

/// Module as returned by the REST API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveModuleBytecode {
    #[serde(default)]
    pub bytecode: Option<String>,
    #[serde(default)]
    pub abi: Option<MoveModuleAbi>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveModuleAbi {
    pub address: AccountAddress,
    pub name: String,
    #[serde(default)]
    pub exposed_functions: Vec<MoveFunctionAbi>,
}

impl MoveModuleAbi {
    pub fn module_id(&self) -> ModuleId {
        ModuleId::new(self.address, self.name.clone())
    }

    pub fn function(&self, name: &str) -> Option<&MoveFunctionAbi> {
        self.exposed_functions.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveFunctionAbi {
    pub name: String,
    #[serde(default)]
    pub visibility: String,
    #[serde(default)]
    pub is_entry: bool,
    #[serde(default)]
    pub generic_type_params: Vec<serde_json::Value>,
    pub params: Vec<String>,
    #[serde(default, rename = "return")]
    pub return_types: Vec<String>,
}

/// Parsed function signature used by the decoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    pub module: ModuleId,
    pub name: String,
    pub generic_type_params: usize,
    pub params: Vec<MoveType>,
}

impl FunctionSignature {
    pub fn from_abi(module: ModuleId, abi: &MoveFunctionAbi) -> Result<Self, AbiError> {
        let params = abi
            .params
            .iter()
            .map(|p| MoveType::parse(p))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AbiError::InvalidAbi(format!("{}::{}: {}", module, abi.name, e)))?;

        Ok(Self {
            module,
            name: abi.name.clone(),
            generic_type_params: abi.generic_type_params.len(),
            params,
        })
    }

    /// `0x1::coin::transfer`
    pub fn function_tag(&self) -> String {
        format!("{}::{}", self.module, self.name)
    }

    /// Parameters that carry an encoded argument (everything but signers)
    pub fn argument_types(&self) -> Vec<&MoveType> {
        self.params.iter().filter(|p| !p.is_signer()).collect()
    }
}
