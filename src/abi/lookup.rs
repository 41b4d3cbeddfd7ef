//! ABI lookup collaborators
//!
//! - [`RestAbiLookup`]: fetches modules from a node REST endpoint
//! - [`StaticAbiLookup`]: in-memory registry, loadable from JSON
//! - [`CachedAbiLookup`]: explicit opt-in TTL cache around any lookup

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use super::types::{FunctionSignature, MoveModuleAbi, MoveModuleBytecode};
use super::AbiError;
use crate::transaction::ModuleId;
use crate::types::AccountAddress;
use crate::utils::network_config::NetworkConfig;
use crate::utils::Cache;
use crate::{log_debug, log_warn};

/// Resolves an entry function's declared signature
#[async_trait]
pub trait AbiLookup: Send + Sync {
    async fn get_function_abi(&self, module: &ModuleId, function: &str) -> Result<FunctionSignature, AbiError>;
}

fn resolve_function(abi: &MoveModuleAbi, module: &ModuleId, function: &str) -> Result<FunctionSignature, AbiError> {
    let found = abi.function(function).ok_or_else(|| AbiError::FunctionNotFound {
        module: module.to_string(),
        function: function.to_string(),
    })?;
    FunctionSignature::from_abi(module.clone(), found)
}

// =============================================================================
// REST
// =============================================================================

pub struct RestAbiLookup {
    client: reqwest::Client,
    base_url: String,
}

impl RestAbiLookup {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AbiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("msafe-wallet-adaptor/0.1")
            .build()
            .map_err(|e| AbiError::Transport(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &NetworkConfig) -> Result<Self, AbiError> {
        Self::new(config.rpc_url.clone(), config.timeout)
    }

    fn module_url(&self, module: &ModuleId) -> String {
        format!("{}/accounts/{}/module/{}", self.base_url, module.address.to_hex(), module.name)
    }
}

#[async_trait]
impl AbiLookup for RestAbiLookup {
    async fn get_function_abi(&self, module: &ModuleId, function: &str) -> Result<FunctionSignature, AbiError> {
        let url = self.module_url(module);
        log_debug!("abi", "Fetching module ABI", url = url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AbiError::Transport(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AbiError::AbiNotFound {
                module: module.to_string(),
            });
        }
        if !status.is_success() {
            log_warn!("abi", "Module fetch failed", url = url, status = status.as_u16());
            return Err(AbiError::Transport(format!("HTTP {} from {}", status.as_u16(), url)));
        }

        let bytecode: MoveModuleBytecode = response
            .json()
            .await
            .map_err(|e| AbiError::InvalidAbi(e.to_string()))?;
        let abi = bytecode.abi.ok_or_else(|| AbiError::AbiNotFound {
            module: module.to_string(),
        })?;
        resolve_function(&abi, module, function)
    }
}

// =============================================================================
// Static
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct StaticAbiLookup {
    modules: HashMap<(AccountAddress, String), MoveModuleAbi>,
}

impl StaticAbiLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, abi: MoveModuleAbi) {
        self.modules.insert((abi.address, abi.name.clone()), abi);
    }

    pub fn with_module(mut self, abi: MoveModuleAbi) -> Self {
        self.insert(abi);
        self
    }

    /// JSON array of module ABIs
    pub fn from_json(json: &str) -> Result<Self, AbiError> {
        let modules: Vec<MoveModuleAbi> =
            serde_json::from_str(json).map_err(|e| AbiError::InvalidAbi(e.to_string()))?;
        let mut lookup = Self::new();
        for abi in modules {
            lookup.insert(abi);
        }
        Ok(lookup)
    }

    pub fn from_file(path: &Path) -> Result<Self, AbiError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| AbiError::InvalidAbi(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[async_trait]
impl AbiLookup for StaticAbiLookup {
    async fn get_function_abi(&self, module: &ModuleId, function: &str) -> Result<FunctionSignature, AbiError> {
        let abi = self
            .modules
            .get(&(module.address, module.name.clone()))
            .ok_or_else(|| AbiError::AbiNotFound {
                module: module.to_string(),
            })?;
        resolve_function(abi, module, function)
    }
}

// =============================================================================
// Cache decorator
// =============================================================================

/// Caches successful lookups for a fixed TTL; failures are never cached
pub struct CachedAbiLookup<L> {
    inner: L,
    cache: Mutex<Cache<FunctionSignature>>,
}

impl<L: AbiLookup> CachedAbiLookup<L> {
    pub fn new(inner: L, ttl: Duration) -> Self {
        Self {
            inner,
            cache: Mutex::new(Cache::new(ttl)),
        }
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }

    fn key(module: &ModuleId, function: &str) -> String {
        format!("{}::{}::{}", module.address.to_hex(), module.name, function)
    }
}

#[async_trait]
impl<L: AbiLookup> AbiLookup for CachedAbiLookup<L> {
    async fn get_function_abi(&self, module: &ModuleId, function: &str) -> Result<FunctionSignature, AbiError> {
        let key = Self::key(module, function);
        let cached = self.cache.lock().ok().and_then(|cache| cache.get(&key));
        if let Some(signature) = cached {
            return Ok(signature);
        }

        let signature = self.inner.get_function_abi(module, function).await?;
        if let Ok(mut cache) = self.cache.lock() {
            cache.set(key, signature.clone());
            log_debug!("abi", "Cached function ABI", function = function, entries = cache.len());
        }
        Ok(signature)
    }
}
