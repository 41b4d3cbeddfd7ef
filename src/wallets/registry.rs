//! Adapter lookup by wallet identifier

use std::collections::HashMap;
use std::sync::Arc;

use super::{
    FewchaAdapter, MartianAdapter, OkxAdapter, OnekeyAdapter, PetraAdapter, PontemAdapter, RiseAdapter,
    WalletAdapter, WalletError, WalletKind,
};

#[derive(Clone, Default)]
pub struct WalletRegistry {
    adapters: HashMap<WalletKind, Arc<dyn WalletAdapter>>,
}

impl WalletRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in adapter
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PetraAdapter));
        registry.register(Arc::new(MartianAdapter));
        registry.register(Arc::new(FewchaAdapter));
        registry.register(Arc::new(PontemAdapter));
        registry.register(Arc::new(RiseAdapter));
        registry.register(Arc::new(OnekeyAdapter));
        registry.register(Arc::new(OkxAdapter));
        registry
    }

    /// Replaces any adapter already registered for the same kind
    pub fn register(&mut self, adapter: Arc<dyn WalletAdapter>) {
        self.adapters.insert(adapter.kind(), adapter);
    }

    pub fn get(&self, kind: WalletKind) -> Result<Arc<dyn WalletAdapter>, WalletError> {
        self.adapters
            .get(&kind)
            .cloned()
            .ok_or_else(|| WalletError::UnknownWallet(kind.to_string()))
    }

    pub fn get_by_name(&self, name: &str) -> Result<Arc<dyn WalletAdapter>, WalletError> {
        self.get(name.parse()?)
    }

    /// Registered kinds in stable order
    pub fn kinds(&self) -> Vec<WalletKind> {
        let mut kinds: Vec<_> = self.adapters.keys().copied().collect();
        kinds.sort();
        kinds
    }
}

impl std::fmt::Debug for WalletRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletRegistry").field("kinds", &self.kinds()).finish()
    }
}
