//! MSafe multisig address derivation
//!
//! The account's threshold key is the owner keys in caller order, plus (for
//! freshly created wallets) one synthetic "nonce key" so the same owner set
//! can back several wallets. Imported wallets use the import nonce and get no
//! synthetic key.

use serde::Serialize;

use super::public_key::MultiEd25519PublicKey;
use super::MultisigError;
use crate::types::{AccountAddress, Ed25519PublicKey, ED25519_PUBLIC_KEY_LENGTH};

/// Sentinel nonce for wallets imported as-is
pub const IMPORT_NONCE: u64 = u64::MAX;

/// MSafe deployer on mainnet; its first 16 bytes seed every nonce key
pub const MAINNET_DEPLOYER: AccountAddress = AccountAddress::new([
    0xaa, 0x90, 0xe0, 0xd9, 0xd1, 0x6b, 0x63, 0xba, 0x4a, 0x28, 0x9f, 0xb0, 0xdc, 0x8d, 0x1b, 0x45,
    0x40, 0x58, 0xb2, 0x1c, 0x9b, 0x5c, 0x76, 0x86, 0x4f, 0x82, 0x5d, 0x5c, 0x1f, 0x32, 0x58, 0x2e,
]);

const DEPLOYER_PREFIX_LENGTH: usize = 16;

/// Result of a derivation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedMultisig {
    pub public_key: MultiEd25519PublicKey,
    #[serde(with = "crate::serde_bytes::hex32")]
    pub authentication_key: [u8; 32],
    pub address: AccountAddress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultisigDeriver {
    deployer: AccountAddress,
}

impl Default for MultisigDeriver {
    fn default() -> Self {
        Self::new(MAINNET_DEPLOYER)
    }
}

impl MultisigDeriver {
    pub fn new(deployer: AccountAddress) -> Self {
        Self { deployer }
    }

    pub fn deployer(&self) -> &AccountAddress {
        &self.deployer
    }

    /// `deployer[..16] || nonce as u32 LE || zeros`
    pub fn nonce_public_key(&self, nonce: u64) -> Result<Ed25519PublicKey, MultisigError> {
        let nonce = u32::try_from(nonce).map_err(|_| MultisigError::InvalidNonce(nonce))?;
        let mut key = [0u8; ED25519_PUBLIC_KEY_LENGTH];
        key[..DEPLOYER_PREFIX_LENGTH].copy_from_slice(&self.deployer.as_bytes()[..DEPLOYER_PREFIX_LENGTH]);
        key[DEPLOYER_PREFIX_LENGTH..DEPLOYER_PREFIX_LENGTH + 4].copy_from_slice(&nonce.to_le_bytes());
        Ok(Ed25519PublicKey::new(key))
    }

    /// Threshold key, authentication key and address for `members`
    pub fn derive(
        &self,
        members: &[Ed25519PublicKey],
        threshold: u8,
        nonce: u64,
    ) -> Result<DerivedMultisig, MultisigError> {
        let mut public_keys = members.to_vec();
        if nonce != IMPORT_NONCE {
            public_keys.push(self.nonce_public_key(nonce)?);
        }

        let public_key = MultiEd25519PublicKey::new(public_keys, threshold)?;
        let authentication_key = public_key.authentication_key();
        Ok(DerivedMultisig {
            address: AccountAddress::new(authentication_key),
            authentication_key,
            public_key,
        })
    }
}

/// Derive with the mainnet deployer
pub fn derive_multisig(
    members: &[Ed25519PublicKey],
    threshold: u8,
    nonce: u64,
) -> Result<DerivedMultisig, MultisigError> {
    MultisigDeriver::default().derive(members, threshold, nonce)
}
