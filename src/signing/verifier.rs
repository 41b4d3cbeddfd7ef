//! Post-sign verification
//!
//! Wallet backends are untrusted: they may alter fields, sign something else,
//! or return a key that is not the connected one. Every wallet round trip ends
//! here, and a failure is always fatal for the request.

use subtle::ConstantTimeEq;

use super::VerificationError;
use crate::bcs::BcsSerialize;
use crate::transaction::{RawTransaction, SignedTransaction, TransactionAuthenticator, UnverifiedSignedTransaction};
use crate::types::Ed25519PublicKey;
use crate::utils::verify_ed25519;
use crate::{log_error, log_warn};

#[derive(Debug, Clone)]
pub struct PostSignVerifier {
    public_key: Ed25519PublicKey,
}

impl PostSignVerifier {
    pub fn new(public_key: Ed25519PublicKey) -> Self {
        Self { public_key }
    }

    pub fn public_key(&self) -> &Ed25519PublicKey {
        &self.public_key
    }

    /// Check `signed` against the transaction that was sent for signing
    ///
    /// Checks run in order: raw transaction encoding, authenticator shape,
    /// public key, signature. The first failure is returned.
    pub fn verify(
        &self,
        original: &RawTransaction,
        signed: UnverifiedSignedTransaction,
    ) -> Result<SignedTransaction, VerificationError> {
        self.check_raw(original, &signed.raw_txn)?;

        let (public_key, signature) = match &signed.authenticator {
            TransactionAuthenticator::Ed25519 { public_key, signature } => (public_key, signature),
            other => {
                log_error!("verifier", "Unexpected authenticator scheme", scheme = other.scheme());
                return Err(VerificationError::MalformedAuthenticator(format!(
                    "expected ed25519 authenticator, got {}",
                    other.scheme()
                )));
            }
        };

        if !bool::from(public_key.as_bytes().ct_eq(self.public_key.as_bytes())) {
            log_error!(
                "verifier",
                "Public key mismatch",
                expected_public_key = self.public_key,
                actual_public_key = public_key
            );
            return Err(VerificationError::PublicKeyMismatch);
        }

        let message = signed.raw_txn.signing_message();
        if !verify_ed25519(public_key, &message, signature) {
            log_error!("verifier", "Invalid signature", public_key = public_key);
            return Err(VerificationError::SignatureMismatch);
        }

        Ok(SignedTransaction::from_verified(signed.raw_txn, signed.authenticator))
    }

    fn check_raw(&self, original: &RawTransaction, returned: &RawTransaction) -> Result<(), VerificationError> {
        let expected = original.to_bcs_bytes();
        let actual = returned.to_bcs_bytes();
        if expected == actual {
            return Ok(());
        }

        log_warn!(
            "verifier",
            "Signed transaction differs from request",
            expected_bcs = hex::encode(&expected),
            actual_bcs = hex::encode(&actual)
        );

        let diffs = original.diff(returned);
        for diff in &diffs {
            log_warn!(
                "verifier",
                "Field mismatch",
                field = diff.field,
                expected = diff.expected,
                actual = diff.actual
            );
        }

        match diffs.into_iter().next() {
            Some(diff) => Err(VerificationError::FieldMismatch {
                field: diff.field,
                expected: diff.expected,
                actual: diff.actual,
            }),
            None => Err(VerificationError::EncodingMismatch),
        }
    }
}
