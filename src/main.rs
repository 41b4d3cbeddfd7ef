use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use msafe_wallet_adaptor::abi::{AbiLookup, CachedAbiLookup, RestAbiLookup, StaticAbiLookup};
use msafe_wallet_adaptor::bcs::BcsDeserialize;
use msafe_wallet_adaptor::message::PendingPayload;
use msafe_wallet_adaptor::msafe::{MsafeTxnBuilder, PendingTxnInfo};
use msafe_wallet_adaptor::multisig::{MultisigDeriver, IMPORT_NONCE};
use msafe_wallet_adaptor::signing::PostSignVerifier;
use msafe_wallet_adaptor::transaction::{RawTransaction, UnverifiedSignedTransaction};
use msafe_wallet_adaptor::utils::logging::{self, LogLevel};
use msafe_wallet_adaptor::utils::network_config::{Network, NetworkConfig};
use msafe_wallet_adaptor::wallets::{WalletKind, WalletRegistry};
use msafe_wallet_adaptor::{decode_hex, log_info, Ed25519PublicKey};

const ABI_CACHE_TTL: std::time::Duration = std::time::Duration::from_secs(300);

#[derive(Debug, Parser)]
#[command(name = "msafe-wallet-adaptor", version, about = "MSafe multisig tooling for Aptos wallets")]
struct Cli {
    /// Log threshold (debug, info, warn, error, off); overrides MSAFE_LOG
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Derive the MSafe address of an owner set
    DeriveAddress(DeriveAddressArgs),
    /// Summarise a pending MSafe payload (signing message or proof message)
    DecodePayload(DecodePayloadArgs),
    /// Build the request a wallet would be sent for a raw transaction
    SigningRequest(SigningRequestArgs),
    /// Run the post-sign checks on a wallet-returned signed transaction
    Verify(VerifyArgs),
}

#[derive(Debug, Args)]
struct DeriveAddressArgs {
    /// Owner public key, repeat for each owner in order
    #[arg(long = "public-key", value_name = "HEX", required = true)]
    public_keys: Vec<Ed25519PublicKey>,

    #[arg(long)]
    threshold: u8,

    /// Creation nonce
    #[arg(long, default_value_t = 0, conflicts_with = "import")]
    nonce: u64,

    /// Derive an imported wallet (no nonce key)
    #[arg(long)]
    import: bool,
}

#[derive(Debug, Args)]
struct DecodePayloadArgs {
    /// Payload as hex
    payload: String,
}

#[derive(Debug, Args)]
struct SigningRequestArgs {
    /// BCS raw transaction as hex
    #[arg(long, value_name = "HEX")]
    txn: String,

    /// Target wallet (petra, martian, fewcha, pontem, rise, onekey, okx)
    #[arg(long)]
    wallet: String,

    /// Resolve ABIs from a JSON file of module ABIs instead of the network
    #[arg(long, value_name = "FILE")]
    abi_file: Option<PathBuf>,

    /// REST endpoint override for ABI lookups
    #[arg(long, value_name = "URL", conflicts_with = "abi_file")]
    rpc: Option<String>,

    #[arg(long, conflicts_with = "abi_file")]
    network: Option<Network>,
}

#[derive(Debug, Args)]
struct VerifyArgs {
    /// BCS raw transaction that was sent for signing, as hex
    #[arg(long, value_name = "HEX")]
    raw: String,

    /// BCS signed transaction returned by the wallet, as hex
    #[arg(long, value_name = "HEX")]
    signed: String,

    /// Connected account public key
    #[arg(long, value_name = "HEX")]
    public_key: Ed25519PublicKey,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(level) = cli.log_level {
        logging::set_level(level);
    }

    match cli.command {
        Command::DeriveAddress(args) => derive_address(args),
        Command::DecodePayload(args) => decode_payload(args),
        Command::SigningRequest(args) => signing_request(args).await,
        Command::Verify(args) => verify(args),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn derive_address(args: DeriveAddressArgs) -> Result<()> {
    let nonce = if args.import { IMPORT_NONCE } else { args.nonce };
    let derived = MultisigDeriver::default()
        .derive(&args.public_keys, args.threshold, nonce)
        .context("address derivation failed")?;
    print_json(&derived)
}

fn decode_payload(args: DecodePayloadArgs) -> Result<()> {
    let bytes = decode_hex(&args.payload).context("payload is not valid hex")?;
    let payload = PendingPayload::classify(&bytes).context("unrecognised pending payload")?;
    log_info!("cli", "Decoded pending payload", kind = payload.kind());
    print_json(&PendingTxnInfo::from_payload(&payload, &MsafeTxnBuilder::default()))
}

fn abi_lookup(args: &SigningRequestArgs) -> Result<Arc<dyn AbiLookup>> {
    if let Some(path) = &args.abi_file {
        let lookup = StaticAbiLookup::from_file(path).with_context(|| format!("loading {}", path.display()))?;
        return Ok(Arc::new(lookup));
    }

    let mut config = match args.network {
        Some(network) => NetworkConfig::new(network),
        None => NetworkConfig::from_env()?,
    };
    if let Some(rpc) = &args.rpc {
        config = config.with_rpc_url(rpc)?;
    }
    let lookup = RestAbiLookup::from_config(&config)?;
    Ok(Arc::new(CachedAbiLookup::new(lookup, ABI_CACHE_TTL)))
}

async fn signing_request(args: SigningRequestArgs) -> Result<()> {
    let kind: WalletKind = args.wallet.parse()?;
    let raw = RawTransaction::from_bcs_bytes(&decode_hex(&args.txn)?).context("txn is not a raw transaction")?;
    let adapter = WalletRegistry::with_defaults().get(kind)?;
    let lookup = abi_lookup(&args)?;

    let request = adapter.build_request(&raw, lookup.as_ref()).await?;
    print_json(&request)
}

fn verify(args: VerifyArgs) -> Result<()> {
    let raw = RawTransaction::from_bcs_bytes(&decode_hex(&args.raw)?).context("raw is not a raw transaction")?;
    let signed = UnverifiedSignedTransaction::from_bcs_bytes(&decode_hex(&args.signed)?)
        .context("signed is not a signed transaction")?;

    match PostSignVerifier::new(args.public_key).verify(&raw, signed) {
        Ok(signed) => print_json(&serde_json::json!({
            "hash": signed.raw_txn().hash_hex(),
            "signed_txn": signed.to_hex(),
        })),
        Err(e) => Err(anyhow!(e).context("signed transaction rejected")),
    }
}
