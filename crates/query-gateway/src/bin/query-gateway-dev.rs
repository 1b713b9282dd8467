//! Development gateway over an in-memory ledger.
//!
//! Usage: `query-gateway-dev [config.toml]`. `QG_HTTP_PORT` overrides the
//! configured port.

use std::sync::Arc;

use anyhow::{Context, Result};
use query_gateway::adapters::{InMemoryLedger, RecordingRelay, StaticPeers};
use query_gateway::{ApiGatewayService, GatewayConfig};
use shared_types::{
    Asset, Block, BlockHeader, Fixed64, Payload, TokenKind, Transaction, TxOutput, Uint160,
    Uint256, UnspentOutput, UserRecord,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Script hash that owns the genesis issuance.
const FAUCET: Uint160 = Uint160([0x42; 20]);

fn load_config() -> Result<GatewayConfig> {
    let mut config = match std::env::args().nth(1) {
        Some(path) => GatewayConfig::load(&path).with_context(|| format!("loading {}", path))?,
        None => GatewayConfig::default(),
    };

    if let Ok(port) = std::env::var("QG_HTTP_PORT") {
        match port.parse() {
            Ok(p) => config.http.port = p,
            Err(_) => warn!(value = %port, "ignoring unparsable QG_HTTP_PORT"),
        }
    }

    Ok(config)
}

/// Genesis block with one registered asset, issued in full to the faucet.
fn seed(ledger: &InMemoryLedger) {
    let asset = Asset {
        name: "ForumCoin".to_string(),
        description: "native token".to_string(),
        precision: 8,
        asset_type: 0,
        record_type: 1,
    };
    let supply = Fixed64::from_units(1_000_000);

    let mut register = Transaction::new(Payload::RegisterAsset {
        asset: asset.clone(),
        amount: supply,
        issuer: Vec::new(),
        controller: FAUCET,
    });
    register.outputs.push(TxOutput {
        asset_id: Uint256::ZERO,
        value: supply,
        program_hash: FAUCET,
    });
    let asset_id = register.hash();

    let register_user = Transaction::new(Payload::RegisterUser {
        username: "genesis".to_string(),
        user_program_hash: FAUCET,
    });

    let genesis = Block {
        header: BlockHeader {
            timestamp: 1_700_000_000,
            height: 0,
            ..Default::default()
        },
        transactions: vec![
            Transaction::new(Payload::BookKeeping { nonce: 0 }),
            register.clone(),
            register_user,
        ],
    };

    ledger.insert_asset(asset_id, asset, supply);
    ledger.add_unspent(UnspentOutput {
        owner: FAUCET,
        asset_id,
        txid: register.hash(),
        index: 0,
        value: supply,
    });
    ledger.upsert_user(UserRecord {
        username: "genesis".to_string(),
        user_program_hash: FAUCET,
        reputation: Fixed64::ZERO,
    });
    ledger.set_token("genesis", TokenKind::Total, Fixed64::ZERO);
    ledger.set_token("genesis", TokenKind::Withdrawn, Fixed64::ZERO);

    info!(
        block = %genesis.hash(),
        asset = %asset_id,
        faucet = %FAUCET.to_address(),
        "Seeded genesis"
    );
    ledger.insert_block(genesis);
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = load_config()?;

    let ledger = Arc::new(InMemoryLedger::new());
    seed(&ledger);

    let mut service = ApiGatewayService::new(
        config,
        ledger,
        Arc::new(RecordingRelay::accepting()),
        Arc::new(StaticPeers::new(0)),
    )?;
    let addr = service.start().await?;

    info!(%addr, "Gateway is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    service.stop().await;
    Ok(())
}
