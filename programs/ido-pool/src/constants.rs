//! Global constants for the IDO pool
//!
//! Centralized PDA seeds and account sizing

// PDA seed constants
pub const POOL_SIGNER_SEED: &[u8] = b"pool_signer"; // Owns both vaults, mints claims
pub const CLAIM_MINT_SEED: &[u8] = b"claim_mint";
pub const QUOTE_VAULT_SEED: &[u8] = b"quote_vault";
pub const BASE_VAULT_SEED: &[u8] = b"base_vault";

// Account sizing
pub const DISCRIMINATOR_LENGTH: usize = 8;

// Event schema version, bumped when an event layout changes
pub const EVENT_VERSION: u8 = 1;
