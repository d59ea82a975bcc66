//! Shared fixture for host-side pool tests
//!
//! Builds a pool over the in-memory ledger with the same program-derived
//! addresses the on-chain instruction would create, and drives every
//! operation through `InMemoryLedger::atomically` so a failed call leaves
//! no partial state behind, as a failed transaction would.

#![allow(dead_code)]

pub mod tracing;

use anchor_lang::prelude::*;
use ido_pool::{
    clock::FixedClock,
    constants::{BASE_VAULT_SEED, CLAIM_MINT_SEED, QUOTE_VAULT_SEED},
    ledger::{Authority, InMemoryLedger, TokenLedger},
    logic::engine::{initialize_pool, ExchangeEngine, Participant, PoolKeys},
    signer::PoolSigner,
    state::{InitializePoolParams, PoolAccount, PoolPhase, SweepPolicy},
};

pub use self::tracing::init_test_tracing;

pub const START_TS: i64 = 1_000;
pub const END_DEPOSITS_TS: i64 = 2_000;
pub const END_IDO_TS: i64 = 3_000;

pub const QUOTE_DECIMALS: u8 = 6;
pub const BASE_DECIMALS: u8 = 9;

fn pda(seed: &[u8], pool: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[seed, pool.as_ref()], &ido_pool::ID).0
}

/// Everything `initialize_pool` needs, before it has run
pub struct PoolSetup {
    pub ledger: InMemoryLedger,
    pub keys: PoolKeys,
    pub params: InitializePoolParams,
    pub signer: PoolSigner,
    pub base_mint_authority: Pubkey,
    pub quote_mint_authority: Pubkey,
    pub now: i64,
}

impl PoolSetup {
    /// Mints, derived claim mint and vaults, and a creator holding exactly `base_allocation`
    pub fn new(base_allocation: u64) -> Self {
        init_test_tracing();

        let mut ledger = InMemoryLedger::new();
        let pool = Pubkey::new_unique();
        let distribution_authority = Pubkey::new_unique();
        let signer = PoolSigner::derive(&pool, &ido_pool::ID);

        let base_mint_authority = Pubkey::new_unique();
        let quote_mint_authority = Pubkey::new_unique();
        let base_mint = ledger.create_mint(base_mint_authority, BASE_DECIMALS);
        let quote_mint = ledger.create_mint(quote_mint_authority, QUOTE_DECIMALS);

        let claim_mint = pda(CLAIM_MINT_SEED, &pool);
        ledger
            .create_mint_at(claim_mint, signer.address(), QUOTE_DECIMALS)
            .unwrap();
        let quote_vault = pda(QUOTE_VAULT_SEED, &pool);
        ledger
            .create_token_account_at(quote_vault, &quote_mint, &signer.address())
            .unwrap();
        let base_vault = pda(BASE_VAULT_SEED, &pool);
        ledger
            .create_token_account_at(base_vault, &base_mint, &signer.address())
            .unwrap();

        let creator_base = ledger
            .create_token_account(&base_mint, &distribution_authority)
            .unwrap();
        if base_allocation > 0 {
            ledger
                .mint_to(
                    &base_mint,
                    &creator_base,
                    Authority::Holder(base_mint_authority),
                    base_allocation,
                )
                .unwrap();
        }

        Self {
            ledger,
            keys: PoolKeys {
                pool,
                distribution_authority,
                creator_base,
                base_mint,
                quote_mint,
                claim_mint,
                base_vault,
                quote_vault,
            },
            params: InitializePoolParams {
                base_allocation,
                start_ts: START_TS,
                end_deposits_ts: END_DEPOSITS_TS,
                end_ido_ts: END_IDO_TS,
                sweep_policy: SweepPolicy::default(),
            },
            signer,
            base_mint_authority,
            quote_mint_authority,
            now: 0,
        }
    }

    pub fn with_sweep_policy(mut self, sweep_policy: SweepPolicy) -> Self {
        self.params.sweep_policy = sweep_policy;
        self
    }

    /// Run `initialize_pool` as one transaction
    pub fn try_initialize(&mut self) -> Result<PoolAccount> {
        let clock = FixedClock(self.now);
        let keys = self.keys;
        let params = self.params;
        self.ledger
            .atomically(|ledger| initialize_pool(ledger, &clock, &ido_pool::ID, &keys, &params))
    }

    pub fn initialize(mut self) -> IdoFixture {
        let pool = self.try_initialize().unwrap();
        let authority_quote = self
            .ledger
            .create_token_account(&self.keys.quote_mint, &self.keys.distribution_authority)
            .unwrap();

        IdoFixture {
            ledger: self.ledger,
            clock: FixedClock(self.now),
            keys: self.keys,
            pool,
            authority_quote,
            base_mint_authority: self.base_mint_authority,
            quote_mint_authority: self.quote_mint_authority,
        }
    }
}

/// A participant with one account per token
#[derive(Clone, Copy, Debug)]
pub struct User {
    pub authority: Pubkey,
    pub quote: Pubkey,
    pub claim: Pubkey,
    pub base: Pubkey,
}

impl User {
    pub fn depositing(&self) -> Participant {
        Participant {
            authority: self.authority,
            source: self.quote,
            destination: self.claim,
        }
    }

    pub fn undoing(&self) -> Participant {
        Participant {
            authority: self.authority,
            source: self.claim,
            destination: self.quote,
        }
    }

    pub fn redeeming(&self) -> Participant {
        Participant {
            authority: self.authority,
            source: self.claim,
            destination: self.base,
        }
    }
}

/// An initialized pool and its ledger
pub struct IdoFixture {
    pub ledger: InMemoryLedger,
    pub clock: FixedClock,
    pub keys: PoolKeys,
    pub pool: PoolAccount,
    /// Distribution authority's quote account, the sweep destination
    pub authority_quote: Pubkey,
    pub base_mint_authority: Pubkey,
    pub quote_mint_authority: Pubkey,
}

impl IdoFixture {
    /// Default pool: `base_allocation` base, schedule 1000/2000/3000, clock at 0
    pub fn new(base_allocation: u64) -> Self {
        PoolSetup::new(base_allocation).initialize()
    }

    pub fn warp_to(&mut self, timestamp: i64) {
        self.clock = FixedClock(timestamp);
    }

    pub fn phase(&self) -> PoolPhase {
        self.pool.phase_at(self.clock.0)
    }

    /// New participant funded with `quote_balance` quote
    pub fn user(&mut self, quote_balance: u64) -> User {
        let authority = Pubkey::new_unique();
        let quote = self
            .ledger
            .create_token_account(&self.keys.quote_mint, &authority)
            .unwrap();
        let claim = self
            .ledger
            .create_token_account(&self.keys.claim_mint, &authority)
            .unwrap();
        let base = self
            .ledger
            .create_token_account(&self.keys.base_mint, &authority)
            .unwrap();
        if quote_balance > 0 {
            self.ledger
                .mint_to(
                    &self.keys.quote_mint,
                    &quote,
                    Authority::Holder(self.quote_mint_authority),
                    quote_balance,
                )
                .unwrap();
        }

        User {
            authority,
            quote,
            claim,
            base,
        }
    }

    fn engine(&self) -> ExchangeEngine<'_> {
        ExchangeEngine::new(self.keys.pool, &self.pool, &ido_pool::ID).unwrap()
    }

    pub fn deposit(&mut self, user: &User, amount: u64) -> Result<()> {
        self.deposit_as(&user.depositing(), amount)
    }

    pub fn deposit_as(&mut self, participant: &Participant, amount: u64) -> Result<()> {
        let engine = ExchangeEngine::new(self.keys.pool, &self.pool, &ido_pool::ID)?;
        let clock = self.clock;
        self.ledger
            .atomically(|ledger| engine.deposit(ledger, &clock, participant, amount))
    }

    pub fn undo_deposit(&mut self, user: &User, amount: u64) -> Result<()> {
        self.undo_deposit_as(&user.undoing(), amount)
    }

    pub fn undo_deposit_as(&mut self, participant: &Participant, amount: u64) -> Result<()> {
        let engine = ExchangeEngine::new(self.keys.pool, &self.pool, &ido_pool::ID)?;
        let clock = self.clock;
        self.ledger
            .atomically(|ledger| engine.undo_deposit(ledger, &clock, participant, amount))
    }

    pub fn redeem(&mut self, user: &User, amount: u64) -> Result<u64> {
        self.redeem_as(&user.redeeming(), amount)
    }

    pub fn redeem_as(&mut self, participant: &Participant, amount: u64) -> Result<u64> {
        let engine = ExchangeEngine::new(self.keys.pool, &self.pool, &ido_pool::ID)?;
        let clock = self.clock;
        self.ledger
            .atomically(|ledger| engine.redeem_for_base(ledger, &clock, participant, amount))
    }

    /// Sweep as the distribution authority into its own quote account
    pub fn sweep(&mut self) -> Result<u64> {
        let authority = self.keys.distribution_authority;
        let destination = self.authority_quote;
        self.sweep_as(&authority, &destination)
    }

    pub fn sweep_as(&mut self, authority: &Pubkey, destination: &Pubkey) -> Result<u64> {
        let engine = ExchangeEngine::new(self.keys.pool, &self.pool, &ido_pool::ID)?;
        let clock = self.clock;
        self.ledger
            .atomically(|ledger| engine.sweep_quote(ledger, &clock, authority, destination))
    }

    pub fn balance(&self, account: &Pubkey) -> u64 {
        self.ledger.balance(account).unwrap()
    }

    pub fn quote_vault(&self) -> u64 {
        self.balance(&self.keys.quote_vault)
    }

    pub fn base_vault(&self) -> u64 {
        self.balance(&self.keys.base_vault)
    }

    pub fn claim_supply(&self) -> u64 {
        self.ledger.supply(&self.keys.claim_mint).unwrap()
    }

    pub fn signer(&self) -> PoolSigner {
        *self.engine().signer()
    }
}
