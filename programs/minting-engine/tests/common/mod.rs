#![allow(dead_code)]

use anchor_lang::prelude::{AccountInfo, Pubkey};
use anchor_lang::solana_program::entrypoint::ProgramResult;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::{system_program, AccountDeserialize, AnchorDeserialize, InstructionData, ToAccountMetas};
use solana_program_test::{processor, BanksClientError, ProgramTest, ProgramTestContext};
use solana_sdk::{
    account::Account,
    clock::Clock,
    instruction::InstructionError,
    signature::{Keypair, Signer},
    transaction::{Transaction, TransactionError},
};

use content_registry::state::{Content, CONTENT_SEED, REGISTRY_SEED};
use minting_engine::contexts::{InitializeEngineParams, UpdateEngineParams};
use minting_engine::randomness::mint_caller_seed;
use minting_engine::state::{
    EngineConfig, MintedToken, DEFAULT_MINT_PRICE_LAMPORTS, DEFAULT_NUM_WORDS, ENGINE_CONFIG_SEED,
    MINTED_TOKEN_SEED, PENDING_MINT_SEED,
};
use randomness_oracle::state::{RandomnessRequest, CONSUMER_SEED, ORACLE_CONFIG_SEED, REQUEST_SEED};

pub const BUYER_LAMPORTS: u64 = 10_000_000_000;
pub const ORACLE_MAX_WORDS: u32 = 4;

// Anchor's entry ties the slice and the infos to one lifetime; the builtin
// processor signature does not, so each program gets its own leaked copy.
fn registry_entry(program_id: &Pubkey, accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    let accounts = Box::leak(Box::new(accounts.to_vec()));
    content_registry::entry(program_id, accounts, data)
}

fn oracle_entry(program_id: &Pubkey, accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    let accounts = Box::leak(Box::new(accounts.to_vec()));
    randomness_oracle::entry(program_id, accounts, data)
}

fn engine_entry(program_id: &Pubkey, accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    let accounts = Box::leak(Box::new(accounts.to_vec()));
    minting_engine::entry(program_id, accounts, data)
}

pub fn program_test() -> ProgramTest {
    let mut program_test = ProgramTest::default();
    program_test.prefer_bpf(false);
    program_test.add_program("content_registry", content_registry::ID, processor!(registry_entry));
    program_test.add_program("randomness_oracle", randomness_oracle::ID, processor!(oracle_entry));
    program_test.add_program("minting_engine", minting_engine::ID, processor!(engine_entry));
    program_test
}

/// Custom error code of a failed transaction
pub fn error_code(result: Result<(), BanksClientError>) -> u32 {
    match result {
        Ok(()) => panic!("expected the transaction to fail"),
        Err(err) => match err.unwrap() {
            TransactionError::InstructionError(_, InstructionError::Custom(code)) => code,
            other => panic!("expected a program error, got {:?}", other),
        },
    }
}

// ===== Addresses =====

pub fn registry_config_address() -> Pubkey {
    Pubkey::find_program_address(&[REGISTRY_SEED], &content_registry::ID).0
}

pub fn content_address(content_id: u64) -> Pubkey {
    Pubkey::find_program_address(&[CONTENT_SEED, &content_id.to_le_bytes()], &content_registry::ID).0
}

pub fn oracle_config_address() -> Pubkey {
    Pubkey::find_program_address(&[ORACLE_CONFIG_SEED], &randomness_oracle::ID).0
}

pub fn consumer_registration_address(consumer: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[CONSUMER_SEED, consumer.as_ref()], &randomness_oracle::ID).0
}

pub fn engine_config_address() -> Pubkey {
    Pubkey::find_program_address(&[ENGINE_CONFIG_SEED], &minting_engine::ID).0
}

pub fn pending_mint_address(nonce: u64) -> Pubkey {
    Pubkey::find_program_address(&[PENDING_MINT_SEED, &nonce.to_le_bytes()], &minting_engine::ID).0
}

pub fn minted_token_address(nonce: u64) -> Pubkey {
    Pubkey::find_program_address(&[MINTED_TOKEN_SEED, &nonce.to_le_bytes()], &minting_engine::ID).0
}

pub fn oracle_request_address(nonce: u64) -> Pubkey {
    let engine_authority = minting_engine::engine_authority();
    let caller_seed = mint_caller_seed(&engine_authority, nonce);
    Pubkey::find_program_address(
        &[REQUEST_SEED, engine_authority.as_ref(), caller_seed.as_ref()],
        &randomness_oracle::ID,
    )
    .0
}

/// All three programs deployed with the context payer as every admin
pub struct Protocol {
    pub context: ProgramTestContext,
    pub oracle_authority: Keypair,
    pub buyer: Keypair,
    pub treasury: Pubkey,
}

impl Protocol {
    pub async fn start() -> Self {
        let context = program_test().start_with_context().await;
        let mut protocol = Protocol {
            context,
            oracle_authority: Keypair::new(),
            buyer: Keypair::new(),
            treasury: Pubkey::new_unique(),
        };
        let buyer = protocol.buyer.pubkey();
        protocol.fund(&buyer, BUYER_LAMPORTS);
        protocol
    }

    /// Registry, oracle and engine initialized, wired and confirmed
    pub async fn ready(max_copies: u64) -> Self {
        let mut protocol = Self::start().await;
        protocol.initialize(ORACLE_MAX_WORDS, DEFAULT_NUM_WORDS).await;
        protocol.wire().await.unwrap();
        protocol.confirm_consumer().await.unwrap();
        protocol.register_content("Genesis", max_copies).await.unwrap();
        protocol
    }

    pub fn admin(&self) -> Pubkey {
        self.context.payer.pubkey()
    }

    pub fn fund(&mut self, address: &Pubkey, lamports: u64) {
        let account = Account {
            lamports,
            data: vec![],
            owner: system_program::ID,
            executable: false,
            rent_epoch: 0,
        };
        self.context.set_account(address, &account.into());
    }

    /// Sign with the payer plus `signers` and submit
    pub async fn send(&mut self, ixs: &[Instruction], signers: &[&Keypair]) -> Result<(), BanksClientError> {
        let blockhash = self.context.banks_client.get_latest_blockhash().await?;
        let mut all_signers = vec![&self.context.payer];
        all_signers.extend_from_slice(signers);
        let tx = Transaction::new_signed_with_payer(
            ixs,
            Some(&self.context.payer.pubkey()),
            all_signers.as_slice(),
            blockhash,
        );
        self.context.banks_client.process_transaction(tx).await
    }

    /// Run a read-only instruction and decode its return data
    pub async fn view<T: AnchorDeserialize>(&mut self, ix: Instruction) -> T {
        let blockhash = self.context.banks_client.get_latest_blockhash().await.unwrap();
        let tx = Transaction::new_signed_with_payer(
            &[ix],
            Some(&self.context.payer.pubkey()),
            &[&self.context.payer],
            blockhash,
        );
        let simulation = self.context.banks_client.simulate_transaction(tx).await.unwrap();
        simulation.result.unwrap().unwrap();
        let mut data = simulation
            .simulation_details
            .unwrap()
            .return_data
            .map(|ret| ret.data)
            .unwrap_or_default();
        // Trailing zero bytes are trimmed from return data
        data.resize(data.len() + 64, 0);
        T::deserialize(&mut data.as_slice()).unwrap()
    }

    pub async fn account(&mut self, address: &Pubkey) -> Option<Account> {
        self.context.banks_client.get_account(*address).await.unwrap()
    }

    pub async fn lamports(&mut self, address: &Pubkey) -> u64 {
        self.account(address).await.map(|a| a.lamports).unwrap_or(0)
    }

    pub async fn load<T: AccountDeserialize>(&mut self, address: &Pubkey) -> T {
        let account = self.account(address).await.expect("account missing");
        T::try_deserialize(&mut account.data.as_slice()).unwrap()
    }

    pub async fn rent_exempt(&mut self, space: usize) -> u64 {
        self.context.banks_client.get_rent().await.unwrap().minimum_balance(space)
    }

    pub async fn engine_config(&mut self) -> EngineConfig {
        self.load(&engine_config_address()).await
    }

    pub async fn content(&mut self, content_id: u64) -> Content {
        self.load(&content_address(content_id)).await
    }

    pub async fn minted_token(&mut self, nonce: u64) -> MintedToken {
        self.load(&minted_token_address(nonce)).await
    }

    pub async fn oracle_request(&mut self, nonce: u64) -> RandomnessRequest {
        self.load(&oracle_request_address(nonce)).await
    }

    /// Move the cluster clock forward by `seconds`
    pub async fn advance_clock(&mut self, seconds: i64) {
        let mut clock: Clock = self.context.banks_client.get_sysvar().await.unwrap();
        clock.unix_timestamp += seconds;
        self.context.set_sysvar(&clock);
    }

    /// Fresh bank so a byte-identical transaction can be sent again
    pub async fn next_slot(&mut self) {
        let clock: Clock = self.context.banks_client.get_sysvar().await.unwrap();
        self.context.warp_to_slot(clock.slot + 2).unwrap();
    }

    // ===== Setup =====

    pub async fn initialize(&mut self, oracle_max_words: u32, engine_words: u32) {
        let ixs = [
            self.initialize_registry_ix(),
            self.initialize_oracle_ix(oracle_max_words),
            self.initialize_engine_ix(DEFAULT_MINT_PRICE_LAMPORTS, engine_words),
        ];
        self.send(&ixs, &[]).await.unwrap();
    }

    /// Registry trusts the engine authority; oracle registers it as a consumer
    pub async fn wire(&mut self) -> Result<(), BanksClientError> {
        let engine_authority = minting_engine::engine_authority();
        let admin = self.admin();
        let ixs = [
            self.set_minting_engine_ix(&admin, engine_authority),
            self.register_consumer_ix(engine_authority),
        ];
        self.send(&ixs, &[]).await
    }

    pub async fn confirm_consumer(&mut self) -> Result<(), BanksClientError> {
        let ix = self.confirm_consumer_ix();
        self.send(&[ix], &[]).await
    }

    pub async fn register_content(&mut self, title: &str, max_copies: u64) -> Result<(), BanksClientError> {
        let admin = self.admin();
        let ix = self.register_content_ix(&admin, title, max_copies).await;
        self.send(&[ix], &[]).await
    }

    // ===== Minting =====

    pub async fn next_nonce(&mut self) -> u64 {
        self.engine_config().await.mint_nonce + 1
    }

    /// Buyer requests a mint; returns the nonce its records are keyed by
    pub async fn mint(&mut self, content_id: u64, payment: u64) -> Result<u64, BanksClientError> {
        let nonce = self.next_nonce().await;
        let ix = self.mint_ix(content_id, payment, nonce);
        let buyer = self.buyer.insecure_clone();
        self.send(&[ix], &[&buyer]).await?;
        Ok(nonce)
    }

    pub async fn fulfill(&mut self, nonce: u64, randomness: [u8; 32]) -> Result<(), BanksClientError> {
        let ix = self.fulfill_randomness_ix(nonce, randomness);
        let authority = self.oracle_authority.insecure_clone();
        self.send(&[ix], &[&authority]).await
    }

    pub async fn deliver(&mut self, nonce: u64) -> Result<(), BanksClientError> {
        let ix = self.deliver_ix(nonce).await;
        self.send(&[ix], &[]).await
    }

    /// Request, fulfill and deliver in turn
    pub async fn mint_and_settle(&mut self, content_id: u64, randomness: [u8; 32]) -> u64 {
        let nonce = self.mint(content_id, DEFAULT_MINT_PRICE_LAMPORTS).await.unwrap();
        self.fulfill(nonce, randomness).await.unwrap();
        self.deliver(nonce).await.unwrap();
        nonce
    }

    // ===== Instruction builders =====

    pub fn initialize_registry_ix(&self) -> Instruction {
        Instruction {
            program_id: content_registry::ID,
            accounts: content_registry::accounts::InitializeRegistry {
                registry_config: registry_config_address(),
                admin: self.admin(),
                system_program: system_program::ID,
            }
            .to_account_metas(None),
            data: content_registry::instruction::InitializeRegistry {}.data(),
        }
    }

    pub fn set_minting_engine_ix(&self, admin: &Pubkey, minting_engine: Pubkey) -> Instruction {
        Instruction {
            program_id: content_registry::ID,
            accounts: content_registry::accounts::UpdateRegistry {
                registry_config: registry_config_address(),
                admin: *admin,
            }
            .to_account_metas(None),
            data: content_registry::instruction::SetMintingEngine { minting_engine }.data(),
        }
    }

    pub async fn register_content_ix(&mut self, admin: &Pubkey, title: &str, max_copies: u64) -> Instruction {
        let registry: content_registry::state::RegistryConfig = self.load(&registry_config_address()).await;
        Instruction {
            program_id: content_registry::ID,
            accounts: content_registry::accounts::RegisterContent {
                registry_config: registry_config_address(),
                content: content_address(registry.content_count + 1),
                admin: *admin,
                system_program: system_program::ID,
            }
            .to_account_metas(None),
            data: content_registry::instruction::RegisterContent {
                title: title.to_string(),
                description: format!("{} description", title),
                max_copies,
            }
            .data(),
        }
    }

    pub fn reserve_copy_ix(&self, minting_engine: &Pubkey, content_id: u64) -> Instruction {
        Instruction {
            program_id: content_registry::ID,
            accounts: content_registry::accounts::ReserveCopy {
                registry_config: registry_config_address(),
                content: content_address(content_id),
                minting_engine: *minting_engine,
            }
            .to_account_metas(None),
            data: content_registry::instruction::ReserveCopy { content_id }.data(),
        }
    }

    pub fn get_available_copies_ix(&self, content_id: u64) -> Instruction {
        Instruction {
            program_id: content_registry::ID,
            accounts: content_registry::accounts::ReadContent {
                content: content_address(content_id),
            }
            .to_account_metas(None),
            data: content_registry::instruction::GetAvailableCopies { _content_id: content_id }.data(),
        }
    }

    pub fn initialize_oracle_ix(&self, max_num_words: u32) -> Instruction {
        Instruction {
            program_id: randomness_oracle::ID,
            accounts: randomness_oracle::accounts::InitializeOracle {
                oracle_config: oracle_config_address(),
                admin: self.admin(),
                system_program: system_program::ID,
            }
            .to_account_metas(None),
            data: randomness_oracle::instruction::InitializeOracle {
                authority: self.oracle_authority.pubkey(),
                max_num_words,
            }
            .data(),
        }
    }

    pub fn register_consumer_ix(&self, consumer: Pubkey) -> Instruction {
        Instruction {
            program_id: randomness_oracle::ID,
            accounts: randomness_oracle::accounts::RegisterConsumer {
                oracle_config: oracle_config_address(),
                consumer_registration: consumer_registration_address(&consumer),
                admin: self.admin(),
                system_program: system_program::ID,
            }
            .to_account_metas(None),
            data: randomness_oracle::instruction::RegisterConsumer { consumer }.data(),
        }
    }

    pub fn fulfill_randomness_ix(&self, nonce: u64, randomness: [u8; 32]) -> Instruction {
        Instruction {
            program_id: randomness_oracle::ID,
            accounts: randomness_oracle::accounts::FulfillRandomness {
                oracle_config: oracle_config_address(),
                request: oracle_request_address(nonce),
                authority: self.oracle_authority.pubkey(),
            }
            .to_account_metas(None),
            data: randomness_oracle::instruction::FulfillRandomness { randomness }.data(),
        }
    }

    /// Crank delivery, passing the callback accounts stored on the request
    pub async fn deliver_ix(&mut self, nonce: u64) -> Instruction {
        let request_address = oracle_request_address(nonce);
        let request = self.oracle_request(nonce).await;

        let mut accounts = randomness_oracle::accounts::DeliverRandomness {
            request: request_address,
            requester: request.requester,
            identity: randomness_oracle::oracle_identity(),
            callback_program: request.callback_program,
        }
        .to_account_metas(None);
        accounts.extend(request.callback_accounts.iter().map(|meta| {
            if meta.is_writable {
                AccountMeta::new(meta.pubkey, false)
            } else {
                AccountMeta::new_readonly(meta.pubkey, false)
            }
        }));

        Instruction {
            program_id: randomness_oracle::ID,
            accounts,
            data: randomness_oracle::instruction::DeliverRandomness {}.data(),
        }
    }

    pub fn initialize_engine_ix(&self, mint_price: u64, num_words: u32) -> Instruction {
        Instruction {
            program_id: minting_engine::ID,
            accounts: minting_engine::accounts::InitializeEngine {
                engine_config: engine_config_address(),
                admin: self.admin(),
                system_program: system_program::ID,
            }
            .to_account_metas(None),
            data: minting_engine::instruction::InitializeEngine {
                params: InitializeEngineParams {
                    treasury: self.treasury,
                    mint_price,
                    num_words,
                },
            }
            .data(),
        }
    }

    pub fn update_engine_ix(&self, params: UpdateEngineParams) -> Instruction {
        Instruction {
            program_id: minting_engine::ID,
            accounts: minting_engine::accounts::UpdateEngine {
                engine_config: engine_config_address(),
                admin: self.admin(),
            }
            .to_account_metas(None),
            data: minting_engine::instruction::UpdateEngine { params }.data(),
        }
    }

    pub fn confirm_consumer_ix(&self) -> Instruction {
        let engine_authority = minting_engine::engine_authority();
        Instruction {
            program_id: minting_engine::ID,
            accounts: minting_engine::accounts::ConfirmOracleConsumer {
                engine_config: engine_config_address(),
                engine_authority,
                consumer_registration: consumer_registration_address(&engine_authority),
                oracle_config: oracle_config_address(),
                admin: self.admin(),
            }
            .to_account_metas(None),
            data: minting_engine::instruction::ConfirmOracleConsumer {}.data(),
        }
    }

    pub fn mint_ix(&self, content_id: u64, payment: u64, nonce: u64) -> Instruction {
        let engine_authority = minting_engine::engine_authority();
        Instruction {
            program_id: minting_engine::ID,
            accounts: minting_engine::accounts::MintToken {
                engine_config: engine_config_address(),
                engine_authority,
                pending_mint: pending_mint_address(nonce),
                minted_token: minted_token_address(nonce),
                buyer: self.buyer.pubkey(),
                treasury: self.treasury,
                registry_config: registry_config_address(),
                content: content_address(content_id),
                content_registry_program: content_registry::ID,
                oracle_config: oracle_config_address(),
                consumer_registration: consumer_registration_address(&engine_authority),
                oracle_request: oracle_request_address(nonce),
                randomness_oracle_program: randomness_oracle::ID,
                system_program: system_program::ID,
            }
            .to_account_metas(None),
            data: minting_engine::instruction::MintToken { content_id, payment }.data(),
        }
    }

    /// Callback sent straight to the engine, bypassing the oracle
    pub fn direct_callback_ix(&self, signer: &Pubkey, nonce: u64, request_id: [u8; 32]) -> Instruction {
        Instruction {
            program_id: minting_engine::ID,
            accounts: minting_engine::accounts::FulfillMint {
                oracle_identity: *signer,
                engine_config: engine_config_address(),
                pending_mint: pending_mint_address(nonce),
                minted_token: minted_token_address(nonce),
                buyer: self.buyer.pubkey(),
                treasury: self.treasury,
            }
            .to_account_metas(None),
            data: minting_engine::instruction::OnRandomnessFulfilled {
                request_id,
                random_words: vec![[1u8; 32]],
            }
            .data(),
        }
    }

    pub fn expire_ix(&self, nonce: u64) -> Instruction {
        Instruction {
            program_id: minting_engine::ID,
            accounts: minting_engine::accounts::ExpirePendingMint {
                engine_config: engine_config_address(),
                pending_mint: pending_mint_address(nonce),
                minted_token: minted_token_address(nonce),
                buyer: self.buyer.pubkey(),
                engine_authority: minting_engine::engine_authority(),
                oracle_request: oracle_request_address(nonce),
                randomness_oracle_program: randomness_oracle::ID,
                admin: self.admin(),
            }
            .to_account_metas(None),
            data: minting_engine::instruction::ExpirePendingMint { mint_nonce: nonce }.data(),
        }
    }

    pub fn total_supply_ix(&self) -> Instruction {
        Instruction {
            program_id: minting_engine::ID,
            accounts: minting_engine::accounts::ReadEngine {
                engine_config: engine_config_address(),
            }
            .to_account_metas(None),
            data: minting_engine::instruction::TotalSupply {}.data(),
        }
    }

    pub fn owner_of_ix(&self, nonce: u64, token_id: u64) -> Instruction {
        Instruction {
            program_id: minting_engine::ID,
            accounts: minting_engine::accounts::ReadToken {
                minted_token: minted_token_address(nonce),
            }
            .to_account_metas(None),
            data: minting_engine::instruction::OwnerOf { token_id }.data(),
        }
    }
}
