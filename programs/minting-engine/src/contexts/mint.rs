use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};
use content_registry::{
    cpi::accounts::ReserveCopy as ReserveCopyAccounts,
    program::ContentRegistry,
    state::{Content, CONTENT_SEED},
};
use randomness_oracle::{
    cpi::accounts::RequestRandomness as RequestRandomnessAccounts,
    program::RandomnessOracle,
    state::{CallbackAccountMeta, RequestRandomnessParams},
};

use crate::errors::MintingEngineError;
use crate::events::MintRequested;
use crate::instruction;
use crate::randomness::mint_caller_seed;
use crate::state::*;

// ============================================================================
// MINT TOKEN - phase one: pay, reserve, request randomness
// ============================================================================

/// PendingMint and MintedToken are keyed by the next mint nonce so the client
/// can derive every address before the oracle hands out a request id.
/// The oracle request address is ["request", engine_authority, mint_caller_seed(nonce)].
#[derive(Accounts)]
#[instruction(content_id: u64)]
pub struct MintToken<'info> {
    #[account(
        mut,
        seeds = [ENGINE_CONFIG_SEED],
        bump = engine_config.bump
    )]
    pub engine_config: Box<Account<'info, EngineConfig>>,

    /// CHECK: Engine signing PDA, signs both CPIs
    #[account(
        seeds = [ENGINE_AUTHORITY_SEED],
        bump
    )]
    pub engine_authority: UncheckedAccount<'info>,

    /// Escrow and correlation record
    #[account(
        init,
        payer = buyer,
        space = 8 + PendingMint::INIT_SPACE,
        seeds = [PENDING_MINT_SEED, &(engine_config.mint_nonce + 1).to_le_bytes()],
        bump
    )]
    pub pending_mint: Box<Account<'info, PendingMint>>,

    /// Token record - created now so the oracle callback doesn't need to init
    #[account(
        init,
        payer = buyer,
        space = 8 + MintedToken::INIT_SPACE,
        seeds = [MINTED_TOKEN_SEED, &(engine_config.mint_nonce + 1).to_le_bytes()],
        bump
    )]
    pub minted_token: Box<Account<'info, MintedToken>>,

    #[account(mut)]
    pub buyer: Signer<'info>,

    /// CHECK: Current treasury, recorded for the callback
    #[account(address = engine_config.treasury @ MintingEngineError::AccountMismatch)]
    pub treasury: UncheckedAccount<'info>,

    // === Content registry ===

    /// CHECK: Validated by the registry program
    pub registry_config: UncheckedAccount<'info>,

    /// CHECK: Registry-owned content entry; loaded here for the early checks
    #[account(
        mut,
        seeds = [CONTENT_SEED, &content_id.to_le_bytes()],
        bump,
        seeds::program = content_registry::ID
    )]
    pub content: UncheckedAccount<'info>,

    pub content_registry_program: Program<'info, ContentRegistry>,

    // === Randomness oracle ===

    /// CHECK: Validated by the oracle program
    #[account(mut)]
    pub oracle_config: UncheckedAccount<'info>,

    /// CHECK: Validated by the oracle program
    #[account(mut)]
    pub consumer_registration: UncheckedAccount<'info>,

    /// CHECK: Created by the oracle program
    #[account(mut)]
    pub oracle_request: UncheckedAccount<'info>,

    pub randomness_oracle_program: Program<'info, RandomnessOracle>,

    pub system_program: Program<'info, System>,
}

impl<'info> MintToken<'info> {
    pub fn handler(ctx: Context<MintToken>, content_id: u64, payment: u64) -> Result<[u8; 32]> {
        let clock = Clock::get()?;

        // Read-only checks first; every failure here leaves nothing behind
        ctx.accounts.engine_config.validate_mint_request()?;

        let content = Content::load(&ctx.accounts.content.to_account_info())
            .map_err(|_| error!(MintingEngineError::NotFound))?;
        require!(content.is_available(), MintingEngineError::Exhausted);

        ctx.accounts.engine_config.check_payment(payment)?;

        // Capture keys upfront
        let nonce = ctx.accounts.engine_config.next_mint_nonce()?;
        let num_words = ctx.accounts.engine_config.num_words;
        let engine_config_key = ctx.accounts.engine_config.key();
        let engine_authority_key = ctx.accounts.engine_authority.key();
        let pending_mint_key = ctx.accounts.pending_mint.key();
        let minted_token_key = ctx.accounts.minted_token.key();
        let buyer_key = ctx.accounts.buyer.key();
        let treasury_key = ctx.accounts.treasury.key();

        let bump = [ctx.bumps.engine_authority];
        let authority_seeds: &[&[u8]] = &[ENGINE_AUTHORITY_SEED, &bump];
        let signer_seeds: &[&[&[u8]]] = &[authority_seeds];

        // Reserve the copy; the registry stays the authority on supply
        let copy_number = content_registry::cpi::reserve_copy(
            CpiContext::new_with_signer(
                ctx.accounts.content_registry_program.to_account_info(),
                ReserveCopyAccounts {
                    registry_config: ctx.accounts.registry_config.to_account_info(),
                    content: ctx.accounts.content.to_account_info(),
                    minting_engine: ctx.accounts.engine_authority.to_account_info(),
                },
                signer_seeds,
            ),
            content_id,
        )?
        .get();

        // Callback accounts, in the order FulfillMint expects after the identity signer
        let callback_accounts = vec![
            CallbackAccountMeta { pubkey: engine_config_key, is_writable: true },
            CallbackAccountMeta { pubkey: pending_mint_key, is_writable: true },
            CallbackAccountMeta { pubkey: minted_token_key, is_writable: true },
            CallbackAccountMeta { pubkey: buyer_key, is_writable: true },
            CallbackAccountMeta { pubkey: treasury_key, is_writable: true },
        ];

        let request_id = randomness_oracle::cpi::request_randomness(
            CpiContext::new_with_signer(
                ctx.accounts.randomness_oracle_program.to_account_info(),
                RequestRandomnessAccounts {
                    oracle_config: ctx.accounts.oracle_config.to_account_info(),
                    consumer_registration: ctx.accounts.consumer_registration.to_account_info(),
                    request: ctx.accounts.oracle_request.to_account_info(),
                    consumer: ctx.accounts.engine_authority.to_account_info(),
                    payer: ctx.accounts.buyer.to_account_info(),
                    system_program: ctx.accounts.system_program.to_account_info(),
                },
                signer_seeds,
            ),
            RequestRandomnessParams {
                caller_seed: mint_caller_seed(&engine_authority_key, nonce),
                num_words,
                callback_program: crate::ID,
                callback_discriminator: instruction::OnRandomnessFulfilled::DISCRIMINATOR.to_vec(),
                callback_accounts,
            },
        )?
        .get();

        // Hold the full payment in escrow; excess over the price is retained
        transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.buyer.to_account_info(),
                    to: ctx.accounts.pending_mint.to_account_info(),
                },
            ),
            payment,
        )?;

        let mint_nonce = ctx.accounts.engine_config.record_request()?;

        let pending = &mut ctx.accounts.pending_mint;
        pending.request_id = request_id;
        pending.mint_nonce = mint_nonce;
        pending.content_id = content_id;
        pending.buyer = buyer_key;
        pending.copy_number = copy_number;
        pending.payment = payment;
        pending.treasury = treasury_key;
        pending.requested_at = clock.unix_timestamp;
        pending.bump = ctx.bumps.pending_mint;

        let token = &mut ctx.accounts.minted_token;
        token.mint_nonce = mint_nonce;
        token.request_id = request_id;
        token.token_id = 0;
        token.content_id = content_id;
        token.copy_number = copy_number;
        token.random_seed = [0u8; 32];
        token.owner = Pubkey::default();
        token.is_issued = false;
        token.minted_at = 0;
        token.bump = ctx.bumps.minted_token;

        emit!(MintRequested {
            request_id,
            mint_nonce,
            content_id,
            buyer: buyer_key,
            copy_number,
            payment,
        });
        msg!("Mint requested for content {} copy {} (nonce {})", content_id, copy_number, mint_nonce);

        Ok(request_id)
    }
}
