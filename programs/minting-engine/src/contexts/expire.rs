use anchor_lang::prelude::*;
use randomness_oracle::{
    cpi::accounts::CloseRequest as CloseRequestAccounts,
    program::RandomnessOracle,
    state::RandomnessRequest,
};

use crate::errors::MintingEngineError;
use crate::events::PendingMintExpired;
use crate::guard;
use crate::state::*;

/// Give up on a request the oracle never answered (admin only).
/// Escrow and rent go back to the buyer, including the oracle request's rent.
/// The reserved copy stays consumed.
#[derive(Accounts)]
#[instruction(mint_nonce: u64)]
pub struct ExpirePendingMint<'info> {
    #[account(
        mut,
        seeds = [ENGINE_CONFIG_SEED],
        bump = engine_config.bump
    )]
    pub engine_config: Box<Account<'info, EngineConfig>>,

    #[account(
        mut,
        close = buyer,
        seeds = [PENDING_MINT_SEED, &mint_nonce.to_le_bytes()],
        bump = pending_mint.bump,
        has_one = buyer @ MintingEngineError::AccountMismatch
    )]
    pub pending_mint: Box<Account<'info, PendingMint>>,

    #[account(
        mut,
        close = buyer,
        seeds = [MINTED_TOKEN_SEED, &mint_nonce.to_le_bytes()],
        bump = minted_token.bump,
        constraint = !minted_token.is_issued @ MintingEngineError::AccountMismatch
    )]
    pub minted_token: Box<Account<'info, MintedToken>>,

    /// CHECK: Refund destination, checked against the pending mint
    #[account(mut)]
    pub buyer: UncheckedAccount<'info>,

    /// CHECK: Engine signing PDA, the request's consumer
    #[account(
        seeds = [ENGINE_AUTHORITY_SEED],
        bump
    )]
    pub engine_authority: UncheckedAccount<'info>,

    /// Oracle request the pending mint is waiting on; closed through the oracle
    #[account(
        mut,
        constraint = oracle_request.request_id == pending_mint.request_id @ MintingEngineError::AccountMismatch
    )]
    pub oracle_request: Box<Account<'info, RandomnessRequest>>,

    pub randomness_oracle_program: Program<'info, RandomnessOracle>,

    pub admin: Signer<'info>,
}

impl<'info> ExpirePendingMint<'info> {
    pub fn handler(ctx: Context<ExpirePendingMint>, mint_nonce: u64) -> Result<()> {
        guard::require_caller(&ctx.accounts.admin.key(), &ctx.accounts.engine_config.admin)?;

        let timestamp = Clock::get()?.unix_timestamp;
        ctx.accounts.pending_mint.check_expirable(timestamp)?;
        ctx.accounts.engine_config.settle_pending()?;

        // Withdraw the oracle request so a late fulfillment has nothing to deliver
        let bump = [ctx.bumps.engine_authority];
        let authority_seeds: &[&[u8]] = &[ENGINE_AUTHORITY_SEED, &bump];
        randomness_oracle::cpi::close_request(CpiContext::new_with_signer(
            ctx.accounts.randomness_oracle_program.to_account_info(),
            CloseRequestAccounts {
                request: ctx.accounts.oracle_request.to_account_info(),
                requester: ctx.accounts.buyer.to_account_info(),
                consumer: ctx.accounts.engine_authority.to_account_info(),
            },
            &[authority_seeds],
        ))?;

        let pending = &ctx.accounts.pending_mint;
        emit!(PendingMintExpired {
            request_id: pending.request_id,
            mint_nonce,
            content_id: pending.content_id,
            buyer: pending.buyer,
            refunded: pending.payment,
            timestamp,
        });
        msg!("Pending mint {} expired, {} lamports refunded", mint_nonce, pending.payment);
        Ok(())
    }
}
