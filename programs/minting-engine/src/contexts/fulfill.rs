use anchor_lang::prelude::*;

use crate::errors::MintingEngineError;
use crate::events::TokenMinted;
use crate::guard;
use crate::randomness::{is_zero_seed, select_random_seed};
use crate::state::*;
use crate::utils::{close_account, move_lamports};

// ============================================================================
// FULFILL - phase two: oracle callback issues the token (no buyer signature)
// ============================================================================

#[derive(Accounts)]
pub struct FulfillMint<'info> {
    /// Oracle identity PDA, signer of every callback
    pub oracle_identity: Signer<'info>,

    // === Callback accounts fixed at request time ===

    #[account(
        mut,
        seeds = [ENGINE_CONFIG_SEED],
        bump = engine_config.bump
    )]
    pub engine_config: Box<Account<'info, EngineConfig>>,

    /// CHECK: Loaded in the handler; a closed account means the request was consumed
    #[account(mut)]
    pub pending_mint: UncheckedAccount<'info>,

    /// CHECK: Loaded in the handler and matched against the pending mint
    #[account(mut)]
    pub minted_token: UncheckedAccount<'info>,

    /// CHECK: Checked against the pending mint; receives the rent refund
    #[account(mut)]
    pub buyer: UncheckedAccount<'info>,

    /// CHECK: Checked against the pending mint; receives the payment
    #[account(mut)]
    pub treasury: UncheckedAccount<'info>,
}

impl<'info> FulfillMint<'info> {
    pub fn handler(
        ctx: Context<FulfillMint>,
        request_id: [u8; 32],
        random_words: Vec<[u8; 32]>,
    ) -> Result<()> {
        guard::require_caller(
            &ctx.accounts.oracle_identity.key(),
            &ctx.accounts.engine_config.oracle_identity,
        )?;

        let pending_info = ctx.accounts.pending_mint.to_account_info();
        let token_info = ctx.accounts.minted_token.to_account_info();
        let buyer_info = ctx.accounts.buyer.to_account_info();
        let treasury_info = ctx.accounts.treasury.to_account_info();

        let pending = PendingMint::load(&pending_info)?;
        pending.check_request(&request_id)?;
        require_keys_eq!(buyer_info.key(), pending.buyer, MintingEngineError::AccountMismatch);
        require_keys_eq!(treasury_info.key(), pending.treasury, MintingEngineError::AccountMismatch);

        let random_seed = select_random_seed(&random_words)?;
        if is_zero_seed(&random_seed) {
            msg!("Zero random seed delivered for mint nonce {}", pending.mint_nonce);
        }

        let mut token = MintedToken::load(&token_info)
            .map_err(|_| error!(MintingEngineError::AccountMismatch))?;

        let now = Clock::get()?.unix_timestamp;
        let token_id = ctx.accounts.engine_config.issue_token(pending.payment)?;
        token.issue(&pending, token_id, random_seed, now)?;
        token.store(&token_info)?;

        // Release escrow, then refund the record's rent to the buyer
        move_lamports(&pending_info, &treasury_info, pending.payment)?;
        close_account(&pending_info, &buyer_info)?;

        emit!(TokenMinted {
            token_id,
            request_id,
            mint_nonce: pending.mint_nonce,
            content_id: pending.content_id,
            copy_number: pending.copy_number,
            owner: pending.buyer,
            random_seed,
        });
        msg!(
            "Token {} minted: content {} copy {}",
            token_id,
            pending.content_id,
            pending.copy_number
        );

        Ok(())
    }
}
