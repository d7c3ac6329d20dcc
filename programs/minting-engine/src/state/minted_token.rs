use anchor_lang::prelude::*;

use crate::errors::MintingEngineError;
use crate::state::PendingMint;

pub const MINTED_TOKEN_SEED: &[u8] = b"minted_token";

/// Collectible token record.
/// PDA seeds: ["minted_token", mint_nonce.to_le_bytes()]
///
/// Allocated alongside the pending mint so the oracle callback never has to
/// create accounts; becomes a token only once issued.
#[account]
#[derive(InitSpace)]
pub struct MintedToken {
    pub mint_nonce: u64,
    pub request_id: [u8; 32],
    /// 0 until issued, then unique and increasing in fulfillment order
    pub token_id: u64,
    pub content_id: u64,
    pub copy_number: u64,
    /// First random word delivered by the oracle
    pub random_seed: [u8; 32],
    pub owner: Pubkey,
    pub is_issued: bool,
    pub minted_at: i64,
    pub bump: u8,
}

/// Read model returned by `get_nft_metadata`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct TokenMetadata {
    pub token_id: u64,
    pub content_id: u64,
    pub copy_number: u64,
    pub random_seed: [u8; 32],
    pub owner: Pubkey,
    pub minted_at: i64,
}

impl MintedToken {
    pub fn load(info: &AccountInfo) -> Result<Self> {
        if info.owner != &crate::ID || info.data_is_empty() {
            return err!(MintingEngineError::NotFound);
        }
        let data = info.try_borrow_data()?;
        MintedToken::try_deserialize(&mut &data[..])
            .map_err(|_| error!(MintingEngineError::NotFound))
    }

    pub fn store(&self, info: &AccountInfo) -> Result<()> {
        let mut data = info.try_borrow_mut_data()?;
        self.try_serialize(&mut &mut data[..])
    }

    /// Issue the token reserved by `pending`
    pub fn issue(
        &mut self,
        pending: &PendingMint,
        token_id: u64,
        random_seed: [u8; 32],
        now: i64,
    ) -> Result<()> {
        require!(
            self.mint_nonce == pending.mint_nonce && self.request_id == pending.request_id,
            MintingEngineError::AccountMismatch
        );
        require!(!self.is_issued, MintingEngineError::UnknownRequest);

        self.token_id = token_id;
        self.content_id = pending.content_id;
        self.copy_number = pending.copy_number;
        self.random_seed = random_seed;
        self.owner = pending.buyer;
        self.minted_at = now;
        self.is_issued = true;
        Ok(())
    }

    /// Only an issued token answers for its id
    pub fn check_token_id(&self, token_id: u64) -> Result<()> {
        require!(
            self.is_issued && self.token_id == token_id && token_id > 0,
            MintingEngineError::NotFound
        );
        Ok(())
    }

    pub fn metadata(&self, token_id: u64) -> Result<TokenMetadata> {
        self.check_token_id(token_id)?;
        Ok(TokenMetadata {
            token_id: self.token_id,
            content_id: self.content_id,
            copy_number: self.copy_number,
            random_seed: self.random_seed,
            owner: self.owner,
            minted_at: self.minted_at,
        })
    }

    pub fn owner_of(&self, token_id: u64) -> Result<Pubkey> {
        self.check_token_id(token_id)?;
        Ok(self.owner)
    }
}
