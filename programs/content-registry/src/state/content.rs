use anchor_lang::prelude::*;

use crate::errors::ContentRegistryError;

pub const CONTENT_SEED: &[u8] = b"content";

pub const MAX_TITLE_LEN: usize = 64;
pub const MAX_DESCRIPTION_LEN: usize = 256;

/// Registered catalogue entry
/// PDA seeds: ["content", content_id.to_le_bytes()]
#[account]
#[derive(InitSpace, Debug)]
pub struct Content {
    pub content_id: u64,
    #[max_len(64)]
    pub title: String,
    #[max_len(256)]
    pub description: String,
    /// Supply ceiling, fixed at registration
    pub max_copies: u64,
    /// Copies reserved so far. Incremented at reservation time, never decremented.
    pub minted_copies: u64,
    pub registered_at: i64,
    pub bump: u8,
}

/// Read model returned by `get_content`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct ContentInfo {
    pub content_id: u64,
    pub title: String,
    pub description: String,
    pub max_copies: u64,
    pub minted_copies: u64,
    pub is_available: bool,
    pub registered_at: i64,
}

impl Content {
    pub fn validate_registration(title: &str, description: &str, max_copies: u64) -> Result<()> {
        require!(max_copies > 0, ContentRegistryError::InvalidArgument);
        require!(title.len() <= MAX_TITLE_LEN, ContentRegistryError::InvalidArgument);
        require!(
            description.len() <= MAX_DESCRIPTION_LEN,
            ContentRegistryError::InvalidArgument
        );
        Ok(())
    }

    pub fn is_available(&self) -> bool {
        self.minted_copies < self.max_copies
    }

    pub fn available_copies(&self) -> u64 {
        self.max_copies.saturating_sub(self.minted_copies)
    }

    /// Consume one unit of supply and return its 1-based copy number
    pub fn reserve_copy(&mut self) -> Result<u64> {
        require!(self.is_available(), ContentRegistryError::Exhausted);
        self.minted_copies = self
            .minted_copies
            .checked_add(1)
            .ok_or(ContentRegistryError::MathOverflow)?;
        Ok(self.minted_copies)
    }

    pub fn info(&self) -> ContentInfo {
        ContentInfo {
            content_id: self.content_id,
            title: self.title.clone(),
            description: self.description.clone(),
            max_copies: self.max_copies,
            minted_copies: self.minted_copies,
            is_available: self.is_available(),
            registered_at: self.registered_at,
        }
    }

    /// Deserialize a content account, mapping anything that is not a
    /// registered content (empty, foreign owner, wrong discriminator) to NotFound.
    pub fn load(info: &AccountInfo) -> Result<Self> {
        if info.owner != &crate::ID || info.data_is_empty() {
            return err!(ContentRegistryError::NotFound);
        }
        let data = info.try_borrow_data()?;
        Content::try_deserialize(&mut &data[..])
            .map_err(|_| error!(ContentRegistryError::NotFound))
    }

    pub fn store(&self, info: &AccountInfo) -> Result<()> {
        let mut data = info.try_borrow_mut_data()?;
        self.try_serialize(&mut &mut data[..])
    }
}
