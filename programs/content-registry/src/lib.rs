use anchor_lang::prelude::*;

pub mod contexts;
pub mod errors;
pub mod events;
pub mod guard;
pub mod state;

use contexts::*;
use errors::ContentRegistryError;
use events::*;
use state::{Content, ContentInfo};

declare_id!("FEkPvGxFGmwhsSFJkydPHwi4tPPw4iMTygbdw2aoWM93");

#[program]
pub mod content_registry {
    use super::*;

    // ============================================
    // REGISTRY MANAGEMENT
    // ============================================

    /// Initialize the registry config (admin only, once)
    pub fn initialize_registry(ctx: Context<InitializeRegistry>) -> Result<()> {
        let registry = &mut ctx.accounts.registry_config;

        registry.admin = ctx.accounts.admin.key();
        registry.minting_engine = Pubkey::default();
        registry.content_count = 0;
        registry.created_at = Clock::get()?.unix_timestamp;
        registry.bump = ctx.bumps.registry_config;

        msg!("Registry initialized, admin: {}", registry.admin);
        Ok(())
    }

    /// Wire the minting engine authority allowed to reserve copies (admin only)
    pub fn set_minting_engine(ctx: Context<UpdateRegistry>, minting_engine: Pubkey) -> Result<()> {
        let registry = &mut ctx.accounts.registry_config;
        guard::require_caller(&ctx.accounts.admin.key(), &registry.admin)?;

        registry.wire_minting_engine(minting_engine)?;

        emit!(MintingEngineSet {
            minting_engine,
            admin: registry.admin,
            timestamp: Clock::get()?.unix_timestamp,
        });
        msg!("Minting engine set: {}", minting_engine);
        Ok(())
    }

    /// Hand the registry over to a new administrator (admin only)
    pub fn transfer_admin(ctx: Context<UpdateRegistry>, new_admin: Pubkey) -> Result<()> {
        let registry = &mut ctx.accounts.registry_config;
        guard::require_caller(&ctx.accounts.admin.key(), &registry.admin)?;
        require!(new_admin != Pubkey::default(), ContentRegistryError::InvalidArgument);

        let previous_admin = registry.admin;
        registry.admin = new_admin;

        emit!(AdminTransferred {
            previous_admin,
            new_admin,
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }

    // ============================================
    // CONTENT MANAGEMENT
    // ============================================

    /// Register new content with a fixed supply (admin only)
    pub fn register_content(
        ctx: Context<RegisterContent>,
        title: String,
        description: String,
        max_copies: u64,
    ) -> Result<u64> {
        guard::require_caller(&ctx.accounts.admin.key(), &ctx.accounts.registry_config.admin)?;
        Content::validate_registration(&title, &description, max_copies)?;

        let registry = &mut ctx.accounts.registry_config;
        let content_id = registry.next_content_id()?;
        let timestamp = Clock::get()?.unix_timestamp;

        let content = &mut ctx.accounts.content;
        content.content_id = content_id;
        content.title = title;
        content.description = description;
        content.max_copies = max_copies;
        content.minted_copies = 0;
        content.registered_at = timestamp;
        content.bump = ctx.bumps.content;

        registry.content_count = content_id;

        emit!(ContentRegistered {
            content_id,
            title: content.title.clone(),
            max_copies,
            admin: registry.admin,
            timestamp,
        });
        msg!("Content {} registered with {} copies", content_id, max_copies);

        Ok(content_id)
    }

    /// Read a content entry
    pub fn get_content(ctx: Context<ReadContent>, _content_id: u64) -> Result<ContentInfo> {
        let content = Content::load(&ctx.accounts.content)?;
        Ok(content.info())
    }

    /// Remaining supply of a content entry
    pub fn get_available_copies(ctx: Context<ReadContent>, _content_id: u64) -> Result<u64> {
        let content = Content::load(&ctx.accounts.content)?;
        Ok(content.available_copies())
    }

    // ============================================
    // RESERVATION (minting engine only)
    // ============================================

    /// Consume one copy of supply and return its 1-based copy number.
    /// Runs inside the engine's mint request so availability already
    /// accounts for reservations still waiting on randomness.
    pub fn reserve_copy(ctx: Context<ReserveCopy>, content_id: u64) -> Result<u64> {
        // An unwired registry holds the default key, which no signer matches
        let registry = &ctx.accounts.registry_config;
        guard::require_caller(&ctx.accounts.minting_engine.key(), &registry.minting_engine)?;

        let content_info = ctx.accounts.content.to_account_info();
        let mut content = Content::load(&content_info)?;
        let copy_number = content.reserve_copy()?;
        content.store(&content_info)?;

        emit!(CopyReserved {
            content_id,
            copy_number,
            remaining: content.available_copies(),
            minting_engine: registry.minting_engine,
        });
        msg!("Reserved copy {} of content {}", copy_number, content_id);

        Ok(copy_number)
    }
}
