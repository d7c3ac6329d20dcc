use anchor_lang::prelude::*;

use crate::errors::MintingEngineError;

/// Move lamports out of an account owned by this program
pub fn move_lamports(from: &AccountInfo, to: &AccountInfo, amount: u64) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    let from_balance = from
        .lamports()
        .checked_sub(amount)
        .ok_or(MintingEngineError::MathOverflow)?;
    let to_balance = to
        .lamports()
        .checked_add(amount)
        .ok_or(MintingEngineError::MathOverflow)?;
    **from.try_borrow_mut_lamports()? = from_balance;
    **to.try_borrow_mut_lamports()? = to_balance;
    Ok(())
}

/// Close a program-owned account that is not held as an Anchor `Account`:
/// drain its lamports, wipe the data and hand it back to the system program.
pub fn close_account(info: &AccountInfo, destination: &AccountInfo) -> Result<()> {
    move_lamports(info, destination, info.lamports())?;
    info.try_borrow_mut_data()?.fill(0);
    info.assign(&anchor_lang::system_program::ID);
    Ok(())
}
