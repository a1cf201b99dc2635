use crate::error::ErrorCode;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::{clock, program::invoke_signed};
use anchor_spl::token::{self, Token, TokenAccount};
use std::convert::TryFrom;

pub fn current_timestamp() -> Result<u64> {
    let clock = clock::Clock::get()?;
    u64::try_from(clock.unix_timestamp).map_err(|_| ErrorCode::InvalidTimestamp.into())
}

/// Moves `amount` from an account owned by a signer into a pool vault.
pub fn transfer_into_vault<'info>(
    token_program: &Program<'info, Token>,
    from: &Account<'info, TokenAccount>,
    vault: &Account<'info, TokenAccount>,
    authority: AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    let cpi_ctx = CpiContext::new(
        token_program.to_account_info(),
        token::Transfer {
            from: from.to_account_info(),
            to: vault.to_account_info(),
            authority,
        },
    );
    token::transfer(cpi_ctx, amount)
}

/// Moves `amount` out of a pool vault, signed by the pool PDA.
pub fn transfer_from_vault<'info>(
    token_program: &Program<'info, Token>,
    vault: &Account<'info, TokenAccount>,
    to: &Account<'info, TokenAccount>,
    pool: AccountInfo<'info>,
    pool_signer: &[&[&[u8]]],
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    let cpi_ctx = CpiContext::new_with_signer(
        token_program.to_account_info(),
        token::Transfer {
            from: vault.to_account_info(),
            to: to.to_account_info(),
            authority: pool,
        },
        pool_signer,
    );
    token::transfer(cpi_ctx, amount)
}

/// Empties a vault into `refundee_token` and closes it, returning the rent
/// lamports to `refundee`.
pub fn drain_and_close_vault<'info>(
    token_program: &Program<'info, Token>,
    vault: &Account<'info, TokenAccount>,
    refundee_token: &Account<'info, TokenAccount>,
    refundee: AccountInfo<'info>,
    pool: AccountInfo<'info>,
    pool_signer: &[&[&[u8]]],
) -> Result<u64> {
    let balance = vault.amount;
    if balance > 0 {
        let ix = spl_token::instruction::transfer(
            &spl_token::ID,
            vault.to_account_info().key,
            refundee_token.to_account_info().key,
            pool.key,
            &[pool.key],
            balance,
        )?;
        invoke_signed(
            &ix,
            &[
                token_program.to_account_info(),
                vault.to_account_info(),
                refundee_token.to_account_info(),
                pool.clone(),
            ],
            pool_signer,
        )?;
    }

    let ix = spl_token::instruction::close_account(
        &spl_token::ID,
        vault.to_account_info().key,
        refundee.key,
        pool.key,
        &[pool.key],
    )?;
    invoke_signed(
        &ix,
        &[
            token_program.to_account_info(),
            vault.to_account_info(),
            refundee,
            pool,
        ],
        pool_signer,
    )?;

    Ok(balance)
}
