pub mod account;
pub mod constants;
pub mod context;
pub mod error;
pub mod event;
pub mod math;
pub mod pda;
pub mod utils;

#[cfg(test)]
mod tests;

use account::*;
use anchor_lang::prelude::*;
use constants::*;
use context::*;
use event::*;
use utils::*;

declare_id!("5dAQP2JtgJ3vFKMi3McnXkut51PXfHuyXRJhFCofd13J");

#[program]
pub mod dual_farming {
    use super::*;

    pub fn initialize_pool(ctx: Context<InitializePool>, reward_duration: u64) -> Result<()> {
        Pool::validate_config(
            &ctx.accounts.staking_mint.key(),
            &ctx.accounts.reward_a_mint.key(),
            &ctx.accounts.reward_b_mint.key(),
            reward_duration,
        )?;

        let pool = &mut ctx.accounts.pool;

        pool.authority = ctx.accounts.authority.key();
        pool.nonce = *ctx.bumps.get("pool").ok_or(ProgramError::InvalidSeeds)?;
        pool.paused = false;
        pool.base_key = ctx.accounts.base.key();
        pool.staking_mint = ctx.accounts.staking_mint.key();
        pool.staking_vault = ctx.accounts.staking_vault.key();
        pool.reward_a_mint = ctx.accounts.reward_a_mint.key();
        pool.reward_a_vault = ctx.accounts.reward_a_vault.key();
        pool.reward_b_mint = ctx.accounts.reward_b_mint.key();
        pool.reward_b_vault = ctx.accounts.reward_b_vault.key();
        pool.reward_duration = reward_duration;
        pool.reward_duration_end = 0;
        pool.last_update_time = 0;
        pool.reward_a_rate = 0;
        pool.reward_b_rate = 0;
        pool.reward_a_per_token_stored = 0;
        pool.reward_b_per_token_stored = 0;
        pool.user_stake_count = 0;
        pool.funders = [Pubkey::default(); MAX_FUNDERS];

        Ok(())
    }

    pub fn create_user(ctx: Context<CreateUser>) -> Result<()> {
        let user = &mut ctx.accounts.user;
        user.pool = *ctx.accounts.pool.to_account_info().key;
        user.owner = *ctx.accounts.owner.key;
        user.reward_a_per_token_complete = 0;
        user.reward_b_per_token_complete = 0;
        user.reward_a_per_token_pending = 0;
        user.reward_b_per_token_pending = 0;
        user.balance_staked = 0;
        user.nonce = *ctx.bumps.get("user").ok_or(ProgramError::InvalidSeeds)?;

        ctx.accounts.pool.register_user()?;

        Ok(())
    }

    pub fn pause(ctx: Context<Pause>) -> Result<()> {
        let now = current_timestamp()?;
        ctx.accounts.pool.pause(now)?;
        msg!("Pool paused at {}", now);
        Ok(())
    }

    pub fn unpause(ctx: Context<Unpause>) -> Result<()> {
        ctx.accounts.pool.unpause()?;
        msg!("Pool unpaused");
        Ok(())
    }

    /// Stakes the owner's whole staking token balance.
    pub fn deposit_full(ctx: Context<Stake>) -> Result<()> {
        let full_amount = ctx.accounts.stake_from_account.amount;
        deposit(ctx, full_amount)
    }

    pub fn deposit(ctx: Context<Stake>, amount: u64) -> Result<()> {
        let now = current_timestamp()?;
        let total_staked = ctx.accounts.staking_vault.amount;

        let pool = &mut ctx.accounts.pool;
        pool.deposit(&mut ctx.accounts.user, amount, total_staked, now)?;

        // Transfer tokens into the stake vault.
        transfer_into_vault(
            &ctx.accounts.token_program,
            &ctx.accounts.stake_from_account,
            &ctx.accounts.staking_vault,
            ctx.accounts.owner.to_account_info(),
            amount,
        )?;

        emit!(EventDeposit {
            pool: ctx.accounts.pool.key(),
            owner: ctx.accounts.owner.key(),
            amount,
        });
        Ok(())
    }

    pub fn withdraw(ctx: Context<Stake>, spt_amount: u64) -> Result<()> {
        let now = current_timestamp()?;
        let total_staked = ctx.accounts.staking_vault.amount;

        let pool = &mut ctx.accounts.pool;
        pool.withdraw(&mut ctx.accounts.user, spt_amount, total_staked, now)?;

        // Transfer tokens from the pool vault to user vault.
        {
            let pool = &ctx.accounts.pool;
            let seeds = &[
                POOL_SEED,
                pool.staking_mint.as_ref(),
                pool.reward_a_mint.as_ref(),
                pool.reward_b_mint.as_ref(),
                pool.base_key.as_ref(),
                &[pool.nonce],
            ];
            let pool_signer = &[&seeds[..]];

            transfer_from_vault(
                &ctx.accounts.token_program,
                &ctx.accounts.staking_vault,
                &ctx.accounts.stake_from_account,
                pool.to_account_info(),
                pool_signer,
                spt_amount,
            )?;
        }

        emit!(EventWithdraw {
            pool: ctx.accounts.pool.key(),
            owner: ctx.accounts.owner.key(),
            amount: spt_amount,
        });
        Ok(())
    }

    pub fn authorize_funder(ctx: Context<FunderChange>, funder_to_add: Pubkey) -> Result<()> {
        ctx.accounts.pool.authorize_funder(funder_to_add)?;
        msg!("Authorized funder {}", funder_to_add);
        Ok(())
    }

    pub fn deauthorize_funder(ctx: Context<FunderChange>, funder_to_remove: Pubkey) -> Result<()> {
        if ctx.accounts.pool.deauthorize_funder(funder_to_remove)? {
            msg!("Deauthorized funder {}", funder_to_remove);
        } else {
            msg!("{} is not an authorized funder", funder_to_remove);
        }
        Ok(())
    }

    pub fn fund(ctx: Context<Fund>, amount_a: u64, amount_b: u64) -> Result<()> {
        let now = current_timestamp()?;
        let total_staked = ctx.accounts.staking_vault.amount;
        let funder = ctx.accounts.funder.key();

        let pool = &mut ctx.accounts.pool;
        pool.fund(&funder, amount_a, amount_b, total_staked, now)?;

        // Transfer reward A tokens into the A vault.
        transfer_into_vault(
            &ctx.accounts.token_program,
            &ctx.accounts.from_a,
            &ctx.accounts.reward_a_vault,
            ctx.accounts.funder.to_account_info(),
            amount_a,
        )?;
        // Transfer reward B tokens into the B vault.
        transfer_into_vault(
            &ctx.accounts.token_program,
            &ctx.accounts.from_b,
            &ctx.accounts.reward_b_vault,
            ctx.accounts.funder.to_account_info(),
            amount_b,
        )?;

        let pool = &ctx.accounts.pool;
        emit!(EventFund {
            pool: pool.key(),
            funder,
            amount_a,
            amount_b,
            reward_a_rate: pool.reward_a_rate,
            reward_b_rate: pool.reward_b_rate,
            reward_duration_end: pool.reward_duration_end,
        });
        Ok(())
    }

    pub fn claim(ctx: Context<ClaimReward>) -> Result<()> {
        let now = current_timestamp()?;
        let total_staked = ctx.accounts.staking_vault.amount;
        let reward_a_vault_balance = ctx.accounts.reward_a_vault.amount;
        let reward_b_vault_balance = ctx.accounts.reward_b_vault.amount;

        let pool = &mut ctx.accounts.pool;
        let user: &mut User = &mut ctx.accounts.user;
        pool.update_rewards(Some(&mut *user), total_staked, now)?;

        // emit pending reward
        emit!(EventPendingReward {
            value_a: user.reward_a_per_token_pending,
            value_b: user.reward_b_per_token_pending,
        });

        let (amount_a, amount_b) = pool.claim(
            user,
            total_staked,
            reward_a_vault_balance,
            reward_b_vault_balance,
            now,
        )?;

        {
            let pool = &ctx.accounts.pool;
            let seeds = &[
                POOL_SEED,
                pool.staking_mint.as_ref(),
                pool.reward_a_mint.as_ref(),
                pool.reward_b_mint.as_ref(),
                pool.base_key.as_ref(),
                &[pool.nonce],
            ];
            let pool_signer = &[&seeds[..]];

            transfer_from_vault(
                &ctx.accounts.token_program,
                &ctx.accounts.reward_a_vault,
                &ctx.accounts.reward_a_account,
                pool.to_account_info(),
                pool_signer,
                amount_a,
            )?;
            transfer_from_vault(
                &ctx.accounts.token_program,
                &ctx.accounts.reward_b_vault,
                &ctx.accounts.reward_b_account,
                pool.to_account_info(),
                pool_signer,
                amount_b,
            )?;
        }

        emit!(EventClaimReward {
            value_a: amount_a,
            value_b: amount_b,
        });
        Ok(())
    }

    /// Closes a users stake account. Only allowed when the user has nothing
    /// staked and no rewards pending.
    pub fn close_user(ctx: Context<CloseUser>) -> Result<()> {
        let now = current_timestamp()?;
        let total_staked = ctx.accounts.staking_vault.amount;

        let pool = &mut ctx.accounts.pool;
        pool.close_user(&mut ctx.accounts.user, total_staked, now)?;
        Ok(())
    }

    pub fn close_pool(ctx: Context<ClosePool>) -> Result<()> {
        let pool = &ctx.accounts.pool;
        pool.ensure_closable()?;

        let seeds = &[
            POOL_SEED,
            pool.staking_mint.as_ref(),
            pool.reward_a_mint.as_ref(),
            pool.reward_b_mint.as_ref(),
            pool.base_key.as_ref(),
            &[pool.nonce],
        ];
        let pool_signer = &[&seeds[..]];

        //instead of closing these vaults, we could technically just
        //set_authority on them. it's not very ata clean, but it'd work
        //if size of tx is an issue, thats an approach
        let staking_refunded = drain_and_close_vault(
            &ctx.accounts.token_program,
            &ctx.accounts.staking_vault,
            &ctx.accounts.staking_refundee,
            ctx.accounts.refundee.to_account_info(),
            pool.to_account_info(),
            pool_signer,
        )?;
        let reward_a_refunded = drain_and_close_vault(
            &ctx.accounts.token_program,
            &ctx.accounts.reward_a_vault,
            &ctx.accounts.reward_a_refundee,
            ctx.accounts.refundee.to_account_info(),
            pool.to_account_info(),
            pool_signer,
        )?;
        let reward_b_refunded = drain_and_close_vault(
            &ctx.accounts.token_program,
            &ctx.accounts.reward_b_vault,
            &ctx.accounts.reward_b_refundee,
            ctx.accounts.refundee.to_account_info(),
            pool.to_account_info(),
            pool_signer,
        )?;

        emit!(EventPoolClosed {
            pool: pool.key(),
            staking_refunded,
            reward_a_refunded,
            reward_b_refunded,
        });
        Ok(())
    }
}
