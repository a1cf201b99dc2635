use crate::account::*;
use crate::constants::*;
use crate::error::ErrorCode;
use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

#[derive(Accounts)]
pub struct InitializePool<'info> {
    pub staking_mint: Box<Account<'info, Mint>>,
    pub reward_a_mint: Box<Account<'info, Mint>>,
    pub reward_b_mint: Box<Account<'info, Mint>>,

    #[account(mut)]
    pub authority: Signer<'info>,
    pub base: Signer<'info>,

    #[account(
        init,
        seeds = [
            POOL_SEED,
            staking_mint.key().as_ref(),
            reward_a_mint.key().as_ref(),
            reward_b_mint.key().as_ref(),
            base.key().as_ref(),
        ],
        bump,
        payer = authority,
        space = 8 + Pool::SIZE,
    )]
    pub pool: Box<Account<'info, Pool>>,

    #[account(
        init,
        seeds = [STAKING_VAULT_SEED, pool.key().as_ref()],
        bump,
        payer = authority,
        token::mint = staking_mint,
        token::authority = pool,
    )]
    pub staking_vault: Box<Account<'info, TokenAccount>>,
    #[account(
        init,
        seeds = [REWARD_A_VAULT_SEED, pool.key().as_ref()],
        bump,
        payer = authority,
        token::mint = reward_a_mint,
        token::authority = pool,
    )]
    pub reward_a_vault: Box<Account<'info, TokenAccount>>,
    #[account(
        init,
        seeds = [REWARD_B_VAULT_SEED, pool.key().as_ref()],
        bump,
        payer = authority,
        token::mint = reward_b_mint,
        token::authority = pool,
    )]
    pub reward_b_vault: Box<Account<'info, TokenAccount>>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
pub struct CreateUser<'info> {
    // Stake instance.
    #[account(mut)]
    pub pool: Box<Account<'info, Pool>>,
    // Member.
    #[account(
        init,
        payer = owner,
        seeds = [
            owner.key.as_ref(),
            pool.to_account_info().key.as_ref()
        ],
        bump,
        space = 8 + User::SIZE,
    )]
    pub user: Box<Account<'info, User>>,
    #[account(mut)]
    pub owner: Signer<'info>,
    // Misc.
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct Pause<'info> {
    #[account(
        mut,
        has_one = authority @ ErrorCode::Unauthorized,
    )]
    pub pool: Box<Account<'info, Pool>>,
    pub authority: Signer<'info>,
}

#[derive(Accounts)]
pub struct Unpause<'info> {
    #[account(
        mut,
        has_one = authority @ ErrorCode::Unauthorized,
    )]
    pub pool: Box<Account<'info, Pool>>,
    pub authority: Signer<'info>,
}

#[derive(Accounts)]
pub struct Stake<'info> {
    // Global accounts for the staking instance.
    #[account(
        mut,
        has_one = staking_vault,
    )]
    pub pool: Box<Account<'info, Pool>>,
    #[account(mut)]
    pub staking_vault: Box<Account<'info, TokenAccount>>,

    // User.
    #[account(
        mut,
        has_one = owner @ ErrorCode::Unauthorized,
        has_one = pool,
        seeds = [
            owner.key.as_ref(),
            pool.to_account_info().key.as_ref()
        ],
        bump = user.nonce,
    )]
    pub user: Box<Account<'info, User>>,
    pub owner: Signer<'info>,
    #[account(
        mut,
        constraint = stake_from_account.mint == pool.staking_mint,
    )]
    pub stake_from_account: Box<Account<'info, TokenAccount>>,

    // Misc.
    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct FunderChange<'info> {
    // Global accounts for the staking instance.
    #[account(
        mut,
        has_one = authority @ ErrorCode::Unauthorized,
    )]
    pub pool: Box<Account<'info, Pool>>,
    pub authority: Signer<'info>,
}

#[derive(Accounts)]
pub struct Fund<'info> {
    // Global accounts for the staking instance.
    #[account(
        mut,
        has_one = staking_vault,
        has_one = reward_a_vault,
        has_one = reward_b_vault,
    )]
    pub pool: Box<Account<'info, Pool>>,
    pub staking_vault: Box<Account<'info, TokenAccount>>,
    #[account(mut)]
    pub reward_a_vault: Box<Account<'info, TokenAccount>>,
    #[account(mut)]
    pub reward_b_vault: Box<Account<'info, TokenAccount>>,
    pub funder: Signer<'info>,
    #[account(mut)]
    pub from_a: Box<Account<'info, TokenAccount>>,
    #[account(mut)]
    pub from_b: Box<Account<'info, TokenAccount>>,

    // Misc.
    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct ClaimReward<'info> {
    // Global accounts for the staking instance.
    #[account(
        mut,
        has_one = staking_vault,
        has_one = reward_a_vault,
        has_one = reward_b_vault,
    )]
    pub pool: Box<Account<'info, Pool>>,
    pub staking_vault: Box<Account<'info, TokenAccount>>,
    #[account(mut)]
    pub reward_a_vault: Box<Account<'info, TokenAccount>>,
    #[account(mut)]
    pub reward_b_vault: Box<Account<'info, TokenAccount>>,

    // User.
    #[account(
        mut,
        has_one = owner @ ErrorCode::Unauthorized,
        has_one = pool,
        seeds = [
            owner.key.as_ref(),
            pool.to_account_info().key.as_ref()
        ],
        bump = user.nonce,
    )]
    pub user: Box<Account<'info, User>>,
    pub owner: Signer<'info>,
    #[account(mut)]
    pub reward_a_account: Box<Account<'info, TokenAccount>>,
    #[account(mut)]
    pub reward_b_account: Box<Account<'info, TokenAccount>>,

    // Misc.
    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct CloseUser<'info> {
    #[account(
        mut,
        has_one = staking_vault,
    )]
    pub pool: Box<Account<'info, Pool>>,
    pub staking_vault: Box<Account<'info, TokenAccount>>,
    #[account(
        mut,
        close = owner,
        has_one = owner @ ErrorCode::Unauthorized,
        has_one = pool,
        seeds = [
            owner.key.as_ref(),
            pool.to_account_info().key.as_ref()
        ],
        bump = user.nonce,
    )]
    pub user: Box<Account<'info, User>>,
    #[account(mut)]
    pub owner: Signer<'info>,
}

#[derive(Accounts)]
pub struct ClosePool<'info> {
    #[account(mut)]
    /// CHECK: only receives lamports.
    pub refundee: AccountInfo<'info>,
    #[account(mut)]
    pub staking_refundee: Box<Account<'info, TokenAccount>>,
    #[account(mut)]
    pub reward_a_refundee: Box<Account<'info, TokenAccount>>,
    #[account(mut)]
    pub reward_b_refundee: Box<Account<'info, TokenAccount>>,
    #[account(
        mut,
        close = refundee,
        has_one = authority @ ErrorCode::Unauthorized,
        has_one = staking_vault,
        has_one = reward_a_vault,
        has_one = reward_b_vault,
    )]
    pub pool: Box<Account<'info, Pool>>,
    pub authority: Signer<'info>,
    #[account(mut)]
    pub staking_vault: Box<Account<'info, TokenAccount>>,
    #[account(mut)]
    pub reward_a_vault: Box<Account<'info, TokenAccount>>,
    #[account(mut)]
    pub reward_b_vault: Box<Account<'info, TokenAccount>>,
    pub token_program: Program<'info, Token>,
}
