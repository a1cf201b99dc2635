//! Address derivation for pool, vault and user records.

use crate::account::Pool;
use crate::constants::*;
use anchor_lang::prelude::*;
use spl_associated_token_account::get_associated_token_address;

pub fn pool_pda(
    staking_mint: &Pubkey,
    reward_a_mint: &Pubkey,
    reward_b_mint: &Pubkey,
    base: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            POOL_SEED,
            staking_mint.as_ref(),
            reward_a_mint.as_ref(),
            reward_b_mint.as_ref(),
            base.as_ref(),
        ],
        &crate::ID,
    )
}

pub fn staking_vault_pda(pool: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[STAKING_VAULT_SEED, pool.as_ref()], &crate::ID)
}

pub fn reward_a_vault_pda(pool: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[REWARD_A_VAULT_SEED, pool.as_ref()], &crate::ID)
}

pub fn reward_b_vault_pda(pool: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[REWARD_B_VAULT_SEED, pool.as_ref()], &crate::ID)
}

pub fn user_pda(owner: &Pubkey, pool: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[owner.as_ref(), pool.as_ref()], &crate::ID)
}

/// Token accounts of `refundee` receiving the staking, reward A and reward B
/// vault balances when the pool is closed.
pub fn refundee_token_accounts(refundee: &Pubkey, pool: &Pool) -> [Pubkey; 3] {
    [
        get_associated_token_address(refundee, &pool.staking_mint),
        get_associated_token_address(refundee, &pool.reward_a_mint),
        get_associated_token_address(refundee, &pool.reward_b_mint),
    ]
}
