//! Multi-operation scenarios run against an in-memory token ledger.

use crate::account::{Pool, User};
use crate::error::ErrorCode;
use anchor_lang::prelude::*;

struct Farm {
    pool: Pool,
    staking_vault: u64,
    reward_a_vault: u64,
    reward_b_vault: u64,
    funded_a: u64,
    funded_b: u64,
}

struct Staker {
    user: User,
    wallet: u64,
    reward_a: u64,
    reward_b: u64,
}

impl Farm {
    fn new(reward_duration: u64) -> Self {
        Farm {
            pool: Pool {
                authority: Pubkey::new_unique(),
                staking_mint: Pubkey::new_unique(),
                reward_a_mint: Pubkey::new_unique(),
                reward_b_mint: Pubkey::new_unique(),
                reward_duration,
                ..Pool::default()
            },
            staking_vault: 0,
            reward_a_vault: 0,
            reward_b_vault: 0,
            funded_a: 0,
            funded_b: 0,
        }
    }

    fn authority(&self) -> Pubkey {
        self.pool.authority
    }

    fn join(&mut self, wallet: u64) -> Staker {
        self.pool.register_user().unwrap();
        Staker {
            user: User {
                owner: Pubkey::new_unique(),
                ..User::default()
            },
            wallet,
            reward_a: 0,
            reward_b: 0,
        }
    }

    fn deposit(&mut self, staker: &mut Staker, amount: u64, now: u64) -> Result<()> {
        if staker.wallet < amount {
            return Err(ProgramError::InsufficientFunds.into());
        }
        self.pool
            .deposit(&mut staker.user, amount, self.staking_vault, now)?;
        staker.wallet -= amount;
        self.staking_vault += amount;
        Ok(())
    }

    fn withdraw(&mut self, staker: &mut Staker, amount: u64, now: u64) -> Result<()> {
        self.pool
            .withdraw(&mut staker.user, amount, self.staking_vault, now)?;
        self.staking_vault -= amount;
        staker.wallet += amount;
        Ok(())
    }

    fn fund(&mut self, funder: &Pubkey, amount_a: u64, amount_b: u64, now: u64) -> Result<()> {
        self.pool
            .fund(funder, amount_a, amount_b, self.staking_vault, now)?;
        self.reward_a_vault += amount_a;
        self.reward_b_vault += amount_b;
        self.funded_a += amount_a;
        self.funded_b += amount_b;
        Ok(())
    }

    fn claim(&mut self, staker: &mut Staker, now: u64) -> Result<()> {
        let (amount_a, amount_b) = self.pool.claim(
            &mut staker.user,
            self.staking_vault,
            self.reward_a_vault,
            self.reward_b_vault,
            now,
        )?;
        self.reward_a_vault -= amount_a;
        self.reward_b_vault -= amount_b;
        staker.reward_a += amount_a;
        staker.reward_b += amount_b;
        Ok(())
    }

    fn close_user(&mut self, staker: &mut Staker, now: u64) -> Result<()> {
        self.pool
            .close_user(&mut staker.user, self.staking_vault, now)
    }
}

fn error_code(result: Result<()>) -> u32 {
    match result.unwrap_err() {
        anchor_lang::error::Error::AnchorError(e) => e.error_code_number,
        e => panic!("unexpected error {:?}", e),
    }
}

fn assert_within_one(actual: u64, expected: u64) {
    assert!(
        actual <= expected + 1 && actual + 1 >= expected,
        "{} is not within one of {}",
        actual,
        expected
    );
}

#[test]
fn balance_matches_net_deposits() {
    let mut farm = Farm::new(10);
    let mut staker = farm.join(1_000);

    farm.deposit(&mut staker, 300, 0).unwrap();
    farm.deposit(&mut staker, 200, 1).unwrap();
    farm.withdraw(&mut staker, 150, 2).unwrap();
    farm.deposit(&mut staker, 1, 3).unwrap();
    farm.withdraw(&mut staker, 351, 4).unwrap();
    farm.deposit(&mut staker, 42, 5).unwrap();

    assert_eq!(staker.user.balance_staked, 42);
    assert_eq!(farm.staking_vault, staker.user.balance_staked);
    assert_eq!(staker.wallet, 1_000 - 42);
}

#[test]
fn failed_transfer_leaves_position_untouched() {
    let mut farm = Farm::new(10);
    let mut staker = farm.join(10);

    assert!(farm.deposit(&mut staker, 11, 0).is_err());
    assert_eq!(staker.user.balance_staked, 0);
    assert_eq!(farm.staking_vault, 0);
}

#[test]
fn single_staker_collects_round_minus_dust() {
    let mut farm = Farm::new(7);
    let authority = farm.authority();
    let mut staker = farm.join(1_000);

    farm.deposit(&mut staker, 1_000, 0).unwrap();
    farm.fund(&authority, 1_000, 1_000, 0).unwrap();
    farm.claim(&mut staker, 7).unwrap();

    assert!(staker.reward_a < 1_000);
    assert!(1_000 - staker.reward_a < 7);
    assert_eq!(staker.reward_a, staker.reward_b);
}

#[test]
fn whole_vault_staker_collects_whole_round() {
    let mut farm = Farm::new(10);
    let authority = farm.authority();
    let mut staker = farm.join(500);

    farm.deposit(&mut staker, 500, 0).unwrap();
    farm.fund(&authority, 1_000, 2_000, 0).unwrap();
    farm.claim(&mut staker, 10).unwrap();

    assert_eq!(staker.reward_a, 1_000);
    assert_eq!(staker.reward_b, 2_000);
    assert_eq!(farm.reward_a_vault, 0);
}

#[test]
fn precision_loss_leaves_remaining_reward() {
    let fund_amount = 100_000_000;
    let mut farm = Farm::new(7);
    let authority = farm.authority();
    let mut staker = farm.join(100_000_000);

    farm.deposit(&mut staker, 100_000_000, 0).unwrap();
    farm.fund(&authority, fund_amount, fund_amount, 0).unwrap();
    farm.claim(&mut staker, 7).unwrap();

    assert!(staker.reward_a < fund_amount);
    assert!(fund_amount - staker.reward_a < 7);
    assert_eq!(farm.reward_a_vault, fund_amount - staker.reward_a);
}

#[test]
fn equal_stakers_split_evenly() {
    let mut farm = Farm::new(10);
    let authority = farm.authority();
    let mut alice = farm.join(100);
    let mut bob = farm.join(100);

    farm.deposit(&mut alice, 100, 0).unwrap();
    farm.deposit(&mut bob, 100, 0).unwrap();
    farm.fund(&authority, 1_000, 600, 0).unwrap();
    farm.claim(&mut alice, 10).unwrap();
    farm.claim(&mut bob, 10).unwrap();

    assert_within_one(alice.reward_a, 500);
    assert_within_one(bob.reward_a, 500);
    assert_within_one(alice.reward_b, 300);
    assert_within_one(bob.reward_b, 300);
}

#[test]
fn late_staker_earns_from_join_time() {
    let mut farm = Farm::new(10);
    let authority = farm.authority();
    let mut early = farm.join(100);
    let mut late = farm.join(100);

    farm.deposit(&mut early, 100, 0).unwrap();
    farm.fund(&authority, 1_000, 1_000, 0).unwrap();
    farm.deposit(&mut late, 100, 5).unwrap();
    farm.claim(&mut early, 10).unwrap();
    farm.claim(&mut late, 10).unwrap();

    assert_within_one(early.reward_a, 750);
    assert_within_one(late.reward_a, 250);
}

#[test]
fn nothing_accrues_while_pool_is_empty() {
    let mut farm = Farm::new(10);
    let authority = farm.authority();
    let mut staker = farm.join(100);

    farm.fund(&authority, 1_000, 1_000, 0).unwrap();
    farm.deposit(&mut staker, 100, 5).unwrap();
    farm.claim(&mut staker, 10).unwrap();

    assert_eq!(staker.reward_a, 500);
    assert_eq!(farm.reward_a_vault, 500);
}

#[test]
fn extension_rolls_unspent_reward_forward() {
    let mut farm = Farm::new(10);
    let authority = farm.authority();
    let mut staker = farm.join(100);

    farm.deposit(&mut staker, 100, 0).unwrap();
    farm.fund(&authority, 1_000, 1_000, 0).unwrap();
    let first_end = farm.pool.reward_duration_end;

    farm.fund(&authority, 400, 400, 4).unwrap();
    assert!(farm.pool.reward_duration_end > first_end);

    farm.claim(&mut staker, farm.pool.reward_duration_end).unwrap();
    assert!(staker.reward_a <= 1_400);
    assert!(1_400 - staker.reward_a < 10);
}

#[test]
fn deauthorized_funder_cannot_fund() {
    let mut farm = Farm::new(10);
    let authority = farm.authority();
    let funder = Pubkey::new_unique();
    let mut staker = farm.join(100);

    farm.pool.authorize_funder(funder).unwrap();
    farm.deposit(&mut staker, 100, 0).unwrap();
    farm.fund(&funder, 1_000, 1_000, 0).unwrap();

    assert!(farm.pool.deauthorize_funder(funder).unwrap());
    let rate = farm.pool.reward_a_rate;
    let end = farm.pool.reward_duration_end;
    let last_update = farm.pool.last_update_time;

    assert_eq!(
        error_code(farm.fund(&funder, 1_000, 1_000, 6)),
        u32::from(ErrorCode::Unauthorized)
    );
    assert_eq!(farm.pool.reward_a_rate, rate);
    assert_eq!(farm.pool.reward_duration_end, end);
    assert_eq!(farm.pool.last_update_time, last_update);
    assert_eq!(farm.reward_a_vault, 1_000);

    farm.claim(&mut staker, 10).unwrap();
    assert_eq!(staker.reward_a, 1_000);

    // The authority keeps its right to fund.
    farm.fund(&authority, 10, 10, 11).unwrap();
}

#[test]
fn payouts_never_exceed_funding() {
    let mut farm = Farm::new(7);
    let authority = farm.authority();
    let mut first = farm.join(10_000);
    let mut second = farm.join(10_000);
    let mut third = farm.join(10_000);

    farm.deposit(&mut first, 333, 0).unwrap();
    farm.fund(&authority, 10_001, 777, 0).unwrap();
    farm.deposit(&mut second, 1_000, 2).unwrap();
    farm.claim(&mut first, 3).unwrap();
    farm.deposit(&mut third, 17, 4).unwrap();
    farm.fund(&authority, 5_003, 1_234, 4).unwrap();
    farm.withdraw(&mut second, 400, 6).unwrap();
    farm.claim(&mut first, 8).unwrap();
    farm.deposit(&mut third, 50, 8).unwrap();

    farm.fund(&authority, 999, 0, 20).unwrap();
    farm.withdraw(&mut second, 600, 23).unwrap();

    for staker in [&mut first, &mut second, &mut third] {
        farm.claim(staker, 30).unwrap();
        // The vault always covered what was owed.
        assert_eq!(staker.user.reward_a_per_token_pending, 0);
        assert_eq!(staker.user.reward_b_per_token_pending, 0);
    }

    let paid_a = first.reward_a + second.reward_a + third.reward_a;
    let paid_b = first.reward_b + second.reward_b + third.reward_b;
    assert!(paid_a <= farm.funded_a);
    assert!(paid_b <= farm.funded_b);
    assert_eq!(paid_a + farm.reward_a_vault, farm.funded_a);
    assert_eq!(paid_b + farm.reward_b_vault, farm.funded_b);
}

#[test]
fn paused_pool_lifecycle() {
    let mut farm = Farm::new(10);
    let authority = farm.authority();
    let mut staker = farm.join(100);

    farm.deposit(&mut staker, 100, 0).unwrap();
    farm.fund(&authority, 1_000, 1_000, 0).unwrap();

    assert_eq!(
        error_code(farm.pool.pause(5)),
        u32::from(ErrorCode::RewardPeriodActive)
    );
    farm.pool.pause(10).unwrap();

    assert_eq!(
        error_code(farm.close_user(&mut staker, 11)),
        u32::from(ErrorCode::UserBalanceNotZero)
    );

    // Claim and withdraw keep working once paused.
    farm.claim(&mut staker, 12).unwrap();
    assert_eq!(staker.reward_a, 1_000);
    farm.withdraw(&mut staker, 100, 12).unwrap();
    assert_eq!(staker.wallet, 100);

    assert_eq!(
        error_code(farm.fund(&authority, 1_000, 1_000, 12)),
        u32::from(ErrorCode::PoolPaused)
    );
    assert_eq!(
        error_code(farm.pool.ensure_closable()),
        u32::from(ErrorCode::PoolHasUsers)
    );

    farm.close_user(&mut staker, 13).unwrap();
    assert_eq!(farm.pool.user_stake_count, 0);
    assert!(farm.pool.ensure_closable().is_ok());

    farm.pool.unpause().unwrap();
    farm.fund(&authority, 100, 100, 14).unwrap();
    assert_eq!(farm.pool.reward_duration_end, 24);
}
