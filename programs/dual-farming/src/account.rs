use crate::constants::MIN_DURATION;
use crate::error::ErrorCode;
use crate::math;
use anchor_lang::prelude::*;

#[account]
#[derive(Default)]
pub struct Pool {
    /// Priviledged account.
    pub authority: Pubkey,
    /// Nonce to derive the program-derived address owning the vaults.
    pub nonce: u8,
    /// Paused state of the program
    pub paused: bool,
    /// Creator chosen key making the pool address unique.
    pub base_key: Pubkey,
    /// Mint of the token that can be staked.
    pub staking_mint: Pubkey,
    /// Vault to store staked tokens.
    pub staking_vault: Pubkey,
    /// Mint of the reward A token.
    pub reward_a_mint: Pubkey,
    /// Vault to store reward A tokens.
    pub reward_a_vault: Pubkey,
    /// Mint of the reward B token.
    pub reward_b_mint: Pubkey,
    /// Vault to store reward B tokens.
    pub reward_b_vault: Pubkey,
    /// The period which rewards are linearly distributed.
    pub reward_duration: u64,
    /// The timestamp at which the current reward period ends.
    pub reward_duration_end: u64,
    /// The last time reward states were updated.
    pub last_update_time: u64,
    /// Rate of reward A distribution.
    pub reward_a_rate: u64,
    /// Rate of reward B distribution.
    pub reward_b_rate: u64,
    /// Last calculated reward A per pool token.
    pub reward_a_per_token_stored: u128,
    /// Last calculated reward B per pool token.
    pub reward_b_per_token_stored: u128,
    /// Users staked
    pub user_stake_count: u32,
    /// authorized funders
    /// [] because short size, fixed account size, and ease of use on
    /// client due to auto generated account size property
    pub funders: [Pubkey; 5],
}

impl Pool {
    pub const SIZE: usize = 494;

    pub fn validate_config(
        staking_mint: &Pubkey,
        reward_a_mint: &Pubkey,
        reward_b_mint: &Pubkey,
        reward_duration: u64,
    ) -> Result<()> {
        if staking_mint == reward_a_mint || staking_mint == reward_b_mint {
            return Err(ErrorCode::StakingMintEqualsRewardMint.into());
        }
        if reward_duration < MIN_DURATION {
            return Err(ErrorCode::DurationTooShort.into());
        }
        Ok(())
    }

    /// Brings both accumulators up to `now` and, when given, settles the
    /// user against them. Every operation goes through here first.
    ///
    /// A new user has its "complete" checkpoint set to the current
    /// accumulator so it only earns from that point on.
    pub fn update_rewards(
        &mut self,
        user: Option<&mut User>,
        total_staked: u64,
        now: u64,
    ) -> Result<()> {
        let last_time_reward_applicable =
            math::last_time_reward_applicable(self.reward_duration_end, now);

        if last_time_reward_applicable > self.last_update_time {
            self.reward_a_per_token_stored = math::reward_per_token(
                total_staked,
                self.reward_a_per_token_stored,
                last_time_reward_applicable,
                self.last_update_time,
                self.reward_a_rate,
            )
            .ok_or(ErrorCode::MathOverflow)?;
            self.reward_b_per_token_stored = math::reward_per_token(
                total_staked,
                self.reward_b_per_token_stored,
                last_time_reward_applicable,
                self.last_update_time,
                self.reward_b_rate,
            )
            .ok_or(ErrorCode::MathOverflow)?;
            self.last_update_time = last_time_reward_applicable;
        }

        if let Some(u) = user {
            u.settle(self)?;
        }

        Ok(())
    }

    pub fn register_user(&mut self) -> Result<()> {
        self.user_stake_count = self
            .user_stake_count
            .checked_add(1)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }

    pub fn deposit(
        &mut self,
        user: &mut User,
        amount: u64,
        total_staked: u64,
        now: u64,
    ) -> Result<()> {
        if amount == 0 {
            return Err(ErrorCode::AmountMustBeGreaterThanZero.into());
        }

        self.update_rewards(Some(&mut *user), total_staked, now)?;
        user.balance_staked = user
            .balance_staked
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }

    pub fn withdraw(
        &mut self,
        user: &mut User,
        amount: u64,
        total_staked: u64,
        now: u64,
    ) -> Result<()> {
        if amount == 0 {
            return Err(ErrorCode::AmountMustBeGreaterThanZero.into());
        }
        if user.balance_staked < amount {
            return Err(ErrorCode::InsufficientFundWithdraw.into());
        }

        self.update_rewards(Some(&mut *user), total_staked, now)?;
        user.balance_staked = user
            .balance_staked
            .checked_sub(amount)
            .ok_or(ErrorCode::InsufficientFundWithdraw)?;
        Ok(())
    }

    /// Settles the user and returns the (A, B) amounts to pay out, capped at
    /// what each reward vault holds. Whatever could not be paid stays pending.
    pub fn claim(
        &mut self,
        user: &mut User,
        total_staked: u64,
        reward_a_vault_balance: u64,
        reward_b_vault_balance: u64,
        now: u64,
    ) -> Result<(u64, u64)> {
        self.update_rewards(Some(&mut *user), total_staked, now)?;

        let amount_a = std::cmp::min(user.reward_a_per_token_pending, reward_a_vault_balance);
        let amount_b = std::cmp::min(user.reward_b_per_token_pending, reward_b_vault_balance);

        user.reward_a_per_token_pending = user
            .reward_a_per_token_pending
            .checked_sub(amount_a)
            .ok_or(ErrorCode::MathOverflow)?;
        user.reward_b_per_token_pending = user
            .reward_b_per_token_pending
            .checked_sub(amount_b)
            .ok_or(ErrorCode::MathOverflow)?;

        Ok((amount_a, amount_b))
    }

    pub fn is_funder(&self, key: &Pubkey) -> bool {
        *key == self.authority || self.funders.iter().any(|x| x == key)
    }

    /// Starts a new funding round, or extends the running one by rolling its
    /// undistributed reward into the new rate.
    pub fn fund(
        &mut self,
        funder: &Pubkey,
        amount_a: u64,
        amount_b: u64,
        total_staked: u64,
        now: u64,
    ) -> Result<()> {
        //require signed funder auth - otherwise constant micro fund could hold funds hostage
        if !self.is_funder(funder) {
            return Err(ErrorCode::Unauthorized.into());
        }
        if self.paused {
            return Err(ErrorCode::PoolPaused.into());
        }

        self.update_rewards(None, total_staked, now)?;

        let leftover_a = math::leftover_reward(self.reward_duration_end, now, self.reward_a_rate)
            .ok_or(ErrorCode::MathOverflow)?;
        let leftover_b = math::leftover_reward(self.reward_duration_end, now, self.reward_b_rate)
            .ok_or(ErrorCode::MathOverflow)?;

        self.reward_a_rate = math::rate_by_funding(amount_a, leftover_a, self.reward_duration)
            .ok_or(ErrorCode::MathOverflow)?;
        self.reward_b_rate = math::rate_by_funding(amount_b, leftover_b, self.reward_duration)
            .ok_or(ErrorCode::MathOverflow)?;

        self.last_update_time = now;
        self.reward_duration_end = now
            .checked_add(self.reward_duration)
            .ok_or(ErrorCode::MathOverflow)?;

        Ok(())
    }

    pub fn pause(&mut self, now: u64) -> Result<()> {
        if self.paused {
            return Err(ErrorCode::PoolPaused.into());
        }
        if self.reward_duration_end == 0 {
            return Err(ErrorCode::RewardPeriodNotStarted.into());
        }
        if now < self.reward_duration_end {
            return Err(ErrorCode::RewardPeriodActive.into());
        }
        self.paused = true;
        Ok(())
    }

    pub fn unpause(&mut self) -> Result<()> {
        if !self.paused {
            return Err(ErrorCode::PoolNotPaused.into());
        }
        self.paused = false;
        Ok(())
    }

    pub fn authorize_funder(&mut self, funder_to_add: Pubkey) -> Result<()> {
        if funder_to_add == Pubkey::default() {
            return Err(ErrorCode::InvalidFunder.into());
        }
        if funder_to_add == self.authority {
            return Err(ErrorCode::FunderAlreadyAuthorized.into());
        }
        if self.funders.iter().any(|x| *x == funder_to_add) {
            return Err(ErrorCode::FunderAlreadyAuthorized.into());
        }
        let default_pubkey = Pubkey::default();
        if let Some(idx) = self.funders.iter().position(|x| *x == default_pubkey) {
            self.funders[idx] = funder_to_add;
        } else {
            return Err(ErrorCode::MaxFunders.into());
        }
        Ok(())
    }

    /// Removing a key that is not listed leaves the pool unchanged.
    pub fn deauthorize_funder(&mut self, funder_to_remove: Pubkey) -> Result<bool> {
        if funder_to_remove == self.authority {
            return Err(ErrorCode::CannotDeauthorizePoolAuthority.into());
        }
        if funder_to_remove == Pubkey::default() {
            return Ok(false);
        }
        match self.funders.iter().position(|x| *x == funder_to_remove) {
            Some(idx) => {
                self.funders[idx] = Pubkey::default();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// The user is settled before it is dropped so a reward accrued in the
    /// same instant cannot be lost by closing.
    pub fn close_user(&mut self, user: &mut User, total_staked: u64, now: u64) -> Result<()> {
        self.update_rewards(Some(&mut *user), total_staked, now)?;

        if user.balance_staked != 0 {
            return Err(ErrorCode::UserBalanceNotZero.into());
        }
        if user.reward_a_per_token_pending != 0 || user.reward_b_per_token_pending != 0 {
            return Err(ErrorCode::UserRewardPending.into());
        }

        self.user_stake_count = self
            .user_stake_count
            .checked_sub(1)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }

    pub fn ensure_closable(&self) -> Result<()> {
        if !self.paused {
            return Err(ErrorCode::PoolNotPaused.into());
        }
        if self.user_stake_count != 0 {
            return Err(ErrorCode::PoolHasUsers.into());
        }
        Ok(())
    }
}

#[account]
#[derive(Default)]
pub struct User {
    /// Pool the this user belongs to.
    pub pool: Pubkey,
    /// The owner of this account.
    pub owner: Pubkey,
    /// Pool reward A per token at the last settlement.
    pub reward_a_per_token_complete: u128,
    /// Pool reward B per token at the last settlement.
    pub reward_b_per_token_complete: u128,
    /// The amount of token A pending claim.
    pub reward_a_per_token_pending: u64,
    /// The amount of token B pending claim.
    pub reward_b_per_token_pending: u64,
    /// The amount staked.
    pub balance_staked: u64,
    /// Signer nonce.
    pub nonce: u8,
}

impl User {
    pub const SIZE: usize = 121;

    /// Must only be called right after the pool accumulators were refreshed.
    fn settle(&mut self, pool: &Pool) -> Result<()> {
        self.reward_a_per_token_pending = math::earned(
            self.balance_staked,
            pool.reward_a_per_token_stored,
            self.reward_a_per_token_complete,
            self.reward_a_per_token_pending,
        )
        .ok_or(ErrorCode::MathOverflow)?;
        self.reward_b_per_token_pending = math::earned(
            self.balance_staked,
            pool.reward_b_per_token_stored,
            self.reward_b_per_token_complete,
            self.reward_b_per_token_pending,
        )
        .ok_or(ErrorCode::MathOverflow)?;

        self.reward_a_per_token_complete = pool.reward_a_per_token_stored;
        self.reward_b_per_token_complete = pool.reward_b_per_token_stored;
        Ok(())
    }
}
