use crate::constants::PRECISION;
use std::convert::TryInto;

/// Rewards stop accruing once the current funding round has ended.
pub fn last_time_reward_applicable(reward_duration_end: u64, now: u64) -> u64 {
    std::cmp::min(now, reward_duration_end)
}

/// Advances a reward-per-token accumulator from `last_update_time` to
/// `last_time_reward_applicable`.
///
/// Returns the stored value unchanged when nothing is staked or when the
/// applicable time is not ahead of the last update, so refreshing twice at
/// the same timestamp is a no-op. `None` on overflow.
pub fn reward_per_token(
    total_staked: u64,
    reward_per_token_stored: u128,
    last_time_reward_applicable: u64,
    last_update_time: u64,
    reward_rate: u64,
) -> Option<u128> {
    if total_staked == 0 || last_time_reward_applicable <= last_update_time {
        return Some(reward_per_token_stored);
    }

    let accrued = (last_time_reward_applicable as u128)
        .checked_sub(last_update_time as u128)?
        .checked_mul(reward_rate as u128)?
        .checked_mul(PRECISION)?
        .checked_div(total_staked as u128)?;

    reward_per_token_stored.checked_add(accrued)
}

/// Pending reward of a staker after settling against `reward_per_token`.
pub fn earned(
    balance_staked: u64,
    reward_per_token: u128,
    user_reward_per_token_complete: u128,
    user_reward_pending: u64,
) -> Option<u64> {
    (balance_staked as u128)
        .checked_mul(reward_per_token.checked_sub(user_reward_per_token_complete)?)?
        .checked_div(PRECISION)?
        .checked_add(user_reward_pending as u128)?
        .try_into()
        .ok()
}

/// Reward still owed by a running round at `now`. Zero once the round ended.
pub fn leftover_reward(reward_duration_end: u64, now: u64, reward_rate: u64) -> Option<u64> {
    if now >= reward_duration_end {
        return Some(0);
    }
    reward_duration_end
        .checked_sub(now)?
        .checked_mul(reward_rate)
}

/// Per second rate spreading `funding + leftover` over `reward_duration`.
/// The truncated remainder is never distributed.
pub fn rate_by_funding(funding: u64, leftover: u64, reward_duration: u64) -> Option<u64> {
    funding.checked_add(leftover)?.checked_div(reward_duration)
}
