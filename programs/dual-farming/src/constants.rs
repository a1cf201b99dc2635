/// Scale applied to the reward-per-token accumulators, 12 decimal places.
pub const PRECISION: u128 = 1_000_000_000_000;

/// Number of funder slots on a pool, not counting the authority.
pub const MAX_FUNDERS: usize = 5;

#[cfg(not(feature = "local-testing"))]
pub const MIN_DURATION: u64 = 86400;

#[cfg(feature = "local-testing")]
pub const MIN_DURATION: u64 = 1;

pub const POOL_SEED: &[u8] = b"pool";
pub const STAKING_VAULT_SEED: &[u8] = b"staking";
pub const REWARD_A_VAULT_SEED: &[u8] = b"reward_a";
pub const REWARD_B_VAULT_SEED: &[u8] = b"reward_b";
