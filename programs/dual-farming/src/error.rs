use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Staking mint cannot be one of the reward mints.")]
    StakingMintEqualsRewardMint,
    #[msg("Reward duration is too short.")]
    DurationTooShort,
    #[msg("Signer is not allowed to perform this operation.")]
    Unauthorized,
    #[msg("Pool is paused.")]
    PoolPaused,
    #[msg("Pool is not paused.")]
    PoolNotPaused,
    #[msg("Reward period is still active.")]
    RewardPeriodActive,
    #[msg("Pool has never been funded.")]
    RewardPeriodNotStarted,
    #[msg("Clock returned a negative timestamp.")]
    InvalidTimestamp,
    #[msg("Insufficient funds to withdraw.")]
    InsufficientFundWithdraw,
    #[msg("Amount must be greater than zero.")]
    AmountMustBeGreaterThanZero,
    #[msg("User still has tokens staked.")]
    UserBalanceNotZero,
    #[msg("User still has rewards to claim.")]
    UserRewardPending,
    #[msg("Pool still has open user accounts.")]
    PoolHasUsers,
    #[msg("Provided funder is already authorized to fund.")]
    FunderAlreadyAuthorized,
    #[msg("Maximum funders already authorized.")]
    MaxFunders,
    #[msg("Cannot deauthorize the primary pool authority.")]
    CannotDeauthorizePoolAuthority,
    #[msg("Funder cannot be the default pubkey.")]
    InvalidFunder,
    #[msg("MathOverflow")]
    MathOverflow,
}
