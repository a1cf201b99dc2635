use anchor_lang::prelude::*;

#[event]
pub struct EventDeposit {
    pub pool: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
}

#[event]
pub struct EventWithdraw {
    pub pool: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
}

#[event]
pub struct EventFund {
    pub pool: Pubkey,
    pub funder: Pubkey,
    pub amount_a: u64,
    pub amount_b: u64,
    pub reward_a_rate: u64,
    pub reward_b_rate: u64,
    pub reward_duration_end: u64,
}

/// Pending rewards right after settlement, before payout.
#[event]
pub struct EventPendingReward {
    pub value_a: u64,
    pub value_b: u64,
}

#[event]
pub struct EventClaimReward {
    pub value_a: u64,
    pub value_b: u64,
}

#[event]
pub struct EventPoolClosed {
    pub pool: Pubkey,
    pub staking_refunded: u64,
    pub reward_a_refunded: u64,
    pub reward_b_refunded: u64,
}
