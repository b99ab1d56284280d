use cosmwasm_std::{OverflowError, StdError};
use cw_utils::PaymentError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("{0}")]
    Payment(#[from] PaymentError),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Sale not found: {sale_id}")]
    SaleNotFound { sale_id: String },

    #[error("Sale {sale_id} is already listed")]
    AlreadyListed { sale_id: String },

    #[error("Sale {sale_id} is not active")]
    SaleInactive { sale_id: String },

    #[error("Contract is paused")]
    ContractPaused,

    #[error("Asset {asset} is not accepted by this sale")]
    InvalidAsset { asset: String },

    #[error("Incorrect amount: expected {expected}, got {received}")]
    IncorrectAmount { expected: String, received: String },

    #[error("Insufficient allowance: need {need}, have {have}")]
    InsufficientAllowance { need: String, have: String },

    #[error("Token transfer failed: {reason}")]
    TransferFailed { reason: String },

    #[error("Supply exhausted: cap {cap}, issued {issued}")]
    SupplyExhausted { cap: u64, issued: u64 },

    #[error("Purchase limit exceeded: max {max} per user")]
    LimitExceeded { max: String },

    #[error("Insufficient balance: requested {requested}, held {held}")]
    InsufficientBalance { requested: String, held: String },

    #[error("Round is not over: pause the contract before withdrawing")]
    RoundNotOver,

    #[error("Operation does not match the allowlist mode of sale {sale_id}")]
    AllowlistModeMismatch { sale_id: String },

    #[error("Invalid merkle root: must be exactly 32 bytes, got {len}")]
    InvalidMerkleRoot { len: usize },

    #[error("Invalid price: must be greater than zero")]
    InvalidPrice,

    #[error("Invalid quantity: {reason}")]
    InvalidQuantity { reason: String },

    #[error("Sale {sale_id} does not issue claimable tokens")]
    InvalidSaleOutput { sale_id: String },

    #[error("Insufficient pool: {available} output tokens available, {required} required")]
    InsufficientPool { available: String, required: String },

    #[error("Nothing to claim")]
    NothingToClaim,

    #[error("Cannot migrate from {previous}")]
    InvalidMigration { previous: String },
}
