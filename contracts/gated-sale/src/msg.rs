use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};
use cw20::Cw20ReceiveMsg;

use crate::state::{AllowlistMode, SaleOutput};

#[cw_serde]
pub struct InstantiateMsg {
    /// Administrator (defaults to the instantiating sender)
    pub admin: Option<String>,
    /// Destination of all withdrawals
    pub treasury: String,
    /// Native denom accepted as payment, e.g. "uaxm"
    pub native_denom: String,
    /// Max units per address per sale (None = no limit)
    pub allowed_user_balance: Option<u64>,
    /// Require the contract to be paused before funds can be withdrawn
    #[serde(default)]
    pub withdraw_requires_pause: bool,
}

/// Payment asset as named in messages.
#[cw_serde]
pub enum AssetInfo {
    /// The configured native denom
    Native {},
    /// A CW20 token contract
    Cw20 { contract_addr: String },
}

#[cw_serde]
pub struct TokenPriceMsg {
    pub token: String,
    pub price: Uint128,
}

#[cw_serde]
pub enum SaleOutputMsg {
    Nft { minter: String },
    Claimable { token: String, tokens_per_unit: Uint128 },
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Admin: list a new sale. Fails if `sale_id` is already taken.
    AddSale {
        sale_id: String,
        output: SaleOutputMsg,
        purchase_prices: Vec<TokenPriceMsg>,
        native_price: Option<Uint128>,
        supply_cap: u64,
        allowlist: AllowlistMode,
        #[serde(default)]
        active: bool,
        #[serde(default)]
        whitelisting_active: bool,
    },

    /// Admin: open or close a sale
    SetSaleActive { sale_id: String, active: bool },

    /// Admin: toggle allowlist enforcement for a sale
    SetWhitelistingActive { sale_id: String, active: bool },

    /// Admin: bulk add/remove addresses (explicit-set sales only)
    SetAllowlist {
        sale_id: String,
        addresses: Vec<String>,
        allowed: bool,
    },

    /// Admin: replace the merkle root (commitment sales only)
    SetMerkleRoot { sale_id: String, root: Binary },

    /// Admin: add or update the unit price of an accepted asset
    SetPurchasePrice {
        sale_id: String,
        asset: AssetInfo,
        price: Uint128,
    },

    /// Admin: stop accepting an asset
    RemovePurchaseAsset { sale_id: String, asset: AssetInfo },

    /// Admin: change the supply cap (may go below issued units)
    SetSupplyCap { sale_id: String, supply_cap: u64 },

    /// Admin: per-address unit limit for every sale
    SetAllowedUserBalance { limit: Option<u64> },

    /// Admin: change the withdrawal destination
    SetTreasury { treasury: String },

    /// Admin: gate withdrawals behind pause
    SetWithdrawRequiresPause { required: bool },

    /// Admin: make every purchase of a sale free
    SetFreeMint { sale_id: String, free_mint: bool },

    /// Admin: halt all purchases
    Pause {},

    /// Admin: resume purchases
    Unpause {},

    /// Buy `quantity` units (default 1) paying with `asset`.
    /// Native payments attach funds; CW20 payments need a prior allowance.
    Purchase {
        sale_id: String,
        asset: AssetInfo,
        quantity: Option<u64>,
        proof: Option<Vec<Binary>>,
    },

    /// Shorthand for `Purchase` with the native asset
    BuyWithNative {
        sale_id: String,
        quantity: Option<u64>,
        proof: Option<Vec<Binary>>,
    },

    /// Shorthand for `Purchase` with a CW20 asset
    BuyWithToken {
        sale_id: String,
        token: String,
        quantity: Option<u64>,
        proof: Option<Vec<Binary>>,
    },

    /// CW20 receive hook: pay by sending tokens with `ReceiveMsg::Purchase`.
    Receive(Cw20ReceiveMsg),

    /// Redeem claimable output tokens of a sale
    Claim { sale_id: String },

    /// Admin: send held CW20 payments to the treasury (None = everything held)
    WithdrawToken {
        token: String,
        amount: Option<Uint128>,
    },

    /// Admin: send held native payments to the treasury (None = everything held)
    WithdrawNative { amount: Option<Uint128> },

    /// Admin: send funds nobody is owed (stray transfers, unsold output
    /// tokens) to the treasury (None = the whole surplus)
    WithdrawSurplus {
        asset: AssetInfo,
        amount: Option<Uint128>,
    },

    /// Admin: hand the administrator role to another address
    TransferAdmin { new_admin: String },

    /// Admin: give up the administrator role for good
    RenounceAdmin {},
}

/// CW20 receive sub-message
#[cw_serde]
pub enum ReceiveMsg {
    Purchase {
        sale_id: String,
        quantity: Option<u64>,
        proof: Option<Vec<Binary>>,
    },
}

/// Execute interface of the NFT minter a sale issues through.
#[cw_serde]
pub enum MinterExecuteMsg {
    Mint { recipient: String },
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(SaleDetailsResponse)]
    SaleDetails { sale_id: String },

    #[returns(SalesResponse)]
    Sales {
        start_after: Option<String>,
        limit: Option<u32>,
    },

    /// Whether `address` passes the sale's allowlist. Commitment sales need `proof`.
    #[returns(AllowlistedResponse)]
    CheckAllowlisted {
        sale_id: String,
        address: String,
        proof: Option<Vec<Binary>>,
    },

    #[returns(PurchasedResponse)]
    Purchased { sale_id: String, address: String },

    #[returns(ClaimableResponse)]
    Claimable { sale_id: String, address: String },

    /// Payment balances held by the contract
    #[returns(HoldingsResponse)]
    Holdings {},

    /// Balance of `asset` beyond holdings and outstanding claims
    #[returns(SurplusResponse)]
    Surplus { asset: AssetInfo },
}

// ---- Response types ----

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Option<Addr>,
    pub treasury: Addr,
    pub native_denom: String,
    pub allowed_user_balance: Option<u64>,
    pub withdraw_requires_pause: bool,
    pub paused: bool,
}

#[cw_serde]
pub enum SaleStatus {
    Inactive,
    Active,
    SupplyExhausted,
}

#[cw_serde]
pub struct SaleDetailsResponse {
    pub sale_id: String,
    pub active: bool,
    pub whitelisting_active: bool,
    pub allowlist: AllowlistMode,
    /// CW20 assets in listing order, aligned with `purchase_prices`
    pub purchase_assets: Vec<Addr>,
    pub purchase_prices: Vec<Uint128>,
    pub native_price: Option<Uint128>,
    pub issued_count: u64,
    pub supply_cap: u64,
    pub output: SaleOutput,
    pub free_mint: bool,
    pub status: SaleStatus,
}

#[cw_serde]
pub struct SalesResponse {
    pub sales: Vec<SaleDetailsResponse>,
}

#[cw_serde]
pub struct AllowlistedResponse {
    pub allowlisted: bool,
}

#[cw_serde]
pub struct PurchasedResponse {
    pub units: u64,
}

#[cw_serde]
pub struct ClaimableResponse {
    pub amount: Uint128,
}

#[cw_serde]
pub struct HoldingResponse {
    /// `native:<denom>` or `cw20:<contract>`
    pub asset: String,
    pub amount: Uint128,
}

#[cw_serde]
pub struct HoldingsResponse {
    pub holdings: Vec<HoldingResponse>,
}

#[cw_serde]
pub struct SurplusResponse {
    pub asset: String,
    pub amount: Uint128,
}
