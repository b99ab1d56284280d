use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, Uint128};
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct Config {
    /// None once the administrator role has been renounced.
    pub admin: Option<Addr>,
    /// Receives every withdrawal.
    pub treasury: Addr,
    /// Denom accepted as the native payment asset.
    pub native_denom: String,
    /// Max units a single address may buy per sale (None = no limit)
    pub allowed_user_balance: Option<u64>,
    /// Withdrawals are only allowed while paused.
    pub withdraw_requires_pause: bool,
    pub paused: bool,
}

/// Membership mechanism, fixed when the sale is added.
#[cw_serde]
pub enum AllowlistMode {
    /// Per-address flags set by the administrator.
    ExplicitSet,
    /// Merkle root over SHA-256(address) leaves; buyers supply a proof.
    Commitment { root: Option<Binary> },
}

#[cw_serde]
pub enum SaleOutput {
    /// Each unit mints one NFT through the minter contract.
    Nft { minter: Addr },
    /// Each unit credits `tokens_per_unit` of a CW20, redeemed with Claim.
    Claimable { token: Addr, tokens_per_unit: Uint128 },
}

#[cw_serde]
pub struct TokenPrice {
    pub token: Addr,
    pub price: Uint128,
}

#[cw_serde]
pub struct Sale {
    pub active: bool,
    pub whitelisting_active: bool,
    pub allowlist: AllowlistMode,
    /// Accepted CW20 assets in listing order.
    pub purchase_prices: Vec<TokenPrice>,
    pub native_price: Option<Uint128>,
    pub supply_cap: u64,
    pub issued_count: u64,
    pub output: SaleOutput,
    /// Purchases cost nothing; cap, allowlist and limit still apply.
    #[serde(default)]
    pub free_mint: bool,
}

impl Sale {
    pub fn token_price(&self, token: &Addr) -> Option<Uint128> {
        self.purchase_prices
            .iter()
            .find(|p| &p.token == token)
            .map(|p| p.price)
    }

    pub fn remaining_supply(&self) -> u64 {
        self.supply_cap.saturating_sub(self.issued_count)
    }
}

// ---- Storage keys ----

pub const CONFIG: Item<Config> = Item::new("config");
pub const SALES: Map<&str, Sale> = Map::new("sales");

/// Explicit allowlist: (sale_id, address) -> member
pub const ALLOWLIST: Map<(&str, &Addr), bool> = Map::new("allowlist");

/// Cumulative units bought: (sale_id, address) -> units
pub const PURCHASED: Map<(&str, &Addr), u64> = Map::new("purchased");

/// Output tokens awaiting claim: (sale_id, address) -> amount
pub const CLAIMABLE: Map<(&str, &Addr), Uint128> = Map::new("claimable");

/// Claimable balance not yet claimed, summed per output token
pub const OUTSTANDING_CLAIMS: Map<&Addr, Uint128> = Map::new("outstanding_claims");

/// Payment balances custodied by the contract, keyed by `Asset::key`.
pub const HOLDINGS: Map<&str, Uint128> = Map::new("holdings");
