use cosmwasm_std::{Addr, Api, Deps, QuerierWrapper, StdResult, Storage, Uint128};
use cw20::{BalanceResponse, Cw20QueryMsg};

use crate::error::ContractError;
use crate::msg::AssetInfo;
use crate::state::{Config, Sale, HOLDINGS, OUTSTANDING_CLAIMS};

/// Payment asset with a validated contract address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Asset {
    Native(String),
    Cw20(Addr),
}

impl Asset {
    pub fn resolve(api: &dyn Api, config: &Config, info: &AssetInfo) -> StdResult<Self> {
        Ok(match info {
            AssetInfo::Native {} => Asset::Native(config.native_denom.clone()),
            AssetInfo::Cw20 { contract_addr } => Asset::Cw20(api.addr_validate(contract_addr)?),
        })
    }

    /// Storage key of the asset in `HOLDINGS`.
    pub fn key(&self) -> String {
        match self {
            Asset::Native(denom) => format!("native:{}", denom),
            Asset::Cw20(addr) => format!("cw20:{}", addr),
        }
    }
}

/// Configured unit price of `asset`, or `InvalidAsset`.
pub fn unit_price(sale: &Sale, asset: &Asset) -> Result<Uint128, ContractError> {
    let price = match asset {
        Asset::Native(_) => sale.native_price,
        Asset::Cw20(token) => sale.token_price(token),
    };
    price.ok_or_else(|| ContractError::InvalidAsset { asset: asset.key() })
}

/// Amount owed for `quantity` units of `asset`. Free-mint sales owe nothing
/// and accept any asset.
pub fn required_payment(
    sale: &Sale,
    asset: &Asset,
    quantity: u64,
) -> Result<Uint128, ContractError> {
    if sale.free_mint {
        return Ok(Uint128::zero());
    }
    let price = unit_price(sale, asset)?;
    Ok(price.checked_mul(Uint128::from(quantity))?)
}

/// Payments must match the required amount exactly; over- and under-payment
/// both fail.
pub fn ensure_exact(required: Uint128, received: Uint128) -> Result<(), ContractError> {
    if required != received {
        return Err(ContractError::IncorrectAmount {
            expected: required.to_string(),
            received: received.to_string(),
        });
    }
    Ok(())
}

pub fn held(storage: &dyn Storage, asset: &Asset) -> StdResult<Uint128> {
    Ok(HOLDINGS
        .may_load(storage, &asset.key())?
        .unwrap_or_default())
}

pub fn credit_holding(
    storage: &mut dyn Storage,
    asset: &Asset,
    amount: Uint128,
) -> Result<Uint128, ContractError> {
    let balance = held(storage, asset)?.checked_add(amount)?;
    HOLDINGS.save(storage, &asset.key(), &balance)?;
    Ok(balance)
}

/// Removes `amount` from the held balance; `InsufficientBalance` if it would
/// go negative.
pub fn debit_holding(
    storage: &mut dyn Storage,
    asset: &Asset,
    amount: Uint128,
) -> Result<Uint128, ContractError> {
    let current = held(storage, asset)?;
    let balance = current
        .checked_sub(amount)
        .map_err(|_| ContractError::InsufficientBalance {
            requested: amount.to_string(),
            held: current.to_string(),
        })?;
    HOLDINGS.save(storage, &asset.key(), &balance)?;
    Ok(balance)
}

/// Balance of `asset` owned by `contract`, as reported by the bank module or
/// the token contract.
pub fn queried_balance(
    querier: &QuerierWrapper,
    contract: &Addr,
    asset: &Asset,
) -> StdResult<Uint128> {
    match asset {
        Asset::Native(denom) => Ok(querier.query_balance(contract, denom)?.amount),
        Asset::Cw20(token) => {
            let res: BalanceResponse = querier.query_wasm_smart(
                token,
                &Cw20QueryMsg::Balance {
                    address: contract.to_string(),
                },
            )?;
            Ok(res.balance)
        }
    }
}

pub fn outstanding_claims(storage: &dyn Storage, asset: &Asset) -> StdResult<Uint128> {
    match asset {
        Asset::Native(_) => Ok(Uint128::zero()),
        Asset::Cw20(token) => Ok(OUTSTANDING_CLAIMS
            .may_load(storage, token)?
            .unwrap_or_default()),
    }
}

/// Part of the contract's balance nobody is owed: neither tracked as a
/// payment holding nor reserved for claims.
pub fn surplus(deps: Deps, contract: &Addr, asset: &Asset) -> StdResult<Uint128> {
    let balance = queried_balance(&deps.querier, contract, asset)?;
    let owed = held(deps.storage, asset)?.checked_add(outstanding_claims(deps.storage, asset)?)?;
    Ok(balance.saturating_sub(owed))
}
