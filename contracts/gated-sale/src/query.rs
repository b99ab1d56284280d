use cosmwasm_std::{Binary, Deps, Env, Order, StdResult};
use cw_storage_plus::Bound;

use crate::allowlist::is_member;
use crate::msg::{
    AllowlistedResponse, AssetInfo, ClaimableResponse, ConfigResponse, HoldingResponse,
    HoldingsResponse, PurchasedResponse, SaleDetailsResponse, SaleStatus, SalesResponse,
    SurplusResponse,
};
use crate::payment::{surplus, Asset};
use crate::state::{Sale, CLAIMABLE, CONFIG, HOLDINGS, PURCHASED, SALES};

const DEFAULT_LIMIT: u32 = 20;
const MAX_LIMIT: u32 = 100;

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        treasury: config.treasury,
        native_denom: config.native_denom,
        allowed_user_balance: config.allowed_user_balance,
        withdraw_requires_pause: config.withdraw_requires_pause,
        paused: config.paused,
    })
}

pub fn query_sale_details(deps: Deps, sale_id: String) -> StdResult<SaleDetailsResponse> {
    let sale = SALES.load(deps.storage, &sale_id)?;
    Ok(sale_to_response(sale_id, sale))
}

pub fn query_sales(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<SalesResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.as_deref().map(Bound::exclusive);

    let sales = SALES
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(sale_id, sale)| sale_to_response(sale_id, sale)))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(SalesResponse { sales })
}

pub fn query_check_allowlisted(
    deps: Deps,
    sale_id: String,
    address: String,
    proof: Option<Vec<Binary>>,
) -> StdResult<AllowlistedResponse> {
    let addr = deps.api.addr_validate(&address)?;
    let sale = SALES.load(deps.storage, &sale_id)?;
    let allowlisted = is_member(
        deps.storage,
        &sale_id,
        &sale.allowlist,
        &addr,
        proof.as_deref(),
    )?;
    Ok(AllowlistedResponse { allowlisted })
}

pub fn query_purchased(deps: Deps, sale_id: String, address: String) -> StdResult<PurchasedResponse> {
    let addr = deps.api.addr_validate(&address)?;
    let units = PURCHASED
        .may_load(deps.storage, (&sale_id, &addr))?
        .unwrap_or(0);
    Ok(PurchasedResponse { units })
}

pub fn query_claimable(deps: Deps, sale_id: String, address: String) -> StdResult<ClaimableResponse> {
    let addr = deps.api.addr_validate(&address)?;
    let amount = CLAIMABLE
        .may_load(deps.storage, (&sale_id, &addr))?
        .unwrap_or_default();
    Ok(ClaimableResponse { amount })
}

pub fn query_holdings(deps: Deps) -> StdResult<HoldingsResponse> {
    let holdings = HOLDINGS
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| item.map(|(asset, amount)| HoldingResponse { asset, amount }))
        .collect::<StdResult<Vec<_>>>()?;
    Ok(HoldingsResponse { holdings })
}

pub fn query_surplus(deps: Deps, env: Env, asset: AssetInfo) -> StdResult<SurplusResponse> {
    let config = CONFIG.load(deps.storage)?;
    let asset = Asset::resolve(deps.api, &config, &asset)?;
    let amount = surplus(deps, &env.contract.address, &asset)?;
    Ok(SurplusResponse {
        asset: asset.key(),
        amount,
    })
}

fn sale_to_response(sale_id: String, sale: Sale) -> SaleDetailsResponse {
    let status = if sale.remaining_supply() == 0 {
        SaleStatus::SupplyExhausted
    } else if sale.active {
        SaleStatus::Active
    } else {
        SaleStatus::Inactive
    };
    let (purchase_assets, purchase_prices) = sale
        .purchase_prices
        .into_iter()
        .map(|p| (p.token, p.price))
        .unzip();

    SaleDetailsResponse {
        sale_id,
        active: sale.active,
        whitelisting_active: sale.whitelisting_active,
        allowlist: sale.allowlist,
        purchase_assets,
        purchase_prices,
        native_price: sale.native_price,
        issued_count: sale.issued_count,
        supply_cap: sale.supply_cap,
        output: sale.output,
        free_mint: sale.free_mint,
        status,
    }
}
