use cosmwasm_std::{Api, Deps, DepsMut, MessageInfo, Response, StdResult, Storage, Uint128};

use crate::error::ContractError;
use crate::execute::admin::load_as_admin;
use crate::msg::{AssetInfo, SaleOutputMsg, TokenPriceMsg};
use crate::payment::Asset;
use crate::state::{AllowlistMode, Sale, SaleOutput, TokenPrice, SALES};

pub fn load_sale(storage: &dyn Storage, sale_id: &str) -> Result<Sale, ContractError> {
    SALES
        .may_load(storage, sale_id)?
        .ok_or_else(|| ContractError::SaleNotFound {
            sale_id: sale_id.to_string(),
        })
}

fn ensure_price(price: Uint128) -> Result<(), ContractError> {
    if price.is_zero() {
        return Err(ContractError::InvalidPrice);
    }
    Ok(())
}

fn validate_output(api: &dyn Api, output: SaleOutputMsg) -> Result<SaleOutput, ContractError> {
    Ok(match output {
        SaleOutputMsg::Nft { minter } => SaleOutput::Nft {
            minter: api.addr_validate(&minter)?,
        },
        SaleOutputMsg::Claimable {
            token,
            tokens_per_unit,
        } => {
            if tokens_per_unit.is_zero() {
                return Err(ContractError::InvalidQuantity {
                    reason: "tokens_per_unit must be greater than zero".to_string(),
                });
            }
            SaleOutput::Claimable {
                token: api.addr_validate(&token)?,
                tokens_per_unit,
            }
        }
    })
}

#[allow(clippy::too_many_arguments)]
pub fn execute_add_sale(
    deps: DepsMut,
    info: MessageInfo,
    sale_id: String,
    output: SaleOutputMsg,
    purchase_prices: Vec<TokenPriceMsg>,
    native_price: Option<Uint128>,
    supply_cap: u64,
    allowlist: AllowlistMode,
    active: bool,
    whitelisting_active: bool,
) -> Result<Response, ContractError> {
    load_as_admin(deps.storage, &info.sender)?;

    if SALES.has(deps.storage, &sale_id) {
        return Err(ContractError::AlreadyListed { sale_id });
    }

    if let AllowlistMode::Commitment { root: Some(root) } = &allowlist {
        crate::execute::allowlist::ensure_root_len(root)?;
    }

    if let Some(price) = native_price {
        ensure_price(price)?;
    }

    // Later duplicates overwrite the earlier price but keep its position
    let mut prices: Vec<TokenPrice> = Vec::with_capacity(purchase_prices.len());
    for p in purchase_prices {
        ensure_price(p.price)?;
        let token = deps.api.addr_validate(&p.token)?;
        match prices.iter_mut().find(|existing| existing.token == token) {
            Some(existing) => existing.price = p.price,
            None => prices.push(TokenPrice {
                token,
                price: p.price,
            }),
        }
    }

    let sale = Sale {
        active,
        whitelisting_active,
        allowlist,
        purchase_prices: prices,
        native_price,
        supply_cap,
        issued_count: 0,
        output: validate_output(deps.api, output)?,
        free_mint: false,
    };
    SALES.save(deps.storage, &sale_id, &sale)?;

    Ok(Response::new()
        .add_attribute("action", "gated_sale.sale_added")
        .add_attribute("sale_id", sale_id)
        .add_attribute("supply_cap", supply_cap.to_string())
        .add_attribute("accepted_tokens", sale.purchase_prices.len().to_string())
        .add_attribute("active", sale.active.to_string()))
}

/// Loads the sale, applies `update`, saves it back. Callers check the admin first.
fn update_sale<F>(deps: DepsMut, sale_id: &str, update: F) -> Result<Sale, ContractError>
where
    F: FnOnce(&mut Sale) -> Result<(), ContractError>,
{
    let mut sale = load_sale(deps.storage, sale_id)?;
    update(&mut sale)?;
    SALES.save(deps.storage, sale_id, &sale)?;
    Ok(sale)
}

pub fn execute_set_sale_active(
    deps: DepsMut,
    info: MessageInfo,
    sale_id: String,
    active: bool,
) -> Result<Response, ContractError> {
    load_as_admin(deps.storage, &info.sender)?;
    update_sale(deps, &sale_id, |sale| {
        sale.active = active;
        Ok(())
    })?;

    Ok(Response::new()
        .add_attribute("action", "gated_sale.set_sale_active")
        .add_attribute("sale_id", sale_id)
        .add_attribute("active", active.to_string()))
}

pub fn execute_set_whitelisting_active(
    deps: DepsMut,
    info: MessageInfo,
    sale_id: String,
    active: bool,
) -> Result<Response, ContractError> {
    load_as_admin(deps.storage, &info.sender)?;
    update_sale(deps, &sale_id, |sale| {
        sale.whitelisting_active = active;
        Ok(())
    })?;

    Ok(Response::new()
        .add_attribute("action", "gated_sale.set_whitelisting_active")
        .add_attribute("sale_id", sale_id)
        .add_attribute("active", active.to_string()))
}

pub fn execute_set_free_mint(
    deps: DepsMut,
    info: MessageInfo,
    sale_id: String,
    free_mint: bool,
) -> Result<Response, ContractError> {
    load_as_admin(deps.storage, &info.sender)?;
    update_sale(deps, &sale_id, |sale| {
        sale.free_mint = free_mint;
        Ok(())
    })?;

    Ok(Response::new()
        .add_attribute("action", "gated_sale.set_free_mint")
        .add_attribute("sale_id", sale_id)
        .add_attribute("free_mint", free_mint.to_string()))
}

fn resolve_asset(deps: Deps, asset: &AssetInfo) -> StdResult<Asset> {
    let config = crate::state::CONFIG.load(deps.storage)?;
    Asset::resolve(deps.api, &config, asset)
}

pub fn execute_set_purchase_price(
    deps: DepsMut,
    info: MessageInfo,
    sale_id: String,
    asset: AssetInfo,
    price: Uint128,
) -> Result<Response, ContractError> {
    load_as_admin(deps.storage, &info.sender)?;
    ensure_price(price)?;
    let asset = resolve_asset(deps.as_ref(), &asset)?;
    let key = asset.key();

    update_sale(deps, &sale_id, |sale| {
        match asset {
            Asset::Native(_) => sale.native_price = Some(price),
            Asset::Cw20(token) => {
                match sale.purchase_prices.iter_mut().find(|p| p.token == token) {
                    Some(existing) => existing.price = price,
                    None => sale.purchase_prices.push(TokenPrice { token, price }),
                }
            }
        }
        Ok(())
    })?;

    Ok(Response::new()
        .add_attribute("action", "gated_sale.set_purchase_price")
        .add_attribute("sale_id", sale_id)
        .add_attribute("asset", key)
        .add_attribute("price", price.to_string()))
}

pub fn execute_remove_purchase_asset(
    deps: DepsMut,
    info: MessageInfo,
    sale_id: String,
    asset: AssetInfo,
) -> Result<Response, ContractError> {
    load_as_admin(deps.storage, &info.sender)?;
    let asset = resolve_asset(deps.as_ref(), &asset)?;
    let key = asset.key();

    update_sale(deps, &sale_id, |sale| {
        let listed = match &asset {
            Asset::Native(_) => sale.native_price.take().is_some(),
            Asset::Cw20(token) => {
                let before = sale.purchase_prices.len();
                sale.purchase_prices.retain(|p| &p.token != token);
                sale.purchase_prices.len() != before
            }
        };
        if !listed {
            return Err(ContractError::InvalidAsset { asset: asset.key() });
        }
        Ok(())
    })?;

    Ok(Response::new()
        .add_attribute("action", "gated_sale.remove_purchase_asset")
        .add_attribute("sale_id", sale_id)
        .add_attribute("asset", key))
}

pub fn execute_set_supply_cap(
    deps: DepsMut,
    info: MessageInfo,
    sale_id: String,
    supply_cap: u64,
) -> Result<Response, ContractError> {
    load_as_admin(deps.storage, &info.sender)?;
    // Lowering below issued_count is allowed; it only blocks further purchases
    let sale = update_sale(deps, &sale_id, |sale| {
        sale.supply_cap = supply_cap;
        Ok(())
    })?;

    Ok(Response::new()
        .add_attribute("action", "gated_sale.set_supply_cap")
        .add_attribute("sale_id", sale_id)
        .add_attribute("supply_cap", supply_cap.to_string())
        .add_attribute("issued_count", sale.issued_count.to_string()))
}
