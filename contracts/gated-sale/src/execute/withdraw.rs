use cosmwasm_std::{
    to_json_binary, BankMsg, Coin, CosmosMsg, DepsMut, Env, MessageInfo, Response, StdResult,
    Uint128, WasmMsg,
};
use cw20::Cw20ExecuteMsg;

use crate::error::ContractError;
use crate::execute::admin::load_as_admin;
use crate::msg::AssetInfo;
use crate::payment::{debit_holding, held, surplus, Asset};
use crate::state::Config;

fn ensure_round_over(config: &Config) -> Result<(), ContractError> {
    if config.withdraw_requires_pause && !config.paused {
        return Err(ContractError::RoundNotOver);
    }
    Ok(())
}

fn transfer_to_treasury(config: &Config, asset: &Asset, amount: Uint128) -> StdResult<CosmosMsg> {
    Ok(match asset {
        Asset::Native(denom) => CosmosMsg::Bank(BankMsg::Send {
            to_address: config.treasury.to_string(),
            amount: vec![Coin {
                denom: denom.clone(),
                amount,
            }],
        }),
        Asset::Cw20(token) => CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: token.to_string(),
            msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
                recipient: config.treasury.to_string(),
                amount,
            })?,
            funds: vec![],
        }),
    })
}

/// Picks the amount to withdraw out of `available`. `None` takes everything.
fn withdrawal_amount(
    requested: Option<Uint128>,
    available: Uint128,
) -> Result<Uint128, ContractError> {
    let amount = requested.unwrap_or(available);
    if amount.is_zero() || amount > available {
        return Err(ContractError::InsufficientBalance {
            requested: amount.to_string(),
            held: available.to_string(),
        });
    }
    Ok(amount)
}

/// Debits the tracked holding and sends it to the treasury.
fn withdraw_holding(
    deps: DepsMut,
    config: &Config,
    asset: Asset,
    amount: Option<Uint128>,
) -> Result<Response, ContractError> {
    ensure_round_over(config)?;

    let amount = withdrawal_amount(amount, held(deps.storage, &asset)?)?;
    let remaining = debit_holding(deps.storage, &asset, amount)?;

    Ok(Response::new()
        .add_message(transfer_to_treasury(config, &asset, amount)?)
        .add_attribute("action", "gated_sale.withdraw")
        .add_attribute("asset", asset.key())
        .add_attribute("amount", amount.to_string())
        .add_attribute("treasury", config.treasury.to_string())
        .add_attribute("remaining", remaining.to_string()))
}

pub fn execute_withdraw_token(
    deps: DepsMut,
    info: MessageInfo,
    token: String,
    amount: Option<Uint128>,
) -> Result<Response, ContractError> {
    let config = load_as_admin(deps.storage, &info.sender)?;
    let token = deps.api.addr_validate(&token)?;
    withdraw_holding(deps, &config, Asset::Cw20(token), amount)
}

pub fn execute_withdraw_native(
    deps: DepsMut,
    info: MessageInfo,
    amount: Option<Uint128>,
) -> Result<Response, ContractError> {
    let config = load_as_admin(deps.storage, &info.sender)?;
    let asset = Asset::Native(config.native_denom.clone());
    withdraw_holding(deps, &config, asset, amount)
}

/// Sends funds nobody is owed to the treasury: coins or tokens that reached
/// the contract outside a purchase, and output tokens no claim reserves.
/// Holdings and outstanding claims are untouched, so the pause gate does not
/// apply.
pub fn execute_withdraw_surplus(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    asset: AssetInfo,
    amount: Option<Uint128>,
) -> Result<Response, ContractError> {
    let config = load_as_admin(deps.storage, &info.sender)?;
    let asset = Asset::resolve(deps.api, &config, &asset)?;

    let available = surplus(deps.as_ref(), &env.contract.address, &asset)?;
    let amount = withdrawal_amount(amount, available)?;

    Ok(Response::new()
        .add_message(transfer_to_treasury(&config, &asset, amount)?)
        .add_attribute("action", "gated_sale.withdraw_surplus")
        .add_attribute("asset", asset.key())
        .add_attribute("amount", amount.to_string())
        .add_attribute("treasury", config.treasury.to_string())
        .add_attribute("remaining", (available - amount).to_string()))
}
