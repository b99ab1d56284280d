use cosmwasm_std::{Addr, DepsMut, MessageInfo, Response, Storage};

use crate::error::ContractError;
use crate::state::{Config, CONFIG};

/// Every gated operation goes through here. A renounced contract has no admin,
/// so nobody passes.
pub fn ensure_admin(config: &Config, sender: &Addr) -> Result<(), ContractError> {
    match &config.admin {
        Some(admin) if admin == sender => Ok(()),
        _ => Err(ContractError::Unauthorized),
    }
}

pub fn load_as_admin(storage: &dyn Storage, sender: &Addr) -> Result<Config, ContractError> {
    let config = CONFIG.load(storage)?;
    ensure_admin(&config, sender)?;
    Ok(config)
}

pub fn execute_transfer_admin(
    deps: DepsMut,
    info: MessageInfo,
    new_admin: String,
) -> Result<Response, ContractError> {
    let mut config = load_as_admin(deps.storage, &info.sender)?;
    let new_admin = deps.api.addr_validate(&new_admin)?;

    config.admin = Some(new_admin.clone());
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "gated_sale.admin_transferred")
        .add_attribute("previous_admin", info.sender.to_string())
        .add_attribute("new_admin", new_admin.to_string()))
}

pub fn execute_renounce_admin(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let mut config = load_as_admin(deps.storage, &info.sender)?;

    config.admin = None;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "gated_sale.admin_renounced")
        .add_attribute("previous_admin", info.sender.to_string()))
}

pub fn execute_set_treasury(
    deps: DepsMut,
    info: MessageInfo,
    treasury: String,
) -> Result<Response, ContractError> {
    let mut config = load_as_admin(deps.storage, &info.sender)?;

    config.treasury = deps.api.addr_validate(&treasury)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "gated_sale.set_treasury")
        .add_attribute("treasury", config.treasury.to_string()))
}

pub fn execute_set_allowed_user_balance(
    deps: DepsMut,
    info: MessageInfo,
    limit: Option<u64>,
) -> Result<Response, ContractError> {
    let mut config = load_as_admin(deps.storage, &info.sender)?;

    config.allowed_user_balance = limit;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "gated_sale.set_allowed_user_balance")
        .add_attribute(
            "limit",
            limit.map_or_else(|| "none".to_string(), |l| l.to_string()),
        ))
}

pub fn execute_set_withdraw_requires_pause(
    deps: DepsMut,
    info: MessageInfo,
    required: bool,
) -> Result<Response, ContractError> {
    let mut config = load_as_admin(deps.storage, &info.sender)?;

    config.withdraw_requires_pause = required;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "gated_sale.set_withdraw_requires_pause")
        .add_attribute("required", required.to_string()))
}

pub fn execute_set_paused(
    deps: DepsMut,
    info: MessageInfo,
    paused: bool,
) -> Result<Response, ContractError> {
    let mut config = load_as_admin(deps.storage, &info.sender)?;

    config.paused = paused;
    CONFIG.save(deps.storage, &config)?;

    let action = if paused {
        "gated_sale.paused"
    } else {
        "gated_sale.unpaused"
    };
    Ok(Response::new().add_attribute("action", action))
}
