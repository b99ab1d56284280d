use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdError, StdResult, SubMsgResult,
};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::execute::{admin, allowlist, claim, purchase, sale, withdraw};
use crate::msg::{AssetInfo, ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::state::{Config, CONFIG};

const CONTRACT_NAME: &str = "crates.io:gated-sale";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let admin = match msg.admin {
        Some(admin) => deps.api.addr_validate(&admin)?,
        None => info.sender,
    };

    let config = Config {
        admin: Some(admin.clone()),
        treasury: deps.api.addr_validate(&msg.treasury)?,
        native_denom: msg.native_denom,
        allowed_user_balance: msg.allowed_user_balance,
        withdraw_requires_pause: msg.withdraw_requires_pause,
        paused: false,
    };

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("admin", admin.to_string())
        .add_attribute("treasury", config.treasury.to_string())
        .add_attribute("native_denom", config.native_denom))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::AddSale {
            sale_id,
            output,
            purchase_prices,
            native_price,
            supply_cap,
            allowlist,
            active,
            whitelisting_active,
        } => sale::execute_add_sale(
            deps,
            info,
            sale_id,
            output,
            purchase_prices,
            native_price,
            supply_cap,
            allowlist,
            active,
            whitelisting_active,
        ),
        ExecuteMsg::SetSaleActive { sale_id, active } => {
            sale::execute_set_sale_active(deps, info, sale_id, active)
        }
        ExecuteMsg::SetWhitelistingActive { sale_id, active } => {
            sale::execute_set_whitelisting_active(deps, info, sale_id, active)
        }
        ExecuteMsg::SetAllowlist {
            sale_id,
            addresses,
            allowed,
        } => allowlist::execute_set_allowlist(deps, info, sale_id, addresses, allowed),
        ExecuteMsg::SetMerkleRoot { sale_id, root } => {
            allowlist::execute_set_merkle_root(deps, info, sale_id, root)
        }
        ExecuteMsg::SetPurchasePrice {
            sale_id,
            asset,
            price,
        } => sale::execute_set_purchase_price(deps, info, sale_id, asset, price),
        ExecuteMsg::RemovePurchaseAsset { sale_id, asset } => {
            sale::execute_remove_purchase_asset(deps, info, sale_id, asset)
        }
        ExecuteMsg::SetSupplyCap {
            sale_id,
            supply_cap,
        } => sale::execute_set_supply_cap(deps, info, sale_id, supply_cap),
        ExecuteMsg::SetAllowedUserBalance { limit } => {
            admin::execute_set_allowed_user_balance(deps, info, limit)
        }
        ExecuteMsg::SetTreasury { treasury } => admin::execute_set_treasury(deps, info, treasury),
        ExecuteMsg::SetWithdrawRequiresPause { required } => {
            admin::execute_set_withdraw_requires_pause(deps, info, required)
        }
        ExecuteMsg::SetFreeMint { sale_id, free_mint } => {
            sale::execute_set_free_mint(deps, info, sale_id, free_mint)
        }
        ExecuteMsg::Pause {} => admin::execute_set_paused(deps, info, true),
        ExecuteMsg::Unpause {} => admin::execute_set_paused(deps, info, false),
        ExecuteMsg::Purchase {
            sale_id,
            asset,
            quantity,
            proof,
        } => purchase::execute_purchase(deps, env, info, sale_id, asset, quantity, proof),
        ExecuteMsg::BuyWithNative {
            sale_id,
            quantity,
            proof,
        } => purchase::execute_purchase(
            deps,
            env,
            info,
            sale_id,
            AssetInfo::Native {},
            quantity,
            proof,
        ),
        ExecuteMsg::BuyWithToken {
            sale_id,
            token,
            quantity,
            proof,
        } => purchase::execute_purchase(
            deps,
            env,
            info,
            sale_id,
            AssetInfo::Cw20 {
                contract_addr: token,
            },
            quantity,
            proof,
        ),
        ExecuteMsg::Receive(cw20_msg) => purchase::execute_receive(deps, env, info, cw20_msg),
        ExecuteMsg::Claim { sale_id } => claim::execute_claim(deps, info, sale_id),
        ExecuteMsg::WithdrawToken { token, amount } => {
            withdraw::execute_withdraw_token(deps, info, token, amount)
        }
        ExecuteMsg::WithdrawNative { amount } => {
            withdraw::execute_withdraw_native(deps, info, amount)
        }
        ExecuteMsg::WithdrawSurplus { asset, amount } => {
            withdraw::execute_withdraw_surplus(deps, env, info, asset, amount)
        }
        ExecuteMsg::TransferAdmin { new_admin } => {
            admin::execute_transfer_admin(deps, info, new_admin)
        }
        ExecuteMsg::RenounceAdmin {} => admin::execute_renounce_admin(deps, info),
    }
}

/// Turns a failed allowance pull into `TransferFailed`, reverting the purchase.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(_deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match (msg.id, msg.result) {
        (purchase::TRANSFER_FROM_REPLY_ID, SubMsgResult::Err(reason)) => {
            Err(ContractError::TransferFailed { reason })
        }
        (purchase::TRANSFER_FROM_REPLY_ID, SubMsgResult::Ok(_)) => Ok(Response::new()),
        (id, _) => Err(StdError::generic_err(format!("unknown reply id: {}", id)).into()),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let previous = get_contract_version(deps.storage)?;
    if previous.contract != CONTRACT_NAME {
        return Err(ContractError::InvalidMigration {
            previous: previous.contract,
        });
    }
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("from_version", previous.version)
        .add_attribute("to_version", CONTRACT_VERSION))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&crate::query::query_config(deps)?),
        QueryMsg::SaleDetails { sale_id } => {
            to_json_binary(&crate::query::query_sale_details(deps, sale_id)?)
        }
        QueryMsg::Sales { start_after, limit } => {
            to_json_binary(&crate::query::query_sales(deps, start_after, limit)?)
        }
        QueryMsg::CheckAllowlisted {
            sale_id,
            address,
            proof,
        } => to_json_binary(&crate::query::query_check_allowlisted(
            deps, sale_id, address, proof,
        )?),
        QueryMsg::Purchased { sale_id, address } => {
            to_json_binary(&crate::query::query_purchased(deps, sale_id, address)?)
        }
        QueryMsg::Claimable { sale_id, address } => {
            to_json_binary(&crate::query::query_claimable(deps, sale_id, address)?)
        }
        QueryMsg::Holdings {} => to_json_binary(&crate::query::query_holdings(deps)?),
        QueryMsg::Surplus { asset } => {
            to_json_binary(&crate::query::query_surplus(deps, env, asset)?)
        }
    }
}
