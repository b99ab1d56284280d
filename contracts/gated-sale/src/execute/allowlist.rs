use cosmwasm_std::{Binary, DepsMut, MessageInfo, Response};

use crate::error::ContractError;
use crate::execute::admin::load_as_admin;
use crate::execute::sale::load_sale;
use crate::merkle::HASH_LEN;
use crate::state::{AllowlistMode, ALLOWLIST, SALES};

pub fn ensure_root_len(root: &Binary) -> Result<(), ContractError> {
    if root.len() != HASH_LEN {
        return Err(ContractError::InvalidMerkleRoot { len: root.len() });
    }
    Ok(())
}

pub fn execute_set_allowlist(
    deps: DepsMut,
    info: MessageInfo,
    sale_id: String,
    addresses: Vec<String>,
    allowed: bool,
) -> Result<Response, ContractError> {
    load_as_admin(deps.storage, &info.sender)?;
    let sale = load_sale(deps.storage, &sale_id)?;
    if sale.allowlist != AllowlistMode::ExplicitSet {
        return Err(ContractError::AllowlistModeMismatch { sale_id });
    }

    // Validate everything before writing anything
    let addrs = addresses
        .iter()
        .map(|a| deps.api.addr_validate(a))
        .collect::<Result<Vec<_>, _>>()?;

    for addr in &addrs {
        if allowed {
            ALLOWLIST.save(deps.storage, (&sale_id, addr), &true)?;
        } else {
            ALLOWLIST.remove(deps.storage, (&sale_id, addr));
        }
    }

    Ok(Response::new()
        .add_attribute("action", "gated_sale.set_allowlist")
        .add_attribute("sale_id", sale_id)
        .add_attribute("allowed", allowed.to_string())
        .add_attribute("count", addrs.len().to_string()))
}

pub fn execute_set_merkle_root(
    deps: DepsMut,
    info: MessageInfo,
    sale_id: String,
    root: Binary,
) -> Result<Response, ContractError> {
    load_as_admin(deps.storage, &info.sender)?;
    let mut sale = load_sale(deps.storage, &sale_id)?;
    if sale.allowlist == AllowlistMode::ExplicitSet {
        return Err(ContractError::AllowlistModeMismatch { sale_id });
    }
    ensure_root_len(&root)?;

    let root_hex = hex::encode(root.as_slice());
    sale.allowlist = AllowlistMode::Commitment { root: Some(root) };
    SALES.save(deps.storage, &sale_id, &sale)?;

    Ok(Response::new()
        .add_attribute("action", "gated_sale.set_merkle_root")
        .add_attribute("sale_id", sale_id)
        .add_attribute("root", root_hex))
}
