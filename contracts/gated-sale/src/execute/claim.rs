use cosmwasm_std::{to_json_binary, CosmosMsg, DepsMut, MessageInfo, Response, WasmMsg};
use cw20::Cw20ExecuteMsg;

use crate::error::ContractError;
use crate::execute::sale::load_sale;
use crate::state::{SaleOutput, CLAIMABLE, OUTSTANDING_CLAIMS};

/// Pays out the caller's whole claimable balance of the sale's output token.
pub fn execute_claim(
    deps: DepsMut,
    info: MessageInfo,
    sale_id: String,
) -> Result<Response, ContractError> {
    let sale = load_sale(deps.storage, &sale_id)?;
    let SaleOutput::Claimable { token, .. } = sale.output else {
        return Err(ContractError::InvalidSaleOutput { sale_id });
    };

    let amount = CLAIMABLE
        .may_load(deps.storage, (&sale_id, &info.sender))?
        .unwrap_or_default();
    if amount.is_zero() {
        return Err(ContractError::NothingToClaim);
    }
    CLAIMABLE.remove(deps.storage, (&sale_id, &info.sender));
    let outstanding = OUTSTANDING_CLAIMS
        .may_load(deps.storage, &token)?
        .unwrap_or_default()
        .saturating_sub(amount);
    OUTSTANDING_CLAIMS.save(deps.storage, &token, &outstanding)?;

    let transfer_msg = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
            recipient: info.sender.to_string(),
            amount,
        })?,
        funds: vec![],
    });

    Ok(Response::new()
        .add_message(transfer_msg)
        .add_attribute("action", "gated_sale.claim")
        .add_attribute("sale_id", sale_id)
        .add_attribute("claimer", info.sender.to_string())
        .add_attribute("amount", amount.to_string()))
}
