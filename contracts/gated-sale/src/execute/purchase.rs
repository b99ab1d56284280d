use cosmwasm_std::{
    from_json, to_json_binary, Addr, Api, Binary, CosmosMsg, DepsMut, Env, MessageInfo,
    Response, SubMsg, Uint128, WasmMsg,
};
use cw20::{AllowanceResponse, Cw20ExecuteMsg, Cw20QueryMsg, Cw20ReceiveMsg};

use crate::allowlist::is_member;
use crate::error::ContractError;
use crate::execute::sale::load_sale;
use crate::msg::{AssetInfo, MinterExecuteMsg, ReceiveMsg};
use crate::payment::{
    credit_holding, ensure_exact, held, outstanding_claims, queried_balance, required_payment,
    Asset,
};
use crate::state::{
    Config, Sale, SaleOutput, CLAIMABLE, CONFIG, OUTSTANDING_CLAIMS, PURCHASED, SALES,
};

/// Reply id of the CW20 `TransferFrom` that collects an allowance payment.
pub const TRANSFER_FROM_REPLY_ID: u64 = 1;

/// Where the payment comes from. Resolved only once the pause, sale and
/// allowlist checks have passed.
enum PaymentSource {
    /// `Purchase` and `BuyWith*`: the named asset plus any attached funds
    Direct { asset: AssetInfo, info: MessageInfo },
    /// CW20 receive hook: `amount` of `token` already sent to the contract
    Received { token: Addr, amount: Uint128 },
}

/// How the buyer pays for a purchase.
enum Funding {
    /// Native coins attached to the message
    Attached(Uint128),
    /// CW20 pulled with `TransferFrom` against the buyer's allowance
    Allowance,
    /// CW20 already sent to the contract through the receive hook
    Received(Uint128),
}

struct PurchaseRequest {
    buyer: Addr,
    sale_id: String,
    quantity: Option<u64>,
    proof: Option<Vec<Binary>>,
    source: PaymentSource,
}

/// Entry for `Purchase`, `BuyWithNative` and `BuyWithToken`.
pub fn execute_purchase(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    sale_id: String,
    asset: AssetInfo,
    quantity: Option<u64>,
    proof: Option<Vec<Binary>>,
) -> Result<Response, ContractError> {
    settle(
        deps,
        env,
        PurchaseRequest {
            buyer: info.sender.clone(),
            sale_id,
            quantity,
            proof,
            source: PaymentSource::Direct { asset, info },
        },
    )
}

/// CW20 receive hook: the sending token is the payment asset, the hook's
/// `sender` is the buyer.
pub fn execute_receive(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    cw20_msg: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    let msg: ReceiveMsg = from_json(&cw20_msg.msg)?;
    let ReceiveMsg::Purchase {
        sale_id,
        quantity,
        proof,
    } = msg;
    let buyer = deps.api.addr_validate(&cw20_msg.sender)?;

    settle(
        deps,
        env,
        PurchaseRequest {
            buyer,
            sale_id,
            quantity,
            proof,
            source: PaymentSource::Received {
                token: info.sender,
                amount: cw20_msg.amount,
            },
        },
    )
}

fn resolve_payment(
    api: &dyn Api,
    config: &Config,
    source: PaymentSource,
) -> Result<(Asset, Funding), ContractError> {
    match source {
        PaymentSource::Received { token, amount } => {
            Ok((Asset::Cw20(token), Funding::Received(amount)))
        }
        PaymentSource::Direct { asset, info } => {
            let asset = Asset::resolve(api, config, &asset)?;
            let funding = match &asset {
                // Foreign or mixed denoms are not an accepted asset
                Asset::Native(denom) => Funding::Attached(
                    cw_utils::may_pay(&info, denom)
                        .map_err(|_| ContractError::InvalidAsset { asset: asset.key() })?,
                ),
                Asset::Cw20(_) => {
                    cw_utils::nonpayable(&info)?;
                    Funding::Allowance
                }
            };
            Ok((asset, funding))
        }
    }
}

fn units(sale: &Sale, quantity: Option<u64>) -> Result<u64, ContractError> {
    let quantity = quantity.unwrap_or(1);
    if quantity == 0 {
        return Err(ContractError::InvalidQuantity {
            reason: "quantity must be at least 1".to_string(),
        });
    }
    if matches!(sale.output, SaleOutput::Nft { .. }) && quantity != 1 {
        return Err(ContractError::InvalidQuantity {
            reason: "NFT sales issue exactly one unit per purchase".to_string(),
        });
    }
    Ok(quantity)
}

/// Runs every purchase check, then commits: supply, purchase record,
/// holdings and issuance. Nothing is written unless all checks pass.
fn settle(deps: DepsMut, env: Env, req: PurchaseRequest) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut sale = load_sale(deps.storage, &req.sale_id)?;

    if config.paused {
        return Err(ContractError::ContractPaused);
    }
    if !sale.active {
        return Err(ContractError::SaleInactive {
            sale_id: req.sale_id,
        });
    }

    if sale.whitelisting_active
        && !is_member(
            deps.storage,
            &req.sale_id,
            &sale.allowlist,
            &req.buyer,
            req.proof.as_deref(),
        )?
    {
        return Err(ContractError::Unauthorized);
    }

    let (asset, funding) = resolve_payment(deps.api, &config, req.source)?;
    let quantity = units(&sale, req.quantity)?;
    let payment = required_payment(&sale, &asset, quantity)?;

    let mut messages: Vec<SubMsg> = vec![];
    match (&funding, &asset) {
        (Funding::Attached(received), _) | (Funding::Received(received), _) => {
            ensure_exact(payment, *received)?;
        }
        // Free mint: nothing to pull
        (Funding::Allowance, _) if payment.is_zero() => {}
        (Funding::Allowance, Asset::Cw20(token)) => {
            let allowance: AllowanceResponse = deps.querier.query_wasm_smart(
                token.to_string(),
                &Cw20QueryMsg::Allowance {
                    owner: req.buyer.to_string(),
                    spender: env.contract.address.to_string(),
                },
            )?;
            if allowance.allowance < payment {
                return Err(ContractError::InsufficientAllowance {
                    need: payment.to_string(),
                    have: allowance.allowance.to_string(),
                });
            }
            let transfer_from = CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr: token.to_string(),
                msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
                    owner: req.buyer.to_string(),
                    recipient: env.contract.address.to_string(),
                    amount: payment,
                })?,
                funds: vec![],
            });
            messages.push(SubMsg::reply_on_error(transfer_from, TRANSFER_FROM_REPLY_ID));
        }
        (Funding::Allowance, Asset::Native(_)) => {
            return Err(ContractError::InvalidAsset { asset: asset.key() });
        }
    }

    let issued = sale
        .issued_count
        .checked_add(quantity)
        .filter(|issued| *issued <= sale.supply_cap)
        .ok_or(ContractError::SupplyExhausted {
            cap: sale.supply_cap,
            issued: sale.issued_count,
        })?;

    let bought = PURCHASED
        .may_load(deps.storage, (&req.sale_id, &req.buyer))?
        .unwrap_or(0);
    let bought = bought.saturating_add(quantity);
    if let Some(max) = config.allowed_user_balance {
        if bought > max {
            return Err(ContractError::LimitExceeded {
                max: max.to_string(),
            });
        }
    }

    let claim = match &sale.output {
        SaleOutput::Nft { .. } => None,
        SaleOutput::Claimable {
            token,
            tokens_per_unit,
        } => {
            let credit = tokens_per_unit.checked_mul(Uint128::from(quantity))?;
            let output = Asset::Cw20(token.clone());
            let reserved = outstanding_claims(deps.storage, &output)?.checked_add(credit)?;

            // Tokens received with this very purchase are payment, not pool
            let incoming = match (&funding, &asset) {
                (Funding::Received(_), paid) if *paid == output => payment,
                _ => Uint128::zero(),
            };
            let available = queried_balance(&deps.querier, &env.contract.address, &output)?
                .saturating_sub(held(deps.storage, &output)?)
                .saturating_sub(incoming);
            if available < reserved {
                return Err(ContractError::InsufficientPool {
                    available: available.to_string(),
                    required: reserved.to_string(),
                });
            }
            Some((token.clone(), credit, reserved))
        }
    };

    // ---- commit ----
    sale.issued_count = issued;
    SALES.save(deps.storage, &req.sale_id, &sale)?;
    PURCHASED.save(deps.storage, (&req.sale_id, &req.buyer), &bought)?;
    let holding = if payment.is_zero() {
        held(deps.storage, &asset)?
    } else {
        credit_holding(deps.storage, &asset, payment)?
    };

    let mut response = Response::new();
    if let SaleOutput::Nft { minter } = &sale.output {
        messages.push(SubMsg::new(WasmMsg::Execute {
            contract_addr: minter.to_string(),
            msg: to_json_binary(&MinterExecuteMsg::Mint {
                recipient: req.buyer.to_string(),
            })?,
            funds: vec![],
        }));
    }
    if let Some((token, credit, reserved)) = claim {
        let claimable = CLAIMABLE
            .may_load(deps.storage, (&req.sale_id, &req.buyer))?
            .unwrap_or_default()
            .checked_add(credit)?;
        CLAIMABLE.save(deps.storage, (&req.sale_id, &req.buyer), &claimable)?;
        OUTSTANDING_CLAIMS.save(deps.storage, &token, &reserved)?;
        response = response.add_attribute("claimable", claimable.to_string());
    }

    Ok(response
        .add_submessages(messages)
        .add_attribute("action", "gated_sale.purchase")
        .add_attribute("sale_id", req.sale_id)
        .add_attribute("buyer", req.buyer.to_string())
        .add_attribute("asset", asset.key())
        .add_attribute("quantity", quantity.to_string())
        .add_attribute("paid", payment.to_string())
        .add_attribute("held", holding.to_string())
        .add_attribute("issued_count", issued.to_string()))
}
