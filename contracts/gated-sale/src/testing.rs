#[cfg(test)]
pub mod helpers {
    use cosmwasm_std::testing::{mock_dependencies, mock_env, mock_info, MockApi, MockQuerier, MockStorage};
    use cosmwasm_std::{
        from_json, to_json_binary, Binary, Coin, ContractResult, Env, OwnedDeps, Response,
        SystemError, SystemResult, Uint128, WasmQuery,
    };
    use cw20::{AllowanceResponse, BalanceResponse, Cw20QueryMsg, Expiration};

    use crate::contract::{execute, instantiate, query};
    use crate::error::ContractError;
    use crate::merkle::{hash_pair, leaf_hash, HASH_LEN};
    use crate::msg::*;
    use crate::state::AllowlistMode;

    pub type MockDeps = OwnedDeps<MockStorage, MockApi, MockQuerier>;

    pub const ADMIN: &str = "admin";
    pub const TREASURY: &str = "treasury";
    pub const NEW_TREASURY: &str = "new_treasury";
    pub const BUYER: &str = "buyer";
    pub const OTHER_BUYER: &str = "other_buyer";
    pub const RANDOM_USER: &str = "random_user";
    pub const USDT: &str = "usdt_token";
    pub const DAI: &str = "dai_token";
    pub const UNLISTED: &str = "unlisted_token";
    pub const MINTER: &str = "nft_minter";
    pub const SALE_TOKEN: &str = "sale_token";
    pub const DENOM: &str = "uaxm";

    pub const NFT_SALE: &str = "genesis";
    pub const TOKEN_SALE: &str = "seed_round";

    pub fn default_instantiate_msg() -> InstantiateMsg {
        InstantiateMsg {
            admin: None,
            treasury: TREASURY.to_string(),
            native_denom: DENOM.to_string(),
            allowed_user_balance: None,
            withdraw_requires_pause: false,
        }
    }

    pub fn setup_contract() -> (MockDeps, Env) {
        let mut deps = mock_dependencies();
        let env = mock_env();
        let info = mock_info(ADMIN, &[]);

        let res = instantiate(deps.as_mut(), env.clone(), info, default_instantiate_msg()).unwrap();
        assert_eq!(res.attributes.len(), 4);
        mock_allowance(&mut deps, 0);

        (deps, env)
    }

    /// NFT sale: 1 uaxm or 10 USDT or 20 DAI per mint, open, no allowlist.
    pub fn nft_sale_msg(supply_cap: u64) -> ExecuteMsg {
        ExecuteMsg::AddSale {
            sale_id: NFT_SALE.to_string(),
            output: SaleOutputMsg::Nft {
                minter: MINTER.to_string(),
            },
            purchase_prices: vec![
                TokenPriceMsg {
                    token: USDT.to_string(),
                    price: Uint128::new(10),
                },
                TokenPriceMsg {
                    token: DAI.to_string(),
                    price: Uint128::new(20),
                },
            ],
            native_price: Some(Uint128::new(1)),
            supply_cap,
            allowlist: AllowlistMode::ExplicitSet,
            active: true,
            whitelisting_active: false,
        }
    }

    /// Claimable token sale: 5 USDT per unit, 2 sale tokens per unit.
    pub fn token_sale_msg(supply_cap: u64, allowlist: AllowlistMode) -> ExecuteMsg {
        ExecuteMsg::AddSale {
            sale_id: TOKEN_SALE.to_string(),
            output: SaleOutputMsg::Claimable {
                token: SALE_TOKEN.to_string(),
                tokens_per_unit: Uint128::new(2),
            },
            purchase_prices: vec![TokenPriceMsg {
                token: USDT.to_string(),
                price: Uint128::new(5),
            }],
            native_price: None,
            supply_cap,
            allowlist,
            active: true,
            whitelisting_active: false,
        }
    }

    pub fn exec(
        deps: &mut MockDeps,
        env: &Env,
        sender: &str,
        funds: &[Coin],
        msg: ExecuteMsg,
    ) -> Result<Response, ContractError> {
        let info = mock_info(sender, funds);
        execute(deps.as_mut(), env.clone(), info, msg)
    }

    pub fn admin_exec(
        deps: &mut MockDeps,
        env: &Env,
        msg: ExecuteMsg,
    ) -> Result<Response, ContractError> {
        exec(deps, env, ADMIN, &[], msg)
    }

    pub fn buy_native(
        deps: &mut MockDeps,
        env: &Env,
        buyer: &str,
        sale_id: &str,
        funds: &[Coin],
        proof: Option<Vec<Binary>>,
    ) -> Result<Response, ContractError> {
        exec(
            deps,
            env,
            buyer,
            funds,
            ExecuteMsg::BuyWithNative {
                sale_id: sale_id.to_string(),
                quantity: None,
                proof,
            },
        )
    }

    pub fn buy_token(
        deps: &mut MockDeps,
        env: &Env,
        buyer: &str,
        sale_id: &str,
        token: &str,
        quantity: Option<u64>,
    ) -> Result<Response, ContractError> {
        exec(
            deps,
            env,
            buyer,
            &[],
            ExecuteMsg::BuyWithToken {
                sale_id: sale_id.to_string(),
                token: token.to_string(),
                quantity,
                proof: None,
            },
        )
    }

    /// Simulates a CW20 `Send` from `token` into the receive hook.
    pub fn send_token(
        deps: &mut MockDeps,
        env: &Env,
        token: &str,
        buyer: &str,
        amount: u128,
        sale_id: &str,
        quantity: Option<u64>,
    ) -> Result<Response, ContractError> {
        let cw20_msg = cw20::Cw20ReceiveMsg {
            sender: buyer.to_string(),
            amount: Uint128::new(amount),
            msg: to_json_binary(&ReceiveMsg::Purchase {
                sale_id: sale_id.to_string(),
                quantity,
                proof: None,
            })
            .unwrap(),
        };
        exec(deps, env, token, &[], ExecuteMsg::Receive(cw20_msg))
    }

    /// Every CW20 contract answers `allowance` to allowance queries and
    /// `balance` to balance queries.
    pub fn mock_cw20(deps: &mut MockDeps, allowance: u128, balance: u128) {
        deps.querier.update_wasm(move |query| match query {
            WasmQuery::Smart { msg, .. } => {
                let res = match from_json(msg) {
                    Ok(Cw20QueryMsg::Allowance { .. }) => to_json_binary(&AllowanceResponse {
                        allowance: Uint128::new(allowance),
                        expires: Expiration::Never {},
                    }),
                    Ok(Cw20QueryMsg::Balance { .. }) => to_json_binary(&BalanceResponse {
                        balance: Uint128::new(balance),
                    }),
                    _ => {
                        return SystemResult::Err(SystemError::UnsupportedRequest {
                            kind: "unexpected cw20 query".to_string(),
                        })
                    }
                };
                SystemResult::Ok(ContractResult::Ok(res.unwrap()))
            }
            _ => SystemResult::Err(SystemError::UnsupportedRequest {
                kind: "unexpected wasm query".to_string(),
            }),
        });
    }

    /// Allowance of `amount` on every token, output pools always funded.
    pub fn mock_allowance(deps: &mut MockDeps, amount: u128) {
        mock_cw20(deps, amount, u128::MAX);
    }

    pub fn query_config(deps: &MockDeps, env: &Env) -> ConfigResponse {
        let res = query(deps.as_ref(), env.clone(), QueryMsg::Config {}).unwrap();
        from_json(&res).unwrap()
    }

    pub fn query_sale(deps: &MockDeps, env: &Env, sale_id: &str) -> SaleDetailsResponse {
        let res = query(
            deps.as_ref(),
            env.clone(),
            QueryMsg::SaleDetails {
                sale_id: sale_id.to_string(),
            },
        )
        .unwrap();
        from_json(&res).unwrap()
    }

    pub fn query_purchased(deps: &MockDeps, env: &Env, sale_id: &str, address: &str) -> u64 {
        let res = query(
            deps.as_ref(),
            env.clone(),
            QueryMsg::Purchased {
                sale_id: sale_id.to_string(),
                address: address.to_string(),
            },
        )
        .unwrap();
        let purchased: PurchasedResponse = from_json(&res).unwrap();
        purchased.units
    }

    pub fn query_claimable(deps: &MockDeps, env: &Env, sale_id: &str, address: &str) -> Uint128 {
        let res = query(
            deps.as_ref(),
            env.clone(),
            QueryMsg::Claimable {
                sale_id: sale_id.to_string(),
                address: address.to_string(),
            },
        )
        .unwrap();
        let claimable: ClaimableResponse = from_json(&res).unwrap();
        claimable.amount
    }

    pub fn check_allowlisted(
        deps: &MockDeps,
        env: &Env,
        sale_id: &str,
        address: &str,
        proof: Option<Vec<Binary>>,
    ) -> bool {
        let res = query(
            deps.as_ref(),
            env.clone(),
            QueryMsg::CheckAllowlisted {
                sale_id: sale_id.to_string(),
                address: address.to_string(),
                proof,
            },
        )
        .unwrap();
        let allowlisted: AllowlistedResponse = from_json(&res).unwrap();
        allowlisted.allowlisted
    }

    /// Held balance for a `native:<denom>` / `cw20:<addr>` key (zero if absent)
    pub fn holding(deps: &MockDeps, env: &Env, key: &str) -> Uint128 {
        let res = query(deps.as_ref(), env.clone(), QueryMsg::Holdings {}).unwrap();
        let holdings: HoldingsResponse = from_json(&res).unwrap();
        holdings
            .holdings
            .into_iter()
            .find(|h| h.asset == key)
            .map(|h| h.amount)
            .unwrap_or_default()
    }

    pub fn query_surplus(deps: &MockDeps, env: &Env, asset: AssetInfo) -> Uint128 {
        let res = query(deps.as_ref(), env.clone(), QueryMsg::Surplus { asset }).unwrap();
        let surplus: SurplusResponse = from_json(&res).unwrap();
        surplus.amount
    }

    pub fn has_attr(res: &Response, key: &str, value: &str) -> bool {
        res.attributes.iter().any(|a| a.key == key && a.value == value)
    }

    /// Sorted-pair SHA-256 tree over address leaves; odd nodes are promoted.
    pub struct MerkleTree {
        layers: Vec<Vec<[u8; HASH_LEN]>>,
    }

    impl MerkleTree {
        pub fn new(addresses: &[&str]) -> Self {
            let mut layers = vec![addresses.iter().map(|a| leaf_hash(a)).collect::<Vec<_>>()];
            while layers.last().unwrap().len() > 1 {
                let next = layers
                    .last()
                    .unwrap()
                    .chunks(2)
                    .map(|pair| match pair {
                        [a, b] => hash_pair(a, b),
                        [a] => *a,
                        _ => unreachable!(),
                    })
                    .collect();
                layers.push(next);
            }
            Self { layers }
        }

        pub fn root(&self) -> Binary {
            Binary::from(self.layers.last().unwrap()[0].to_vec())
        }

        pub fn proof(&self, address: &str) -> Vec<Binary> {
            let leaf = leaf_hash(address);
            let mut index = self.layers[0]
                .iter()
                .position(|l| *l == leaf)
                .expect("address not in tree");
            let mut proof = vec![];
            for layer in &self.layers[..self.layers.len() - 1] {
                if let Some(sibling) = layer.get(index ^ 1) {
                    proof.push(Binary::from(sibling.to_vec()));
                }
                index /= 2;
            }
            proof
        }
    }
}
