use cosmwasm_std::{Addr, Binary, StdResult, Storage};

use crate::merkle;
use crate::state::{AllowlistMode, ALLOWLIST};

/// Membership check shared by purchases and the `CheckAllowlisted` query.
///
/// Explicit-set sales look up the stored flag and ignore `proof`.
/// Commitment sales verify `proof` against the stored root; a sale without a
/// root admits nobody.
pub fn is_member(
    storage: &dyn Storage,
    sale_id: &str,
    mode: &AllowlistMode,
    addr: &Addr,
    proof: Option<&[Binary]>,
) -> StdResult<bool> {
    match mode {
        AllowlistMode::ExplicitSet => Ok(ALLOWLIST
            .may_load(storage, (sale_id, addr))?
            .unwrap_or(false)),
        AllowlistMode::Commitment { root } => {
            let Some(root) = root else {
                return Ok(false);
            };
            let leaf = merkle::leaf_hash(addr.as_str());
            Ok(merkle::verify(&leaf, proof.unwrap_or_default(), root.as_slice()))
        }
    }
}
