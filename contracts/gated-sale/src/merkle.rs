use cosmwasm_std::Binary;
use sha2::{Digest, Sha256};

pub const HASH_LEN: usize = 32;

/// Leaf of an address in the allowlist tree: SHA256(address).
pub fn leaf_hash(address: &str) -> [u8; HASH_LEN] {
    Sha256::digest(address.as_bytes()).into()
}

/// Parent of two nodes. Pairs are sorted before hashing, so proofs carry no
/// left/right flags.
pub fn hash_pair(a: &[u8], b: &[u8]) -> [u8; HASH_LEN] {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    let mut hasher = Sha256::new();
    hasher.update(first);
    hasher.update(second);
    hasher.finalize().into()
}

/// Folds `proof` onto `leaf` and compares the result with `root`.
/// Any proof node that is not a 32-byte hash fails verification.
pub fn verify(leaf: &[u8; HASH_LEN], proof: &[Binary], root: &[u8]) -> bool {
    let mut computed = *leaf;
    for node in proof {
        if node.len() != HASH_LEN {
            return false;
        }
        computed = hash_pair(&computed, node.as_slice());
    }
    computed.as_slice() == root
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_leaf_tree_needs_empty_proof() {
        let leaf = leaf_hash("alice");
        assert!(verify(&leaf, &[], &leaf));
        assert!(!verify(&leaf_hash("bob"), &[], &leaf));
    }

    #[test]
    fn two_leaf_tree_is_order_independent() {
        let a = leaf_hash("alice");
        let b = leaf_hash("bob");
        let root = hash_pair(&a, &b);
        assert_eq!(root, hash_pair(&b, &a));

        assert!(verify(&a, &[Binary::from(b.to_vec())], &root));
        assert!(verify(&b, &[Binary::from(a.to_vec())], &root));
        assert!(!verify(&leaf_hash("carol"), &[Binary::from(b.to_vec())], &root));
    }

    #[test]
    fn malformed_proof_node_rejected() {
        let a = leaf_hash("alice");
        let b = leaf_hash("bob");
        let root = hash_pair(&a, &b);
        assert!(!verify(&a, &[Binary::from(vec![1u8; 31])], &root));
    }
}
