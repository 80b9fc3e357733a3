//! Sorted-pair Merkle tree with domain-separated leaves.
//!
//! ```text
//! leaf  = SHA-256(0x00 ‖ data)
//! node  = SHA-256(0x01 ‖ min(a, b) ‖ max(a, b))
//! ```
//!
//! Siblings are combined as a sorted pair, so a proof carries no left/right
//! information and only authenticates membership. The prefix bytes keep leaf
//! and node preimages disjoint: a leaf hash always covers `0x00 ‖ data`, so
//! an internal node can never be replayed as leaf data.

use alloc::vec::Vec;

use super::digest::Digest;
use crate::codec::MalformedDefinition;

/// Domain separation prefix for leaf hashes.
pub const LEAF_PREFIX: u8 = 0x00;

/// Domain separation prefix for internal node hashes.
pub const NODE_PREFIX: u8 = 0x01;

/// Upper bound on proof length.
///
/// A tree of depth 32 already holds over four billion definitions.
pub const MAX_PROOF_LEN: usize = 32;

/// Marker for leaf and internal node hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {}

/// Marker for the root hash that the trust anchor signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Root {}

/// Hash leaf data.
#[must_use]
pub fn leaf_hash(data: &[u8]) -> Digest<Node> {
    Digest::hash_parts(&[&[LEAF_PREFIX], data])
}

/// Combine two sibling hashes into their parent.
#[must_use]
pub fn node_hash(a: &Digest<Node>, b: &Digest<Node>) -> Digest<Node> {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    Digest::hash_parts(&[&[NODE_PREFIX], lo.as_bytes(), hi.as_bytes()])
}

/// Recompute the root from leaf data and its proof.
///
/// An empty proof describes a single-leaf tree: the root is the leaf hash.
///
/// # Errors
///
/// Returns [`MalformedDefinition::ProofTooLong`] if `proof` has more than
/// [`MAX_PROOF_LEN`] entries.
pub fn compute_root(
    leaf_data: &[u8],
    proof: &[Digest<Node>],
) -> Result<Digest<Root>, MalformedDefinition> {
    if proof.len() > MAX_PROOF_LEN {
        return Err(MalformedDefinition::ProofTooLong {
            count: proof.len(),
            max: MAX_PROOF_LEN,
        });
    }

    let root = proof
        .iter()
        .fold(leaf_hash(leaf_data), |acc, sibling| node_hash(&acc, sibling));

    Ok(root.cast())
}

/// A complete tree over a set of leaves, used to issue proofs.
///
/// Levels are built bottom-up by pairing adjacent nodes. An odd node at the
/// end of a level is promoted unchanged, so its proof skips that level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    levels: Vec<Vec<Digest<Node>>>,
}

impl MerkleTree {
    /// Build a tree over `leaves`, in the given order.
    ///
    /// Returns `None` for an empty leaf set.
    #[must_use]
    pub fn new<L: AsRef<[u8]>>(leaves: &[L]) -> Option<Self> {
        if leaves.is_empty() {
            return None;
        }

        let mut levels = Vec::new();
        let mut current: Vec<Digest<Node>> =
            leaves.iter().map(|leaf| leaf_hash(leaf.as_ref())).collect();

        while current.len() > 1 {
            let next = current
                .chunks(2)
                .filter_map(|pair| pair.iter().copied().reduce(|a, b| node_hash(&a, &b)))
                .collect();
            levels.push(core::mem::replace(&mut current, next));
        }
        levels.push(current);

        Some(Self { levels })
    }

    /// Number of leaves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    /// Always `false`; a tree is never built from zero leaves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The root to be signed.
    #[must_use]
    pub fn root(&self) -> Digest<Root> {
        self.levels
            .last()
            .and_then(|top| top.first())
            .copied()
            .map_or_else(|| Digest::from_bytes([0; 32]), Digest::cast)
    }

    /// Proof for the leaf at `index`, ordered from the leaf upwards.
    ///
    /// Returns `None` if `index` is out of range.
    #[must_use]
    pub fn proof(&self, index: usize) -> Option<Vec<Digest<Node>>> {
        if index >= self.len() {
            return None;
        }

        let mut proof = Vec::new();
        let mut position = index;
        for level in self.levels.iter().take(self.levels.len().saturating_sub(1)) {
            if let Some(sibling) = level.get(position ^ 1) {
                proof.push(*sibling);
            }
            position /= 2;
        }
        Some(proof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{format, vec};
    use testresult::TestResult;

    fn leaves(count: usize) -> Vec<Vec<u8>> {
        (0..count).map(|i| format!("definition #{i}").into_bytes()).collect()
    }

    mod root {
        use super::*;

        #[test]
        fn empty_proof_is_leaf_hash() -> TestResult {
            let root = compute_root(b"payload", &[])?;
            assert_eq!(root.into_bytes(), leaf_hash(b"payload").into_bytes());
            Ok(())
        }

        #[test]
        fn leaf_is_domain_separated() {
            let tagged = Digest::<Node>::hash_bytes(b"\x00abc");
            let untagged = Digest::<Node>::hash_bytes(b"abc");
            assert_eq!(leaf_hash(b"abc"), tagged);
            assert_ne!(leaf_hash(b"abc"), untagged);
        }

        #[test]
        fn sibling_order_does_not_matter() {
            let a = leaf_hash(b"a");
            let b = leaf_hash(b"b");
            assert_eq!(node_hash(&a, &b), node_hash(&b, &a));
        }

        #[test]
        fn rejects_oversized_proof() {
            let proof = vec![leaf_hash(b"x"); MAX_PROOF_LEN + 1];
            assert_eq!(
                compute_root(b"payload", &proof),
                Err(MalformedDefinition::ProofTooLong {
                    count: MAX_PROOF_LEN + 1,
                    max: MAX_PROOF_LEN,
                })
            );
        }

        #[test]
        fn accepts_maximum_proof() {
            let proof = vec![leaf_hash(b"x"); MAX_PROOF_LEN];
            assert!(compute_root(b"payload", &proof).is_ok());
        }
    }

    mod tree {
        use super::*;

        #[test]
        fn every_proof_reaches_the_root() -> TestResult {
            for count in 1..=9 {
                let leaves = leaves(count);
                let tree = MerkleTree::new(leaves.as_slice()).ok_or("empty tree")?;
                for (index, leaf) in leaves.iter().enumerate() {
                    let proof = tree.proof(index).ok_or("missing proof")?;
                    assert_eq!(
                        compute_root(leaf, &proof)?,
                        tree.root(),
                        "leaf {index} of {count}"
                    );
                }
            }
            Ok(())
        }

        #[test]
        fn proof_for_other_leaf_is_rejected() -> TestResult {
            let leaves = leaves(4);
            let tree = MerkleTree::new(leaves.as_slice()).ok_or("empty tree")?;
            let proof_for_first = tree.proof(0).ok_or("missing proof")?;
            assert_ne!(compute_root(&leaves[2], &proof_for_first)?, tree.root());
            Ok(())
        }

        #[test]
        fn data_outside_the_tree_is_rejected() -> TestResult {
            let leaves = leaves(4);
            let tree = MerkleTree::new(leaves.as_slice()).ok_or("empty tree")?;
            let proof = tree.proof(1).ok_or("missing proof")?;
            assert_ne!(compute_root(b"forged definition", &proof)?, tree.root());
            Ok(())
        }

        #[test]
        fn internal_node_cannot_pose_as_leaf() -> TestResult {
            // Present the preimage of the parent of leaves 0 and 1 as leaf
            // data, with the remaining upper-level proof.
            let leaves = leaves(4);
            let tree = MerkleTree::new(leaves.as_slice()).ok_or("empty tree")?;
            let a = leaf_hash(&leaves[0]);
            let b = leaf_hash(&leaves[1]);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

            let mut preimage = vec![NODE_PREFIX];
            preimage.extend_from_slice(lo.as_bytes());
            preimage.extend_from_slice(hi.as_bytes());

            let upper = tree.proof(0).ok_or("missing proof")?.split_off(1);
            assert_ne!(compute_root(&preimage, &upper)?, tree.root());

            // Without the leading node prefix, the raw children fare no better.
            let mut children = lo.as_bytes().to_vec();
            children.extend_from_slice(hi.as_bytes());
            assert_ne!(compute_root(&children, &upper)?, tree.root());
            Ok(())
        }

        #[test]
        fn odd_leaf_is_promoted() -> TestResult {
            let leaves = leaves(3);
            let tree = MerkleTree::new(leaves.as_slice()).ok_or("empty tree")?;
            let proof = tree.proof(2).ok_or("missing proof")?;
            assert_eq!(proof.len(), 1);
            assert_eq!(tree.proof(0).ok_or("missing proof")?.len(), 2);
            Ok(())
        }

        #[test]
        fn single_leaf_tree_has_empty_proof() -> TestResult {
            let tree = MerkleTree::new(&[b"only".as_slice()]).ok_or("empty tree")?;
            assert_eq!(tree.proof(0), Some(Vec::new()));
            assert_eq!(tree.root().into_bytes(), leaf_hash(b"only").into_bytes());
            assert_eq!(tree.proof(1), None);
            Ok(())
        }

        #[test]
        fn empty_leaf_set_has_no_tree() {
            assert!(MerkleTree::new::<&[u8]>(&[]).is_none());
        }
    }

    #[cfg(feature = "bolero")]
    mod proptests {
        use super::*;

        #[test]
        fn prop_tree_proofs_verify() {
            bolero::check!()
                .with_type::<Vec<Vec<u8>>>()
                .for_each(|leaves| {
                    if let Some(tree) = MerkleTree::new(leaves.as_slice()) {
                        for (index, leaf) in leaves.iter().enumerate() {
                            let proof = tree.proof(index).unwrap_or_default();
                            assert_eq!(compute_root(leaf, &proof).ok(), Some(tree.root()));
                        }
                    }
                });
        }
    }
}
