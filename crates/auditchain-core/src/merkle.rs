//! Merkle trees over canonical entry bytes.
//!
//! The tree is represented as index-addressed layered arrays rather
//! than a node graph: level 0 is the ordered leaf hashes, and each
//! level above is computed by folding the level below in consecutive
//! pairs. A level with an odd count pairs its last hash with itself.
//!
//! Both construction and proof generation walk levels produced by the
//! same [`fold_level`] / [`pair_sibling`] primitives, so the pairing
//! rule cannot drift between the two.
//!
//! Caveat (kept for proof compatibility, not a bug to fix here): the
//! odd-tail self-duplication rule means leaf sequences `[a, b, c]` and
//! `[a, b, c, c]` share intermediate hashes. Callers that need to
//! distinguish leaf counts must carry the count out of band, as the
//! batch layer does.

use serde::{Deserialize, Serialize};

use crate::crypto::Blake3Hash;

/// Which side of the pair a proof sibling sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// One step of a Merkle proof: a sibling hash and its side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    pub sibling: Blake3Hash,
    pub side: Side,
}

/// An immutable Merkle tree over a fixed leaf sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleTree {
    /// levels[0] = leaf hashes in insertion order; levels.last() = [root].
    levels: Vec<Vec<Blake3Hash>>,
}

/// Fold one level into the next: combine consecutive pairs, pairing a
/// dangling last hash with itself.
fn fold_level(level: &[Blake3Hash]) -> Vec<Blake3Hash> {
    level
        .chunks(2)
        .map(|pair| {
            let left = &pair[0];
            let right = pair.get(1).unwrap_or(left);
            Blake3Hash::combine(left, right)
        })
        .collect()
}

/// The sibling of `index` within `level`, with the side the sibling
/// occupies. A dangling last hash is its own (right) sibling.
fn pair_sibling(level: &[Blake3Hash], index: usize) -> ProofStep {
    if index % 2 == 0 {
        let sibling = *level.get(index + 1).unwrap_or(&level[index]);
        ProofStep {
            sibling,
            side: Side::Right,
        }
    } else {
        ProofStep {
            sibling: level[index - 1],
            side: Side::Left,
        }
    }
}

impl MerkleTree {
    /// Build a tree from ordered leaf hashes.
    ///
    /// A single leaf is its own root. An empty input produces a tree
    /// with a [`Blake3Hash::ZERO`] root and no provable leaves; the
    /// batch layer never seals an empty batch, so this is a degenerate
    /// case rather than a meaningful one.
    pub fn build(leaf_hashes: Vec<Blake3Hash>) -> Self {
        if leaf_hashes.is_empty() {
            return Self { levels: Vec::new() };
        }

        let mut levels = vec![leaf_hashes];
        while levels[levels.len() - 1].len() > 1 {
            let next = fold_level(&levels[levels.len() - 1]);
            levels.push(next);
        }

        Self { levels }
    }

    /// The root hash.
    pub fn root(&self) -> Blake3Hash {
        self.levels
            .last()
            .and_then(|top| top.first())
            .copied()
            .unwrap_or(Blake3Hash::ZERO)
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.levels.first().map(Vec::len).unwrap_or(0)
    }

    /// Number of proof steps for any leaf (levels below the root).
    pub fn proof_len(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// The ordered leaf hashes.
    pub fn leaf_hashes(&self) -> &[Blake3Hash] {
        self.levels.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Generate the proof path for the leaf at `index`.
    ///
    /// At each level below the root, records the sibling of the current
    /// position and which side it sits on, then halves the index. An
    /// out-of-range index yields an empty path, which callers must
    /// treat as "no proof", not as a valid proof.
    pub fn proof(&self, index: usize) -> Vec<ProofStep> {
        if index >= self.leaf_count() {
            return Vec::new();
        }

        let mut path = Vec::with_capacity(self.proof_len());
        let mut current = index;
        for level in &self.levels[..self.levels.len() - 1] {
            path.push(pair_sibling(level, current));
            current /= 2;
        }

        path
    }
}

/// Verify that `leaf_bytes` hashes up through `proof` to `claimed_root`.
///
/// Pure predicate: recomputes the leaf hash, folds in each sibling on
/// its recorded side, and compares. A malformed proof (wrong length,
/// wrong siblings, wrong sides) simply fails the comparison; this
/// function never panics.
pub fn verify_proof(leaf_bytes: &[u8], proof: &[ProofStep], claimed_root: &Blake3Hash) -> bool {
    let mut current = Blake3Hash::hash(leaf_bytes);

    for step in proof {
        current = match step.side {
            Side::Left => Blake3Hash::combine(&step.sibling, &current),
            Side::Right => Blake3Hash::combine(&current, &step.sibling),
        };
    }

    current == *claimed_root
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaves(n: usize) -> Vec<Vec<u8>> {
        (0..n).map(|i| format!("leaf-{i}").into_bytes()).collect()
    }

    fn build_from(data: &[Vec<u8>]) -> MerkleTree {
        MerkleTree::build(data.iter().map(|d| Blake3Hash::hash(d)).collect())
    }

    #[test]
    fn test_single_leaf_root_is_leaf_hash() {
        let data = leaves(1);
        let tree = build_from(&data);
        assert_eq!(tree.root(), Blake3Hash::hash(&data[0]));
        assert_eq!(tree.proof_len(), 0);
        // The empty proof verifies the sole leaf against the root.
        assert!(verify_proof(&data[0], &tree.proof(0), &tree.root()));
    }

    #[test]
    fn test_two_leaf_root() {
        let data = leaves(2);
        let tree = build_from(&data);
        let expected = Blake3Hash::combine(&Blake3Hash::hash(&data[0]), &Blake3Hash::hash(&data[1]));
        assert_eq!(tree.root(), expected);
    }

    #[test]
    fn test_odd_tail_duplicates_last_leaf() {
        let data = leaves(3);
        let tree = build_from(&data);

        let h: Vec<Blake3Hash> = data.iter().map(|d| Blake3Hash::hash(d)).collect();
        let left = Blake3Hash::combine(&h[0], &h[1]);
        let right = Blake3Hash::combine(&h[2], &h[2]);
        assert_eq!(tree.root(), Blake3Hash::combine(&left, &right));
    }

    #[test]
    fn test_root_depends_only_on_leaf_sequence() {
        let data = leaves(5);
        let t1 = build_from(&data);
        let t2 = build_from(&data);
        assert_eq!(t1.root(), t2.root());

        let mut reordered = data.clone();
        reordered.swap(0, 4);
        assert_ne!(t1.root(), build_from(&reordered).root());
    }

    #[test]
    fn test_round_trip_all_sizes_all_indices() {
        for n in [1usize, 2, 3, 4, 5, 8, 9, 16, 17] {
            let data = leaves(n);
            let tree = build_from(&data);
            let root = tree.root();

            for (i, leaf) in data.iter().enumerate() {
                let proof = tree.proof(i);
                assert!(
                    verify_proof(leaf, &proof, &root),
                    "round trip failed for n={n} i={i}"
                );
            }
        }
    }

    #[test]
    fn test_tampered_leaf_fails() {
        let data = leaves(8);
        let tree = build_from(&data);
        let proof = tree.proof(3);

        let mut tampered = data[3].clone();
        tampered[0] ^= 0x01;
        assert!(!verify_proof(&tampered, &proof, &tree.root()));
    }

    #[test]
    fn test_wrong_root_fails() {
        let data = leaves(4);
        let tree = build_from(&data);
        let proof = tree.proof(0);

        let unrelated = build_from(&leaves(5)).root();
        assert!(!verify_proof(&data[0], &proof, &unrelated));
    }

    #[test]
    fn test_out_of_range_index_empty_proof() {
        let data = leaves(4);
        let tree = build_from(&data);

        let proof = tree.proof(data.len());
        assert!(proof.is_empty());
        assert!(!verify_proof(&data[0], &proof, &tree.root()));
    }

    #[test]
    fn test_wrong_length_proof_fails() {
        let data = leaves(8);
        let tree = build_from(&data);
        let mut proof = tree.proof(2);
        proof.pop();
        assert!(!verify_proof(&data[2], &proof, &tree.root()));
    }

    #[test]
    fn test_sides_are_relative_to_sibling() {
        // Leaf 0 is the left element of its pair, so the first recorded
        // sibling must sit on the right.
        let data = leaves(4);
        let tree = build_from(&data);
        let proof = tree.proof(0);
        assert_eq!(proof[0].side, Side::Right);

        let proof = tree.proof(1);
        assert_eq!(proof[0].side, Side::Left);
    }

    #[test]
    fn test_dangling_leaf_is_own_sibling() {
        let data = leaves(3);
        let tree = build_from(&data);
        let proof = tree.proof(2);

        assert_eq!(proof[0].sibling, Blake3Hash::hash(&data[2]));
        assert_eq!(proof[0].side, Side::Right);
        assert!(verify_proof(&data[2], &proof, &tree.root()));
    }

    #[test]
    fn test_empty_tree_degenerate() {
        let tree = MerkleTree::build(Vec::new());
        assert_eq!(tree.root(), Blake3Hash::ZERO);
        assert_eq!(tree.leaf_count(), 0);
        assert!(tree.proof(0).is_empty());
    }
}
