use std::collections::BTreeMap;

use proptest::prelude::*;

use super::check::{keys_in_order, validate};
use super::{DuplicateKeys, RedBlackError, RedBlackTree};

#[derive(Debug, Clone, Copy)]
enum Op {
    Insert(i64),
    Delete(i64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (-64i64..64).prop_map(Op::Insert),
        2 => (-64i64..64).prop_map(Op::Delete),
    ]
}

/// Multiset of keys the tree should hold.
#[derive(Default)]
struct Model(BTreeMap<i64, usize>);

impl Model {
    fn insert(&mut self, key: i64, policy: DuplicateKeys) {
        let count = self.0.entry(key).or_default();
        if policy == DuplicateKeys::AllowRight || *count == 0 {
            *count += 1;
        }
    }

    fn delete(&mut self, key: i64) -> bool {
        match self.0.get_mut(&key) {
            Some(count) if *count > 1 => *count -= 1,
            Some(_) => {
                self.0.remove(&key);
            }
            None => return false,
        }
        true
    }

    fn keys(&self) -> Vec<i64> {
        self.0
            .iter()
            .flat_map(|(&key, &count)| std::iter::repeat(key).take(count))
            .collect()
    }
}

fn run(ops: &[Op], policy: DuplicateKeys) -> Result<(), TestCaseError> {
    let mut tree = RedBlackTree::empty_with_policy(policy);
    let mut model = Model::default();

    for &op in ops {
        match op {
            Op::Insert(key) => {
                tree.insert(key);
                model.insert(key, policy);
            }
            Op::Delete(key) => {
                let before = tree.to_string();
                let present = model.delete(key);
                tree.delete(key);
                if !present {
                    prop_assert_eq!(tree.to_string(), before);
                }
            }
        }
        prop_assert_eq!(validate(&tree), Ok(()));
        prop_assert_eq!(keys_in_order(&tree), model.keys());
    }

    for key in -64..64 {
        match tree.get(key) {
            Ok(node) => {
                prop_assert!(model.0.contains_key(&key));
                prop_assert_eq!(node.key(), key);
            }
            Err(err) => {
                prop_assert!(!model.0.contains_key(&key));
                prop_assert_eq!(err, RedBlackError::KeyNotFound(key));
            }
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn random_ops_keep_invariants(ops in prop::collection::vec(op(), 0..200)) {
        run(&ops, DuplicateKeys::AllowRight)?;
    }

    #[test]
    fn random_ops_keep_invariants_without_duplicates(
        ops in prop::collection::vec(op(), 0..200)
    ) {
        run(&ops, DuplicateKeys::Reject)?;
    }

    #[test]
    fn delete_all_in_any_order_empties_tree(
        (keys, order) in prop::collection::vec(-1000i64..1000, 1..100)
            .prop_flat_map(|keys| (Just(keys.clone()), Just(keys).prop_shuffle()))
    ) {
        let mut tree = RedBlackTree::default();
        for &key in &keys {
            tree.insert(key);
        }

        for key in order {
            tree.delete(key);
            prop_assert_eq!(validate(&tree), Ok(()));
        }
        prop_assert!(tree.root().is_none());
        prop_assert!(tree.is_empty());
    }
}
