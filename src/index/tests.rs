// =====================================================================
// File: index/tests.rs
//
// Description:
//   Unit tests for the red-black tree (`RbNode` and `OrderedIndex`).
//   Covers insert, search, rotations, removal and the red-black
//   properties after randomized workloads.
//
// Notes:
//   * Only compiled when running `cargo test`.
//   * Does not affect release builds.
// =====================================================================


// =================================================================
// Unit tests cover basic tree structure and simple search
// =================================================================
#[cfg(test)]
mod index_tests {
    use crate::index::{Color, NodeId};
    use crate::{DiseaseRecord, OrderedIndex};

    fn rec(disease: &str, year: i32, deaths: u32) -> DiseaseRecord {
        DiseaseRecord::new(disease, year, deaths, "mortality")
    }

    #[test]
    fn test_new_tree_is_empty() {
        let tree = OrderedIndex::new();
        assert!(tree.is_empty());
        assert!(tree.root().is_nil());
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.validate(), Ok(0));
    }

    #[test]
    fn test_sentinel_is_not_a_node() {
        let tree = OrderedIndex::new();
        assert!(NodeId::NIL.is_nil());
        assert!(tree.node(NodeId::NIL).is_none());
        assert_eq!(tree.search("anything"), NodeId::NIL);
    }

    #[test]
    fn test_first_insert_becomes_black_root() {
        let mut tree = OrderedIndex::new();
        tree.insert("Ohio", rec("Cancer", 2020, 1));

        let root = tree.node(tree.root()).unwrap();
        assert_eq!(root.key(), "Ohio");
        assert_eq!(root.color, Color::Black);
        assert!(root.parent.is_nil());
        assert!(root.left.is_nil() && root.right.is_nil());
    }

    #[test]
    // Two children under a black root stay red
    fn test_children_of_root_are_red() {
        let mut tree = OrderedIndex::new();
        tree.insert("M", rec("Cancer", 2020, 1));
        tree.insert("C", rec("Cancer", 2020, 1));
        tree.insert("X", rec("Cancer", 2020, 1));

        let root = tree.node(tree.root()).unwrap();
        assert_eq!(root.key(), "M");
        assert_eq!(tree.node(root.left).unwrap().color, Color::Red);
        assert_eq!(tree.node(root.right).unwrap().color, Color::Red);
    }

    #[test]
    fn search_finds_inserted_and_misses_others() {
        let mut tree = OrderedIndex::new();
        for state in ["Texas", "Alabama", "Nevada", "Georgia"] {
            tree.insert(state, rec("Asthma", 2020, 1));
        }
        for state in ["Texas", "Alabama", "Nevada", "Georgia"] {
            let id = tree.search(state);
            assert_eq!(tree.node(id).unwrap().key(), state);
        }
        assert_eq!(tree.search("Kansas"), NodeId::NIL);
        assert_eq!(tree.search(""), NodeId::NIL);
    }
}


// =================================================================
// Unit tests cover insertion and rebalancing
// =================================================================
#[cfg(test)]
mod index_insertion_tests {
    use crate::index::Color;
    use crate::{DiseaseRecord, LookupMiss, OrderedIndex};

    fn rec(disease: &str, year: i32, deaths: u32) -> DiseaseRecord {
        DiseaseRecord::new(disease, year, deaths, "mortality")
    }

    #[test]
    // Ascending keys force the outer-case rotation at every step
    fn ascending_inserts_stay_balanced() {
        let mut tree = OrderedIndex::new();
        tree.insert("A", rec("Cancer", 2020, 1));
        tree.insert("B", rec("Cancer", 2020, 1));
        tree.insert("C", rec("Cancer", 2020, 1));

        // Rotated left at A: B is the black root with red children
        let root = tree.node(tree.root()).unwrap();
        assert_eq!(root.key(), "B");
        assert_eq!(root.color, Color::Black);
        assert_eq!(tree.node(root.left).unwrap().key(), "A");
        assert_eq!(tree.node(root.right).unwrap().key(), "C");
        assert!(tree.validate().is_ok());
    }

    #[test]
    // C, A, B hits the inner case: rotate at the parent, then the grandparent
    fn inner_case_double_rotation() {
        let mut tree = OrderedIndex::new();
        tree.insert("C", rec("Cancer", 2020, 1));
        tree.insert("A", rec("Cancer", 2020, 1));
        tree.insert("B", rec("Cancer", 2020, 1));

        let root = tree.node(tree.root()).unwrap();
        assert_eq!(root.key(), "B");
        assert_eq!(tree.states(), vec!["A", "B", "C"]);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn many_sorted_inserts_keep_logarithmic_height() {
        let mut tree = OrderedIndex::new();
        for i in 0..1024 {
            tree.insert(&format!("state{:04}", i), rec("Cancer", 2020, i));
        }
        assert_eq!(tree.len(), 1024);
        // Red-black bound: height <= 2 * log2(n + 1)
        assert!(tree.height() <= 2 * 11, "height {} too large", tree.height());
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn duplicate_state_merges_without_new_node() {
        let mut tree = OrderedIndex::new();
        tree.insert("California", rec("Cancer", 2019, 500));
        let before = tree.height();
        tree.insert("California", rec("Cancer", 2019, 300));
        tree.insert("California", rec("Asthma", 2019, 20));

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.height(), before);

        let found = tree.query("California", "Cancer").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!((found[0].year, found[0].death_count), (2019, 500));
        assert_eq!(tree.get("California").unwrap().records.len(), 2);
    }

    #[test]
    fn query_reports_distinct_misses() {
        let mut tree = OrderedIndex::new();
        tree.insert("Texas", rec("Asthma", 2020, 50));

        assert_eq!(
            tree.query("Texas", "Cancer"),
            Err(LookupMiss::DiseaseNotFound {
                state: "Texas".into(),
                disease: "Cancer".into()
            })
        );
        assert_eq!(
            tree.query("Florida", "Asthma"),
            Err(LookupMiss::StateNotFound { state: "Florida".into() })
        );
    }

    #[test]
    fn states_are_listed_in_order() {
        let mut tree = OrderedIndex::new();
        for state in ["Utah", "Iowa", "Ohio", "Alaska", "Maine"] {
            tree.insert(state, rec("Cancer", 2020, 1));
        }
        assert_eq!(tree.states(), vec!["Alaska", "Iowa", "Maine", "Ohio", "Utah"]);
    }
}


// =================================================================
// Unit tests cover rotations
// =================================================================
#[cfg(test)]
mod index_rotation_tests {
    use crate::index::node::Side;
    use crate::{DiseaseRecord, OrderedIndex};

    fn build(keys: &[&str]) -> OrderedIndex {
        let mut tree = OrderedIndex::new();
        for key in keys {
            tree.insert(key, DiseaseRecord::new("Cancer", 2020, 1, "mortality"));
        }
        tree
    }

    #[test]
    fn rotation_at_root_moves_root_and_keeps_order() {
        let mut tree = build(&["D", "B", "F", "A", "C", "E", "G"]);
        let old_root = tree.root();
        let right = tree.node(old_root).unwrap().right;

        tree.rotate(old_root, Side::Left);

        assert_eq!(tree.root(), right);
        assert!(tree.node(tree.root()).unwrap().parent.is_nil());
        assert_eq!(tree.node(old_root).unwrap().parent, right);
        assert_eq!(tree.states(), vec!["A", "B", "C", "D", "E", "F", "G"]);
    }

    #[test]
    fn left_then_right_rotation_restores_shape() {
        let mut tree = build(&["D", "B", "F", "A", "C", "E", "G"]);
        let old_root = tree.root();

        tree.rotate(old_root, Side::Left);
        let new_root = tree.root();
        tree.rotate(new_root, Side::Right);

        assert_eq!(tree.root(), old_root);
        // Colors were untouched by the rotations, so the tree is valid again
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn rotation_below_root_relinks_parent() {
        let mut tree = build(&["D", "B", "F", "A", "C", "E", "G"]);
        let b = tree.search("B");
        let d = tree.search("D");

        tree.rotate(b, Side::Right);

        let a = tree.search("A");
        assert_eq!(tree.node(d).unwrap().left, a);
        assert_eq!(tree.node(a).unwrap().parent, d);
        assert_eq!(tree.node(a).unwrap().right, b);
        assert_eq!(tree.states(), vec!["A", "B", "C", "D", "E", "F", "G"]);
    }
}


// =================================================================
// Unit tests cover state removal
// =================================================================
#[cfg(test)]
mod index_removal_tests {
    use crate::{DiseaseRecord, LookupMiss, OrderedIndex};

    fn build(keys: &[&str]) -> OrderedIndex {
        let mut tree = OrderedIndex::new();
        for key in keys {
            tree.insert(key, DiseaseRecord::new("Cancer", 2020, 1, "mortality"));
        }
        tree
    }

    #[test]
    fn remove_missing_state_reports_false() {
        let mut tree = build(&["Ohio"]);
        assert!(!tree.remove("Utah"));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn remove_then_query_reports_state_not_found() {
        let mut tree = build(&["Ohio", "Utah", "Iowa"]);
        assert!(tree.remove("Utah"));
        assert!(matches!(
            tree.query("Utah", "Cancer"),
            Err(LookupMiss::StateNotFound { .. })
        ));
        assert_eq!(tree.states(), vec!["Iowa", "Ohio"]);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn remove_root_with_two_children() {
        let mut tree = build(&["D", "B", "F", "A", "C", "E", "G"]);
        let root_key = tree.node(tree.root()).unwrap().key().to_string();

        let entry = tree.remove_entry(&root_key).unwrap();
        assert_eq!(entry.state, root_key);
        assert_eq!(tree.len(), 6);
        assert!(tree.validate().is_ok());
        assert!(tree.search(&root_key).is_nil());
    }

    #[test]
    fn remove_everything_leaves_empty_tree() {
        let keys = ["M", "F", "T", "B", "H", "P", "W", "A", "C"];
        let mut tree = build(&keys);
        for key in keys {
            assert!(tree.remove(key));
            assert!(tree.validate().is_ok(), "invalid after removing {}", key);
        }
        assert!(tree.is_empty());
        assert!(tree.root().is_nil());
    }

    #[test]
    // Freed slots are recycled without disturbing live nodes
    fn reinsert_after_remove_reuses_slot() {
        let mut tree = build(&["A", "B", "C"]);
        assert!(tree.remove("B"));
        tree.insert("Z", DiseaseRecord::new("Asthma", 2021, 9, "mortality"));

        assert_eq!(tree.states(), vec!["A", "C", "Z"]);
        assert_eq!(tree.query("Z", "Asthma").unwrap()[0].death_count, 9);
        assert!(tree.get("B").is_none());
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn handle_of_removed_state_no_longer_resolves() {
        let mut tree = build(&["A", "B", "C"]);
        let b = tree.search("B");
        assert_eq!(tree.node(b).map(|n| n.key()), Some("B"));

        assert!(tree.remove("B"));
        assert!(tree.node(b).is_none());

        // The slot comes back to life only for the state that reuses it
        tree.insert("D", DiseaseRecord::new("Cancer", 2020, 4, "mortality"));
        let d = tree.search("D");
        assert_eq!(tree.node(d).map(|n| n.key()), Some("D"));
        assert!(tree.node(tree.search("A")).is_some());
    }
}


// =================================================================
// Randomized red-black property checks
// =================================================================
#[cfg(test)]
mod index_invariant_tests {
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    use crate::{DiseaseRecord, OrderedIndex};

    fn keys(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("state-{:05}", i)).collect()
    }

    #[test]
    fn invariants_hold_after_every_random_insert() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut keys = keys(500);
        keys.shuffle(&mut rng);

        let mut tree = OrderedIndex::new();
        for key in &keys {
            let deaths = rng.random_range(0..10_000);
            tree.insert(key, DiseaseRecord::new("Cancer", 2020, deaths, "mortality"));
            if let Err(violation) = tree.validate() {
                panic!("after inserting {}: {}", key, violation);
            }
        }
        assert_eq!(tree.len(), 500);
    }

    #[test]
    fn search_is_correct_for_present_and_absent_keys() {
        let mut rng = StdRng::seed_from_u64(42);
        let all = keys(400);
        let (present, absent) = all.split_at(200);
        let mut shuffled = present.to_vec();
        shuffled.shuffle(&mut rng);

        let mut tree = OrderedIndex::new();
        for key in &shuffled {
            tree.insert(key, DiseaseRecord::new("Asthma", 2019, 1, "mortality"));
        }

        for key in present {
            let id = tree.search(key);
            assert_eq!(tree.node(id).map(|n| n.key()), Some(key.as_str()));
        }
        for key in absent {
            assert!(tree.search(key).is_nil());
        }
    }

    #[test]
    fn invariants_hold_under_mixed_inserts_and_removes() {
        let mut rng = StdRng::seed_from_u64(7);
        let pool = keys(120);
        let mut live: Vec<String> = Vec::new();
        let mut tree = OrderedIndex::new();

        for _ in 0..2_000 {
            let key = &pool[rng.random_range(0..pool.len())];
            if rng.random_bool(0.6) {
                tree.insert(key, DiseaseRecord::new("Cancer", 2020, 1, "mortality"));
                if !live.contains(key) {
                    live.push(key.clone());
                }
            } else {
                let was_live = live.contains(key);
                assert_eq!(tree.remove(key), was_live);
                live.retain(|k| k != key);
            }
            if let Err(violation) = tree.validate() {
                panic!("tree invalid: {}", violation);
            }
        }

        live.sort();
        assert_eq!(tree.states(), live.iter().map(String::as_str).collect::<Vec<_>>());
    }
}
