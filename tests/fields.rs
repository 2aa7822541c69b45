//! Tests for field sets: ordering, reconciliation on move, and the block-keyed store.
mod common;
use common::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::HashSet;
use veriflow::prelude::*;

#[test]
fn test_add_appends_with_next_order() {
    let set = field_set(&["a", "b", "c"]);
    assert_eq!(layout(set.list()), pairs(&[("a", 0), ("b", 1), ("c", 2)]));
}

#[test]
fn test_add_ignores_caller_order() {
    let mut set = field_set(&["a"]);
    let added = set
        .add(FieldDefinition::new("b", "B", FieldType::Email).with_order(7))
        .unwrap();
    assert_eq!(added.order, 1);
}

#[test]
fn test_add_rejects_duplicate_name() {
    let mut set = field_set(&["a", "b"]);
    let err = set
        .add(FieldDefinition::new("b", "Other", FieldType::Number))
        .unwrap_err();
    assert_eq!(
        err,
        FieldError::DuplicateFieldName {
            block_id: "form".to_string(),
            name: "b".to_string(),
        }
    );
    assert_eq!(set.get("b").unwrap().label, "B");
    assert_eq!(set.len(), 2);
}

#[test]
fn test_swap_with_neighbour() {
    let mut set = field_set(&["A", "B", "C"]);
    let moved = set.update(&"A".into(), FieldPatch::Order(1)).unwrap();

    assert_eq!(moved.order, 1);
    assert_eq!(layout(set.list()), pairs(&[("B", 0), ("A", 1), ("C", 2)]));
}

#[test]
fn test_shift_on_forward_move() {
    let mut set = field_set(&["A", "B", "C", "D"]);
    set.update(&"A".into(), FieldPatch::Order(2)).unwrap();

    assert_eq!(
        layout(set.list()),
        pairs(&[("B", 0), ("C", 1), ("A", 2), ("D", 3)])
    );
}

#[test]
fn test_shift_on_backward_move() {
    let mut set = field_set(&["A", "B", "C", "D"]);
    set.update(&"D".into(), FieldPatch::Order(1)).unwrap();

    assert_eq!(
        layout(set.list()),
        pairs(&[("A", 0), ("D", 1), ("B", 2), ("C", 3)])
    );
}

#[test]
fn test_move_past_the_end_keeps_orders_unique() {
    let mut set = field_set(&["A", "B", "C"]);
    set.update(&"A".into(), FieldPatch::Order(10)).unwrap();

    assert_eq!(layout(set.list()), pairs(&[("B", 0), ("C", 1), ("A", 10)]));
}

#[test]
fn test_move_to_same_order_is_noop() {
    let mut set = field_set(&["A", "B", "C"]);
    let before = set.clone();
    set.update(&"B".into(), FieldPatch::Order(1)).unwrap();
    assert_eq!(set, before);
}

#[test]
fn test_swap_across_gap_left_by_remove() {
    let mut set = field_set(&["A", "B", "C"]);
    set.remove("B");
    set.update(&"A".into(), FieldPatch::Order(2)).unwrap();

    assert_eq!(layout(set.list()), pairs(&[("C", 0), ("A", 2)]));
}

#[test]
fn test_update_by_index_uses_display_order() {
    let mut set = field_set(&["A", "B", "C"]);
    set.update(&"C".into(), FieldPatch::Order(0)).unwrap();

    // Display order is now C, A, B
    let updated = set
        .update(&FieldRef::Index(0), FieldPatch::Label("First".to_string()))
        .unwrap();
    assert_eq!(updated.name, "C");
    assert_eq!(set.get("C").unwrap().label, "First");
}

#[test]
fn test_non_order_patch_leaves_other_fields_alone() {
    let mut set = field_set(&["A", "B", "C"]);
    let before = set.clone();

    let updated = set
        .update(&"B".into(), FieldPatch::Required(true))
        .unwrap();
    assert!(updated.is_required);

    for name in ["A", "C"] {
        assert_eq!(set.get(name), before.get(name));
    }
    assert_eq!(layout(set.list()), layout(before.list()));
}

#[test]
fn test_rename_to_taken_name_fails() {
    let mut set = field_set(&["A", "B"]);
    let err = set
        .update(&"A".into(), FieldPatch::Name("B".to_string()))
        .unwrap_err();
    assert!(matches!(err, FieldError::DuplicateFieldName { .. }));

    // Renaming a field to its own name is fine.
    assert!(
        set.update(&"A".into(), FieldPatch::Name("A".to_string()))
            .is_ok()
    );
}

#[test]
fn test_update_missing_field_fails() {
    let mut set = field_set(&["A"]);

    let by_name = set
        .update(&"ghost".into(), FieldPatch::Order(0))
        .unwrap_err();
    assert_eq!(
        by_name,
        FieldError::FieldNotFound {
            block_id: "form".to_string(),
            field: "'ghost'".to_string(),
        }
    );

    let by_index = set
        .update(&FieldRef::Index(5), FieldPatch::Multiple(true))
        .unwrap_err();
    assert!(matches!(by_index, FieldError::FieldNotFound { .. }));
}

#[test]
fn test_remove_is_idempotent() {
    let mut set = field_set(&["A", "B"]);
    let before = set.clone();

    assert!(set.remove("ghost").is_none());
    assert_eq!(set, before);

    assert_eq!(set.remove("A").unwrap().name, "A");
    assert!(set.remove("A").is_none());
    assert_eq!(layout(set.list()), pairs(&[("B", 1)]));
}

#[test]
fn test_add_after_remove_skips_used_orders() {
    let mut set = field_set(&["A", "B", "C"]);
    set.remove("B");
    let added = set
        .add(FieldDefinition::new("D", "D", FieldType::Text))
        .unwrap();
    assert_eq!(added.order, 3);
}

#[test]
fn test_normalize_closes_gaps() {
    let mut set = field_set(&["A", "B", "C", "D"]);
    set.remove("B");
    set.normalize();
    assert_eq!(layout(set.list()), pairs(&[("A", 0), ("C", 1), ("D", 2)]));
}

#[test]
fn test_insert_shifts_following_fields() {
    let mut set = field_set(&["A", "B", "C"]);
    set.insert(FieldDefinition::new("X", "X", FieldType::Date), 1)
        .unwrap();
    assert_eq!(
        layout(set.list()),
        pairs(&[("A", 0), ("X", 1), ("B", 2), ("C", 3)])
    );

    set.insert(FieldDefinition::new("Y", "Y", FieldType::Date), 99)
        .unwrap();
    assert_eq!(set.list().last().unwrap().name, "Y");
    assert_eq!(set.list().last().unwrap().order, 4);
}

#[test]
fn test_orders_stay_unique_under_random_edits() {
    let mut set = field_set(&["a", "b", "c", "d", "e", "f"]);
    let mut seed: u64 = 0x5eed;
    let mut next = |bound: u64| {
        seed = seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (seed >> 33) % bound
    };

    for step in 0..500 {
        match next(4) {
            0 => {
                let name = format!("extra_{}", step);
                set.add(FieldDefinition::new(name, "Extra", FieldType::Text))
                    .unwrap();
            }
            1 => {
                let name = format!("inserted_{}", step);
                let order = next(set.len() as u64 + 2) as u32;
                set.insert(FieldDefinition::new(name, "Inserted", FieldType::Text), order)
                    .unwrap();
            }
            _ => {
                let index = next(set.len() as u64) as usize;
                let order = next(set.len() as u64 + 3) as u32;
                set.update(&FieldRef::Index(index), FieldPatch::Order(order))
                    .unwrap();
            }
        }

        let orders: Vec<u32> = set.iter().map(|f| f.order).collect();
        let unique: HashSet<u32> = orders.iter().copied().collect();
        assert_eq!(unique.len(), orders.len(), "duplicate order at step {}", step);
        assert!(
            orders.windows(2).all(|w| w[0] < w[1]),
            "unsorted at step {}",
            step
        );
    }
}

#[test]
fn test_from_fields_sorts_and_repairs_orders() {
    let set = FieldSet::from_fields(
        "form",
        vec![
            FieldDefinition::new("b", "B", FieldType::Text).with_order(3),
            FieldDefinition::new("a", "A", FieldType::Text).with_order(1),
        ],
    )
    .unwrap();
    assert_eq!(layout(set.list()), pairs(&[("a", 1), ("b", 3)]));

    let colliding = FieldSet::from_fields(
        "form",
        vec![
            FieldDefinition::new("a", "A", FieldType::Text).with_order(0),
            FieldDefinition::new("b", "B", FieldType::Text).with_order(0),
            FieldDefinition::new("c", "C", FieldType::Text).with_order(1),
        ],
    )
    .unwrap();
    assert_eq!(
        layout(colliding.list()),
        pairs(&[("a", 0), ("b", 1), ("c", 2)])
    );

    let duplicated = FieldSet::from_fields(
        "form",
        vec![
            FieldDefinition::new("a", "A", FieldType::Text),
            FieldDefinition::new("a", "Again", FieldType::Text),
        ],
    );
    assert!(matches!(
        duplicated,
        Err(FieldError::DuplicateFieldName { .. })
    ));
}

#[test]
fn test_dangling_dependencies_are_reported() {
    let mut set = field_set(&["country", "state"]);
    set.add(FieldDefinition::new("city", "City", FieldType::Text).depending_on("state"))
        .unwrap();
    set.add(FieldDefinition::new("zip", "Zip", FieldType::Text).depending_on("postal_area"))
        .unwrap();

    let dangling: Vec<&str> = set
        .dangling_dependencies()
        .into_iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(dangling, vec!["zip"]);
}

#[test]
fn test_placeholders_get_unique_names() {
    let mut set = FieldSet::new("form");
    let first = set.add_placeholder().unwrap().name.clone();
    let second = set.add_placeholder().unwrap().name.clone();

    assert!(first.starts_with("new_field_"));
    assert_ne!(first, second);
    assert_eq!(set.get(&second).unwrap().label, "New Field");
    assert_eq!(set.get(&second).unwrap().order, 1);
}

#[test]
fn test_patch_from_property() {
    assert_eq!(
        FieldPatch::from_property("order", &json!(3)).unwrap(),
        FieldPatch::Order(3)
    );
    assert_eq!(
        FieldPatch::from_property("order", &json!("2")).unwrap(),
        FieldPatch::Order(2)
    );
    assert_eq!(
        FieldPatch::from_property("order", &json!("abc")).unwrap(),
        FieldPatch::Order(0)
    );
    assert_eq!(
        FieldPatch::from_property("order", &json!(-4)).unwrap(),
        FieldPatch::Order(0)
    );
    assert_eq!(
        FieldPatch::from_property("field_type", &json!("Email")).unwrap(),
        FieldPatch::FieldType(FieldType::Email)
    );
    assert_eq!(
        FieldPatch::from_property("is_required", &json!(true)).unwrap(),
        FieldPatch::Required(true)
    );
    assert_eq!(
        FieldPatch::from_property("depends_on", &json!(null)).unwrap(),
        FieldPatch::DependsOn(String::new())
    );

    assert!(matches!(
        FieldPatch::from_property("field_type", &json!("color")),
        Err(FieldError::InvalidPatch { .. })
    ));
    assert!(matches!(
        FieldPatch::from_property("is_multiple", &json!(1)),
        Err(FieldError::InvalidPatch { .. })
    ));
    assert!(matches!(
        FieldPatch::from_property("colour", &json!("red")),
        Err(FieldError::InvalidPatch { .. })
    ));
}

#[test]
fn test_store_list_unknown_block_is_empty() {
    let store = FieldStore::new();
    assert!(store.list("nowhere").is_empty());
    assert!(store.get("nowhere").is_none());
}

#[test]
fn test_store_operations_are_scoped_per_block() {
    let mut store = FieldStore::new();
    store
        .add("one", FieldDefinition::new("email", "Email", FieldType::Email))
        .unwrap();
    store
        .add("two", FieldDefinition::new("email", "Email", FieldType::Email))
        .unwrap();

    store
        .update("one", "email", FieldPatch::Label("Work email".to_string()))
        .unwrap();
    assert_eq!(store.list("one")[0].label, "Work email");
    assert_eq!(store.list("two")[0].label, "Email");

    assert!(store.remove("one", "email").is_some());
    assert!(store.remove("one", "email").is_none());
    assert!(store.remove("missing-block", "email").is_none());
    assert_eq!(store.list("two").len(), 1);
}

#[test]
fn test_store_update_unknown_block_fails() {
    let mut store = FieldStore::new();
    let err = store
        .update("ghost", 0usize, FieldPatch::Order(1))
        .unwrap_err();
    assert_eq!(
        err,
        FieldError::FieldNotFound {
            block_id: "ghost".to_string(),
            field: "#0".to_string(),
        }
    );
}

#[test]
fn test_store_seeds_defaults_for_collection_kinds() {
    let mut store = FieldStore::new();
    assert!(
        store
            .seed_defaults("passport", &BlockKind::PassportCollection)
            .unwrap()
    );
    assert!(
        !store
            .seed_defaults("intro", &BlockKind::InformationConfirmation)
            .unwrap()
    );

    let names: Vec<&str> = store
        .list("passport")
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(names, vec!["last_name", "first_name", "passport_number"]);
    assert!(store.list("passport").iter().all(|f| f.is_required));
    assert!(store.get("intro").is_none());

    assert!(store.drop_block("passport").is_some());
    assert!(store.list("passport").is_empty());
}

#[test]
fn test_store_tracks_blocks_with_field_sets() {
    let mut store = FieldStore::new();
    assert!(store.is_empty());

    store.add_placeholder("contact").unwrap();
    store
        .seed_defaults("passport", &BlockKind::PassportCollection)
        .unwrap();

    let mut ids: Vec<&str> = store.block_ids().collect();
    ids.sort();
    assert_eq!(ids, vec!["contact", "passport"]);
    assert_eq!(store.len(), 2);

    store.drop_block("contact");
    assert_eq!(store.block_ids().collect::<Vec<_>>(), vec!["passport"]);
    assert!(!store.is_empty());
}

#[test]
fn test_add_after_highest_possible_order_renumbers() {
    let mut set = field_set(&["a"]);
    let patch = FieldPatch::from_property("order", &json!(9_999_999_999u64)).unwrap();
    assert_eq!(patch, FieldPatch::Order(u32::MAX));
    set.update(&"a".into(), patch).unwrap();
    assert_eq!(set.next_order(), None);

    let added = set
        .add(FieldDefinition::new("b", "B", FieldType::Text))
        .unwrap();
    assert_eq!(added.order, 1);
    assert_eq!(layout(set.list()), pairs(&[("a", 0), ("b", 1)]));
    assert_eq!(set.next_order(), Some(2));
}

#[test]
fn test_insert_after_highest_possible_order_renumbers() {
    let mut set = field_set(&["a", "b"]);
    set.update(&"b".into(), FieldPatch::Order(u32::MAX)).unwrap();

    set.insert(FieldDefinition::new("c", "C", FieldType::Text), 0)
        .unwrap();
    assert_eq!(
        layout(set.list()),
        pairs(&[("c", 0), ("a", 1), ("b", 2)])
    );

    set.update(&"c".into(), FieldPatch::Order(u32::MAX)).unwrap();
    set.insert(FieldDefinition::new("d", "D", FieldType::Text), u32::MAX)
        .unwrap();
    assert_eq!(
        layout(set.list()),
        pairs(&[("a", 0), ("b", 1), ("c", 2), ("d", 3)])
    );
}
