//! Chart-of-accounts integration tests: ordering, tree assembly, lookup.

mod common;

use common::accounts;
use takmir_ledger::coa::{build_tree, compare_codes, flatten_tree, next_child_code, sort_by_code};
use takmir_ledger::filter::{search_accounts, selectable_accounts};
use takmir_ledger::NormalBalance;
use std::cmp::Ordering;

/// Codes compare segment by segment as integers
#[test]
fn codes_compare_numerically() {
    assert_eq!(compare_codes("1.2", "1.10"), Ordering::Less);
    assert_eq!(compare_codes("1.2", "1.2.1"), Ordering::Less);
    assert_eq!(compare_codes("2", "1.9.9"), Ordering::Greater);
    assert_eq!(compare_codes("1.1", "1.1"), Ordering::Equal);
}

/// The tree has one root per group and children sorted by code
#[test]
fn tree_follows_parent_links() {
    let tree = build_tree(&accounts()).unwrap();

    let roots: Vec<&str> = tree.iter().map(|n| n.account.code.as_str()).collect();
    assert_eq!(roots, ["1", "2", "3", "4", "5"]);

    let aset_children: Vec<&str> = tree[0].children.iter().map(|n| n.account.code.as_str()).collect();
    assert_eq!(aset_children, ["1.1", "1.2", "1.3"]);
}

/// Pre-order flattening is the code-sorted account list
#[test]
fn flattened_tree_is_sorted_chart() {
    let mut sorted = accounts();
    sort_by_code(&mut sorted);

    let flat = flatten_tree(&build_tree(&accounts()).unwrap());
    assert_eq!(flat, sorted);
}

/// The next code increments the widest existing sibling
#[test]
fn next_code_under_group() {
    let accounts = accounts();
    assert_eq!(next_child_code(&accounts, Some("1")), "1.4");
    assert_eq!(next_child_code(&accounts, Some("5")), "5.3");
    assert_eq!(next_child_code(&accounts, None), "6");
}

/// Resolution is stable across repeated calls
#[test]
fn normal_balance_resolution_is_stable() {
    for account in accounts() {
        let first = NormalBalance::for_account(&account);
        assert_eq!(first, NormalBalance::for_account(&account));
    }
}

/// Search covers category text; selection excludes groups and inactive
#[test]
fn search_and_selection() {
    let accounts = accounts();

    let found: Vec<&str> = search_accounts(&accounts, "operasional")
        .iter()
        .map(|a| a.code.as_str())
        .collect();
    assert_eq!(found, ["5.1", "5.2"]);

    let selectable = selectable_accounts(&accounts);
    assert!(selectable.iter().all(|a| a.is_postable()));
    assert!(!selectable.iter().any(|a| a.code == "1.3" || a.code == "1"));
}
