//! Parent/child assembly of the chart of accounts.

use super::code::compare_codes;
use crate::error::LedgerError;
use crate::models::Account;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Account with its children, ordered by code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountNode {
    #[serde(flatten)]
    pub account: Account,
    pub children: Vec<AccountNode>,
}

impl AccountNode {
    /// Depth-first search for `id` in this subtree.
    pub fn find(&self, id: &str) -> Option<&AccountNode> {
        if self.account.id.as_str() == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Number of nodes below this one.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

fn sort_nodes(nodes: &mut [AccountNode]) {
    nodes.sort_by(|a, b| compare_codes(&a.account.code, &b.account.code));
}

/// Rejects parent chains that loop back on themselves.
fn check_acyclic(accounts: &[Account], index: &HashMap<&str, usize>) -> Result<(), LedgerError> {
    let mut settled = vec![false; accounts.len()];

    for start in 0..accounts.len() {
        let mut path = Vec::new();
        let mut on_path = HashSet::new();
        let mut current = Some(start);

        while let Some(i) = current {
            if settled[i] {
                break;
            }
            if !on_path.insert(i) {
                return Err(LedgerError::CyclicParent(accounts[i].id.clone()));
            }
            path.push(i);
            current = accounts[i]
                .parent_id
                .as_ref()
                .and_then(|parent| index.get(parent.as_str()).copied());
        }

        for i in path {
            settled[i] = true;
        }
    }

    Ok(())
}

fn assemble(i: usize, accounts: &[Account], children_of: &HashMap<usize, Vec<usize>>) -> AccountNode {
    let mut children: Vec<AccountNode> = children_of
        .get(&i)
        .map(|kids| {
            kids.iter()
                .map(|&kid| assemble(kid, accounts, children_of))
                .collect()
        })
        .unwrap_or_default();
    sort_nodes(&mut children);

    AccountNode {
        account: accounts[i].clone(),
        children,
    }
}

/// Assemble a flat account list into a forest using `parent_id`
/// back-references. Accounts whose parent is unknown become roots.
pub fn build_tree(accounts: &[Account]) -> Result<Vec<AccountNode>, LedgerError> {
    let index: HashMap<&str, usize> = accounts
        .iter()
        .enumerate()
        .map(|(i, account)| (account.id.as_str(), i))
        .collect();

    check_acyclic(accounts, &index)?;

    let mut children_of: HashMap<usize, Vec<usize>> = HashMap::new();
    let mut roots = Vec::new();

    for (i, account) in accounts.iter().enumerate() {
        match account
            .parent_id
            .as_ref()
            .and_then(|parent| index.get(parent.as_str()))
        {
            Some(&parent) => children_of.entry(parent).or_default().push(i),
            None => roots.push(i),
        }
    }

    let mut nodes: Vec<AccountNode> = roots
        .into_iter()
        .map(|i| assemble(i, accounts, &children_of))
        .collect();
    sort_nodes(&mut nodes);

    tracing::debug!(
        accounts = accounts.len(),
        roots = nodes.len(),
        "Chart of accounts tree built"
    );

    Ok(nodes)
}

/// Pre-order flattening; `parent_id` of every account is kept as is.
pub fn flatten_tree(nodes: &[AccountNode]) -> Vec<Account> {
    fn walk(node: &AccountNode, out: &mut Vec<Account>) {
        out.push(node.account.clone());
        for child in &node.children {
            walk(child, out);
        }
    }

    let mut out = Vec::new();
    for node in nodes {
        walk(node, &mut out);
    }
    out
}
