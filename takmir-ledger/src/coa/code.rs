use crate::models::Account;
use std::cmp::Ordering;

fn segments(code: &str) -> Vec<u64> {
    code.trim()
        .split('.')
        .map(|segment| segment.trim().parse::<u64>().unwrap_or(0))
        .collect()
}

/// Orders dot-delimited account codes numerically, segment by segment.
///
/// Missing trailing segments count as 0. When the numeric segments tie, the
/// shorter code comes first (`1.2` before `1.2.0`), and a final comparison
/// of the raw strings keeps distinct codes such as `1.01` and `1.1` apart.
pub fn compare_codes(a: &str, b: &str) -> Ordering {
    let left = segments(a);
    let right = segments(b);
    let len = left.len().max(right.len());

    for i in 0..len {
        let x = left.get(i).copied().unwrap_or(0);
        let y = right.get(i).copied().unwrap_or(0);
        match x.cmp(&y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    left.len()
        .cmp(&right.len())
        .then_with(|| a.trim().cmp(b.trim()))
}

/// Sort accounts in place by hierarchical code.
pub fn sort_by_code(accounts: &mut [Account]) {
    accounts.sort_by(|a, b| compare_codes(&a.code, &b.code));
}

/// Number of segments in a code; `"1.2.10"` has depth 3.
pub fn code_depth(code: &str) -> usize {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        0
    } else {
        trimmed.split('.').count()
    }
}

/// The code a new child of `parent_code` should get: the highest existing
/// direct child plus one, zero-padded to the widest sibling segment.
/// `None` asks for the next root-level code.
pub fn next_child_code(accounts: &[Account], parent_code: Option<&str>) -> String {
    let parent = parent_code.map(str::trim).filter(|p| !p.is_empty());

    let last_segments: Vec<&str> = accounts
        .iter()
        .filter_map(|account| {
            let code = account.code.trim();
            match parent {
                Some(parent) => code
                    .strip_prefix(parent)
                    .and_then(|rest| rest.strip_prefix('.'))
                    .filter(|rest| !rest.is_empty() && !rest.contains('.')),
                None => Some(code).filter(|c| !c.is_empty() && !c.contains('.')),
            }
        })
        .collect();

    let next = last_segments
        .iter()
        .filter_map(|segment| segment.parse::<u64>().ok())
        .max()
        .map_or(1, |max| max + 1);
    let width = last_segments.iter().map(|s| s.len()).max().unwrap_or(1);
    let segment = format!("{:0width$}", next, width = width);

    match parent {
        Some(parent) => format!("{}.{}", parent, segment),
        None => segment,
    }
}
