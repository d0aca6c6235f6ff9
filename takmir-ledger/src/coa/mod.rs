//! Chart of accounts: code ordering, normal balance resolution and the
//! parent/child tree.

mod code;
mod normal_balance;
mod tree;

pub use code::{code_depth, compare_codes, next_child_code, sort_by_code};
pub use normal_balance::is_normal_balance;
pub use tree::{build_tree, flatten_tree, AccountNode};
