//! Account Hierarchy Service
//!
//! Rebuilds the main → sub → test forest from flat account records by
//! grouping on `parent_id`. Nodes are kept in an arena-style id map with an
//! explicit root list; parent chains are validated during construction so
//! the result is always a forest, even on malformed input.
//!
//! Anomalies never fail the build:
//! - a `parent_id` that resolves to nothing demotes the account to a root
//!   and is reported as `HierarchyWarning::OrphanParent`
//! - a parent chain that re-enters itself is broken at the node whose
//!   pointer closes the cycle, reported as `HierarchyWarning::CycleDetected`

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::domain::entities::account::Account;
use crate::domain::errors::HierarchyWarning;

#[derive(Debug, Clone)]
struct HierarchyNode {
    parent_id: Option<String>,
    /// Child ids in the input collection's relative order
    children: Vec<String>,
}

/// A rooted forest over one account snapshot.
#[derive(Debug, Clone)]
pub struct AccountHierarchy {
    nodes: HashMap<String, HierarchyNode>,
    roots: Vec<String>,
    warnings: Vec<HierarchyWarning>,
}

impl AccountHierarchy {
    /// Build the forest from flat records.
    pub fn build(accounts: &[Account]) -> Self {
        let known: HashSet<&str> = accounts.iter().map(|a| a.id.as_str()).collect();
        let mut warnings = Vec::new();

        // Effective parent per account: orphan references demote to root.
        let mut parent_of: HashMap<String, Option<String>> = HashMap::with_capacity(accounts.len());
        for account in accounts {
            let parent = match &account.parent_id {
                Some(pid) if known.contains(pid.as_str()) => Some(pid.clone()),
                Some(pid) => {
                    warn!(
                        account_id = %account.id,
                        missing_parent_id = %pid,
                        "Account parent does not resolve, demoting to root"
                    );
                    warnings.push(HierarchyWarning::OrphanParent {
                        account_id: account.id.clone(),
                        missing_parent_id: pid.clone(),
                    });
                    None
                }
                None => None,
            };
            parent_of.insert(account.id.clone(), parent);
        }

        // Break cycles: walk every parent chain; the node whose pointer
        // closes a cycle loses its parent.
        let mut acyclic: HashSet<String> = HashSet::with_capacity(accounts.len());
        for account in accounts {
            if acyclic.contains(&account.id) {
                continue;
            }
            let mut path: Vec<String> = vec![account.id.clone()];
            let mut on_path: HashSet<String> = path.iter().cloned().collect();
            loop {
                let current = path.last().cloned().unwrap_or_default();
                let next = parent_of.get(&current).cloned().flatten();
                match next {
                    None => break,
                    Some(ref p) if acyclic.contains(p) => break,
                    Some(p) if on_path.contains(&p) => {
                        warn!(
                            account_id = %current,
                            "Parent chain re-enters itself, demoting to root"
                        );
                        warnings.push(HierarchyWarning::CycleDetected {
                            account_id: current.clone(),
                        });
                        parent_of.insert(current, None);
                        break;
                    }
                    Some(p) => {
                        on_path.insert(p.clone());
                        path.push(p);
                    }
                }
            }
            acyclic.extend(path);
        }

        // Group children on the validated parents, preserving input order.
        let mut nodes: HashMap<String, HierarchyNode> = accounts
            .iter()
            .map(|a| {
                (
                    a.id.clone(),
                    HierarchyNode {
                        parent_id: parent_of.get(&a.id).cloned().flatten(),
                        children: Vec::new(),
                    },
                )
            })
            .collect();
        let mut roots = Vec::new();
        for account in accounts {
            match parent_of.get(&account.id).cloned().flatten() {
                Some(pid) => {
                    if let Some(parent) = nodes.get_mut(&pid) {
                        parent.children.push(account.id.clone());
                    }
                }
                None => roots.push(account.id.clone()),
            }
        }

        debug!(
            account_count = accounts.len(),
            root_count = roots.len(),
            warning_count = warnings.len(),
            "Built account hierarchy"
        );

        AccountHierarchy {
            nodes,
            roots,
            warnings,
        }
    }

    /// Root account ids, in input order.
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    /// Child ids of an account, in input order. Unknown ids have no children.
    pub fn children(&self, id: &str) -> &[String] {
        self.nodes.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Anomalies recovered during construction.
    pub fn warnings(&self) -> &[HierarchyWarning] {
        &self.warnings
    }

    /// Whether the snapshot contained this account id.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Path from the root down to the given account, inclusive.
    /// Empty when the id is unknown.
    pub fn ancestor_chain(&self, id: &str) -> Vec<String> {
        if !self.contains(id) {
            return Vec::new();
        }
        let mut chain = vec![id.to_string()];
        let mut current = id.to_string();
        while let Some(parent) = self.nodes.get(&current).and_then(|n| n.parent_id.clone()) {
            chain.push(parent.clone());
            current = parent;
        }
        chain.reverse();
        chain
    }

    /// True when `ancestor_id` appears strictly above `id`.
    pub fn is_descendant_of(&self, id: &str, ancestor_id: &str) -> bool {
        let mut current = match self.nodes.get(id) {
            Some(node) => node.parent_id.clone(),
            None => return false,
        };
        while let Some(pid) = current {
            if pid == ancestor_id {
                return true;
            }
            current = self.nodes.get(&pid).and_then(|n| n.parent_id.clone());
        }
        false
    }

    /// Pre-order traversal of every root and its descendants.
    pub fn flatten(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.nodes.len());
        for root in &self.roots {
            self.collect_preorder(root, &mut out);
        }
        out
    }

    /// The account and every descendant, pre-order.
    pub fn subtree_ids(&self, id: &str) -> Vec<String> {
        let mut out = Vec::new();
        if self.contains(id) {
            self.collect_preorder(id, &mut out);
        }
        out
    }

    fn collect_preorder(&self, id: &str, out: &mut Vec<String>) {
        out.push(id.to_string());
        for child in self.children(id) {
            self.collect_preorder(child, out);
        }
    }
}
