//! Dealer records and the dealer/sub-dealer tree.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::domain::foundation::DealerId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dealer {
    pub id: DealerId,
    pub name: String,
    /// Parent dealer for sub-dealers.
    pub parent_id: Option<DealerId>,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
}

/// One dealer and its sub-dealers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DealerNode {
    pub dealer: Dealer,
    pub children: Vec<DealerNode>,
}

/// A dealer with its depth in the tree, for indented display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatDealer<'a> {
    pub depth: usize,
    pub dealer: &'a Dealer,
}

impl DealerNode {
    pub fn leaf(dealer: Dealer) -> Self {
        Self {
            dealer,
            children: Vec::new(),
        }
    }

    /// Number of dealers in this subtree, including this one.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(DealerNode::size).sum::<usize>()
    }

    /// Builds the forest from a flat dealer listing.
    ///
    /// Dealers without a parent, or whose parent is not in the listing, are
    /// roots. Siblings are ordered by name. Each dealer appears exactly once
    /// even if the listing contains a parent cycle.
    pub fn build_forest(dealers: Vec<Dealer>) -> Vec<DealerNode> {
        let known: HashSet<DealerId> = dealers.iter().map(|d| d.id.clone()).collect();

        let mut children: HashMap<DealerId, Vec<Dealer>> = HashMap::new();
        let mut roots = Vec::new();
        for dealer in dealers {
            match dealer.parent_id.clone() {
                Some(parent) if known.contains(&parent) && parent != dealer.id => {
                    children.entry(parent).or_default().push(dealer)
                }
                _ => roots.push(dealer),
            }
        }

        let mut visited = HashSet::new();
        let mut forest = attach(roots, &mut children, &mut visited);

        // Whatever is left hangs off a cycle; promote it to roots.
        let mut leftovers: Vec<Dealer> = children.into_values().flatten().collect();
        leftovers.retain(|d| !visited.contains(&d.id));
        if !leftovers.is_empty() {
            let mut rest = HashMap::new();
            forest.extend(attach(leftovers, &mut rest, &mut visited));
        }

        forest
    }

    /// Depth-first, pre-order flattening of a forest.
    pub fn flatten(forest: &[DealerNode]) -> Vec<FlatDealer<'_>> {
        fn walk<'a>(node: &'a DealerNode, depth: usize, out: &mut Vec<FlatDealer<'a>>) {
            out.push(FlatDealer {
                depth,
                dealer: &node.dealer,
            });
            for child in &node.children {
                walk(child, depth + 1, out);
            }
        }

        let mut out = Vec::new();
        for root in forest {
            walk(root, 0, &mut out);
        }
        out
    }
}

fn attach(
    mut level: Vec<Dealer>,
    children: &mut HashMap<DealerId, Vec<Dealer>>,
    visited: &mut HashSet<DealerId>,
) -> Vec<DealerNode> {
    level.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

    let mut nodes = Vec::with_capacity(level.len());
    for dealer in level {
        if !visited.insert(dealer.id.clone()) {
            continue;
        }
        let kids = children.remove(&dealer.id).unwrap_or_default();
        let kids = attach(kids, children, visited);
        nodes.push(DealerNode {
            dealer,
            children: kids,
        });
    }
    nodes
}

/// Case-insensitive substring match on dealer names, for autocomplete.
///
/// Prefix matches come first, then alphabetical.
pub fn search_dealers<'a>(dealers: &'a [Dealer], query: &str, limit: usize) -> Vec<&'a Dealer> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<(bool, String, &Dealer)> = dealers
        .iter()
        .filter_map(|dealer| {
            let name = dealer.name.to_lowercase();
            name.contains(&needle)
                .then(|| (!name.starts_with(&needle), name, dealer))
        })
        .collect();
    matches.sort_by(|a, b| (a.0, &a.1).cmp(&(b.0, &b.1)));

    matches
        .into_iter()
        .take(limit)
        .map(|(_, _, dealer)| dealer)
        .collect()
}
