//! Tree Builder
//!
//! Derives the parent -> children forest from the flat position list.
//! Pure and synchronous; the forest is recomputed, never mutated.

use std::collections::{BTreeSet, HashMap, HashSet};

use log::warn;

use crate::domain::Position;

/// A position with its children populated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub position: Position,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn id(&self) -> &str {
        &self.position.id
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Number of nodes below this one
    pub fn descendant_count(&self) -> usize {
        self.children.iter().map(|c| 1 + c.descendant_count()).sum()
    }

    fn find(&self, id: &str) -> Option<&TreeNode> {
        if self.id() == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }
}

/// Data integrity problems found while building
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeIssue {
    /// `parent_id` refers to no position in the list
    Orphan { id: String, parent_id: String },
    /// Positions that are each other's ancestors; none of them is rendered
    Cycle { members: Vec<String> },
    /// Same id seen again; only the first occurrence is used
    DuplicateId { id: String },
}

impl TreeIssue {
    pub fn describe(&self) -> String {
        match self {
            TreeIssue::Orphan { id, parent_id } => {
                format!("Position {} refers to missing parent {}", id, parent_id)
            }
            TreeIssue::Cycle { members } => {
                format!("Positions {} form a parent cycle", members.join(" -> "))
            }
            TreeIssue::DuplicateId { id } => format!("Position id {} appears more than once", id),
        }
    }
}

/// One rendered row: position, depth and whether it can be expanded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub position: Position,
    pub depth: usize,
    pub has_children: bool,
}

/// Derived forest, one tree per root position
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Forest {
    roots: Vec<TreeNode>,
    hidden: Vec<String>,
    issues: Vec<TreeIssue>,
}

impl Forest {
    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    /// Diagnostics for callers who care about data integrity
    pub fn issues(&self) -> &[TreeIssue] {
        &self.issues
    }

    /// Ids present in the list but not reachable from any root
    pub fn hidden_ids(&self) -> &[String] {
        &self.hidden
    }

    /// Number of nodes in the forest
    pub fn len(&self) -> usize {
        self.roots.iter().map(|r| 1 + r.descendant_count()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&TreeNode> {
        self.roots.iter().find_map(|r| r.find(id))
    }

    /// Positions in pre-order
    pub fn flatten(&self) -> Vec<Position> {
        fn collect(node: &TreeNode, out: &mut Vec<Position>) {
            out.push(node.position.clone());
            for child in &node.children {
                collect(child, out);
            }
        }

        let mut out = Vec::with_capacity(self.len());
        for root in &self.roots {
            collect(root, &mut out);
        }
        out
    }

    /// Ids of every node that has children
    pub fn expandable_ids(&self) -> Vec<String> {
        fn collect(node: &TreeNode, out: &mut Vec<String>) {
            if node.has_children() {
                out.push(node.position.id.clone());
                for child in &node.children {
                    collect(child, out);
                }
            }
        }

        let mut out = Vec::new();
        for root in &self.roots {
            collect(root, &mut out);
        }
        out
    }

    /// Rows in display order, descending only into expanded nodes
    pub fn visible_rows(&self, expanded: &BTreeSet<String>) -> Vec<TreeRow> {
        fn collect(
            node: &TreeNode,
            depth: usize,
            expanded: &BTreeSet<String>,
            out: &mut Vec<TreeRow>,
        ) {
            out.push(TreeRow {
                position: node.position.clone(),
                depth,
                has_children: node.has_children(),
            });
            if expanded.contains(node.id()) {
                for child in &node.children {
                    collect(child, depth + 1, expanded, out);
                }
            }
        }

        let mut out = Vec::new();
        for root in &self.roots {
            collect(root, 0, expanded, &mut out);
        }
        out
    }
}

/// Build the forest from a flat list
///
/// Roots are positions without parent; siblings keep their order of
/// appearance. Orphans, cycles and duplicate ids are left out of the forest
/// and reported through `Forest::issues`.
pub fn build_tree(positions: &[Position]) -> Forest {
    let mut issues = Vec::new();

    // First occurrence of each id wins
    let mut seen: HashSet<&str> = HashSet::new();
    let mut unique: Vec<&Position> = Vec::with_capacity(positions.len());
    for position in positions {
        if seen.insert(position.id.as_str()) {
            unique.push(position);
        } else {
            issues.push(TreeIssue::DuplicateId {
                id: position.id.clone(),
            });
        }
    }

    let mut children_map: HashMap<&str, Vec<&Position>> = HashMap::new();
    for position in unique.iter().copied() {
        if let Some(parent_id) = &position.parent_id {
            children_map
                .entry(parent_id.as_str())
                .or_default()
                .push(position);
        }
    }

    fn build_node<'a>(
        position: &'a Position,
        children_map: &HashMap<&str, Vec<&'a Position>>,
        placed: &mut HashSet<&'a str>,
    ) -> TreeNode {
        placed.insert(position.id.as_str());
        let mut children = Vec::new();
        if let Some(kids) = children_map.get(position.id.as_str()) {
            for child in kids {
                // A placed id means a back-edge; never recurse into it twice
                if placed.contains(child.id.as_str()) {
                    continue;
                }
                children.push(build_node(*child, children_map, placed));
            }
        }
        TreeNode {
            position: position.clone(),
            children,
        }
    }

    let mut placed: HashSet<&str> = HashSet::new();
    let roots: Vec<TreeNode> = unique
        .iter()
        .copied()
        .filter(|p| p.is_root())
        .map(|root| build_node(root, &children_map, &mut placed))
        .collect();

    let hidden: Vec<&Position> = unique
        .iter()
        .copied()
        .filter(|p| !placed.contains(p.id.as_str()))
        .collect();

    if !hidden.is_empty() {
        issues.extend(classify_hidden(&unique, &hidden));
    }
    for issue in &issues {
        warn!("[TREE] {}", issue.describe());
    }

    Forest {
        roots,
        hidden: hidden.iter().map(|p| p.id.clone()).collect(),
        issues,
    }
}

/// Explain why positions are unreachable: a missing parent, or a cycle.
/// Positions that merely hang below one of those get no issue of their own.
fn classify_hidden(unique: &[&Position], hidden: &[&Position]) -> Vec<TreeIssue> {
    let order: HashMap<&str, usize> = unique
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id.as_str(), i))
        .collect();
    let parent_of: HashMap<&str, Option<&str>> = unique
        .iter()
        .map(|p| (p.id.as_str(), p.parent_id.as_deref()))
        .collect();

    let mut issues = Vec::new();
    let mut done: HashSet<&str> = HashSet::new();

    for start in hidden {
        let start_id = start.id.as_str();
        if let Some(parent_id) = start.parent_id.as_deref() {
            if !parent_of.contains_key(parent_id) {
                issues.push(TreeIssue::Orphan {
                    id: start.id.clone(),
                    parent_id: parent_id.to_string(),
                });
            }
        }

        // Walk parent pointers; a repeat within this walk closes a cycle
        let mut walk: Vec<&str> = Vec::new();
        let mut current = Some(start_id);
        while let Some(id) = current {
            if done.contains(id) {
                break;
            }
            if let Some(at) = walk.iter().position(|w| *w == id) {
                let mut members: Vec<&str> = walk[at..].to_vec();
                members.sort_by_key(|m| order[m]);
                issues.push(TreeIssue::Cycle {
                    members: members.into_iter().map(str::to_string).collect(),
                });
                break;
            }
            walk.push(id);
            current = parent_of.get(id).copied().flatten().filter(|p| parent_of.contains_key(p));
        }
        done.extend(walk);
    }

    issues
}

/// Every id below `id`, following parent references
pub fn descendant_ids(positions: &[Position], id: &str) -> BTreeSet<String> {
    let mut children_map: HashMap<&str, Vec<&str>> = HashMap::new();
    for position in positions {
        if let Some(parent_id) = &position.parent_id {
            children_map
                .entry(parent_id.as_str())
                .or_default()
                .push(position.id.as_str());
        }
    }

    let mut found = BTreeSet::new();
    let mut to_visit = vec![id];
    while let Some(current) = to_visit.pop() {
        for child in children_map.get(current).into_iter().flatten() {
            if *child != id && found.insert(child.to_string()) {
                to_visit.push(*child);
            }
        }
    }
    found
}

/// Whether giving `id` the parent `new_parent` would make it its own ancestor
pub fn would_create_cycle(positions: &[Position], id: &str, new_parent: Option<&str>) -> bool {
    let parent_of: HashMap<&str, Option<&str>> = positions
        .iter()
        .map(|p| (p.id.as_str(), p.parent_id.as_deref()))
        .collect();

    let mut visited: HashSet<&str> = HashSet::new();
    let mut current = new_parent;
    while let Some(ancestor) = current {
        if ancestor == id {
            return true;
        }
        if !visited.insert(ancestor) {
            // Pre-existing cycle that does not include `id`
            return false;
        }
        current = parent_of.get(ancestor).copied().flatten();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewPosition;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn pos(id: &str, parent: Option<&str>) -> Position {
        Position::from_new(
            id,
            NewPosition {
                name: format!("Position {}", id),
                description: String::new(),
                parent_id: parent.map(str::to_string),
            },
        )
    }

    fn ids(nodes: &[TreeNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.id()).collect()
    }

    /// child id -> parent id as placed in the forest
    fn relations(forest: &Forest) -> BTreeMap<String, Option<String>> {
        fn walk(node: &TreeNode, parent: Option<&str>, out: &mut BTreeMap<String, Option<String>>) {
            let previous = out.insert(node.position.id.clone(), parent.map(str::to_string));
            assert!(previous.is_none(), "{} placed twice", node.id());
            for child in &node.children {
                walk(child, Some(node.id()), out);
            }
        }

        let mut out = BTreeMap::new();
        for root in forest.roots() {
            walk(root, None, &mut out);
        }
        out
    }

    #[test]
    fn test_build_tree_nesting() {
        let positions = vec![
            pos("ceo", None),
            pos("cfo", Some("ceo")),
            pos("cto", Some("ceo")),
            pos("acct", Some("cfo")),
            pos("board", None),
        ];

        let forest = build_tree(&positions);

        assert_eq!(ids(forest.roots()), vec!["ceo", "board"]);
        let ceo = &forest.roots()[0];
        assert_eq!(ids(&ceo.children), vec!["cfo", "cto"]);
        assert_eq!(ids(&ceo.children[0].children), vec!["acct"]);
        assert_eq!(forest.len(), 5);
        assert!(forest.issues().is_empty());
    }

    #[test]
    fn test_siblings_keep_input_order() {
        let positions = vec![
            pos("z", Some("root")),
            pos("root", None),
            pos("a", Some("root")),
            pos("m", Some("root")),
        ];
        let forest = build_tree(&positions);
        assert_eq!(ids(&forest.roots()[0].children), vec!["z", "a", "m"]);
    }

    #[test]
    fn test_orphan_is_hidden_and_reported() {
        let positions = vec![pos("a", None), pos("b", Some("missing"))];

        let forest = build_tree(&positions);

        assert_eq!(ids(forest.roots()), vec!["a"]);
        assert!(forest.roots()[0].children.is_empty());
        assert!(forest.find("b").is_none());
        assert_eq!(forest.hidden_ids(), ["b".to_string()]);
        assert_eq!(
            forest.issues(),
            [TreeIssue::Orphan { id: "b".into(), parent_id: "missing".into() }]
        );
    }

    #[test]
    fn test_orphan_subtree_is_hidden_with_one_issue() {
        let positions = vec![pos("b", Some("gone")), pos("c", Some("b"))];
        let forest = build_tree(&positions);

        assert!(forest.is_empty());
        assert_eq!(forest.hidden_ids(), ["b".to_string(), "c".to_string()]);
        assert_eq!(forest.issues().len(), 1);
    }

    #[test]
    fn test_two_cycle_terminates() {
        let positions = vec![pos("a", Some("b")), pos("b", Some("a"))];

        let forest = build_tree(&positions);

        assert!(forest.is_empty());
        assert_eq!(
            forest.issues(),
            [TreeIssue::Cycle { members: vec!["a".into(), "b".into()] }]
        );
    }

    #[test]
    fn test_self_parent_and_tail_into_cycle() {
        let positions = vec![
            pos("root", None),
            pos("self", Some("self")),
            pos("x", Some("y")),
            pos("y", Some("z")),
            pos("z", Some("y")),
        ];

        let forest = build_tree(&positions);

        assert_eq!(ids(forest.roots()), vec!["root"]);
        assert_eq!(forest.hidden_ids().len(), 4);
        assert_eq!(
            forest.issues(),
            [
                TreeIssue::Cycle { members: vec!["self".into()] },
                TreeIssue::Cycle { members: vec!["y".into(), "z".into()] },
            ]
        );
    }

    #[test]
    fn test_duplicate_ids_use_first() {
        let positions = vec![pos("a", None), pos("a", Some("a")), pos("b", Some("a"))];

        let forest = build_tree(&positions);

        assert_eq!(forest.len(), 2);
        assert_eq!(ids(&forest.roots()[0].children), vec!["b"]);
        assert_eq!(forest.issues(), [TreeIssue::DuplicateId { id: "a".into() }]);
    }

    #[test]
    fn test_visible_rows_follow_expansion() {
        let positions = vec![
            pos("ceo", None),
            pos("cfo", Some("ceo")),
            pos("acct", Some("cfo")),
            pos("cto", Some("ceo")),
        ];
        let forest = build_tree(&positions);

        let collapsed = forest.visible_rows(&BTreeSet::new());
        assert_eq!(collapsed.len(), 1);
        assert!(collapsed[0].has_children);

        let expanded: BTreeSet<String> = ["ceo", "cfo"].iter().map(|s| s.to_string()).collect();
        let rows = forest.visible_rows(&expanded);
        let shape: Vec<(&str, usize)> = rows.iter().map(|r| (r.position.id.as_str(), r.depth)).collect();
        assert_eq!(shape, vec![("ceo", 0), ("cfo", 1), ("acct", 2), ("cto", 1)]);
        assert_eq!(forest.expandable_ids(), vec!["ceo", "cfo"]);
    }

    #[test]
    fn test_descendants_and_cycle_guard() {
        let positions = vec![
            pos("ceo", None),
            pos("cfo", Some("ceo")),
            pos("acct", Some("cfo")),
            pos("cto", Some("ceo")),
        ];

        let below: Vec<_> = descendant_ids(&positions, "cfo").into_iter().collect();
        assert_eq!(below, vec!["acct"]);
        assert_eq!(descendant_ids(&positions, "ceo").len(), 3);

        assert!(would_create_cycle(&positions, "ceo", Some("acct")));
        assert!(would_create_cycle(&positions, "cfo", Some("cfo")));
        assert!(!would_create_cycle(&positions, "cto", Some("acct")));
        assert!(!would_create_cycle(&positions, "acct", None));
    }

    #[test]
    fn test_cycle_guard_stops_on_existing_cycle() {
        let positions = vec![pos("a", Some("b")), pos("b", Some("a")), pos("c", None)];
        assert!(!would_create_cycle(&positions, "c", Some("a")));
        assert!(descendant_ids(&positions, "a").contains("b"));
    }

    fn acyclic_list() -> impl Strategy<Value = Vec<Position>> {
        prop::collection::vec(prop::option::of(any::<prop::sample::Index>()), 0..40)
            .prop_map(|parents| {
                parents
                    .iter()
                    .enumerate()
                    .map(|(i, parent)| {
                        let parent_id = match parent {
                            Some(idx) if i > 0 => Some(format!("p{}", idx.index(i))),
                            _ => None,
                        };
                        pos(&format!("p{}", i), parent_id.as_deref())
                    })
                    .collect::<Vec<_>>()
            })
            .prop_shuffle()
    }

    proptest! {
        #[test]
        fn prop_every_position_placed_under_its_parent(positions in acyclic_list()) {
            let forest = build_tree(&positions);
            let placed = relations(&forest);

            prop_assert_eq!(placed.len(), positions.len());
            for position in &positions {
                prop_assert_eq!(placed.get(&position.id), Some(&position.parent_id));
            }
            prop_assert!(forest.issues().is_empty());
        }

        #[test]
        fn prop_siblings_in_input_order(positions in acyclic_list()) {
            let forest = build_tree(&positions);
            for position in &positions {
                let node = forest.find(&position.id).unwrap();
                let expected: Vec<&str> = positions
                    .iter()
                    .filter(|p| p.parent_id.as_deref() == Some(position.id.as_str()))
                    .map(|p| p.id.as_str())
                    .collect();
                prop_assert_eq!(ids(&node.children), expected);
            }
        }

        #[test]
        fn prop_flatten_round_trip(positions in acyclic_list()) {
            let forest = build_tree(&positions);
            let rebuilt = build_tree(&forest.flatten());
            prop_assert_eq!(relations(&rebuilt), relations(&forest));
        }
    }
}
