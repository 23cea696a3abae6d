//! Similarity-guided binary tree used by one build pass.
//!
//! Nodes live in an arena owned by the tree and point at their children by index; there are
//! no parent links. A node is only ever mutated by appending to its group or by filling an
//! empty child slot. The tree is built, flattened and dropped within a single pass.

use crate::metrics::SimilarityMetric;

/// Index of the root in the arena.
const ROOT: usize = 0;

#[derive(Debug)]
struct Node<T> {
    /// Never empty; `group[0]` is the representative.
    group: Vec<T>,
    left: Option<usize>,
    right: Option<usize>,
}

impl<T: AsRef<str>> Node<T> {
    fn leaf(group: Vec<T>) -> Self {
        debug_assert!(!group.is_empty());
        Self {
            group,
            left: None,
            right: None,
        }
    }

    fn head(&self) -> &str {
        self.group[0].as_ref()
    }
}

/// Where an inserted unit ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Placement {
    /// Appended to an existing node's group.
    Merged,
    /// Became a new node.
    Attached,
}

/// Outcome of a single insertion.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Insertion {
    pub(crate) placement: Placement,
    /// Node the unit was merged into or attached as.
    pub(crate) node: usize,
    /// Metric calls spent on this insertion.
    pub(crate) comparisons: usize,
}

/// Counters for one build pass, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct PassStats {
    pub(crate) units: usize,
    pub(crate) groups: usize,
    pub(crate) merges: usize,
    pub(crate) comparisons: usize,
}

#[derive(Debug)]
pub(crate) struct ClusterTree<T> {
    nodes: Vec<Node<T>>,
}

impl<T: AsRef<str>> ClusterTree<T> {
    /// Start a tree whose root holds `root`.
    pub(crate) fn new(root: Vec<T>) -> Self {
        Self {
            nodes: vec![Node::leaf(root)],
        }
    }

    fn attach(&mut self, group: Vec<T>) -> usize {
        self.nodes.push(Node::leaf(group));
        self.nodes.len() - 1
    }

    fn merge(&mut self, idx: usize, unit: Vec<T>) {
        self.nodes[idx].group.extend(unit);
    }

    /// Insert `unit` by descending from the root.
    ///
    /// At each node the unit merges into the node when its representative scores at least
    /// `threshold` against the node's. Otherwise it takes a free left slot; with only the
    /// right slot free it merges into a close enough left child or takes the right slot. With
    /// both children present it merges into, or descends towards, the child it scores higher
    /// against. Ties go left.
    ///
    /// The metric is always called as `compare(unit_head, node_head)`.
    pub(crate) fn insert<M>(&mut self, unit: Vec<T>, metric: &M, threshold: f64) -> Insertion
    where
        M: SimilarityMetric + ?Sized,
    {
        debug_assert!(!unit.is_empty());
        let mut current = ROOT;
        let mut comparisons = 0;

        loop {
            let head = unit[0].as_ref();
            let node = &self.nodes[current];
            let (left, right) = (node.left, node.right);

            comparisons += 1;
            if metric.compare(head, node.head()) >= threshold {
                self.merge(current, unit);
                return Insertion::merged(current, comparisons);
            }

            let Some(left) = left else {
                let child = self.attach(unit);
                self.nodes[current].left = Some(child);
                return Insertion::attached(child, comparisons);
            };

            comparisons += 1;
            let left_sim = metric.compare(head, self.nodes[left].head());

            let Some(right) = right else {
                if left_sim >= threshold {
                    self.merge(left, unit);
                    return Insertion::merged(left, comparisons);
                }
                let child = self.attach(unit);
                self.nodes[current].right = Some(child);
                return Insertion::attached(child, comparisons);
            };

            comparisons += 1;
            let right_sim = metric.compare(head, self.nodes[right].head());

            let (next, sim) = if left_sim >= right_sim {
                (left, left_sim)
            } else {
                (right, right_sim)
            };

            if sim >= threshold {
                self.merge(next, unit);
                return Insertion::merged(next, comparisons);
            }
            current = next;
        }
    }

    /// Node indices in pre-order: node, then its whole left subtree, then its right subtree.
    fn preorder(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        // Explicit stack: degenerate insertion orders build chains as deep as the input.
        let mut stack = vec![ROOT];

        while let Some(idx) = stack.pop() {
            order.push(idx);
            let node = &self.nodes[idx];
            if let Some(right) = node.right {
                stack.push(right);
            }
            if let Some(left) = node.left {
                stack.push(left);
            }
        }

        order
    }

    /// Flatten the tree into its groups, in pre-order.
    pub(crate) fn into_groups(self) -> Vec<Vec<T>> {
        let order = self.preorder();
        let mut slots: Vec<Option<Vec<T>>> =
            self.nodes.into_iter().map(|node| Some(node.group)).collect();
        order
            .into_iter()
            .filter_map(|idx| slots[idx].take())
            .collect()
    }

    /// Longest root-to-leaf path, counted in nodes.
    #[cfg(test)]
    fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(ROOT, 1)];
        while let Some((idx, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let node = &self.nodes[idx];
            for child in [node.left, node.right].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }
        deepest
    }
}

impl Insertion {
    fn merged(node: usize, comparisons: usize) -> Self {
        Self {
            placement: Placement::Merged,
            node,
            comparisons,
        }
    }

    fn attached(node: usize, comparisons: usize) -> Self {
        Self {
            placement: Placement::Attached,
            node,
            comparisons,
        }
    }
}

/// Run one build pass: insert every unit into a fresh tree and flatten it.
///
/// The first unit becomes the root; the rest are inserted in order. An empty input yields an
/// empty output. `pass` only labels trace output.
pub(crate) fn build_pass<T, M>(
    units: Vec<Vec<T>>,
    metric: &M,
    threshold: f64,
    pass: usize,
) -> (Vec<Vec<T>>, PassStats)
where
    T: AsRef<str>,
    M: SimilarityMetric + ?Sized,
{
    let mut stats = PassStats {
        units: units.len(),
        ..PassStats::default()
    };

    let mut units = units.into_iter();
    let Some(root) = units.next() else {
        return (Vec::new(), stats);
    };

    let mut tree = ClusterTree::new(root);
    for unit in units {
        let size = unit.len();
        let insertion = tree.insert(unit, metric, threshold);
        stats.comparisons += insertion.comparisons;
        if insertion.placement == Placement::Merged {
            stats.merges += 1;
            if log::log_enabled!(log::Level::Trace) {
                let group = &tree.nodes[insertion.node].group;
                log::trace!(
                    "pass {}: merged {:?} ({} members) into group headed by {:?}",
                    pass,
                    group[group.len() - size].as_ref(),
                    size,
                    group[0].as_ref(),
                );
            }
        }
    }

    let groups = tree.into_groups();
    stats.groups = groups.len();
    (groups, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn singletons(items: &[&'static str]) -> Vec<Vec<&'static str>> {
        items.iter().map(|&s| vec![s]).collect()
    }

    fn never(_: &str, _: &str) -> f64 {
        0.0
    }

    /// Similarity by first letter only.
    fn initial(a: &str, b: &str) -> f64 {
        if a.chars().next() == b.chars().next() {
            1.0
        } else {
            0.0
        }
    }

    #[test]
    fn test_fills_left_then_right() {
        let mut tree = ClusterTree::new(vec!["root"]);
        let first = tree.insert(vec!["a"], &never, 0.5);
        let second = tree.insert(vec!["b"], &never, 0.5);

        assert_eq!(first.placement, Placement::Attached);
        assert_eq!(first.comparisons, 1);
        assert_eq!(second.placement, Placement::Attached);
        assert_eq!(second.comparisons, 2);
        assert_eq!(tree.into_groups(), vec![vec!["root"], vec!["a"], vec!["b"]]);
    }

    #[test]
    fn test_free_right_slot_still_merges_left() {
        let mut tree = ClusterTree::new(vec!["root"]);
        tree.insert(vec!["apple"], &initial, 1.0);
        let ins = tree.insert(vec!["avocado"], &initial, 1.0);

        assert_eq!(ins.placement, Placement::Merged);
        assert_eq!(tree.into_groups(), vec![vec!["root"], vec!["apple", "avocado"]]);
    }

    #[test]
    fn test_ties_descend_left() {
        let mut tree = ClusterTree::new(vec!["r"]);
        tree.insert(vec!["a"], &never, 0.5);
        tree.insert(vec!["b"], &never, 0.5);
        // Both children score 0.0, so "c" goes under the left child.
        tree.insert(vec!["c"], &never, 0.5);

        assert_eq!(tree.nodes[1].left, Some(3));
        assert_eq!(
            tree.into_groups(),
            vec![vec!["r"], vec!["a"], vec!["c"], vec!["b"]]
        );
    }

    #[test]
    fn test_picks_more_similar_child() {
        let score = |a: &str, b: &str| match (a, b) {
            ("x", "right") => 0.8,
            ("x", "left") => 0.2,
            _ => 0.0,
        };
        let mut tree = ClusterTree::new(vec!["root"]);
        tree.insert(vec!["left"], &score, 0.5);
        tree.insert(vec!["right"], &score, 0.5);
        let ins = tree.insert(vec!["x"], &score, 0.5);

        assert_eq!(ins.placement, Placement::Merged);
        assert_eq!(ins.comparisons, 3);
        assert_eq!(
            tree.into_groups(),
            vec![vec!["root"], vec!["left"], vec!["right", "x"]]
        );
    }

    #[test]
    fn test_merge_appends_whole_unit() {
        let mut tree = ClusterTree::new(vec!["a1"]);
        tree.insert(vec!["a2", "zz", "yy"], &initial, 1.0);
        assert_eq!(tree.into_groups(), vec![vec!["a1", "a2", "zz", "yy"]]);
    }

    #[test]
    fn test_metric_argument_order() {
        // Only "new head vs existing head" scores high.
        let directed = |a: &str, b: &str| if (a, b) == ("new", "old") { 1.0 } else { 0.0 };
        let mut tree = ClusterTree::new(vec!["old"]);
        assert_eq!(tree.insert(vec!["new"], &directed, 0.5).placement, Placement::Merged);

        let mut tree = ClusterTree::new(vec!["new"]);
        assert_eq!(tree.insert(vec!["old"], &directed, 0.5).placement, Placement::Attached);
    }

    #[test]
    fn test_nan_never_merges() {
        let nan = |_: &str, _: &str| f64::NAN;
        let (groups, stats) = build_pass(singletons(&["a", "b", "c", "d"]), &nan, 0.0, 1);
        assert_eq!(groups.len(), 4);
        assert_eq!(stats.merges, 0);
    }

    #[test]
    fn test_nan_descends_right() {
        let nan = |_: &str, _: &str| f64::NAN;
        let mut tree = ClusterTree::new(vec!["r"]);
        for item in ["a", "b", "c", "d"] {
            tree.insert(vec![item], &nan, 0.0);
        }

        // "a" and "b" fill the root's slots; "c" and "d" lose `left >= right` and go right.
        assert_eq!(tree.nodes[ROOT].right, Some(2));
        assert_eq!(tree.nodes[2].left, Some(3));
        assert_eq!(tree.nodes[2].right, Some(4));
        assert_eq!(tree.nodes[1].left, None);
        assert_eq!(
            tree.into_groups(),
            vec![vec!["r"], vec!["a"], vec!["b"], vec!["c"], vec!["d"]]
        );
    }

    #[test]
    fn test_insertion_reports_node() {
        let mut tree = ClusterTree::new(vec!["root"]);
        let apple = tree.insert(vec!["apple"], &initial, 1.0);
        let avocado = tree.insert(vec!["avocado"], &initial, 1.0);

        assert_eq!(apple.placement, Placement::Attached);
        assert_eq!(apple.node, 1);
        assert_eq!(avocado.placement, Placement::Merged);
        assert_eq!(avocado.node, 1);
    }

    #[test]
    fn test_merges_are_traced() {
        use std::sync::Mutex;

        static LINES: Mutex<Vec<String>> = Mutex::new(Vec::new());

        struct Capture;

        impl log::Log for Capture {
            fn enabled(&self, _: &log::Metadata<'_>) -> bool {
                true
            }

            fn log(&self, record: &log::Record<'_>) {
                if record.level() == log::Level::Trace {
                    if let Ok(mut lines) = LINES.lock() {
                        lines.push(record.args().to_string());
                    }
                }
            }

            fn flush(&self) {}
        }

        static CAPTURE: Capture = Capture;
        let _ = log::set_logger(&CAPTURE);
        log::set_max_level(log::LevelFilter::Trace);

        build_pass(
            vec![vec!["apricot"], vec!["banana"], vec!["blueberry", "cherry"]],
            &initial,
            1.0,
            7,
        );

        let lines = LINES.lock().unwrap();
        assert!(lines.iter().any(|line| line
            == "pass 7: merged \"blueberry\" (2 members) into group headed by \"banana\""));
    }

    #[test]
    fn test_build_pass_empty() {
        let (groups, stats) = build_pass(Vec::<Vec<&str>>::new(), &never, 0.5, 1);
        assert!(groups.is_empty());
        assert_eq!(stats, PassStats::default());
    }

    #[test]
    fn test_build_pass_stats() {
        let (groups, stats) = build_pass(singletons(&["ab", "ac", "bd", "be"]), &initial, 1.0, 1);
        assert_eq!(groups, vec![vec!["ab", "ac"], vec!["bd", "be"]]);
        assert_eq!(stats.units, 4);
        assert_eq!(stats.groups, 2);
        assert_eq!(stats.merges, 2);
    }

    #[test]
    fn test_deep_tree_flattens() {
        let items: Vec<String> = (0..3000).map(|i| format!("item-{i}")).collect();
        let mut units = items.iter().map(|s| vec![s.as_str()]);
        let mut tree = ClusterTree::new(units.next().unwrap());
        for unit in units {
            tree.insert(unit, &never, 0.5);
        }

        assert!(tree.depth() > 1000);
        let groups = tree.into_groups();
        assert_eq!(groups.len(), items.len());
        assert_eq!(groups[0], vec!["item-0"]);
    }
}
