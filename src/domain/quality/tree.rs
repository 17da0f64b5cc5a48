//! Quality tree: nodes plus the tag index used for ranking lookups.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{QualityAttribute, Score};

/// One node of a quality tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityMetricNode {
    pub attribute: QualityAttribute,
    pub value: Score,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<QualityMetricNode>,
}

impl QualityMetricNode {
    /// Creates a leaf node.
    pub fn leaf(attribute: QualityAttribute, value: Score) -> Self {
        Self {
            attribute,
            value,
            children: Vec::new(),
        }
    }

    /// Creates a composite node over already-built children.
    pub fn composite(
        attribute: QualityAttribute,
        value: Score,
        children: Vec<QualityMetricNode>,
    ) -> Self {
        Self {
            attribute,
            value,
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Depth-first, pre-order traversal.
    pub fn descendants(&self) -> Vec<&QualityMetricNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }
}

/// An immutable quality tree rooted at [`QualityAttribute::Quality`].
///
/// The tag index is built once here; ranking and constraint checks never walk
/// the tree. Serializes as its root node and rebuilds the index on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "QualityMetricNode", into = "QualityMetricNode")]
pub struct QualityTree {
    root: QualityMetricNode,
    index: HashMap<QualityAttribute, Score>,
}

impl QualityTree {
    /// Wraps a root node and indexes every attribute in it.
    ///
    /// If a tag appears more than once the first occurrence in pre-order wins.
    pub fn from_root(root: QualityMetricNode) -> Self {
        let mut index = HashMap::new();
        for node in root.descendants() {
            index.entry(node.attribute).or_insert(node.value);
        }
        Self { root, index }
    }

    pub fn root(&self) -> &QualityMetricNode {
        &self.root
    }

    /// Overall quality, i.e. the root value.
    pub fn overall(&self) -> Score {
        self.root.value
    }

    /// O(1) lookup of an attribute's value anywhere in the tree.
    pub fn value(&self, attribute: QualityAttribute) -> Option<Score> {
        self.index.get(&attribute).copied()
    }

    pub fn contains(&self, attribute: QualityAttribute) -> bool {
        self.index.contains_key(&attribute)
    }

    /// Number of distinct attributes in the tree.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl PartialEq for QualityTree {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}

impl From<QualityMetricNode> for QualityTree {
    fn from(root: QualityMetricNode) -> Self {
        Self::from_root(root)
    }
}

impl From<QualityTree> for QualityMetricNode {
    fn from(tree: QualityTree) -> Self {
        tree.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> QualityTree {
        let security = QualityMetricNode::composite(
            QualityAttribute::Security,
            Score::new(0.2),
            vec![QualityMetricNode::leaf(
                QualityAttribute::HotspotPriority,
                Score::new(0.2),
            )],
        );
        QualityTree::from_root(QualityMetricNode::composite(
            QualityAttribute::Quality,
            Score::new(0.9),
            vec![security],
        ))
    }

    #[test]
    fn indexes_every_node() {
        let tree = sample_tree();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.overall(), Score::new(0.9));
        assert_eq!(tree.value(QualityAttribute::Security), Some(Score::new(0.2)));
        assert_eq!(
            tree.value(QualityAttribute::HotspotPriority),
            Some(Score::new(0.2))
        );
        assert!(!tree.contains(QualityAttribute::Duplication));
    }

    #[test]
    fn descendants_are_pre_order() {
        let tree = sample_tree();
        let order: Vec<_> = tree.root().descendants().iter().map(|n| n.attribute).collect();
        assert_eq!(
            order,
            vec![
                QualityAttribute::Quality,
                QualityAttribute::Security,
                QualityAttribute::HotspotPriority
            ]
        );
    }

    #[test]
    fn deserialization_rebuilds_index() {
        let tree = sample_tree();
        let json = serde_json::to_string(&tree).unwrap();
        let loaded: QualityTree = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded, tree);
        assert_eq!(
            loaded.value(QualityAttribute::HotspotPriority),
            Some(Score::new(0.2))
        );
    }

    #[test]
    fn leaves_serialize_without_children_field() {
        let leaf = QualityMetricNode::leaf(QualityAttribute::Duplication, Score::ONE);
        let json = serde_json::to_string(&leaf).unwrap();
        assert_eq!(json, r#"{"attribute":"duplication","value":1.0}"#);
    }
}
