//! Rebuild an explicit forest from a flat array of head indices.
//!
//! Each token names its head by index; a token that is its own head is a
//! root. Resolution walks head chains iteratively with per-index state, so
//! long chains don't grow the call stack and cycles are reported instead of
//! looping forever.

use rustc_hash::FxHashSet;

use crate::error::TreeError;
use crate::token::Token;

/// One resolved token in the forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub parent: Option<usize>,
    pub level: usize,
    /// Child indices in ascending token order.
    pub children: Vec<usize>,
}

impl Node {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Forest of dependency trees, one node per token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    nodes: Vec<Node>,
    roots: Vec<usize>,
    depth: usize,
}

impl Tree {
    /// Build the forest for `tokens`.
    pub fn build(tokens: &[Token]) -> Result<Self, TreeError> {
        let len = tokens.len();
        for (index, tok) in tokens.iter().enumerate() {
            if tok.head >= len {
                return Err(TreeError::HeadOutOfBounds { index, head: tok.head, len });
            }
        }

        let mut marks = vec![Mark::Unvisited; len];
        let mut levels = vec![0usize; len];
        let mut roots = Vec::new();
        let mut seen_roots = FxHashSet::default();
        let mut depth = 0;
        let mut chain: Vec<usize> = Vec::new();

        for start in 0..len {
            if marks[start] == Mark::Done {
                continue;
            }

            // Walk up until we hit a resolved node or a root.
            let mut cur = start;
            let base = loop {
                match marks[cur] {
                    Mark::Done => break Some(levels[cur]),
                    Mark::InProgress => return Err(TreeError::Cycle { index: start }),
                    Mark::Unvisited => {}
                }
                marks[cur] = Mark::InProgress;
                let head = tokens[cur].head;
                if head == cur {
                    levels[cur] = 0;
                    marks[cur] = Mark::Done;
                    if seen_roots.insert(cur) {
                        roots.push(cur);
                    }
                    break None;
                }
                chain.push(cur);
                cur = head;
            };

            // Unwind: the top of `chain` sits directly under `cur`.
            let mut level = base.unwrap_or(0);
            while let Some(i) = chain.pop() {
                level += 1;
                levels[i] = level;
                marks[i] = Mark::Done;
                depth = depth.max(level);
            }
        }

        let mut nodes: Vec<Node> = levels
            .iter()
            .zip(tokens)
            .enumerate()
            .map(|(i, (&level, tok))| Node {
                parent: (tok.head != i).then_some(tok.head),
                level,
                children: Vec::new(),
            })
            .collect();

        for i in 0..len {
            if let Some(p) = nodes[i].parent {
                nodes[p].children.push(i);
            }
        }

        Ok(Tree { nodes, roots, depth })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, i: usize) -> &Node {
        &self.nodes[i]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Root indices in the order they were first encountered.
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Deepest level in the forest. Zero for an empty or flat forest.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// One-line description for diagnostics, e.g. `6 tokens, 1 root, depth 2`.
    pub fn summary(&self) -> String {
        let plural = |n: usize, word: &str| {
            if n == 1 { format!("{n} {word}") } else { format!("{n} {word}s") }
        };
        format!(
            "{}, {}, depth {}",
            plural(self.len(), "token"),
            plural(self.roots.len(), "root"),
            self.depth
        )
    }

    /// The token itself, or its nearest ancestor, whose level is at most `level`.
    pub fn ancestor_at(&self, i: usize, level: usize) -> usize {
        let mut node = i;
        while self.nodes[node].level > level {
            match self.nodes[node].parent {
                Some(p) => node = p,
                None => break,
            }
        }
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Token, hammer_sentence};

    fn heads(hs: &[usize]) -> Vec<Token> {
        hs.iter().map(|&h| Token::new("w", "DEP", h)).collect()
    }

    #[test]
    fn hammer_sentence_shape() {
        let doc = hammer_sentence();
        let tree = Tree::build(&doc.tokens).unwrap();
        assert_eq!(tree.roots(), &[2]);
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.node(1).level, 1);
        assert_eq!(tree.node(0).level, 2);
        assert_eq!(tree.node(2).children, vec![1, 4, 5]);
        assert_eq!(tree.node(4).children, vec![3]);
        assert!(tree.node(2).is_root());
    }

    #[test]
    fn levels_follow_parents() {
        let tokens = heads(&[3, 0, 1, 3, 3, 7, 5, 7]);
        let tree = Tree::build(&tokens).unwrap();
        let mut max = 0;
        for (i, n) in tree.nodes().iter().enumerate() {
            match n.parent {
                None => assert_eq!(n.level, 0, "root {i}"),
                Some(p) => assert_eq!(n.level, tree.node(p).level + 1, "token {i}"),
            }
            max = max.max(n.level);
        }
        assert_eq!(tree.depth(), max);
        let child_total: usize = tree.nodes().iter().map(|n| n.children.len()).sum();
        assert_eq!(child_total, tokens.len() - tree.roots().len());
    }

    #[test]
    fn children_ascend_even_when_resolved_late() {
        // Token 0 resolves 2 and 4 before 1 and 3 are visited.
        let tokens = heads(&[2, 4, 4, 2, 4]);
        let tree = Tree::build(&tokens).unwrap();
        assert_eq!(tree.node(4).children, vec![1, 2]);
        assert_eq!(tree.node(2).children, vec![0, 3]);
    }

    #[test]
    fn multiple_roots_in_order() {
        let tokens = heads(&[1, 1, 1, 4, 4, 4]);
        let tree = Tree::build(&tokens).unwrap();
        assert_eq!(tree.roots(), &[1, 4]);
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn cycle_is_an_error() {
        let tokens = heads(&[1, 2, 0, 3]);
        assert_eq!(Tree::build(&tokens), Err(TreeError::Cycle { index: 0 }));
    }

    #[test]
    fn cycle_hanging_off_resolved_chain() {
        let tokens = heads(&[0, 0, 3, 2]);
        assert_eq!(Tree::build(&tokens), Err(TreeError::Cycle { index: 2 }));
    }

    #[test]
    fn out_of_bounds_head() {
        let tokens = heads(&[0, 5]);
        assert_eq!(
            Tree::build(&tokens),
            Err(TreeError::HeadOutOfBounds { index: 1, head: 5, len: 2 })
        );
    }

    #[test]
    fn deep_chain_does_not_recurse() {
        let n = 200_000;
        let tokens: Vec<Token> = (0..n).map(|i| Token::new("w", "DEP", i.max(1) - 1)).collect();
        let tree = Tree::build(&tokens).unwrap();
        assert_eq!(tree.depth(), n - 1);
        assert_eq!(tree.roots(), &[0]);
    }

    #[test]
    fn empty_input() {
        let tree = Tree::build(&[]).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.depth(), 0);
        assert!(tree.roots().is_empty());
    }

    #[test]
    fn summary_line() {
        let tree = Tree::build(&hammer_sentence().tokens).unwrap();
        assert_eq!(tree.summary(), "6 tokens, 1 root, depth 2");
        let tree = Tree::build(&heads(&[0, 1])).unwrap();
        assert_eq!(tree.summary(), "2 tokens, 2 roots, depth 0");
    }

    #[test]
    fn ancestor_at_level() {
        let doc = hammer_sentence();
        let tree = Tree::build(&doc.tokens).unwrap();
        assert_eq!(tree.ancestor_at(0, 0), 2);
        assert_eq!(tree.ancestor_at(0, 1), 1);
        assert_eq!(tree.ancestor_at(0, 2), 0);
        assert_eq!(tree.ancestor_at(2, 1), 2);
        assert_eq!(tree.ancestor_at(3, 1), 4);
    }
}
