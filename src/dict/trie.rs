use std::collections::HashMap;

use crate::syllable::Syllable;

/// Trie over characters for multi-character dictionary keys.
///
/// Values carry one pinned [`Syllable`] per character of the key, so a
/// match hands the segmenter a reading for every covered position.
pub struct PhraseTrie {
    root: Node,
    max_depth: usize,
}

struct Node {
    children: HashMap<char, Node>,
    readings: Option<Vec<Syllable>>,
}

impl Node {
    fn new() -> Self {
        Self {
            children: HashMap::new(),
            readings: None,
        }
    }
}

impl PhraseTrie {
    pub fn new() -> Self {
        Self {
            root: Node::new(),
            max_depth: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Longest key length currently stored. Bounds the segmenter's
    /// lookahead.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn insert(&mut self, key: &str, readings: Vec<Syllable>) {
        let mut node = &mut self.root;
        let mut depth = 0;
        for c in key.chars() {
            node = node.children.entry(c).or_insert_with(Node::new);
            depth += 1;
        }
        node.readings = Some(readings);
        self.max_depth = self.max_depth.max(depth);
    }

    /// Walk `chars` from the start and return the longest stored key as
    /// (char count, per-character readings). Later matches of equal
    /// length cannot exist; longer keys always win.
    pub fn longest_match<'a>(
        &'a self,
        chars: impl IntoIterator<Item = char>,
    ) -> Option<(usize, &'a [Syllable])> {
        let mut node = &self.root;
        let mut best: Option<(usize, &[Syllable])> = None;
        for (i, c) in chars.into_iter().enumerate() {
            match node.children.get(&c) {
                Some(child) => node = child,
                None => break,
            }
            if let Some(readings) = &node.readings {
                best = Some((i + 1, readings.as_slice()));
            }
        }
        best
    }

    /// Iterate all (key, readings) pairs, for serialization.
    pub fn iter(&self) -> Vec<(String, &Vec<Syllable>)> {
        let mut out = Vec::new();
        let mut prefix = String::new();
        collect(&self.root, &mut prefix, &mut out);
        out
    }
}

fn collect<'a>(node: &'a Node, prefix: &mut String, out: &mut Vec<(String, &'a Vec<Syllable>)>) {
    if let Some(readings) = &node.readings {
        out.push((prefix.clone(), readings));
    }
    for (&c, child) in &node.children {
        prefix.push(c);
        collect(child, prefix, out);
        prefix.pop();
    }
}

impl Default for PhraseTrie {
    fn default() -> Self {
        Self::new()
    }
}
