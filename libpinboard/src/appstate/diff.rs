//! Edit scripts between two displayed post lists
//!
//! A [`PostListDiff`] is attached to every [`PostList`](super::PostList)
//! produced by a list update. The presentation layer reads the edit
//! script once to animate only the rows that changed. Computing it is
//! deferred until the first call to [`PostListDiff::ops`].
//!
//! Posts are matched by `hash`. Matched posts whose relative order is
//! preserved stay put; the rest are reported as moves. The stable set is
//! the longest increasing run of old positions, so the number of moves is
//! minimal.

use serde::{Serialize, Serializer};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, OnceLock};

use crate::types::Post;

/// One step of an edit script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DiffOp {
    /// Row at `index` of the old list disappears
    Remove { index: usize },
    /// Row at `index` of the new list is new
    Insert { index: usize },
    /// Row moves from `from` in the old list to `to` in the new list
    Move { from: usize, to: usize },
    /// Row at `index` of the new list kept its identity but its content changed
    Change { index: usize },
}

/// Lazily computed difference between two post lists
#[derive(Clone)]
pub struct PostListDiff {
    old: Arc<[Post]>,
    new: Arc<[Post]>,
    ops: OnceLock<Vec<DiffOp>>,
}

impl PostListDiff {
    pub fn new(old: Arc<[Post]>, new: Arc<[Post]>) -> Self {
        Self {
            old,
            new,
            ops: OnceLock::new(),
        }
    }

    /// The edit script; computed on first access
    pub fn ops(&self) -> &[DiffOp] {
        self.ops.get_or_init(|| compute(&self.old, &self.new))
    }

    pub fn is_empty(&self) -> bool {
        self.ops().is_empty()
    }

    pub fn old(&self) -> &[Post] {
        &self.old
    }

    pub fn new_list(&self) -> &[Post] {
        &self.new
    }
}

impl Default for PostListDiff {
    fn default() -> Self {
        Self::new(Arc::from(Vec::new()), Arc::from(Vec::new()))
    }
}

impl PartialEq for PostListDiff {
    fn eq(&self, other: &Self) -> bool {
        self.old == other.old && self.new == other.new
    }
}

impl std::fmt::Debug for PostListDiff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostListDiff")
            .field("old_len", &self.old.len())
            .field("new_len", &self.new.len())
            .field("ops", &self.ops.get())
            .finish()
    }
}

impl Serialize for PostListDiff {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.ops().serialize(serializer)
    }
}

fn compute(old: &[Post], new: &[Post]) -> Vec<DiffOp> {
    let mut unmatched: HashMap<&str, VecDeque<usize>> = HashMap::new();
    for (index, post) in old.iter().enumerate() {
        unmatched.entry(post.hash.as_str()).or_default().push_back(index);
    }

    let mut matched_old = vec![false; old.len()];
    let mut pairs: Vec<(usize, usize)> = Vec::new();
    let mut inserts = Vec::new();
    for (to, post) in new.iter().enumerate() {
        match unmatched.get_mut(post.hash.as_str()).and_then(VecDeque::pop_front) {
            Some(from) => {
                matched_old[from] = true;
                pairs.push((from, to));
            }
            None => inserts.push(DiffOp::Insert { index: to }),
        }
    }

    // Removals run back to front so applying them in order keeps indices valid
    let mut ops: Vec<DiffOp> = matched_old
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, matched)| !**matched)
        .map(|(index, _)| DiffOp::Remove { index })
        .collect();

    let old_positions: Vec<usize> = pairs.iter().map(|(from, _)| *from).collect();
    let stable = longest_increasing(&old_positions);
    ops.extend(
        pairs
            .iter()
            .zip(&stable)
            .filter(|(_, stays)| !**stays)
            .map(|(&(from, to), _)| DiffOp::Move { from, to }),
    );

    ops.extend(inserts);
    ops.extend(
        pairs
            .iter()
            .filter(|(from, to)| old[*from] != new[*to])
            .map(|(_, to)| DiffOp::Change { index: *to }),
    );

    ops
}

/// Marks the members of one longest strictly increasing subsequence
fn longest_increasing(sequence: &[usize]) -> Vec<bool> {
    let mut tails: Vec<usize> = Vec::new();
    let mut previous: Vec<Option<usize>> = vec![None; sequence.len()];

    for (k, value) in sequence.iter().enumerate() {
        let position = tails.partition_point(|&t| sequence[t] < *value);
        if position > 0 {
            previous[k] = Some(tails[position - 1]);
        }
        if position == tails.len() {
            tails.push(k);
        } else {
            tails[position] = k;
        }
    }

    let mut keep = vec![false; sequence.len()];
    let mut cursor = tails.last().copied();
    while let Some(k) = cursor {
        keep[k] = true;
        cursor = previous[k];
    }
    keep
}
