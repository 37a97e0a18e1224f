use alloc::collections::VecDeque;

use super::*;

/// Replays a fixed list of indices. Once exhausted every pick is out of range.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScriptedPicker {
    indices: VecDeque<usize>,
}

impl ScriptedPicker {
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            indices: indices.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.indices.len()
    }
}

impl IndexPicker for ScriptedPicker {
    fn pick(&mut self, len: usize) -> usize {
        self.indices.pop_front().unwrap_or(len)
    }
}
