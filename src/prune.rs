//! Branch hit-testing for interactive pruning.
//!
//! Every render pass rebuilds a registry of drawn branch segments: the
//! sentence index of each `F`, the absolute position of its tip, and the box
//! a pointer press must land in to select it. A hit feeds `Sentence::chop`.

/// One drawn branch segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Branch {
    /// Index of the `F` in the sentence.
    pub sentence_index: usize,
    /// Absolute tip position on the surface.
    pub tip: (f64, f64),
    /// Tapered width at the tip.
    pub width: f64,
    /// Drawn length of the segment.
    pub height: f64,
}

impl Branch {
    /// Whether a surface-space point falls inside this branch's box.
    ///
    /// The box is centred horizontally on the tip and extends downward by
    /// the segment's drawn length.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (tx, ty) = self.tip;
        x >= tx - self.width / 2.0
            && x <= tx + self.width / 2.0
            && y >= ty
            && y <= ty + self.height
    }
}

/// Registry of branches drawn in one render pass.
///
/// Rebuilt wholesale every pass; entries appear in sentence order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BranchIndex {
    branches: Vec<Branch>,
}

impl BranchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, branch: Branch) {
        self.branches.push(branch);
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Branch> {
        self.branches.iter()
    }

    /// First branch (in sentence order) whose box contains the point.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&Branch> {
        self.branches.iter().find(|b| b.contains(x, y))
    }
}
