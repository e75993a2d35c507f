/// Accumulator for the clusters touched by one binned object.
///
/// Owned by the caller and reused across objects and frames: every
/// `bin*` call resets it first, keeping the allocation.

/// Coordinates of one cluster cell in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl ClusterId {
    pub fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }
}

/// Touched clusters of the last `bin*` call, in insertion order.
///
/// Not synchronized: binning from several threads needs one instance
/// per thread (see `Clusterer::init_test_results`).
#[derive(Debug, Clone, Default)]
pub struct ClustererTestResult {
    clusters: Vec<ClusterId>,
}

impl ClustererTestResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty result able to hold `capacity` clusters without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { clusters: Vec::with_capacity(capacity) }
    }

    /// Forget the previous content. The allocation is kept.
    pub fn reset(&mut self) {
        self.clusters.clear();
    }

    #[inline]
    pub(crate) fn push_back(&mut self, x: u32, y: u32, z: u32) {
        self.clusters.push(ClusterId { x, y, z });
    }

    pub fn count(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.clusters.capacity()
    }

    pub fn clusters(&self) -> &[ClusterId] {
        &self.clusters
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClusterId> {
        self.clusters.iter()
    }
}

impl<'a> IntoIterator for &'a ClustererTestResult {
    type Item = &'a ClusterId;
    type IntoIter = std::slice::Iter<'a, ClusterId>;

    fn into_iter(self) -> Self::IntoIter {
        self.clusters.iter()
    }
}

#[cfg(test)]
#[path = "test_result_tests.rs"]
mod tests;
