//! Spatial indexing for position-to-region lookups
//!
//! This module is only available with the `spatial-index` feature.

use glam::Vec2;
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use kiddo::SquaredEuclidean;

/// KD-tree over region site positions
///
/// Answers nearest-site queries in O(log n). With the default couple dozen
/// sites a linear scan is just as fast, but the index keeps
/// [`crate::Ecosystem::region_at`] cheap for hosts that configure hundreds
/// of regions. Site drift invalidates the tree, so it is rebuilt whenever
/// the owner map is recomputed.
///
/// Note: when two sites are exactly equidistant the tree may pick either;
/// the owner map itself always uses the deterministic linear scan.
#[derive(Clone)]
pub struct SiteIndex {
    tree: ImmutableKdTree<f32, usize, 2, 32>,
}

impl SiteIndex {
    /// Build an index from site positions
    ///
    /// # Example
    ///
    /// ```
    /// use woodland_ecosystem::SiteIndex;
    /// use glam::Vec2;
    ///
    /// let sites = vec![
    ///     Vec2::new(10.0, 10.0),
    ///     Vec2::new(90.0, 10.0),
    ///     Vec2::new(50.0, 90.0),
    /// ];
    ///
    /// let index = SiteIndex::new(&sites);
    /// assert_eq!(index.find_nearest(Vec2::new(12.0, 8.0)), 0);
    /// ```
    pub fn new(sites: &[Vec2]) -> Self {
        let points: Vec<[f32; 2]> = sites.iter().map(|s| [s.x, s.y]).collect();
        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
        }
    }

    /// Index of the site nearest to a pixel position
    pub fn find_nearest(&self, position: Vec2) -> usize {
        let query = [position.x, position.y];
        let result = self.tree.nearest_one::<SquaredEuclidean>(&query);
        result.item
    }
}
