// Sampled points, grouped by category.

use std::collections::BTreeMap;

use crate::types::Point;

/// The only category the mouse writes to.
pub const BACKGROUND: &str = "background";

#[derive(Debug, Default)]
pub struct PointRegistry {
    points: BTreeMap<String, Vec<Point>>,
}

impl PointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point. No dedup: clicking the same pixel twice stores it twice.
    pub fn add(&mut self, category: &str, point: Point) {
        self.points.entry(category.to_owned()).or_default().push(point);
    }

    /// Remove the first point (insertion order) within `radius` of `point`.
    pub fn remove_near(&mut self, category: &str, point: Point, radius: f64) -> Option<Point> {
        let list = self.points.get_mut(category)?;
        let idx = list.iter().position(|p| p.distance_to(point) <= radius)?;
        Some(list.remove(idx))
    }

    pub fn points(&self, category: &str) -> &[Point] {
        self.points.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Point])> {
        self.points.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.points.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_remove_same_point() {
        let mut reg = PointRegistry::new();
        reg.add(BACKGROUND, Point::new(10, 10));
        reg.add(BACKGROUND, Point::new(50, 50));

        assert_eq!(reg.remove_near(BACKGROUND, Point::new(10, 10), 0.0), Some(Point::new(10, 10)));
        assert_eq!(reg.points(BACKGROUND), &[Point::new(50, 50)]);
    }

    #[test]
    fn click_within_radius_removes_marker() {
        let mut reg = PointRegistry::new();
        reg.add(BACKGROUND, Point::new(100, 100));

        // 3-4-5 triangle: exactly on the radius counts
        assert!(reg.remove_near(BACKGROUND, Point::new(103, 104), 5.0).is_some());
        assert!(reg.is_empty());
    }

    #[test]
    fn click_outside_radius_leaves_registry_unchanged() {
        let mut reg = PointRegistry::new();
        reg.add(BACKGROUND, Point::new(100, 100));

        assert_eq!(reg.remove_near(BACKGROUND, Point::new(105, 100), 4.0), None);
        assert_eq!(reg.points(BACKGROUND), &[Point::new(100, 100)]);
    }

    #[test]
    fn first_match_in_insertion_order_wins() {
        let mut reg = PointRegistry::new();
        reg.add(BACKGROUND, Point::new(13, 10)); // distance 3
        reg.add(BACKGROUND, Point::new(10, 10)); // distance 0, but added later

        assert_eq!(reg.remove_near(BACKGROUND, Point::new(10, 10), 4.0), Some(Point::new(13, 10)));
        assert_eq!(reg.points(BACKGROUND), &[Point::new(10, 10)]);
    }

    #[test]
    fn unknown_category_is_empty_and_removal_is_noop() {
        let mut reg = PointRegistry::new();
        assert!(reg.points("foreground").is_empty());
        assert_eq!(reg.remove_near("foreground", Point::new(0, 0), 10.0), None);
    }

    #[test]
    fn len_counts_across_categories() {
        let mut reg = PointRegistry::new();
        reg.add(BACKGROUND, Point::new(1, 1));
        reg.add(BACKGROUND, Point::new(1, 1));
        reg.add("hair", Point::new(2, 2));
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.iter().count(), 2);
    }
}
