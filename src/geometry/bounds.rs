use crate::vertex::VertexArray;

/// An axis-aligned XY extent.
///
/// The default value is inverted (min = +∞, max = -∞) so that stretching it by any point
/// yields that point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

impl BoundingBox {
    pub fn new(minx: f64, miny: f64, maxx: f64, maxy: f64) -> Self {
        Self {
            minx,
            miny,
            maxx,
            maxy,
        }
    }

    /// Grow to include `(x, y)`.
    pub fn stretch(&mut self, x: f64, y: f64) {
        self.minx = self.minx.min(x);
        self.miny = self.miny.min(y);
        self.maxx = self.maxx.max(x);
        self.maxy = self.maxy.max(y);
    }

    /// Grow to include another box.
    pub fn extend(&mut self, other: &BoundingBox) {
        self.minx = self.minx.min(other.minx);
        self.miny = self.miny.min(other.miny);
        self.maxx = self.maxx.max(other.maxx);
        self.maxy = self.maxy.max(other.maxy);
    }

    /// Whether the two boxes share at least one point. Touching edges intersect.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        !(self.minx > other.maxx
            || self.maxx < other.minx
            || self.miny > other.maxy
            || self.maxy < other.miny)
    }

    /// True until the box has been stretched by at least one point.
    pub fn is_empty(&self) -> bool {
        self.minx > self.maxx || self.miny > self.maxy
    }

    pub(crate) fn from_vertices(vertices: &VertexArray<'_>) -> Option<Self> {
        let mut bbox = Self::default();
        for vertex in vertices.iter() {
            bbox.stretch(vertex.x, vertex.y);
        }
        (!bbox.is_empty()).then_some(bbox)
    }

    /// Union of all present boxes, or `None` when there are none.
    pub(crate) fn merge(boxes: impl IntoIterator<Item = Option<BoundingBox>>) -> Option<Self> {
        boxes.into_iter().flatten().reduce(|mut acc, bbox| {
            acc.extend(&bbox);
            acc
        })
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            minx: f64::INFINITY,
            miny: f64::INFINITY,
            maxx: f64::NEG_INFINITY,
            maxy: f64::NEG_INFINITY,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn stretch_from_default() {
        let mut bbox = BoundingBox::default();
        assert!(bbox.is_empty());
        bbox.stretch(1.0, 2.0);
        assert_eq!(bbox, BoundingBox::new(1.0, 2.0, 1.0, 2.0));
        bbox.stretch(-1.0, 5.0);
        assert_eq!(bbox, BoundingBox::new(-1.0, 2.0, 1.0, 5.0));
    }

    #[test]
    fn intersects() {
        let a = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        assert!(a.intersects(&BoundingBox::new(0.5, 0.5, 2.0, 2.0)));
        assert!(a.intersects(&BoundingBox::new(1.0, 1.0, 2.0, 2.0)));
        assert!(!a.intersects(&BoundingBox::new(1.5, 0.0, 2.0, 1.0)));
        assert!(!a.intersects(&BoundingBox::new(0.0, -2.0, 1.0, -1.0)));
    }

    #[test]
    fn merge_skips_missing() {
        let merged = BoundingBox::merge([
            None,
            Some(BoundingBox::new(0.0, 0.0, 1.0, 1.0)),
            Some(BoundingBox::new(-1.0, 0.5, 0.5, 3.0)),
        ]);
        assert_eq!(merged, Some(BoundingBox::new(-1.0, 0.0, 1.0, 3.0)));
        assert_eq!(BoundingBox::merge([None, None]), None);
    }
}
