/// Position of a point with respect to a closed shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeoPosition {
    Exterior,
    Boundary,
    Interior,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Possible relations between two line segments A and B.
pub enum SegmentRelation {
    /// A ∩ B = ∅
    Disjoint,
    /// A and B cross in a single point that lies in the interior of both
    Crossing,
    /// A and B share at least one point, but do not cross (endpoint contact or collinear overlap)
    Touching,
}
