use crate::geometry::DTransformation;
use crate::geometry::primitives::Rect;

/// Trait for types that can detect collisions between `Self` and `T`.
pub trait CollidesWith<T> {
    fn collides_with(&self, other: &T) -> bool;
}

/// Trait for types that can be modified by a [`DTransformation`].
pub trait Transformable: Clone {
    /// Applies a transformation to `self`.
    fn transform(&mut self, t: &DTransformation) -> &mut Self;

    /// Applies a transformation to a clone.
    fn transform_clone(&self, t: &DTransformation) -> Self {
        let mut clone = self.clone();
        clone.transform(t);
        clone
    }
}

/// Trait for shared properties of geometric primitives.
pub trait Shape {
    /// Twice the area of the interior of the shape, exact
    fn double_area(&self) -> i128;

    /// Area of the interior of the shape, rounded down
    fn area(&self) -> i128 {
        self.double_area() / 2
    }

    /// Bounding box of the shape
    fn bbox(&self) -> Rect;
}
