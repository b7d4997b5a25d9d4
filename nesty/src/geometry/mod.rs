pub mod geo_enums;
pub mod geo_traits;
pub mod primitives;
pub mod relations;
pub mod shape_modification;

mod d_transformation;

#[doc(inline)]
pub use d_transformation::DTransformation;
#[doc(inline)]
pub use relations::{contains, intersects};
#[doc(inline)]
pub use shape_modification::offset_shape;
