mod bin;
mod catalogue;
mod shape;
mod solution;

#[doc(inline)]
pub use bin::BinDef;

#[doc(inline)]
pub use bin::BinType;

#[doc(inline)]
pub use catalogue::Catalogue;

#[doc(inline)]
pub use shape::ShapeDef;

#[doc(inline)]
pub use solution::Placement;

#[doc(inline)]
pub use solution::Solution;

#[doc(inline)]
pub use solution::SolutionStats;

#[doc(inline)]
pub use shape::silhouette_inflation;
