use slotmap::{SlotMap, new_key_type};

use nesty::entities::BinType;
use nesty::geometry::DTransformation;
use nesty::geometry::primitives::SPolygon;
use nesty::geometry::{contains, intersects};

new_key_type! {
    /// Unique key for each [`PlacedShape`] in a [`Layout`]
    pub struct PItemKey;
}

/// A shape instance placed in a [`Layout`], together with the silhouette it occupies.
#[derive(Clone, Debug)]
pub struct PlacedShape {
    pub shape_id: i32,
    pub instance_index: usize,
    pub d_transf: DTransformation,
    /// Placed boundary, inflated by half the spacing
    pub silhouette: SPolygon,
}

/// An opened bin instance and the shapes placed in it.
#[derive(Clone, Debug)]
pub struct Layout {
    pub bin_def_id: i32,
    pub bin_instance: usize,
    pub bin_type: BinType,
    /// The part of the bin that shapes may occupy
    pub region: Vec<SPolygon>,
    pub placed_shapes: SlotMap<PItemKey, PlacedShape>,
}

impl Layout {
    pub fn new(
        bin_def_id: i32,
        bin_instance: usize,
        bin_type: BinType,
        region: Vec<SPolygon>,
    ) -> Self {
        Layout {
            bin_def_id,
            bin_instance,
            bin_type,
            region,
            placed_shapes: SlotMap::with_key(),
        }
    }

    pub fn place_shape(&mut self, ps: PlacedShape) -> PItemKey {
        debug_assert!(self.accepts(&ps.silhouette));
        self.placed_shapes.insert(ps)
    }

    /// True if `silhouette` fits in the region and does not overlap with any placed silhouette.
    pub fn accepts(&self, silhouette: &SPolygon) -> bool {
        region_accepts(&self.region, silhouette)
            && !self
                .placed_shapes
                .values()
                .any(|ps| intersects(&ps.silhouette, silhouette))
    }

    pub fn silhouettes(&self) -> impl Iterator<Item = &SPolygon> {
        self.placed_shapes.values().map(|ps| &ps.silhouette)
    }
}

/// True if `silhouette` lies within one of the components of `region`.
pub fn region_accepts(region: &[SPolygon], silhouette: &SPolygon) -> bool {
    region.iter().any(|r| contains(r, silhouette))
}
