use log::warn;
use serde::{Deserialize, Serialize};
use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Group, Path, Text, Title};

use nesty::entities::Catalogue;
use nesty::geometry::primitives::{Point, SPolygon};
use nesty::io::ext_repr::ExtLayout;

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SvgDrawOptions {
    #[serde(default)]
    pub theme: SvgLayoutTheme,
    /// Draws the part of the bin that remains after trimming
    #[serde(default)]
    pub usable_region: bool,
    /// Draws the inflated outline of each shape that is used to keep the spacing
    #[serde(default)]
    pub silhouettes: bool,
}

impl Default for SvgDrawOptions {
    fn default() -> Self {
        Self {
            theme: SvgLayoutTheme::EarthTones,
            usable_region: true,
            silhouettes: false,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize, Default)]
pub enum SvgLayoutTheme {
    #[default]
    EarthTones,
    Gray,
}

struct Palette {
    stroke_width_multiplier: f64,
    bin_fill: &'static str,
    region_fill: &'static str,
    shape_fill: &'static str,
}

impl SvgLayoutTheme {
    fn palette(&self) -> Palette {
        match self {
            SvgLayoutTheme::EarthTones => Palette {
                stroke_width_multiplier: 2.0,
                bin_fill: "#CC824A",
                region_fill: "#D6A173",
                shape_fill: "#FFC879",
            },
            SvgLayoutTheme::Gray => Palette {
                stroke_width_multiplier: 2.5,
                bin_fill: "#C3C3C3",
                region_fill: "#D9D9D9",
                shape_fill: "#8F8F8F",
            },
        }
    }
}

/// Draws one opened bin instance with the shapes placed in it.
/// The y-axis points up, so the bottom-left of the bin is at the bottom-left of the drawing.
pub fn layout_to_svg(
    layout: &ExtLayout,
    catalogue: &Catalogue,
    spacing: i64,
    trimming: i64,
    options: SvgDrawOptions,
) -> Document {
    let palette = options.theme.palette();
    let Some(bin) = catalogue.bin(layout.bin_def_id) else {
        warn!("[SVG] bin {} is not in the catalogue", layout.bin_def_id);
        return Document::new();
    };
    let (length, width) = (bin.length as f64, bin.width as f64);
    let margin = 0.05 * f64::max(length, width);
    let stroke_width = f64::min(length, width) * 0.001 * palette.stroke_width_multiplier;
    let label_size = 0.03 * f64::max(length, width);

    //all geometry is drawn in a group which flips the y-axis
    let mut geometry = Group::new().set(
        "transform",
        format!("translate(0 {width}) scale(1 -1)"),
    );

    geometry = geometry.add(
        data_to_path(
            loops_data(&[bin.outline().vertices]),
            &[
                ("fill", palette.bin_fill),
                ("stroke", "black"),
                ("stroke-width", &*format!("{}", 2.0 * stroke_width)),
            ],
        )
        .add(Title::new(format!(
            "bin, id: {}, type: {:?}, {}×{}",
            bin.id, bin.bin_type, bin.length, bin.width
        ))),
    );

    if options.usable_region && trimming > 0 {
        if let Ok(region) = bin.usable_region(trimming) {
            let loops = region.into_iter().map(|r| r.vertices).collect::<Vec<_>>();
            geometry = geometry.add(data_to_path(
                loops_data(&loops),
                &[
                    ("fill", palette.region_fill),
                    ("stroke", "black"),
                    ("stroke-width", &*format!("{stroke_width}")),
                    ("stroke-dasharray", &*format!("{}", 5.0 * stroke_width)),
                ],
            ));
        }
    }

    for p in layout.placements.iter() {
        let Some(polygon) = p.placed_polygon(catalogue) else {
            continue;
        };
        let mut group = Group::new()
            .set("id", format!("shape_{}_{}", p.shape_id, p.instance_index))
            .add(
                data_to_path(
                    loops_data(&polygon.loops()),
                    &[
                        ("fill", palette.shape_fill),
                        ("stroke", "black"),
                        ("stroke-width", &*format!("{stroke_width}")),
                        ("fill-rule", "evenodd"),
                        ("opacity", "0.9"),
                    ],
                )
                .add(Title::new(format!(
                    "shape, id: {}, instance: {}, at: [{}]",
                    p.shape_id,
                    p.instance_index,
                    p.transformation()
                ))),
            );
        if options.silhouettes {
            let silhouette = catalogue
                .shape(p.shape_id)
                .map(|s| s.silhouette(&p.transformation(), spacing));
            if let Some(Ok(silhouette)) = silhouette {
                group = group.add(data_to_path(
                    sp_data(&silhouette),
                    &[
                        ("fill", "none"),
                        ("stroke", "black"),
                        ("stroke-width", &*format!("{stroke_width}")),
                        ("stroke-opacity", "0.5"),
                        ("stroke-dasharray", &*format!("{}", 2.0 * stroke_width)),
                    ],
                ));
            }
        }
        geometry = geometry.add(group);
    }

    let label = Text::new(format!(
        "bin {}:{}, {} shapes, density: {:.3}%",
        layout.bin_def_id,
        layout.bin_instance,
        layout.placements.len(),
        layout.density * 100.0
    ))
    .set("x", 0.0)
    .set("y", width + margin * 0.75)
    .set("font-size", label_size)
    .set("font-family", "monospace");

    Document::new()
        .set(
            "viewBox",
            (-margin, -margin, length + 2.0 * margin, width + 2.0 * margin),
        )
        .add(geometry)
        .add(label)
}

fn sp_data(sp: &SPolygon) -> Data {
    loops_data(std::slice::from_ref(&sp.vertices))
}

/// Path data of a set of closed loops
fn loops_data(loops: &[Vec<Point>]) -> Data {
    let mut data = Data::new();
    for l in loops.iter().filter(|l| !l.is_empty()) {
        data = data.move_to((l[0].0 as f64, l[0].1 as f64));
        for p in &l[1..] {
            data = data.line_to((p.0 as f64, p.1 as f64));
        }
        data = data.close();
    }
    data
}

fn data_to_path(data: Data, params: &[(&str, &str)]) -> Path {
    let mut path = Path::new();
    for param in params {
        path = path.set(param.0, param.1)
    }
    path.set("d", data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nesty::entities::{BinDef, BinType, Placement, ShapeDef};

    #[test]
    fn layout_is_drawn_with_holes() {
        let mut cat = Catalogue::new();
        cat.upsert_bin(BinDef::new(1, 1, 100, 100, BinType::Rectangle).unwrap());
        let outer = vec![Point(0, 0), Point(50, 0), Point(50, 50), Point(0, 50)];
        let hole = vec![Point(10, 10), Point(10, 40), Point(40, 40), Point(40, 10)];
        cat.upsert_shape(ShapeDef::from_loops(1, 1, vec![outer, hole]).unwrap());
        let layout = ExtLayout {
            bin_def_id: 1,
            bin_instance: 0,
            placements: vec![Placement {
                shape_id: 1,
                instance_index: 0,
                bin_def_id: 1,
                bin_instance: 0,
                x: 5,
                y: 5,
                rotation: 0,
                mirrored: false,
            }],
            density: 0.16,
        };
        let options = SvgDrawOptions {
            silhouettes: true,
            ..SvgDrawOptions::default()
        };
        let svg = layout_to_svg(&layout, &cat, 2, 5, options).to_string();
        assert!(svg.contains("shape_1_0"));
        assert!(svg.contains("evenodd"));
        assert!(svg.contains("density: 16.000%"));
    }
}
