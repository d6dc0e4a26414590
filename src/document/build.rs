use crate::convert::ConvertConfig;
use crate::document::model::{
    Document, GroupItem, GroupShape, LayerTransform, PathGeometry, PathShape, ShapeEntry,
    ShapeLayer, ShapeListing, Static, StrokeShape, TransformShape,
};
use crate::foundation::math::round4;
use crate::path::interpreter::Subpath;

/// Format version tag emitted on every document.
pub const DOCUMENT_VERSION: &str = "5.5.2";

/// Lower one subpath to its rounded wire payload.
pub fn shape_geometry(sp: &Subpath) -> PathGeometry {
    PathGeometry {
        i: sp
            .in_tangents
            .iter()
            .map(|t| [round4(t.x), round4(t.y)])
            .collect(),
        o: sp
            .out_tangents
            .iter()
            .map(|t| [round4(t.x), round4(t.y)])
            .collect(),
        v: sp
            .vertices
            .iter()
            .map(|p| [round4(p.x), round4(p.y)])
            .collect(),
        c: sp.closed,
    }
}

/// Wrap the subpaths in a full single-layer animation document per the
/// configuration: one shape item per subpath, a stroke item and an
/// identity transform item, grouped inside one centered shape layer.
pub fn build_document(subpaths: &[Subpath], config: &ConvertConfig) -> Document {
    let mut items: Vec<GroupItem> = subpaths
        .iter()
        .enumerate()
        .map(|(n, sp)| {
            GroupItem::Path(PathShape {
                d: 1,
                ks: Static::of(shape_geometry(sp)),
                nm: format!("Path {}", n + 1),
            })
        })
        .collect();

    items.push(GroupItem::Stroke(StrokeShape {
        nm: "Stroke".to_string(),
        c: Static::of(config.stroke_color.to_array()),
        o: Static::of(100.0),
        w: Static::of(config.stroke_width),
        lc: 1,
        lj: 1,
        ml: 4.0,
    }));
    items.push(GroupItem::Transform(TransformShape {
        nm: "Transform".to_string(),
        p: Static::of([0.0, 0.0]),
        a: Static::of([0.0, 0.0]),
        s: Static::of([100.0, 100.0]),
        r: Static::of(0.0),
        o: Static::of(100.0),
        sk: Static::of(0.0),
        sa: Static::of(0.0),
    }));

    let cx = f64::from(config.width) / 2.0;
    let cy = f64::from(config.height) / 2.0;

    let layer = ShapeLayer {
        ddd: 0,
        ind: 1,
        ty: 4,
        nm: config.name.clone(),
        sr: 1.0,
        ks: LayerTransform {
            o: Static::of(100.0),
            r: Static::of(0.0),
            // Anchor == position keeps the geometry untranslated.
            p: Static::of([cx, cy, 0.0]),
            a: Static::of([cx, cy, 0.0]),
            s: Static::of([100.0, 100.0, 100.0]),
        },
        ao: 0,
        shapes: vec![GroupItem::Group(GroupShape {
            nm: "Group 1".to_string(),
            it: items,
        })],
        ip: 0.0,
        op: config.out_point,
        st: 0.0,
        bm: 0,
    };

    Document {
        v: DOCUMENT_VERSION.to_string(),
        fr: config.frame_rate,
        ip: 0.0,
        op: config.out_point,
        w: config.width,
        h: config.height,
        nm: config.name.clone(),
        ddd: 0,
        assets: Vec::new(),
        layers: vec![layer],
    }
}

/// Shapes-only mode: per-subpath name, vertex count, closed flag and the
/// rounded geometry payload, without the document envelope.
pub fn build_shape_listing(subpaths: &[Subpath]) -> ShapeListing {
    ShapeListing {
        shapes: subpaths
            .iter()
            .enumerate()
            .map(|(n, sp)| ShapeEntry {
                name: format!("Path {}", n + 1),
                vertex_count: sp.len(),
                closed: sp.closed,
                geometry: shape_geometry(sp),
            })
            .collect(),
    }
}
