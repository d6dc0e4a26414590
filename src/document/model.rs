//! Serde model of the target animation document schema.
//!
//! Field names mirror the wire format (`v`, `fr`, `ip`, `op`, `w`, `h`,
//! `ks`, `it`, ...); group items are tagged on `"ty"`. The model is
//! deliberately the static subset the converter emits: every property is
//! wrapped in [`Static`] with the animated flag at 0.

/// Static (non-animated) property wrapper: `{"a": 0, "k": ...}`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Static<T> {
    /// Animated flag, always 0 for converter output.
    pub a: u8,
    /// Property value.
    pub k: T,
}

impl<T> Static<T> {
    pub fn of(k: T) -> Self {
        Self { a: 0, k }
    }
}

/// Top-level animation document.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Document {
    /// Format version tag.
    pub v: String,
    /// Frame rate.
    pub fr: f64,
    /// In point (first frame).
    pub ip: f64,
    /// Out point (one past the last frame).
    pub op: f64,
    /// Canvas width.
    pub w: u32,
    /// Canvas height.
    pub h: u32,
    /// Document name.
    pub nm: String,
    /// 3D flag, always 0.
    pub ddd: u8,
    /// Asset table, empty for converter output.
    pub assets: Vec<serde_json::Value>,
    pub layers: Vec<ShapeLayer>,
}

/// Single shape layer (`ty` 4) holding the converted geometry.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShapeLayer {
    pub ddd: u8,
    /// Layer index, 1-based.
    pub ind: u32,
    /// Layer type; 4 = shape layer.
    pub ty: u8,
    pub nm: String,
    /// Time stretch factor.
    pub sr: f64,
    pub ks: LayerTransform,
    /// Auto-orient flag.
    pub ao: u8,
    pub shapes: Vec<GroupItem>,
    pub ip: f64,
    pub op: f64,
    /// Start time.
    pub st: f64,
    /// Blend mode.
    pub bm: u8,
}

/// Layer transform: anchored and positioned at the canvas center so the
/// path geometry is reproduced untranslated.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerTransform {
    /// Opacity in percent.
    pub o: Static<f64>,
    /// Rotation in degrees.
    pub r: Static<f64>,
    /// Position `[x, y, z]`.
    pub p: Static<[f64; 3]>,
    /// Anchor point `[x, y, z]`.
    pub a: Static<[f64; 3]>,
    /// Scale in percent `[x, y, z]`.
    pub s: Static<[f64; 3]>,
}

/// Any item that can appear in a group's contents (or directly in a
/// layer's shape list), discriminated by the wire `"ty"` tag.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "ty")]
pub enum GroupItem {
    #[serde(rename = "gr")]
    Group(GroupShape),
    #[serde(rename = "sh")]
    Path(PathShape),
    #[serde(rename = "st")]
    Stroke(StrokeShape),
    #[serde(rename = "tr")]
    Transform(TransformShape),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GroupShape {
    pub nm: String,
    /// Group contents, shape items first, then style and transform.
    pub it: Vec<GroupItem>,
}

/// One subpath's geometry as a shape item.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PathShape {
    /// Draw direction, 1 = normal.
    pub d: u8,
    pub ks: Static<PathGeometry>,
    pub nm: String,
}

/// Bezier payload: vertices plus in/out tangents, handles relative to
/// their vertex, all components rounded to 4 decimal places.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PathGeometry {
    /// In-tangents, one per vertex.
    pub i: Vec<[f64; 2]>,
    /// Out-tangents, one per vertex.
    pub o: Vec<[f64; 2]>,
    /// Vertices.
    pub v: Vec<[f64; 2]>,
    /// Closed flag.
    pub c: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StrokeShape {
    pub nm: String,
    /// RGBA color, components in `[0, 1]`.
    pub c: Static<[f64; 4]>,
    /// Opacity in percent.
    pub o: Static<f64>,
    /// Stroke width.
    pub w: Static<f64>,
    /// Line cap: 1 = butt.
    pub lc: u8,
    /// Line join: 1 = miter.
    pub lj: u8,
    /// Miter limit.
    pub ml: f64,
}

/// Group transform with identity defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransformShape {
    pub nm: String,
    pub p: Static<[f64; 2]>,
    pub a: Static<[f64; 2]>,
    pub s: Static<[f64; 2]>,
    pub r: Static<f64>,
    pub o: Static<f64>,
    /// Skew.
    pub sk: Static<f64>,
    /// Skew axis.
    pub sa: Static<f64>,
}

/// Lightweight shapes-only output: per-subpath geometry without the
/// document envelope.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShapeListing {
    pub shapes: Vec<ShapeEntry>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShapeEntry {
    pub name: String,
    pub vertex_count: usize,
    pub closed: bool,
    pub geometry: PathGeometry,
}
