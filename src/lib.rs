//! svg2lottie converts SVG path data (the `d` attribute mini-language)
//! into Lottie-style shape animation documents.
//!
//! # Pipeline overview
//!
//! 1. **Lex**: `&str -> Vec<Token>` (command letters and numeric literals)
//! 2. **Interpret**: `Vec<Token> -> Vec<Subpath>` (cursor state machine,
//!    per-vertex bezier handles)
//! 3. **Build**: `Vec<Subpath> -> Document` (single-layer animation
//!    document) or `-> ShapeListing` (shapes-only mode)
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Stateless**: every conversion is a pure pass over an in-memory
//!   string; no caching, no I/O, no shared state across calls.
//! - **Two error policies**: lenient (legacy-compatible, malformed input
//!   is skipped) and strict (fail at the first defect, with byte
//!   offsets). One policy applies uniformly per call.
//!
//! Entry points are [`convert`] and [`convert_shapes_only`]; the
//! intermediate stages ([`lex`], [`interpret`], [`build_document`]) are
//! exported for callers that want to drive the pipeline themselves.
#![forbid(unsafe_code)]

mod convert;
mod document;
mod foundation;
mod path;

pub use convert::{ConvertConfig, Rgba, convert, convert_shapes_only};
pub use document::build::{
    DOCUMENT_VERSION, build_document, build_shape_listing, shape_geometry,
};
pub use document::model::{
    Document, GroupItem, GroupShape, LayerTransform, PathGeometry, PathShape, ShapeEntry,
    ShapeLayer, ShapeListing, Static, StrokeShape, TransformShape,
};
pub use foundation::error::{ConvertError, ConvertResult};
pub use path::ParseMode;
pub use path::interpreter::{Subpath, interpret};
pub use path::lexer::{Span, Token, TokenKind, lex};
