//! Public conversion entry points and configuration.

use crate::document::build;
use crate::document::model::{Document, ShapeListing};
use crate::foundation::error::{ConvertError, ConvertResult};
use crate::path::{ParseMode, interpreter, lexer};

/// RGBA color with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn opaque_black() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    pub fn to_array(self) -> [f64; 4] {
        [self.r, self.g, self.b, self.a]
    }

    fn validate(&self) -> ConvertResult<()> {
        for c in self.to_array() {
            if !(0.0..=1.0).contains(&c) {
                return Err(ConvertError::validation(
                    "stroke color components must be in [0, 1]",
                ));
            }
        }
        Ok(())
    }
}

/// Conversion parameters. Consumed by the serializer and the error-policy
/// dispatch only, never by the interpreter math.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ConvertConfig {
    /// Canvas width, default 24.
    pub width: u32,
    /// Canvas height, default 24.
    pub height: u32,
    /// Stroke width, default 2.
    pub stroke_width: f64,
    /// Stroke color, default opaque black.
    pub stroke_color: Rgba,
    /// Frame rate, default 24.
    pub frame_rate: f64,
    /// Out point (frame range end), default 60.
    pub out_point: f64,
    /// Document and layer name, default "path".
    pub name: String,
    /// Error policy, default lenient (legacy-compatible).
    pub mode: ParseMode,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            width: 24,
            height: 24,
            stroke_width: 2.0,
            stroke_color: Rgba::opaque_black(),
            frame_rate: 24.0,
            out_point: 60.0,
            name: "path".to_string(),
            mode: ParseMode::Lenient,
        }
    }
}

impl ConvertConfig {
    pub fn validate(&self) -> ConvertResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ConvertError::validation("canvas width/height must be > 0"));
        }
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(ConvertError::validation("stroke width must be >= 0"));
        }
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(ConvertError::validation("frame rate must be > 0"));
        }
        if !self.out_point.is_finite() || self.out_point <= 0.0 {
            return Err(ConvertError::validation("out point must be > 0"));
        }
        self.stroke_color.validate()?;
        Ok(())
    }
}

/// Convert path data into a full single-layer animation document.
///
/// Stateless and side-effect-free: lexes, interprets and builds in one
/// pass over the input. Errors only on invalid configuration, or on
/// malformed/unsupported input when `config.mode` is strict.
#[tracing::instrument(skip(path_data))]
pub fn convert(path_data: &str, config: &ConvertConfig) -> ConvertResult<Document> {
    config.validate()?;
    let tokens = lexer::lex(path_data, config.mode)?;
    let subpaths = interpreter::interpret(&tokens, config.mode)?;
    Ok(build::build_document(&subpaths, config))
}

/// Convert path data into the lightweight shapes-only listing.
#[tracing::instrument(skip(path_data))]
pub fn convert_shapes_only(
    path_data: &str,
    config: &ConvertConfig,
) -> ConvertResult<ShapeListing> {
    config.validate()?;
    let tokens = lexer::lex(path_data, config.mode)?;
    let subpaths = interpreter::interpret(&tokens, config.mode)?;
    Ok(build::build_shape_listing(&subpaths))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        ConvertConfig::default().validate().unwrap();
    }

    #[test]
    fn validate_rejects_zero_canvas() {
        let config = ConvertConfig {
            width: 0,
            ..ConvertConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_color() {
        let config = ConvertConfig {
            stroke_color: Rgba::new(0.0, 0.0, 1.5, 1.0),
            ..ConvertConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_finite_stroke() {
        let config = ConvertConfig {
            stroke_width: f64::NAN,
            ..ConvertConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn convert_rejects_invalid_config_before_parsing() {
        let config = ConvertConfig {
            frame_rate: 0.0,
            ..ConvertConfig::default()
        };
        assert!(convert("M0 0 L1 1", &config).is_err());
    }

    #[test]
    fn convert_applies_defaults() {
        let doc = convert("M0 0 L10 10", &ConvertConfig::default()).unwrap();
        assert_eq!((doc.w, doc.h), (24, 24));
        assert_eq!(doc.fr, 24.0);
        assert_eq!((doc.ip, doc.op), (0.0, 60.0));
        assert_eq!(doc.nm, "path");
    }

    #[test]
    fn lenient_convert_never_fails_on_path_data() {
        let config = ConvertConfig::default();
        for d in ["", "garbage", "M", "Q1 2 3 4", "M0 0 L", "@@@"] {
            convert(d, &config).unwrap();
        }
    }

    #[test]
    fn strict_convert_surfaces_parse_errors() {
        let config = ConvertConfig {
            mode: ParseMode::Strict,
            ..ConvertConfig::default()
        };
        assert!(convert("M0 0 T1 2", &config).is_err());
        assert!(convert("M0 0 L1 1", &config).is_ok());
    }

    #[test]
    fn repeated_conversion_is_identical() {
        let d = "M0 0 C10 0 10 10 0 10 Z";
        let config = ConvertConfig::default();
        let a = serde_json::to_string(&convert(d, &config).unwrap()).unwrap();
        let b = serde_json::to_string(&convert(d, &config).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn shapes_only_shares_the_config_checks() {
        let config = ConvertConfig {
            height: 0,
            ..ConvertConfig::default()
        };
        assert!(convert_shapes_only("M0 0", &config).is_err());
    }
}
