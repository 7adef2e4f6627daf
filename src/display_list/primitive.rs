use serde::{Deserialize, Serialize};

/// RGB or RGBA color, each channel in [0, 1].
///
/// Serialized as a bare 3- or 4-element array; the arity picks the variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    Rgb([f32; 3]),
    Rgba([f32; 4]),
}

impl Color {
    pub const WHITE: Color = Color::Rgb([1.0, 1.0, 1.0]);

    /// RGB channels; alpha, if present, is dropped.
    pub fn rgb(&self) -> [f32; 3] {
        match *self {
            Color::Rgb(c) => c,
            Color::Rgba([r, g, b, _]) => [r, g, b],
        }
    }

    pub fn alpha(&self) -> f32 {
        match *self {
            Color::Rgb(_) => 1.0,
            Color::Rgba([_, _, _, a]) => a,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// One declaratively described drawable shape.
///
/// Closed tagged union with a `kind` discriminator on the wire. Every variant
/// carries an optional color (opaque white when omitted) and an optional
/// group id; a primitive with no group id is always visible and takes no part
/// in visibility bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Primitive {
    Point {
        position: [f32; 3],
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<Color>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        group: Option<String>,
    },
    Line {
        start: [f32; 3],
        end: [f32; 3],
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<Color>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        group: Option<String>,
    },
    Sphere {
        center: [f32; 3],
        radius: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<Color>,
        #[serde(default)]
        solid: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        group: Option<String>,
    },
    Cone {
        tip: [f32; 3],
        direction: [f32; 3],
        length: f32,
        radius: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<Color>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        group: Option<String>,
    },
    Rect {
        /// Lower-left corner in the XY plane; Z is carried through unchanged.
        corner: [f32; 3],
        /// Extent along +X.
        width: f32,
        /// Extent along +Y.
        height: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<Color>,
        #[serde(default)]
        solid: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        group: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Text {
        position: [f32; 3],
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<Color>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        font_family: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        font_size: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        group: Option<String>,
    },
    Cylinder {
        start: [f32; 3],
        end: [f32; 3],
        radius: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<Color>,
        #[serde(default)]
        solid: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        group: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    PolygonMesh {
        /// Flat xyz triples, one per vertex.
        vertices: Vec<f32>,
        /// Flat vertex indices; polygon boundaries come from `polygon_sizes`.
        polygons: Vec<u32>,
        polygon_sizes: Vec<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<Color>,
        /// Flat RGB or RGBA values, one set per vertex.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        vertex_colors: Option<Vec<f32>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        group: Option<String>,
    },
    LineSegments {
        /// Flat xyz endpoints, two per segment.
        segments: Vec<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<Color>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        group: Option<String>,
    },
    PointCloud {
        /// Flat xyz triples, one per point.
        points: Vec<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<Color>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        group: Option<String>,
    },
}

impl Primitive {
    /// The visibility group this primitive belongs to, if any.
    pub fn group(&self) -> Option<&str> {
        match self {
            Primitive::Point { group, .. }
            | Primitive::Line { group, .. }
            | Primitive::Sphere { group, .. }
            | Primitive::Cone { group, .. }
            | Primitive::Rect { group, .. }
            | Primitive::Text { group, .. }
            | Primitive::Cylinder { group, .. }
            | Primitive::PolygonMesh { group, .. }
            | Primitive::LineSegments { group, .. }
            | Primitive::PointCloud { group, .. } => group.as_deref(),
        }
    }

    /// Wire name of the variant, for log messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Primitive::Point { .. } => "point",
            Primitive::Line { .. } => "line",
            Primitive::Sphere { .. } => "sphere",
            Primitive::Cone { .. } => "cone",
            Primitive::Rect { .. } => "rect",
            Primitive::Text { .. } => "text",
            Primitive::Cylinder { .. } => "cylinder",
            Primitive::PolygonMesh { .. } => "polygonMesh",
            Primitive::LineSegments { .. } => "lineSegments",
            Primitive::PointCloud { .. } => "pointCloud",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn color_arity_picks_variant() {
        let rgb: Color = serde_json::from_value(json!([1.0, 0.5, 0.0])).unwrap();
        assert_eq!(rgb, Color::Rgb([1.0, 0.5, 0.0]));

        let rgba: Color = serde_json::from_value(json!([1.0, 0.5, 0.0, 0.25])).unwrap();
        assert_eq!(rgba.rgb(), [1.0, 0.5, 0.0]);
        assert_eq!(rgba.alpha(), 0.25);
    }

    #[test]
    fn decodes_tagged_primitive() {
        let prim: Primitive = serde_json::from_value(json!({
            "kind": "sphere",
            "center": [0.0, 1.0, 0.0],
            "radius": 0.3,
            "color": [1.0, 1.0, 0.0],
            "group": "spheres"
        }))
        .unwrap();

        match prim {
            Primitive::Sphere {
                center,
                radius,
                solid,
                ref group,
                ..
            } => {
                assert_eq!(center, [0.0, 1.0, 0.0]);
                assert_eq!(radius, 0.3);
                assert!(!solid);
                assert_eq!(group.as_deref(), Some("spheres"));
            }
            other => panic!("decoded wrong variant: {other:?}"),
        }
    }

    #[test]
    fn decodes_camel_case_fields() {
        let prim: Primitive = serde_json::from_value(json!({
            "kind": "polygonMesh",
            "vertices": [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            "polygons": [0, 1, 2],
            "polygonSizes": [3],
            "vertexColors": [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]
        }))
        .unwrap();

        match prim {
            Primitive::PolygonMesh {
                ref polygon_sizes,
                ref vertex_colors,
                ..
            } => {
                assert_eq!(polygon_sizes, &[3]);
                assert_eq!(vertex_colors.as_ref().map(Vec::len), Some(9));
            }
            other => panic!("decoded wrong variant: {other:?}"),
        }

        let text: Primitive = serde_json::from_value(json!({
            "kind": "text",
            "position": [0.0, 0.0, 1.0],
            "text": "Origin",
            "fontFamily": "sans-serif",
            "fontSize": 24.0
        }))
        .unwrap();

        match text {
            Primitive::Text {
                ref font_family,
                font_size,
                ..
            } => {
                assert_eq!(font_family.as_deref(), Some("sans-serif"));
                assert_eq!(font_size, Some(24.0));
            }
            other => panic!("decoded wrong variant: {other:?}"),
        }
    }

    #[test]
    fn optional_fields_default_when_absent() {
        let prim: Primitive = serde_json::from_value(json!({
            "kind": "point",
            "position": [1.0, 2.0, 3.0]
        }))
        .unwrap();

        match prim {
            Primitive::Point {
                color, size, group, ..
            } => {
                assert!(color.is_none());
                assert!(size.is_none());
                assert!(group.is_none());
            }
            other => panic!("decoded wrong variant: {other:?}"),
        }
        assert_eq!(Color::default().rgb(), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn group_accessor_covers_every_kind() {
        let prim: Primitive = serde_json::from_value(json!({
            "kind": "lineSegments",
            "segments": [0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
            "group": "wires"
        }))
        .unwrap();
        assert_eq!(prim.group(), Some("wires"));
        assert_eq!(prim.kind_name(), "lineSegments");
    }
}
