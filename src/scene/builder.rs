//! Turns one primitive into one scene node.

use nalgebra_glm as glm;

use crate::display_list::{Color, Primitive};
use crate::error::Diagnostic;

use super::geometry::{self, MeshBuffers};
use super::node::{
    LabelData, LineData, MeshData, MeshIndices, MeshStyle, NodeKind, PointData, SceneNode,
    Transform, rotation_between,
};
use super::vertex::{LineVertex, MeshVertex, PointVertex};

pub const DEFAULT_POINT_SIZE: f32 = 0.05;
pub const DEFAULT_LINE_WIDTH: f32 = 1.0;
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";
pub const DEFAULT_FONT_SIZE: f32 = 32.0;

const SPHERE_WIDTH_SEGMENTS: u32 = 32;
const SPHERE_HEIGHT_SEGMENTS: u32 = 24;
const CONE_SEGMENTS: u32 = 32;
const CYLINDER_SEGMENTS: u32 = 16;

/// Cones are drawn at a tenth of their requested dimensions.
const CONE_SCALE: f32 = 0.1;

/// World-space label height per point of font size.
const LABEL_WORLD_SCALE: f32 = 0.01;

fn vec3_from(a: [f32; 3]) -> glm::Vec3 {
    glm::vec3(a[0], a[1], a[2])
}

fn flat_color(color: Option<Color>) -> [f32; 3] {
    color.unwrap_or_default().rgb()
}

fn style_for(solid: bool) -> MeshStyle {
    if solid {
        MeshStyle::Filled
    } else {
        MeshStyle::Wireframe
    }
}

fn mesh_from_buffers(
    buffers: MeshBuffers,
    color: [f32; 3],
    style: MeshStyle,
    double_sided: bool,
) -> MeshData {
    let vertex_count = buffers.vertex_count();
    MeshData {
        vertices: buffers.vertices,
        indices: MeshIndices::pack(buffers.indices, vertex_count),
        colors: None,
        color,
        style,
        double_sided,
    }
}

/// Builds the scene node for one primitive.
///
/// Bad data degrades instead of failing: the node comes back reduced and the
/// finding lands in `diagnostics`. Only a cylinder whose endpoints coincide
/// produces no node at all.
pub fn build_primitive(prim: &Primitive, diagnostics: &mut Vec<Diagnostic>) -> Option<SceneNode> {
    let mut node = match prim {
        Primitive::Point {
            position,
            color,
            size,
            ..
        } => SceneNode::new(NodeKind::Points(PointData {
            vertices: vec![PointVertex {
                position: *position,
            }],
            color: flat_color(*color),
            size: size.unwrap_or(DEFAULT_POINT_SIZE),
        })),

        Primitive::Line {
            start,
            end,
            color,
            width,
            ..
        } => {
            let color = flat_color(*color);
            SceneNode::new(NodeKind::Lines(LineData {
                vertices: vec![
                    LineVertex {
                        position: *start,
                        color,
                    },
                    LineVertex {
                        position: *end,
                        color,
                    },
                ],
                width: width.unwrap_or(DEFAULT_LINE_WIDTH),
            }))
        }

        Primitive::Sphere {
            center,
            radius,
            color,
            solid,
            ..
        } => {
            let buffers =
                geometry::uv_sphere(*radius, SPHERE_WIDTH_SEGMENTS, SPHERE_HEIGHT_SEGMENTS);
            let mut node = SceneNode::new(NodeKind::Mesh(mesh_from_buffers(
                buffers,
                flat_color(*color),
                style_for(*solid),
                false,
            )));
            node.transform = Transform::from_translation(vec3_from(*center));
            node
        }

        Primitive::Cone {
            tip,
            direction,
            length,
            radius,
            color,
            ..
        } => {
            let height = length * CONE_SCALE;
            let buffers = geometry::cone(radius * CONE_SCALE, height, CONE_SEGMENTS);
            let mut node = SceneNode::new(NodeKind::Mesh(mesh_from_buffers(
                buffers,
                flat_color(*color),
                MeshStyle::Filled,
                false,
            )));

            let tip = vec3_from(*tip);
            let dir = vec3_from(*direction);
            let len = glm::length(&dir);
            if len > 0.0 {
                let dir = dir / len;
                node.transform = Transform {
                    translation: tip - dir * (height / 2.0),
                    rotation: rotation_between(&glm::vec3(0.0, 1.0, 0.0), &dir),
                    scale: glm::vec3(1.0, 1.0, 1.0),
                };
            } else {
                // Zero direction leaves the cone unrotated, centered on its tip.
                node.transform = Transform::from_translation(tip);
            }
            node.focus_anchor = Some(tip);
            node
        }

        Primitive::Rect {
            corner,
            width,
            height,
            color,
            solid,
            ..
        } => {
            let buffers = geometry::quad(*width, *height);
            let mut node = SceneNode::new(NodeKind::Mesh(mesh_from_buffers(
                buffers,
                flat_color(*color),
                style_for(*solid),
                true,
            )));
            node.transform = Transform::from_translation(glm::vec3(
                corner[0] + width / 2.0,
                corner[1] + height / 2.0,
                corner[2],
            ));
            node
        }

        Primitive::Text {
            position,
            text,
            color,
            font_family,
            font_size,
            ..
        } => {
            let font_size = font_size.unwrap_or(DEFAULT_FONT_SIZE);
            let mut node = SceneNode::new(NodeKind::Label(LabelData {
                text: text.clone(),
                color: flat_color(*color),
                font_family: font_family
                    .clone()
                    .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string()),
                font_size,
                world_scale: LABEL_WORLD_SCALE * font_size,
            }));
            node.transform = Transform::from_translation(vec3_from(*position));
            node
        }

        Primitive::Cylinder {
            start,
            end,
            radius,
            color,
            solid,
            ..
        } => {
            let start = vec3_from(*start);
            let end = vec3_from(*end);
            let axis = end - start;
            let length = glm::length(&axis);
            if length == 0.0 {
                diagnostics.push(Diagnostic::ZeroLengthCylinder);
                return None;
            }

            let buffers = geometry::cylinder(*radius, length, CYLINDER_SEGMENTS);
            let mut node = SceneNode::new(NodeKind::Mesh(mesh_from_buffers(
                buffers,
                flat_color(*color),
                style_for(*solid),
                false,
            )));
            node.transform = Transform {
                translation: (start + end) / 2.0,
                rotation: rotation_between(&glm::vec3(0.0, 1.0, 0.0), &(axis / length)),
                scale: glm::vec3(1.0, 1.0, 1.0),
            };
            node
        }

        Primitive::PolygonMesh {
            vertices,
            polygons,
            polygon_sizes,
            color,
            vertex_colors,
            ..
        } => SceneNode::new(NodeKind::Mesh(build_polygon_mesh(
            vertices,
            polygons,
            polygon_sizes,
            flat_color(*color),
            vertex_colors.as_deref(),
            diagnostics,
        ))),

        Primitive::LineSegments {
            segments,
            color,
            width,
            ..
        } => {
            let mut usable = segments.len();
            if usable % 6 != 0 {
                diagnostics.push(Diagnostic::RaggedSegmentArray {
                    len: segments.len(),
                });
                usable -= usable % 6;
            }

            let color = flat_color(*color);
            let vertices = segments[..usable]
                .chunks_exact(3)
                .map(|p| LineVertex {
                    position: [p[0], p[1], p[2]],
                    color,
                })
                .collect();
            SceneNode::new(NodeKind::Lines(LineData {
                vertices,
                width: width.unwrap_or(DEFAULT_LINE_WIDTH),
            }))
        }

        Primitive::PointCloud {
            points,
            color,
            size,
            ..
        } => {
            let mut usable = points.len();
            if usable % 3 != 0 {
                diagnostics.push(Diagnostic::RaggedPointArray { len: points.len() });
                usable -= usable % 3;
            }

            let vertices = points[..usable]
                .chunks_exact(3)
                .map(|p| PointVertex {
                    position: [p[0], p[1], p[2]],
                })
                .collect();
            SceneNode::new(NodeKind::Points(PointData {
                vertices,
                color: flat_color(*color),
                size: size.unwrap_or(DEFAULT_POINT_SIZE),
            }))
        }
    };

    node.group_id = prim.group().map(str::to_owned);
    Some(node)
}

fn build_polygon_mesh(
    vertices: &[f32],
    polygons: &[u32],
    polygon_sizes: &[u32],
    color: [f32; 3],
    vertex_colors: Option<&[f32]>,
    diagnostics: &mut Vec<Diagnostic>,
) -> MeshData {
    let mut usable = vertices.len();
    if usable % 3 != 0 {
        diagnostics.push(Diagnostic::RaggedVertexArray {
            len: vertices.len(),
        });
        usable -= usable % 3;
    }

    let mut mesh_vertices: Vec<MeshVertex> = vertices[..usable]
        .chunks_exact(3)
        .map(|p| MeshVertex {
            position: [p[0], p[1], p[2]],
            normal: [0.0; 3],
        })
        .collect();
    let vertex_count = mesh_vertices.len();

    let indices = geometry::fan_triangulate(polygons, polygon_sizes, vertex_count, diagnostics);
    geometry::compute_vertex_normals(&mut mesh_vertices, &indices);

    let colors = vertex_colors.and_then(|values| {
        if values.len() == vertex_count * 3 {
            Some(values.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect())
        } else if values.len() == vertex_count * 4 {
            // Alpha is dropped when compacting to RGB.
            Some(values.chunks_exact(4).map(|c| [c[0], c[1], c[2]]).collect())
        } else {
            diagnostics.push(Diagnostic::VertexColorLength {
                len: values.len(),
                rgb: vertex_count * 3,
                rgba: vertex_count * 4,
            });
            None
        }
    });

    // Input polygons carry no winding convention, so both faces draw.
    MeshData {
        vertices: mesh_vertices,
        indices: MeshIndices::pack(indices, vertex_count),
        colors,
        color,
        style: MeshStyle::Filled,
        double_sided: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    const EPSILON: f32 = 1e-5;

    fn prim(value: serde_json::Value) -> Primitive {
        serde_json::from_value(value).unwrap()
    }

    fn build(value: serde_json::Value) -> (Option<SceneNode>, Vec<Diagnostic>) {
        let mut diags = Vec::new();
        let node = build_primitive(&prim(value), &mut diags);
        (node, diags)
    }

    #[test]
    fn point_defaults_fill_in() {
        let (node, diags) = build(json!({
            "kind": "point",
            "position": [1.0, 2.0, 3.0]
        }));
        let node = node.unwrap();
        assert!(diags.is_empty());
        assert!(node.group_id.is_none());

        match node.kind {
            NodeKind::Points(data) => {
                assert_eq!(data.vertices.len(), 1);
                assert_eq!(data.vertices[0].position, [1.0, 2.0, 3.0]);
                assert_eq!(data.size, DEFAULT_POINT_SIZE);
                assert_eq!(data.color, [1.0, 1.0, 1.0]);
            }
            other => panic!("expected points, got {other:?}"),
        }
    }

    #[test]
    fn sphere_without_solid_is_wireframe() {
        let (node, _) = build(json!({
            "kind": "sphere",
            "center": [0.0, 1.0, 0.0],
            "radius": 0.5,
            "group": "spheres"
        }));
        let node = node.unwrap();
        assert_eq!(node.group_id.as_deref(), Some("spheres"));
        assert_relative_eq!(node.transform.translation.y, 1.0, epsilon = EPSILON);

        match node.kind {
            NodeKind::Mesh(data) => {
                assert_eq!(data.style, MeshStyle::Wireframe);
                assert!(!data.double_sided);
            }
            other => panic!("expected mesh, got {other:?}"),
        }
    }

    #[test]
    fn cone_scales_down_and_anchors_at_tip() {
        let (node, _) = build(json!({
            "kind": "cone",
            "tip": [0.0, 0.0, 5.0],
            "direction": [0.0, 0.0, 1.0],
            "length": 10.0,
            "radius": 3.0
        }));
        let node = node.unwrap();

        let anchor = node.focus_anchor.unwrap();
        assert_relative_eq!(anchor.z, 5.0, epsilon = EPSILON);

        // Drawn height is 1.0, so the center sits half that below the tip.
        assert_relative_eq!(node.transform.translation.z, 4.5, epsilon = EPSILON);

        // The local apex at +height/2 lands back on the tip.
        let apex = node.transform.apply(&glm::vec3(0.0, 0.5, 0.0));
        assert_relative_eq!(apex.x, 0.0, epsilon = EPSILON);
        assert_relative_eq!(apex.y, 0.0, epsilon = EPSILON);
        assert_relative_eq!(apex.z, 5.0, epsilon = EPSILON);
    }

    #[test]
    fn cone_with_zero_direction_stays_put() {
        let (node, diags) = build(json!({
            "kind": "cone",
            "tip": [1.0, 2.0, 3.0],
            "direction": [0.0, 0.0, 0.0],
            "length": 4.0,
            "radius": 1.0
        }));
        let node = node.unwrap();
        assert!(diags.is_empty());
        assert_relative_eq!(node.transform.translation.x, 1.0, epsilon = EPSILON);
        assert_relative_eq!(node.transform.translation.z, 3.0, epsilon = EPSILON);

        let up = node.transform.apply(&glm::vec3(0.0, 1.0, 0.0)) - node.transform.translation;
        assert_relative_eq!(up.y, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn rect_positions_by_corner() {
        let (node, _) = build(json!({
            "kind": "rect",
            "corner": [1.0, 2.0, 0.5],
            "width": 4.0,
            "height": 2.0,
            "solid": true
        }));
        let node = node.unwrap();
        assert_relative_eq!(node.transform.translation.x, 3.0, epsilon = EPSILON);
        assert_relative_eq!(node.transform.translation.y, 3.0, epsilon = EPSILON);
        assert_relative_eq!(node.transform.translation.z, 0.5, epsilon = EPSILON);

        match node.kind {
            NodeKind::Mesh(data) => {
                assert_eq!(data.style, MeshStyle::Filled);
                assert!(data.double_sided);
            }
            other => panic!("expected mesh, got {other:?}"),
        }
    }

    #[test]
    fn text_defaults_and_world_scale() {
        let (node, _) = build(json!({
            "kind": "text",
            "position": [0.0, 0.0, 1.0],
            "text": "Origin"
        }));
        let node = node.unwrap();

        match node.kind {
            NodeKind::Label(data) => {
                assert_eq!(data.text, "Origin");
                assert_eq!(data.font_family, "sans-serif");
                assert_eq!(data.font_size, 32.0);
                assert_relative_eq!(data.world_scale, 0.32, epsilon = EPSILON);
            }
            other => panic!("expected label, got {other:?}"),
        }
    }

    #[test]
    fn cylinder_spans_its_endpoints() {
        let (node, diags) = build(json!({
            "kind": "cylinder",
            "start": [0.0, 0.0, 0.0],
            "end": [0.0, 0.0, 2.0],
            "radius": 0.5,
            "solid": true
        }));
        let node = node.unwrap();
        assert!(diags.is_empty());
        assert_relative_eq!(node.transform.translation.z, 1.0, epsilon = EPSILON);

        // Local +Y at half height maps onto the far endpoint.
        let top = node.transform.apply(&glm::vec3(0.0, 1.0, 0.0));
        assert_relative_eq!(top.z, 2.0, epsilon = EPSILON);
        let bottom = node.transform.apply(&glm::vec3(0.0, -1.0, 0.0));
        assert_relative_eq!(bottom.z, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn coincident_cylinder_endpoints_drop_the_primitive() {
        let (node, diags) = build(json!({
            "kind": "cylinder",
            "start": [1.0, 1.0, 1.0],
            "end": [1.0, 1.0, 1.0],
            "radius": 0.5
        }));
        assert!(node.is_none());
        assert_eq!(diags, vec![Diagnostic::ZeroLengthCylinder]);
    }

    #[test]
    fn polygon_mesh_compacts_rgba_colors() {
        let (node, diags) = build(json!({
            "kind": "polygonMesh",
            "vertices": [
                0.0, 0.0, 0.0,
                1.0, 0.0, 0.0,
                1.0, 1.0, 0.0,
                0.0, 1.0, 0.0
            ],
            "polygons": [0, 1, 2, 3],
            "polygonSizes": [4],
            "vertexColors": [
                1.0, 0.0, 0.0, 1.0,
                0.0, 1.0, 0.0, 1.0,
                0.0, 0.0, 1.0, 1.0,
                1.0, 1.0, 1.0, 0.5
            ]
        }));
        let node = node.unwrap();
        assert!(diags.is_empty());

        match node.kind {
            NodeKind::Mesh(data) => {
                assert_eq!(data.indices.triangle_count(), 2);
                let colors = data.colors.unwrap();
                assert_eq!(colors.len(), 4);
                assert_eq!(colors[3], [1.0, 1.0, 1.0]);
                // Flat quad in the XY plane gets +Z normals.
                assert_relative_eq!(data.vertices[0].normal[2], 1.0, epsilon = EPSILON);
            }
            other => panic!("expected mesh, got {other:?}"),
        }
    }

    #[test]
    fn mismatched_vertex_colors_keep_the_mesh() {
        let (node, diags) = build(json!({
            "kind": "polygonMesh",
            "vertices": [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            "polygons": [0, 1, 2],
            "polygonSizes": [3],
            "vertexColors": [1.0, 0.0]
        }));
        let node = node.unwrap();
        assert_eq!(
            diags,
            vec![Diagnostic::VertexColorLength {
                len: 2,
                rgb: 9,
                rgba: 12
            }]
        );

        match node.kind {
            NodeKind::Mesh(data) => {
                assert!(data.colors.is_none());
                assert_eq!(data.indices.triangle_count(), 1);
            }
            other => panic!("expected mesh, got {other:?}"),
        }
    }

    #[test]
    fn ragged_segment_array_trims_the_tail() {
        let (node, diags) = build(json!({
            "kind": "lineSegments",
            "segments": [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 9.0],
            "width": 2.0
        }));
        let node = node.unwrap();
        assert_eq!(diags, vec![Diagnostic::RaggedSegmentArray { len: 7 }]);

        match node.kind {
            NodeKind::Lines(data) => {
                assert_eq!(data.vertices.len(), 2);
                assert_eq!(data.width, 2.0);
            }
            other => panic!("expected lines, got {other:?}"),
        }
    }

    #[test]
    fn ragged_point_cloud_trims_the_tail() {
        let (node, diags) = build(json!({
            "kind": "pointCloud",
            "points": [0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 9.0],
            "color": [0.0, 1.0, 0.0]
        }));
        let node = node.unwrap();
        assert_eq!(diags, vec![Diagnostic::RaggedPointArray { len: 10 }]);

        match node.kind {
            NodeKind::Points(data) => {
                assert_eq!(data.vertices.len(), 3);
                assert_eq!(data.color, [0.0, 1.0, 0.0]);
            }
            other => panic!("expected points, got {other:?}"),
        }
    }
}
