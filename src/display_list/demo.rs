use super::frame::{DisplayList, Frame, GroupDef};
use super::primitive::{Color, Primitive};

/// Built-in demo display list, used by the binary when no file is given and
/// as a fixture in tests. Deliberately tags some primitives with groups that
/// have no matching GroupDef (`cones`, `labels`, `rects`): unknown ids must
/// stay visible.
pub fn demo_display_list() -> DisplayList {
    DisplayList {
        groups: vec![
            GroupDef {
                id: "points".into(),
                label: "Points".into(),
            },
            GroupDef {
                id: "lines".into(),
                label: "Lines".into(),
            },
            GroupDef {
                id: "spheres".into(),
                label: "Spheres".into(),
            },
        ],
        frames: vec![
            Frame {
                id: 0,
                primitives: vec![
                    Primitive::Point {
                        position: [-1.0, 0.0, 0.0],
                        color: Some(Color::Rgb([1.0, 0.0, 0.0])),
                        size: Some(0.1),
                        group: Some("points".into()),
                    },
                    Primitive::Point {
                        position: [1.0, 0.0, 0.0],
                        color: Some(Color::Rgb([0.0, 1.0, 0.0])),
                        size: Some(0.1),
                        group: Some("points".into()),
                    },
                    Primitive::Line {
                        start: [-1.0, 0.0, 0.0],
                        end: [1.0, 0.0, 0.0],
                        color: Some(Color::Rgb([0.0, 0.5, 1.0])),
                        width: Some(1.0),
                        group: Some("lines".into()),
                    },
                    Primitive::Sphere {
                        center: [0.0, 1.0, 0.0],
                        radius: 0.3,
                        color: Some(Color::Rgb([1.0, 1.0, 0.0])),
                        solid: false,
                        group: Some("spheres".into()),
                    },
                    Primitive::Point {
                        position: [0.0, 0.0, 0.0],
                        color: Some(Color::Rgb([1.0, 1.0, 1.0])),
                        size: Some(0.02),
                        group: Some("points".into()),
                    },
                    Primitive::Cone {
                        tip: [0.0, 0.0, 0.0],
                        direction: [0.0, 1.0, 1.0],
                        length: 2.0,
                        radius: 0.3,
                        color: Some(Color::Rgb([1.0, 0.0, 0.0])),
                        group: Some("cones".into()),
                    },
                    Primitive::Text {
                        position: [0.0, 0.0, 1.0],
                        text: "Origin".into(),
                        color: Some(Color::Rgb([1.0, 1.0, 0.0])),
                        font_family: Some("sans-serif".into()),
                        font_size: Some(24.0),
                        group: Some("labels".into()),
                    },
                    Primitive::Sphere {
                        center: [2.0, 0.0, 0.0],
                        radius: 0.5,
                        color: Some(Color::Rgb([0.0, 0.0, 1.0])),
                        solid: true,
                        group: Some("spheres".into()),
                    },
                    Primitive::Rect {
                        corner: [-1.0, -1.0, 0.0],
                        width: 2.0,
                        height: 1.0,
                        color: Some(Color::Rgb([0.5, 0.5, 0.5])),
                        solid: true,
                        group: Some("rects".into()),
                    },
                ],
                annotation: None,
            },
            Frame {
                id: 1,
                primitives: vec![
                    Primitive::Point {
                        position: [0.0, 0.0, 0.0],
                        color: Some(Color::Rgb([1.0, 1.0, 1.0])),
                        size: Some(0.15),
                        group: Some("points".into()),
                    },
                    Primitive::Sphere {
                        center: [0.0, 0.0, 0.0],
                        radius: 0.8,
                        color: Some(Color::Rgb([0.0, 0.8, 0.8])),
                        solid: false,
                        group: Some("spheres".into()),
                    },
                ],
                annotation: None,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_has_expected_shape() {
        let dl = demo_display_list();
        assert_eq!(dl.groups.len(), 3);
        assert_eq!(dl.frames.len(), 2);
        assert_eq!(dl.frames[0].primitives.len(), 9);
        assert_eq!(dl.frames[1].primitives.len(), 2);
    }

    #[test]
    fn demo_survives_a_json_round_trip() {
        let dl = demo_display_list();
        let value = serde_json::to_value(&dl).unwrap();
        let back: DisplayList = serde_json::from_value(value).unwrap();
        assert_eq!(back, dl);
    }
}
