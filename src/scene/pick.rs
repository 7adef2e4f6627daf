//! Ray picking over a frame's scene tree.

use nalgebra_glm as glm;

use super::node::{NodeKind, SceneNode};

const EPSILON: f32 = 0.000001;

/// World-space ray with a unit direction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: glm::Vec3,
    pub direction: glm::Vec3,
}

impl Ray {
    pub fn at(&self, t: f32) -> glm::Vec3 {
        self.origin + self.direction * t
    }
}

/// A surface found under a ray.
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    /// Distance along the ray.
    pub distance: f32,
    /// World-space surface point.
    pub point: glm::Vec3,
    /// Point the camera should travel toward: the surface point, unless the
    /// node carries an anchor (cone tips do).
    pub focus_point: glm::Vec3,
}

/// Nearest visible mesh surface under the ray, if any.
///
/// Only triangle meshes are pick targets; lines, points and labels have no
/// surface. Hidden subtrees are skipped entirely, and facing is ignored so
/// wireframe and double-sided meshes behave the same as solid ones.
pub fn pick_nearest(root: &SceneNode, ray: &Ray) -> Option<Hit> {
    let mut best = None;
    visit(root, &glm::Mat4::identity(), ray, &mut best);
    best
}

fn visit(node: &SceneNode, parent: &glm::Mat4, ray: &Ray, best: &mut Option<Hit>) {
    if !node.visible {
        return;
    }

    let world = parent * node.transform.to_matrix();

    if let NodeKind::Mesh(mesh) = &node.kind {
        for i in 0..mesh.indices.triangle_count() {
            let [a, b, c] = mesh.indices.triangle(i);
            let v0 = transform_point(&world, mesh.vertices[a as usize].position);
            let v1 = transform_point(&world, mesh.vertices[b as usize].position);
            let v2 = transform_point(&world, mesh.vertices[c as usize].position);

            if let Some(t) = ray_triangle(&ray.origin, &ray.direction, &v0, &v1, &v2) {
                let closer = match best {
                    Some(hit) => t < hit.distance,
                    None => true,
                };
                if closer {
                    let point = ray.at(t);
                    let focus_point = match node.focus_anchor {
                        Some(anchor) => transform_vec(parent, &anchor),
                        None => point,
                    };
                    *best = Some(Hit {
                        distance: t,
                        point,
                        focus_point,
                    });
                }
            }
        }
    }

    for child in &node.children {
        visit(child, &world, ray, best);
    }
}

fn transform_point(m: &glm::Mat4, p: [f32; 3]) -> glm::Vec3 {
    let v = m * glm::vec4(p[0], p[1], p[2], 1.0);
    glm::vec3(v.x, v.y, v.z)
}

fn transform_vec(m: &glm::Mat4, p: &glm::Vec3) -> glm::Vec3 {
    let v = m * glm::vec4(p.x, p.y, p.z, 1.0);
    glm::vec3(v.x, v.y, v.z)
}

/// Moller-Trumbore ray/triangle intersection; positive distances only.
fn ray_triangle(
    origin: &glm::Vec3,
    direction: &glm::Vec3,
    v0: &glm::Vec3,
    v1: &glm::Vec3,
    v2: &glm::Vec3,
) -> Option<f32> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = glm::cross(direction, &edge2);
    let a = glm::dot(&edge1, &h);
    if a > -EPSILON && a < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = origin - v0;
    let u = f * glm::dot(&s, &h);
    if u < 0.0 || u > 1.0 {
        return None;
    }

    let q = glm::cross(&s, &edge1);
    let v = f * glm::dot(direction, &q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * glm::dot(&edge2, &q);
    if t > EPSILON { Some(t) } else { None }
}
