//! Camera pose and projection.

use nalgebra_glm as glm;

use crate::scene::Ray;

/// Where the camera sits, what it looks at, and how it projects.
///
/// The world is Z-up; the default pose looks at the origin from below the
/// Y axis and above the XY plane.
#[derive(Debug, Clone)]
pub struct CameraState {
    pub position: glm::Vec3,
    pub target: glm::Vec3,
    pub up: glm::Vec3,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl CameraState {
    pub fn default_position() -> glm::Vec3 {
        glm::vec3(0.0, -25.0, 25.0)
    }

    pub fn default_target() -> glm::Vec3 {
        glm::vec3(0.0, 0.0, 0.0)
    }

    pub fn default_up() -> glm::Vec3 {
        glm::vec3(0.0, 0.0, 1.0)
    }

    pub fn new() -> Self {
        Self {
            position: Self::default_position(),
            target: Self::default_target(),
            up: Self::default_up(),
            fov_y_degrees: 60.0,
            near: 0.1,
            far: 1000.0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn view_matrix(&self) -> glm::Mat4 {
        glm::look_at(&self.position, &self.target, &self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> glm::Mat4 {
        glm::perspective(aspect, self.fov_y_degrees.to_radians(), self.near, self.far)
    }

    /// Ray from the camera through a screen pixel, for picking.
    ///
    /// Screen coordinates have their origin at the top-left of the viewport.
    /// Returns `None` for a viewport with no area or when the combined
    /// view-projection matrix is not invertible.
    pub fn screen_ray(
        &self,
        screen_x: f32,
        screen_y: f32,
        viewport_width: f32,
        viewport_height: f32,
    ) -> Option<Ray> {
        if viewport_width <= 0.0 || viewport_height <= 0.0 {
            return None;
        }

        let ndc_x = (2.0 * screen_x) / viewport_width - 1.0;
        let ndc_y = 1.0 - (2.0 * screen_y) / viewport_height;

        let view_proj = self.projection_matrix(viewport_width / viewport_height) * self.view_matrix();
        let inverse = view_proj.try_inverse()?;

        let near_h = inverse * glm::vec4(ndc_x, ndc_y, -1.0, 1.0);
        let far_h = inverse * glm::vec4(ndc_x, ndc_y, 1.0, 1.0);
        if near_h.w == 0.0 || far_h.w == 0.0 {
            return None;
        }

        let near_point = glm::vec3(near_h.x, near_h.y, near_h.z) / near_h.w;
        let far_point = glm::vec3(far_h.x, far_h.y, far_h.z) / far_h.w;

        Some(Ray {
            origin: near_point,
            direction: glm::normalize(&(far_point - near_point)),
        })
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new()
    }
}
