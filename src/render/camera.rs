//! Fixed orthographic camera.

use glam::{Mat4, Vec3};

/// Distance from the origin to the camera.
const CAMERA_DISTANCE: f32 = 10.0;

/// Half of the visible extent; a model fitted to 0.8 fills 40% of each side.
const ORTHO_HALF_EXTENT: f32 = 1.0;

const NEAR: f32 = 0.1;
const FAR: f32 = 100.0;

/// Orthographic camera looking at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,
    /// Camera target (what it's looking at)
    pub target: Vec3,
    /// Up vector
    pub up: Vec3,
}

impl Camera {
    /// Place the camera on a sphere around the origin.
    ///
    /// Azimuth is measured from +Z towards +X, elevation upwards from the XZ plane.
    pub fn orbit(azimuth_deg: f32, elevation_deg: f32) -> Self {
        let (az, el) = (azimuth_deg.to_radians(), elevation_deg.to_radians());
        let direction = Vec3::new(el.cos() * az.sin(), el.sin(), el.cos() * az.cos());

        Camera {
            position: direction * CAMERA_DISTANCE,
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
    }

    /// Get the view matrix (world to camera space)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Get the orthographic projection matrix
    pub fn projection_matrix(&self, output_width: u32, output_height: u32) -> Mat4 {
        let aspect = output_width as f32 / output_height.max(1) as f32;
        let half_width = ORTHO_HALF_EXTENT * aspect;
        let half_height = ORTHO_HALF_EXTENT;

        Mat4::orthographic_rh(-half_width, half_width, -half_height, half_height, NEAR, FAR)
    }

    /// Get the combined view-projection matrix
    pub fn view_projection_matrix(&self, output_width: u32, output_height: u32) -> Mat4 {
        self.projection_matrix(output_width, output_height) * self.view_matrix()
    }

    /// Unit vector from the target towards the camera.
    pub fn view_direction(&self) -> Vec3 {
        (self.position - self.target).normalize_or_zero()
    }
}
