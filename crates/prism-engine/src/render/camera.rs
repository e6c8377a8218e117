//! View-projection sources for `begin_scene`.

use glam::{Mat4, Quat, Vec3};

/// Anything that can supply a view-projection matrix for a scene.
pub trait Camera {
    fn view_projection(&self) -> Mat4;
}

impl Camera for Mat4 {
    fn view_projection(&self) -> Mat4 {
        *self
    }
}

/// 2D camera: an orthographic box, moved and rotated about Z.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrthographicCamera {
    projection: Mat4,
    position: Vec3,
    rotation: f32,
}

impl OrthographicCamera {
    pub fn new(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        Self {
            projection: Mat4::orthographic_rh(left, right, bottom, top, -1.0, 1.0),
            position: Vec3::ZERO,
            rotation: 0.0,
        }
    }

    /// Camera showing `height` world units vertically at the given aspect ratio, centered on the origin.
    pub fn from_aspect(aspect: f32, height: f32) -> Self {
        let half_h = height * 0.5;
        let half_w = half_h * aspect;
        Self::new(-half_w, half_w, -half_h, half_h)
    }

    pub fn set_projection(&mut self, left: f32, right: f32, bottom: f32, top: f32) {
        self.projection = Mat4::orthographic_rh(left, right, bottom, top, -1.0, 1.0);
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Rotation about Z in radians.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_rotation(&mut self, radians: f32) {
        self.rotation = radians;
    }

    pub fn view(&self) -> Mat4 {
        Mat4::from_rotation_translation(Quat::from_rotation_z(self.rotation), self.position).inverse()
    }
}

impl Camera for OrthographicCamera {
    fn view_projection(&self) -> Mat4 {
        self.projection * self.view()
    }
}

/// Right-handed perspective camera looking from `eye` at `target`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl PerspectiveCamera {
    pub fn new(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y,
            aspect,
            near,
            far,
        }
    }

    pub fn look_at(mut self, eye: Vec3, target: Vec3) -> Self {
        self.eye = eye;
        self.target = target;
        self
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }
}

impl Camera for PerspectiveCamera {
    fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}
