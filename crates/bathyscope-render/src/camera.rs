//! Camera and automatic framing.

use bathyscope_core::{BoundingBox, CameraOptions};
use glam::{Mat4, Vec3};

/// Spheres smaller than this are grown to it before framing.
pub const MIN_RADIUS: f32 = 1.0e-3;

/// Extra depth kept behind the framed sphere, as a multiple of its radius.
pub const FAR_MARGIN: f32 = 1.2;

/// Direction from the framed center towards the camera.
pub const VIEW_AXIS: Vec3 = Vec3::Z;

/// A sphere enclosing a dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    /// Sphere around `bb`: centered on the box, through its corners.
    #[must_use]
    pub fn from_box(bb: &BoundingBox) -> Self {
        Self {
            center: bb.center(),
            radius: bb.diagonal() * 0.5,
        }
    }

    /// Returns true if the box lies entirely inside the sphere.
    #[must_use]
    pub fn contains_box(&self, bb: &BoundingBox) -> bool {
        let slack = self.radius * 1.0e-5 + f32::EPSILON;
        bb.corners()
            .iter()
            .all(|&c| c.distance(self.center) <= self.radius + slack)
    }
}

/// Result of framing a sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Framing {
    /// Sphere that was framed, after the radius floor.
    pub sphere: BoundingSphere,
    /// Distance from the sphere center to the camera.
    pub distance: f32,
    pub near: f32,
    pub far: f32,
}

/// Camera pose saved while the top-down view is locked.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SavedPose {
    position: Vec3,
    target: Vec3,
    up: Vec3,
}

/// A perspective camera.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Point the camera (and any orbit control) looks at.
    pub target: Vec3,
    /// Up vector.
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect_ratio: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Preferred near plane used by framing.
    pub preferred_near: f32,
    saved_pose: Option<SavedPose>,
}

impl Camera {
    /// Creates a new camera with default settings.
    #[must_use]
    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 10.0, 20.0),
            target: Vec3::new(0.0, 5.0, 0.0),
            up: Vec3::Y,
            fov: std::f32::consts::FRAC_PI_4, // 45 degrees
            aspect_ratio,
            near: 0.1,
            far: 100.0,
            preferred_near: 0.1,
            saved_pose: None,
        }
    }

    /// Creates a camera from configuration.
    #[must_use]
    pub fn from_options(options: &CameraOptions) -> Self {
        let mut camera = Self::new(options.aspect_ratio);
        camera.set_fov_degrees(options.fov_degrees);
        camera.preferred_near = options.near.max(f32::EPSILON);
        camera.near = camera.preferred_near;
        camera
    }

    /// Returns the view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Returns the projection matrix.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect_ratio, self.near, self.far)
    }

    /// Returns the combined view-projection matrix.
    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Returns the camera's forward direction.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    /// The narrower of the vertical and horizontal field of view.
    #[must_use]
    pub fn limiting_fov(&self) -> f32 {
        if self.aspect_ratio >= 1.0 {
            return self.fov;
        }
        let horizontal = 2.0 * ((self.fov * 0.5).tan() * self.aspect_ratio).atan();
        self.fov.min(horizontal)
    }

    /// Moves the camera so the whole sphere is inside the view frustum.
    ///
    /// The camera sits on [`VIEW_AXIS`] at `r / sin(fov / 2)` from the
    /// center and looks at it. Radii below [`MIN_RADIUS`] are floored. A
    /// top-down lock stays in place and still restores the pose saved when it
    /// was taken.
    pub fn frame_sphere(&mut self, sphere: BoundingSphere) -> Framing {
        let radius = if sphere.radius.is_finite() {
            sphere.radius.max(MIN_RADIUS)
        } else {
            MIN_RADIUS
        };
        let sphere = BoundingSphere {
            center: sphere.center,
            radius,
        };

        let distance = radius / (self.limiting_fov() * 0.5).sin();
        let near = self.preferred_near.min((distance - radius) * 0.5);
        let far = distance + radius * FAR_MARGIN;

        self.position = sphere.center + VIEW_AXIS * distance;
        self.target = sphere.center;
        self.up = Vec3::Y;
        self.near = near;
        self.far = far;

        log::debug!(
            "framed sphere center={} r={radius}: distance={distance}, near={near}, far={far}",
            sphere.center
        );

        Framing {
            sphere,
            distance,
            near,
            far,
        }
    }

    /// Frames the sphere around a bounding box.
    pub fn frame_box(&mut self, bb: &BoundingBox) -> Framing {
        self.frame_sphere(BoundingSphere::from_box(bb))
    }

    /// Returns whether the top-down view is locked.
    #[must_use]
    pub fn is_top_down_locked(&self) -> bool {
        self.saved_pose.is_some()
    }

    /// Saves the current pose and looks straight down the depth axis at the
    /// target from the current distance.
    pub fn lock_top_down(&mut self) {
        if self.saved_pose.is_some() {
            return;
        }
        self.saved_pose = Some(SavedPose {
            position: self.position,
            target: self.target,
            up: self.up,
        });
        let distance = self.position.distance(self.target).max(MIN_RADIUS);
        self.position = self.target + Vec3::Z * distance;
        self.up = Vec3::Y;
    }

    /// Restores the pose saved by [`Camera::lock_top_down`].
    pub fn unlock_top_down(&mut self) {
        if let Some(pose) = self.saved_pose.take() {
            self.position = pose.position;
            self.target = pose.target;
            self.up = pose.up;
        }
    }

    /// Sets the field of view in radians.
    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov.clamp(0.1, std::f32::consts::PI - 0.1);
    }

    /// Returns FOV in degrees.
    #[must_use]
    pub fn fov_degrees(&self) -> f32 {
        self.fov.to_degrees()
    }

    /// Sets FOV from degrees.
    pub fn set_fov_degrees(&mut self, degrees: f32) {
        self.set_fov(degrees.to_radians());
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(2.0)
    }
}
