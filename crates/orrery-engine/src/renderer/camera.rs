use glam::{Mat4, Vec3, Vec4};

/// Closest allowed angle to the poles, keeps the up vector well-defined.
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Perspective camera orbiting a look-at target (the orbit-control model).
/// The eye is derived from target + yaw/pitch/distance, so moving the target
/// carries the eye along with it.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Look-at point in world space.
    pub target: Vec3,
    /// Angle around the Y axis, radians (0 = eye on +Z).
    pub yaw: f32,
    /// Elevation above the XZ plane, radians.
    pub pitch: f32,
    /// Eye-to-target distance.
    pub distance: f32,
    /// Vertical field of view, radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Fraction of the remaining gap closed per `follow` call.
    pub follow_factor: f32,
}

/// GPU-side camera data handed to the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraUniform {
    pub eye: [f32; 3],
    pub target: [f32; 3],
    pub fov_y: f32,
}

/// A ray in world space with a normalized direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }

    /// Distance along the ray to the first hit with a sphere, if any.
    /// A ray starting inside the sphere reports the exit point.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.dir);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sqrt_disc = disc.sqrt();
        let near = -b - sqrt_disc;
        let far = -b + sqrt_disc;
        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            Some(far)
        } else {
            None
        }
    }
}

impl OrbitCamera {
    /// Camera at `eye` looking at `target` with a vertical FOV in degrees.
    pub fn new(eye: Vec3, target: Vec3, fov_y_degrees: f32) -> Self {
        let offset = eye - target;
        let distance = offset.length().max(1e-3);
        let pitch = (offset.y / distance).clamp(-1.0, 1.0).asin().clamp(-PITCH_LIMIT, PITCH_LIMIT);
        let yaw = offset.x.atan2(offset.z);
        Self {
            target,
            yaw,
            pitch,
            distance,
            fov_y: fov_y_degrees.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 2000.0,
            min_distance: 5.0,
            max_distance: 1000.0,
            follow_factor: 0.5,
        }
    }

    /// Current eye position.
    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(cp * sy, sp, cp * cy) * self.distance
    }

    /// Rotate around the target.
    pub fn orbit(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw = (self.yaw + d_yaw).rem_euclid(std::f32::consts::TAU);
        self.pitch = (self.pitch + d_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Multiply the eye distance, clamped to the allowed range.
    pub fn zoom(&mut self, factor: f32) {
        if factor.is_finite() && factor > 0.0 {
            self.distance = (self.distance * factor).clamp(self.min_distance, self.max_distance);
        }
    }

    /// Resize the viewport (aspect only, the FOV is vertical).
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) {
        if viewport_width > 0.0 && viewport_height > 0.0 {
            self.aspect = viewport_width / viewport_height;
        }
    }

    /// Move the target toward `point` by `follow_factor` of the remaining gap.
    /// Called once per step, the error shrinks geometrically.
    pub fn follow(&mut self, point: Vec3) {
        self.target += (point - self.target) * self.follow_factor;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    /// Perspective projection, right-handed, Z in [0, 1].
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray through a point in normalized device coordinates
    /// (x right, y up, both in [-1, 1]).
    pub fn ray_from_ndc(&self, ndc_x: f32, ndc_y: f32) -> Ray {
        let inv = self.view_projection().inverse();
        let unproject = |z: f32| {
            let p = inv * Vec4::new(ndc_x, ndc_y, z, 1.0);
            p.truncate() / p.w
        };
        let near = unproject(0.0);
        let far = unproject(1.0);
        Ray::new(self.eye(), far - near)
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            eye: self.eye().to_array(),
            target: self.target.to_array(),
            fov_y: self.fov_y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cam() -> OrbitCamera {
        OrbitCamera::new(Vec3::new(0.0, 0.0, 100.0), Vec3::ZERO, 60.0)
    }

    #[test]
    fn eye_round_trips_through_spherical() {
        let eye = Vec3::new(0.0, 60.0, 160.0);
        let c = OrbitCamera::new(eye, Vec3::ZERO, 60.0);
        assert!((c.eye() - eye).length() < 1e-3);
    }

    #[test]
    fn follow_converges_geometrically() {
        let mut c = cam();
        let goal = Vec3::new(40.0, 0.0, -30.0);
        let initial = (goal - c.target).length();
        for k in 1..=12 {
            c.follow(goal);
            let err = (goal - c.target).length();
            assert!(err <= initial * 0.5f32.powi(k) + 1e-4, "step {k}: {err}");
        }
    }

    #[test]
    fn follow_carries_eye_with_target() {
        let mut c = cam();
        let offset = c.eye() - c.target;
        c.target = Vec3::new(10.0, 0.0, 0.0);
        assert!(((c.eye() - c.target) - offset).length() < 1e-4);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut c = cam();
        c.orbit(0.0, 10.0);
        assert!(c.pitch <= PITCH_LIMIT);
        c.orbit(0.0, -20.0);
        assert!(c.pitch >= -PITCH_LIMIT);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut c = cam();
        c.zoom(0.0001);
        assert_eq!(c.distance, c.min_distance);
        c.zoom(1e6);
        assert_eq!(c.distance, c.max_distance);
        c.zoom(f32::NAN);
        assert_eq!(c.distance, c.max_distance);
    }

    #[test]
    fn center_ray_points_at_target() {
        let c = cam();
        let ray = c.ray_from_ndc(0.0, 0.0);
        let expected = (c.target - c.eye()).normalize();
        assert!((ray.dir - expected).length() < 1e-3);
    }

    #[test]
    fn ray_hits_sphere_front_face() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 100.0), Vec3::new(0.0, 0.0, -1.0));
        let t = ray.intersect_sphere(Vec3::ZERO, 10.0).unwrap();
        assert!((t - 90.0).abs() < 1e-3);
        assert!(ray.intersect_sphere(Vec3::new(50.0, 0.0, 0.0), 10.0).is_none());
        assert!(ray.intersect_sphere(Vec3::new(0.0, 0.0, 200.0), 10.0).is_none());
    }

    #[test]
    fn resize_sets_aspect() {
        let mut c = cam();
        c.resize(1920.0, 1080.0);
        assert!((c.aspect - 1920.0 / 1080.0).abs() < 1e-6);
        c.resize(0.0, 100.0);
        assert!((c.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    }
}
