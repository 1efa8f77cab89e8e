//! 2D geometry in the range/depth plane.

/// A 2D vector with range and depth components.
///
/// Depth increases downward throughout the engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec2 {
    /// Range component in meters.
    pub r: f64,
    /// Depth component in meters.
    pub z: f64,
}

impl Vec2 {
    /// Construct from components.
    pub fn new(r: f64, z: f64) -> Self {
        Self { r, z }
    }

    /// Euclidean norm.
    pub fn norm(self) -> f64 {
        self.r.hypot(self.z)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.r + rhs.r, self.z + rhs.z)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.r - rhs.r, self.z - rhs.z)
    }
}

impl std::ops::Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, s: f64) -> Vec2 {
        Vec2::new(self.r * s, self.z * s)
    }
}

/// Dot product of two vectors.
pub fn dot(a: Vec2, b: Vec2) -> f64 {
    a.r * b.r + a.z * b.z
}

/// Specular reflection of a direction about a unit normal.
///
/// `d' = d − 2 (d·n) n`. The normal must be unit length.
pub fn reflect(dir: Vec2, normal: Vec2) -> Vec2 {
    let k = 2.0 * dot(dir, normal);
    dir - normal * k
}

/// Intersection of segments `p1→p2` and `q1→q2`.
///
/// Returns `None` for parallel segments or an intersection outside either
/// segment. Endpoint contact counts as an intersection.
pub fn intersect(p1: Vec2, p2: Vec2, q1: Vec2, q2: Vec2) -> Option<Vec2> {
    let dp = p2 - p1;
    let dq = q2 - q1;
    let denom = dp.r * dq.z - dp.z * dq.r;
    if denom == 0.0 {
        return None;
    }
    let w = q1 - p1;
    let t = (w.r * dq.z - w.z * dq.r) / denom;
    let u = (w.r * dp.z - w.z * dp.r) / denom;
    if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
        return None;
    }
    Some(p1 + dp * t)
}
