/// Surface material and point light descriptions.

use glam::Vec3;

/// Base reflectance of dielectrics at normal incidence
const DIELECTRIC_F0: f32 = 0.04;

/// Physically based material, one per primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Base color (linear RGB)
    pub albedo: Vec3,
    /// 0 = dielectric, 1 = metal
    pub metallic: f32,
    /// 0 = mirror, 1 = fully rough
    pub roughness: f32,
    /// Ambient occlusion factor
    pub ao: f32,
}

impl Material {
    pub fn new(albedo: Vec3, metallic: f32, roughness: f32, ao: f32) -> Self {
        Self { albedo, metallic, roughness, ao }
    }

    /// Reflectance at normal incidence: mix(0.04, albedo, metallic)
    pub fn f0(&self) -> Vec3 {
        Vec3::splat(DIELECTRIC_F0).lerp(self.albedo, self.metallic)
    }

    /// Schlick Fresnel at a 60 degree incidence, attenuated by roughness
    pub fn reflectance(&self) -> Vec3 {
        let f0 = self.f0();
        (f0 + (Vec3::ONE - f0) * 0.5f32.powi(5)) * (1.0 - self.roughness)
    }
}

impl Default for Material {
    /// Rough white dielectric
    fn default() -> Self {
        Self::new(Vec3::ONE, 0.0, 1.0, 1.0)
    }
}

/// Point light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    /// Linear RGB intensity
    pub color: Vec3,
}

impl PointLight {
    pub fn new(position: Vec3, color: Vec3) -> Self {
        Self { position, color }
    }
}
