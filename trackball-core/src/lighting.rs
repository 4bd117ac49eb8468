/// Phong lighting for shading rendered faces
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// A directional light with ambient, diffuse and specular terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhongLight {
    /// Direction the light travels towards the scene (need not be normalized)
    pub direction: [f32; 3],
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    pub shininess: f32,
}

impl Default for PhongLight {
    fn default() -> Self {
        Self {
            direction: [-0.5, -0.5, -1.0],
            ambient: 0.15,
            diffuse: 0.7,
            specular: 0.4,
            shininess: 16.0,
        }
    }
}

impl PhongLight {
    /// Unit vector from a surface point towards the light
    pub fn to_light(&self) -> Vector3<f32> {
        let [x, y, z] = self.direction;
        -Vector3::new(x, y, z)
            .try_normalize(1e-6)
            .unwrap_or_else(|| Vector3::new(0.0, 0.0, -1.0))
    }

    /// Light intensity in `[0, 1]` for a surface with unit `normal` seen
    /// along unit `to_eye`.
    pub fn intensity(&self, normal: &Vector3<f32>, to_eye: &Vector3<f32>) -> f32 {
        let to_light = self.to_light();
        let lambert = normal.dot(&to_light).max(0.0);

        let specular = if lambert > 0.0 {
            let reflected = reflect(&-to_light, normal);
            reflected.dot(to_eye).max(0.0).powf(self.shininess)
        } else {
            0.0
        };

        (self.ambient + self.diffuse * lambert + self.specular * specular).clamp(0.0, 1.0)
    }
}

/// Reflect `incident` about the plane with unit `normal`
pub fn reflect(incident: &Vector3<f32>, normal: &Vector3<f32>) -> Vector3<f32> {
    incident - normal * (2.0 * incident.dot(normal))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn head_on() -> PhongLight {
        PhongLight {
            direction: [0.0, 0.0, -1.0],
            ..PhongLight::default()
        }
    }

    #[test]
    fn test_reflect() {
        let reflected = reflect(&Vector3::new(1.0, -1.0, 0.0), &Vector3::y());
        assert!((reflected - Vector3::new(1.0, 1.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn test_facing_light_is_brightest() {
        let light = head_on();
        let facing = light.intensity(&Vector3::z(), &Vector3::z());
        let tilted = light.intensity(&Vector3::new(0.0, 0.6, 0.8), &Vector3::z());
        assert!(facing > tilted);
        assert!((facing - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_back_face_gets_only_ambient() {
        let light = head_on();
        let intensity = light.intensity(&-Vector3::z(), &Vector3::z());
        assert!((intensity - light.ambient).abs() < 1e-6);
    }

    #[test]
    fn test_zero_direction_falls_back_to_viewer() {
        let light = PhongLight {
            direction: [0.0, 0.0, 0.0],
            ..PhongLight::default()
        };
        assert!((light.to_light() - Vector3::z()).norm() < 1e-6);
    }
}
