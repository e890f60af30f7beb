//! Camera control configuration loaded from `config/camera.toml`.
use std::{
    f32::consts::PI,
    fs,
    path::Path,
};

use bevy::prelude::*;
use serde::Deserialize;

const CONFIG_PATH: &str = "config/camera.toml";

#[derive(Debug, Clone, Deserialize)]
struct RawCameraConfig {
    #[serde(default)]
    fly: RawFlySection,
    #[serde(default)]
    orbit: RawOrbitSection,
    #[serde(default)]
    projection: RawProjectionSection,
    #[serde(default)]
    preview: RawPreviewSection,
    #[serde(default = "default_cameras")]
    cameras: Vec<RawCameraSlot>,
}

impl Default for RawCameraConfig {
    fn default() -> Self {
        Self {
            fly: RawFlySection::default(),
            orbit: RawOrbitSection::default(),
            projection: RawProjectionSection::default(),
            preview: RawPreviewSection::default(),
            cameras: default_cameras(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawFlySection {
    movement_speed: f32,
    roll_speed: f32,
    look_speed: f32,
    drag_to_look: bool,
}

impl Default for RawFlySection {
    fn default() -> Self {
        Self {
            movement_speed: 2.5,
            roll_speed: 0.25,
            look_speed: 0.0025,
            drag_to_look: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawOrbitSection {
    offset: [f32; 3],
    rotate_speed: f32,
    desired_radius: Option<f32>,
    min_polar: f32,
    max_polar: f32,
}

impl Default for RawOrbitSection {
    fn default() -> Self {
        Self {
            offset: [-15.0, 2.0, -15.0],
            rotate_speed: 0.005,
            desired_radius: None,
            min_polar: 0.05,
            max_polar: PI - 0.05,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawProjectionSection {
    fov_degrees: f32,
    near: f32,
    far: f32,
}

impl Default for RawProjectionSection {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 500.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawPreviewSection {
    enabled: bool,
    scale: f32,
}

impl Default for RawPreviewSection {
    fn default() -> Self {
        Self {
            enabled: true,
            scale: 0.25,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawCameraSlot {
    name: String,
    position: [f32; 3],
    #[serde(default)]
    look_at: [f32; 3],
}

fn default_cameras() -> Vec<RawCameraSlot> {
    vec![
        RawCameraSlot {
            name: "Overview".into(),
            position: [0.0, 0.0, 5.0],
            look_at: [0.0, 0.0, 0.0],
        },
        RawCameraSlot {
            name: "Street".into(),
            position: [-12.0, 1.7, 16.0],
            look_at: [0.0, 1.0, 0.0],
        },
        RawCameraSlot {
            name: "Rooftop".into(),
            position: [18.0, 14.0, -10.0],
            look_at: [0.0, 0.0, 0.0],
        },
    ]
}

/// Fixed configuration applied to every navigation controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlySettings {
    pub movement_speed: f32,
    pub roll_speed: f32,
    pub look_speed: f32,
    pub drag_to_look: bool,
}

/// Orbit entry offset, radius and angular limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSettings {
    /// Camera position relative to the target on entry and on retarget.
    pub offset: Vec3,
    pub rotate_speed: f32,
    /// Radial distance the tracker maintains.
    pub desired_radius: f32,
    pub min_polar: f32,
    pub max_polar: f32,
}

/// Perspective parameters shared by every slot; fixed once a slot is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionSettings {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

/// Corner preview of the rig's `next` camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewSettings {
    pub enabled: bool,
    /// Fraction of the window covered by the preview, per axis.
    pub scale: f32,
}

/// Initial placement of one fly-eligible slot.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraSlotSpec {
    pub name: String,
    pub position: Vec3,
    pub look_at: Vec3,
}

/// Camera control settings resource.
#[derive(Resource, Debug, Clone)]
pub struct CameraSettings {
    pub fly: FlySettings,
    pub orbit: OrbitSettings,
    pub projection: ProjectionSettings,
    pub preview: PreviewSettings,
    pub cameras: Vec<CameraSlotSpec>,
}

impl CameraSettings {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(data) => Self::from_toml_str(&data).unwrap_or_else(|err| {
                warn!(
                    "Failed to parse {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                Self::default()
            }),
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                Self::default()
            }
        }
    }

    pub fn from_toml_str(data: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawCameraConfig>(data).map(Self::from)
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        RawCameraConfig::default().into()
    }
}

impl From<RawCameraConfig> for CameraSettings {
    fn from(value: RawCameraConfig) -> Self {
        let fly = FlySettings {
            movement_speed: value.fly.movement_speed.max(0.0),
            roll_speed: value.fly.roll_speed.max(0.0),
            look_speed: value.fly.look_speed.max(0.0),
            drag_to_look: value.fly.drag_to_look,
        };

        let offset = Vec3::from_array(value.orbit.offset);
        let offset_length = offset.length();
        let fallback_radius = if offset_length > f32::EPSILON {
            offset_length
        } else {
            1.0
        };
        let desired_radius = value
            .orbit
            .desired_radius
            .filter(|radius| radius.is_finite() && *radius > 0.0)
            .unwrap_or(fallback_radius);
        let min_polar = value.orbit.min_polar.clamp(0.001, PI - 0.001);
        let max_polar = value.orbit.max_polar.clamp(min_polar, PI - 0.001);

        let orbit = OrbitSettings {
            offset,
            rotate_speed: value.orbit.rotate_speed.max(0.0),
            desired_radius,
            min_polar,
            max_polar,
        };

        let near = if value.projection.near > 0.0 {
            value.projection.near
        } else {
            RawProjectionSection::default().near
        };
        let far = value.projection.far.max(near * 2.0);
        let projection = ProjectionSettings {
            fov_degrees: value.projection.fov_degrees.clamp(1.0, 170.0),
            near,
            far,
        };

        let preview = PreviewSettings {
            enabled: value.preview.enabled,
            scale: value.preview.scale.clamp(0.05, 1.0),
        };

        let cameras = value
            .cameras
            .into_iter()
            .map(|slot| CameraSlotSpec {
                name: slot.name,
                position: Vec3::from_array(slot.position),
                look_at: Vec3::from_array(slot.look_at),
            })
            .collect();

        Self {
            fly,
            orbit,
            projection,
            preview,
            cameras,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_viewer_constants() {
        let settings = CameraSettings::default();
        assert_eq!(settings.fly.movement_speed, 2.5);
        assert_eq!(settings.fly.roll_speed, 0.25);
        assert!(settings.fly.drag_to_look);
        assert_eq!(settings.orbit.offset, Vec3::new(-15.0, 2.0, -15.0));
        assert!((settings.orbit.desired_radius - 454.0_f32.sqrt()).abs() < 1e-4);
        assert_eq!(settings.projection.fov_degrees, 75.0);
        assert_eq!(settings.cameras.len(), 3);
        assert_eq!(settings.cameras[0].position, Vec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_sections() {
        let settings = CameraSettings::from_toml_str(
            r#"
            [fly]
            movement_speed = 6.0

            [orbit]
            desired_radius = 12.0

            [[cameras]]
            name = "Gate"
            position = [1.0, 2.0, 3.0]
            "#,
        )
        .expect("valid toml");

        assert_eq!(settings.fly.movement_speed, 6.0);
        assert_eq!(settings.fly.roll_speed, 0.25);
        assert_eq!(settings.orbit.desired_radius, 12.0);
        assert_eq!(settings.cameras.len(), 1);
        assert_eq!(settings.cameras[0].name, "Gate");
        assert_eq!(settings.cameras[0].look_at, Vec3::ZERO);
    }

    #[test]
    fn invalid_values_are_clamped() {
        let settings = CameraSettings::from_toml_str(
            r#"
            [fly]
            movement_speed = -1.0

            [orbit]
            offset = [0.0, 0.0, 0.0]
            desired_radius = -4.0

            [projection]
            near = 0.0
            far = 0.0
            fov_degrees = 400.0

            [preview]
            scale = 3.0
            "#,
        )
        .expect("valid toml");

        assert_eq!(settings.fly.movement_speed, 0.0);
        assert_eq!(settings.orbit.desired_radius, 1.0);
        assert!(settings.projection.near > 0.0);
        assert!(settings.projection.far > settings.projection.near);
        assert_eq!(settings.projection.fov_degrees, 170.0);
        assert_eq!(settings.preview.scale, 1.0);
    }

    #[test]
    fn malformed_toml_reports_an_error() {
        assert!(CameraSettings::from_toml_str("[fly\nmovement_speed = ").is_err());
    }
}
