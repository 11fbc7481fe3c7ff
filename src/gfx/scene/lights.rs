//! Light settings for the scene
//!
//! The renderer and the debug panel both go through [`Lights`]. Every write
//! uses a typed setter that clamps into the range of the matching
//! [`LightField`], so the GPU never sees a value the panel could not produce.

use std::ops::RangeInclusive;

/// Uniform light applied to every surface regardless of orientation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Light shining from `position` towards the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: [f32; 3],
}

/// Tweakable light parameters exposed to the debug panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightField {
    AmbientIntensity,
    MoonIntensity,
    MoonX,
    MoonY,
    MoonZ,
}

impl LightField {
    /// Slider increment shared by all fields
    pub const STEP: f32 = 0.001;

    /// All fields in panel order
    pub const ALL: [LightField; 5] = [
        LightField::AmbientIntensity,
        LightField::MoonIntensity,
        LightField::MoonX,
        LightField::MoonY,
        LightField::MoonZ,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LightField::AmbientIntensity => "ambient intensity",
            LightField::MoonIntensity => "moon intensity",
            LightField::MoonX => "moon x",
            LightField::MoonY => "moon y",
            LightField::MoonZ => "moon z",
        }
    }

    pub fn range(self) -> RangeInclusive<f32> {
        match self {
            LightField::AmbientIntensity | LightField::MoonIntensity => 0.0..=1.0,
            LightField::MoonX | LightField::MoonY | LightField::MoonZ => -5.0..=5.0,
        }
    }

    fn clamp(self, value: f32) -> f32 {
        let range = self.range();
        value.clamp(*range.start(), *range.end())
    }
}

/// The scene's ambient light and moon light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lights {
    ambient: AmbientLight,
    moon: DirectionalLight,
}

impl Default for Lights {
    fn default() -> Self {
        Self {
            ambient: AmbientLight {
                color: [1.0, 1.0, 1.0],
                intensity: 0.5,
            },
            moon: DirectionalLight {
                color: [1.0, 1.0, 1.0],
                intensity: 0.5,
                position: [4.0, 5.0, -2.0],
            },
        }
    }
}

impl Lights {
    pub fn ambient(&self) -> &AmbientLight {
        &self.ambient
    }

    pub fn moon(&self) -> &DirectionalLight {
        &self.moon
    }

    pub fn set_ambient_intensity(&mut self, value: f32) {
        self.set(LightField::AmbientIntensity, value);
    }

    pub fn set_moon_intensity(&mut self, value: f32) {
        self.set(LightField::MoonIntensity, value);
    }

    pub fn set_moon_position(&mut self, x: f32, y: f32, z: f32) {
        self.set(LightField::MoonX, x);
        self.set(LightField::MoonY, y);
        self.set(LightField::MoonZ, z);
    }

    /// Stores `value` clamped into the field's range
    ///
    /// NaN is rejected and leaves the current value untouched.
    pub fn set(&mut self, field: LightField, value: f32) {
        if value.is_nan() {
            log::warn!("Ignoring NaN for {}", field.label());
            return;
        }

        let value = field.clamp(value);
        match field {
            LightField::AmbientIntensity => self.ambient.intensity = value,
            LightField::MoonIntensity => self.moon.intensity = value,
            LightField::MoonX => self.moon.position[0] = value,
            LightField::MoonY => self.moon.position[1] = value,
            LightField::MoonZ => self.moon.position[2] = value,
        }
    }

    pub fn get(&self, field: LightField) -> f32 {
        match field {
            LightField::AmbientIntensity => self.ambient.intensity,
            LightField::MoonIntensity => self.moon.intensity,
            LightField::MoonX => self.moon.position[0],
            LightField::MoonY => self.moon.position[1],
            LightField::MoonZ => self.moon.position[2],
        }
    }

    /// Ambient colour premultiplied by intensity
    pub fn ambient_radiance(&self) -> [f32; 3] {
        scale(self.ambient.color, self.ambient.intensity)
    }

    /// Moon colour premultiplied by intensity
    pub fn moon_radiance(&self) -> [f32; 3] {
        scale(self.moon.color, self.moon.intensity)
    }
}

fn scale(color: [f32; 3], intensity: f32) -> [f32; 3] {
    [color[0] * intensity, color[1] * intensity, color[2] * intensity]
}
