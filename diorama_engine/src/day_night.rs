/// Day/night mode resolution.
///
/// The camera's orbit angle alone decides the mode: NIGHT while the
/// normalized angle lies strictly between 90° and 270°, DAY otherwise
/// (including exactly 90° and 270°). There is no hysteresis and no stored
/// state, so `resolve` is re-evaluated every frame.
///
/// A resolution carries every value the mode imposes on the scene. Outline
/// colors are always the complement of fill colors. The background sits
/// behind the diorama as seen from the current side and its winding flips
/// with it, because it is seen from behind once the camera passes the far side.

use glam::Vec3;

/// Default distance of the background plane from the origin
pub const DEFAULT_BACKGROUND_DISTANCE: f32 = 2.0;

/// Discrete lighting state of the diorama
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Day,
    Night,
}

impl Mode {
    /// Mode for an angle in degrees (any range)
    pub fn from_degrees(degrees: f32) -> Self {
        let angle = normalize_degrees(degrees);
        if angle > 90.0 && angle < 270.0 {
            Mode::Night
        } else {
            Mode::Day
        }
    }

    /// Mode for an orbit angle in radians
    pub fn from_orbit_angle(radians: f32) -> Self {
        Self::from_degrees(radians.to_degrees())
    }

    /// Fill color of the mode (white by day, black by night)
    pub fn fill_color(&self) -> Vec3 {
        match self {
            Mode::Day => Vec3::ONE,
            Mode::Night => Vec3::ZERO,
        }
    }

    /// Outline color: complement of the fill
    pub fn outline_color(&self) -> Vec3 {
        Vec3::ONE - self.fill_color()
    }
}

/// Normalize degrees into [0, 360); NaN stays NaN
pub fn normalize_degrees(degrees: f32) -> f32 {
    ((degrees % 360.0) + 360.0) % 360.0
}

// ===== OVERRIDES =====

/// Every render change a mode imposes, applied to the scene in one pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeOverrides {
    pub inner_box_color: Vec3,
    pub background_color: Vec3,
    pub background_position: Vec3,
    pub background_clockwise_front_face: bool,
    /// Shared outline color of the day and night dioramas
    pub outline_color: Vec3,
    /// Shared fill color of the day and night dioramas
    pub scene_color: Vec3,
    pub wolf_color: Vec3,
    pub wolf_outline_color: Vec3,
    /// Day diorama + its outline
    pub day_visible: bool,
    /// Night diorama + its outline
    pub night_visible: bool,
    /// Gate handed to the particle field
    pub particles_visible: bool,
}

impl ModeOverrides {
    pub fn for_mode(mode: Mode, background_distance: f32) -> Self {
        let fill = mode.fill_color();
        let outline = mode.outline_color();
        let night = mode == Mode::Night;

        Self {
            inner_box_color: fill,
            background_color: fill,
            background_position: if night {
                Vec3::new(0.0, 0.0, background_distance)
            } else {
                Vec3::new(0.0, 0.0, -background_distance)
            },
            background_clockwise_front_face: night,
            outline_color: outline,
            scene_color: fill,
            wolf_color: fill,
            wolf_outline_color: outline,
            day_visible: !night,
            night_visible: night,
            particles_visible: !night,
        }
    }
}

/// Output of `resolve`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub mode: Mode,
    pub overrides: ModeOverrides,
}

// ===== RESOLVER =====

/// Stateless resolver carrying the scene geometry it needs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeResolver {
    background_distance: f32,
}

impl Default for ModeResolver {
    fn default() -> Self {
        Self::new(DEFAULT_BACKGROUND_DISTANCE)
    }
}

impl ModeResolver {
    pub fn new(background_distance: f32) -> Self {
        Self { background_distance }
    }

    /// Resolve an orbit angle in radians
    pub fn resolve(&self, orbit_angle: f32) -> Resolution {
        self.resolve_degrees(orbit_angle.to_degrees())
    }

    /// Resolve an angle in degrees
    pub fn resolve_degrees(&self, degrees: f32) -> Resolution {
        let mode = Mode::from_degrees(degrees);
        Resolution {
            mode,
            overrides: ModeOverrides::for_mode(mode, self.background_distance),
        }
    }
}

/// Resolve an orbit angle (radians) with the default scene geometry
pub fn resolve(orbit_angle: f32) -> Resolution {
    ModeResolver::default().resolve(orbit_angle)
}

/// Resolve an angle in degrees with the default scene geometry
pub fn resolve_degrees(degrees: f32) -> Resolution {
    ModeResolver::default().resolve_degrees(degrees)
}

#[cfg(test)]
#[path = "day_night_tests.rs"]
mod tests;
