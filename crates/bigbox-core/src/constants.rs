//! Global constants for bigbox-core

/// Number of faces on a cuboid.
pub const FACE_COUNT: usize = 6;

/// Atlas grid columns.
pub const ATLAS_COLUMNS: usize = 3;

/// Atlas grid rows.
pub const ATLAS_ROWS: usize = 2;

/// Degrees of rotation per pixel of drag.
pub const ROTATION_SENSITIVITY: f32 = 0.4;

/// Per-frame drag delta fed to `apply_drag` while auto-rotating.
pub const AUTO_ROTATE_DELTA: f32 = 0.4;

/// Pitch limit (degrees) when all six faces are present.
pub const FULL_PITCH_LIMIT: f32 = 90.0;

/// Pitch limit (degrees) for equatorial face sets (no top/bottom art).
pub const EQUATORIAL_PITCH_LIMIT: f32 = 7.0;

/// Zoom factor bounds.
pub const MIN_ZOOM: f32 = 0.5;
/// Zoom factor bounds.
pub const MAX_ZOOM: f32 = 3.0;

/// Default zoom (1x).
pub const DEFAULT_ZOOM: f32 = 1.0;

/// Initial pitch in degrees.
pub const DEFAULT_ANGLE_X: f32 = 20.0;

/// Initial yaw in degrees.
pub const DEFAULT_ANGLE_Y: f32 = 30.0;

/// Filler pixel used for the missing top/bottom faces (opaque black, RGBA).
pub const FILLER_COLOR: [u8; 4] = [0, 0, 0, 255];

/// Debug overlay border color (RGBA).
pub const DEBUG_BORDER_COLOR: [u8; 4] = [255, 0, 64, 255];

/// Debug overlay label color (RGBA).
pub const DEBUG_LABEL_COLOR: [u8; 4] = [255, 255, 255, 255];

/// Ambient floor of the diffuse term.
pub const AMBIENT: f32 = 0.4;

/// Shininess range (gloss 0 → 1).
pub const SHININESS_RANGE: (f32, f32) = (8.0, 128.0);

/// Specular intensity range (gloss 0 → 1).
pub const SPECULAR_RANGE: (f32, f32) = (0.05, 1.0);
