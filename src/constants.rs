/// Viewer tuning constants.
///
/// These constants express intended behavior (camera template, frame
/// proportions, fit range) and keep magic numbers out of the code.
// Camera template (one fixed camera/orbit/light rig per scene)
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_START_DISTANCE: f32 = 3.5;
pub const CAMERA_MIN_DISTANCE: f32 = 1.5;
pub const CAMERA_MAX_DISTANCE: f32 = 20.0;

// Orbit controls
pub const ORBIT_DAMPING: f32 = 0.05; // per-frame easing factor at 60 fps
pub const ORBIT_ROTATE_SPEED: f32 = 0.005; // radians per pixel of drag
pub const ORBIT_ZOOM_SPEED: f32 = 0.0025; // distance units per wheel delta
pub const ORBIT_MAX_PITCH: f32 = 1.55; // just shy of straight up/down

// Content spin while the loop runs
pub const ROTATION_SPEED_PER_FRAME: f32 = 0.001;

// Painting composite
pub const PAINTING_WIDTH: f32 = 4.0;
pub const PAINTING_HEIGHT: f32 = 3.0;
pub const FRAME_THICKNESS: f32 = 0.1;
pub const FRAME_DEPTH: f32 = 0.2;
pub const FRAME_Z_OFFSET: f32 = -0.15;
pub const CUTOUT_MARGIN: f32 = 0.05;

// Loaded-model normalization: the largest bounding-box dimension is scaled
// into [FIT_MIN, FIT_MAX]; models already inside are left untouched.
pub const FIT_MIN: f32 = 2.0;
pub const FIT_MAX: f32 = 6.0;

// Placeholder solid for sculptures without a model (and other categories)
pub const PLACEHOLDER_RADIUS: f32 = 2.0;
pub const PLACEHOLDER_SEGMENTS: u32 = 32;

// Floor platform
pub const FLOOR_RADIUS: f32 = 8.0;
pub const FLOOR_SEGMENTS: u32 = 32;
pub const FLOOR_Y: f32 = -3.0;

// Colors (linear RGB)
pub const FRAME_COLOR: [f32; 4] = [0.545, 0.271, 0.075, 1.0]; // walnut brown
pub const CUTOUT_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
pub const FLOOR_COLOR: [f32; 4] = [0.388, 0.365, 0.298, 1.0];
pub const CLEAR_COLOR: [f64; 4] = [0.067, 0.067, 0.067, 1.0];

// Light rig: ambient plus a key and a fill directional
pub const AMBIENT_LIGHT: [f32; 4] = [0.9, 0.9, 0.9, 1.0];
pub const KEY_LIGHT_DIR: [f32; 3] = [-5.0, -5.0, -5.0]; // from (5,5,5) toward origin
pub const KEY_LIGHT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const FILL_LIGHT_DIR: [f32; 3] = [-5.0, -8.0, -5.0]; // from (5,8,5)
pub const FILL_LIGHT_COLOR: [f32; 4] = [0.6, 0.6, 0.6, 1.0];
