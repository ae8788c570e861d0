/// DOM hooks, asset location and renderer tuning for the web frontend.
///
/// Scene-level values (camera, floor, timings, points) live in
/// `showroom_core::constants`; these only concern the page and the GPU.
// Page structure
pub const CANVAS_SELECTOR: &str = "canvas.webgl";
pub const LOADING_BAR_SELECTOR: &str = ".loading-bar";
pub const MARKER_VISIBLE_CLASS: &str = "visible";
pub const LOADING_BAR_ENDED_CLASS: &str = "ended";

// Assets are served next to the page
pub const ASSET_BASE_URL: &str = ".";

// Clear colour #888888 converted to linear
pub const CLEAR_LINEAR: f64 = 0.246;

// Placeholder textures until assets arrive (sRGB bytes)
pub const PLACEHOLDER_ENV_RGBA: [u8; 4] = [136, 136, 136, 255];
pub const PLACEHOLDER_COLOR_RGBA: [u8; 4] = [255, 255, 255, 255];
pub const PLACEHOLDER_NORMAL_RGBA: [u8; 4] = [128, 128, 255, 255];

// Pointer handling
pub const WHEEL_LINE_PX: f32 = 16.0; // DOM_DELTA_LINE scale
pub const WHEEL_PAGE_PX: f32 = 800.0; // DOM_DELTA_PAGE scale
pub const BUTTON_PRIMARY: i16 = 0;
pub const BUTTON_MIDDLE: i16 = 1;
pub const BUTTON_SECONDARY: i16 = 2;
