//! Configuration management with environment variable support.
//!
//! This module provides centralized configuration for Web Vision, supporting:
//! - Environment variables for all configurable values
//! - Sensible defaults that match the original hardcoded values
//! - A cached global config resolved once per process
//!
//! # Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `WEB_VISION_SHOT_DIR` | Scratch directory for screenshots | `/tmp/web-vision` |
//! | `WEB_VISION_WAIT_MS` | Single-shot wait before capture (ms) | `10000` |
//! | `WEB_VISION_VIEWPORT` | Browser viewport size | `1920x1080` |
//! | `WEB_VISION_SESSION_ID` | Session id appended to the target URI | `0` |
//!
//! The PSNR pass threshold is intentionally *not* configurable; it is a fixed
//! constant in the quality gate so that runs are comparable across machines.
//!
//! # Example
//!
//! ```bash
//! # Keep artifacts somewhere persistent
//! export WEB_VISION_SHOT_DIR="/var/tmp/web-vision-shots"
//!
//! # Capture a smaller viewport
//! export WEB_VISION_VIEWPORT="1280x720"
//! ```

use std::env;
use std::sync::OnceLock;

// ============================================================================
// Default Values (matching original hardcoded values)
// ============================================================================

/// Default scratch directory for screenshot artifacts
pub const DEFAULT_SHOT_DIR: &str = "/tmp/web-vision";

/// Default wait before the single-shot capture (milliseconds)
pub const DEFAULT_SINGLE_SHOT_WAIT_MS: u64 = 10_000;

/// Default viewport width (pixels)
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1920;

/// Default viewport height (pixels)
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 1080;

/// Default session id appended to the target URI as a query parameter
pub const DEFAULT_SESSION_ID: u32 = 0;

// ============================================================================
// Environment Variable Names
// ============================================================================

/// Environment variable for the screenshot scratch directory
pub const ENV_SHOT_DIR: &str = "WEB_VISION_SHOT_DIR";

/// Environment variable for the single-shot wait duration
pub const ENV_WAIT_MS: &str = "WEB_VISION_WAIT_MS";

/// Environment variable for the browser viewport size
pub const ENV_VIEWPORT: &str = "WEB_VISION_VIEWPORT";

/// Environment variable for the session id query parameter
pub const ENV_SESSION_ID: &str = "WEB_VISION_SESSION_ID";

// ============================================================================
// Configuration Getters (with caching)
// ============================================================================

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration (initialized from environment on first access)
pub fn get() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

/// Centralized configuration for Web Vision
#[derive(Debug, Clone)]
pub struct Config {
    /// Screenshot artifact settings
    pub shots: ShotSettings,
    /// Browser session settings
    pub browser: BrowserSettings,
}

/// Screenshot artifact settings
#[derive(Debug, Clone)]
pub struct ShotSettings {
    /// Scratch directory where screenshots are written
    pub base_dir: String,
    /// Wait before the single-shot capture (milliseconds)
    pub single_shot_wait_ms: u64,
}

/// Browser session settings
#[derive(Debug, Clone)]
pub struct BrowserSettings {
    /// Viewport width (pixels)
    pub viewport_width: u32,
    /// Viewport height (pixels)
    pub viewport_height: u32,
    /// Session id appended to the navigation target as `?sId=<id>`
    pub session_id: u32,
}

impl Config {
    /// Create configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            shots: ShotSettings::from_env(),
            browser: BrowserSettings::from_env(),
        }
    }

    /// Create configuration with all defaults (ignoring environment)
    pub fn defaults() -> Self {
        Self {
            shots: ShotSettings::defaults(),
            browser: BrowserSettings::defaults(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ShotSettings {
    /// Create shot settings from environment variables
    pub fn from_env() -> Self {
        Self {
            base_dir: env::var(ENV_SHOT_DIR).unwrap_or_else(|_| DEFAULT_SHOT_DIR.to_string()),
            single_shot_wait_ms: env::var(ENV_WAIT_MS)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_SINGLE_SHOT_WAIT_MS),
        }
    }

    /// Create shot settings with defaults
    pub fn defaults() -> Self {
        Self {
            base_dir: DEFAULT_SHOT_DIR.to_string(),
            single_shot_wait_ms: DEFAULT_SINGLE_SHOT_WAIT_MS,
        }
    }
}

impl BrowserSettings {
    /// Create browser settings from environment variables
    pub fn from_env() -> Self {
        let (width, height) = env::var(ENV_VIEWPORT)
            .ok()
            .and_then(|s| parse_viewport(&s))
            .unwrap_or((DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT));

        Self {
            viewport_width: width,
            viewport_height: height,
            session_id: env::var(ENV_SESSION_ID)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_SESSION_ID),
        }
    }

    /// Create browser settings with defaults
    pub fn defaults() -> Self {
        Self {
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            session_id: DEFAULT_SESSION_ID,
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Parse a viewport string into (width, height)
/// Supports: "hd" (1280x720), "fhd" (1920x1080), "qhd" (2560x1440), or "WxH"
pub fn parse_viewport(size: &str) -> Option<(u32, u32)> {
    match size.to_lowercase().as_str() {
        "hd" => Some((1280, 720)),
        "fhd" => Some((1920, 1080)),
        "qhd" => Some((2560, 1440)),
        custom => {
            let parts: Vec<&str> = custom.split('x').collect();
            if parts.len() == 2 {
                let w = parts[0].parse().ok()?;
                let h = parts[1].parse().ok()?;
                Some((w, h))
            } else {
                None
            }
        }
    }
}

/// Get the screenshot scratch directory (convenience function)
pub fn shot_base_dir() -> String {
    get().shots.base_dir.clone()
}

/// Get the single-shot wait duration in milliseconds (convenience function)
pub fn single_shot_wait_ms() -> u64 {
    get().shots.single_shot_wait_ms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_viewport_presets() {
        assert_eq!(parse_viewport("hd"), Some((1280, 720)));
        assert_eq!(parse_viewport("fhd"), Some((1920, 1080)));
        assert_eq!(parse_viewport("qhd"), Some((2560, 1440)));
    }

    #[test]
    fn test_parse_viewport_custom() {
        assert_eq!(parse_viewport("1024x768"), Some((1024, 768)));
        assert_eq!(parse_viewport("800x600"), Some((800, 600)));
    }

    #[test]
    fn test_parse_viewport_invalid() {
        assert_eq!(parse_viewport("invalid"), None);
        assert_eq!(parse_viewport("1024"), None);
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::defaults();
        assert_eq!(config.shots.base_dir, DEFAULT_SHOT_DIR);
        assert_eq!(config.shots.single_shot_wait_ms, DEFAULT_SINGLE_SHOT_WAIT_MS);
        assert_eq!(config.browser.viewport_width, DEFAULT_VIEWPORT_WIDTH);
        assert_eq!(config.browser.session_id, DEFAULT_SESSION_ID);
    }
}
