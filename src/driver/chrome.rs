//! Headless Chrome page driver using the Chrome DevTools Protocol.
//!
//! This is the only module that knows about browser lifecycle; the rest of
//! the crate sees the [`PageDriver`] capability surface.

use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use headless_chrome::browser::tab::point::Point;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

use crate::driver::backend::{DriverError, DriverResult, PageDriver};

/// Configuration for browser launch
#[derive(Debug, Clone)]
pub struct ChromeConfig {
    /// Run in headless mode (default: true)
    pub headless: bool,
    /// Viewport width (pixels)
    pub viewport_width: u32,
    /// Viewport height (pixels)
    pub viewport_height: u32,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        let cfg = crate::config::get();
        Self {
            headless: true,
            viewport_width: cfg.browser.viewport_width,
            viewport_height: cfg.browser.viewport_height,
        }
    }
}

/// Live page session backed by a headless Chrome instance
pub struct ChromePage {
    /// Underlying browser instance (kept alive for tab lifetime)
    #[allow(dead_code)]
    browser: Browser,
    /// Active tab the run drives
    tab: Arc<Tab>,
}

impl ChromePage {
    /// Launch a browser and open the tab for one run
    pub fn launch(config: ChromeConfig) -> DriverResult<Self> {
        info!(
            "launching browser (headless: {}, viewport: {}x{})",
            config.headless, config.viewport_width, config.viewport_height
        );

        let launch_options = LaunchOptions::default_builder()
            .headless(config.headless)
            .window_size(Some((config.viewport_width, config.viewport_height)))
            .build()
            .map_err(|e| DriverError::Launch(format!("invalid launch options: {}", e)))?;

        let browser = Browser::new(launch_options)
            .map_err(|e| DriverError::Launch(format!("failed to launch browser: {}", e)))?;

        let tab = browser
            .new_tab()
            .map_err(|e| DriverError::Launch(format!("failed to open tab: {}", e)))?;

        info!("browser launched");
        Ok(Self { browser, tab })
    }
}

impl PageDriver for ChromePage {
    fn navigate(&mut self, uri: &str) -> DriverResult<()> {
        debug!("navigating to {}", uri);

        self.tab
            .navigate_to(uri)
            .map_err(|e| DriverError::Navigate(format!("{}: {}", uri, e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| DriverError::Navigate(format!("timeout for {}: {}", uri, e)))?;

        info!("navigated to {}", uri);
        Ok(())
    }

    fn screenshot(&mut self, path: &Path) -> DriverResult<()> {
        debug!("capturing frame to {}", path.display());

        let data = self
            .tab
            .capture_screenshot(CaptureScreenshotFormatOption::Png, None, None, true)
            .map_err(|e| DriverError::Screenshot(format!("CDP capture failed: {}", e)))?;

        fs::write(path, &data)?;
        debug!("wrote {} bytes to {}", data.len(), path.display());
        Ok(())
    }

    fn click(&mut self, x: i64, y: i64) -> DriverResult<()> {
        debug!("clicking at ({}, {})", x, y);

        self.tab
            .click_point(Point {
                x: x as f64,
                y: y as f64,
            })
            .map_err(|e| DriverError::Click(format!("at ({}, {}): {}", x, y, e)))?;

        Ok(())
    }

    fn wait(&mut self, ms: u64) -> DriverResult<()> {
        thread::sleep(Duration::from_millis(ms));
        Ok(())
    }

    fn close(&mut self) -> DriverResult<()> {
        debug!("closing page session");

        // Close the tab now rather than deferring to Drop; the orchestrator
        // relies on close() for teardown on every exit path.
        self.tab
            .close(true)
            .map_err(|e| DriverError::Teardown(format!("failed to close tab: {}", e)))?;

        info!("page session closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chrome_config_defaults() {
        let config = ChromeConfig {
            headless: true,
            viewport_width: 1920,
            viewport_height: 1080,
        };
        assert!(config.headless);
        assert_eq!(config.viewport_width, 1920);
        assert_eq!(config.viewport_height, 1080);
    }
}
