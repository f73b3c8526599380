//! Presentation boundary
//!
//! The unlock engine only hands out [`ContentId`]s. A renderer maps them to
//! drawing logic for its own toolkit; this crate ships a plain-text renderer
//! for the terminal.

mod terminal;

pub use terminal::{TerminalRenderer, TextContext};

use anyhow::{Result, bail};

use crate::catalog::ContentId;

/// Draws the content of a lesson into a toolkit-specific context
pub trait ContentRenderer {
    type Context;

    /// Render `content` into `ctx`. Unknown content ids render nothing.
    fn render(&self, content: &ContentId, ctx: &mut Self::Context);

    /// Whether this renderer knows how to draw `content`
    fn supports(&self, content: &ContentId) -> bool;
}

/// Capability to open a web page, invoked by renderers for documentation links
pub trait UrlOpener {
    fn open_url(&self, url: &str) -> Result<()>;
}

/// Opens URLs with the platform's default browser
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open_url(&self, url: &str) -> Result<()> {
        #[cfg(target_os = "macos")]
        let mut command = std::process::Command::new("open");

        #[cfg(target_os = "windows")]
        let mut command = {
            let mut command = std::process::Command::new("cmd");
            command.args(["/C", "start", ""]);
            command
        };

        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        let mut command = std::process::Command::new("xdg-open");

        match command.arg(url).spawn() {
            Ok(_) => Ok(()),
            Err(e) => bail!("Failed to open {}: {}", url, e),
        }
    }
}
