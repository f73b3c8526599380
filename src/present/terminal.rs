//! Plain-text rendering of the built-in lessons

use tracing::warn;

use super::{ContentRenderer, UrlOpener};
use crate::catalog::ContentId;
use crate::catalog::builtin::{
    ACHIEVEMENTS_INTRO, CONNECT_TO_CLIENT, GLOBAL_SETTINGS, HUNDRED_MILLION, INSTRUMENTATION_INTRO,
    INSTRUMENTATION_STATISTICS, LOAD_TRACE, SAMPLING_INTRO, SAVE_TRACE,
};

const USER_MANUAL_URL: &str = "https://github.com/wolfpld/tracy/releases";

const ZONE_EXAMPLE: &str = r#"#include "Tracy.hpp"

void SomeFunction()
{
    ZoneScoped;
    // Your code here
}"#;

/// Text buffer a [`TerminalRenderer`] writes into
#[derive(Default)]
pub struct TextContext {
    out: String,
    opener: Option<Box<dyn UrlOpener>>,
}

impl TextContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context that also opens documentation links it renders
    pub fn with_opener(opener: Box<dyn UrlOpener>) -> Self {
        Self {
            out: String::new(),
            opener: Some(opener),
        }
    }

    pub fn paragraph(&mut self, text: &str) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// Secondary text, printed dimmed in the GUI
    pub fn note(&mut self, text: &str) {
        self.paragraph(&format!("Note: {}", text));
    }

    pub fn code(&mut self, source: &str) {
        self.out.push('\n');
        for line in source.lines() {
            self.out.push_str("    ");
            self.out.push_str(line);
            self.out.push('\n');
        }
    }

    pub fn link(&mut self, label: &str, url: &str) {
        self.paragraph(&format!("{}: {}", label, url));
        if let Some(opener) = &self.opener {
            if let Err(e) = opener.open_url(url) {
                warn!("Failed to open link: {}", e);
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn into_text(self) -> String {
        self.out
    }
}

/// Renders the built-in lesson content as plain text
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalRenderer;

impl TerminalRenderer {
    const KNOWN: [&'static str; 9] = [
        ACHIEVEMENTS_INTRO,
        CONNECT_TO_CLIENT,
        GLOBAL_SETTINGS,
        SAVE_TRACE,
        LOAD_TRACE,
        INSTRUMENTATION_INTRO,
        HUNDRED_MILLION,
        INSTRUMENTATION_STATISTICS,
        SAMPLING_INTRO,
    ];
}

impl ContentRenderer for TerminalRenderer {
    type Context = TextContext;

    fn supports(&self, content: &ContentId) -> bool {
        Self::KNOWN.contains(&content.as_str())
    }

    fn render(&self, content: &ContentId, ctx: &mut TextContext) {
        match content.as_str() {
            ACHIEVEMENTS_INTRO => {
                ctx.paragraph("The achievements list shows short tasks that walk you through the profiler.");
                ctx.paragraph("Completing a task reveals new ones. New tasks are marked with (!), completed ones with (x).");
            }
            CONNECT_TO_CLIENT => {
                ctx.paragraph("Integrate the profiler client into your application, build it with TRACY_ENABLE defined, start it and connect.");
                ctx.link("User manual", USER_MANUAL_URL);
            }
            GLOBAL_SETTINGS => {
                ctx.paragraph("Global settings live in the about window and persist between sessions.");
            }
            SAVE_TRACE => {
                ctx.paragraph("Save a captured trace to compare it against later runs or to share it.");
                ctx.note("Trace files may contain source code and other sensitive data.");
            }
            LOAD_TRACE => {
                ctx.paragraph("Open a saved trace from the welcome screen.");
            }
            INSTRUMENTATION_INTRO => {
                ctx.paragraph("Instrumentation measures every call of the functions you mark. Add a zone macro at the start of a function:");
                ctx.code(ZONE_EXAMPLE);
                ctx.note("Other languages provide equivalent macros; see the documentation.");
            }
            HUNDRED_MILLION => {
                ctx.paragraph("Long captures with a hundred million zones are supported.");
                ctx.note("Memory use grows with the zone count.");
            }
            INSTRUMENTATION_STATISTICS => {
                ctx.paragraph("The statistics window lists every zone with its total time and call count.");
            }
            SAMPLING_INTRO => {
                ctx.paragraph("Sampling finds hot spots without code changes, at coarser resolution than instrumentation.");
                ctx.note("Some systems need extra permissions for sampling.");
            }
            other => {
                warn!("No terminal content for '{}'", other);
            }
        }
    }
}
