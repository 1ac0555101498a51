//! Which skin is showing and which modal is open.

use domain::InterfaceMode;
use serde::Serialize;

pub const THEMES: [&str; 6] = ["default", "cozy", "futuristic", "city", "candy", "nightmare"];
pub const CLASSIC_THEMES: [&str; 3] = ["Netscape", "AOL", "Angelfire"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpinOffTarget {
    pub post_id: String,
    pub comment_id: String,
}

/// What a close action dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closed {
    SpinOff,
    Reader,
    Nothing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostModal {
    /// Set when editing an existing post.
    pub editing: Option<String>,
}

/// Reader plus at most one spin-off on top of it. Opening a spin-off while
/// one is showing replaces it.
#[derive(Debug, Clone, Default)]
pub struct Navigation {
    pub mode: InterfaceMode,
    theme: usize,
    classic_theme: usize,
    reader: Option<String>,
    spin_off: Option<SpinOffTarget>,
    post_modal: Option<PostModal>,
}

impl Navigation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-selecting Classic while in Classic cycles its theme instead.
    pub fn change_mode(&mut self, mode: InterfaceMode) {
        if mode == InterfaceMode::Classic && self.mode == InterfaceMode::Classic {
            self.classic_theme = (self.classic_theme + 1) % CLASSIC_THEMES.len();
        } else {
            self.mode = mode;
        }
    }

    pub fn cycle_theme(&mut self) {
        self.theme = (self.theme + 1) % THEMES.len();
    }

    pub fn theme(&self) -> &'static str {
        THEMES[self.theme]
    }

    pub fn classic_theme(&self) -> &'static str {
        CLASSIC_THEMES[self.classic_theme]
    }

    pub fn open_reader(&mut self, key: impl Into<String>) {
        self.reader = Some(key.into());
    }

    pub fn open_spin_off(&mut self, post_id: impl Into<String>, comment_id: impl Into<String>) {
        self.spin_off = Some(SpinOffTarget {
            post_id: post_id.into(),
            comment_id: comment_id.into(),
        });
    }

    pub fn close_spin_off(&mut self) -> Closed {
        if self.spin_off.take().is_some() {
            Closed::SpinOff
        } else if self.reader.take().is_some() {
            Closed::Reader
        } else {
            Closed::Nothing
        }
    }

    pub fn reader(&self) -> Option<&str> {
        self.reader.as_deref()
    }

    pub fn spin_off(&self) -> Option<&SpinOffTarget> {
        self.spin_off.as_ref()
    }

    pub fn is_reader_open(&self) -> bool {
        self.reader.is_some() || self.spin_off.is_some()
    }

    pub fn open_post_modal(&mut self, editing: Option<String>) {
        self.post_modal = Some(PostModal { editing });
    }

    pub fn close_post_modal(&mut self) -> Option<PostModal> {
        self.post_modal.take()
    }

    pub fn post_modal(&self) -> Option<&PostModal> {
        self.post_modal.as_ref()
    }
}
