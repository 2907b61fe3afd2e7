use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::Mutex;

use crate::click_loop::{ClickProgress, StatusReporter};
use crate::monitor::{PointerObserver, PointerPosition};

/// Text shown by the UI but written from other threads.
///
/// Writers set the text and poke the egui context (once one is attached) so
/// the window repaints without polling.
#[derive(Clone, Default)]
pub struct Label {
    text: Arc<Mutex<String>>,
    repaint: Arc<OnceCell<egui::Context>>,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Arc::new(Mutex::new(text.into())),
            repaint: Arc::new(OnceCell::new()),
        }
    }

    /// Later calls are ignored.
    pub fn attach(&self, ctx: &egui::Context) {
        let _ = self.repaint.set(ctx.clone());
    }

    pub fn set(&self, text: impl Into<String>) {
        *self.text.lock() = text.into();
        if let Some(ctx) = self.repaint.get() {
            ctx.request_repaint();
        }
    }

    pub fn get(&self) -> String { self.text.lock().clone() }
}

impl StatusReporter for Label {
    fn report(&self, progress: ClickProgress) {
        self.set(progress.to_string());
    }
}

impl PointerObserver for Label {
    fn on_pointer_move(&self, pos: PointerPosition) {
        self.set(pos.to_string());
    }
}

/// Everything the window and the background threads share.
#[derive(Clone)]
pub struct AppContext {
    pub status: Label,
    pub mouse_pos: Label,
}

impl Default for AppContext {
    fn default() -> Self {
        Self {
            status: Label::new("Clicks: 0"),
            mouse_pos: Label::new(""),
        }
    }
}

impl AppContext {
    pub fn attach(&self, ctx: &egui::Context) {
        self.status.attach(ctx);
        self.mouse_pos.attach(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_defaults() {
        let ctx = AppContext::default();
        assert_eq!(ctx.status.get(), "Clicks: 0");
        assert_eq!(ctx.mouse_pos.get(), "");
    }

    #[test]
    fn test_report_renders_progress() {
        let label = Label::new("Clicks: 0");
        label.report(ClickProgress { total: 3, remaining: 1 });
        assert_eq!(label.get(), "Clicks: 3 (Remaining: 1)");
    }

    #[test]
    fn test_clones_share_text() {
        let label = Label::new("");
        let writer = label.clone();
        writer.on_pointer_move(PointerPosition { x: 5, y: -6 });
        assert_eq!(label.get(), "Mouse Pos: (5, -6)");
    }

    #[test]
    fn test_set_after_attach() {
        let label = Label::new("");
        let ctx = egui::Context::default();
        label.attach(&ctx);
        label.attach(&ctx);
        label.set("Clicks: 1 (Remaining: 0)");
        assert_eq!(label.get(), "Clicks: 1 (Remaining: 0)");
    }
}
