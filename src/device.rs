use enigo::{self, MouseButton, MouseControllable};
use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::click_loop::{CursorPositioner, CursorSnapshot, InputInjector};

static ENIGO: Lazy<Mutex<enigo::Enigo>> = Lazy::new(|| Mutex::new(enigo::Enigo::new()));

/// Real cursor and button backed by the process-wide enigo handle.
///
/// The handle is locked per call, never across a whole run.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnigoDevice;

impl CursorPositioner for EnigoDevice {
    fn position(&self) -> CursorSnapshot {
        let (x, y) = ENIGO.lock().mouse_location();
        CursorSnapshot { x, y }
    }

    fn move_to(&mut self, x: i32, y: i32) {
        ENIGO.lock().mouse_move_to(x, y);
    }
}

impl InputInjector for EnigoDevice {
    fn click(&mut self) {
        // press + release
        ENIGO.lock().mouse_click(MouseButton::Left);
    }
}
