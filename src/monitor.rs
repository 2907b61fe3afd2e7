//! System-wide pointer tracking for the "Mouse Pos" label.
//!
//! The listener never grabs events, so every move still reaches the rest of
//! the system no matter what the observer does.

use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

impl fmt::Display for PointerPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mouse Pos: ({}, {})", self.x, self.y)
    }
}

/// Called inline from the OS hook. Must return quickly and never sleep.
pub trait PointerObserver {
    fn on_pointer_move(&self, pos: PointerPosition);
}

/// Gate between the raw listener and the observer. Once deactivated every
/// event is dropped on the floor.
struct Dispatch<O> {
    active: Arc<AtomicBool>,
    observer: O,
}

impl<O: PointerObserver> Dispatch<O> {
    fn pointer_moved(&self, pos: PointerPosition) {
        if self.active.load(Ordering::Relaxed) {
            self.observer.on_pointer_move(pos);
        }
    }

    #[cfg(feature = "hooks")]
    fn handle(&self, event: &rdev::EventType) {
        if let Some(pos) = pointer_move(event) {
            self.pointer_moved(pos);
        }
    }
}

#[cfg(feature = "hooks")]
fn pointer_move(event: &rdev::EventType) -> Option<PointerPosition> {
    match *event {
        rdev::EventType::MouseMove { x, y } => Some(PointerPosition { x: x.round() as i32, y: y.round() as i32 }),
        _ => None,
    }
}

pub struct MousePositionMonitor {
    active: Arc<AtomicBool>,
    // rdev::listen blocks forever; the thread is only released at process exit.
    #[allow(dead_code)]
    thread: Option<thread::JoinHandle<()>>,
}

impl MousePositionMonitor {
    /// Registers the global listener on its own thread.
    pub fn start<O>(observer: O) -> Self
    where
        O: PointerObserver + Send + 'static,
    {
        let active = Arc::new(AtomicBool::new(true));
        let dispatch = Dispatch { active: Arc::clone(&active), observer };
        let thread = Self::spawn_listener(dispatch);
        Self { active, thread }
    }

    #[cfg(feature = "hooks")]
    fn spawn_listener<O>(dispatch: Dispatch<O>) -> Option<thread::JoinHandle<()>>
    where
        O: PointerObserver + Send + 'static,
    {
        let spawned = thread::Builder::new()
            .name("mouse-monitor".into())
            .spawn(move || {
                log::info!("Mouse position monitor started");
                if let Err(error) = rdev::listen(move |event| dispatch.handle(&event.event_type)) {
                    log::error!("Failed to start mouse position listener: {:?}", error);
                }
            });
        match spawned {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::error!("Failed to spawn mouse monitor thread: {e}");
                None
            }
        }
    }

    #[cfg(not(feature = "hooks"))]
    fn spawn_listener<O>(_dispatch: Dispatch<O>) -> Option<thread::JoinHandle<()>>
    where
        O: PointerObserver + Send + 'static,
    {
        log::warn!("Built without the `hooks` feature; mouse position will not update");
        None
    }

    /// Stops forwarding events. Safe to call more than once.
    pub fn stop(&self) {
        if self.active.swap(false, Ordering::Relaxed) {
            log::info!("Mouse position monitor stopped");
        }
    }
}

impl Drop for MousePositionMonitor {
    fn drop(&mut self) { self.stop(); }
}
