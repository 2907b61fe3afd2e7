use std::{fmt, thread, time::Duration};

use crate::device::EnigoDevice;

// -------------- Data --------------

/// One Start press worth of parameters, fixed for the whole run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClickRequest {
    pub total_clicks: i32,
    pub interval_millis: i32,
    pub target_x: i32,
    pub target_y: i32,
}

impl ClickRequest {
    fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_millis.max(0) as u64)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClickProgress {
    pub total: i32,
    pub remaining: i32,
}

impl fmt::Display for ClickProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Clicks: {} (Remaining: {})", self.total, self.remaining)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CursorSnapshot {
    pub x: i32,
    pub y: i32,
}

// -------------- Seams --------------

pub trait CursorPositioner {
    fn position(&self) -> CursorSnapshot;
    fn move_to(&mut self, x: i32, y: i32);
}

/// Primary button press + release at the current cursor position.
pub trait InputInjector {
    fn click(&mut self);
}

/// Receives progress from the loop thread. Must not fail loudly if the UI
/// has already gone away.
pub trait StatusReporter {
    fn report(&self, progress: ClickProgress);
}

// -------------- Loop --------------

/// Runs one request to completion: park the cursor on the target, click
/// `total_clicks` times, put the cursor back, report the final state.
///
/// Reports `total_clicks + 1` times. The last per-click report and the
/// closing report both carry `remaining == 0`.
pub fn run<D, R>(request: ClickRequest, device: &mut D, reporter: &R)
where
    D: CursorPositioner + InputInjector + ?Sized,
    R: StatusReporter + ?Sized,
{
    let total = request.total_clicks;
    let mut remaining = total;

    let snapshot = device.position();
    device.move_to(request.target_x, request.target_y);

    let interval = request.interval();
    for _ in 0..total {
        remaining -= 1;
        let progress = ClickProgress { total, remaining };
        log::debug!("{progress}");
        reporter.report(progress);
        device.click();
        if !interval.is_zero() {
            thread::sleep(interval);
        }
    }

    device.move_to(snapshot.x, snapshot.y);
    reporter.report(ClickProgress { total, remaining: 0 });
}

// -------------- Job --------------

/// A click run on its own thread. Kept by the UI so a second Start can be
/// turned away while this one is still going.
pub struct ClickJob {
    request: ClickRequest,
    handle: thread::JoinHandle<()>,
}

impl ClickJob {
    pub fn spawn<R>(request: ClickRequest, reporter: R) -> std::io::Result<Self>
    where
        R: StatusReporter + Send + 'static,
    {
        Self::spawn_with(request, EnigoDevice, reporter)
    }

    pub fn spawn_with<D, R>(request: ClickRequest, mut device: D, reporter: R) -> std::io::Result<Self>
    where
        D: CursorPositioner + InputInjector + Send + 'static,
        R: StatusReporter + Send + 'static,
    {
        log::info!("Starting click run: {request:?}");
        let handle = thread::Builder::new()
            .name("click-loop".into())
            .spawn(move || {
                run(request, &mut device, &reporter);
                log::info!("Click run finished ({} clicks)", request.total_clicks.max(0));
            })?;
        Ok(Self { request, handle })
    }

    pub fn request(&self) -> &ClickRequest { &self.request }

    pub fn is_finished(&self) -> bool { self.handle.is_finished() }

    pub fn join(self) {
        if self.handle.join().is_err() {
            log::error!("Click loop thread panicked");
        }
    }
}
