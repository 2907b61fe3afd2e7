use eframe::egui;
use thiserror::Error;

use crate::click_loop::{ClickJob, ClickRequest};
use crate::config::Settings;
use crate::fields::{ClickForm, ParseError};
use crate::status::{AppContext, Label};

#[derive(Error, Debug)]
pub enum StartError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("A click run is already in progress")]
    Busy,
    #[error("Failed to start click thread: {0}")]
    Spawn(#[from] std::io::Error),
}

// -------------- UI State --------------
pub struct AppState {
    context: AppContext,
    form: ClickForm,
    job: Option<ClickJob>,
    error: Option<String>,
}

impl AppState {
    pub fn new(context: AppContext, settings: &Settings) -> Self {
        Self {
            context,
            form: settings.form(),
            job: None,
            error: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.job.as_ref().is_some_and(|job| !job.is_finished())
    }

    fn start(&mut self) {
        let message = match self.start_with(ClickJob::spawn) {
            Ok(()) => return,
            Err(StartError::Parse(e)) => {
                log::warn!("{e}: {:?}", e.input);
                e.to_string()
            }
            Err(e) => {
                log::warn!("Start rejected: {e}");
                e.to_string()
            }
        };
        self.error = Some(message);
    }

    /// Parses the form and launches a job unless one is still running.
    /// Nothing changes when this returns an error.
    fn start_with<F>(&mut self, spawn: F) -> Result<(), StartError>
    where
        F: FnOnce(ClickRequest, Label) -> std::io::Result<ClickJob>,
    {
        if self.is_running() {
            log::debug!("Still running: {:?}", self.job.as_ref().map(ClickJob::request));
            return Err(StartError::Busy);
        }
        let request = self.form.to_request()?;
        if let Some(done) = self.job.take() {
            done.join();
        }
        self.job = Some(spawn(request, self.context.status.clone())?);
        Ok(())
    }

    fn error_modal(&mut self, ctx: &egui::Context) {
        let Some(message) = self.error.clone() else { return };
        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                if ui.button("OK").clicked() {
                    self.error = None;
                }
            });
    }
}

fn field(ui: &mut egui::Ui, label: &str, text: &mut String) {
    ui.label(label);
    ui.add(egui::TextEdit::singleline(text).desired_width(100.0));
    ui.end_row();
}

impl eframe::App for AppState {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let modal_open = self.error.is_some();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label(self.context.status.get());
            ui.add_space(10.0);

            ui.add_enabled_ui(!modal_open, |ui| {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.set_width(150.0);
                        ui.add_space(90.0);
                        ui.label(self.context.mouse_pos.get());
                    });

                    ui.vertical(|ui| {
                        egui::Grid::new("click_form").num_columns(2).spacing([10.0, 8.0]).show(ui, |ui| {
                            field(ui, "Total Clicks:", &mut self.form.clicks);
                            field(ui, "Interval (ms):", &mut self.form.interval);
                            field(ui, "X Coord:", &mut self.form.x);
                            field(ui, "Y Coord:", &mut self.form.y);
                        });
                        ui.add_space(10.0);
                        if ui.add_sized([100.0, 30.0], egui::Button::new("Start")).clicked() {
                            self.start();
                        }
                    });
                });
            });
        });

        self.error_modal(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::click_loop::tests::{FakeDevice, Reports};
    use crate::fields::Field;

    fn app(clicks: &str, interval: &str) -> AppState {
        let settings = Settings {
            clicks: Some(clicks.into()),
            interval: Some(interval.into()),
            x: Some("500".into()),
            y: Some("500".into()),
            verbose: false,
        };
        AppState::new(AppContext::default(), &settings)
    }

    #[test]
    fn test_app_state_defaults() {
        let state = AppState::new(AppContext::default(), &Settings::default());
        assert!(state.job.is_none());
        assert!(state.error.is_none());
        assert!(!state.is_running());
        assert_eq!(state.form, ClickForm::default());
    }

    #[test]
    fn test_bad_clicks_launches_nothing() {
        let mut state = app("abc", "10");
        let dev = FakeDevice::default();
        let spawn_dev = dev.clone();

        let err = state
            .start_with(|req, label| ClickJob::spawn_with(req, spawn_dev, label))
            .unwrap_err();

        assert!(matches!(err, StartError::Parse(ParseError { field: Field::Clicks, .. })));
        assert_eq!(err.to_string(), "Invalid number of clicks");
        assert!(state.job.is_none());
        assert_eq!(dev.clicks(), 0);
        assert_eq!(state.context.status.get(), "Clicks: 0");
    }

    #[test]
    fn test_start_reports_to_status_label() {
        let mut state = app("2", "0");
        let dev = FakeDevice::at(1, 2);
        let spawn_dev = dev.clone();

        state
            .start_with(|req, label| ClickJob::spawn_with(req, spawn_dev, label))
            .unwrap();
        state.job.take().unwrap().join();

        assert_eq!(dev.clicks(), 2);
        assert_eq!(state.context.status.get(), "Clicks: 2 (Remaining: 0)");
    }

    #[test]
    fn test_overlapping_start_is_rejected() {
        let mut state = app("3", "100");
        let first = Reports::default();
        let dev = FakeDevice::default();

        let (d, r) = (dev.clone(), first.clone());
        state.start_with(|req, _| ClickJob::spawn_with(req, d, r)).unwrap();
        assert!(state.is_running());

        let second = Reports::default();
        let (d, r) = (dev.clone(), second.clone());
        let err = state.start_with(|req, _| ClickJob::spawn_with(req, d, r)).unwrap_err();
        assert!(matches!(err, StartError::Busy));

        state.job.take().unwrap().join();
        assert_eq!(dev.clicks(), 3);
        assert_eq!(first.pairs(), vec![(3, 2), (3, 1), (3, 0), (3, 0)]);
        assert!(second.pairs().is_empty());
    }

    #[test]
    fn test_restart_after_finish() {
        let mut state = app("1", "0");
        let dev = FakeDevice::default();

        let d = dev.clone();
        state.start_with(|req, label| ClickJob::spawn_with(req, d, label)).unwrap();
        while state.is_running() {
            std::thread::sleep(std::time::Duration::from_millis(5));
        }

        let d = dev.clone();
        state.start_with(|req, label| ClickJob::spawn_with(req, d, label)).unwrap();
        state.job.take().unwrap().join();
        assert_eq!(dev.clicks(), 2);
    }
}
