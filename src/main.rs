#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod click_loop;
mod config;
mod device;
mod fields;
mod monitor;
mod status;

use clap::Parser;
use eframe::egui;

use app::AppState;
use config::Settings;
use monitor::MousePositionMonitor;
use status::AppContext;

fn main() -> eframe::Result<()> {
    let settings = Settings::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(settings.log_filter()))
        .format_timestamp_millis()
        .init();

    let context = AppContext::default();
    let monitor = MousePositionMonitor::start(context.mouse_pos.clone());

    let mut opts = eframe::NativeOptions::default();
    opts.viewport.inner_size = Some(egui::vec2(400.0, 300.0));
    opts.viewport.resizable = Some(false);

    log::info!("Starting Auto Clicker");
    let result = eframe::run_native(
        "Auto Clicker",
        opts,
        Box::new(move |cc| {
            context.attach(&cc.egui_ctx);
            Box::new(AppState::new(context, &settings))
        }),
    );

    monitor.stop();
    result
}
