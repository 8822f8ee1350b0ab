use eframe::egui;
use modals::{Modal, SettingsDialog};
use parking_lot::Mutex;
use providers::AiGateway;
use session::SessionController;
use shared::settings::AppSettings;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use views::{ScreenModel, UiAction, ViewState};

mod config;
mod magic_circle;
mod modals;
mod session;
mod state;
mod types;
mod utils;
mod views;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let (settings, fresh) = config::load_settings_or_default();
    if fresh {
        if let Err(e) = config::save_settings(&settings) {
            tracing::warn!(error = %e, "could not write default settings");
        }
    }
    let gateway = config::build_gateway(&settings)?;
    tracing::info!(model = gateway.model(), "starting InnoAgent");

    let state = AppState::new(settings, gateway);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        vsync: true,
        ..Default::default()
    };
    eframe::run_native(
        "InnoAgent",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(theme());
            Box::new(InnoAgentApp {
                state: Arc::new(Mutex::new(state)),
            })
        }),
    )
    .map_err(|e| anyhow::anyhow!("window failed: {}", e))
}

struct AppState {
    session: SessionController,
    settings: AppSettings,
    views: ViewState,
    settings_dialog: SettingsDialog,
}

impl AppState {
    fn new(settings: AppSettings, gateway: Arc<AiGateway>) -> Self {
        Self {
            session: SessionController::new(gateway),
            settings,
            views: ViewState::default(),
            settings_dialog: SettingsDialog::new("settings_dialog"),
        }
    }

    fn frame(&mut self, ctx: &egui::Context) {
        // Apply finished oracle requests (non-blocking)
        self.session.poll_completions();
        if self.session.any_pending() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        let mut actions: Vec<UiAction> = Vec::new();
        {
            let session = &self.session;
            let model = ScreenModel::derive(session);

            egui::TopBottomPanel::top("nav")
                .frame(
                    egui::Frame::none()
                        .fill(views::BACKGROUND)
                        .inner_margin(egui::Margin::symmetric(24.0, 16.0)),
                )
                .show(ctx, |ui| {
                    views::draw_nav_bar(ui, model.view(), session.model(), &mut actions);
                });

            egui::CentralPanel::default()
                .frame(egui::Frame::none().fill(views::BACKGROUND).inner_margin(16.0))
                .show(ctx, |ui| {
                    views::draw_failures(ui, session, &mut actions);
                    actions.extend(views::draw_screen(ui, &model, &mut self.views));
                });

            views::draw_notice(ctx, session.notice(), &mut actions);
        }

        if self.settings_dialog.is_open() && self.settings_dialog.update(ctx) {
            self.finish_settings();
        }

        for action in actions {
            if !views::apply(&mut self.session, action) {
                self.settings_dialog.open_with(&self.settings);
            }
        }
    }

    fn finish_settings(&mut self) {
        let result = self.settings_dialog.take_result();
        if result.is_cancelled() {
            return;
        }
        let Some(update) = result.take_value() else {
            return;
        };
        update.apply_to(&mut self.settings);
        if let Err(e) = config::save_settings(&self.settings) {
            tracing::warn!(error = %e, "could not save settings");
        }
        match config::build_gateway(&self.settings) {
            Ok(gateway) => {
                tracing::info!(model = gateway.model(), "oracle settings updated");
                self.session.set_gateway(gateway);
            }
            Err(e) => tracing::error!(error = %e, "keeping previous oracle"),
        }
    }
}

struct InnoAgentApp {
    state: Arc<Mutex<AppState>>,
}

impl eframe::App for InnoAgentApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.lock().frame(ctx);
    }
}

/// Dark sanctum palette with amber accents
fn theme() -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = views::BACKGROUND;
    visuals.window_fill = views::PANEL;
    visuals.extreme_bg_color = egui::Color32::from_rgb(0x05, 0x05, 0x08);
    visuals.selection.bg_fill = magic_circle::EMBER.gamma_multiply(0.6);
    visuals.selection.stroke = egui::Stroke::new(1.0, magic_circle::AMBER);
    visuals.hyperlink_color = magic_circle::AMBER;
    visuals
}

#[cfg(test)]
mod tests {
    use super::*;
    use providers::testing::ScriptedOracle;
    use shared::View;

    fn state() -> AppState {
        let gateway = Arc::new(AiGateway::new(ScriptedOracle::new(vec![])));
        AppState::new(AppSettings::default(), gateway)
    }

    #[test]
    fn test_frame_runs_headless() {
        let mut s = state();
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| s.frame(ctx));
        assert_eq!(s.session.view(), View::Home);
        assert!(!s.settings_dialog.is_open());
    }

    #[test]
    fn test_theme_is_dark() {
        assert!(theme().dark_mode);
    }
}
