use super::{UiAction, TEXT_DIM};
use crate::magic_circle::{MagicCircle, AMBER, EMBER};
use egui::{RichText, Ui};
use shared::View;

pub(super) fn draw(ui: &mut Ui, actions: &mut Vec<UiAction>) {
    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        let size = ui.available_height().min(ui.available_width()).clamp(160.0, 400.0) * 0.8;
        ui.add(MagicCircle::new(size));
        ui.add_space(16.0);

        ui.label(
            RichText::new("InnoAgent: Doctor Strange")
                .size(44.0)
                .strong()
                .color(AMBER),
        );
        ui.add_space(8.0);
        ui.label(
            RichText::new(
                "\"I have seen 14,000,605 possible futures. Only in this one does your project change the world.\"",
            )
            .size(18.0)
            .italics()
            .color(TEXT_DIM),
        );
        ui.add_space(24.0);

        ui.horizontal(|ui| {
            // Centre the two buttons
            let width = 360.0;
            ui.add_space(((ui.available_width() - width) / 2.0).max(0.0));
            let start = egui::Button::new(RichText::new("➕ Start a new project").strong())
                .fill(EMBER)
                .rounding(20.0)
                .min_size(egui::vec2(170.0, 40.0));
            if ui.add(start).clicked() {
                actions.push(UiAction::Navigate(View::ProjectCreation));
            }
            ui.add_space(12.0);
            let archive = egui::Button::new("🗄 Sanctum archive")
                .rounding(20.0)
                .min_size(egui::vec2(170.0, 40.0));
            if ui.add(archive).clicked() {
                actions.push(UiAction::Navigate(View::Dashboard));
            }
        });
    });
}
