use super::{back_button, section_frame, MirrorModel, UiAction, MIRROR_BLUE, TEXT_DIM};
use crate::magic_circle::{CircleStyle, MagicCircle};
use egui::{Color32, RichText, Ui};
use shared::View;

pub(super) fn draw(ui: &mut Ui, model: &MirrorModel<'_>, actions: &mut Vec<UiAction>) {
    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.add_space(24.0);
        ui.horizontal(|ui| {
            if back_button(ui, "Back to the sanctum") {
                actions.push(UiAction::Navigate(View::Sanctum));
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    RichText::new("Mirror Dimension: realm of inspiration")
                        .size(28.0)
                        .strong()
                        .color(MIRROR_BLUE),
                );
            });
        });
        ui.add_space(24.0);

        for (i, idea) in model.ideas.iter().enumerate() {
            idea_card(ui, i + 1, idea);
            ui.add_space(16.0);
        }

        section_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new(
                        "\"In the Mirror Dimension every idea refracts into a thousand forms.\"",
                    )
                    .italics()
                    .color(TEXT_DIM),
                );
                ui.add_space(12.0);
                let refract = ui.add_enabled(
                    !model.brainstorming,
                    egui::Button::new(RichText::new("Refract again").color(MIRROR_BLUE))
                        .rounding(16.0),
                );
                if model.brainstorming {
                    ui.spinner();
                }
                if refract.clicked() {
                    actions.push(UiAction::Brainstorm);
                }
            });
        });
    });
}

fn idea_card(ui: &mut Ui, number: usize, idea: &str) {
    egui::Frame::none()
        .fill(Color32::from_rgb(0x17, 0x1a, 0x33))
        .stroke(egui::Stroke::new(1.0, MIRROR_BLUE.gamma_multiply(0.2)))
        .rounding(16.0)
        .inner_margin(20.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(format!("#{}", number))
                        .size(32.0)
                        .color(MIRROR_BLUE.gamma_multiply(0.3)),
                );
                ui.add_space(12.0);
                ui.add(egui::Label::new(RichText::new(idea).size(17.0)).wrap(true));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    ui.add(MagicCircle::new(64.0).style(CircleStyle::faded(0.1)));
                });
            });
        });
}
