use super::{section_frame, UiAction, PANEL, TEXT_DIM};
use crate::magic_circle::AMBER;
use egui::{Color32, RichText, Sense, Ui};
use shared::{Project, View};

const CARD_WIDTH: f32 = 300.0;
const CARD_HEIGHT: f32 = 190.0;
/// Roughly two lines of card text
const DESCRIPTION_CHARS: usize = 90;

pub(super) fn draw(ui: &mut Ui, projects: &[Project], actions: &mut Vec<UiAction>) {
    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.add_space(24.0);
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(RichText::new("Sanctum Archive").size(28.0).strong());
                ui.label(RichText::new("Every reality you are watching over").color(TEXT_DIM));
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button(RichText::new("➕ Add a reality branch").color(AMBER))
                    .clicked()
                {
                    actions.push(UiAction::Navigate(View::ProjectCreation));
                }
            });
        });
        ui.add_space(24.0);

        if projects.is_empty() {
            section_frame().show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.label(
                        RichText::new(
                            "No active project dimensions yet. Choose \"Start a new project\" to summon one.",
                        )
                        .color(TEXT_DIM),
                    );
                    ui.add_space(40.0);
                });
            });
            return;
        }

        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing = egui::vec2(16.0, 16.0);
            for project in projects {
                if card(ui, project).clicked() {
                    actions.push(UiAction::SelectProject(project.id));
                }
            }
        });
    });
}

fn card(ui: &mut Ui, project: &Project) -> egui::Response {
    let inner = ui.allocate_ui(egui::vec2(CARD_WIDTH, CARD_HEIGHT), |ui| {
        egui::Frame::none()
            .fill(PANEL)
            .rounding(10.0)
            .inner_margin(16.0)
            .stroke(egui::Stroke::new(1.0, Color32::from_white_alpha(12)))
            .show(ui, |ui| {
                ui.set_min_size(egui::vec2(CARD_WIDTH - 32.0, CARD_HEIGHT - 32.0));
                ui.horizontal(|ui| {
                    ui.label(RichText::new("🧭").size(20.0).color(AMBER));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(project.status.as_str().to_uppercase())
                                .small()
                                .color(AMBER),
                        );
                    });
                });
                ui.add_space(8.0);
                ui.label(RichText::new(&project.name).size(18.0).strong());
                ui.label(
                    RichText::new(clip(&project.description, DESCRIPTION_CHARS))
                        .small()
                        .color(TEXT_DIM),
                );
                ui.add_space(8.0);
                ui.separator();
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!("Industry: {}", project.industry))
                            .small()
                            .weak(),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(format!("Last observed: {}", project.observed_on()))
                                .small()
                                .weak(),
                        );
                    });
                });
            })
            .response
    });
    inner
        .inner
        .interact(Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand)
}

/// Shorten `text` to at most `max` chars, ending in an ellipsis when cut
fn clip(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_leaves_short_text() {
        assert_eq!(clip("portal power", 90), "portal power");
    }

    #[test]
    fn test_clip_counts_chars_not_bytes() {
        let text = "维度穿梭能源系统".repeat(20);
        let clipped = clip(&text, 10);
        assert_eq!(clipped.chars().count(), 10);
        assert!(clipped.ends_with('…'));
    }
}
