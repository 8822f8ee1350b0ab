use super::{back_button, section_frame, UiAction, TEXT_DIM};
use crate::magic_circle::{AMBER, EMBER};
use egui::{RichText, TextEdit, Ui};
use shared::{ProjectDraft, ValidationError, View};

/// The three-field project form
#[derive(Debug, Default)]
pub struct ProjectForm {
    pub name: String,
    pub industry: String,
    pub description: String,
    error: Option<ValidationError>,
}

impl ProjectForm {
    /// Validate the fields. On success the form is cleared.
    pub fn submit(&mut self) -> Option<ProjectDraft> {
        match ProjectDraft::new(&self.name, &self.industry, &self.description) {
            Ok(draft) => {
                *self = Self::default();
                Some(draft)
            }
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }

    /// Inline error for `field`, if that field failed validation
    pub fn field_error(&self, field: &str) -> Option<String> {
        match &self.error {
            Some(e @ ValidationError::MissingField { field: f }) if *f == field => {
                Some(e.to_string())
            }
            _ => None,
        }
    }
}

pub(super) fn draw(ui: &mut Ui, form: &mut ProjectForm, actions: &mut Vec<UiAction>) {
    ui.vertical_centered(|ui| {
        ui.set_max_width(560.0);
        ui.add_space(24.0);
        ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
            if back_button(ui, "Back to home") {
                actions.push(UiAction::Navigate(View::Home));
            }
            ui.add_space(16.0);

            section_frame().show(ui, |ui| {
                ui.label(
                    RichText::new("✨ Describe your reality")
                        .size(24.0)
                        .strong()
                        .color(AMBER),
                );
                ui.add_space(12.0);

                field(ui, form, "name", "Project name", "e.g. Inter-dimensional energy grid");
                field(ui, form, "industry", "Industry", "e.g. Clean energy");

                ui.label(RichText::new("Core description").color(TEXT_DIM));
                ui.add(
                    TextEdit::multiline(&mut form.description)
                        .desired_rows(4)
                        .desired_width(f32::INFINITY)
                        .hint_text("Describe what makes it new..."),
                );
                inline_error(ui, form.field_error("description"));
                ui.add_space(16.0);

                let summon = egui::Button::new(RichText::new("Summon project").strong())
                    .fill(EMBER)
                    .min_size(egui::vec2(ui.available_width(), 36.0));
                if ui.add(summon).clicked() {
                    if let Some(draft) = form.submit() {
                        actions.push(UiAction::CreateProject(draft));
                    }
                }
            });
        });
    });
}

fn field(ui: &mut Ui, form: &mut ProjectForm, key: &str, label: &str, hint: &str) {
    ui.label(RichText::new(label).color(TEXT_DIM));
    let error = form.field_error(key);
    let value = match key {
        "name" => &mut form.name,
        _ => &mut form.industry,
    };
    ui.add(
        TextEdit::singleline(value)
            .desired_width(f32::INFINITY)
            .hint_text(hint),
    );
    inline_error(ui, error);
    ui.add_space(8.0);
}

fn inline_error(ui: &mut Ui, error: Option<String>) {
    if let Some(msg) = error {
        ui.colored_label(EMBER, msg);
    }
}
