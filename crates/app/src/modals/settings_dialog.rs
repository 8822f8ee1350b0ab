//! Settings dialog: oracle model, persona and API key.
//!
//! The key is held in zeroizing memory while typed and is only shown as
//! masked input. Leaving the key field blank keeps the stored one.

use super::{Modal, ModalResult};
use egui::{Align2, Area, Context, Id, Key, RichText, TextEdit, Vec2};
use shared::settings::AppSettings;
use std::fmt;
use zeroize::Zeroizing;

/// Changes confirmed in the dialog
#[derive(Clone)]
pub struct SettingsUpdate {
    pub model: String,
    pub persona_name: String,
    /// `None` keeps the current key
    pub api_key: Option<Zeroizing<String>>,
    pub clear_key: bool,
}

impl fmt::Debug for SettingsUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsUpdate")
            .field("model", &self.model)
            .field("persona_name", &self.persona_name)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("clear_key", &self.clear_key)
            .finish()
    }
}

impl SettingsUpdate {
    pub fn apply_to(self, settings: &mut AppSettings) {
        let model = self.model.trim();
        if !model.is_empty() {
            settings.oracle.model = model.to_string();
        }
        let persona = self.persona_name.trim();
        if !persona.is_empty() {
            settings.persona_name = persona.to_string();
        }
        if self.clear_key {
            settings.oracle.auth.api_key = None;
        } else if let Some(key) = self.api_key {
            let key = key.trim();
            if !key.is_empty() {
                settings.oracle.auth.api_key = Some(key.to_string());
            }
        }
    }
}

pub struct SettingsDialog {
    is_open: bool,
    model: String,
    persona_name: String,
    /// Securely zeroed on drop
    api_key: Zeroizing<String>,
    has_stored_key: bool,
    clear_key: bool,
    result: ModalResult<SettingsUpdate>,
    id: Id,
}

impl SettingsDialog {
    pub fn new(id: impl std::hash::Hash) -> Self {
        Self {
            is_open: false,
            model: String::new(),
            persona_name: String::new(),
            api_key: Zeroizing::new(String::new()),
            has_stored_key: false,
            clear_key: false,
            result: ModalResult::Pending,
            id: Id::new(id),
        }
    }

    /// Open prefilled from the current settings
    pub fn open_with(&mut self, settings: &AppSettings) {
        self.is_open = true;
        self.model = settings.oracle.model.clone();
        self.persona_name = settings.persona_name.clone();
        self.api_key = Zeroizing::new(String::new());
        self.has_stored_key = settings.oracle.auth.api_key.is_some();
        self.clear_key = false;
        self.result = ModalResult::Pending;
    }

    pub fn take_result(&mut self) -> ModalResult<SettingsUpdate> {
        std::mem::replace(&mut self.result, ModalResult::Pending)
    }

    fn confirm(&mut self) {
        let key = std::mem::take(&mut *self.api_key);
        self.result = ModalResult::Confirmed(SettingsUpdate {
            model: self.model.clone(),
            persona_name: self.persona_name.clone(),
            api_key: (!key.is_empty()).then(|| Zeroizing::new(key)),
            clear_key: self.clear_key,
        });
    }
}

impl Modal for SettingsDialog {
    fn update(&mut self, ctx: &Context) -> bool {
        if !self.is_open {
            return false;
        }

        let mut should_close = false;

        Area::new(self.id.with("overlay"))
            .anchor(Align2::LEFT_TOP, Vec2::ZERO)
            .show(ctx, |ui| {
                let screen_rect = ctx.screen_rect();
                ui.allocate_response(screen_rect.size(), egui::Sense::click());
                ui.painter()
                    .rect_filled(screen_rect, 0.0, egui::Color32::from_black_alpha(180));
            });

        egui::Window::new("⚙ Settings")
            .id(self.id.with("window"))
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                ui.set_min_width(380.0);
                ui.add_space(8.0);

                egui::Grid::new(self.id.with("fields"))
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Model:");
                        ui.add(TextEdit::singleline(&mut self.model).desired_width(220.0));
                        ui.end_row();

                        ui.label("Coach persona:");
                        ui.add(TextEdit::singleline(&mut self.persona_name).desired_width(220.0));
                        ui.end_row();

                        ui.label("Gemini API key:");
                        let hint = if self.has_stored_key {
                            "Stored - leave blank to keep"
                        } else {
                            "Paste key..."
                        };
                        let response = ui.add_enabled(
                            !self.clear_key,
                            TextEdit::singleline(&mut *self.api_key)
                                .password(true)
                                .desired_width(220.0)
                                .hint_text(hint),
                        );
                        if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                            self.confirm();
                            should_close = true;
                        }
                        ui.end_row();
                    });

                if self.has_stored_key {
                    ui.checkbox(&mut self.clear_key, "Forget the stored key");
                }

                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        self.result = ModalResult::Cancelled;
                        should_close = true;
                    }
                    ui.add_space(8.0);
                    if ui.button("Save").clicked() {
                        self.confirm();
                        should_close = true;
                    }
                });

                ui.add_space(8.0);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    ui.label(
                        RichText::new("🔒 GEMINI_API_KEY is used when no key is stored")
                            .small()
                            .weak(),
                    );
                });
            });

        if ctx.input(|i| i.key_pressed(Key::Escape)) {
            self.close();
            return true;
        }

        if should_close {
            self.is_open = false;
            self.api_key = Zeroizing::new(String::new());
        }

        should_close
    }

    fn is_open(&self) -> bool {
        self.is_open
    }

    fn close(&mut self) {
        self.is_open = false;
        self.api_key = Zeroizing::new(String::new());
        self.result = ModalResult::Cancelled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_prefills_without_revealing_key() {
        let mut settings = AppSettings::default();
        settings.oracle.auth.api_key = Some("secret".into());
        let mut dialog = SettingsDialog::new("test");
        dialog.open_with(&settings);

        assert!(dialog.is_open());
        assert_eq!(dialog.model, settings.oracle.model);
        assert!(dialog.api_key.is_empty());
        assert!(dialog.has_stored_key);
    }

    #[test]
    fn test_close_clears_typed_key() {
        let mut dialog = SettingsDialog::new("test");
        dialog.open_with(&AppSettings::default());
        *dialog.api_key = "typed-key".to_string();

        dialog.close();
        assert!(dialog.api_key.is_empty());
        assert!(dialog.take_result().is_cancelled());
    }

    #[test]
    fn test_confirm_moves_key_into_update() {
        let mut dialog = SettingsDialog::new("test");
        dialog.open_with(&AppSettings::default());
        *dialog.api_key = "new-key".to_string();
        dialog.confirm();

        assert!(dialog.api_key.is_empty());
        let update = dialog.take_result().take_value().unwrap();
        let mut settings = AppSettings::default();
        update.apply_to(&mut settings);
        assert_eq!(settings.oracle.auth.api_key.as_deref(), Some("new-key"));
    }

    #[test]
    fn test_debug_output_redacts_key() {
        let update = SettingsUpdate {
            model: "gemini-2.5-flash".into(),
            persona_name: "The Ancient One".into(),
            api_key: Some(Zeroizing::new("sk-very-secret".into())),
            clear_key: false,
        };
        let printed = format!("{:?}", update);
        assert!(!printed.contains("sk-very-secret"));
        assert!(printed.contains("<redacted>"));
        assert!(printed.contains("gemini-2.5-flash"));
        assert!(format!("{:?}", ModalResult::Confirmed(update)).contains("<redacted>"));
    }

    #[test]
    fn test_blank_key_keeps_stored_one() {
        let mut settings = AppSettings::default();
        settings.oracle.auth.api_key = Some("old".into());
        SettingsUpdate {
            model: " gemini-2.5-pro ".into(),
            persona_name: String::new(),
            api_key: None,
            clear_key: false,
        }
        .apply_to(&mut settings);

        assert_eq!(settings.oracle.auth.api_key.as_deref(), Some("old"));
        assert_eq!(settings.oracle.model, "gemini-2.5-pro");
        assert_eq!(settings.persona_name, shared::settings::DEFAULT_PERSONA);
    }

    #[test]
    fn test_clear_key_forgets_stored_one() {
        let mut settings = AppSettings::default();
        settings.oracle.auth.api_key = Some("old".into());
        SettingsUpdate {
            model: String::new(),
            persona_name: String::new(),
            api_key: Some(Zeroizing::new("ignored".into())),
            clear_key: true,
        }
        .apply_to(&mut settings);
        assert!(settings.oracle.auth.api_key.is_none());
    }
}
