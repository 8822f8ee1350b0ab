use super::{SanctumModel, UiAction, PANEL, TEXT_DIM};
use crate::magic_circle::{CircleStyle, MagicCircle, AMBER, EMBER};
use egui::{Align, Color32, Key, Layout, RichText, TextEdit, Ui};
use shared::agent_api::ChatMessage;
use shared::Feedback;

const STRENGTH: Color32 = Color32::from_rgb(0x4a, 0xde, 0x80);
const THREAT: Color32 = Color32::from_rgb(0xf8, 0x71, 0x71);
const ADVICE: Color32 = Color32::from_rgb(0x60, 0xa5, 0xfa);

pub(super) fn draw(
    ui: &mut Ui,
    model: &SanctumModel<'_>,
    input: &mut String,
    actions: &mut Vec<UiAction>,
) {
    egui::SidePanel::left("sanctum_sidebar")
        .resizable(false)
        .exact_width(300.0)
        .show_inside(ui, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| sidebar(ui, model, actions));
        });

    egui::TopBottomPanel::bottom("sanctum_input")
        .show_inside(ui, |ui| chat_input(ui, model, input, actions));

    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(PANEL).inner_margin(16.0))
        .show_inside(ui, |ui| transcript(ui, model));
}

fn sidebar(ui: &mut Ui, model: &SanctumModel<'_>, actions: &mut Vec<UiAction>) {
    ui.add_space(8.0);
    ui.label(RichText::new("👁 Project observation").size(18.0).strong().color(AMBER));
    ui.add_space(8.0);
    ui.label(RichText::new("CURRENT FOCUS").small().color(TEXT_DIM));
    ui.label(RichText::new(&model.project.name).strong());
    ui.add_space(8.0);

    ui.label(RichText::new("KEY INDEX").small().color(TEXT_DIM));
    ui.add(
        egui::ProgressBar::new(f32::from(model.reality_index()) / 100.0)
            .fill(EMBER)
            .desired_height(8.0),
    );
    ui.with_layout(Layout::right_to_left(Align::Min), |ui| {
        ui.label(RichText::new(model.reality_label()).small().color(AMBER));
    });
    ui.add_space(8.0);

    let analyze = ui.add_enabled(
        !model.analyzing,
        egui::Button::new(RichText::new("⚡ Analyse project").color(AMBER))
            .min_size(egui::vec2(ui.available_width(), 32.0)),
    );
    if model.analyzing {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(RichText::new("Consulting the Time Stone...").small().weak());
        });
    }
    if analyze.clicked() {
        actions.push(UiAction::RequestFeedback);
    }

    if let Some(record) = model.feedback {
        ui.add_space(12.0);
        ui.separator();
        if model.feedback_is_foreign() {
            ui.label(
                RichText::new("This reading was taken for another project.")
                    .small()
                    .italics()
                    .weak(),
            );
        }
        analysis(ui, &record.feedback);
    }
}

fn analysis(ui: &mut Ui, feedback: &Feedback) {
    bullet_list(ui, "Strengths (the light side)", STRENGTH, &feedback.strengths);
    bullet_list(ui, "Threats (multiverse variables)", THREAT, &feedback.threats);

    if let Some(advice) = feedback.top_recommendation() {
        egui::Frame::none()
            .fill(ADVICE.gamma_multiply(0.1))
            .stroke(egui::Stroke::new(1.0, ADVICE.gamma_multiply(0.3)))
            .rounding(8.0)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new("Supreme counsel").strong().color(ADVICE));
                ui.label(RichText::new(format!("\"{}\"", advice)).italics());
            });
    }

    for (title, items) in [
        ("Weaknesses", &feedback.weaknesses),
        ("Opportunities", &feedback.opportunities),
        ("Multiverse alternatives", &feedback.multiverse_alternatives),
    ] {
        if items.is_empty() {
            continue;
        }
        egui::CollapsingHeader::new(title)
            .default_open(false)
            .show(ui, |ui| {
                for item in items {
                    ui.label(format!("• {}", item));
                }
            });
    }
}

fn bullet_list(ui: &mut Ui, title: &str, color: Color32, items: &[String]) {
    ui.add_space(8.0);
    ui.label(RichText::new(title).strong().color(color));
    for item in items {
        ui.label(RichText::new(format!("• {}", item)).color(TEXT_DIM));
    }
}

fn transcript(ui: &mut Ui, model: &SanctumModel<'_>) {
    if model.transcript.is_empty() && !model.chatting {
        ui.vertical_centered(|ui| {
            ui.add_space((ui.available_height() / 2.0 - 120.0).max(0.0));
            ui.add(
                MagicCircle::new(150.0)
                    .rotating(false)
                    .style(CircleStyle::faded(0.2)),
            );
            ui.add_space(12.0);
            ui.label(
                RichText::new(
                    "\"What would you know about this project? Time is fluid, but my counsel is solid.\"",
                )
                .color(TEXT_DIM),
            );
        });
        return;
    }

    egui::ScrollArea::vertical()
        .stick_to_bottom(true)
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for message in model.transcript {
                bubble(ui, message);
                ui.add_space(8.0);
            }
            if model.chatting {
                typing_indicator(ui);
            }
        });
}

fn bubble(ui: &mut Ui, message: &ChatMessage) {
    let (layout, fill, text) = if message.is_user() {
        (Layout::right_to_left(Align::Min), EMBER, Color32::WHITE)
    } else {
        (
            Layout::left_to_right(Align::Min),
            Color32::from_rgb(0x27, 0x27, 0x2a),
            Color32::from_gray(0xe5),
        )
    };
    let max_width = ui.available_width() * 0.8;
    ui.with_layout(layout, |ui| {
        egui::Frame::none()
            .fill(fill)
            .rounding(12.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_max_width(max_width);
                ui.label(RichText::new(&message.text).color(text));
            });
    });
}

fn typing_indicator(ui: &mut Ui) {
    let time = ui.input(|i| i.time);
    ui.horizontal(|ui| {
        for i in 0..3 {
            let phase = (time * 6.0 - f64::from(i)).sin() as f32;
            let (rect, _) = ui.allocate_exact_size(egui::vec2(10.0, 14.0), egui::Sense::hover());
            let center = rect.center() - egui::vec2(0.0, phase.max(0.0) * 3.0);
            ui.painter().circle_filled(center, 3.0, AMBER);
        }
    });
    ui.ctx().request_repaint();
}

fn chat_input(
    ui: &mut Ui,
    model: &SanctumModel<'_>,
    input: &mut String,
    actions: &mut Vec<UiAction>,
) {
    ui.add_space(8.0);
    ui.horizontal(|ui| {
        let mirror = ui
            .add_enabled(!model.brainstorming, egui::Button::new(RichText::new("✨").color(AMBER)))
            .on_hover_text("Enter the Mirror Dimension");
        if mirror.clicked() {
            actions.push(UiAction::Brainstorm);
        }

        let send_width = 64.0;
        let response = ui.add(
            TextEdit::singleline(input)
                .desired_width(ui.available_width() - send_width)
                .hint_text("Ask your coach..."),
        );
        let entered = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
        let send = ui
            .add_enabled(
                !model.chatting,
                egui::Button::new(RichText::new("Send").strong()).fill(EMBER),
            )
            .clicked();

        if (send || (entered && !model.chatting)) && !input.trim().is_empty() {
            actions.push(UiAction::SendChat(std::mem::take(input)));
            response.request_focus();
        }
    });
    ui.add_space(8.0);
}
