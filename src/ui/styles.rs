use eframe::egui;

use crate::catalog::BarrierLevel;

/// Proportional UI text, with the monospace style reserved for measurement
/// columns so OTR/WVTR figures line up digit for digit.
pub fn setup_styles(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.text_styles.insert(
        egui::TextStyle::Body,
        egui::FontId::new(12.5, egui::FontFamily::Proportional)
    );
    style.text_styles.insert(
        egui::TextStyle::Button,
        egui::FontId::new(12.5, egui::FontFamily::Proportional)
    );
    style.text_styles.insert(
        egui::TextStyle::Heading,
        egui::FontId::new(16.0, egui::FontFamily::Proportional)
    );
    style.text_styles.insert(
        egui::TextStyle::Small,
        egui::FontId::new(10.0, egui::FontFamily::Proportional)
    );
    style.text_styles.insert(
        egui::TextStyle::Monospace,
        egui::FontId::new(11.5, egui::FontFamily::Monospace)
    );

    ctx.set_style(style);
}

/// Badge palette for the barrier ranking: yellow, blue, purple, red from low
/// to ultra, matching the published data sheets.
fn barrier_colors(level: BarrierLevel) -> (egui::Color32, egui::Color32) {
    match level {
        BarrierLevel::Low => (
            egui::Color32::from_rgb(254, 249, 195),
            egui::Color32::from_rgb(133, 77, 14),
        ),
        BarrierLevel::Mid => (
            egui::Color32::from_rgb(219, 234, 254),
            egui::Color32::from_rgb(30, 64, 175),
        ),
        BarrierLevel::High => (
            egui::Color32::from_rgb(243, 232, 255),
            egui::Color32::from_rgb(107, 33, 168),
        ),
        BarrierLevel::Ultra => (
            egui::Color32::from_rgb(254, 226, 226),
            egui::Color32::from_rgb(153, 27, 27),
        ),
    }
}

pub fn barrier_badge(ui: &mut egui::Ui, level: BarrierLevel) {
    let (background, foreground) = barrier_colors(level);
    egui::Frame::none()
        .fill(background)
        .rounding(6.0)
        .inner_margin(egui::Margin::symmetric(6.0, 1.0))
        .show(ui, |ui| {
            ui.label(
                egui::RichText::new(level.label())
                    .size(10.0)
                    .color(foreground),
            );
        });
}
