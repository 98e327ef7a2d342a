use eframe::egui;

/// Square toolbar button showing a single glyph.
pub struct IconButton {
    pub icon: &'static str,
    pub enabled: bool,
}

impl IconButton {
    pub fn new(icon: &'static str) -> Self {
        Self {
            icon,
            enabled: true,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Draws the button into `rect`; a disabled button never reports clicks.
    pub fn show_at(&self, ui: &mut egui::Ui, rect: egui::Rect, id: egui::Id) -> egui::Response {
        let sense = if self.enabled {
            egui::Sense::click()
        } else {
            egui::Sense::hover()
        };
        let response = ui.interact(rect, id, sense);

        if ui.is_rect_visible(rect) {
            let bg_color = if self.enabled && response.hovered() {
                egui::Color32::from_gray(40)
            } else {
                egui::Color32::from_gray(30)
            };
            ui.painter().rect_filled(rect, 4.0, bg_color);

            let text_color = if self.enabled {
                egui::Color32::WHITE
            } else {
                egui::Color32::from_gray(90)
            };
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.icon,
                egui::FontId::proportional(24.0),
                text_color,
            );
        }

        response
    }
}
