use super::ColorPicker;
use crate::brush::Brush;
use egui::{Color32, Mesh, Pos2, Rect, Sense, Shape, Ui, pos2, vec2};

/// Gradient stops of the picker line, left to right.
pub const PALETTE: [Color32; 9] = [
    Color32::from_rgb(0xEA, 0x27, 0x39),
    Color32::from_rgb(0xDB, 0x3A, 0xD2),
    Color32::from_rgb(0x30, 0x51, 0xE3),
    Color32::from_rgb(0x49, 0xC5, 0xED),
    Color32::from_rgb(0x80, 0xC8, 0x64),
    Color32::from_rgb(0xFC, 0xDE, 0x65),
    Color32::from_rgb(0xFC, 0x96, 0x4D),
    Color32::from_rgb(0x00, 0x00, 0x00),
    Color32::from_rgb(0xFF, 0xFF, 0xFF),
];

const LINE_WIDTH: f32 = 220.0;
const LINE_HEIGHT: f32 = 10.0;
const SLIDER_WIDTH: f32 = 96.0;
const SLIDER_GAP: f32 = 16.0;
const MIN_INDICATOR_RADIUS: f32 = 4.0;
const MAX_INDICATOR_RADIUS: f32 = 12.0;

/// Size used when no brush size was ever saved.
pub const DEFAULT_SIZE_RATIO: f32 = 0.25;

/// Resolution used to find the gradient position of a saved color.
const POSITION_SAMPLES: usize = 512;

/// Color of the gradient at `t` in `[0, 1]`.
pub fn color_at(t: f32) -> Color32 {
    let segments = PALETTE.len() - 1;
    let x = t.clamp(0.0, 1.0) * segments as f32;
    let index = (x.floor() as usize).min(segments - 1);
    let fraction = x - index as f32;

    let [r0, g0, b0, _] = PALETTE[index].to_array();
    let [r1, g1, b1, _] = PALETTE[index + 1].to_array();
    let mix = |a: u8, b: u8| egui::lerp(a as f32..=b as f32, fraction).round() as u8;
    Color32::from_rgb(mix(r0, r1), mix(g0, g1), mix(b0, b1))
}

/// Gradient position whose color is closest to `color`.
pub fn position_of(color: Color32) -> f32 {
    let distance = |other: Color32| {
        let [r0, g0, b0, _] = color.to_array();
        let [r1, g1, b1, _] = other.to_array();
        [(r0, r1), (g0, g1), (b0, b1)]
            .iter()
            .map(|(a, b)| (*a as i32 - *b as i32).pow(2))
            .sum::<i32>()
    };

    (0..=POSITION_SAMPLES)
        .map(|i| i as f32 / POSITION_SAMPLES as f32)
        .min_by_key(|t| distance(color_at(*t)))
        .unwrap_or(0.0)
}

/// Picker drawn as a gradient line with a size slider next to it.
pub struct GradientColorPicker {
    brush: Brush,
    position: f32,
    anchor: Pos2,
    visible: bool,
}

impl GradientColorPicker {
    /// An unset saved brush (transparent, zero size) gets the first palette
    /// color and [`DEFAULT_SIZE_RATIO`].
    pub fn new(saved: Brush) -> Self {
        let color = if saved.color == Color32::default() {
            PALETTE[0]
        } else {
            saved.color
        };
        let size_ratio = if saved.size_ratio > 0.0 {
            saved.size_ratio
        } else {
            DEFAULT_SIZE_RATIO
        };

        Self {
            brush: Brush::new(size_ratio, color),
            position: position_of(color),
            anchor: Pos2::ZERO,
            visible: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    fn line_rect(&self) -> Rect {
        Rect::from_center_size(self.anchor, vec2(LINE_WIDTH, LINE_HEIGHT))
    }

    fn pick(&mut self, position: f32) {
        self.position = position.clamp(0.0, 1.0);
        self.brush.color = color_at(self.position);
    }

    fn paint_line(&self, ui: &Ui, rect: Rect) {
        let mut mesh = Mesh::default();
        let segments = PALETTE.len() - 1;
        for (i, pair) in PALETTE.windows(2).enumerate() {
            let left = egui::lerp(rect.left()..=rect.right(), i as f32 / segments as f32);
            let right = egui::lerp(rect.left()..=rect.right(), (i + 1) as f32 / segments as f32);

            let base = mesh.vertices.len() as u32;
            mesh.colored_vertex(pos2(left, rect.top()), pair[0]);
            mesh.colored_vertex(pos2(right, rect.top()), pair[1]);
            mesh.colored_vertex(pos2(right, rect.bottom()), pair[1]);
            mesh.colored_vertex(pos2(left, rect.bottom()), pair[0]);
            mesh.add_triangle(base, base + 1, base + 2);
            mesh.add_triangle(base, base + 2, base + 3);
        }
        ui.painter().add(Shape::mesh(mesh));

        let center = pos2(egui::lerp(rect.left()..=rect.right(), self.position), rect.center().y);
        let radius = egui::lerp(
            MIN_INDICATOR_RADIUS..=MAX_INDICATOR_RADIUS,
            self.brush.size_ratio.clamp(0.0, 1.0),
        );
        ui.painter().circle(center, radius, self.brush.color, egui::Stroke::new(2.0, Color32::WHITE));
    }
}

impl ColorPicker for GradientColorPicker {
    fn brush(&self) -> Brush {
        self.brush
    }

    fn move_line(&mut self, anchor: Pos2) {
        self.anchor = anchor;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn ui(&mut self, ui: &mut Ui) -> Option<Brush> {
        if !self.visible {
            return None;
        }

        let line = self.line_rect();
        let hit_area = line.expand2(vec2(MAX_INDICATOR_RADIUS, MAX_INDICATOR_RADIUS));
        let response = ui.interact(hit_area, ui.id().with("photo_editor_color_line"), Sense::click_and_drag());
        if let Some(pointer) = response.interact_pointer_pos() {
            if response.is_pointer_button_down_on() || response.clicked() {
                self.pick((pointer.x - line.left()) / line.width());
            }
        }

        let slider_rect = Rect::from_min_size(
            pos2(line.right() + SLIDER_GAP, line.center().y - 9.0),
            vec2(SLIDER_WIDTH, 18.0),
        );
        let slider = ui.put(
            slider_rect,
            egui::Slider::new(&mut self.brush.size_ratio, 0.0..=1.0).show_value(false),
        );

        self.paint_line(ui, line);

        let committed = response.clicked()
            || response.drag_stopped()
            || slider.drag_stopped()
            || (slider.changed() && !slider.dragged());
        if committed {
            log::debug!("Brush picked: {:?}", self.brush);
            Some(self.brush)
        } else {
            None
        }
    }
}
