//! Paints a fallback blueprint with the egui painter.

use aeroscope_schematic::fallback::{self, Element, Fill, Stroke, Tint};
use aeroscope_schematic::Blueprint;
use bevy_egui::egui;

fn color(tint: Tint) -> egui::Color32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let alpha = (tint.opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(tint.rgb[0], tint.rgb[1], tint.rgb[2], alpha)
}

/// Maps blueprint canvas pixels into a screen rectangle.
#[derive(Debug, Clone, Copy)]
struct Canvas {
    origin: egui::Pos2,
    scale: f32,
}

impl Canvas {
    fn fit(rect: egui::Rect) -> Self {
        let scale = (rect.width() / fallback::WIDTH).min(rect.height() / fallback::HEIGHT);
        Self {
            origin: rect.min,
            scale,
        }
    }

    fn pos(self, [x, y]: [f32; 2]) -> egui::Pos2 {
        self.origin + egui::vec2(x, y) * self.scale
    }

    fn stroke(self, stroke: Stroke) -> egui::Stroke {
        egui::Stroke::new(stroke.width * self.scale, color(stroke.tint))
    }

    fn optional_stroke(self, stroke: Option<Stroke>) -> egui::Stroke {
        stroke.map_or(egui::Stroke::NONE, |s| self.stroke(s))
    }
}

/// Flat approximation of a fill, used where gradients cannot be drawn.
fn solid(fill: Fill) -> egui::Color32 {
    match fill {
        Fill::None => egui::Color32::TRANSPARENT,
        Fill::Solid(tint) | Fill::Gradient { start: tint, .. } => color(tint),
    }
}

fn gradient_rect(rect: egui::Rect, start: Tint, end: Tint, vertical: bool) -> egui::Shape {
    let (start, end) = (color(start), color(end));
    let corners = if vertical {
        [start, start, end, end]
    } else {
        [start, end, end, start]
    };
    let mut mesh = egui::Mesh::default();
    for (pos, tint) in [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
    ]
    .into_iter()
    .zip(corners)
    {
        mesh.colored_vertex(pos, tint);
    }
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    egui::Shape::mesh(mesh)
}

/// Paint `blueprint` scaled to fit `rect`.
pub(super) fn paint(painter: &egui::Painter, rect: egui::Rect, blueprint: &Blueprint) {
    let canvas = Canvas::fit(rect);
    for element in &blueprint.elements {
        match element {
            Element::Rect {
                min,
                size,
                corner_radius,
                fill,
                stroke,
            } => {
                let min = canvas.pos(*min);
                let rect = egui::Rect::from_min_size(min, egui::vec2(size[0], size[1]) * canvas.scale);
                let radius = corner_radius * canvas.scale;
                if let Fill::Gradient {
                    start,
                    end,
                    vertical,
                } = fill
                {
                    painter.add(gradient_rect(rect, *start, *end, *vertical));
                    painter.rect_stroke(rect, radius, canvas.optional_stroke(*stroke), egui::StrokeKind::Inside);
                } else {
                    painter.rect(
                        rect,
                        radius,
                        solid(*fill),
                        canvas.optional_stroke(*stroke),
                        egui::StrokeKind::Inside,
                    );
                }
            }
            Element::Circle {
                center,
                radius,
                fill,
                stroke,
            } => {
                painter.circle(
                    canvas.pos(*center),
                    radius * canvas.scale,
                    solid(*fill),
                    canvas.optional_stroke(*stroke),
                );
            }
            Element::Line { from, to, stroke } => {
                painter.line_segment([canvas.pos(*from), canvas.pos(*to)], canvas.stroke(*stroke));
            }
            Element::Polygon { points, stroke } => {
                let points = points.iter().map(|p| canvas.pos(*p)).collect();
                painter.add(egui::Shape::closed_line(points, canvas.stroke(*stroke)));
            }
            Element::Text {
                origin,
                content,
                size,
                tint,
            } => {
                painter.text(
                    canvas.pos(*origin),
                    egui::Align2::LEFT_BOTTOM,
                    content,
                    egui::FontId::monospace(size * canvas.scale),
                    color(*tint),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_fits_aspect() {
        let rect = egui::Rect::from_min_size(egui::pos2(10.0, 20.0), egui::vec2(600.0, 600.0));
        let canvas = Canvas::fit(rect);
        assert!((canvas.scale - 0.5).abs() < 1e-6);
        assert_eq!(canvas.pos([0.0, 0.0]), egui::pos2(10.0, 20.0));
        let corner = canvas.pos([fallback::WIDTH, fallback::HEIGHT]);
        assert!((corner.x - 610.0).abs() < 1e-3);
        assert!((corner.y - 420.0).abs() < 1e-3);
    }

    #[test]
    fn test_tint_opacity() {
        let tint = Tint::new([0x00, 0xf3, 0xff], 0.5);
        assert_eq!(color(tint).a(), 128);
        assert_eq!(color(Tint::opaque([1, 2, 3])), egui::Color32::from_rgb(1, 2, 3));
    }
}
