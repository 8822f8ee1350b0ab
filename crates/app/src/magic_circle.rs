//! The orange sigil drawn on the home screen, in the sanctum and in the
//! mirror dimension. Purely decorative.

use egui::{pos2, vec2, Color32, Pos2, Response, Sense, Shape, Stroke, Ui, Vec2, Widget};
use std::f32::consts::TAU;

pub const AMBER: Color32 = Color32::from_rgb(0xff, 0x9d, 0x00);
pub const EMBER: Color32 = Color32::from_rgb(0xff, 0x4d, 0x00);

/// Seconds per full turn of a rotating circle
pub const REVOLUTION_SECS: f64 = 10.0;

/// Geometry is authored on a 200x200 canvas and scaled to the widget size
const CANVAS: f32 = 200.0;
const RING_SEGMENTS: usize = 96;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleStyle {
    pub primary: Color32,
    pub secondary: Color32,
    /// 0.0 (invisible) to 1.0
    pub opacity: f32,
}

impl Default for CircleStyle {
    fn default() -> Self {
        Self {
            primary: AMBER,
            secondary: EMBER,
            opacity: 1.0,
        }
    }
}

impl CircleStyle {
    pub fn faded(opacity: f32) -> Self {
        Self {
            opacity: opacity.clamp(0.0, 1.0),
            ..Self::default()
        }
    }

    fn stroke(&self, width: f32, color: Color32) -> Stroke {
        Stroke::new(width, color.gamma_multiply(self.opacity))
    }
}

pub struct MagicCircle {
    size: f32,
    rotating: bool,
    style: CircleStyle,
}

impl MagicCircle {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            rotating: true,
            style: CircleStyle::default(),
        }
    }

    pub fn rotating(mut self, rotating: bool) -> Self {
        self.rotating = rotating;
        self
    }

    pub fn style(mut self, style: CircleStyle) -> Self {
        self.style = style;
        self
    }
}

impl Widget for MagicCircle {
    fn ui(self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(Vec2::splat(self.size), Sense::hover());
        if ui.is_rect_visible(rect) {
            let angle = if self.rotating {
                rotation_at(ui.input(|i| i.time))
            } else {
                0.0
            };
            ui.painter()
                .extend(circle_shapes(rect.center(), self.size, angle, &self.style));
            if self.rotating {
                ui.ctx().request_repaint();
            }
        }
        response
    }
}

/// Rotation angle (radians) after `time` seconds
pub fn rotation_at(time: f64) -> f32 {
    ((time % REVOLUTION_SECS) / REVOLUTION_SECS) as f32 * TAU
}

/// All shapes of the sigil centred on `center`, `size` wide, turned by `angle`.
pub fn circle_shapes(center: Pos2, size: f32, angle: f32, style: &CircleStyle) -> Vec<Shape> {
    let scale = size / CANVAS;
    let (sin, cos) = angle.sin_cos();
    // Canvas coordinates (origin at the top-left of the 200x200 box) to screen
    let at = |x: f32, y: f32| {
        let v = vec2(x - CANVAS / 2.0, y - CANVAS / 2.0) * scale;
        center + vec2(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
    };

    let mut shapes = Vec::new();

    shapes.extend(Shape::dashed_line(
        &ring(center, 95.0 * scale, angle),
        style.stroke(1.0, style.primary),
        10.0 * scale,
        5.0 * scale,
    ));
    shapes.push(Shape::circle_stroke(
        center,
        85.0 * scale,
        style.stroke(0.5, style.secondary),
    ));

    let hair = style.stroke(0.5, style.primary);
    shapes.push(Shape::line_segment([at(100.0, 5.0), at(100.0, 195.0)], hair));
    shapes.push(Shape::line_segment([at(5.0, 100.0), at(195.0, 100.0)], hair));

    shapes.push(Shape::closed_line(
        vec![at(100.0, 20.0), at(170.0, 140.0), at(30.0, 140.0)],
        style.stroke(1.0, style.primary),
    ));
    shapes.push(Shape::closed_line(
        vec![at(100.0, 180.0), at(30.0, 60.0), at(170.0, 60.0)],
        style.stroke(1.0, style.secondary),
    ));

    shapes.extend(Shape::dashed_line(
        &ring(center, 40.0 * scale, angle),
        style.stroke(2.0, style.primary),
        2.0 * scale,
        2.0 * scale,
    ));

    shapes
}

/// Closed polyline approximating a circle, starting at `phase`
fn ring(center: Pos2, radius: f32, phase: f32) -> Vec<Pos2> {
    (0..=RING_SEGMENTS)
        .map(|i| {
            let t = phase + TAU * i as f32 / RING_SEGMENTS as f32;
            pos2(center.x + radius * t.cos(), center.y + radius * t.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(shape: &Shape) -> Vec<Pos2> {
        match shape {
            Shape::LineSegment { points, .. } => points.to_vec(),
            Shape::Path(path) => path.points.clone(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn test_shapes_stay_inside_the_widget() {
        let center = pos2(150.0, 150.0);
        for angle in [0.0, 0.7, 2.0, 4.5] {
            for shape in circle_shapes(center, 200.0, angle, &CircleStyle::default()) {
                for p in points(&shape) {
                    assert!(p.distance(center) <= 100.0 + 0.01, "{:?} escapes", p);
                }
            }
        }
    }

    #[test]
    fn test_triangle_apex_follows_rotation() {
        let center = pos2(0.0, 0.0);
        let apex = |angle| {
            circle_shapes(center, 200.0, angle, &CircleStyle::default())
                .iter()
                .find_map(|s| match s {
                    Shape::Path(path) if path.closed && path.points.len() == 3 => {
                        Some(path.points[0])
                    }
                    _ => None,
                })
                .unwrap()
        };

        let upright = apex(0.0);
        assert!((upright.x - 0.0).abs() < 1e-3);
        assert!((upright.y + 80.0).abs() < 1e-3);

        let quarter = apex(TAU / 4.0);
        assert!((quarter.x - 80.0).abs() < 1e-3);
        assert!(quarter.y.abs() < 1e-3);
    }

    #[test]
    fn test_geometry_scales_with_size() {
        let style = CircleStyle::default();
        let inner = |size| {
            circle_shapes(Pos2::ZERO, size, 0.0, &style)
                .iter()
                .find_map(|s| match s {
                    Shape::Circle(c) => Some(c.radius),
                    _ => None,
                })
                .unwrap()
        };
        assert!((inner(200.0) - 85.0).abs() < 1e-3);
        assert!((inner(100.0) - 42.5).abs() < 1e-3);
    }

    #[test]
    fn test_one_revolution_per_ten_seconds() {
        assert_eq!(rotation_at(0.0), 0.0);
        assert!((rotation_at(2.5) - TAU / 4.0).abs() < 1e-5);
        assert!(rotation_at(10.0).abs() < 1e-5);
    }

    #[test]
    fn test_faded_style_clamps_opacity() {
        assert_eq!(CircleStyle::faded(0.2).opacity, 0.2);
        assert_eq!(CircleStyle::faded(3.0).opacity, 1.0);
    }
}
