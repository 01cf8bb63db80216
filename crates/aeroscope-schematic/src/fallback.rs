//! Deterministic local blueprint shown when generation is unavailable.
//!
//! The blueprint is a list of vector elements on a 1200x800 canvas. Renderers
//! can paint the elements directly, or use the SVG rendering.

use std::f32::consts::PI;
use std::fmt::Write as _;

/// Canvas width.
pub const WIDTH: f32 = 1200.0;
/// Canvas height.
pub const HEIGHT: f32 = 800.0;

const GRID_SPACING: f32 = 50.0;
const VERTICAL_GRID_LINES: u16 = 24;
const HORIZONTAL_GRID_LINES: u16 = 16;
const FAN_BLADES: u16 = 16;
const INTAKE: [f32; 2] = [260.0, 400.0];

const CYAN: [u8; 3] = [0x00, 0xf3, 0xff];
const ORANGE: [u8; 3] = [0xff, 0x4d, 0x00];

/// Caption shown on every fallback blueprint.
pub const UNAVAILABLE_NOTE: &str = "AI OUTPUT UNAVAILABLE - USING LOCAL BLUEPRINT";

/// A color with opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tint {
    pub rgb: [u8; 3],
    pub opacity: f32,
}

impl Tint {
    pub const fn new(rgb: [u8; 3], opacity: f32) -> Self {
        Self { rgb, opacity }
    }

    pub const fn opaque(rgb: [u8; 3]) -> Self {
        Self::new(rgb, 1.0)
    }

    fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.rgb[0], self.rgb[1], self.rgb[2])
    }
}

/// Interior paint of a closed shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill {
    None,
    Solid(Tint),
    /// Linear gradient from `start` to `end`, vertical or horizontal.
    Gradient {
        start: Tint,
        end: Tint,
        vertical: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub tint: Tint,
    pub width: f32,
}

/// One vector element, in canvas pixels with y pointing down.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Rect {
        min: [f32; 2],
        size: [f32; 2],
        corner_radius: f32,
        fill: Fill,
        stroke: Option<Stroke>,
    },
    Circle {
        center: [f32; 2],
        radius: f32,
        fill: Fill,
        stroke: Option<Stroke>,
    },
    Line {
        from: [f32; 2],
        to: [f32; 2],
        stroke: Stroke,
    },
    /// Closed polygon.
    Polygon {
        points: Vec<[f32; 2]>,
        stroke: Stroke,
    },
    /// Monospace text with its baseline at `origin`.
    Text {
        origin: [f32; 2],
        content: String,
        size: f32,
        tint: Tint,
    },
}

/// A fallback engine blueprint for one part and propulsion type.
#[derive(Debug, Clone, PartialEq)]
pub struct Blueprint {
    pub part: String,
    pub propulsion: String,
    pub elements: Vec<Element>,
}

fn or_unknown(value: &str, unknown: &str) -> String {
    if value.is_empty() {
        unknown.to_owned()
    } else {
        value.to_owned()
    }
}

impl Blueprint {
    /// Assemble the blueprint for `part` and `propulsion`.
    ///
    /// Empty inputs are shown as `Unknown Part` and `Unknown Fuel`.
    pub fn fallback(part: &str, propulsion: &str) -> Self {
        let part = or_unknown(part, "Unknown Part");
        let propulsion = or_unknown(propulsion, "Unknown Fuel");

        let mut elements = vec![Element::Rect {
            min: [0.0, 0.0],
            size: [WIDTH, HEIGHT],
            corner_radius: 0.0,
            fill: Fill::Gradient {
                start: Tint::opaque([0x0b, 0x0f, 0x14]),
                end: Tint::opaque([0x0a, 0x0c, 0x10]),
                vertical: true,
            },
            stroke: None,
        }];

        let grid = Stroke {
            tint: Tint::new([0x0c, 0xf3, 0xff], 0.15),
            width: 1.0,
        };
        for i in 0..VERTICAL_GRID_LINES {
            let x = f32::from(i) * GRID_SPACING;
            elements.push(Element::Line {
                from: [x, 0.0],
                to: [x, HEIGHT],
                stroke: grid,
            });
        }
        for i in 0..HORIZONTAL_GRID_LINES {
            let y = f32::from(i) * GRID_SPACING;
            elements.push(Element::Line {
                from: [0.0, y],
                to: [WIDTH, y],
                stroke: grid,
            });
        }

        let outline = Stroke {
            tint: Tint::new(CYAN, 0.95),
            width: 2.0,
        };
        // Nacelle.
        for (min, size, corner_radius) in [
            ([160.0, 260.0], [880.0, 280.0], 90.0),
            ([220.0, 300.0], [760.0, 200.0], 70.0),
        ] {
            elements.push(Element::Rect {
                min,
                size,
                corner_radius,
                fill: Fill::None,
                stroke: Some(outline),
            });
        }
        // Intake rings.
        for radius in [120.0, 90.0] {
            elements.push(Element::Circle {
                center: INTAKE,
                radius,
                fill: Fill::None,
                stroke: Some(outline),
            });
        }
        // Exhaust cones.
        for points in [
            vec![[1000.0, 320.0], [1120.0, 400.0], [1000.0, 480.0]],
            vec![[960.0, 340.0], [1040.0, 400.0], [960.0, 460.0]],
        ] {
            elements.push(Element::Polygon {
                points,
                stroke: outline,
            });
        }
        // Fan blades.
        for i in 0..FAN_BLADES {
            let angle = f32::from(i) * PI / 8.0;
            let (sin, cos) = angle.sin_cos();
            elements.push(Element::Line {
                from: [INTAKE[0] + cos * 20.0, INTAKE[1] + sin * 20.0],
                to: [INTAKE[0] + cos * 85.0, INTAKE[1] + sin * 85.0],
                stroke: outline,
            });
        }
        elements.push(Element::Circle {
            center: INTAKE,
            radius: 105.0,
            fill: Fill::Gradient {
                start: Tint::new(CYAN, 0.9 * 0.35),
                end: Tint::new(CYAN, 0.2 * 0.35),
                vertical: false,
            },
            stroke: None,
        });

        for x in [160.0, 820.0] {
            elements.push(Element::Rect {
                min: [x, 190.0],
                size: [220.0, 32.0],
                corner_radius: 6.0,
                fill: Fill::Solid(Tint::new(ORANGE, 0.85)),
                stroke: None,
            });
        }

        let text = |x: f32, y: f32, content: String, size: f32, rgb: [u8; 3]| Element::Text {
            origin: [x, y],
            content,
            size,
            tint: Tint::opaque(rgb),
        };
        let light = [0xe2, 0xe8, 0xf0];
        elements.push(text(180.0, 214.0, "ENGINE SCHEMATIC".to_owned(), 22.0, light));
        elements.push(text(840.0, 214.0, "DEMO ONLY".to_owned(), 22.0, light));
        elements.push(text(120.0, 120.0, format!("PART: {part}"), 28.0, CYAN));
        elements.push(text(120.0, 680.0, format!("FUEL: {propulsion}"), 28.0, CYAN));
        elements.push(text(
            120.0,
            720.0,
            UNAVAILABLE_NOTE.to_owned(),
            18.0,
            [0x94, 0xa3, 0xb8],
        ));

        Self {
            part,
            propulsion,
            elements,
        }
    }

    /// Render the blueprint as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        let mut defs = String::new();
        let mut body = String::new();
        let mut gradients = 0_usize;

        for element in &self.elements {
            match element {
                Element::Rect {
                    min,
                    size,
                    corner_radius,
                    fill,
                    stroke,
                } => {
                    let paint = paint_attrs(*fill, *stroke, &mut defs, &mut gradients);
                    let _ = write!(
                        body,
                        r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}"{paint}/>"#,
                        num(min[0]),
                        num(min[1]),
                        num(size[0]),
                        num(size[1]),
                        num(*corner_radius),
                    );
                }
                Element::Circle {
                    center,
                    radius,
                    fill,
                    stroke,
                } => {
                    let paint = paint_attrs(*fill, *stroke, &mut defs, &mut gradients);
                    let _ = write!(
                        body,
                        r#"<circle cx="{}" cy="{}" r="{}"{paint}/>"#,
                        num(center[0]),
                        num(center[1]),
                        num(*radius),
                    );
                }
                Element::Line { from, to, stroke } => {
                    let paint = paint_attrs(Fill::None, Some(*stroke), &mut defs, &mut gradients);
                    let _ = write!(
                        body,
                        r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{paint}/>"#,
                        num(from[0]),
                        num(from[1]),
                        num(to[0]),
                        num(to[1]),
                    );
                }
                Element::Polygon { points, stroke } => {
                    let paint = paint_attrs(Fill::None, Some(*stroke), &mut defs, &mut gradients);
                    let points = points
                        .iter()
                        .map(|[x, y]| format!("{},{}", num(*x), num(*y)))
                        .collect::<Vec<_>>()
                        .join(" ");
                    let _ = write!(body, r#"<polygon points="{points}"{paint}/>"#);
                }
                Element::Text {
                    origin,
                    content,
                    size,
                    tint,
                } => {
                    let _ = write!(
                        body,
                        r#"<text x="{}" y="{}" font-family="monospace" font-size="{}" fill="{}"{}>{}</text>"#,
                        num(origin[0]),
                        num(origin[1]),
                        num(*size),
                        tint.hex(),
                        opacity_attr("fill-opacity", tint.opacity),
                        escape_xml(content),
                    );
                }
            }
        }

        format!(
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8"?>"#,
                "\n",
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
                "<defs>{defs}</defs>{body}</svg>"
            ),
            w = num(WIDTH),
            h = num(HEIGHT),
            defs = defs,
            body = body,
        )
    }

    /// The SVG as a percent-encoded `data:` URL.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:image/svg+xml;utf8,{}",
            urlencoding::encode(&self.to_svg())
        )
    }
}

/// Escape the characters that would break SVG text content.
pub fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Format a coordinate with at most one decimal.
fn num(value: f32) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

fn opacity_attr(name: &str, opacity: f32) -> String {
    if opacity < 1.0 {
        format!(r#" {name}="{opacity}""#)
    } else {
        String::new()
    }
}

fn paint_attrs(fill: Fill, stroke: Option<Stroke>, defs: &mut String, gradients: &mut usize) -> String {
    let mut attrs = match fill {
        Fill::None => r#" fill="none""#.to_owned(),
        Fill::Solid(tint) => format!(
            r#" fill="{}"{}"#,
            tint.hex(),
            opacity_attr("fill-opacity", tint.opacity)
        ),
        Fill::Gradient {
            start,
            end,
            vertical,
        } => {
            let id = format!("gradient{gradients}");
            *gradients += 1;
            let (x2, y2) = if vertical { (0, 1) } else { (1, 0) };
            let _ = write!(
                defs,
                r#"<linearGradient id="{id}" x1="0" y1="0" x2="{x2}" y2="{y2}"><stop offset="0%" stop-color="{}" stop-opacity="{}"/><stop offset="100%" stop-color="{}" stop-opacity="{}"/></linearGradient>"#,
                start.hex(),
                start.opacity,
                end.hex(),
                end.opacity,
            );
            format!(r#" fill="url(#{id})""#)
        }
    };
    if let Some(stroke) = stroke {
        let _ = write!(
            attrs,
            r#" stroke="{}" stroke-width="{}"{}"#,
            stroke.tint.hex(),
            num(stroke.width),
            opacity_attr("stroke-opacity", stroke.tint.opacity),
        );
    }
    attrs
}
