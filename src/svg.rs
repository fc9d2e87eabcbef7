//! Small module with display related functions.

use itertools::Itertools;
use std::fs::File;
use std::io::prelude::*;
use std::io::{Error, ErrorKind};
use std::path::Path;

/// colors used for each bar series (the report scripts' palette)
pub(crate) const COLORS: [[f32; 3]; 4] = [
    [0.604, 0.839, 0.824],
    [1.0, 0.812, 0.624],
    [0.541, 0.702, 0.824],
    [0.678, 0.827, 0.584],
];

/// single color used for all timeline bands
pub(crate) const TIMELINE_COLOR: [f32; 3] = COLORS[0];

/// margin reserved on the left of the drawing area, in pixels.
/// category names end up here.
const LEFT_MARGIN: f64 = 110.0;
/// margin reserved on the three other sides, in pixels
const OUTER_MARGIN: f64 = 25.0;
/// gap between a right-anchored label and the point it is anchored to
const LABEL_GAP: f64 = 8.0;
/// font size of all labels, in pixels
const FONT_SIZE: u32 = 14;

/// Charts are assembled as a set of rectangles.
#[derive(Debug)]
pub struct Rectangle {
    /// color (rgb)
    pub color: [f32; 3],
    /// opacity
    pub opacity: f32,
    /// x coordinate
    pub x: f64,
    /// y coordinate
    pub y: f64,
    /// width
    pub width: f64,
    /// height
    pub height: f64,
}

impl Rectangle {
    /// Creates a new rectangle
    pub fn new(color: [f32; 3], opacity: f32, position: (f64, f64), sizes: (f64, f64)) -> Rectangle {
        Rectangle {
            color,
            opacity,
            x: position.0,
            y: position.1,
            width: sizes.0,
            height: sizes.1,
        }
    }
}

/// How a label is horizontally placed relative to its anchor point.
#[derive(Debug)]
pub enum Anchor {
    /// text starts at the anchor point
    Start,
    /// text is centered on the anchor point
    Middle,
    /// text ends at the anchor point
    End,
}

impl Anchor {
    fn as_svg(&self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// A piece of text anchored in chart coordinates.
#[derive(Debug)]
pub struct Label {
    /// displayed text
    pub text: String,
    /// x coordinate of the anchor point
    pub x: f64,
    /// y coordinate of the anchor point
    pub y: f64,
    /// horizontal placement relative to the anchor point
    pub anchor: Anchor,
}

/// A full chart: rectangles plus text labels, in chart coordinates
/// (y axis pointing up, like the plots we replace).
#[derive(Debug, Default)]
pub struct Scene {
    /// all filled rectangles
    pub rectangles: Vec<Rectangle>,
    /// all text labels
    pub labels: Vec<Label>,
    /// forced coordinate window as (xmin, ymin, xmax, ymax);
    /// when `None` the window is computed from the rectangles.
    pub bounds: Option<(f64, f64, f64, f64)>,
}

/// saves a scene as an svg file of the given pixel size.
/// chart coordinates are scaled into the pixel box and the y axis is flipped
/// since svg grows downwards.
pub fn write_svg_file<P: AsRef<Path>>(
    scene: &Scene,
    svg_width: u32,
    svg_height: u32,
    path: P,
) -> Result<(), Error> {
    let (xmin, ymin, xmax, ymax) = scene_bounds(scene)?;
    let drawing_width = f64::from(svg_width) - LEFT_MARGIN - OUTER_MARGIN;
    let drawing_height = f64::from(svg_height) - 2.0 * OUTER_MARGIN;
    // degenerate windows still get a valid viewport
    let xscale = drawing_width / (xmax - xmin).max(f64::EPSILON);
    let yscale = drawing_height / (ymax - ymin).max(f64::EPSILON);

    let mut file = File::create(path)?;

    // Header
    file.write_fmt(format_args!(
        "<?xml version=\"1.0\"?>
<svg width=\"{}\" height=\"{}\" version=\"1.1\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        svg_width, svg_height,
    ))?;

    for rectangle in &scene.rectangles {
        file.write_fmt(format_args!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"rgba({},{},{},{})\"/>\n",
            LEFT_MARGIN + (rectangle.x - xmin) * xscale,
            OUTER_MARGIN + (ymax - rectangle.y - rectangle.height) * yscale,
            rectangle.width * xscale,
            rectangle.height * yscale,
            (rectangle.color[0] * 255.0) as u32,
            (rectangle.color[1] * 255.0) as u32,
            (rectangle.color[2] * 255.0) as u32,
            rectangle.opacity,
        ))?;
    }

    for label in &scene.labels {
        let gap = match label.anchor {
            Anchor::End => -LABEL_GAP,
            _ => 0.0,
        };
        file.write_fmt(format_args!(
            "<text x=\"{}\" y=\"{}\" text-anchor=\"{}\" dominant-baseline=\"middle\" \
             font-family=\"sans-serif\" font-size=\"{}\">{}</text>\n",
            LEFT_MARGIN + (label.x - xmin) * xscale + gap,
            OUTER_MARGIN + (ymax - label.y) * yscale,
            label.anchor.as_svg(),
            FONT_SIZE,
            escape_text(&label.text),
        ))?;
    }
    file.write_all(b"</svg>")?;
    Ok(())
}

/// Return the coordinate window of the scene, computing it from the
/// rectangles when no explicit bounds were set.
fn scene_bounds(scene: &Scene) -> Result<(f64, f64, f64, f64), Error> {
    if let Some(bounds) = scene.bounds {
        return Ok(bounds);
    }
    let (xmin, xmax) = scene
        .rectangles
        .iter()
        .flat_map(|r| vec![r.x, r.x + r.width])
        .minmax_by(|a, b| a.partial_cmp(b).unwrap())
        .into_option()
        .ok_or_else(|| Error::new(ErrorKind::InvalidData, "nothing to draw"))?;
    let (ymin, ymax) = scene
        .rectangles
        .iter()
        .flat_map(|r| vec![r.y, r.y + r.height])
        .minmax_by(|a, b| a.partial_cmp(b).unwrap())
        .into_option()
        .ok_or_else(|| Error::new(ErrorKind::InvalidData, "nothing to draw"))?;
    Ok((xmin, ymin, xmax, ymax))
}

/// xml-escape label text.
fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::read_to_string;

    #[test]
    fn one_svg_element_per_scene_item() {
        let mut scene = Scene::default();
        scene.rectangles.push(Rectangle::new(COLORS[0], 1.0, (0.0, 0.0), (10.0, 2.0)));
        scene.rectangles.push(Rectangle::new(COLORS[1], 1.0, (12.0, 4.0), (3.0, 2.0)));
        scene.labels.push(Label {
            text: "memory".to_string(),
            x: 0.0,
            y: 1.0,
            anchor: Anchor::End,
        });
        let path = std::env::temp_dir().join("profiling_charts_svg_test.svg");
        write_svg_file(&scene, 800, 600, &path).unwrap();
        let svg = read_to_string(&path).unwrap();
        assert_eq!(svg.matches("<rect ").count(), 2);
        assert_eq!(svg.matches("<text ").count(), 1);
        assert!(svg.contains(">memory</text>"));
    }

    #[test]
    fn rectangles_are_scaled_into_the_pixel_box() {
        let mut scene = Scene::default();
        scene.rectangles.push(Rectangle::new(COLORS[0], 1.0, (1.0, 2.0), (3.0, 2.0)));
        scene.bounds = Some((0.0, 0.0, 10.0, 10.0));
        // drawing area is 500x500 pixels, so both scale factors are 50
        let svg_width = (LEFT_MARGIN + OUTER_MARGIN) as u32 + 500;
        let svg_height = 2 * OUTER_MARGIN as u32 + 500;
        let path = std::env::temp_dir().join("profiling_charts_scaling_test.svg");
        write_svg_file(&scene, svg_width, svg_height, &path).unwrap();
        let svg = read_to_string(&path).unwrap();
        // x = LEFT_MARGIN + 1 * 50, y = OUTER_MARGIN + (10 - 2 - 2) * 50
        assert!(svg.contains("<rect x=\"160\" y=\"325\" width=\"150\" height=\"100\""));
    }

    #[test]
    fn empty_scene_is_an_error() {
        let scene = Scene::default();
        let path = std::env::temp_dir().join("profiling_charts_empty_test.svg");
        let error = write_svg_file(&scene, 800, 600, &path).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn labels_are_escaped() {
        assert_eq!(escape_text("a<b&c"), "a&lt;b&amp;c");
        assert_eq!(escape_text("\"q\""), "&quot;q&quot;");
    }
}
