//! Turn one module's timing breakdown into a broken bar ("gantt") scene.
//!
//! Every category of the module gets one horizontal band; its segments
//! become filled rectangles spanning `start..start + duration`. The band
//! order is the category order of the report.
use crate::report::ProfilingReport;
use crate::svg::{Anchor, Label, Rectangle, Scene, TIMELINE_COLOR};
use std::io::{Error, ErrorKind};

/// height of one category band
pub const BAND_HEIGHT: f64 = 2.0;
/// vertical distance between consecutive band centers
pub const BAND_SPACING: f64 = 4.0;

/// Lower edge of the band holding category row `index`.
/// Centers sit at `BAND_SPACING * (index + 1)` so the chart keeps one
/// band's worth of blank space above and below the rows.
pub fn band_position(index: usize) -> f64 {
    BAND_SPACING * (index + 1) as f64 - BAND_HEIGHT / 2.0
}

/// Build the timeline scene for one module of the report.
///
/// Fails with `NotFound` when the module is absent and with `InvalidData`
/// when none of its categories recorded any segment (the simulator only
/// keeps segments when asked to, and a fully blank chart helps nobody).
pub fn visualisation(report: &ProfilingReport, module_name: &str) -> Result<Scene, Error> {
    let module = report.module(module_name)?;
    let mut scene = Scene::default();
    let mut rows = Vec::new();
    for (index, (name, category)) in module.categories.iter().enumerate() {
        let y = band_position(index);
        for (start, duration) in category.time_segments() {
            scene.rectangles.push(Rectangle::new(
                TIMELINE_COLOR,
                1.0,
                (start, y),
                (duration, BAND_HEIGHT),
            ));
        }
        rows.push((name.clone(), y + BAND_HEIGHT / 2.0));
    }
    if scene.rectangles.is_empty() {
        return Err(Error::new(
            ErrorKind::InvalidData,
            format!("module {} has no time segments to display", module_name),
        ));
    }

    // tick labels go at each band center, on the left edge of the data
    let xmin = scene
        .rectangles
        .iter()
        .map(|r| r.x)
        .fold(f64::INFINITY, f64::min);
    let xmax = scene
        .rectangles
        .iter()
        .map(|r| r.x + r.width)
        .fold(f64::NEG_INFINITY, f64::max);
    for (name, y) in rows {
        scene.labels.push(Label {
            text: name,
            x: xmin,
            y,
            anchor: Anchor::End,
        });
    }
    let ymax = BAND_SPACING * (module.categories.len() + 1) as f64;
    scene.bounds = Some((xmin, 0.0, xmax, ymax));
    Ok(scene)
}
