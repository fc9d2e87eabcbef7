//! This crate renders charts from the json profiling reports dumped by
//! the simulator. Per-module timing breakdowns (computation, memory,
//! control, transport, ...) become broken bar ("gantt") timelines, and a
//! second chart type draws grouped vertical bars with a numeric label
//! above each bar. Everything is written out as plain svg files.
#![deny(missing_docs)]
#![warn(clippy::all)]

mod bars;
pub use crate::bars::{BarChart, BAR_WIDTH, LABEL_MARGIN};
mod report;
pub use crate::report::{CategoryTiming, ModuleTiming, ProfilingReport, Segment, TimeStamp};
mod timeline;
pub use crate::timeline::{band_position, visualisation, BAND_HEIGHT, BAND_SPACING};
pub(crate) mod svg;
pub use crate::svg::{write_svg_file, Anchor, Label, Rectangle, Scene};

use std::io;
use std::path::Path;

/// Convert one module of a profiling json file into an svg timeline.
pub fn profiling2svg<P: AsRef<Path>, Q: AsRef<Path>>(
    report_path: P,
    module_name: &str,
    svg_path: Q,
) -> Result<(), io::Error> {
    let report = ProfilingReport::load(report_path)?;
    let scene = visualisation(&report, module_name)?;
    write_svg_file(&scene, 800, 600, svg_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_to_svg_end_to_end() {
        let dir = std::env::temp_dir();
        let json_path = dir.join("profiling_charts_e2e.json");
        let svg_path = dir.join("profiling_charts_e2e.svg");
        std::fs::write(
            &json_path,
            r#"{"instruction_profiling": {"m": {"c1": {"time_segment_list":
                [{"start":0,"end":5}]}}}}"#,
        )
        .unwrap();
        profiling2svg(&json_path, "m", &svg_path).unwrap();
        let svg = std::fs::read_to_string(&svg_path).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(">c1</text>"));
    }
}
