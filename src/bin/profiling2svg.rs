use profiling_charts::{visualisation, write_svg_file, ProfilingReport};
use std::env::args;

// the simulator writes its report next to the run directory
const DEFAULT_REPORT: &str = "../report/profiling.json";
const DEFAULT_MODULE: &str = "conv.cim_compute";
const DEFAULT_SVG: &str = "timing.svg";

fn main() {
    let report_file = args().nth(1).unwrap_or_else(|| DEFAULT_REPORT.to_string());
    let module_name = args().nth(2).unwrap_or_else(|| DEFAULT_MODULE.to_string());
    let svg_file = args().nth(3).unwrap_or_else(|| DEFAULT_SVG.to_string());

    let report = ProfilingReport::load(&report_file).expect("failed to load profiling json file");
    let module = report
        .module(&module_name)
        .expect("module not found in profiling report");
    for (name, category) in &module.categories {
        println!("{}: {:.3}ns", name, category.activity_time);
    }

    let scene = visualisation(&report, &module_name).expect("failed to build timing chart");
    write_svg_file(&scene, 800, 600, &svg_file).expect("failed to save svg file");
}
