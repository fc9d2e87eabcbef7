use profiling_charts::{write_svg_file, BarChart};
use std::env::args;

fn main() {
    let svg_file = args().nth(1).unwrap_or_else(|| "bars.svg".to_string());
    let chart = BarChart::random_scores();
    write_svg_file(&chart.scene(), 900, 600, &svg_file).expect("failed to save svg file");
}
