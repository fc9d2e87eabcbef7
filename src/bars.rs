//! Grouped vertical bar charts with one value label above each bar.
use crate::svg::{Anchor, Label, Rectangle, Scene, COLORS};
use rand::{thread_rng, Rng};

/// width of a single bar, in group units (one group spans 1.0)
pub const BAR_WIDTH: f64 = 0.3;
/// vertical gap between a bar top and its value label
pub const LABEL_MARGIN: f64 = 0.5;

/// A grouped bar chart: one value per (series, group) cell.
pub struct BarChart {
    /// title drawn above the chart
    pub title: String,
    /// group names, drawn below the bars
    pub group_labels: Vec<String>,
    /// legend entry per series
    pub series_labels: Vec<String>,
    /// one vector of values per series; all series have one value per group
    pub series: Vec<Vec<u32>>,
}

impl BarChart {
    /// Build the demo chart: two series of 6 random scores in `[20, 35)`.
    pub fn random_scores() -> BarChart {
        let mut rng = thread_rng();
        BarChart {
            title: "Scores by group and gender".to_string(),
            group_labels: (1..=6).map(|group| format!("G{}", group)).collect(),
            series_labels: vec!["Men".to_string(), "Women".to_string()],
            series: (0..2)
                .map(|_| (0..6).map(|_| rng.gen_range(20..35)).collect())
                .collect(),
        }
    }

    /// Assemble the scene: grouped bars, one numeric label centered above
    /// each bar, group names under the axis and a swatch legend.
    pub fn scene(&self) -> Scene {
        let mut scene = Scene::default();
        let series_number = self.series.len();
        for (series_index, values) in self.series.iter().enumerate() {
            let color = COLORS[series_index % COLORS.len()];
            for (group, &value) in values.iter().enumerate() {
                // bars of one group sit side by side around the group center
                let center = group as f64 + 0.5;
                let x = center + BAR_WIDTH * (series_index as f64 - series_number as f64 / 2.0);
                scene.rectangles.push(Rectangle::new(
                    color,
                    1.0,
                    (x, 0.0),
                    (BAR_WIDTH, f64::from(value)),
                ));
                scene.labels.push(Label {
                    text: value.to_string(),
                    x: x + BAR_WIDTH / 2.0,
                    y: f64::from(value) + LABEL_MARGIN,
                    anchor: Anchor::Middle,
                });
            }
        }

        let groups = self.group_labels.len() as f64;
        let top = self
            .series
            .iter()
            .flatten()
            .cloned()
            .max()
            .map(f64::from)
            .unwrap_or(0.0);

        for (group, name) in self.group_labels.iter().enumerate() {
            scene.labels.push(Label {
                text: name.clone(),
                x: group as f64 + 0.5,
                y: -2.0 * LABEL_MARGIN,
                anchor: Anchor::Middle,
            });
        }

        scene.labels.push(Label {
            text: self.title.clone(),
            x: groups / 2.0,
            y: top + 5.0,
            anchor: Anchor::Middle,
        });

        // legend: one colored swatch and name per series, stacked top right
        for (series_index, name) in self.series_labels.iter().enumerate() {
            let y = top + 3.0 - 1.5 * series_index as f64;
            scene.rectangles.push(Rectangle::new(
                COLORS[series_index % COLORS.len()],
                1.0,
                (groups - 1.0, y),
                (0.4, 0.8),
            ));
            scene.labels.push(Label {
                text: name.clone(),
                x: groups - 0.5,
                y: y + 0.4,
                anchor: Anchor::Start,
            });
        }

        scene.bounds = Some((0.0, -2.0, groups, top + 6.0));
        scene
    }
}
