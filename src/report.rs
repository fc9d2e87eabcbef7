//! Data model for the profiling reports dumped by the simulator.
use indexmap::IndexMap;
use serde_derive::{Deserialize, Serialize};
use std::fs::File;
use std::io;
use std::io::ErrorKind;
use std::path::Path;

/// instant in the report (in ns after simulation start)
pub type TimeStamp = f64;

/// A time interval during which some category was busy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// when activity starts
    pub start: TimeStamp,
    /// when activity ends (never before `start`)
    pub end: TimeStamp,
}

impl Segment {
    /// Return how long this segment lasts.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// One timing category of a module (computation, memory, ...):
/// its total busy time and the intervals making it up.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryTiming {
    /// total busy time in nanoseconds
    #[serde(default)]
    pub activity_time: f64,
    /// busy intervals in chronological order.
    /// only recorded when the simulator was asked to keep them.
    #[serde(default)]
    pub time_segment_list: Vec<Segment>,
}

impl CategoryTiming {
    /// Reshape the segments into `(start, duration)` pairs, preserving order.
    pub fn time_segments(&self) -> Vec<(f64, f64)> {
        self.time_segment_list
            .iter()
            .map(|segment| (segment.start, segment.duration()))
            .collect()
    }
}

/// All timing categories of one instrumented module.
/// Category order is the report's key order, which is why we need
/// an `IndexMap` and not a `HashMap` here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleTiming {
    /// categories keyed by name, in report order
    #[serde(flatten)]
    pub categories: IndexMap<String, CategoryTiming>,
    /// children modules, filled when the report was not flattened
    #[serde(default, rename = "sub", skip_serializing_if = "IndexMap::is_empty")]
    pub submodules: IndexMap<String, ModuleTiming>,
}

/// A whole profiling report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilingReport {
    /// per-module timing breakdowns, keyed by module name
    pub instruction_profiling: IndexMap<String, ModuleTiming>,
}

impl ProfilingReport {
    /// Load a profiling json file and deserialize it into a `ProfilingReport`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<ProfilingReport, io::Error> {
        let file = File::open(path)?;
        serde_json::from_reader(file).map_err(|e| io::Error::new(ErrorKind::InvalidData, e))
    }

    /// Find a module by name.
    /// Flat reports key modules by their full dotted name; nested reports
    /// store children under `sub`. We try the flat key first and fall back
    /// to walking the dotted path down the nesting.
    pub fn module(&self, name: &str) -> Result<&ModuleTiming, io::Error> {
        if let Some(module) = self.instruction_profiling.get(name) {
            return Ok(module);
        }
        let mut parts = name.split('.');
        let mut current = parts
            .next()
            .and_then(|top| self.instruction_profiling.get(top));
        for part in parts {
            current = current.and_then(|module| module.submodules.get(part));
        }
        current.ok_or_else(|| {
            io::Error::new(
                ErrorKind::NotFound,
                format!("no module named {} in profiling report", name),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_report() -> ProfilingReport {
        serde_json::from_str(
            r#"{"instruction_profiling": {"m": {"c1": {"time_segment_list":
                [{"start":0,"end":5}]}}}}"#,
        )
        .unwrap()
    }

    #[test]
    fn segments_become_start_duration_pairs() {
        let category = CategoryTiming {
            activity_time: 8.0,
            time_segment_list: vec![
                Segment { start: 2.0, end: 5.0 },
                Segment { start: 10.0, end: 15.0 },
            ],
        };
        assert_eq!(category.time_segments(), vec![(2.0, 3.0), (10.0, 5.0)]);
        assert!(category.time_segment_list.iter().all(|s| s.duration() >= 0.0));
    }

    #[test]
    fn example_document_parses() {
        let report = example_report();
        let module = report.module("m").unwrap();
        assert_eq!(module.categories.len(), 1);
        let (name, category) = module.categories.get_index(0).unwrap();
        assert_eq!(name, "c1");
        assert_eq!(category.time_segments(), vec![(0.0, 5.0)]);
    }

    #[test]
    fn category_order_follows_the_document() {
        let report: ProfilingReport = serde_json::from_str(
            r#"{"instruction_profiling": {"m": {
                "transport": {"time_segment_list": []},
                "computation": {"time_segment_list": []}
            }}}"#,
        )
        .unwrap();
        let names: Vec<&String> = report.module("m").unwrap().categories.keys().collect();
        assert_eq!(names, ["transport", "computation"]);
    }

    #[test]
    fn missing_module_is_not_found() {
        let report = example_report();
        let error = report.module("missing").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn dotted_names_walk_the_nesting() {
        let report: ProfilingReport = serde_json::from_str(
            r#"{"instruction_profiling": {"conv": {
                "computation": {"activity_time": 1.0, "time_segment_list": []},
                "sub": {"cim_compute": {
                    "computation": {"activity_time": 2.0,
                                    "time_segment_list": [{"start":1,"end":3}]}
                }}
            }}}"#,
        )
        .unwrap();
        let module = report.module("conv.cim_compute").unwrap();
        assert_eq!(module.categories["computation"].activity_time, 2.0);
    }

    #[test]
    fn flat_keys_win_over_nesting() {
        let report: ProfilingReport = serde_json::from_str(
            r#"{"instruction_profiling": {
                "a": {"sub": {"b": {"c": {"activity_time": 1.0}}}},
                "a.b": {"c": {"activity_time": 2.0}}
            }}"#,
        )
        .unwrap();
        assert_eq!(
            report.module("a.b").unwrap().categories["c"].activity_time,
            2.0
        );
    }

    #[test]
    fn malformed_json_is_invalid_data() {
        let path = std::env::temp_dir().join("profiling_charts_bad_report.json");
        std::fs::write(&path, "{not json").unwrap();
        let error = ProfilingReport::load(&path).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidData);
    }
}
