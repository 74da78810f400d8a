//! End-to-end checks over a realistic `volk_profile` document.

use std::fs;
use volk_speedup::{
    analyze, AggregatorConfig, ChartRenderer, ComputationError, Error, SvgChart, TerminalChart,
};

const PROFILE: &str = r#"{
  "volk_tests": [
    {
      "name": "volk_32f_x2_add_32f",
      "vlen": 131071,
      "iter": 1987,
      "best_arch_a": "a_avx512f",
      "best_arch_u": "u_avx",
      "results": {
        "generic": {"name": "generic", "time": 100.0, "units": "ms"},
        "a_sse": {"name": "a_sse", "time": 40.0, "units": "ms"},
        "a_avx512f": {"name": "a_avx512f", "time": 20.0, "units": "ms"},
        "u_avx": {"name": "u_avx", "time": 25.0, "units": "ms"}
      }
    },
    {
      "name": "volk_32fc_s32fc_rotatorpuppet_32fc",
      "results": {
        "a_avx": {"name": "a_avx", "time": 12.0, "units": "ms"},
        "u_avx": {"name": "u_avx", "time": 13.0, "units": "ms"}
      }
    },
    {
      "name": "volk_8ic_deinterleave_16i_x2",
      "results": {
        "u_generic": {"name": "u_generic", "time": 8.0, "units": "ms"},
        "u_orc": {"name": "u_orc", "time": 12.0, "units": "ms"}
      }
    },
    {
      "name": "volk_32u_popcnt",
      "results": {
        "generic": {"name": "generic", "time": 3.0, "units": "ms"}
      }
    }
  ]
}"#;

fn write_profile(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("volk_results.json");
    fs::write(&path, PROFILE).unwrap();
    path
}

#[test]
fn pipeline_filters_and_orders() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_profile(&dir);

    let speedups = analyze(&path, &AggregatorConfig::default()).unwrap();
    let names: Vec<_> = speedups.iter().map(|s| s.display_name.as_str()).collect();
    assert_eq!(names, ["32f_x2_add_32f", "8ic_deinterleave_16i_x2"]);

    assert_eq!(speedups[0].ratio, 0.2);
    assert_eq!(speedups[0].best_variant, "a_avx512f");
    assert_eq!(speedups[1].ratio, 1.5);
    assert_eq!(speedups[1].baseline_key, "u_generic");
}

#[test]
fn pipeline_strict_policy_rejects_baseline_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_profile(&dir);

    let err = analyze(&path, &AggregatorConfig::strict()).unwrap_err();
    match err {
        Error::Computation(ComputationError::NoSpecializedVariants { name, baseline }) => {
            assert_eq!(name, "volk_32u_popcnt");
            assert_eq!(baseline, "generic");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn pipeline_renders_both_charts() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_profile(&dir);
    let speedups = analyze(&path, &AggregatorConfig::default()).unwrap();

    let svg = SvgChart::default().render(&speedups);
    assert_eq!(svg.matches("class=\"bar\"").count(), 2);

    let text = TerminalChart::default().render(&speedups);
    assert_eq!(text.lines().count(), 4);
    assert!(text.contains("0.200"));
    assert!(text.contains("1.500"));
}
