//! Power-analysis plot rendering.

use abplan::{
    render_power_plot, render_power_plot_with, Hypothesis, PlotConfig, PlotError,
    VisualParameters, PNG_SIGNATURE,
};

fn small() -> PlotConfig {
    PlotConfig::new().with_size(480, 240).with_resolution(240)
}

#[test]
fn default_plot_has_png_signature() {
    let png = render_power_plot(&VisualParameters::default()).unwrap();
    assert!(!png.is_empty());
    assert_eq!(&png.as_bytes()[..8], &PNG_SIGNATURE);
}

#[test]
fn png_header_carries_configured_size() {
    let png = render_power_plot_with(&VisualParameters::default(), &small())
        .unwrap()
        .into_bytes();
    // IHDR is the first chunk: 8-byte signature, 4-byte length, "IHDR".
    assert_eq!(&png[12..16], b"IHDR");
    let width = u32::from_be_bytes([png[16], png[17], png[18], png[19]]);
    let height = u32::from_be_bytes([png[20], png[21], png[22], png[23]]);
    assert_eq!((width, height), (480, 240));
}

#[test]
fn renders_across_baselines_and_effects() {
    for baseline in [0.5, 10.0, 50.0, 99.5] {
        for mde in [0.1, 5.0, 20.0, 150.0] {
            for hypothesis in [Hypothesis::OneSided, Hypothesis::TwoSided] {
                let params = VisualParameters::new(baseline, mde).with_hypothesis(hypothesis);
                let png = render_power_plot_with(&params, &small())
                    .unwrap_or_else(|e| panic!("baseline={baseline} mde={mde}: {e}"));
                assert!(png.is_png());
            }
        }
    }
}

#[test]
fn sidedness_changes_the_image() {
    let one = render_power_plot_with(&VisualParameters::default(), &small()).unwrap();
    let two = render_power_plot_with(
        &VisualParameters::default().with_hypothesis(Hypothesis::TwoSided),
        &small(),
    )
    .unwrap();
    assert_ne!(one, two);
}

#[test]
fn minimal_style_renders() {
    let config = small().minimal();
    let png = render_power_plot_with(&VisualParameters::default(), &config).unwrap();
    assert!(png.is_png());
}

#[test]
fn invalid_style_is_rejected() {
    let mut config = small();
    config.alt_color = "turquoise".into();
    let err = render_power_plot_with(&VisualParameters::default(), &config).unwrap_err();
    assert!(matches!(err, PlotError::InvalidStyle(_)), "{err}");
}

#[test]
fn degenerate_baseline_is_rejected() {
    let err = render_power_plot(&VisualParameters::new(100.0, 20.0)).unwrap_err();
    assert!(matches!(err, PlotError::Plan(_)), "{err}");
}

#[test]
fn write_to_file() {
    let png = render_power_plot_with(&VisualParameters::default(), &small()).unwrap();
    let path = std::env::temp_dir().join(format!("abplan-plot-{}.png", std::process::id()));
    png.write_to(&path).unwrap();
    let on_disk = std::fs::read(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(on_disk, png.as_bytes());
}
