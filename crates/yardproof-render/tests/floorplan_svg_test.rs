use yardproof_core::{Category, Dimensions, LayoutSpec, ProductRecord, build_spec};
use yardproof_render::{
    FillTheme, RenderOptions, ThemeSource, render_batch, render_floorplan_svg,
};

fn spec_for(name: &str, setup: (f64, f64)) -> LayoutSpec {
    let record = ProductRecord {
        id: 1,
        name: name.to_string(),
        category: Category::BounceHouse,
        setup_area: Some(Dimensions::new(setup.0, setup.1, Some(15.0))),
        actual_size: Some(Dimensions::new(13.0, 13.0, Some(15.0))),
    };
    build_spec(&record).expect("complete record")
}

#[test]
fn princess_castle_renders_pink_with_dimension_callouts() {
    let spec = spec_for("Titanic Princess Castle", (20.0, 20.0));
    let svg = render_floorplan_svg(&spec, &RenderOptions::default()).expect("render ok");

    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="900" height="900" viewBox="0 0 900 900">"#));
    assert!(svg.contains(&format!("stop-color:{}", FillTheme::Princess.color())));
    assert!(svg.contains(r#"class="dim">20.0 ft</text>"#));
    assert!(svg.contains(r#"transform="rotate(90 865,450)">20.0 ft</text>"#));
    assert!(svg.contains(r#"class="label">400 sq ft</text>"#));
    assert!(svg.contains(r#"class="title">Titanic Princess Castle</text>"#));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn features_land_on_the_mapped_coordinates() {
    let spec = spec_for("Big Red Castle", (24.0, 18.0));
    let svg = render_floorplan_svg(&spec, &RenderOptions::default()).expect("render ok");

    for (x, y) in [("172.8", "199.2"), ("727.2", "199.2"), ("172.8", "700.8"), ("727.2", "700.8")] {
        assert!(
            svg.contains(&format!(r#"<circle cx="{x}" cy="{y}" r="24""#)),
            "missing anchor at {x},{y}"
        );
    }
    for x in ["351", "549"] {
        assert!(svg.contains(&format!(r##"<circle cx="{x}" cy="118" r="8" fill="#333"/>"##)));
    }
    assert_eq!(svg.matches("Blower Connection").count(), 1);
    assert!(svg.contains(r#"<rect class="ramp" x="360" y="780" width="180" height="70""#));
    assert!(svg.contains(r#"y="755" text-anchor="middle" class="label">Entrance / Exit</text>"#));
    assert!(svg.contains(r#"class="dim">24.0 ft</text>"#));
    assert!(svg.contains(">18.0 ft</text>"));
}

#[test]
fn elements_are_emitted_in_fixed_order() {
    let spec = spec_for("Shark Bouncer", (15.0, 15.0));
    let svg = render_floorplan_svg(&spec, &RenderOptions::default()).expect("render ok");
    let order = [
        r#"class="background""#,
        r#"class="title""#,
        "Setup Area Required",
        r#"class="footprint""#,
        "Jumping Area",
        "15.0 ft",
        r#"transform="rotate(90"#,
        r#"<g class="blower-pipes">"#,
        r#"<g class="anchors">"#,
        r#"class="ramp""#,
        "Entrance / Exit",
        "Anchor Points",
    ];
    let positions: Vec<usize> = order
        .iter()
        .map(|needle| svg.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    assert!(svg.contains(&format!("stop-color:{}", FillTheme::Character.color())));
}

#[test]
fn optional_features_are_skipped_when_absent() {
    let mut spec = spec_for("Plain Castle", (10.0, 10.0));
    spec.ramp = None;
    spec.entrance = None;
    spec.blower_pipes.clear();
    spec.anchors.clear();
    let svg = render_floorplan_svg(&spec, &RenderOptions::default()).expect("render ok");
    assert!(!svg.contains("Blower Connection"));
    assert!(!svg.contains(r#"class="ramp""#));
    assert!(!svg.contains("Entrance / Exit"));
    assert!(!svg.contains(r#"<g class="anchors">"#));
    assert!(svg.contains(&format!("stop-color:{}", FillTheme::Standard.color())));
}

#[test]
fn rendering_is_byte_stable() {
    let spec = spec_for("Frozen Castle Jump!", (17.5, 16.0));
    let a = render_floorplan_svg(&spec, &RenderOptions::default()).expect("render ok");
    let b = render_floorplan_svg(&spec.clone(), &RenderOptions::default()).expect("render ok");
    assert_eq!(a, b);
}

#[test]
fn names_are_escaped_in_markup() {
    let spec = spec_for("Tom & Jerry <XL> Castle", (10.0, 10.0));
    let svg = render_floorplan_svg(&spec, &RenderOptions::default()).expect("render ok");
    assert!(svg.contains("Tom &amp; Jerry &lt;XL&gt; Castle"));
    assert!(!svg.contains("<XL>"));
}

#[test]
fn spec_theme_is_ignored_unless_requested() {
    let mut spec = spec_for("Big Red Castle", (10.0, 10.0));
    spec.theme = "sports".to_string();

    let by_name = render_floorplan_svg(&spec, &RenderOptions::default()).expect("render ok");
    assert!(by_name.contains(FillTheme::Standard.color()));

    let options = RenderOptions {
        theme_source: ThemeSource::Spec,
    };
    let by_spec = render_floorplan_svg(&spec, &options).expect("render ok");
    assert!(by_spec.contains(FillTheme::Sports.color()));
}

#[test]
fn invalid_specs_fail_alone_in_a_batch() {
    let good = spec_for("Good Castle", (10.0, 10.0));
    let mut zero = spec_for("Zero Castle", (10.0, 10.0));
    zero.width_ft = 0.0;
    let mut stray = spec_for("Stray Anchor Castle", (10.0, 10.0));
    stray.anchors[2].y_pct = 1.5;
    let last = spec_for("Last Castle", (12.0, 12.0));

    let report = render_batch([&good, &zero, &stray, &last], &RenderOptions::default());
    assert_eq!(report.attempted(), 4);
    let rendered: Vec<&str> = report.rendered.iter().map(|r| r.slug.as_str()).collect();
    assert_eq!(rendered, ["good-castle", "last-castle"]);
    let failed: Vec<&str> = report.failed.iter().map(|f| f.source.as_str()).collect();
    assert_eq!(failed, ["zero-castle", "stray-anchor-castle"]);
    assert!(report.failed[0].message.contains("width_ft"));
    assert!(report.failed[1].message.contains("anchors[2]"));
}

#[test]
fn render_options_follow_config() {
    use yardproof_core::PipelineConfig;

    let theme_source = |json: &str| {
        let cfg = PipelineConfig::from_json_str(json).expect("config json");
        RenderOptions::from_config(&cfg).map(|opts| opts.theme_source)
    };
    assert_eq!(theme_source("{}").expect("defaults"), ThemeSource::Name);
    assert_eq!(
        theme_source(r#"{ "render": { "themeSource": "spec" } }"#).expect("spec"),
        ThemeSource::Spec
    );
    assert!(theme_source(r#"{ "render": { "themeSource": "palette" } }"#).is_err());
}
