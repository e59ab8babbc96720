use crate::frame::CanvasFrame;
use crate::{Error, RenderOptions, Result};
use std::fmt::Write as _;
use yardproof_core::LayoutSpec;

const RAMP_TAB_WIDTH: f64 = 180.0;
const RAMP_TAB_HEIGHT: f64 = 70.0;
const DIM_LINE_OFFSET: f64 = 50.0;

const STYLE: &str = r#"<style>
.title { font: bold 32px Arial, sans-serif; fill: #111; }
.dim { font: bold 28px Arial, sans-serif; fill: #111; }
.label { font: 26px Arial, sans-serif; fill: #fff; }
.small { font: 22px Arial, sans-serif; fill: #111; }
.tiny { font: 18px Arial, sans-serif; fill: #666; }
</style>
"#;

const ARROW_MARKER: &str = r##"<marker id="arrow" markerWidth="10" markerHeight="10" refX="7" refY="3" orient="auto"><path d="M0,0 L7,3 L0,6 Z" fill="#111"/></marker>
"##;

/// Renders one layout spec as a self-contained SVG floorplan.
///
/// The footprint always fills the same 900×900 frame; real-world size is conveyed by the
/// dimension call-outs only. Output is byte-stable for equal input.
pub fn render_floorplan_svg(spec: &LayoutSpec, options: &RenderOptions) -> Result<String> {
    validate(spec)?;

    let frame = CanvasFrame::default();
    let fill = options.theme_source.resolve(spec.title(), &spec.theme).color();
    let (w, h) = (frame.width, frame.height);
    let (box_x, box_y) = (frame.box_x(), frame.box_y());
    let (box_w, box_h) = (frame.box_width(), frame.box_height());
    let (cx, cy) = (frame.center_x(), frame.center_y());

    let mut out = String::new();
    let _ = writeln!(
        &mut out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        fmt(w),
        fmt(h),
        fmt(w),
        fmt(h)
    );
    let _ = writeln!(&mut out, "<title>{}</title>", escape_xml(spec.title()));
    out.push_str("<defs>\n");
    out.push_str(STYLE);
    out.push_str(ARROW_MARKER);
    let _ = writeln!(
        &mut out,
        r#"<linearGradient id="grad" x1="0%" y1="0%" x2="0%" y2="100%"><stop offset="0%" style="stop-color:{fill};stop-opacity:1"/><stop offset="100%" style="stop-color:{fill};stop-opacity:0.7"/></linearGradient>"#
    );
    out.push_str("</defs>\n");

    let _ = writeln!(
        &mut out,
        r##"<rect class="background" width="{}" height="{}" fill="#f9fafb"/>"##,
        fmt(w),
        fmt(h)
    );
    text(&mut out, cx, 50.0, "title", &escape_xml(spec.title()));
    text(&mut out, cx, 80.0, "tiny", "Setup Area Required");

    let _ = writeln!(
        &mut out,
        r##"<rect class="footprint" x="{}" y="{}" width="{}" height="{}" rx="12" fill="url(#grad)" stroke="#111" stroke-width="5"/>"##,
        fmt(box_x),
        fmt(box_y),
        fmt(box_w),
        fmt(box_h)
    );
    text(&mut out, cx, cy - 20.0, "label", "Jumping Area");
    text(
        &mut out,
        cx,
        cy + 15.0,
        "label",
        &format!("{:.0} sq ft", spec.setup_area_sq_ft),
    );

    // Top call-out: setup width.
    let top_y = box_y - DIM_LINE_OFFSET;
    dimension_line(&mut out, box_x, top_y, frame.box_right(), top_y);
    text(
        &mut out,
        cx,
        box_y - 65.0,
        "dim",
        &format!("{:.1} ft", spec.width_ft),
    );

    // Right call-out: setup height, rotated to run along the edge.
    let right_x = frame.box_right() + DIM_LINE_OFFSET;
    dimension_line(&mut out, right_x, box_y, right_x, frame.box_bottom());
    let label_x = frame.box_right() + 85.0;
    let _ = writeln!(
        &mut out,
        r#"<text x="{}" y="{}" text-anchor="middle" class="dim" transform="rotate(90 {},{})">{:.1} ft</text>"#,
        fmt(label_x),
        fmt(cy),
        fmt(label_x),
        fmt(cy),
        spec.height_ft
    );

    if !spec.blower_pipes.is_empty() {
        out.push_str(r#"<g class="blower-pipes">"#);
        out.push('\n');
        for pipe in &spec.blower_pipes {
            let (x, _) = frame.px(pipe.x_pct, 0.0);
            let _ = writeln!(
                &mut out,
                r##"<rect x="{}" y="{}" width="40" height="40" rx="4" fill="#7aa7d8" stroke="#111" stroke-width="3"/>"##,
                fmt(x - 20.0),
                fmt(box_y - 22.0)
            );
            let _ = writeln!(
                &mut out,
                r##"<circle cx="{}" cy="{}" r="8" fill="#333"/>"##,
                fmt(x),
                fmt(box_y - 2.0)
            );
        }
        text(&mut out, cx, box_y - 30.0, "small", "Blower Connection");
        out.push_str("</g>\n");
    }

    if !spec.anchors.is_empty() {
        out.push_str(r#"<g class="anchors">"#);
        out.push('\n');
        for anchor in &spec.anchors {
            let (x, y) = frame.px(anchor.x_pct, anchor.y_pct);
            let _ = writeln!(
                &mut out,
                r##"<circle cx="{x}" cy="{y}" r="24" fill="#d62424" stroke="#111" stroke-width="3"/><circle cx="{x}" cy="{y}" r="12" fill="none" stroke="#fff" stroke-width="2.5"/>"##,
                x = fmt(x),
                y = fmt(y)
            );
        }
        out.push_str("</g>\n");
    }

    if let Some(ramp) = &spec.ramp {
        let _ = writeln!(
            &mut out,
            r##"<rect class="ramp" x="{}" y="{}" width="{}" height="{}" rx="6" fill="#7aa7d8" stroke="#111" stroke-width="3"/>"##,
            fmt(cx - RAMP_TAB_WIDTH / 2.0),
            fmt(frame.box_bottom()),
            fmt(RAMP_TAB_WIDTH),
            fmt(RAMP_TAB_HEIGHT)
        );
        text(
            &mut out,
            cx,
            frame.box_bottom() + 45.0,
            "small",
            &escape_xml(&ramp.label),
        );
    }

    if let Some(entrance) = &spec.entrance {
        text(
            &mut out,
            cx,
            frame.box_bottom() - 25.0,
            "label",
            &escape_xml(&entrance.label),
        );
    }

    text(
        &mut out,
        cx,
        h - 30.0,
        "tiny",
        "\u{1F534} Anchor Points  \u{26A1} Requires continuous blower power",
    );

    out.push_str("</svg>\n");
    Ok(out)
}

fn validate(spec: &LayoutSpec) -> Result<()> {
    let invalid = |message: String| Error::InvalidSpec {
        slug: spec.slug.clone(),
        message,
    };

    if spec.slug.trim().is_empty() {
        return Err(invalid("slug is empty".to_string()));
    }
    for (field, value) in [
        ("width_ft", spec.width_ft),
        ("height_ft", spec.height_ft),
        ("setup_area_sq_ft", spec.setup_area_sq_ft),
    ] {
        if !(value.is_finite() && value > 0.0) {
            return Err(invalid(format!("{field} must be a positive number, got {value}")));
        }
    }

    let in_unit = |v: f64| (0.0..=1.0).contains(&v);
    for (idx, pipe) in spec.blower_pipes.iter().enumerate() {
        if !in_unit(pipe.x_pct) {
            return Err(invalid(format!(
                "blower_pipes[{idx}].x_pct {} is outside [0, 1]",
                pipe.x_pct
            )));
        }
    }
    for (idx, anchor) in spec.anchors.iter().enumerate() {
        if !(in_unit(anchor.x_pct) && in_unit(anchor.y_pct)) {
            return Err(invalid(format!(
                "anchors[{idx}] ({}, {}) is outside [0, 1]",
                anchor.x_pct, anchor.y_pct
            )));
        }
    }
    Ok(())
}

fn text(out: &mut String, x: f64, y: f64, class: &str, body: &str) {
    let _ = writeln!(
        out,
        r#"<text x="{}" y="{}" text-anchor="middle" class="{class}">{body}</text>"#,
        fmt(x),
        fmt(y)
    );
}

fn dimension_line(out: &mut String, x1: f64, y1: f64, x2: f64, y2: f64) {
    let _ = writeln!(
        out,
        r##"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="#111" stroke-width="4" marker-start="url(#arrow)" marker-end="url(#arrow)"/>"##,
        fmt(x1),
        fmt(y1),
        fmt(x2),
        fmt(y2)
    );
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

fn fmt(v: f64) -> String {
    // Shortest round-trippable form, without `-0` or float noise from our own arithmetic.
    if !v.is_finite() {
        return "0".to_string();
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}
