//! Standalone SVG export of a [`Scene`].

use crate::classify::FALLBACK_COLOR;
use crate::labels::LabelKind;
use crate::sales::format_price;
use crate::scene::{Focus, Scene};

const BACKGROUND: &str = "#f7f9fb";
const STROKE: &str = "#ffffff";
const STROKE_EMPHASIS: &str = "#263238";
const TEXT: &str = "#37474f";

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

/// Renders the map, its labels and a legend strip under the map.
pub fn render_scene(scene: &Scene, focus: Focus<'_>) -> String {
    let w = scene.frame.view_width();
    let map_h = scene.frame.view_height();
    let legend_h = 28.0;
    let h = map_h + legend_h;
    let mut s = String::with_capacity(64 << 10);

    s.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
  <title>Average price per province – auction {}</title>
  <rect width="{w}" height="{h}" fill="{BACKGROUND}"/>
"#,
        escape(&scene.auction_id)
    ));

    s.push_str("  <g stroke-linejoin=\"round\">\n");
    for r in &scene.regions {
        let style = scene.style(r, focus);
        let (stroke, width) = if style.emphasized { (STROKE_EMPHASIS, 2.0) } else { (STROKE, 1.0) };
        s.push_str(&format!(
            "    <path id=\"{}\" d=\"{}\" fill=\"{}\" fill-opacity=\"{:.2}\" fill-rule=\"evenodd\" stroke=\"{stroke}\" stroke-width=\"{width}\"/>\n",
            escape(&r.region.id),
            r.region.shape.svg_path(),
            style.fill,
            style.opacity,
        ));
    }
    s.push_str("  </g>\n");

    s.push_str(&format!("  <g font-family=\"sans-serif\" text-anchor=\"middle\" fill=\"{TEXT}\">\n"));
    for r in &scene.regions {
        for line in &r.label.lines {
            let weight = match line.kind {
                LabelKind::Name => "bold",
                LabelKind::Metric => "normal",
            };
            s.push_str(&format!(
                "    <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"{}\" font-weight=\"{weight}\">{}</text>\n",
                line.x,
                line.y,
                line.font_size,
                escape(&line.text)
            ));
        }
    }
    s.push_str("  </g>\n");

    s.push_str(&legend(scene, map_h, w));
    s.push_str("</svg>\n");
    s
}

fn legend(scene: &Scene, top: f64, width: f64) -> String {
    let mut s = String::new();
    let y = top + 6.0;
    s.push_str(&format!("  <g font-family=\"sans-serif\" font-size=\"10\" fill=\"{TEXT}\">\n"));
    if scene.legend.is_empty() {
        s.push_str(&format!(
            "    <rect x=\"10\" y=\"{y}\" width=\"14\" height=\"14\" fill=\"{FALLBACK_COLOR}\"/><text x=\"30\" y=\"{:.1}\">No price data</text>\n",
            y + 11.0
        ));
    } else {
        let step = (width - 20.0) / scene.legend.len() as f64;
        for (i, band) in scene.legend.iter().enumerate() {
            let x = 10.0 + step * i as f64;
            s.push_str(&format!(
                "    <rect x=\"{x:.1}\" y=\"{y}\" width=\"14\" height=\"14\" fill=\"{}\"/><text x=\"{:.1}\" y=\"{:.1}\">{}</text>\n",
                band.color,
                x + 18.0,
                y + 11.0,
                escape(&format!("{:.0}–{:.0}", band.from, band.to))
            ));
        }
    }
    s.push_str("  </g>\n");
    if let Some((min, max)) = scene.scale.range() {
        s.push_str(&format!(
            "  <desc>Price range {} to {}</desc>\n",
            escape(&format_price(min)),
            escape(&format_price(max))
        ));
    }
    s
}
