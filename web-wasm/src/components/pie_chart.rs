//! 円グラフ + 凡例コンポーネント（SVG）

use contract_analyzer_common::{pie_slices, ChartBucket, PieSlice};
use leptos::prelude::*;

const SIZE: f64 = 300.0;
const RADIUS: f64 = 100.0;

/// SVG要素は文字列で組み立てて `inner_html` で流し込む
///
/// ブラウザのパーサを通すので `<title>`（ホバー時のツールチップ）が
/// 確実にSVG名前空間の要素になる。
#[component]
pub fn PieChart(buckets: Vec<ChartBucket>, colors: Vec<&'static str>) -> impl IntoView {
    let center = SIZE / 2.0;
    let slices = pie_slices(&buckets, &colors, center, center, RADIUS);

    view! { <div class="pie-chart" inner_html=svg_markup(&slices, center) /> }
}

fn svg_markup(slices: &[PieSlice], center: f64) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#,
        size = SIZE
    );

    for slice in slices {
        let tooltip = escape_xml(&format!("{}: {}", slice.name, slice.value));
        match &slice.path {
            Some(d) => svg.push_str(&format!(
                r##"<path d="{}" fill="{}" stroke="#ffffff" stroke-width="1"><title>{}</title></path>"##,
                escape_xml(d),
                slice.color,
                tooltip
            )),
            None => svg.push_str(&format!(
                r#"<circle cx="{c}" cy="{c}" r="{r}" fill="{}"><title>{}</title></circle>"#,
                slice.color,
                tooltip,
                c = center,
                r = RADIUS
            )),
        }
    }

    for slice in slices {
        svg.push_str(&format!(
            r##"<text x="{:.1}" y="{:.1}" text-anchor="middle" dominant-baseline="middle" font-size="12" fill="#ffffff">{}</text>"##,
            slice.label_x, slice.label_y, slice.value
        ));
    }

    svg.push_str("</svg>");
    svg
}

/// 条項タイプ名などバックエンド由来の文字列をそのまま埋め込まない
fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// スクロールできる凡例（色・名前・件数）
#[component]
pub fn ChartLegend(buckets: Vec<ChartBucket>, colors: Vec<&'static str>) -> impl IntoView {
    view! {
        <div class="chart-legend">
            {buckets
                .into_iter()
                .zip(colors)
                .map(|(bucket, color)| {
                    view! {
                        <div class="legend-row">
                            <span class="legend-swatch" style=format!("background-color: {}", color) />
                            <span class="legend-label">{format!("{} ({})", bucket.name, bucket.value)}</span>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}
