//! Dashboard page assembly.
//!
//! The template is plain HTML with `{{NAME}}` tokens; every value substituted
//! into it is escaped here.

use crate::pipeline::DashboardContext;
use crate::stats::ColumnProfile;
use serde_json::Value;
use std::fmt::Write;

const TEMPLATE: &str = include_str!("../../templates/dashboard.html");

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn format_stat(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.2}", v)
    }
}

/// Descriptive statistics table: one column per numeric field, one row per statistic.
pub fn render_stats_table(profiles: &[ColumnProfile]) -> String {
    let mut html = String::from("<table class=\"table\">\n<thead>\n<tr><th></th>");
    for p in profiles {
        let _ = write!(html, "<th>{}</th>", escape_html(&p.column));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for (i, label) in ColumnProfile::ROW_LABELS.iter().enumerate() {
        let _ = write!(html, "<tr><th>{}</th>", label);
        for p in profiles {
            let _ = write!(html, "<td>{}</td>", format_stat(p.values()[i]));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>");
    html
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => escape_html(s),
        Some(other) => escape_html(&other.to_string()),
    }
}

/// Full data table in declared column order.
pub fn render_data_table(ctx: &DashboardContext) -> String {
    let mut html = String::from("<table class=\"table\">\n<thead>\n<tr>");
    for column in &ctx.columns {
        let _ = write!(html, "<th>{}</th>", escape_html(column));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for record in &ctx.records {
        html.push_str("<tr>");
        for column in &ctx.columns {
            let _ = write!(html, "<td>{}</td>", cell_text(record.get(column)));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>");
    html
}

fn render_years(years: &[i64]) -> String {
    years
        .iter()
        .map(|y| format!("<span>{}</span>", y))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_dashboard(ctx: &DashboardContext) -> String {
    TEMPLATE
        .replace("{{TOTAL_ROWS}}", &ctx.summary.total_rows.to_string())
        .replace("{{TOTAL_COLS}}", &ctx.summary.total_cols.to_string())
        .replace("{{TOTAL_KAB}}", &ctx.summary.total_regions.to_string())
        .replace("{{TAHUN}}", &render_years(&ctx.summary.years))
        .replace("{{STATISTIK}}", &ctx.stats_table)
        .replace("{{DATA_TABLE}}", &render_data_table(ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::RecordingBackend;
    use crate::config::DashboardConfig;
    use crate::pipeline::bootstrap_with;
    use crate::stats::StatsCalculator;
    use crate::testutil::{scratch_dir, write_csv};

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b>"A" & 'B'</b>"#),
            "&lt;b&gt;&quot;A&quot; &amp; &#39;B&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn stats_table_layout() {
        let profiles = vec![StatsCalculator::profile("jumlah", &[10.0, 20.0, 30.0])];
        let html = render_stats_table(&profiles);
        assert!(html.contains("<th>jumlah</th>"));
        assert!(html.contains("<tr><th>count</th><td>3.00</td></tr>"));
        assert!(html.contains("<tr><th>mean</th><td>20.00</td></tr>"));
        assert!(html.contains("<tr><th>max</th><td>30.00</td></tr>"));
    }

    #[test]
    fn undefined_std_prints_nan() {
        let profiles = vec![StatsCalculator::profile("x", &[5.0])];
        assert!(render_stats_table(&profiles).contains("<tr><th>std</th><td>NaN</td></tr>"));
    }

    #[test]
    fn dashboard_fills_every_token() {
        let config = DashboardConfig {
            data_path: write_csv(
                "page-dashboard",
                "nama_kabupaten_kota,tahun,jumlah_penderita_dm\nKOTA <X>,2019,12\nKOTA Y,2020,7\n",
            ),
            static_dir: scratch_dir("page-dashboard-static"),
            ..DashboardConfig::default()
        };
        let ctx = bootstrap_with(&config, &RecordingBackend::default()).unwrap();
        let html = render_dashboard(&ctx);

        assert!(!html.contains("{{"));
        assert!(html.contains("<span>2019</span> <span>2020</span>"));
        assert!(html.contains("<td>KOTA &lt;X&gt;</td><td>2019</td><td>12</td>"));
        assert!(html.contains("/static/pie.png"));
    }
}
