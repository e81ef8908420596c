use super::views::NetworkMean;
use crate::error::{PipelineError, Result};
use crate::transform::ApprovalTable;
use chrono::Local;
use maud::{html, PreEscaped, DOCTYPE};
use plotly::{
    color::NamedColor,
    common::{Font, TextPosition, TickMode, Title},
    layout::{Axis, BarMode, Layout, Legend},
    Bar, Plot,
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

/// plotly.js is referenced from the CDN, never bundled into the document.
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.12.1.min.js";

pub const MUNICIPALITY_CHART_FILE: &str = "grafico_municipios.html";
pub const NETWORK_MEAN_CHART_FILE: &str = "grafico_media.html";

pub const MUNICIPALITY_CHART_TITLE: &str =
    "Taxa de Aprovação por Município (2017–2021) - Rede Pública";
pub const NETWORK_MEAN_CHART_TITLE: &str =
    "Evolução da Taxa de Aprovação por Rede de Ensino (2017–2021)";

/// One colour series of a grouped bar chart.
struct Series {
    name: String,
    x: Vec<i32>,
    y: Vec<f64>,
}

/// Group points into series by name, series in first-appearance order.
fn collect_series(points: impl IntoIterator<Item = (String, i32, f64)>) -> Vec<Series> {
    let mut series: Vec<Series> = Vec::new();
    for (name, x, y) in points {
        let idx = match series.iter().position(|s| s.name == name) {
            Some(i) => i,
            None => {
                series.push(Series {
                    name,
                    x: Vec::new(),
                    y: Vec::new(),
                });
                series.len() - 1
            }
        };
        series[idx].x.push(x);
        series[idx].y.push(y);
    }
    series
}

fn grouped_bar_chart(
    series: Vec<Series>,
    title: &str,
    y_title: &str,
    legend_title: &str,
    years: &[i32],
) -> Plot {
    let mut plot = Plot::new();
    for s in series {
        let text: Vec<String> = s.y.iter().map(|v| format!("{:.1}", v)).collect();
        let trace = Bar::new(s.x, s.y)
            .name(&s.name)
            .text_array(text)
            .text_position(TextPosition::Auto);
        plot.add_trace(trace);
    }

    let tick_values: Vec<f64> = years.iter().map(|&y| f64::from(y)).collect();
    let layout = Layout::new()
        .title(Title::with_text(title).x(0.5).font(Font::new().size(18)))
        .bar_mode(BarMode::Group)
        .paper_background_color(NamedColor::White)
        .plot_background_color(NamedColor::White)
        .x_axis(
            Axis::new()
                .tick_mode(TickMode::Array)
                .tick_values(tick_values)
                .show_line(true)
                .show_grid(false),
        )
        .y_axis(
            Axis::new()
                .title(Title::with_text(y_title))
                .show_line(true)
                .show_grid(false),
        )
        .legend(Legend::new().title(Title::with_text(legend_title)));
    plot.set_layout(layout);
    plot
}

/// Grouped bars of the public-network rate per municipality, one series per
/// municipality, x ticks fixed at `years`.
pub fn render_municipality_chart(view: &ApprovalTable, years: &[i32]) -> Plot {
    let points = view
        .records()
        .into_iter()
        .filter_map(|r| r.rate.map(|rate| (r.municipality, r.year, rate)));
    grouped_bar_chart(
        collect_series(points),
        MUNICIPALITY_CHART_TITLE,
        "Taxa de Aprovação (%)",
        "Município",
        years,
    )
}

/// Grouped bars of the mean rate per network, one series per network.
pub fn render_network_mean_chart(means: &[NetworkMean], years: &[i32]) -> Plot {
    let points = means
        .iter()
        .map(|m| (m.network.clone(), m.year, m.mean_rate));
    grouped_bar_chart(
        collect_series(points),
        NETWORK_MEAN_CHART_TITLE,
        "Taxa de Aprovação Média (%)",
        "Rede",
        years,
    )
}

/// Standalone HTML page embedding `plot`, with plotly.js loaded from the CDN.
pub fn render_document(plot: &Plot, title: &str) -> String {
    let generated = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    html! {
        (DOCTYPE)
        html lang="pt-BR" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(PLOTLY_CDN) charset="utf-8" {}
            }
            body style="margin: 0; font-family: Arial, sans-serif;" {
                div style="width: 100%; height: 90vh;" {
                    (PreEscaped(plot.to_inline_html(Some("approval-chart"))))
                }
                footer style="font-size: 12px; color: #888; text-align: center;" {
                    "Gerado em " (generated)
                }
            }
        }
    }
    .into_string()
}

/// Write `plot` as a standalone document at `path`, creating parent
/// directories as needed.
pub fn write_chart_document(plot: &Plot, title: &str, path: &Path) -> Result<PathBuf> {
    let write_err = |source| PipelineError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, render_document(plot, title)).map_err(write_err)?;
    info!(path = %path.display(), "interactive chart exported");
    Ok(path.to_path_buf())
}
