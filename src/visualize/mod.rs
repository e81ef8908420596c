// src/visualize/mod.rs

pub mod chart;
pub mod views;

pub use chart::{
    render_document, render_municipality_chart, render_network_mean_chart, write_chart_document,
    MUNICIPALITY_CHART_FILE, NETWORK_MEAN_CHART_FILE, PLOTLY_CDN,
};
pub use views::{municipality_view, network_means, NetworkMean};
