// src/bin/dashboard.rs
//
// Terminal dashboard: mounts every widget against a running API and logs
// each widget's rendering whenever its state changes. Lines typed on stdin
// drive the header search box.

use std::time::Instant;

use tokio::sync::{mpsc, watch};
use tracing::info;

use rootcabs_api::client::{widgets, Mounted, ViewState};
use rootcabs_api::fallback;
use rootcabs_api::search::{self, SearchBox};
use rootcabs_api::models::{
    Driver, EarningsSummary, HourlyDemandPoint, LiveRide, MetricsSnapshot, PopularLocation,
    WeeklyRevenuePoint,
};

fn spawn_renderer<T>(name: &'static str, mut rx: watch::Receiver<ViewState<T>>, render: fn(&ViewState<T>) -> Vec<String>)
where
    T: Send + Sync + 'static,
{
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let lines = render(&rx.borrow_and_update());
            info!(widget = name, "\n{}", lines.join("\n"));
        }
    });
}

fn show<T>(name: &'static str, mounted: &Mounted<T>, render: fn(&ViewState<T>) -> Vec<String>)
where
    T: Clone + Send + Sync + 'static,
{
    spawn_renderer(name, mounted.subscribe(), render);
}

/// Reads search input from stdin, one line per keystroke or query, and logs
/// the result list plus any section to highlight.
fn spawn_search_prompt() {
    let (tx, mut rx) = mpsc::channel::<String>(16);
    // blocking reads stay off the runtime; the thread is never joined
    std::thread::spawn(move || {
        for line in std::io::stdin().lines().map_while(Result::ok) {
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });

    tokio::spawn(async move {
        let mut search_box = SearchBox::new();
        while let Some(line) = rx.recv().await {
            let highlight = search_box.apply(search::parse_input(&line), Instant::now());
            info!(query = search_box.query(), "\n{}", search_box.render().join("\n"));
            if let Some(h) = highlight {
                info!(anchor = h.anchor, secs = search::HIGHLIGHT_FOR.as_secs(), "highlighting section");
            }
        }
    });
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    rootcabs_api::init_tracing();

    let base = std::env::var("API_BASE").unwrap_or_else(|_| "http://127.0.0.1:5000".into());
    let client = reqwest::Client::builder().build()?;
    info!(%base, "mounting dashboard widgets");

    // the metric cards start from the sample figures and never show an error
    let metrics: Mounted<MetricsSnapshot> = widgets::METRICS.binder(&client, &base).initial(fallback::metrics()).mount();
    let earnings: Mounted<EarningsSummary> = widgets::EARNINGS.binder(&client, &base).mount();
    let drivers: Mounted<Vec<Driver>> = widgets::DRIVERS.binder(&client, &base).mount();
    let rides: Mounted<Vec<LiveRide>> = widgets::LIVE_RIDES.binder(&client, &base).mount();
    let locations: Mounted<Vec<PopularLocation>> = widgets::LOCATIONS.binder(&client, &base).mount();
    let revenue: Mounted<Vec<WeeklyRevenuePoint>> = widgets::WEEKLY_REVENUE.binder(&client, &base).mount();
    let hourly: Mounted<Vec<HourlyDemandPoint>> = widgets::HOURLY_DEMAND.binder(&client, &base).mount();

    show(widgets::METRICS.name, &metrics, widgets::render_metrics);
    show(widgets::EARNINGS.name, &earnings, widgets::render_earnings);
    show(widgets::DRIVERS.name, &drivers, widgets::render_drivers);
    show(widgets::LIVE_RIDES.name, &rides, widgets::render_live_rides);
    show(widgets::LOCATIONS.name, &locations, widgets::render_locations);
    show(widgets::WEEKLY_REVENUE.name, &revenue, widgets::render_weekly_revenue);
    show(widgets::HOURLY_DEMAND.name, &hourly, widgets::render_hourly_demand);
    spawn_search_prompt();

    tokio::signal::ctrl_c().await?;
    info!("unmounting");
    drop((metrics, earnings, drivers, rides, locations, revenue, hourly));
    Ok(())
}
