use std::{path::PathBuf, sync::Arc, time::Duration};

use tokio::task::JoinSet;
use tracing::{info, warn};

use imgserve_core::Server;
use imgserve_model::{Image, Params, SOURCE_PARAM};
use imgserve_observe::init_logger;
use imgserve_prometheus::{Encoder, PrometheusMetrics, TextEncoder};

mod config;
use config::AgentConfig;

mod store;
use store::MemoryStore;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    // 1) config + logger
    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let cfg = AgentConfig::load(path.as_deref())?;
    init_logger(&cfg.logger)?;
    info!(chain = ?cfg.chain, "logger initialized");

    // 2) leaf
    let mut store = MemoryStore::new(Duration::from_millis(50));
    store
        .insert("cat.png", Image::new("png", vec![0x89, b'P', b'N', b'G']))
        .insert("dog.jpg", Image::new("jpeg", vec![0xff, 0xd8, 0xff]));

    // 3) chain
    let metrics = PrometheusMetrics::new()?;
    let server = cfg.chain.build(store.into_server(), Arc::new(metrics.clone()))?;

    // 4) concurrent requests, more than the limit
    let mut requests = JoinSet::new();
    for i in 0..12 {
        let source = ["cat.png", "dog.jpg", "bird.gif"][i % 3];
        let mut params = Params::single(SOURCE_PARAM, source);
        params.set("width", 100 + i as i64);

        let server = Arc::clone(&server);
        requests.spawn(async move { (source, server.get(params).await) });
    }
    let no_source = Arc::clone(&server);
    requests.spawn(async move { ("<none>", no_source.get(Params::single("width", 10)).await) });

    while let Some(joined) = requests.join_next().await {
        match joined? {
            (source, Ok(img)) => info!(source, image = %img, "served"),
            (source, Err(e)) => warn!(source, error = %e, "request failed"),
        }
    }

    // 5) metrics
    let mut buf = Vec::new();
    TextEncoder::new().encode(&metrics.gather(), &mut buf)?;
    println!("{}", String::from_utf8(buf)?);
    Ok(())
}
