use std::time::Duration;

fn main() -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(haci_monitor::run());
    // The stdin reader can stay parked in a blocking read; don't wait on it.
    runtime.shutdown_timeout(Duration::from_secs(1));
    result
}
