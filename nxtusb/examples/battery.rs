//! Battery and keep-alive example

use nxtusb::Brick;

#[tokio::main]
async fn main() -> nxtusb::Result<()> {
    // Initialize logging (RUST_LOG=nxtusb=trace shows every transfer)
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("Looking for a brick...");

    let brick = Brick::open().await?;
    println!("✓ Connected!");

    let mv = brick.battery_level().await?;
    println!("✓ Battery: {}.{:03} V", mv / 1000, mv % 1000);

    let sleep_ms = brick.keep_alive().await?;
    println!("✓ Sleep timer: {} min", sleep_ms / 60_000);

    match brick.current_program_name().await {
        Ok(name) => println!("✓ Running: {}", name),
        Err(e) => println!("No program running ({})", e),
    }

    brick.close().await?;
    println!("✓ Disconnected");

    Ok(())
}
