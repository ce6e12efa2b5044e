//! Motor and sensor example

use std::time::Duration;
use tokio::time::sleep;
use nxtusb::{Brick, InputPort, OutputCommand, OutputPort, SensorMode, SensorType};

#[tokio::main]
async fn main() -> nxtusb::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let brick = Brick::open().await?;

    // Touch sensor on port 1
    brick
        .set_input_mode(InputPort::One, SensorType::Switch, SensorMode::Boolean)
        .await?;

    println!("Running motor A...");
    brick.reset_motor_position(OutputPort::A, false).await?;
    brick
        .set_output_state(OutputCommand::run(OutputPort::A, 75))
        .await?;

    for _ in 0..20 {
        let input = brick.get_input_values(InputPort::One).await?;
        if input.scaled_value != 0 {
            println!("Touch sensor pressed");
            break;
        }
        sleep(Duration::from_millis(100)).await;
    }

    brick.set_output_state(OutputCommand::brake(OutputPort::A)).await?;

    let state = brick.get_output_state(OutputPort::A).await?;
    println!("{}", state);

    brick.play_tone(880, 200).await?;
    brick.close().await?;

    Ok(())
}
