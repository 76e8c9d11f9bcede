use log::{LevelFilter, error};
use pushback::{
    competition::Robot,
    config::RobotConfig,
    display::TextStatus,
    fs::logger,
    hardware::{BrainCanvas, V5Clock, V5Input, V5Sink},
};
use vexide::prelude::*;

/// Robot build loaded from the SD card when present.
const CONFIG_FILE: &str = "robot.json";

fn load_config() -> RobotConfig {
    match std::fs::read_to_string(CONFIG_FILE) {
        Ok(json) => RobotConfig::from_json(&json).unwrap_or_else(|e| {
            error!("{}: {}, using the rocket_league preset", CONFIG_FILE, e);
            RobotConfig::rocket_league()
        }),
        Err(_) => RobotConfig::rocket_league(),
    }
}

#[vexide::main]
async fn main(peripherals: Peripherals) {
    let _ = logger::init(LevelFilter::Info);

    let config = load_config();
    let mut peripherals = DynamicPeripherals::new(peripherals);
    let (Some(controller), Some(screen)) = (
        peripherals.take_primary_controller(),
        peripherals.take_display(),
    ) else {
        error!("Controller or display already taken");
        return;
    };
    let sink = V5Sink::new(&config, &mut peripherals);
    let input = V5Input::new(controller);
    let display = TextStatus::new(BrainCanvas::new(screen));

    let mut robot = match Robot::new(config, sink, input, V5Clock) {
        Ok(robot) => robot.with_display(display),
        Err(e) => {
            error!("Refusing to run: {}", e);
            return;
        }
    };

    robot.on_init();
    robot.compete().await;
}
