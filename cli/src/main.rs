use anyhow::Result;
use log::info;

mod menu;

fn main() -> Result<()> {
    env_logger::init();
    info!("Starting court reservation system");

    menu::run()
}
