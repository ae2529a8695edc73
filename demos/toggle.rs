use squishy_toggle::{run_app, ToggleStyle, WindowConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let style = match std::env::args().nth(1) {
        Some(path) => ToggleStyle::load(path)?,
        None => ToggleStyle::default(),
    };
    let config = WindowConfig {
        title: "Squishy Toggle".into(),
        width: 480,
        height: 480,
    };
    run_app(config, style)?;
    Ok(())
}
