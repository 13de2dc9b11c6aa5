use macroquad::prelude::*;
use toroidal_life::{
    LifeConfig, SimulationLoop,
    application::{FrameTimeTicks, TickSource},
    error::Result,
    input::{Command, GestureState, MacroquadInput},
    rendering::MacroquadRenderer,
};

fn window_conf() -> Conf {
    let config = LifeConfig::default();
    Conf {
        window_title: "Toroidal Life".to_owned(),
        window_width: config.window_width,
        window_height: config.window_height,
        window_resizable: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    if let Err(err) = run(LifeConfig::default()).await {
        log::error!("{err}");
    }
}

async fn run(config: LifeConfig) -> Result<()> {
    log::info!("starting with {:?}", config);
    let mut sim = SimulationLoop::from_config(&config)?;
    let mut gestures = GestureState::new(config.zoom_factor, config.pan_speed);
    let mut input = MacroquadInput::new();
    let mut renderer = MacroquadRenderer::new();
    let mut ticks = FrameTimeTicks::new(config.display_rate);

    let mut seen_width = screen_width();
    sim.resize_surface(seen_width as f64);

    let mut running = true;
    while running {
        // A rejected width keeps the old cell size until the next change
        if screen_width() != seen_width {
            seen_width = screen_width();
            sim.resize_surface(seen_width as f64);
        }

        for event in input.poll() {
            // A rejected gesture only loses that gesture
            if let Err(err) = gestures.apply(&event, sim.viewport_mut()) {
                log::warn!("ignored {:?}: {}", event, err);
            }
        }

        for command in input.commands() {
            match command {
                Command::TogglePause => sim.toggle_paused(),
                Command::Randomize => sim.randomize(config.alive_probability),
                Command::ResetView => sim.viewport_mut().reset(),
                Command::ToggleOverlay => renderer.toggle_overlay(),
                Command::Quit => running = false,
            }
        }

        ticks.advance(get_frame_time() as f64);
        if ticks.next_tick() {
            sim.frame(&mut renderer);
        } else {
            sim.redraw(&mut renderer);
        }
        next_frame().await;
    }

    log::info!("stopped after {} generations", sim.generation());
    Ok(())
}
