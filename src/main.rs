use std::{sync::Arc, time::Instant};

use anyhow::Context;
use glam::Vec2;
use sdl2::event::{Event, WindowEvent};

use crate::{
    abs::App,
    assets::Assets,
    config::Config,
    input::{CursorRequest, KeyboardState, MouseState, UpdateContext},
    scenes::{SceneManager, StageContext},
};

mod abs;
mod assets;
mod camera;
mod config;
mod input;
mod logging;
mod render;
mod scenes;

fn main() {
    let loaded = Config::load_from(&Config::search_paths());
    let level = loaded
        .as_ref()
        .map_or(log::LevelFilter::Info, |(config, _)| config.log_level);
    if let Err(e) = logging::init(level) {
        eprintln!("failed to install logger: {e}");
    }

    let result = loaded.and_then(|(config, path)| {
        match path {
            Some(path) => log::info!("using configuration from {}", path.display()),
            None => log::info!("no configuration file found, using defaults"),
        }
        run(config)
    });

    if let Err(e) = result {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(config: Config) -> anyhow::Result<()> {
    let mut app = App::new(
        &config.window.title,
        config.window.width,
        config.window.height,
        config.window.fullscreen,
        config.window.vsync,
    )
    .map_err(anyhow::Error::msg)
    .context("failed to create the OpenGL window")?;
    app.fit_viewport();

    let title = config.window.title.clone();
    let stage = config.stage;
    let ctx = StageContext {
        gl: Arc::clone(&app.gl),
        assets: Assets::new(&config.assets),
        window_size: app.window.size(),
        config,
    };
    log::debug!("assets from {}", ctx.assets.root().display());
    let mut scenes = SceneManager::new(ctx, stage)?;
    let mut shown_stage = None;

    let mut keyboard = KeyboardState::default();
    let mut mouse = MouseState::default();

    let mut last_frame_time = Instant::now();

    'running: loop {
        let now = Instant::now();
        let delta_time = now.duration_since(last_frame_time).as_secs_f32();
        last_frame_time = now;

        input::begin_frame(&mut keyboard, &mut mouse);

        let events: Vec<Event> = app.event_pump.poll_iter().collect();
        for event in &events {
            input::record_event(&mut keyboard, &mut mouse, event);
            match *event {
                Event::Quit { .. } => break 'running,
                Event::Window {
                    win_event: WindowEvent::SizeChanged(width, height),
                    ..
                } => {
                    log::debug!("window resized to {width}x{height}");
                    app.fit_viewport();
                    scenes.resize(width.max(1) as u32, height.max(1) as u32);
                }
                _ => {}
            }
        }

        let update_ctx = UpdateContext::new(&keyboard, &mouse, delta_time);
        if !scenes.update(&update_ctx) {
            break 'running;
        }
        apply_cursor(&app, &mut mouse, scenes.cursor());

        let stage = scenes.stage();
        if shown_stage != Some(stage) {
            shown_stage = Some(stage);
            let caption = format!("{title} - {}. {}", stage.number(), stage.name());
            if let Err(e) = app.window.set_title(&caption) {
                log::warn!("could not set window title: {e}");
            }
        }

        scenes.render(&app.gl);
        app.window.gl_swap_window();
    }

    log::info!("shutting down");
    Ok(())
}

/// Shows or hides the cursor and moves it where the active stage asked.
fn apply_cursor(app: &App, mouse: &mut MouseState, request: CursorRequest) {
    let mouse_util = app.sdl.mouse();
    mouse_util.show_cursor(request.visible);
    if let Some((x, y)) = request.warp_to {
        mouse_util.warp_mouse_in_window(&app.window, x, y);
        mouse.position = Vec2::new(x as f32, y as f32);
    }
}
