use clap::Parser;
use log::{error, info, warn, LevelFilter};
use simple_logger::SimpleLogger;
use std::{path::Path, process::ExitCode};
use winit::{
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
};

use imgview::{
    config::load_or_create_config, CliArgs, ImageRenderer, RedrawTracker, ViewerConfig,
    ViewerError, WindowContext,
};

struct App {
    // Declared before the context so its GL objects are released while the context lives.
    renderer: Option<ImageRenderer>,
    redraw: RedrawTracker,
    context: WindowContext,
}

impl App {
    fn new(
        event_loop: &EventLoop<()>,
        config: &ViewerConfig,
        image_path: &Path,
    ) -> Result<Self, ViewerError> {
        let context = WindowContext::create(event_loop, &config.window)?;

        info!("Loading {:?}", image_path);
        let renderer = ImageRenderer::new(context.driver(), image_path, config.clear_color)?;
        let (width, height) = renderer.image_size();
        context
            .window()
            .set_title(&format!("{} - {}x{}", config.window.title, width, height));

        let size = context.window().inner_size();
        context.resize(size);
        context.window().request_redraw();

        Ok(Self {
            renderer: Some(renderer),
            redraw: RedrawTracker::new(size),
            context,
        })
    }

    /// Returns true when the viewer should close.
    fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => true,
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => true,
            WindowEvent::Resized(size) => {
                if self.redraw.observe(*size) {
                    self.context.resize(*size);
                    self.context.window().request_redraw();
                }
                false
            }
            WindowEvent::RedrawRequested => {
                self.draw();
                false
            }
            _ => false,
        }
    }

    fn draw(&mut self) {
        if !self.redraw.take_redraw() {
            return;
        }

        if let Some(renderer) = &self.renderer {
            renderer.render();
            if let Err(e) = self.context.swap_buffers() {
                error!("Failed to present frame: {}", e);
            }
        }
    }

    fn cleanup(&mut self) {
        self.renderer = None;
    }
}

fn run(args: &CliArgs) -> Result<(), ViewerError> {
    let config = load_or_create_config().unwrap_or_else(|e| {
        warn!("Using default configuration: {:#}", e);
        ViewerConfig::default()
    });
    let image_path = args.image_path(&config.image_path).to_path_buf();

    let event_loop =
        EventLoop::new().map_err(|e| ViewerError::WindowSystemInit(e.to_string()))?;
    // Sleep until the window system has something for us.
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(&event_loop, &config, &image_path)?;
    let window_id = app.context.window().id();

    event_loop
        .run(move |event, elwt| {
            if let Event::WindowEvent { event, window_id: id } = event {
                if id == window_id && app.handle_window_event(&event) {
                    info!("Closing viewer");
                    app.cleanup();
                    elwt.exit();
                }
            }
        })
        .map_err(|e| ViewerError::WindowSystemInit(e.to_string()))
}

fn main() -> ExitCode {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) if !e.use_stderr() => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(ViewerError::Usage(e.to_string()).exit_code());
        }
    };

    if let Err(e) = SimpleLogger::new().with_level(LevelFilter::Info).env().init() {
        eprintln!("Failed to initialize logging: {e}");
    }
    info!("GL ImageViewer {}", env!("CARGO_PKG_VERSION"));

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
