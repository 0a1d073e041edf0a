use glutin::{
    config::ConfigTemplateBuilder,
    context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version},
    display::{GetGlDisplay, GlDisplay},
    prelude::*,
    surface::{Surface, SwapInterval, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasRawWindowHandle;
use std::{ffi::CString, num::NonZeroU32, ptr};
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event_loop::EventLoop,
    window::{Window, WindowBuilder},
};

use crate::config::WindowConfig;
use crate::render::shaders::GlDriver;
use crate::utils::error::{Result, ViewerError};

const GL_MAJOR: u8 = 3;
const GL_MINOR: u8 = 3;

/// The window together with its current OpenGL context and surface.
///
/// Fields drop in declaration order: surface, then context, then window.
pub struct WindowContext {
    gl_surface: Surface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    window: Window,
    driver: GlDriver,
}

impl WindowContext {
    pub fn create(event_loop: &EventLoop<()>, config: &WindowConfig) -> Result<Self> {
        let window_builder = WindowBuilder::new()
            .with_title(config.title.as_str())
            .with_inner_size(LogicalSize::new(config.width, config.height));

        let template = ConfigTemplateBuilder::new().with_alpha_size(8);
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

        let (window, gl_config) = display_builder
            .build(event_loop, template, |configs| {
                configs
                    .reduce(|accum, config| {
                        if config.num_samples() < accum.num_samples() {
                            config
                        } else {
                            accum
                        }
                    })
                    .expect("glutin reports an error instead of offering no configs")
            })
            .map_err(|e| ViewerError::WindowCreate(e.to_string()))?;

        let window = window
            .ok_or_else(|| ViewerError::WindowCreate("no window was returned".to_string()))?;
        let raw_window_handle = window.raw_window_handle();

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(GL_MAJOR, GL_MINOR))))
            .with_profile(GlProfile::Core)
            .build(Some(raw_window_handle));

        let gl_display = gl_config.display();

        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .map_err(|e| ViewerError::ContextInit(format!("context creation failed: {e}")))?;

        let attrs = window.build_surface_attributes(<_>::default());
        let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &attrs) }
            .map_err(|e| ViewerError::ContextInit(format!("surface creation failed: {e}")))?;

        let gl_context = not_current
            .make_current(&gl_surface)
            .map_err(|e| ViewerError::ContextInit(format!("make current failed: {e}")))?;

        let driver = GlDriver::load(|symbol| match CString::new(symbol) {
            Ok(symbol) => gl_display.get_proc_address(symbol.as_c_str()) as *const _,
            Err(_) => ptr::null(),
        });

        let interval = if config.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = gl_surface.set_swap_interval(&gl_context, interval) {
            log::warn!("Failed to set swap interval: {}", e);
        }

        log::info!(
            "Created {}x{} window with an OpenGL {}.{} core context",
            config.width,
            config.height,
            GL_MAJOR,
            GL_MINOR
        );

        Ok(Self {
            gl_surface,
            gl_context,
            window,
            driver,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn driver(&self) -> &GlDriver {
        &self.driver
    }

    /// Resizes the surface and viewport. A minimized (zero-sized) window is ignored.
    pub fn resize(&self, size: PhysicalSize<u32>) {
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return;
        };

        self.gl_surface.resize(&self.gl_context, width, height);
        unsafe {
            gl::Viewport(0, 0, size.width as i32, size.height as i32);
        }
    }

    pub fn swap_buffers(&self) -> glutin::error::Result<()> {
        self.gl_surface.swap_buffers(&self.gl_context)
    }
}
