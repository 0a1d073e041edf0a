use std::path::Path;

use crate::render::mesh::{build_quad, compute_quad_extents, QuadMesh};
use crate::render::shaders::{texture_shaders, GlDriver, ShaderProgram};
use crate::render::texture::TextureAsset;
use crate::utils::error::Result;

const TEXTURE_SLOT: u32 = 0;

/// Draws one image as an aspect-correct textured quad.
///
/// Field order is drop order: the program goes first, the texture last.
pub struct ImageRenderer {
    program: ShaderProgram<GlDriver>,
    mesh: QuadMesh,
    texture: TextureAsset,
}

impl ImageRenderer {
    pub fn new(driver: &GlDriver, image_path: &Path, clear_color: [f32; 4]) -> Result<Self> {
        let texture = TextureAsset::load(image_path)?;

        let extents = compute_quad_extents(texture.width(), texture.height())?;
        log::info!(
            "Quad half-extents: {:.4} x {:.4}",
            extents.half_width,
            extents.half_height
        );
        let mesh = QuadMesh::upload(&build_quad(extents));

        // Validation runs against current state, so the quad's VAO is bound here.
        let mut program = texture_shaders::create_texture_program(driver)?;
        program.set_used();
        program.set_uniform_1i(texture_shaders::TEXTURE_UNIFORM, TEXTURE_SLOT as i32)?;
        texture.bind(TEXTURE_SLOT);

        let [r, g, b, a] = clear_color;
        unsafe {
            gl::Enable(gl::BLEND);
            gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
            gl::ClearColor(r, g, b, a);
        }

        Ok(Self {
            program,
            mesh,
            texture,
        })
    }

    pub fn render(&self) {
        unsafe {
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
        self.program.set_used();
        self.texture.bind(TEXTURE_SLOT);
        self.mesh.draw();
    }

    pub fn image_size(&self) -> (u32, u32) {
        (self.texture.width(), self.texture.height())
    }
}
