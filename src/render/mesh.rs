use bytemuck::{Pod, Zeroable};
use gl::types::*;
use std::mem;
use std::ptr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    #[error("Image dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },
}

/// Half-extents of the image quad in clip space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadExtents {
    pub half_width: f32,
    pub half_height: f32,
}

/// Scales an image into the `[-1, 1]` box without distorting it.
///
/// The longer side gets a half-extent of 1.0 and the shorter one
/// `short / long`.
pub fn compute_quad_extents(width: u32, height: u32) -> Result<QuadExtents, GeometryError> {
    if width == 0 || height == 0 {
        return Err(GeometryError::ZeroDimension { width, height });
    }

    let (w, h) = (width as f32, height as f32);
    let extents = if width > height {
        QuadExtents {
            half_width: 1.0,
            half_height: h / w,
        }
    } else {
        QuadExtents {
            half_width: w / h,
            half_height: 1.0,
        }
    };
    Ok(extents)
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
    pub tex_coord: [f32; 2],
}

pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 1, 2, 3];

#[derive(Debug, Clone, PartialEq)]
pub struct QuadGeometry {
    pub vertices: [QuadVertex; 4],
    pub indices: [u32; 6],
}

pub fn build_quad(extents: QuadExtents) -> QuadGeometry {
    let QuadExtents {
        half_width: w,
        half_height: h,
    } = extents;

    let vertices = [
        QuadVertex {
            position: [-w, -h],
            tex_coord: [0.0, 0.0],
        },
        QuadVertex {
            position: [-w, h],
            tex_coord: [0.0, 1.0],
        },
        QuadVertex {
            position: [w, -h],
            tex_coord: [1.0, 0.0],
        },
        QuadVertex {
            position: [w, h],
            tex_coord: [1.0, 1.0],
        },
    ];

    QuadGeometry {
        vertices,
        indices: QUAD_INDICES,
    }
}

/// GPU copy of a [`QuadGeometry`]: vertex array, vertex buffer and index buffer.
pub struct QuadMesh {
    vao: GLuint,
    vbo: GLuint,
    ibo: GLuint,
    index_count: GLsizei,
}

impl QuadMesh {
    /// Uploads the quad once with `STATIC_DRAW`. The vertex array stays bound.
    pub fn upload(geometry: &QuadGeometry) -> Self {
        let vertex_bytes: &[u8] = bytemuck::cast_slice(&geometry.vertices);
        let index_bytes: &[u8] = bytemuck::cast_slice(&geometry.indices);
        let stride = mem::size_of::<QuadVertex>() as GLsizei;

        let (mut vao, mut vbo, mut ibo) = (0, 0, 0);
        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::BindVertexArray(vao);

            gl::GenBuffers(1, &mut vbo);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                vertex_bytes.len() as GLsizeiptr,
                vertex_bytes.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );

            // Position attribute
            gl::EnableVertexAttribArray(0);
            gl::VertexAttribPointer(0, 2, gl::FLOAT, gl::FALSE, stride, ptr::null());

            // Texture coordinate attribute
            gl::EnableVertexAttribArray(1);
            gl::VertexAttribPointer(
                1,
                2,
                gl::FLOAT,
                gl::FALSE,
                stride,
                mem::size_of::<[f32; 2]>() as *const _,
            );

            gl::GenBuffers(1, &mut ibo);
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ibo);
            gl::BufferData(
                gl::ELEMENT_ARRAY_BUFFER,
                index_bytes.len() as GLsizeiptr,
                index_bytes.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );
        }

        log::debug!("Uploaded quad mesh (vao {}, vbo {}, ibo {})", vao, vbo, ibo);
        Self {
            vao,
            vbo,
            ibo,
            index_count: geometry.indices.len() as GLsizei,
        }
    }

    pub fn bind(&self) {
        unsafe {
            gl::BindVertexArray(self.vao);
        }
    }

    pub fn draw(&self) {
        self.bind();
        unsafe {
            gl::DrawElements(
                gl::TRIANGLES,
                self.index_count,
                gl::UNSIGNED_INT,
                ptr::null(),
            );
        }
    }
}

impl Drop for QuadMesh {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.ibo);
            gl::DeleteBuffers(1, &self.vbo);
            gl::DeleteVertexArrays(1, &self.vao);
        }
    }
}
