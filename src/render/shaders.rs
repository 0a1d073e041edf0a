// shaders.rs - Shader stage compilation and program linking

use gl::types::*;
use std::collections::HashMap;
use std::ffi::{c_void, CStr, CString, NulError};
use std::fmt;
use std::ptr;
use thiserror::Error;

/// The two programmable stages a viewer program is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_enum(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("The {0} shader source is empty")]
    EmptySource(ShaderStage),
    #[error("The {stage} shader source contains a null byte: {source}")]
    Nul {
        stage: ShaderStage,
        #[source]
        source: NulError,
    },
    #[error("The {stage} shader failed to compile: {log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("Program linking failed: {0}")]
    Link(String),
    #[error("Program validation failed: {0}")]
    Validate(String),
    #[error("Uniform name contains a null byte: {0}")]
    UniformName(String),
}

impl ShaderError {
    /// True when the failure happened before any program object existed.
    pub fn is_compile_failure(&self) -> bool {
        matches!(
            self,
            ShaderError::EmptySource(_) | ShaderError::Nul { .. } | ShaderError::Compile { .. }
        )
    }
}

/// The driver entry points the program builder needs.
///
/// [`GlDriver`] forwards to the loaded OpenGL functions. Every call must happen
/// on the thread that owns the current context.
pub trait ShaderDriver: Clone {
    fn create_shader(&self, stage: ShaderStage) -> GLuint;
    fn compile_shader(&self, shader: GLuint, source: &CStr);
    fn shader_parameter(&self, shader: GLuint, pname: GLenum) -> GLint;
    /// Copies the info log into `buffer` and returns the number of bytes written,
    /// not counting the terminating null.
    fn shader_info_log(&self, shader: GLuint, buffer: &mut [u8]) -> usize;
    fn delete_shader(&self, shader: GLuint);

    fn create_program(&self) -> GLuint;
    fn attach_shader(&self, program: GLuint, shader: GLuint);
    fn link_program(&self, program: GLuint);
    fn validate_program(&self, program: GLuint);
    fn program_parameter(&self, program: GLuint, pname: GLenum) -> GLint;
    fn program_info_log(&self, program: GLuint, buffer: &mut [u8]) -> usize;
    fn delete_program(&self, program: GLuint);

    fn use_program(&self, program: GLuint);
    fn uniform_location(&self, program: GLuint, name: &CStr) -> GLint;
    fn uniform_1i(&self, location: GLint, value: i32);
}

/// Proof that the OpenGL function table has been loaded.
#[derive(Debug, Clone, Copy)]
pub struct GlDriver {
    _loaded: (),
}

impl GlDriver {
    /// Loads every OpenGL entry point through `loader`.
    ///
    /// The context the pointers come from must be current on this thread.
    pub fn load<F>(loader: F) -> Self
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(loader);
        Self { _loaded: () }
    }
}

fn buffer_capacity(buffer: &[u8]) -> GLsizei {
    GLsizei::try_from(buffer.len()).unwrap_or(GLsizei::MAX)
}

impl ShaderDriver for GlDriver {
    fn create_shader(&self, stage: ShaderStage) -> GLuint {
        unsafe { gl::CreateShader(stage.gl_enum()) }
    }

    fn compile_shader(&self, shader: GLuint, source: &CStr) {
        unsafe {
            gl::ShaderSource(shader, 1, &source.as_ptr(), ptr::null());
            gl::CompileShader(shader);
        }
    }

    fn shader_parameter(&self, shader: GLuint, pname: GLenum) -> GLint {
        let mut value = 0;
        unsafe {
            gl::GetShaderiv(shader, pname, &mut value);
        }
        value
    }

    fn shader_info_log(&self, shader: GLuint, buffer: &mut [u8]) -> usize {
        let mut written: GLsizei = 0;
        unsafe {
            gl::GetShaderInfoLog(
                shader,
                buffer_capacity(buffer),
                &mut written,
                buffer.as_mut_ptr() as *mut GLchar,
            );
        }
        usize::try_from(written).unwrap_or(0)
    }

    fn delete_shader(&self, shader: GLuint) {
        unsafe {
            gl::DeleteShader(shader);
        }
    }

    fn create_program(&self) -> GLuint {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        unsafe {
            gl::AttachShader(program, shader);
        }
    }

    fn link_program(&self, program: GLuint) {
        unsafe {
            gl::LinkProgram(program);
        }
    }

    fn validate_program(&self, program: GLuint) {
        unsafe {
            gl::ValidateProgram(program);
        }
    }

    fn program_parameter(&self, program: GLuint, pname: GLenum) -> GLint {
        let mut value = 0;
        unsafe {
            gl::GetProgramiv(program, pname, &mut value);
        }
        value
    }

    fn program_info_log(&self, program: GLuint, buffer: &mut [u8]) -> usize {
        let mut written: GLsizei = 0;
        unsafe {
            gl::GetProgramInfoLog(
                program,
                buffer_capacity(buffer),
                &mut written,
                buffer.as_mut_ptr() as *mut GLchar,
            );
        }
        usize::try_from(written).unwrap_or(0)
    }

    fn delete_program(&self, program: GLuint) {
        unsafe {
            gl::DeleteProgram(program);
        }
    }

    fn use_program(&self, program: GLuint) {
        unsafe {
            gl::UseProgram(program);
        }
    }

    fn uniform_location(&self, program: GLuint, name: &CStr) -> GLint {
        unsafe { gl::GetUniformLocation(program, name.as_ptr()) }
    }

    fn uniform_1i(&self, location: GLint, value: i32) {
        unsafe {
            gl::Uniform1i(location, value);
        }
    }
}

const EMPTY_LOG: &str = "(driver returned no diagnostic output)";

/// Allocates exactly `length` bytes, lets `fetch` fill them and decodes the result.
fn read_info_log(length: GLint, fetch: impl FnOnce(&mut [u8]) -> usize) -> String {
    let length = usize::try_from(length).unwrap_or(0);
    if length == 0 {
        return EMPTY_LOG.to_owned();
    }

    let mut buffer = vec![0u8; length];
    let written = fetch(&mut buffer).min(length);
    buffer.truncate(written);
    while buffer.last() == Some(&0) {
        buffer.pop();
    }

    let log = String::from_utf8_lossy(&buffer).trim_end().to_owned();
    if log.is_empty() {
        EMPTY_LOG.to_owned()
    } else {
        log
    }
}

fn shader_log<D: ShaderDriver>(driver: &D, shader: GLuint) -> String {
    let length = driver.shader_parameter(shader, gl::INFO_LOG_LENGTH);
    read_info_log(length, |buffer| driver.shader_info_log(shader, buffer))
}

fn program_log<D: ShaderDriver>(driver: &D, program: GLuint) -> String {
    let length = driver.program_parameter(program, gl::INFO_LOG_LENGTH);
    read_info_log(length, |buffer| driver.program_info_log(program, buffer))
}

/// Compiles one stage and returns its non-zero handle.
///
/// On failure the driver's log is reported, the stage object is deleted and
/// nothing is handed back.
pub fn compile_stage<D: ShaderDriver>(
    driver: &D,
    stage: ShaderStage,
    source: &str,
) -> Result<GLuint, ShaderError> {
    if source.trim().is_empty() {
        return Err(ShaderError::EmptySource(stage));
    }
    let source = CString::new(source).map_err(|source| ShaderError::Nul { stage, source })?;

    let shader = driver.create_shader(stage);
    driver.compile_shader(shader, &source);

    if driver.shader_parameter(shader, gl::COMPILE_STATUS) != gl::TRUE as GLint {
        let log = shader_log(driver, shader);
        log::error!("Failed to compile {} shader: {}", stage, log);
        driver.delete_shader(shader);
        return Err(ShaderError::Compile { stage, log });
    }

    log::debug!("Compiled {} shader {}", stage, shader);
    Ok(shader)
}

/// Deletes a compiled stage when it goes out of scope.
struct StageGuard<D: ShaderDriver> {
    driver: D,
    id: GLuint,
}

impl<D: ShaderDriver> Drop for StageGuard<D> {
    fn drop(&mut self) {
        self.driver.delete_shader(self.id);
    }
}

/// Compiles both stages, links and validates them into a program.
///
/// A stage that fails to compile aborts the build before anything is linked.
/// Every object created along the way is released on every error path.
pub fn create_program<D: ShaderDriver>(
    driver: &D,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<ShaderProgram<D>, ShaderError> {
    let vertex = StageGuard {
        driver: driver.clone(),
        id: compile_stage(driver, ShaderStage::Vertex, vertex_source)?,
    };
    let fragment = StageGuard {
        driver: driver.clone(),
        id: compile_stage(driver, ShaderStage::Fragment, fragment_source)?,
    };

    let program = ShaderProgram::from_raw(driver.clone(), driver.create_program());
    driver.attach_shader(program.id, vertex.id);
    driver.attach_shader(program.id, fragment.id);

    driver.link_program(program.id);
    if driver.program_parameter(program.id, gl::LINK_STATUS) != gl::TRUE as GLint {
        let log = program_log(driver, program.id);
        log::error!("Failed to link shader program: {}", log);
        return Err(ShaderError::Link(log));
    }

    driver.validate_program(program.id);
    if driver.program_parameter(program.id, gl::VALIDATE_STATUS) != gl::TRUE as GLint {
        let log = program_log(driver, program.id);
        log::error!("Shader program failed validation: {}", log);
        return Err(ShaderError::Validate(log));
    }

    // Linking copied the compiled stages into the program.
    drop(vertex);
    drop(fragment);

    log::info!("Linked shader program {}", program.id);
    Ok(program)
}

/// A linked program. The GPU object is deleted on drop.
pub struct ShaderProgram<D: ShaderDriver = GlDriver> {
    id: GLuint,
    driver: D,
    uniforms: HashMap<String, GLint>,
}

impl<D: ShaderDriver> ShaderProgram<D> {
    fn from_raw(driver: D, id: GLuint) -> Self {
        Self {
            id,
            driver,
            uniforms: HashMap::new(),
        }
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn set_used(&self) {
        self.driver.use_program(self.id);
    }

    pub fn uniform_location(&mut self, name: &str) -> Result<GLint, ShaderError> {
        if let Some(location) = self.uniforms.get(name) {
            return Ok(*location);
        }

        let cname = CString::new(name).map_err(|_| ShaderError::UniformName(name.to_owned()))?;
        let location = self.driver.uniform_location(self.id, &cname);

        if location == -1 {
            log::warn!("Uniform '{}' not found in shader", name);
        }

        self.uniforms.insert(name.to_owned(), location);
        Ok(location)
    }

    pub fn set_uniform_1i(&mut self, name: &str, value: i32) -> Result<(), ShaderError> {
        self.set_used();
        let location = self.uniform_location(name)?;
        self.driver.uniform_1i(location, value);
        Ok(())
    }
}

impl<D: ShaderDriver> Drop for ShaderProgram<D> {
    fn drop(&mut self) {
        self.driver.delete_program(self.id);
    }
}

/// Textured-quad program used to display the image.
pub mod texture_shaders {
    use super::*;

    /// Positions pass straight through to clip space; `u_MVP` is declared but unused.
    pub const VERTEX_SRC: &str = r#"#version 330 core

layout(location = 0) in vec4 position;
layout(location = 1) in vec2 texCoord;

out vec2 v_TexCoord;
uniform mat4 u_MVP;

void main() {
    v_TexCoord = texCoord;
    gl_Position = position;
}
"#;

    pub const FRAGMENT_SRC: &str = r#"#version 330 core

layout(location = 0) out vec4 color;

in vec2 v_TexCoord;

uniform sampler2D u_Texture;

void main() {
    color = texture(u_Texture, v_TexCoord);
}
"#;

    pub const TEXTURE_UNIFORM: &str = "u_Texture";

    pub fn create_texture_program<D: ShaderDriver>(
        driver: &D,
    ) -> Result<ShaderProgram<D>, ShaderError> {
        create_program(driver, VERTEX_SRC, FRAGMENT_SRC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const COMPILE_LOG: &str = "0:1(1): error: syntax error, unexpected end of file";
    const LINK_LOG: &str = "error: unresolved reference to undefined_symbol";
    const VALIDATE_LOG: &str = "validation failed: sampler bound to wrong unit";

    struct FakeShader {
        stage: ShaderStage,
        source: String,
        compiled: bool,
    }

    #[derive(Default)]
    struct FakeProgram {
        attached: Vec<GLuint>,
        linked: bool,
        validated: bool,
        log: Option<&'static str>,
    }

    #[derive(Default)]
    struct FakeState {
        next_id: GLuint,
        shaders: HashMap<GLuint, FakeShader>,
        programs: HashMap<GLuint, FakeProgram>,
        deleted_shaders: Vec<GLuint>,
        deleted_programs: Vec<GLuint>,
        log_buffers: Vec<(GLint, usize)>,
        fail_validation: bool,
        uniform_lookups: usize,
        uniform_writes: Vec<(GLint, i32)>,
        used_program: Option<GLuint>,
    }

    impl FakeState {
        fn next(&mut self) -> GLuint {
            self.next_id += 1;
            self.next_id
        }
    }

    /// Compiles anything with an entry point, links when both stages compiled.
    #[derive(Clone, Default)]
    struct FakeDriver {
        state: Rc<RefCell<FakeState>>,
    }

    impl FakeDriver {
        fn failing_validation() -> Self {
            let driver = Self::default();
            driver.state.borrow_mut().fail_validation = true;
            driver
        }

        fn live_shaders(&self) -> usize {
            self.state.borrow().shaders.len()
        }

        fn live_programs(&self) -> usize {
            self.state.borrow().programs.len()
        }
    }

    fn copy_log(log: &str, buffer: &mut [u8]) -> usize {
        if buffer.is_empty() {
            return 0;
        }
        let written = log.len().min(buffer.len() - 1);
        buffer[..written].copy_from_slice(&log.as_bytes()[..written]);
        buffer[written] = 0;
        written
    }

    fn log_length(log: Option<&str>) -> GLint {
        log.map_or(0, |log| log.len() as GLint + 1)
    }

    impl ShaderDriver for FakeDriver {
        fn create_shader(&self, stage: ShaderStage) -> GLuint {
            let mut state = self.state.borrow_mut();
            let id = state.next();
            state.shaders.insert(
                id,
                FakeShader {
                    stage,
                    source: String::new(),
                    compiled: false,
                },
            );
            id
        }

        fn compile_shader(&self, shader: GLuint, source: &CStr) {
            let mut state = self.state.borrow_mut();
            let entry = state.shaders.get_mut(&shader).unwrap();
            entry.source = source.to_string_lossy().into_owned();
            entry.compiled = entry.source.contains("void main");
        }

        fn shader_parameter(&self, shader: GLuint, pname: GLenum) -> GLint {
            let state = self.state.borrow();
            let entry = &state.shaders[&shader];
            let log = (!entry.compiled).then_some(COMPILE_LOG);
            match pname {
                gl::COMPILE_STATUS => entry.compiled as GLint,
                gl::INFO_LOG_LENGTH => log_length(log),
                _ => panic!("unexpected shader parameter {pname}"),
            }
        }

        fn shader_info_log(&self, shader: GLuint, buffer: &mut [u8]) -> usize {
            let mut state = self.state.borrow_mut();
            let reported = log_length((!state.shaders[&shader].compiled).then_some(COMPILE_LOG));
            state.log_buffers.push((reported, buffer.len()));
            if state.shaders[&shader].compiled {
                0
            } else {
                copy_log(COMPILE_LOG, buffer)
            }
        }

        fn delete_shader(&self, shader: GLuint) {
            let mut state = self.state.borrow_mut();
            assert!(state.shaders.remove(&shader).is_some(), "double delete of {shader}");
            state.deleted_shaders.push(shader);
        }

        fn create_program(&self) -> GLuint {
            let mut state = self.state.borrow_mut();
            let id = state.next();
            state.programs.insert(id, FakeProgram::default());
            id
        }

        fn attach_shader(&self, program: GLuint, shader: GLuint) {
            let mut state = self.state.borrow_mut();
            assert!(state.shaders.contains_key(&shader));
            state.programs.get_mut(&program).unwrap().attached.push(shader);
        }

        fn link_program(&self, program: GLuint) {
            let mut state = self.state.borrow_mut();
            let attached = state.programs[&program].attached.clone();
            let compiled_stages: Vec<ShaderStage> = attached
                .iter()
                .filter_map(|id| state.shaders.get(id))
                .filter(|shader| shader.compiled)
                .map(|shader| shader.stage)
                .collect();
            let unresolved = attached
                .iter()
                .filter_map(|id| state.shaders.get(id))
                .any(|shader| shader.source.contains("undefined_symbol"));
            let linked = compiled_stages.contains(&ShaderStage::Vertex)
                && compiled_stages.contains(&ShaderStage::Fragment)
                && !unresolved;

            let entry = state.programs.get_mut(&program).unwrap();
            entry.linked = linked;
            entry.log = (!linked).then_some(LINK_LOG);
        }

        fn validate_program(&self, program: GLuint) {
            let mut state = self.state.borrow_mut();
            let fail = state.fail_validation;
            let entry = state.programs.get_mut(&program).unwrap();
            entry.validated = entry.linked && !fail;
            if !entry.validated {
                entry.log = Some(VALIDATE_LOG);
            }
        }

        fn program_parameter(&self, program: GLuint, pname: GLenum) -> GLint {
            let state = self.state.borrow();
            let entry = &state.programs[&program];
            match pname {
                gl::LINK_STATUS => entry.linked as GLint,
                gl::VALIDATE_STATUS => entry.validated as GLint,
                gl::INFO_LOG_LENGTH => log_length(entry.log),
                _ => panic!("unexpected program parameter {pname}"),
            }
        }

        fn program_info_log(&self, program: GLuint, buffer: &mut [u8]) -> usize {
            let mut state = self.state.borrow_mut();
            let log = state.programs[&program].log;
            state.log_buffers.push((log_length(log), buffer.len()));
            log.map_or(0, |log| copy_log(log, buffer))
        }

        fn delete_program(&self, program: GLuint) {
            let mut state = self.state.borrow_mut();
            assert!(state.programs.remove(&program).is_some(), "double delete of {program}");
            state.deleted_programs.push(program);
        }

        fn use_program(&self, program: GLuint) {
            self.state.borrow_mut().used_program = Some(program);
        }

        fn uniform_location(&self, _program: GLuint, name: &CStr) -> GLint {
            let mut state = self.state.borrow_mut();
            state.uniform_lookups += 1;
            if name.to_bytes() == TEXTURE_UNIFORM.as_bytes() {
                3
            } else {
                -1
            }
        }

        fn uniform_1i(&self, location: GLint, value: i32) {
            self.state.borrow_mut().uniform_writes.push((location, value));
        }
    }

    use super::texture_shaders::{FRAGMENT_SRC, TEXTURE_UNIFORM, VERTEX_SRC};

    const BROKEN_SRC: &str = "#version 330 core\nvoid mian( {";

    #[test]
    fn test_compile_valid_stage_returns_handle() {
        let driver = FakeDriver::default();
        let shader = compile_stage(&driver, ShaderStage::Vertex, VERTEX_SRC).unwrap();
        assert_ne!(shader, 0);
        assert_eq!(driver.live_shaders(), 1);
    }

    #[test]
    fn test_compile_invalid_stage_reports_log_and_deletes() {
        let driver = FakeDriver::default();
        let err = compile_stage(&driver, ShaderStage::Fragment, BROKEN_SRC).unwrap_err();

        match err {
            ShaderError::Compile { stage, log } => {
                assert_eq!(stage, ShaderStage::Fragment);
                assert!(!log.is_empty());
                assert_eq!(log, COMPILE_LOG);
            }
            other => panic!("expected compile error, got {other:?}"),
        }
        assert_eq!(driver.live_shaders(), 0);
        assert_eq!(driver.state.borrow().deleted_shaders.len(), 1);
    }

    #[test]
    fn test_info_log_buffer_sized_to_reported_length() {
        let driver = FakeDriver::default();
        let _ = compile_stage(&driver, ShaderStage::Vertex, BROKEN_SRC);

        let state = driver.state.borrow();
        assert_eq!(state.log_buffers.len(), 1);
        let (reported, allocated) = state.log_buffers[0];
        assert_eq!(reported as usize, allocated);
    }

    #[test]
    fn test_empty_and_nul_sources_never_reach_driver() {
        let driver = FakeDriver::default();
        assert!(matches!(
            compile_stage(&driver, ShaderStage::Vertex, "   \n"),
            Err(ShaderError::EmptySource(ShaderStage::Vertex))
        ));
        assert!(matches!(
            compile_stage(&driver, ShaderStage::Fragment, "void main() {}\0"),
            Err(ShaderError::Nul { stage: ShaderStage::Fragment, .. })
        ));
        assert_eq!(driver.state.borrow().next_id, 0);
    }

    #[test]
    fn test_create_program_links_and_releases_stages() {
        let driver = FakeDriver::default();
        let program = create_program(&driver, VERTEX_SRC, FRAGMENT_SRC).unwrap();

        assert_ne!(program.id(), 0);
        assert_eq!(driver.live_shaders(), 0);
        assert_eq!(driver.state.borrow().deleted_shaders.len(), 2);
        assert_eq!(driver.live_programs(), 1);

        let id = program.id();
        drop(program);
        assert_eq!(driver.live_programs(), 0);
        assert_eq!(driver.state.borrow().deleted_programs, vec![id]);
    }

    #[test]
    fn test_invalid_fragment_aborts_before_linking() {
        let driver = FakeDriver::default();
        let result = create_program(&driver, VERTEX_SRC, BROKEN_SRC);

        assert!(matches!(
            result,
            Err(ShaderError::Compile { stage: ShaderStage::Fragment, .. })
        ));
        // Nothing survives, and no program object was ever created.
        assert_eq!(driver.live_shaders(), 0);
        assert_eq!(driver.live_programs(), 0);
        assert!(driver.state.borrow().deleted_programs.is_empty());
    }

    #[test]
    fn test_invalid_vertex_aborts_before_fragment() {
        let driver = FakeDriver::default();
        let result = create_program(&driver, BROKEN_SRC, FRAGMENT_SRC);

        assert!(matches!(
            result,
            Err(ShaderError::Compile { stage: ShaderStage::Vertex, .. })
        ));
        assert_eq!(driver.state.borrow().next_id, 1);
        assert_eq!(driver.live_shaders(), 0);
    }

    #[test]
    fn test_link_failure_surfaces_log_and_deletes_program() {
        let driver = FakeDriver::default();
        let vertex = "#version 330 core\nvoid main() { undefined_symbol(); }";
        let result = create_program(&driver, vertex, FRAGMENT_SRC);

        match result {
            Err(ShaderError::Link(log)) => assert_eq!(log, LINK_LOG),
            Err(other) => panic!("expected link error, got {other:?}"),
            Ok(_) => panic!("program with unresolved symbol must not link"),
        }
        assert_eq!(driver.live_programs(), 0);
        assert_eq!(driver.live_shaders(), 0);
    }

    #[test]
    fn test_validate_failure_surfaces_log() {
        let driver = FakeDriver::failing_validation();
        let result = create_program(&driver, VERTEX_SRC, FRAGMENT_SRC);

        match result {
            Err(ShaderError::Validate(log)) => assert_eq!(log, VALIDATE_LOG),
            Err(other) => panic!("expected validation error, got {other:?}"),
            Ok(_) => panic!("unvalidated program must not be returned"),
        }
        assert_eq!(driver.live_programs(), 0);
    }

    #[test]
    fn test_uniform_locations_are_cached() {
        let driver = FakeDriver::default();
        let mut program = create_program(&driver, VERTEX_SRC, FRAGMENT_SRC).unwrap();

        program.set_uniform_1i(TEXTURE_UNIFORM, 0).unwrap();
        program.set_uniform_1i(TEXTURE_UNIFORM, 0).unwrap();
        assert_eq!(program.uniform_location("u_Missing").unwrap(), -1);

        let state = driver.state.borrow();
        assert_eq!(state.uniform_lookups, 2);
        assert_eq!(state.uniform_writes, vec![(3, 0), (3, 0)]);
        assert_eq!(state.used_program, Some(program.id()));
    }

    #[test]
    fn test_read_info_log_handles_empty_driver_output() {
        assert_eq!(read_info_log(0, |_| unreachable!()), EMPTY_LOG);
        assert_eq!(read_info_log(4, |_| 0), EMPTY_LOG);
        assert_eq!(
            read_info_log(6, |buffer| {
                buffer[..5].copy_from_slice(b"oops\n");
                5
            }),
            "oops"
        );
    }
}
