//! WebGL2 backend: Blinn-Phong shading of the scene's meshes.

use js_sys::{Object, Reflect};
use orbit_scene::renderer::instance::{RenderBuffer, MAX_DIRECTIONAL_LIGHTS};
use orbit_scene::systems::geometry::{build_geometry, Vertex};
use orbit_scene::{
    build_render_buffer, Geometry, PerspectiveCamera, Renderer, RendererOptions, Scene, SceneError,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlUniformLocation, WebGlVertexArrayObject,
};
use crate::container::DomContainer;
use crate::document::dom_error;

const VERTEX_SHADER: &str = r#"#version 300 es
layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;

uniform mat4 u_view_projection;
uniform mat4 u_model;
uniform mat4 u_normal_matrix;

out vec3 v_world_position;
out vec3 v_normal;

void main() {
    vec4 world = u_model * vec4(a_position, 1.0);
    v_world_position = world.xyz;
    v_normal = mat3(u_normal_matrix) * a_normal;
    gl_Position = u_view_projection * world;
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

const int MAX_LIGHTS = __MAX_LIGHTS__;
const vec3 SPECULAR = vec3(0.0667);

uniform vec3 u_color;
uniform float u_shininess;
uniform vec3 u_camera_position;
uniform vec3 u_ambient;
uniform int u_light_count;
uniform vec3 u_light_directions[MAX_LIGHTS];
uniform vec3 u_light_colors[MAX_LIGHTS];

in vec3 v_world_position;
in vec3 v_normal;
out vec4 frag_color;

void main() {
    vec3 n = normalize(v_normal);
    vec3 v = normalize(u_camera_position - v_world_position);
    vec3 diffuse = u_ambient;
    vec3 specular = vec3(0.0);
    for (int i = 0; i < MAX_LIGHTS; i++) {
        if (i >= u_light_count) break;
        vec3 l = u_light_directions[i];
        float ndl = max(dot(n, l), 0.0);
        diffuse += u_light_colors[i] * ndl;
        if (ndl > 0.0) {
            vec3 h = normalize(l + v);
            specular += u_light_colors[i] * pow(max(dot(n, h), 0.0), u_shininess);
        }
    }
    frag_color = vec4(u_color * diffuse + SPECULAR * specular, 1.0);
}
"#;

/// GPU copy of one geometry.
struct GpuMesh {
    vao: WebGlVertexArrayObject,
    vertices: WebGlBuffer,
    indices: WebGlBuffer,
    index_count: i32,
}

struct Uniforms {
    view_projection: Option<WebGlUniformLocation>,
    model: Option<WebGlUniformLocation>,
    normal_matrix: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
    shininess: Option<WebGlUniformLocation>,
    camera_position: Option<WebGlUniformLocation>,
    ambient: Option<WebGlUniformLocation>,
    light_count: Option<WebGlUniformLocation>,
    light_directions: Option<WebGlUniformLocation>,
    light_colors: Option<WebGlUniformLocation>,
}

impl Uniforms {
    fn locate(gl: &GL, program: &WebGlProgram) -> Self {
        let at = |name: &str| gl.get_uniform_location(program, name);
        Self {
            view_projection: at("u_view_projection"),
            model: at("u_model"),
            normal_matrix: at("u_normal_matrix"),
            color: at("u_color"),
            shininess: at("u_shininess"),
            camera_position: at("u_camera_position"),
            ambient: at("u_ambient"),
            light_count: at("u_light_count"),
            light_directions: at("u_light_directions[0]"),
            light_colors: at("u_light_colors[0]"),
        }
    }
}

/// Renders into a `<canvas>` it creates and appends to the container.
pub struct WebGlRenderer {
    canvas: HtmlCanvasElement,
    gl: GL,
    program: WebGlProgram,
    uniforms: Uniforms,
    /// Uploaded geometries. A handful of entries, so a linear scan is fine.
    meshes: Vec<(Geometry, GpuMesh)>,
    buffer: RenderBuffer,
    width: u32,
    height: u32,
    pixel_ratio: f32,
}

impl WebGlRenderer {
    /// Create the canvas and WebGL2 context, build the shader program and mount
    /// the canvas into `container`.
    pub fn new(container: &DomContainer, options: &RendererOptions) -> Result<Self, SceneError> {
        let document = container
            .window()
            .document()
            .ok_or_else(|| SceneError::Dom("window has no document".into()))?;
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|e| dom_error("createElement(canvas)", e))?
            .dyn_into()
            .map_err(|_| SceneError::Dom("created element is not a canvas".into()))?;
        canvas
            .style()
            .set_property("display", "block")
            .map_err(|e| dom_error("style.display", e))?;

        let gl = context(&canvas, options)?;
        let program = link_program(&gl, VERTEX_SHADER, &fragment_source())?;
        let uniforms = Uniforms::locate(&gl, &program);

        container.mount(&canvas)?;
        log::debug!(
            "webgl2 context ready (antialias: {}, alpha: {})",
            options.antialias,
            options.alpha
        );

        Ok(Self {
            canvas,
            gl,
            program,
            uniforms,
            meshes: Vec::new(),
            buffer: RenderBuffer::new(),
            width: 0,
            height: 0,
            pixel_ratio: 1.0,
        })
    }

    /// Size the backing store to CSS size × pixel ratio and the element to CSS size.
    fn apply_size(&self) {
        let (width, height) = self.drawing_buffer_size();
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", self.width));
        let _ = style.set_property("height", &format!("{}px", self.height));
    }

    /// Index into `meshes` for `geometry`, uploading it on first use.
    fn mesh_index(&mut self, geometry: Geometry) -> Result<usize, SceneError> {
        if let Some(index) = self.meshes.iter().position(|(g, _)| *g == geometry) {
            return Ok(index);
        }
        let mesh = upload_mesh(&self.gl, &geometry)?;
        log::debug!("uploaded {geometry:?} ({} indices)", mesh.index_count);
        self.meshes.push((geometry, mesh));
        Ok(self.meshes.len() - 1)
    }

    fn set_frame_uniforms(&self) {
        let gl = &self.gl;
        let u = &self.uniforms;
        let frame = &self.buffer.uniforms;
        gl.uniform_matrix4fv_with_f32_array(
            u.view_projection.as_ref(),
            false,
            bytemuck::cast_slice(&frame.view_projection),
        );
        gl.uniform3fv_with_f32_array(u.camera_position.as_ref(), &frame.camera_position);
        gl.uniform3fv_with_f32_array(u.ambient.as_ref(), &frame.ambient);
        gl.uniform1i(u.light_count.as_ref(), frame.light_count as i32);
        gl.uniform3fv_with_f32_array(
            u.light_directions.as_ref(),
            bytemuck::cast_slice(&frame.light_directions),
        );
        gl.uniform3fv_with_f32_array(u.light_colors.as_ref(), bytemuck::cast_slice(&frame.light_colors));
    }
}

impl Renderer for WebGlRenderer {
    fn backend(&self) -> &'static str {
        "webgl2"
    }

    fn set_pixel_ratio(&mut self, ratio: f32) {
        self.pixel_ratio = ratio;
        self.apply_size();
    }

    fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.apply_size();
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), SceneError> {
        build_render_buffer(scene, camera, &mut self.buffer);

        let (width, height) = self.drawing_buffer_size();
        let [r, g, b] = self.buffer.uniforms.background;
        {
            let gl = &self.gl;
            gl.viewport(0, 0, width as i32, height as i32);
            gl.clear_color(r, g, b, 1.0);
            gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);
            gl.enable(GL::DEPTH_TEST);
            gl.enable(GL::CULL_FACE);
            gl.use_program(Some(&self.program));
        }
        self.set_frame_uniforms();

        for i in 0..self.buffer.items.len() {
            let item = self.buffer.items[i];
            let index = self.mesh_index(item.geometry)?;
            let mesh = &self.meshes[index].1;
            let gl = &self.gl;
            let u = &self.uniforms;
            let instance = &item.instance;

            gl.uniform_matrix4fv_with_f32_array(u.model.as_ref(), false, bytemuck::cast_slice(&instance.model));
            gl.uniform_matrix4fv_with_f32_array(
                u.normal_matrix.as_ref(),
                false,
                bytemuck::cast_slice(&instance.normal_matrix),
            );
            gl.uniform3fv_with_f32_array(u.color.as_ref(), &instance.color);
            gl.uniform1f(u.shininess.as_ref(), instance.shininess);

            gl.bind_vertex_array(Some(&mesh.vao));
            gl.draw_elements_with_i32(GL::TRIANGLES, mesh.index_count, GL::UNSIGNED_SHORT, 0);
        }
        self.gl.bind_vertex_array(None);
        Ok(())
    }

    fn dispose(&mut self) {
        for (_, mesh) in self.meshes.drain(..) {
            self.gl.delete_vertex_array(Some(&mesh.vao));
            self.gl.delete_buffer(Some(&mesh.vertices));
            self.gl.delete_buffer(Some(&mesh.indices));
        }
        self.gl.delete_program(Some(&self.program));
        self.canvas.remove();
    }
}

fn fragment_source() -> String {
    FRAGMENT_SHADER.replace("__MAX_LIGHTS__", &MAX_DIRECTIONAL_LIGHTS.to_string())
}

fn context(canvas: &HtmlCanvasElement, options: &RendererOptions) -> Result<GL, SceneError> {
    let attributes = Object::new();
    Reflect::set(&attributes, &"antialias".into(), &JsValue::from_bool(options.antialias))
        .map_err(|e| dom_error("context attributes", e))?;
    Reflect::set(&attributes, &"alpha".into(), &JsValue::from_bool(options.alpha))
        .map_err(|e| dom_error("context attributes", e))?;

    canvas
        .get_context_with_context_options("webgl2", &attributes)
        .map_err(|e| dom_error("getContext(webgl2)", e))?
        .ok_or_else(|| SceneError::Backend("WebGL2 not supported".into()))?
        .dyn_into::<GL>()
        .map_err(|_| SceneError::Backend("context is not a WebGL2RenderingContext".into()))
}

fn compile_shader(gl: &GL, source: &str, kind: u32) -> Result<WebGlShader, SceneError> {
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| SceneError::Backend("could not create shader".into()))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(SceneError::Shader(log))
    }
}

fn link_program(gl: &GL, vertex_source: &str, fragment_source: &str) -> Result<WebGlProgram, SceneError> {
    let vertex = compile_shader(gl, vertex_source, GL::VERTEX_SHADER)?;
    let fragment = compile_shader(gl, fragment_source, GL::FRAGMENT_SHADER)?;
    let program = gl
        .create_program()
        .ok_or_else(|| SceneError::Backend("could not create program".into()))?;
    gl.attach_shader(&program, &vertex);
    gl.attach_shader(&program, &fragment);
    gl.link_program(&program);
    // Shaders are owned by the program once linked.
    gl.delete_shader(Some(&vertex));
    gl.delete_shader(Some(&fragment));

    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(SceneError::Shader(log))
    }
}

fn upload_mesh(gl: &GL, geometry: &Geometry) -> Result<GpuMesh, SceneError> {
    let data = build_geometry(geometry);
    let vao = gl
        .create_vertex_array()
        .ok_or_else(|| SceneError::Backend("could not create vertex array".into()))?;
    let vertices = gl
        .create_buffer()
        .ok_or_else(|| SceneError::Backend("could not create vertex buffer".into()))?;
    let indices = gl
        .create_buffer()
        .ok_or_else(|| SceneError::Backend("could not create index buffer".into()))?;

    gl.bind_vertex_array(Some(&vao));

    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&vertices));
    gl.buffer_data_with_u8_array(GL::ARRAY_BUFFER, bytemuck::cast_slice(&data.vertices), GL::STATIC_DRAW);
    let stride = Vertex::STRIDE_BYTES as i32;
    gl.enable_vertex_attrib_array(0);
    gl.vertex_attrib_pointer_with_i32(0, 3, GL::FLOAT, false, stride, 0);
    gl.enable_vertex_attrib_array(1);
    gl.vertex_attrib_pointer_with_i32(1, 3, GL::FLOAT, false, stride, Vertex::NORMAL_OFFSET as i32);

    gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&indices));
    gl.buffer_data_with_u8_array(
        GL::ELEMENT_ARRAY_BUFFER,
        bytemuck::cast_slice(&data.indices),
        GL::STATIC_DRAW,
    );

    gl.bind_vertex_array(None);

    Ok(GpuMesh {
        vao,
        vertices,
        indices,
        index_count: data.indices.len() as i32,
    })
}
