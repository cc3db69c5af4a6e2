use std::collections::HashMap;

use glow::HasContext;

use super::mesh::{self, LineMeshData, MeshData};
use crate::scene::RenderItem;

// ── Render parameters ────────────────────────────────────────

/// Parameters for rendering the viewport
pub struct RenderParams {
    /// Viewport rectangle [x, y, width, height] in pixels
    pub viewport: [f32; 4],
    /// World -> camera matrix (puppet translation and orientation included)
    pub view: glam::Mat4,
    /// Camera -> clip matrix
    pub projection: glam::Mat4,
    /// Depth-buffered drawing
    pub z_buffer: bool,
    pub backface_culling: bool,
    pub frontface_culling: bool,
    /// Show the trackball guide circle
    pub draw_circle: bool,
    /// Pixel to read back for picking, GL window coordinates
    /// (origin bottom-left), or None for a plain frame.
    pub pick_at: Option<[i32; 2]>,
}

// ── GPU mesh handles ─────────────────────────────────────────

struct GpuMesh {
    vao: glow::VertexArray,
    _vbo: glow::Buffer,
    ibo: glow::Buffer,
    index_count: i32,
}

struct GpuLines {
    vao: glow::VertexArray,
    _vbo: glow::Buffer,
    vertex_count: i32,
}

// ── Picking id encoding ──────────────────────────────────────

/// Background clear value for the picking pass: decodes to this
/// sentinel, which `decode_pick_id` maps to "nothing hit".
const PICK_NONE: u32 = 0x00ff_ffff;

/// Node id -> RGB triplet for the picking pass.
fn encode_pick_color(id: u32) -> [f32; 3] {
    [
        (id & 0xff) as f32 / 255.0,
        ((id >> 8) & 0xff) as f32 / 255.0,
        ((id >> 16) & 0xff) as f32 / 255.0,
    ]
}

/// RGBA readback -> node id, or None for the background.
fn decode_pick_id(pixel: [u8; 4]) -> Option<u32> {
    let id = pixel[0] as u32 | (pixel[1] as u32) << 8 | (pixel[2] as u32) << 16;
    (id != PICK_NONE).then_some(id)
}

// ── Main GL renderer ─────────────────────────────────────────

pub struct GlRenderer {
    mesh_program: glow::Program,
    line_program: glow::Program,
    /// Unit meshes keyed by description mesh name
    meshes: HashMap<String, GpuMesh>,
    /// Trackball guide circle
    circle: GpuLines,
}

impl GlRenderer {
    pub fn new(gl: &glow::Context) -> Self {
        let mesh_program = compile_program(gl, MESH_VERT, MESH_FRAG);
        let line_program = compile_program(gl, LINE_VERT, LINE_FRAG);

        let meshes = mesh::builtin_meshes()
            .iter()
            .map(|(name, data)| (name.clone(), upload_mesh(gl, data)))
            .collect();

        let circle = upload_lines(gl, &mesh::circle([1.0, 1.0, 1.0, 1.0]));

        Self {
            mesh_program,
            line_program,
            meshes,
            circle,
        }
    }

    /// Render one frame. When `params.pick_at` is set, a picking pass
    /// runs first and its readback is returned; the visible frame is
    /// always drawn afterwards, so picking never flickers on screen.
    pub fn paint(
        &self,
        gl: &glow::Context,
        params: &RenderParams,
        items: &[RenderItem],
    ) -> Option<u32> {
        let mut picked = None;

        unsafe {
            gl.viewport(
                params.viewport[0] as i32,
                params.viewport[1] as i32,
                params.viewport[2] as i32,
                params.viewport[3] as i32,
            );
            gl.scissor(
                params.viewport[0] as i32,
                params.viewport[1] as i32,
                params.viewport[2] as i32,
                params.viewport[3] as i32,
            );
            gl.enable(glow::SCISSOR_TEST);

            if let Some([px, py]) = params.pick_at {
                self.draw_scene(gl, params, items, true);
                let mut pixel = [0u8; 4];
                gl.read_pixels(
                    px,
                    py,
                    1,
                    1,
                    glow::RGBA,
                    glow::UNSIGNED_BYTE,
                    glow::PixelPackData::Slice(Some(&mut pixel)),
                );
                picked = decode_pick_id(pixel);
            }

            self.draw_scene(gl, params, items, false);

            if params.draw_circle {
                self.draw_circle(gl, params);
            }

            gl.disable(glow::DEPTH_TEST);
            gl.disable(glow::CULL_FACE);
            gl.disable(glow::SCISSOR_TEST);
            gl.use_program(None);
        }

        picked
    }

    unsafe fn draw_scene(
        &self,
        gl: &glow::Context,
        params: &RenderParams,
        items: &[RenderItem],
        picking: bool,
    ) {
        if picking {
            // White background: decodes to the "nothing hit" sentinel.
            gl.clear_color(1.0, 1.0, 1.0, 1.0);
        } else {
            gl.clear_color(0.2, 0.2, 0.25, 1.0);
        }
        gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);

        // The picking pass always depth-tests: the front-most mesh
        // must win regardless of the display toggle.
        if picking || params.z_buffer {
            gl.enable(glow::DEPTH_TEST);
            gl.depth_func(glow::LESS);
        } else {
            gl.disable(glow::DEPTH_TEST);
        }

        match (params.backface_culling, params.frontface_culling) {
            (false, false) => gl.disable(glow::CULL_FACE),
            (back, front) => {
                gl.enable(glow::CULL_FACE);
                gl.cull_face(match (back, front) {
                    (true, false) => glow::BACK,
                    (false, true) => glow::FRONT,
                    _ => glow::FRONT_AND_BACK,
                });
            }
        }

        gl.use_program(Some(self.mesh_program));
        set_uniform_i32(gl, self.mesh_program, "u_picking", picking as i32);

        for item in items {
            let Some(mesh) = self.meshes.get(&item.mesh) else {
                continue;
            };

            let mv = params.view * item.model;
            set_uniform_mat4(gl, self.mesh_program, "u_mv", &mv);
            set_uniform_mat4(gl, self.mesh_program, "u_mvp", &(params.projection * mv));

            if picking {
                let c = encode_pick_color(item.node_id);
                set_uniform_vec3(gl, self.mesh_program, "u_pick_color", c);
            } else if item.selected {
                // Selection highlight: flat white, no specular.
                set_uniform_vec3(gl, self.mesh_program, "u_kd", [1.0, 1.0, 1.0]);
                set_uniform_vec3(gl, self.mesh_program, "u_ks", [1.0, 1.0, 1.0]);
                set_uniform_f32(gl, self.mesh_program, "u_shininess", 0.0);
            } else {
                set_uniform_vec3(gl, self.mesh_program, "u_kd", item.kd);
                set_uniform_vec3(gl, self.mesh_program, "u_ks", item.ks);
                set_uniform_f32(gl, self.mesh_program, "u_shininess", item.shininess);
            }

            draw_mesh(gl, mesh);
        }
    }

    /// Trackball guide: a screen-space circle of radius half the
    /// smaller viewport dimension, drawn over everything.
    unsafe fn draw_circle(&self, gl: &glow::Context, params: &RenderParams) {
        let aspect = params.viewport[2] / params.viewport[3];
        let scale = if aspect >= 1.0 {
            glam::Vec3::new(1.0 / aspect, 1.0, 1.0)
        } else {
            glam::Vec3::new(1.0, aspect, 1.0)
        };
        let mvp = glam::Mat4::from_scale(scale);

        gl.disable(glow::DEPTH_TEST);
        gl.use_program(Some(self.line_program));
        set_uniform_mat4(gl, self.line_program, "u_mvp", &mvp);
        draw_lines(gl, &self.circle);
    }

    #[allow(dead_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_program(self.mesh_program);
            gl.delete_program(self.line_program);
            for mesh in self.meshes.values() {
                gl.delete_vertex_array(mesh.vao);
                gl.delete_buffer(mesh._vbo);
                gl.delete_buffer(mesh.ibo);
            }
            gl.delete_vertex_array(self.circle.vao);
            gl.delete_buffer(self.circle._vbo);
        }
    }
}

// ── GPU upload ───────────────────────────────────────────────

fn upload_mesh(gl: &glow::Context, data: &MeshData) -> GpuMesh {
    unsafe {
        let vao = gl.create_vertex_array().unwrap();
        gl.bind_vertex_array(Some(vao));

        let vbo = gl.create_buffer().unwrap();
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck_cast_slice(&data.vertices),
            glow::STATIC_DRAW,
        );

        let stride = 6 * 4; // 6 floats * 4 bytes
        // position: location 0
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
        // normal: location 1
        gl.enable_vertex_attrib_array(1);
        gl.vertex_attrib_pointer_f32(1, 3, glow::FLOAT, false, stride, 3 * 4);

        let ibo = gl.create_buffer().unwrap();
        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ibo));
        gl.buffer_data_u8_slice(
            glow::ELEMENT_ARRAY_BUFFER,
            bytemuck_cast_slice(&data.indices),
            glow::STATIC_DRAW,
        );

        gl.bind_vertex_array(None);

        GpuMesh {
            vao,
            _vbo: vbo,
            ibo,
            index_count: data.indices.len() as i32,
        }
    }
}

fn upload_lines(gl: &glow::Context, data: &LineMeshData) -> GpuLines {
    unsafe {
        let vao = gl.create_vertex_array().unwrap();
        gl.bind_vertex_array(Some(vao));

        let vbo = gl.create_buffer().unwrap();
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck_cast_slice(&data.vertices),
            glow::STATIC_DRAW,
        );

        let stride = 7 * 4; // 7 floats * 4 bytes
        // position: location 0
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
        // color: location 1
        gl.enable_vertex_attrib_array(1);
        gl.vertex_attrib_pointer_f32(1, 4, glow::FLOAT, false, stride, 3 * 4);

        gl.bind_vertex_array(None);

        GpuLines {
            vao,
            _vbo: vbo,
            vertex_count: data.vertex_count() as i32,
        }
    }
}

// ── Draw calls ───────────────────────────────────────────────

unsafe fn draw_mesh(gl: &glow::Context, mesh: &GpuMesh) {
    gl.bind_vertex_array(Some(mesh.vao));
    gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(mesh.ibo));
    gl.draw_elements(glow::TRIANGLES, mesh.index_count, glow::UNSIGNED_INT, 0);
    gl.bind_vertex_array(None);
}

unsafe fn draw_lines(gl: &glow::Context, lines: &GpuLines) {
    gl.bind_vertex_array(Some(lines.vao));
    gl.draw_arrays(glow::LINES, 0, lines.vertex_count);
    gl.bind_vertex_array(None);
}

// ── Shader compilation ───────────────────────────────────────

fn compile_program(gl: &glow::Context, vert_src: &str, frag_src: &str) -> glow::Program {
    unsafe {
        let program = gl.create_program().unwrap();

        let vert = gl.create_shader(glow::VERTEX_SHADER).unwrap();
        gl.shader_source(vert, vert_src);
        gl.compile_shader(vert);
        if !gl.get_shader_compile_status(vert) {
            let log = gl.get_shader_info_log(vert);
            tracing::error!("Vertex shader error: {log}");
        }

        let frag = gl.create_shader(glow::FRAGMENT_SHADER).unwrap();
        gl.shader_source(frag, frag_src);
        gl.compile_shader(frag);
        if !gl.get_shader_compile_status(frag) {
            let log = gl.get_shader_info_log(frag);
            tracing::error!("Fragment shader error: {log}");
        }

        gl.attach_shader(program, vert);
        gl.attach_shader(program, frag);
        gl.link_program(program);
        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            tracing::error!("Program link error: {log}");
        }

        gl.delete_shader(vert);
        gl.delete_shader(frag);

        program
    }
}

// ── Uniform setters ──────────────────────────────────────────

fn set_uniform_mat4(gl: &glow::Context, program: glow::Program, name: &str, mat: &glam::Mat4) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_matrix_4_f32_slice(loc.as_ref(), false, &mat.to_cols_array());
    }
}

fn set_uniform_vec3(gl: &glow::Context, program: glow::Program, name: &str, v: [f32; 3]) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_3_f32(loc.as_ref(), v[0], v[1], v[2]);
    }
}

fn set_uniform_f32(gl: &glow::Context, program: glow::Program, name: &str, v: f32) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_1_f32(loc.as_ref(), v);
    }
}

fn set_uniform_i32(gl: &glow::Context, program: glow::Program, name: &str, v: i32) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_1_i32(loc.as_ref(), v);
    }
}

// ── Byte cast helper ─────────────────────────────────────────

fn bytemuck_cast_slice<T: Copy>(slice: &[T]) -> &[u8] {
    unsafe {
        std::slice::from_raw_parts(
            slice.as_ptr() as *const u8,
            std::mem::size_of_val(slice),
        )
    }
}

// ── Shaders ──────────────────────────────────────────────────

const MESH_VERT: &str = r#"#version 330 core
uniform mat4 u_mvp;
uniform mat4 u_mv;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;

out vec3 v_pos_view;
out vec3 v_normal;

void main() {
    gl_Position = u_mvp * vec4(a_position, 1.0);
    v_pos_view = (u_mv * vec4(a_position, 1.0)).xyz;
    v_normal = mat3(u_mv) * a_normal;
}
"#;

const MESH_FRAG: &str = r#"#version 330 core
uniform int u_picking;
uniform vec3 u_pick_color;
uniform vec3 u_kd;
uniform vec3 u_ks;
uniform float u_shininess;

in vec3 v_pos_view;
in vec3 v_normal;

out vec4 frag_color;

void main() {
    if (u_picking == 1) {
        frag_color = vec4(u_pick_color, 1.0);
        return;
    }

    vec3 n = normalize(v_normal);
    vec3 l = normalize(vec3(0.25, 0.5, 0.8));
    float diffuse = max(dot(n, l), 0.0);
    float ambient = 0.25;
    vec3 color = u_kd * (ambient + diffuse * 0.75);

    if (u_shininess > 0.0) {
        vec3 v = normalize(-v_pos_view);
        vec3 r = reflect(-l, n);
        color += u_ks * pow(max(dot(r, v), 0.0), u_shininess);
    }

    frag_color = vec4(color, 1.0);
}
"#;

const LINE_VERT: &str = r#"#version 330 core
uniform mat4 u_mvp;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec4 a_color;

out vec4 v_color;

void main() {
    gl_Position = u_mvp * vec4(a_position, 1.0);
    v_color = a_color;
}
"#;

const LINE_FRAG: &str = r#"#version 330 core
in vec4 v_color;
out vec4 frag_color;

void main() {
    frag_color = v_color;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_color_round_trip() {
        for id in [0u32, 1, 255, 256, 65_535, 70_000, PICK_NONE - 1] {
            let c = encode_pick_color(id);
            let pixel = [
                (c[0] * 255.0).round() as u8,
                (c[1] * 255.0).round() as u8,
                (c[2] * 255.0).round() as u8,
                255,
            ];
            assert_eq!(decode_pick_id(pixel), Some(id));
        }
    }

    #[test]
    fn test_background_decodes_to_none() {
        assert_eq!(decode_pick_id([255, 255, 255, 255]), None);
    }
}
