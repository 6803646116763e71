//! Triangle geometry and its upload to GPU memory

use bytemuck::{Pod, Zeroable};

use crate::render::api::{
    BufferId, BufferTarget, BufferUsage, GraphicsApi, PrimitiveTopology, VertexArrayId,
};

/// Vertex with a position in normalized device coordinates
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// x, y, z in [-1, 1]
    pub position: [f32; 3],
}

impl Vertex {
    /// Vertex at the given position
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { position: [x, y, z] }
    }
}

/// The tutorial triangle, counter-clockwise from bottom left
pub const TRIANGLE_VERTICES: [Vertex; 3] = [
    Vertex::new(-0.5, -0.5, 0.0),
    Vertex::new(0.5, -0.5, 0.0),
    Vertex::new(0.0, 0.5, 0.0),
];

/// Shader input slot fed with vertex positions
pub const POSITION_ATTRIBUTE: u32 = 0;

/// Layout of the position attribute inside a [`Vertex`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexLayout {
    /// Shader input slot
    pub index: u32,
    /// Floats per vertex
    pub components: i32,
    /// Bytes between consecutive vertices
    pub stride: i32,
    /// Byte offset of the first component
    pub offset: usize,
}

impl VertexLayout {
    /// Tightly packed positions at slot 0
    pub const POSITION: Self = Self {
        index: POSITION_ATTRIBUTE,
        components: 3,
        stride: std::mem::size_of::<Vertex>() as i32,
        offset: 0,
    };
}

/// Triangle geometry resident in GPU memory
///
/// Created once and kept for the rest of the process; the buffer is never
/// resized or rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriangleMesh {
    buffer: BufferId,
    vertex_array: Option<VertexArrayId>,
    vertex_count: i32,
}

impl TriangleMesh {
    /// Upload `vertices` into a new static buffer
    ///
    /// With `with_vertex_array`, a vertex array object is created and bound
    /// before the buffer is bound, then [`VertexLayout::POSITION`] is recorded
    /// into it and slot 0 enabled. Without it, only the buffer is created.
    pub fn upload(api: &mut dyn GraphicsApi, vertices: &[Vertex], with_vertex_array: bool) -> Self {
        let vertex_array = with_vertex_array.then(|| {
            let vao = api.create_vertex_array();
            api.bind_vertex_array(vao);
            vao
        });

        let buffer = api.create_buffer();
        api.bind_buffer(BufferTarget::Array, buffer);
        api.buffer_data(
            BufferTarget::Array,
            bytemuck::cast_slice(vertices),
            BufferUsage::StaticDraw,
        );

        if vertex_array.is_some() {
            let layout = VertexLayout::POSITION;
            api.vertex_attrib_pointer(
                layout.index,
                layout.components,
                layout.stride,
                layout.offset,
            );
            api.enable_vertex_attrib_array(layout.index);
        }

        Self {
            buffer,
            vertex_array,
            vertex_count: i32::try_from(vertices.len()).unwrap_or(i32::MAX),
        }
    }

    /// Upload [`TRIANGLE_VERTICES`]
    pub fn triangle(api: &mut dyn GraphicsApi, with_vertex_array: bool) -> Self {
        Self::upload(api, &TRIANGLE_VERTICES, with_vertex_array)
    }

    /// Buffer object holding the vertices
    pub fn buffer(&self) -> BufferId {
        self.buffer
    }

    /// Vertex array object, if one was created
    pub fn vertex_array(&self) -> Option<VertexArrayId> {
        self.vertex_array
    }

    /// Number of vertices drawn per call
    pub fn vertex_count(&self) -> i32 {
        self.vertex_count
    }

    /// Bind the vertex source and draw all vertices as triangles from index 0
    pub fn draw(&self, api: &mut dyn GraphicsApi) {
        match self.vertex_array {
            Some(vao) => api.bind_vertex_array(vao),
            // A core profile rejects this draw with GL_INVALID_OPERATION; expected for this step
            None => api.bind_buffer(BufferTarget::Array, self.buffer),
        }
        api.draw_arrays(PrimitiveTopology::Triangles, 0, self.vertex_count);
    }
}
