use bytemuck::{Pod, Zeroable};

/// A clip-space position fed to the vertex stage at slot 0.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub(crate) struct Vertex {
    pub position: [f32; 2],
}

impl Vertex {
    const fn new(x: f32, y: f32) -> Self {
        Self { position: [x, y] }
    }
}

/// Two counter-clockwise triangles tiling the `[-1,1]` clip-space square,
/// sharing the `(-1,-1)`–`(1,1)` diagonal. Uploaded once at setup and never
/// mutated.
pub(crate) const FULLSCREEN_VERTICES: [Vertex; 6] = [
    Vertex::new(-1.0, -1.0),
    Vertex::new(1.0, -1.0),
    Vertex::new(1.0, 1.0),
    Vertex::new(1.0, 1.0),
    Vertex::new(-1.0, 1.0),
    Vertex::new(-1.0, -1.0),
];

pub(crate) fn vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
        offset: 0,
        shader_location: 0,
        format: wgpu::VertexFormat::Float32x2,
    }];
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRIBUTES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_area(a: Vertex, b: Vertex, c: Vertex) -> f32 {
        let ab = [b.position[0] - a.position[0], b.position[1] - a.position[1]];
        let ac = [c.position[0] - a.position[0], c.position[1] - a.position[1]];
        0.5 * (ab[0] * ac[1] - ab[1] * ac[0])
    }

    #[test]
    fn table_holds_exactly_six_corner_vertices() {
        assert_eq!(FULLSCREEN_VERTICES.len(), 6);
        for vertex in FULLSCREEN_VERTICES {
            assert!(vertex.position.iter().all(|c| c.abs() == 1.0));
        }
    }

    #[test]
    fn triangles_are_ccw_and_cover_the_square_exactly_once() {
        let first = signed_area(
            FULLSCREEN_VERTICES[0],
            FULLSCREEN_VERTICES[1],
            FULLSCREEN_VERTICES[2],
        );
        let second = signed_area(
            FULLSCREEN_VERTICES[3],
            FULLSCREEN_VERTICES[4],
            FULLSCREEN_VERTICES[5],
        );
        assert_eq!(first, 2.0);
        assert_eq!(second, 2.0);
        // Two non-overlapping CCW triangles of area 2 tile the area-4 square.
        assert_eq!(first + second, 4.0);
    }

    #[test]
    fn triangles_share_the_main_diagonal() {
        let diagonal = [Vertex::new(-1.0, -1.0), Vertex::new(1.0, 1.0)];
        for corner in diagonal {
            assert!(FULLSCREEN_VERTICES[..3].contains(&corner));
            assert!(FULLSCREEN_VERTICES[3..].contains(&corner));
        }
    }

    #[test]
    fn vertex_layout_matches_the_packed_stride() {
        let layout = vertex_buffer_layout();
        assert_eq!(layout.array_stride, 8);
        assert_eq!(layout.attributes.len(), 1);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x2);
    }
}
