use bytemuck::{Pod, Zeroable};

/// Per-frame uniform block handed to the fragment stage.
///
/// The layout mirrors the struct declared in `fullscreen.wgsl`: a
/// `vec3<f32>` resolution (aligned to 16 bytes), playback time, frame index,
/// and trailing padding rounding the struct to its 32-byte uniform stride.
/// The same device buffer slot is overwritten in place every frame.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub(crate) struct ShaderUniforms {
    pub resolution: [f32; 3],
    pub time: f32,
    pub frame: i32,
    _padding: [u32; 3],
}

// Stride must match the WGSL declaration exactly; a mismatch would skew
// every field the fragment stage reads.
const _: () = assert!(std::mem::size_of::<ShaderUniforms>() == 32);

impl ShaderUniforms {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            resolution: [width as f32, height as f32, 1.0],
            time: 0.0,
            // Reported but never advanced; shaders observe a constant 0.
            frame: 0,
            _padding: [0; 3],
        }
    }

    pub fn set_resolution(&mut self, width: u32, height: u32) {
        self.resolution = [width as f32, height as f32, 1.0];
    }

    pub fn set_time(&mut self, seconds: f32) {
        self.time = seconds;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_maps_to_floats_with_unit_z() {
        let uniforms = ShaderUniforms::new(800, 600);
        assert_eq!(uniforms.resolution, [800.0, 600.0, 1.0]);
    }

    #[test]
    fn byte_view_is_stride_exact() {
        let uniforms = ShaderUniforms::new(1920, 1080);
        assert_eq!(bytemuck::bytes_of(&uniforms).len(), 32);
    }

    #[test]
    fn upload_bytes_round_trip_bit_exactly() {
        let mut uniforms = ShaderUniforms::new(1280, 720);
        uniforms.set_time(12.5);
        let bytes = bytemuck::bytes_of(&uniforms).to_vec();
        let read_back: &ShaderUniforms = bytemuck::from_bytes(&bytes);
        assert_eq!(read_back.time.to_bits(), 12.5_f32.to_bits());
        assert_eq!(*read_back, uniforms);
    }

    #[test]
    fn frame_index_stays_zero() {
        let mut uniforms = ShaderUniforms::new(640, 480);
        uniforms.set_time(3.0);
        uniforms.set_resolution(800, 600);
        assert_eq!(uniforms.frame, 0);
    }
}
