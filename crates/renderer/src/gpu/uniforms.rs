use bytemuck::{Pod, Zeroable};

/// CPU mirror of the peach layer's uniform block.
///
/// Layout must observe std140 rules and match `PeachParams` in `compile.rs`:
/// vec2 resolution at offset 0, float time at 8, one float of padding to
/// round the block out to 16 bytes.
#[repr(C, align(16))]
#[derive(Clone, Copy)]
pub(crate) struct PeachUniforms {
    resolution: [f32; 2],
    time: f32,
    _padding0: f32,
}

unsafe impl Zeroable for PeachUniforms {}
unsafe impl Pod for PeachUniforms {}

impl PeachUniforms {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self {
            resolution: [width as f32, height as f32],
            time: 0.0,
            _padding0: 0.0,
        }
    }

    pub(crate) fn set_resolution(&mut self, width: f32, height: f32) {
        self.resolution = [width, height];
    }

    pub(crate) fn set_time(&mut self, time: f32) {
        self.time = time;
    }

    #[cfg(test)]
    fn time(&self) -> f32 {
        self.time
    }
}

/// CPU mirror of the pink layer's uniform block.
///
/// Matches `PinkParams` in `compile.rs`: vec2 resolution at 0, vec2 pointer
/// at 8, float time at 16, padded to 32 bytes.
#[repr(C, align(16))]
#[derive(Clone, Copy)]
pub(crate) struct PinkUniforms {
    resolution: [f32; 2],
    pointer: [f32; 2],
    time: f32,
    _padding0: [f32; 3],
}

unsafe impl Zeroable for PinkUniforms {}
unsafe impl Pod for PinkUniforms {}

impl PinkUniforms {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self {
            resolution: [width as f32, height as f32],
            pointer: [0.0, 0.0],
            time: 0.0,
            _padding0: [0.0; 3],
        }
    }

    pub(crate) fn set_resolution(&mut self, width: f32, height: f32) {
        self.resolution = [width, height];
    }

    pub(crate) fn set_time(&mut self, time: f32) {
        self.time = time;
    }

    pub(crate) fn set_pointer(&mut self, pointer: [f32; 2]) {
        self.pointer = pointer;
    }

    #[cfg(test)]
    fn time(&self) -> f32 {
        self.time
    }

    #[cfg(test)]
    fn pointer(&self) -> [f32; 2] {
        self.pointer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_match_std140_sizes() {
        assert_eq!(std::mem::size_of::<PeachUniforms>(), 16);
        assert_eq!(std::mem::size_of::<PinkUniforms>(), 32);
        assert_eq!(std::mem::align_of::<PeachUniforms>(), 16);
        assert_eq!(std::mem::align_of::<PinkUniforms>(), 16);
    }

    #[test]
    fn resize_leaves_time_and_pointer_untouched() {
        let mut peach = PeachUniforms::new(800, 600);
        let mut pink = PinkUniforms::new(800, 600);
        peach.set_time(1.25);
        pink.set_time(1.25);
        pink.set_pointer([0.4, -0.2]);

        peach.set_resolution(1280.0, 720.0);
        pink.set_resolution(1280.0, 720.0);

        assert_eq!(peach.time(), 1.25);
        assert_eq!(pink.time(), 1.25);
        assert_eq!(pink.pointer(), [0.4, -0.2]);
    }

    #[test]
    fn pointer_round_trips_through_the_block() {
        let mut pink = PinkUniforms::new(640, 480);
        pink.set_pointer([-1.0, 1.0]);
        let bytes = bytemuck::bytes_of(&pink);
        // vec2 pointer sits at std140 offset 8.
        let x = f32::from_ne_bytes(bytes[8..12].try_into().unwrap());
        let y = f32::from_ne_bytes(bytes[12..16].try_into().unwrap());
        assert_eq!([x, y], [-1.0, 1.0]);
    }
}
