/// Anti-aliasing policy for the render pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Antialiasing {
    /// Pick the highest sample count supported by the surface format.
    Auto,
    /// Disable MSAA and render directly into the swapchain.
    Off,
    /// Request a specific MSAA sample count (clamped to what the device supports).
    Samples(u32),
}

impl Default for Antialiasing {
    fn default() -> Self {
        Self::Auto
    }
}

/// Immutable configuration passed to the renderer at start-up.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Initial window size in physical pixels.
    pub surface_size: (u32, u32),
    /// Anti-aliasing mode requested by the caller.
    pub antialiasing: Antialiasing,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            surface_size: (1920, 1080),
            antialiasing: Antialiasing::default(),
        }
    }
}
