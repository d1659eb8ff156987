use std::borrow::Cow;

use anyhow::Result;
use wgpu::naga::ShaderStage;

/// Compiles the static full-screen triangle vertex shader.
pub(crate) fn compile_vertex_shader(device: &wgpu::Device) -> Result<wgpu::ShaderModule> {
    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("fullscreen triangle vertex"),
        source: wgpu::ShaderSource::Glsl {
            shader: Cow::Borrowed(VERTEX_SHADER_GLSL),
            stage: ShaderStage::Vertex,
            defines: &[],
        },
    }))
}

/// Compiles one of the built-in layer fragment programs through naga's GLSL
/// front-end. Compilation failure is fatal at mount time; the error carries
/// the layer label so the host can tell which program broke.
pub(crate) fn compile_fragment_shader(
    device: &wgpu::Device,
    label: &str,
    source: &str,
) -> Result<wgpu::ShaderModule> {
    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Glsl {
            shader: Cow::Borrowed(source),
            stage: ShaderStage::Fragment,
            defines: &[],
        },
    }))
}

/// Minimal full-screen triangle vertex shader shared by both layers.
const VERTEX_SHADER_GLSL: &str = r"#version 450

const vec2 positions[3] = vec2[3](
    vec2(-1.0, -3.0),
    vec2(3.0, 1.0),
    vec2(-1.0, 1.0)
);

void main() {
    gl_Position = vec4(positions[uint(gl_VertexIndex)], 0.0, 1.0);
}
";

/// Peach layer: a slow vertical sine wave on the green channel, confined to
/// the right half of the viewport. Fragments on the left half are discarded so
/// the layer beneath (the clear color) shows through; the written half is
/// semi-transparent and blends with the framebuffer.
///
/// The uniform block layout must match `PeachUniforms` in `gpu/uniforms.rs`.
/// Fragment coordinates are remapped to a bottom-left origin so `st` matches
/// the coordinate space the effect was authored in.
pub(crate) const PEACH_FRAGMENT_GLSL: &str = r"#version 450
layout(location = 0) out vec4 outColor;

layout(std140, set = 0, binding = 0) uniform PeachParams {
    vec2 _u_resolution;
    float _u_time;
    float _padding0;
} ubo;

#define u_resolution ubo._u_resolution
#define u_time ubo._u_time

float wave(float y, float t) {
    return 0.05 * sin(10.0 * (y + t * 0.5));
}

void main() {
    vec2 fragCoord = vec2(gl_FragCoord.x, u_resolution.y - gl_FragCoord.y);
    vec2 st = fragCoord / u_resolution;

    if (st.x > 0.5) {
        vec3 peach = vec3(1.0, 0.8 + wave(st.y, u_time), 0.7);
        outColor = vec4(peach, 0.5);
    } else {
        discard;
    }
}
";

/// Pink layer: a pointer-centered glow emanating from the top-left anchor,
/// blended over a vertical pink gradient with a blue edge band, whitened
/// toward the viewport border by a radial vignette. Full opacity.
///
/// `u_mouse` arrives in [-1, 1] normalized device coordinates while `st` is
/// in [0, 1]; the mismatch is inherited from the source effect and kept for
/// visual parity. `middleFade` is likewise computed but unused there.
///
/// The uniform block layout must match `PinkUniforms` in `gpu/uniforms.rs`.
pub(crate) const PINK_FRAGMENT_GLSL: &str = r"#version 450
layout(location = 0) out vec4 outColor;

layout(std140, set = 0, binding = 0) uniform PinkParams {
    vec2 _u_resolution;
    vec2 _u_mouse;
    float _u_time;
    float _padding0;
} ubo;

#define u_resolution ubo._u_resolution
#define u_mouse ubo._u_mouse
#define u_time ubo._u_time

float fluctuation(float y, float t) {
    return 0.1 * sin(10.0 * (y + t * 0.5));
}

void main() {
    vec2 fragCoord = vec2(gl_FragCoord.x, u_resolution.y - gl_FragCoord.y);
    vec2 st = fragCoord / u_resolution;

    float middleFade = smoothstep(0.35, 0.65, st.x);

    float dist = length(st - u_mouse);
    float size = 0.5;
    float startDistance = length(st - vec2(0.0, 1.0));
    float wobble = fluctuation(st.y, u_time);

    float intensity = smoothstep(startDistance + wobble, startDistance - size, dist);

    vec3 lightPink = vec3(1.0, 0.6, 0.8);
    vec3 darkPink = vec3(0.8, 0.2, 0.67);
    vec3 gradient = mix(lightPink, darkPink, st.y);

    float edgeFactor = smoothstep(0.0, 0.5, intensity);
    vec3 color = mix(vec3(0.3, 0.5, 1.0), gradient, edgeFactor);
    color = mix(vec3(1.0, 0.92, 0.98), color, intensity);

    float vignette = smoothstep(0.8, 1.0, length(st - vec2(0.5, 0.5)));
    color = mix(color, vec3(1.0), vignette);

    outColor = vec4(color, 1.0);
}
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peach_discards_the_left_half() {
        assert!(PEACH_FRAGMENT_GLSL.contains("st.x > 0.5"));
        assert!(PEACH_FRAGMENT_GLSL.contains("discard"));
    }

    #[test]
    fn uniform_names_are_the_external_contract() {
        for source in [PEACH_FRAGMENT_GLSL, PINK_FRAGMENT_GLSL] {
            assert!(source.contains("#define u_resolution"));
            assert!(source.contains("#define u_time"));
        }
        assert!(PINK_FRAGMENT_GLSL.contains("#define u_mouse"));
        assert!(!PEACH_FRAGMENT_GLSL.contains("u_mouse"));
    }

    #[test]
    fn pink_vignette_edges_match_the_effect() {
        assert!(PINK_FRAGMENT_GLSL.contains("smoothstep(0.8, 1.0"));
    }

    // CPU mirror of the pink color math, used to pin down the band behavior
    // without a GPU.
    fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
        let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
        t * t * (3.0 - 2.0 * t)
    }

    fn mix3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
        [
            a[0] + (b[0] - a[0]) * t,
            a[1] + (b[1] - a[1]) * t,
            a[2] + (b[2] - a[2]) * t,
        ]
    }

    fn vignetted(color: [f32; 3], st: [f32; 2]) -> [f32; 3] {
        let dx = st[0] - 0.5;
        let dy = st[1] - 0.5;
        let vignette = smoothstep(0.8, 1.0, (dx * dx + dy * dy).sqrt());
        mix3(color, [1.0, 1.0, 1.0], vignette)
    }

    #[test]
    fn vignette_is_inactive_inside_the_inner_edge() {
        // The viewport corner sits ~0.707 from the center, inside the 0.8
        // inner edge, so the vignette contributes nothing there.
        let color = [0.3, 0.5, 1.0];
        assert_eq!(vignetted(color, [0.0, 0.0]), color);
        assert_eq!(vignetted(color, [1.0, 1.0]), color);
        assert_eq!(vignetted(color, [0.5, 0.5]), color);
    }

    #[test]
    fn vignette_saturates_to_white_past_the_outer_edge() {
        let color = [0.8, 0.2, 0.67];
        let out = vignetted(color, [1.6, 0.5]);
        for channel in out {
            assert!((channel - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn glow_intensity_band_is_monotonic_in_distance() {
        // intensity = smoothstep(start + wobble, start - 0.5, dist): for a
        // fixed band, moving the fragment closer to the pointer raises the
        // intensity from 0 (outside) to 1 (inside).
        let start = 0.9_f32;
        let wobble = 0.05_f32;
        let band = |dist: f32| smoothstep(start + wobble, start - 0.5, dist);

        assert_eq!(band(start + wobble + 0.1), 0.0);
        assert_eq!(band(start - 0.6), 1.0);

        let mut previous = band(1.2);
        let mut dist = 1.2;
        while dist > 0.2 {
            dist -= 0.05;
            let value = band(dist);
            assert!(value >= previous);
            previous = value;
        }
    }
}
