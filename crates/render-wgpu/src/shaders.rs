/// WGSL shader for the procedural neon grid.
///
/// Lines are drawn at every integer of `uv * params.y` (the cell count) and
/// fade with view distance.
pub const GRID_SHADER: &str = r#"
struct Uniforms {
    projection: mat4x4<f32>,
    view: mat4x4<f32>,
    model: mat4x4<f32>,
    // x: time, y: grid cells per side
    params: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) view_depth: f32,
};

@vertex
fn vs_grid(vertex: VertexInput) -> VertexOutput {
    let world_pos = uniforms.model * vec4<f32>(vertex.position, 1.0);
    let view_pos = uniforms.view * world_pos;

    var out: VertexOutput;
    out.clip_position = uniforms.projection * view_pos;
    out.uv = vertex.uv;
    out.view_depth = -view_pos.z;
    return out;
}

@fragment
fn fs_grid(in: VertexOutput) -> @location(0) vec4<f32> {
    let coord = in.uv * uniforms.params.y;
    let cell = abs(fract(coord - 0.5) - 0.5);
    let width = max(fwidth(coord), vec2<f32>(0.0001));

    let dist = cell / width;
    let line = 1.0 - min(min(dist.x, dist.y), 1.0);
    let glow = exp(-min(cell.x, cell.y) * 14.0) * 0.45;

    let fade = clamp(1.0 - in.view_depth / 350.0, 0.0, 1.0);
    let neon = vec3<f32>(1.0, 0.12, 0.85);
    let floor_color = vec3<f32>(0.03, 0.0, 0.07);

    let intensity = clamp(line + glow, 0.0, 1.0);
    let color = mix(floor_color, neon, intensity);
    return vec4<f32>(color * fade, mix(0.6, 1.0, intensity) * fade);
}
"#;

/// WGSL shader for the skybox. The cube is pushed to the far plane.
pub const SKYBOX_SHADER: &str = r#"
struct Uniforms {
    projection: mat4x4<f32>,
    view: mat4x4<f32>,
    model: mat4x4<f32>,
    params: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;
@group(0) @binding(1)
var sky_texture: texture_cube<f32>;
@group(0) @binding(2)
var sky_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) direction: vec3<f32>,
};

@vertex
fn vs_skybox(vertex: VertexInput) -> VertexOutput {
    let pos = uniforms.projection * uniforms.view * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    // z = w gives a depth of exactly 1.0 after the perspective divide
    out.clip_position = pos.xyww;
    out.direction = vertex.position;
    return out;
}

@fragment
fn fs_skybox(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(sky_texture, sky_sampler, in.direction);
}
"#;

/// WGSL shader for the retro sun quad: a gradient disc sliced by horizontal
/// bands that scroll with `params.x`.
pub const SUN_SHADER: &str = r#"
struct Uniforms {
    projection: mat4x4<f32>,
    view: mat4x4<f32>,
    model: mat4x4<f32>,
    // x: time already scaled by the animation speed
    params: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_sun(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.projection * uniforms.view * uniforms.model
        * vec4<f32>(vertex.position, 1.0);
    out.uv = vertex.uv;
    return out;
}

@fragment
fn fs_sun(in: VertexOutput) -> @location(0) vec4<f32> {
    let time = uniforms.params.x;
    let p = in.uv * 2.0 - 1.0;
    let r = length(p);
    let edge = max(fwidth(r), 0.001);

    let radius = 0.8;
    let disc = 1.0 - smoothstep(radius - edge, radius, r);

    // bands below the horizon line, widening toward the bottom
    let band = fract(p.y * 7.0 + time * 0.2);
    let gap = clamp((0.15 - p.y) * 0.5, 0.0, 0.65);
    let cut = step(p.y, 0.15) * step(band, gap);

    let top = vec3<f32>(1.0, 0.88, 0.25);
    let bottom = vec3<f32>(1.0, 0.12, 0.62);
    let color = mix(bottom, top, clamp(p.y / radius * 0.5 + 0.5, 0.0, 1.0));

    let glow = exp(-max(r - radius, 0.0) * 9.0) * (1.0 - disc) * 0.55;
    let alpha = max(disc * (1.0 - cut), glow);
    if alpha < 0.01 {
        discard;
    }
    return vec4<f32>(color, alpha);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_points_present() {
        for (src, entries) in [
            (GRID_SHADER, ["fn vs_grid", "fn fs_grid"]),
            (SKYBOX_SHADER, ["fn vs_skybox", "fn fs_skybox"]),
            (SUN_SHADER, ["fn vs_sun", "fn fs_sun"]),
        ] {
            for entry in entries {
                assert!(src.contains(entry), "missing {entry}");
            }
            assert!(src.contains("params: vec4<f32>"));
        }
    }
}
