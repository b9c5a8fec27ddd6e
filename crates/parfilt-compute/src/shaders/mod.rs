//! WGSL shader sources for GPU compute pipelines.
//!
//! WGSL has no 8-bit type, so u8 samples travel packed four to a u32
//! word. Each invocation produces one whole output word, so no two
//! invocations ever write the same word and the pass needs no atomics.
//! All arithmetic is i32 and mirrors the sequential reference exactly,
//! including truncating division in the normalize step.

#![cfg_attr(not(feature = "wgpu"), allow(dead_code))]

/// 2D convolution over packed u8 samples with replicate borders.
pub const CONVOLVE: &str = r#"
@group(0) @binding(0) var<storage, read> src: array<u32>;
@group(0) @binding(1) var<storage, read_write> dst: array<u32>;
@group(0) @binding(2) var<uniform> dims: vec4<u32>;     // w, h, c, total_samples
@group(0) @binding(3) var<uniform> kparams: vec4<i32>;  // size, divisor, bias, 0
@group(0) @binding(4) var<storage, read> weights: array<i32>;

// Replicate border: out-of-range coordinates clamp to the nearest edge.
fn clamp_coord(coord: i32, len: u32) -> u32 {
    return u32(clamp(coord, 0, i32(len) - 1));
}

fn load_sample(index: u32) -> i32 {
    let word = src[index / 4u];
    let shift = (index % 4u) * 8u;
    return i32((word >> shift) & 0xffu);
}

fn convolve_at(x: u32, y: u32, c: u32) -> u32 {
    let size = u32(kparams.x);
    let radius = i32(size / 2u);

    var sum: i32 = 0;
    for (var ky = 0u; ky < size; ky = ky + 1u) {
        let sy = clamp_coord(i32(y) + i32(ky) - radius, dims.y);
        for (var kx = 0u; kx < size; kx = kx + 1u) {
            let sx = clamp_coord(i32(x) + i32(kx) - radius, dims.x);
            let sample = load_sample((sy * dims.x + sx) * dims.z + c);
            sum = sum + weights[ky * size + kx] * sample;
        }
    }

    let v = (sum + kparams.y / 2) / kparams.y + kparams.z;
    return u32(clamp(v, 0, 255));
}

@compute @workgroup_size(256)
fn main(@builtin(global_invocation_id) id: vec3<u32>) {
    let word = id.x;
    let total = dims.w;
    let total_words = (total + 3u) / 4u;
    if word >= total_words { return; }

    var packed = 0u;
    for (var lane = 0u; lane < 4u; lane = lane + 1u) {
        let s = word * 4u + lane;
        if s >= total { break; }

        let c = s % dims.z;
        let px = s / dims.z;
        let x = px % dims.x;
        let y = px / dims.x;
        packed = packed | (convolve_at(x, y, c) << (lane * 8u));
    }
    dst[word] = packed;
}
"#;
