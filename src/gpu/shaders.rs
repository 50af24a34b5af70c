//! WGSL twins of the host fill kernels
//!
//! The permutation and the fixed-point conversions run in integer and exact
//! float arithmetic, so the uniform entry point reproduces the host output
//! bit for bit. The normal entry point goes through the device's sin/cos/log
//! and matches the host to their precision only.

/// Philox4x32-10 fill shader with `fill_uniform_f32` and `fill_normal_f32`
/// entry points. One invocation covers one counter block of four words.
pub(crate) const PHILOX_FILL_WGSL: &str = r#"
const PHILOX_M2X32_0: u32 = 0xD2511F53u;
const PHILOX_M2X32_1: u32 = 0xCD9E8D57u;
const PHILOX_W32_0: u32 = 0x9E3779B9u;
const PHILOX_W32_1: u32 = 0xBB67AE85u;
const PI: f32 = 3.14159265359;

struct FillParams {
    numel: u32,
    seed1: u32,
    seed2: u32,
    counter1: u32,
    counter2: u32,
    counter3: u32,
    _pad0: u32,
    _pad1: u32,
}

@group(0) @binding(0) var<storage, read_write> output: array<f32>;
@group(0) @binding(1) var<uniform> params: FillParams;

// Full-carry high multiply; agrees with a widening 32x64 multiply bit for bit.
fn mulhi(a: u32, b: u32) -> u32 {
    let a_lo = a & 0xFFFFu;
    let a_hi = a >> 16u;
    let b_lo = b & 0xFFFFu;
    let b_hi = b >> 16u;
    let cross1 = a_hi * b_lo + ((a_lo * b_lo) >> 16u);
    let cross2 = a_lo * b_hi + (cross1 & 0xFFFFu);
    return a_hi * b_hi + (cross1 >> 16u) + (cross2 >> 16u);
}

fn philox_round(ctr: ptr<function, vec4<u32>>, key: ptr<function, vec2<u32>>) {
    let prod0_lo = (*ctr).x * PHILOX_M2X32_0;
    let prod0_hi = mulhi((*ctr).x, PHILOX_M2X32_0);
    let prod1_lo = (*ctr).z * PHILOX_M2X32_1;
    let prod1_hi = mulhi((*ctr).z, PHILOX_M2X32_1);
    *ctr = vec4<u32>(prod1_hi ^ (*ctr).y ^ (*key).x, prod1_lo, prod0_hi ^ (*ctr).w ^ (*key).y, prod0_lo);
}

fn philox4x32_10(counter: vec4<u32>, key: vec2<u32>) -> vec4<u32> {
    var ctr = counter;
    var k = key;
    for (var round = 0u; round < 10u; round++) {
        philox_round(&ctr, &k);
        k.x = k.x + PHILOX_W32_0;
        k.y = k.y + PHILOX_W32_1;
    }
    return ctr;
}

// Fixed point with a half-ulp offset; every step is exact, output in (0, 1).
fn open01(u: u32) -> f32 {
    return (f32(u >> 9u) + 0.5) * (1.0 / 8388608.0);
}

// Arithmetic shift keeps the sign bit; output in (-1, 1), never zero.
fn open11(u: u32) -> f32 {
    return (f32(bitcast<i32>(u) >> 8u) + 0.5) * (1.0 / 8388608.0);
}

fn stream_block(block: u32) -> vec4<u32> {
    let counter = vec4<u32>(block, params.counter3, params.counter2, params.counter1);
    return philox4x32_10(counter, vec2<u32>(params.seed1, params.seed2));
}

@compute @workgroup_size(256)
fn fill_uniform_f32(@builtin(global_invocation_id) gid: vec3<u32>) {
    let base_idx = gid.x * 4u;
    if (base_idx >= params.numel) { return; }
    let random = stream_block(gid.x);
    for (var j = 0u; j < 4u; j++) {
        let idx = base_idx + j;
        if (idx < params.numel) {
            output[idx] = open01(random[j]);
        }
    }
}

@compute @workgroup_size(256)
fn fill_normal_f32(@builtin(global_invocation_id) gid: vec3<u32>) {
    let base_idx = gid.x * 4u;
    if (base_idx >= params.numel) { return; }
    let random = stream_block(gid.x);

    let theta0 = PI * open11(random.x);
    let r0 = sqrt(-2.0 * log(open01(random.y)));
    let theta1 = PI * open11(random.z);
    let r1 = sqrt(-2.0 * log(open01(random.w)));

    if (base_idx < params.numel) { output[base_idx] = r0 * cos(theta0); }
    if (base_idx + 1u < params.numel) { output[base_idx + 1u] = r0 * sin(theta0); }
    if (base_idx + 2u < params.numel) { output[base_idx + 2u] = r1 * cos(theta1); }
    if (base_idx + 3u < params.numel) { output[base_idx + 3u] = r1 * sin(theta1); }
}
"#;
