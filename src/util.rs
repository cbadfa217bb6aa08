/// Round a double to the closest f32 that is less than or equal to it.
///
/// Used for cached bounding boxes, which must contain the exact extent.
pub(crate) fn f64_to_f32_down(d: f64) -> f32 {
    if d > f32::MAX as f64 {
        return f32::MAX;
    }
    if d <= f32::MIN as f64 {
        return f32::MIN;
    }
    let f = d as f32;
    if f as f64 <= d {
        return f;
    }
    next_toward_neg_infinity(f)
}

/// Round a double to the closest f32 that is greater than or equal to it.
pub(crate) fn f64_to_f32_up(d: f64) -> f32 {
    if d >= f32::MAX as f64 {
        return f32::MAX;
    }
    if d < f32::MIN as f64 {
        return f32::MIN;
    }
    let f = d as f32;
    if f as f64 >= d {
        return f;
    }
    next_toward_pos_infinity(f)
}

fn next_toward_neg_infinity(f: f32) -> f32 {
    if f == 0.0 {
        // smallest negative subnormal
        return f32::from_bits(0x8000_0001);
    }
    let bits = f.to_bits();
    if f > 0.0 {
        f32::from_bits(bits - 1)
    } else {
        f32::from_bits(bits + 1)
    }
}

fn next_toward_pos_infinity(f: f32) -> f32 {
    if f == 0.0 {
        return f32::from_bits(0x0000_0001);
    }
    let bits = f.to_bits();
    if f > 0.0 {
        f32::from_bits(bits + 1)
    } else {
        f32::from_bits(bits - 1)
    }
}
