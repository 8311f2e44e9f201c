//! Fixed-point conversion and packing helpers for geometry engine commands.
//!
//! Converts f32 attributes to the DS fixed-point operand formats:
//! - 4.12 signed fixed-point (v16) for vertex positions
//! - 1.9 signed fixed-point (v10) for normal components
//! - 12.4 signed fixed-point (t16) for texture coordinates
//!
//! None of the conversions validate their input. Values outside the
//! representable range wrap to the target width, which is exactly what the
//! hardware does with an oversized operand.

/// Largest v10 input that is still scaled; anything above saturates to 0x1FF.
const V10_MAX_INPUT: f32 = 0.998;

/// Convert f32 to 4.12 signed fixed-point (`floattov16`).
///
/// Range: -8.0 to +7.9998 (1/4096 resolution). Larger magnitudes wrap.
pub fn float_to_v16(val: f32) -> i16 {
    (val * 4096.0) as i32 as i16
}

/// Convert f32 to 1.9 signed fixed-point (`floattov10`).
///
/// Inputs above 0.998 saturate to 0x1FF, the largest positive 10-bit value.
pub fn float_to_v10(val: f32) -> i16 {
    if val > V10_MAX_INPUT {
        0x1FF
    } else {
        (val * 512.0) as i32 as i16
    }
}

/// Convert f32 to 12.4 signed fixed-point (`floattot16`).
pub fn float_to_t16(val: f32) -> i16 {
    (val * 16.0) as i32 as i16
}

/// Pack two v16 values into a VERTEX16 parameter word.
pub fn vertex_pack(x: i16, y: i16) -> u32 {
    ((x as i32 & 0xFFFF) | ((y as i32) << 16)) as u32
}

/// Pack three v10 values into a NORMAL parameter word.
///
/// Z is not masked: its sign bits fill the top of the word.
pub fn normal_pack(x: i16, y: i16, z: i16) -> u32 {
    ((x as i32 & 0x3FF) | ((y as i32 & 0x3FF) << 10) | ((z as i32) << 20)) as u32
}

/// Pack two t16 values into a TEXCOORD parameter word.
pub fn texture_pack(u: i16, v: i16) -> u32 {
    ((u as i32 & 0xFFFF) | ((v as i32) << 16)) as u32
}

/// Pack 5-bit channels into an RGB15 color word.
pub fn rgb15(r: u8, g: u8, b: u8) -> u32 {
    (r as u32) | ((g as u32) << 5) | ((b as u32) << 10)
}

/// Scale an 8-bit color channel down to 5 bits (`channel * 32 / 256`).
pub fn channel_to_5bit(channel: u8) -> u8 {
    (channel as u32 * 32 / 256) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v16_one() {
        assert_eq!(float_to_v16(1.0), 4096);
        assert_eq!(float_to_v16(-1.0), -4096);
        assert_eq!(float_to_v16(0.5), 2048);
    }

    #[test]
    fn v16_truncates_toward_zero() {
        // 0.0001 * 4096 = 0.4096
        assert_eq!(float_to_v16(0.0001), 0);
        assert_eq!(float_to_v16(-0.0001), 0);
    }

    #[test]
    fn v16_wraps_out_of_range() {
        // 8.0 * 4096 = 32768, one past i16::MAX
        assert_eq!(float_to_v16(8.0), i16::MIN);
    }

    #[test]
    fn v10_scales_below_limit() {
        for &v in &[-1.0f32, -0.5, 0.0, 0.25, 0.5, 0.75, 0.998] {
            assert_eq!(float_to_v10(v), (v * 512.0).floor() as i16, "v = {v}");
        }
    }

    #[test]
    fn v10_saturates_above_limit() {
        assert_eq!(float_to_v10(0.999), 0x1FF);
        assert_eq!(float_to_v10(1.0), 511);
        assert_eq!(float_to_v10(4.0), 511);
    }

    #[test]
    fn t16_scale() {
        assert_eq!(float_to_t16(1.0), 16);
        assert_eq!(float_to_t16(0.5), 8);
        assert_eq!(float_to_t16(-0.25), -4);
    }

    #[test]
    fn vertex_pack_positive() {
        assert_eq!(vertex_pack(4096, 2048), 0x0800_1000);
    }

    #[test]
    fn vertex_pack_negative_low_half_is_masked() {
        assert_eq!(vertex_pack(-4096, 0), 0x0000_F000);
    }

    #[test]
    fn vertex_pack_negative_high_half_keeps_sign() {
        assert_eq!(vertex_pack(0, -1), 0xFFFF_0000);
    }

    #[test]
    fn normal_pack_up() {
        // (0, 511, 0)
        assert_eq!(normal_pack(0, 511, 0), 511 << 10);
    }

    #[test]
    fn normal_pack_negative_z() {
        assert_eq!(normal_pack(0, 0, -512), 0xE000_0000);
    }

    #[test]
    fn normal_pack_masks_x_and_y() {
        assert_eq!(normal_pack(-1, 0, 0), 0x3FF);
        assert_eq!(normal_pack(0, -1, 0), 0x3FF << 10);
    }

    #[test]
    fn texture_pack_layout() {
        assert_eq!(texture_pack(16, 8), (8 << 16) | 16);
        assert_eq!(texture_pack(-16, 0), 0xFFF0);
    }

    #[test]
    fn rgb15_channels() {
        assert_eq!(rgb15(31, 0, 0), 31);
        assert_eq!(rgb15(0, 31, 0), 992);
        assert_eq!(rgb15(0, 0, 31), 31744);
        assert_eq!(rgb15(31, 31, 31), 0x7FFF);
    }

    #[test]
    fn channel_scaling_truncates() {
        assert_eq!(channel_to_5bit(255), 31);
        assert_eq!(channel_to_5bit(7), 0);
        assert_eq!(channel_to_5bit(8), 1);
        assert_eq!(channel_to_5bit(128), 16);
    }
}
