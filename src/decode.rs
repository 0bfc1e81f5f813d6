//! Conversion of raw output register bytes into physical units.
//!
//! These are pure functions, so they can be fed bytes captured elsewhere
//! (a logic analyser trace, a FIFO dump) as well as the driver's own reads.

/// Temperature in °C from `OUT_T_MSB`/`OUT_T_LSB`.
///
/// The register pair is read as a signed 16-bit value and scaled by 1/255,
/// not the datasheet's 1/256. Readings must stay comparable with values
/// already recorded using this scale.
pub fn temperature(bytes: [u8; 2]) -> f32 {
    cast::f32(i16::from_be_bytes(bytes)) / 255.0
}

/// Pressure in whole pascals from `OUT_P_MSB`/`CSB`/`LSB`.
///
/// The 20-bit unsigned Q18.2 value is left-aligned in the 24 bits, so the
/// low six bits (two fractional and four padding) are dropped.
pub fn pressure(bytes: [u8; 3]) -> u32 {
    let [msb, csb, lsb] = bytes;
    ((u32::from(msb) << 16) | (u32::from(csb) << 8) | u32::from(lsb)) >> 6
}

/// Altitude in metres from `OUT_P_MSB`/`CSB`/`LSB` in altimeter mode.
///
/// The bytes fill the top 24 bits of an `i32`, which gives Q16.16 metres
/// with the sign of the MSB carried through, so readings below the
/// reference level come out negative.
pub fn altitude(bytes: [u8; 3]) -> f32 {
    let [msb, csb, lsb] = bytes;
    cast::f32(i32::from_be_bytes([msb, csb, lsb, 0])) / 65536.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_uses_255_scale() {
        assert_eq!(temperature([0x00, 0x00]), 0.0);
        assert_eq!(temperature([0x19, 0x00]), 6400.0 / 255.0);
        assert_eq!(temperature([0x17, 0x40]), f32::from(0x1740_u16) / 255.0);
    }

    #[test]
    fn temperature_below_zero() {
        // -5.0 °C on the part: 0xFB00
        assert_eq!(temperature([0xFB, 0x00]), -1280.0 / 255.0);
        assert!(temperature([0xFF, 0xF0]) < 0.0);
    }

    #[test]
    fn pressure_drops_fraction_bits() {
        // 101 326.25 Pa: 405 305 quarter-pascals, left-aligned by 4
        let raw = 405_305_u32 << 4;
        let bytes = [(raw >> 16) as u8, (raw >> 8) as u8, raw as u8];
        assert_eq!(pressure(bytes), 101_326);
        assert_eq!(pressure([0x00, 0x00, 0x3F]), 0);
        assert_eq!(pressure([0xFF, 0xFF, 0xFF]), 0x00FF_FFFF >> 6);
    }

    #[test]
    fn pressure_matches_shift_formula() {
        let samples: [(u8, u8, u8); 3] = [(0x62, 0xF2, 0x80), (0x01, 0x00, 0x40), (0x80, 0x7F, 0xC0)];
        for (msb, csb, lsb) in samples {
            let expected = ((u32::from(msb) << 16) | (u32::from(csb) << 8) | u32::from(lsb)) >> 6;
            assert_eq!(pressure([msb, csb, lsb]), expected);
        }
    }

    #[test]
    fn altitude_positive() {
        // 125.5 m
        assert_eq!(altitude([0x00, 0x7D, 0x80]), 125.5);
        assert_eq!(altitude([0x01, 0x00, 0x00]), 256.0);
    }

    #[test]
    fn altitude_below_reference_is_negative() {
        // -12.25 m
        assert_eq!(altitude([0xFF, 0xF3, 0xC0]), -12.25);
        assert_eq!(altitude([0x80, 0x00, 0x00]), -32768.0);
    }

    #[test]
    fn decoding_is_deterministic() {
        let bytes = [0x3A, 0x9C, 0x10];
        assert_eq!(pressure(bytes), pressure(bytes));
        assert_eq!(altitude(bytes).to_bits(), altitude(bytes).to_bits());
        assert_eq!(
            temperature([0x3A, 0x9C]).to_bits(),
            temperature([0x3A, 0x9C]).to_bits()
        );
    }
}
