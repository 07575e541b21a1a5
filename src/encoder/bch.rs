/// BCH encoding for QR format and version information

/// BCH(15,5) generator: x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
pub const G15: u32 = 0b101_0011_0111;
/// BCH(18,6) generator: x^12 + x^11 + x^10 + x^9 + x^8 + x^5 + x^2 + 1
pub const G18: u32 = 0b1_1111_0010_0101;
/// XOR mask applied to the 15-bit format word
pub const G15_MASK: u32 = 0b101_0100_0001_0010;

/// Number of significant bits
pub fn bch_digit(data: u32) -> u32 {
    u32::BITS - data.leading_zeros()
}

fn bch_remainder(data: u32, generator: u32) -> u32 {
    let g_digit = bch_digit(generator);
    let mut d = data;
    while bch_digit(d) >= g_digit {
        d ^= generator << (bch_digit(d) - g_digit);
    }
    d
}

/// 5-bit format word (level bits << 3 | mask) to the masked 15-bit codeword
pub fn bch_type_info(data: u32) -> u32 {
    let d = data << 10;
    (d | bch_remainder(d, G15)) ^ G15_MASK
}

/// 6-bit version number to the 18-bit codeword
pub fn bch_type_number(data: u32) -> u32 {
    let d = data << 12;
    d | bch_remainder(d, G18)
}
