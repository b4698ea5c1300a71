//! Textual encodings of entropy components.

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Appends the lowercase base-36 representation of `value` to `dst`.
pub(crate) fn push_base36(dst: &mut String, value: u128) {
    // u128::MAX takes 25 digits in base 36
    let mut buffer = [0u8; 25];
    let mut pos = buffer.len();
    let mut n = value;
    loop {
        pos -= 1;
        buffer[pos] = DIGITS[(n % 36) as usize];
        n /= 36;
        if n == 0 {
            break;
        }
    }
    dst.extend(buffer[pos..].iter().map(|&c| c as char));
}

/// Returns the lowercase base-36 representation of `value`.
pub(crate) fn base36(value: u128) -> String {
    let mut dst = String::new();
    push_base36(&mut dst, value);
    dst
}

/// Appends the lowercase base-36 representation of `value`, left-padded with `'0'` to at
/// least `width` digits.
pub(crate) fn push_base36_padded(dst: &mut String, value: u128, width: usize) {
    let digits = base36(value);
    dst.extend(std::iter::repeat('0').take(width.saturating_sub(digits.len())));
    dst.push_str(&digits);
}

/// Appends the lowercase hexadecimal representation of `bytes` to `dst`.
pub(crate) fn push_hex(dst: &mut String, bytes: &[u8]) {
    for &e in bytes {
        dst.push(DIGITS[(e >> 4) as usize] as char);
        dst.push(DIGITS[(e & 15) as usize] as char);
    }
}
