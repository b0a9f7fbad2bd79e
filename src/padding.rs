//! Fixed-width padding primitives shared by the legacy export layouts.
//!
//! The two functions truncate in opposite directions and that asymmetry is
//! part of the file format:
//!
//! - [`pad_left`] is used for numeric codes. Overflow keeps the rightmost
//!   characters, so high-order digits are dropped.
//! - [`pad_right`] is used for text. Overflow keeps the leftmost characters.
//!
//! Widths are counted in `char`s.

/// Fill character for numeric fields.
pub const ZERO: char = '0';

/// Fill character for text fields.
pub const SPACE: char = ' ';

/// Left-pads `value` with `fill` up to `width`, or keeps its rightmost `width`
/// characters when it is already that long.
///
/// # Example
///
/// ```rust
/// use vemovel_export_api::padding::pad_left;
///
/// assert_eq!(pad_left("7", 2, '0'), "07");
/// assert_eq!(pad_left("123", 2, '0'), "23");
/// ```
pub fn pad_left(value: &str, width: usize, fill: char) -> String {
    let len = value.chars().count();
    if len >= width {
        return value.chars().skip(len - width).collect();
    }

    let mut padded = String::with_capacity(width);
    padded.extend(std::iter::repeat(fill).take(width - len));
    padded.push_str(value);
    padded
}

/// Right-pads `value` with `fill` up to `width`, or keeps its leftmost `width`
/// characters when it is already that long.
///
/// # Example
///
/// ```rust
/// use vemovel_export_api::padding::pad_right;
///
/// assert_eq!(pad_right("AB", 4, ' '), "AB  ");
/// assert_eq!(pad_right("ABCDEF", 4, ' '), "ABCD");
/// ```
pub fn pad_right(value: &str, width: usize, fill: char) -> String {
    let len = value.chars().count();
    if len >= width {
        return value.chars().take(width).collect();
    }

    let mut padded = String::with_capacity(width);
    padded.push_str(value);
    padded.extend(std::iter::repeat(fill).take(width - len));
    padded
}

/// A field of `width` copies of `fill`.
pub fn blank(width: usize, fill: char) -> String {
    std::iter::repeat(fill).take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_left_fills_with_zeros() {
        assert_eq!(pad_left("5", 8, ZERO), "00000005");
        assert_eq!(pad_left("", 4, ZERO), "0000");
    }

    #[test]
    fn test_pad_left_keeps_low_order_digits() {
        assert_eq!(pad_left("123", 2, ZERO), "23");
        assert_eq!(pad_left("123456", 4, ZERO), "3456");
        assert_eq!(pad_left("1234", 4, ZERO), "1234");
    }

    #[test]
    fn test_pad_right_fills_with_spaces() {
        assert_eq!(pad_right("A VISTA", 10, SPACE), "A VISTA   ");
        assert_eq!(pad_right("", 3, SPACE), "   ");
    }

    #[test]
    fn test_pad_right_keeps_prefix() {
        assert_eq!(pad_right("12.345678", 8, SPACE), "12.34567");
        assert_eq!(pad_right("ABCD", 4, SPACE), "ABCD");
    }

    #[test]
    fn test_multibyte_characters_count_as_one() {
        assert_eq!(pad_right("CARTÃO", 8, SPACE), "CARTÃO  ");
        assert_eq!(pad_right("AÇÃOXYZ", 3, SPACE), "AÇÃ");
        assert_eq!(pad_left("ÇÃO", 2, ZERO), "ÃO");
    }

    #[test]
    fn test_zero_width() {
        assert_eq!(pad_left("99", 0, ZERO), "");
        assert_eq!(pad_right("AB", 0, SPACE), "");
    }

    #[test]
    fn test_blank() {
        assert_eq!(blank(4, SPACE), "    ");
        assert_eq!(blank(4, ZERO), "0000");
        assert_eq!(blank(0, ZERO), "");
    }
}
