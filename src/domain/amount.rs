/// Amounts are whole units. Fractional input is kept on disk as typed but
/// only its integer part takes part in arithmetic.
pub type Amount = i64;

/// Recover the integer value of a stored amount.
///
/// Decimal only: leading whitespace and a single sign are accepted, then the
/// leading run of ASCII digits is taken and everything after it is ignored.
/// There is no radix prefix handling, so "0x1A" reads as 0.
/// Example: "20" -> 20, "12.75" -> 12, " -3" -> -3, "5usd" -> 5, "abc" -> None
pub fn parse_amount(input: &str) -> Option<Amount> {
    let input = input.trim_start();
    let (negative, rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    let digits_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits_len == 0 {
        return None;
    }

    // Overlong digit runs saturate.
    let value = rest[..digits_len]
        .parse::<Amount>()
        .unwrap_or(Amount::MAX);
    Some(if negative { -value } else { value })
}

/// Shape check used by the command line before an amount is stored.
pub fn is_numeric_amount(input: &str) -> bool {
    input
        .trim()
        .parse::<f64>()
        .map(|value| value.is_finite())
        .unwrap_or(false)
}
