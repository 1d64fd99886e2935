const MAX_FRACTION_DIGITS: usize = 3;

pub fn format_quantity(quantity: i64) -> String {
    quantity.to_string()
}

/// `en-US` rendering: `,` groups thousands, at most three fraction digits
/// (ties away from zero), trailing zeros dropped.
pub fn format_amount(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    // Display prints the shortest round-trip decimal and never switches to exponent form.
    let plain = format!("{}", value.abs());
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (plain.as_str(), ""),
    };

    let (int_digits, frac_digits) = round_fraction(int_part, frac_part, MAX_FRACTION_DIGITS);
    let frac_digits = frac_digits.trim_end_matches('0');

    let mut out = String::with_capacity(int_digits.len() + frac_digits.len() + 8);
    if value.is_sign_negative() {
        out.push('-');
    }
    out.push_str(&group_thousands(&int_digits));
    if !frac_digits.is_empty() {
        out.push('.');
        out.push_str(frac_digits);
    }
    out
}

/// Cuts `frac` to `keep` digits, carrying into the integer part when the first dropped digit is 5 or more.
fn round_fraction(int_part: &str, frac: &str, keep: usize) -> (String, String) {
    if frac.len() <= keep {
        return (int_part.to_string(), frac.to_string());
    }

    let round_up = frac.as_bytes()[keep] >= b'5';
    let mut digits: Vec<u8> = int_part.bytes().chain(frac.bytes().take(keep)).collect();

    if round_up {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - keep;
    let frac_digits = String::from_utf8_lossy(&digits[split..]).into_owned();
    let int_digits = String::from_utf8_lossy(&digits[..split]).into_owned();
    (int_digits, frac_digits)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
