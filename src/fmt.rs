/// Format a ledger amount for display. The sign is flipped so that spending
/// shows as a positive currency amount, with German number formatting and a
/// non-breaking space before the euro sign: 1.234,56 €
pub fn money(value: f64) -> String {
    let display = -value;
    let negative = display < 0.0;
    let cents = format!("{:.2}", display.abs());
    let parts: Vec<&str> = cents.split('.').collect();
    let int_part = parts[0];
    let dec_part = parts[1];

    let mut grouped = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    if negative {
        format!("-{grouped},{dec_part}\u{a0}€")
    } else {
        format!("{grouped},{dec_part}\u{a0}€")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_flips_sign_for_display() {
        // stored -45.30 is spending, shown positive
        assert_eq!(money(-45.30), "45,30\u{a0}€");
        assert_eq!(money(2000.0), "-2.000,00\u{a0}€");
    }

    #[test]
    fn test_money_grouping() {
        assert_eq!(money(-1234567.89), "1.234.567,89\u{a0}€");
        assert_eq!(money(-999.99), "999,99\u{a0}€");
        assert_eq!(money(-1000.0), "1.000,00\u{a0}€");
    }

    #[test]
    fn test_money_zero() {
        assert_eq!(money(0.0), "0,00\u{a0}€");
    }
}
