/// Electricity balance of a dormitory room
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceResult {
    pub room_number: String,
    pub balance: f64,
}

impl BalanceResult {
    /// Balance to two decimals, correctly rounded from the binary value.
    /// `1.005` is stored as `1.00499..` and so shows as `1.00`.
    pub fn display_balance(&self) -> String {
        format!("{:.2}", self.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balance(value: f64) -> BalanceResult {
        BalanceResult {
            room_number: "101".to_string(),
            balance: value,
        }
    }

    #[test]
    fn test_display_balance_rounds_to_cents() {
        assert_eq!(balance(12.345).display_balance(), "12.35");
        assert_eq!(balance(0.005).display_balance(), "0.01");
    }

    #[test]
    fn test_display_balance_follows_stored_value() {
        // Each of these sits just below the written midpoint in binary
        assert_eq!(balance(1.005).display_balance(), "1.00");
        assert_eq!(balance(0.145).display_balance(), "0.14");
        assert_eq!(balance(0.015).display_balance(), "0.01");
        assert_eq!(balance(2.675).display_balance(), "2.67");
    }

    #[test]
    fn test_display_balance_pads() {
        assert_eq!(balance(3.0).display_balance(), "3.00");
        assert_eq!(balance(-1.5).display_balance(), "-1.50");
    }
}
