use rust_decimal::Decimal;
use validator::ValidationError;

// ============================================================================
// Shared field validators for request types
// ============================================================================

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank").with_message("must not be blank".into()));
    }
    Ok(())
}

pub fn positive_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() || price.is_zero() {
        return Err(ValidationError::new("positive").with_message("must be greater than 0".into()));
    }
    Ok(())
}

/// Prices are stored as NUMERIC(19, 2); trailing zeros beyond that are fine
pub const PRICE_SCALE: u32 = 2;

pub fn price_scale(price: &Decimal) -> Result<(), ValidationError> {
    if price.normalize().scale() > PRICE_SCALE {
        return Err(ValidationError::new("scale")
            .with_message("must have at most 2 decimal places".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("sku").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank(" \t").is_err());
    }

    #[test]
    fn test_positive_price() {
        assert!(positive_price(&Decimal::new(1, 2)).is_ok());
        assert!(positive_price(&Decimal::ZERO).is_err());

        let err = positive_price(&Decimal::new(-5, 0)).unwrap_err();
        assert_eq!(err.message.as_deref(), Some("must be greater than 0"));
    }

    #[test]
    fn test_price_scale() {
        assert!(price_scale(&Decimal::new(1050, 2)).is_ok());
        assert!(price_scale(&Decimal::new(10, 0)).is_ok());
        assert!(price_scale(&Decimal::new(10500, 3)).is_ok()); // 10.500

        let err = price_scale(&Decimal::new(10005, 3)).unwrap_err(); // 10.005
        assert_eq!(err.message.as_deref(), Some("must have at most 2 decimal places"));
    }
}
