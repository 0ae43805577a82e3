//! Configuration access port trait.

use rust_decimal::Decimal;

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    /// `None` when the key is missing or does not parse as a decimal.
    fn get_decimal(&self, section: &str, key: &str) -> Option<Decimal>;
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;
}
