//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.


#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_chip_id_generator(id in chip_id()) {
            prop_assert!(crate::core::chip::chip_profile(&id).is_some());
        }

        #[test]
        fn test_serial_port_generator(port in serial_port()) {
            prop_assert!(port.starts_with("/dev/"));
        }

        #[test]
        fn test_variant_name_generator(name in variant_name()) {
            prop_assert!(name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        }
    }
}
