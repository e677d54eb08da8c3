//! Property tests for callback signature verification

#![allow(clippy::unwrap_used)]

use openroot_razorpay::KeySecret;
use proptest::prelude::*;

/// Replace the char at `index` (wrapped to the char count) with a
/// different one
fn substitute_char(text: &str, index: usize, replacement: char) -> String {
    let position = index % text.chars().count();
    text.chars()
        .enumerate()
        .map(|(i, c)| match (i == position, c == replacement) {
            (false, _) => c,
            (true, false) => replacement,
            (true, true) if c == 'a' => 'b',
            (true, true) => 'a',
        })
        .collect()
}

proptest! {
    #[test]
    fn own_signature_always_verifies(
        secret in ".{1,64}",
        order_id in "\\PC{0,200}",
        payment_id in "\\PC{0,200}",
    ) {
        let key = KeySecret::new(secret);
        let signature = key.sign(&order_id, &payment_id).unwrap();

        prop_assert!(key.verify(&order_id, &payment_id, &signature).unwrap());
    }

    #[test]
    fn verification_is_deterministic(
        order_id in "order_[A-Za-z0-9]{1,20}",
        payment_id in "pay_[A-Za-z0-9]{1,20}",
        signature in "[0-9a-f]{64}",
    ) {
        let key = KeySecret::new("testsecret");

        prop_assert_eq!(
            key.verify(&order_id, &payment_id, &signature).unwrap(),
            key.verify(&order_id, &payment_id, &signature).unwrap()
        );
    }

    #[test]
    fn changing_one_signature_char_fails(
        order_id in "order_[A-Za-z0-9]{1,20}",
        payment_id in "pay_[A-Za-z0-9]{1,20}",
        index in 0usize..64,
    ) {
        let key = KeySecret::new("testsecret");
        let signature = key.sign(&order_id, &payment_id).unwrap();

        let mut bytes = signature.into_bytes();
        bytes[index] = if bytes[index] == b'f' { b'e' } else { b'f' };
        let tampered = String::from_utf8(bytes).unwrap();

        prop_assert!(!key.verify(&order_id, &payment_id, &tampered).unwrap());
    }

    #[test]
    fn substituting_one_order_id_char_fails(
        order_id in "\\PC{1,40}",
        payment_id in "\\PC{1,40}",
        index in any::<usize>(),
        replacement in any::<char>(),
    ) {
        let key = KeySecret::new("testsecret");
        let signature = key.sign(&order_id, &payment_id).unwrap();
        let other_order = substitute_char(&order_id, index, replacement);

        prop_assert_ne!(&other_order, &order_id);
        prop_assert!(!key.verify(&other_order, &payment_id, &signature).unwrap());
    }

    #[test]
    fn substituting_one_payment_id_char_fails(
        order_id in "\\PC{1,40}",
        payment_id in "\\PC{1,40}",
        index in any::<usize>(),
        replacement in any::<char>(),
    ) {
        let key = KeySecret::new("testsecret");
        let signature = key.sign(&order_id, &payment_id).unwrap();
        let other_payment = substitute_char(&payment_id, index, replacement);

        prop_assert_ne!(&other_payment, &payment_id);
        prop_assert!(!key.verify(&order_id, &other_payment, &signature).unwrap());
    }

    #[test]
    fn changing_secret_fails(
        order_id in "order_[A-Za-z0-9]{1,20}",
        payment_id in "pay_[A-Za-z0-9]{1,20}",
    ) {
        let signature = KeySecret::new("testsecret").sign(&order_id, &payment_id).unwrap();

        prop_assert!(!KeySecret::new("testsecreu").verify(&order_id, &payment_id, &signature).unwrap());
    }
}

#[test]
fn unicode_and_very_long_ids_round_trip() {
    let key = KeySecret::new("testsecret");
    let order_id = "order_क्लास_🎓";
    let payment_id = "pay_".to_string() + &"x".repeat(10_000);

    let signature = key.sign(order_id, &payment_id).unwrap();
    assert!(key.verify(order_id, &payment_id, &signature).unwrap());
}

#[test]
fn every_position_of_a_multibyte_id_is_covered() {
    let key = KeySecret::new("testsecret");
    let order_id = "order_क्लास_🎓";
    let payment_id = "pay_₹1769";
    let signature = key.sign(order_id, payment_id).unwrap();

    for index in 0..order_id.chars().count() {
        for replacement in ['x', 'é', '🎓'] {
            let other_order = substitute_char(order_id, index, replacement);
            assert!(!key.verify(&other_order, payment_id, &signature).unwrap(), "{other_order}");
        }
    }
    for index in 0..payment_id.chars().count() {
        let other_payment = substitute_char(payment_id, index, '₹');
        assert!(!key.verify(order_id, &other_payment, &signature).unwrap(), "{other_payment}");
    }
}

#[test]
fn fixed_vector_from_known_inputs() {
    let key = KeySecret::new("testsecret");

    assert!(
        key.verify(
            "order_abc",
            "pay_xyz",
            "3dd5062c53f808ef094a994bb1e6be30c96d9d105a92a3e9d2bf1e23d040971a"
        )
        .unwrap()
    );
}
