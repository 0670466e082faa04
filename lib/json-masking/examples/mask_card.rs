#![allow(clippy::print_stdout)]

use json_masking::{JsonMasker, partial};
use tracing_subscriber::EnvFilter;

/// Keeps the first six and last four digits of a card number.
///
/// Anything that does not look like a card number is returned unchanged, so
/// it gets fully masked.
fn mask_card_number(number: &str) -> String {
    let digits = number
        .chars()
        .filter(|ch| !matches!(ch, ' ' | '-'))
        .collect::<String>();
    if !(13..=19).contains(&digits.len()) || !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return number.to_string();
    }

    match (digits.get(..6), digits.get(digits.len() - 4..)) {
        (Some(first), Some(last)) => format!("{first}*****{last}"),
        _ => number.to_string(),
    }
}

fn main() -> anyhow::Result<()> {
    // RUST_LOG=json_masking=trace to see every redaction
    tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let masker = JsonMasker::builder()
        .with_blacklist(["*password", "*card.number", "*.cvv"])
        .with_partial_mask("*card.number", partial::from_fn(mask_card_number))?
        .build()?;

    let payment = r#"{
        "Id": 42,
        "Customer": { "Name": "John Doe", "Password": "somepass#here" },
        "Card": { "Number": "4622 9431 2704 9865", "Cvv": 123 },
        "Refunds": [
            { "Card": { "Number": "not a card" } }
        ]
    }"#;

    let masked = masker.mask(payment)?;
    println!("{masked}");

    Ok(())
}
