use rand::Rng;
use rand::rngs::SmallRng;

const MAX_DIGITS: usize = 4;

/// A random integer token of 1 to 4 digits, never zero-padded.
pub fn random_number_token(rng: &mut SmallRng) -> String {
    let len = rng.gen_range(1..=MAX_DIGITS);
    (0..len)
        .map(|i| {
            let digit = if i == 0 && len > 1 {
                rng.gen_range(1..10u8)
            } else {
                rng.gen_range(0..10u8)
            };
            (b'0' + digit) as char
        })
        .collect()
}
