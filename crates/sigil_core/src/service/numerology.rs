//! Numerology profile derivation for sigil generation.
//!
//! Rules:
//! - Letters map to Pythagorean values `a=1 .. i=9, j=1 ..`.
//! - Expression sums all letters, soul urge sums vowels, personality sums
//!   consonants.
//! - Sums reduce by digit sum until `<= 9`, keeping master numbers 11/22/33.
//! - Text without letters yields zeros and the `Unformed` archetype.

use crate::model::sigil::NumerologyProfile;

const MASTER_NUMBERS: [u32; 3] = [11, 22, 33];

/// Derives the numerology profile of an intention.
pub fn derive_numerology(intention: &str) -> NumerologyProfile {
    let mut expression = 0_u32;
    let mut soul_urge = 0_u32;
    let mut personality = 0_u32;

    for letter in intention
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
    {
        let value = letter_value(letter);
        expression += value;
        if is_vowel(letter) {
            soul_urge += value;
        } else {
            personality += value;
        }
    }

    let expression = reduce(expression);
    NumerologyProfile {
        numbers: vec![expression, reduce(soul_urge), reduce(personality)],
        archetype: archetype(expression).to_string(),
        vibration: vibration(expression).to_string(),
    }
}

/// Reduces a sum to a single digit, preserving master numbers.
pub fn reduce(mut value: u32) -> u8 {
    while value > 9 && !MASTER_NUMBERS.contains(&value) {
        value = digit_sum(value);
    }
    // Loop exit guarantees value <= 33.
    value as u8
}

fn digit_sum(mut value: u32) -> u32 {
    let mut sum = 0;
    while value > 0 {
        sum += value % 10;
        value /= 10;
    }
    sum
}

fn letter_value(letter: char) -> u32 {
    (u32::from(letter) - u32::from('a')) % 9 + 1
}

fn is_vowel(letter: char) -> bool {
    matches!(letter, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn archetype(number: u8) -> &'static str {
    match number {
        1 => "Initiator",
        2 => "Harmonizer",
        3 => "Creator",
        4 => "Builder",
        5 => "Seeker",
        6 => "Nurturer",
        7 => "Mystic",
        8 => "Sovereign",
        9 => "Sage",
        11 => "Illuminator",
        22 => "Master Builder",
        33 => "Master Teacher",
        _ => "Unformed",
    }
}

fn vibration(number: u8) -> &'static str {
    match number {
        11 | 22 | 33 => "master vibration, amplified and demanding",
        n if n % 2 == 1 => "active vibration, outward and directive",
        0 => "silent vibration, awaiting form",
        _ => "receptive vibration, inward and magnetic",
    }
}

#[cfg(test)]
mod tests {
    use super::{derive_numerology, reduce};

    #[test]
    fn reduce_keeps_master_numbers() {
        assert_eq!(reduce(11), 11);
        assert_eq!(reduce(29), 11);
        assert_eq!(reduce(38), 11);
        assert_eq!(reduce(99), 9);
        assert_eq!(reduce(7), 7);
    }

    #[test]
    fn derives_expression_soul_and_personality() {
        // l=3 o=6 v=4 e=5 -> vowels 11, consonants 7, total 18 -> 9
        let profile = derive_numerology("Love");
        assert_eq!(profile.numbers, vec![9, 11, 7]);
        assert_eq!(profile.archetype, "Sage");
    }

    #[test]
    fn text_without_letters_is_unformed() {
        let profile = derive_numerology("123 !!");
        assert_eq!(profile.numbers, vec![0, 0, 0]);
        assert_eq!(profile.archetype, "Unformed");
    }
}
