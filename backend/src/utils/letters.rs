use rand::Rng;

/// Letters a grid cell may hold
pub const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Draw a filler letter, uniform over A-Z
pub fn random_letter<R: Rng>(rng: &mut R) -> char {
    ALPHABET[rng.random_range(0..ALPHABET.len())] as char
}

/// Map accented uppercase Latin letters to their base letter
fn fold_accent(ch: char) -> char {
    match ch {
        'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => 'A',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => 'O',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'Ñ' => 'N',
        'Ç' => 'C',
        _ => ch,
    }
}

/// Normalize a word for placement in the grid.
///
/// Uppercases, drops whitespace and hyphens, and folds accents. Returns `None`
/// when the result is empty or still holds anything outside A-Z.
pub fn normalize_word(word: &str) -> Option<String> {
    let normalized: String = word
        .chars()
        .filter(|ch| !ch.is_whitespace() && *ch != '-')
        .flat_map(char::to_uppercase)
        .map(fold_accent)
        .collect();

    if normalized.is_empty() || !normalized.bytes().all(|b| b.is_ascii_uppercase()) {
        return None;
    }

    Some(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    #[test]
    fn test_random_letter_is_uppercase() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let letter = random_letter(&mut rng);
            assert!(letter.is_ascii_uppercase(), "'{}' is not A-Z", letter);
        }
    }

    #[test]
    fn test_random_letter_covers_alphabet() {
        let mut rng = StdRng::seed_from_u64(42);
        let seen: HashSet<char> = (0..5000).map(|_| random_letter(&mut rng)).collect();
        assert_eq!(seen.len(), 26);
    }

    #[test]
    fn test_normalize_uppercases() {
        assert_eq!(normalize_word("luna").as_deref(), Some("LUNA"));
        assert_eq!(normalize_word("  Sol ").as_deref(), Some("SOL"));
    }

    #[test]
    fn test_normalize_folds_accents_and_separators() {
        assert_eq!(normalize_word("corazón").as_deref(), Some("CORAZON"));
        assert_eq!(normalize_word("Año nuevo").as_deref(), Some("ANONUEVO"));
        assert_eq!(normalize_word("pingüino").as_deref(), Some("PINGUINO"));
        assert_eq!(normalize_word("arco-iris").as_deref(), Some("ARCOIRIS"));
    }

    #[test]
    fn test_normalize_rejects_non_letters() {
        assert_eq!(normalize_word(""), None);
        assert_eq!(normalize_word("   "), None);
        assert_eq!(normalize_word("H2O"), None);
        assert_eq!(normalize_word("¿qué?"), None);
    }
}
