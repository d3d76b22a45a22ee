//! Display masking for decrypted card numbers

/// Fallback mask for inputs too short to partially reveal
const FALLBACK_MASK: &str = "****";

/// Mask a decrypted card number for display
///
/// All but the last 4 characters are replaced with `*`; the last 4 are
/// kept verbatim. Inputs shorter than 4 characters (including the empty
/// string) produce the fixed fallback mask. Pure function; it must only
/// ever see plaintext pulled through the decrypt path, never the stored
/// ciphertext.
pub fn mask_card_number(card_number: &str) -> String {
    let chars: Vec<char> = card_number.chars().collect();
    if chars.len() < 4 {
        return FALLBACK_MASK.to_string();
    }

    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}
