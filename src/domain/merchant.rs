use super::payload::merchant_account_field;
use crate::error::{PixError, Result};
use deunicode::deunicode;
use serde::Serialize;

pub const MAX_NAME_LEN: usize = 25;
pub const MAX_CITY_LEN: usize = 15;

/// Reduces free text to upper-case ASCII letters, digits and spaces, then cuts it
/// to `max_bytes`.
///
/// Non-ASCII text is transliterated first (`São` becomes `SAO`, `Straße`
/// becomes `STRASSE`), other ASCII whitespace becomes a space and everything
/// else is dropped. Applying it to its own output is a no-op.
pub fn normalize(input: &str, max_bytes: usize) -> String {
    deunicode(input)
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() => Some(c.to_ascii_uppercase()),
            c if c.is_ascii_whitespace() => Some(' '),
            _ => None,
        })
        .take(max_bytes)
        .collect()
}

/// Identity of the merchant receiving payments.
///
/// Built once, then handed to the payload builder. Name and city are already
/// normalized and truncated, so every payload uses the same bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MerchantConfig {
    key: String,
    name: String,
    city: String,
}

impl MerchantConfig {
    /// Creates a merchant configuration.
    ///
    /// # Arguments
    ///
    /// * `key` - The account key registered with the payment network (email, tax id,
    ///   phone or random token). Opaque; only surrounding whitespace is removed.
    ///   Rejected with `FieldTooLong` when it cannot fit the account template.
    /// * `name` - Display name, normalized and cut to 25 bytes.
    /// * `city` - City, normalized and cut to 15 bytes.
    pub fn new(key: &str, name: &str, city: &str) -> Result<Self> {
        let key = key.trim();
        if key.is_empty() {
            return Err(PixError::EmptyMerchantKey);
        }
        merchant_account_field(key)?;

        let name = normalize(name.trim(), MAX_NAME_LEN);
        if name.trim().is_empty() {
            return Err(PixError::EmptyMerchantField("name"));
        }
        let city = normalize(city.trim(), MAX_CITY_LEN);
        if city.trim().is_empty() {
            return Err(PixError::EmptyMerchantField("city"));
        }

        Ok(Self {
            key: key.to_string(),
            name,
            city,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_accents() {
        assert_eq!(normalize("São Paulo", 15), "SAO PAULO");
        assert_eq!(normalize("Balneário Camboriú", 99), "BALNEARIO CAMBORIU");
        assert_eq!(normalize("João Açaí", 25), "JOAO ACAI");
    }

    #[test]
    fn test_normalize_drops_symbols() {
        assert_eq!(normalize("D'Ávila & Filhos", 25), "DAVILA  FILHOS");
        assert_eq!(normalize("Loja\tCentral", 25), "LOJA CENTRAL");
        assert_eq!(normalize("Café #1", 25), "CAFE 1");
    }

    #[test]
    fn test_normalize_transliterates_letters_without_marks() {
        assert_eq!(normalize("Straße", 25), "STRASSE");
        assert_eq!(normalize("Ørsted", 25), "ORSTED");
        assert_eq!(normalize("Æther", 25), "AETHER");
        assert_eq!(normalize("Łódź", 25), "LODZ");
    }

    #[test]
    fn test_normalize_truncates() {
        assert_eq!(normalize("Balneário Camboriú", MAX_CITY_LEN), "BALNEARIO CAMBO");
        let long = normalize("Comercio de Produtos Naturais Ltda", MAX_NAME_LEN);
        assert_eq!(long.len(), 25);
        assert_eq!(long, "COMERCIO DE PRODUTOS NATU");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in ["GUSTAVO E R R OLIVEIRA", "BALNEARIO CAMBO", "ABC ", "Ção  x"] {
            let once = normalize(input, MAX_NAME_LEN);
            assert_eq!(normalize(&once, MAX_NAME_LEN), once);
        }
        assert_eq!(
            normalize("GUSTAVO E R R OLIVEIRA", MAX_NAME_LEN),
            "GUSTAVO E R R OLIVEIRA"
        );
    }

    #[test]
    fn test_config_normalizes_once() {
        let config = MerchantConfig::new(
            " e96bc856-affa-4c0c-ab59-5dfcc732ef34 ",
            "Gustavo E R R Oliveira",
            "Balneário Camboriú",
        )
        .unwrap();
        assert_eq!(config.key(), "e96bc856-affa-4c0c-ab59-5dfcc732ef34");
        assert_eq!(config.name(), "GUSTAVO E R R OLIVEIRA");
        assert_eq!(config.city(), "BALNEARIO CAMBO");
    }

    #[test]
    fn test_config_keeps_key_verbatim() {
        let config = MerchantConfig::new("Loja@Example.com", "Loja", "Recife").unwrap();
        assert_eq!(config.key(), "Loja@Example.com");
    }

    #[test]
    fn test_config_rejects_key_overflowing_account_template() {
        let too_long = "k".repeat(78);
        assert!(matches!(
            MerchantConfig::new(&too_long, "Loja", "Recife"),
            Err(PixError::FieldTooLong { ref tag, len: 100 }) if tag == "26"
        ));

        let longest = "k".repeat(77);
        let config = MerchantConfig::new(&longest, "Loja", "Recife").unwrap();
        assert_eq!(config.key().len(), 77);
    }

    #[test]
    fn test_config_rejects_empty_values() {
        assert!(matches!(
            MerchantConfig::new("  ", "Loja", "Recife"),
            Err(PixError::EmptyMerchantKey)
        ));
        assert!(matches!(
            MerchantConfig::new("key", "!?#", "Recife"),
            Err(PixError::EmptyMerchantField("name"))
        ));
        assert!(matches!(
            MerchantConfig::new("key", "Loja", ""),
            Err(PixError::EmptyMerchantField("city"))
        ));
    }
}
