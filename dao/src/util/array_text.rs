//! Ordered string sequences (tech stack, included items) persist as JSON
//! text. Reads are defensive: anything that does not parse as a JSON string
//! array comes back as an empty sequence, never as an error.

pub fn encode(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_owned())
}

pub fn decode(text: &str) -> Vec<String> {
    serde_json::from_str(text).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_order() {
        let values = vec!["Next.js".to_owned(), "Drizzle".to_owned(), "SQLite".to_owned()];
        assert_eq!(decode(&encode(&values)), values);
    }

    #[test]
    fn malformed_json_decodes_to_empty() {
        assert_eq!(decode("not-json"), Vec::<String>::new());
        assert_eq!(decode("{\"a\":1}"), Vec::<String>::new());
        assert_eq!(decode(""), Vec::<String>::new());
    }
}
