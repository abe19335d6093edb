use sha2::{Digest, Sha256};

/// Hex SHA-256 of the script text, used to correlate a result with its input.
pub fn script_checksum(script: &str) -> String {
    hex::encode(Sha256::digest(script.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::script_checksum;

    #[test]
    fn empty_script_matches_known_vector() {
        assert_eq!(
            script_checksum(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn whitespace_changes_the_checksum() {
        assert_ne!(script_checksum("SELECT 1;"), script_checksum("SELECT 1; "));
    }
}
