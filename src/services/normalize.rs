use url::Url;

use crate::errors::AppError;

/// Validates and canonicalizes a submitted long URL.
///
/// Inputs without any ':' are assumed to be missing a scheme and get
/// "http://" prefixed. The prefixed input string itself is returned on
/// success, not a re-serialized form of the parsed URL.
pub fn normalize(input: &str) -> Result<String, AppError> {
    if input.len() <= 3 {
        return Err(AppError::Validation(
            "Too short! 3+ characters required.".to_string(),
        ));
    }

    let result = if input.contains(':') {
        input.to_string()
    } else {
        format!("http://{input}")
    };

    let url = Url::parse(&result)
        .map_err(|e| AppError::Validation(format!("Could not parse URL '{result}': {e}")))?;

    let host = url.host_str().unwrap_or("");
    if url.scheme().is_empty() || host.is_empty() {
        return Err(AppError::Validation(format!(
            "Scheme and host required: {input}"
        )));
    }

    // Known gap, kept on purpose: only the presence of a dot is checked,
    // so a host like "www.hejsan" with no TLD after its last dot passes.
    if !host.contains('.') {
        return Err(AppError::Validation(format!(
            "Host does not contain a dot -> '{result}'"
        )));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_missing_scheme() {
        assert_eq!(
            normalize("example.com/page").unwrap(),
            "http://example.com/page"
        );
    }

    #[test]
    fn keeps_existing_scheme() {
        assert_eq!(
            normalize("https://example.com").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn rejects_too_short() {
        let err = normalize("ab").unwrap_err();
        assert_eq!(err.to_string(), "Too short! 3+ characters required.");
        let err = normalize("a.b").unwrap_err();
        assert_eq!(err.to_string(), "Too short! 3+ characters required.");
    }

    #[test]
    fn rejects_host_without_dot() {
        assert!(matches!(
            normalize("http://nohostdot"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn rejects_missing_host() {
        // "ab:cd" carries a ':' so no prefix is added; it parses with a
        // scheme of "ab" and no host at all.
        assert!(matches!(normalize("ab:cd"), Err(AppError::Validation(_))));
    }

    #[test]
    fn dotted_host_without_real_tld_still_passes() {
        // Documented gap: dot presence is the only host check.
        assert_eq!(normalize("www.hejsan").unwrap(), "http://www.hejsan");
    }
}
