use url::Url;

/// Canonical string form of a URL, used as the record key for deletes.
///
/// Scheme and host are lowercased and default ports dropped by the parser.
/// On top of that the fragment is dropped, query pairs are sorted by name then
/// value, and an empty query is removed.
pub fn first_normalize_url(url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);

    let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    if pairs.is_empty() {
        url.set_query(None);
    } else {
        pairs.sort();
        url.query_pairs_mut().clear().extend_pairs(pairs.iter());
    }

    url.into()
}

/// Scheme assumed for keys written without one, such as `example.com/page`.
const IMPLIED_SCHEME: &str = "http://";

/// Parse a raw key string and normalize it.
///
/// A key without a scheme is read as `host/path` and normalized with an implied
/// `http://`, which is stripped again so the key keeps its scheme-less form.
/// If that reading fails too, the original parse error is returned.
pub fn normalize_raw(raw: &str) -> Result<String, url::ParseError> {
    match Url::parse(raw) {
        Ok(url) => Ok(first_normalize_url(&url)),
        Err(url::ParseError::RelativeUrlWithoutBase) if !raw.starts_with('/') => {
            let url = Url::parse(&format!("{IMPLIED_SCHEME}{raw}"))
                .map_err(|_| url::ParseError::RelativeUrlWithoutBase)?;
            let normalized = first_normalize_url(&url);
            Ok(match normalized.strip_prefix(IMPLIED_SCHEME) {
                Some(rest) => rest.to_string(),
                None => normalized,
            })
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_scheme_and_host_and_sorts_query() {
        assert_eq!(
            normalize_raw("HTTP://Example.com/Path?b=2&a=1").unwrap(),
            "http://example.com/Path?a=1&b=2"
        );
    }

    #[test]
    fn drops_fragment_and_default_port() {
        assert_eq!(
            normalize_raw("https://example.com:443/a#section").unwrap(),
            "https://example.com/a"
        );
    }

    #[test]
    fn drops_empty_query() {
        assert_eq!(
            normalize_raw("http://example.com/?").unwrap(),
            "http://example.com/"
        );
    }

    #[test]
    fn sorts_repeated_names_by_value() {
        assert_eq!(
            normalize_raw("http://example.com/?t=b&t=a&s=z").unwrap(),
            "http://example.com/?s=z&t=a&t=b"
        );
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_raw("HTTP://Example.com/x?b=2&a=1#f").unwrap();
        assert_eq!(normalize_raw(&once).unwrap(), once);
    }

    #[test]
    fn schemeless_input_keeps_its_form() {
        assert_eq!(normalize_raw("example.com/page").unwrap(), "example.com/page");
        assert_eq!(
            normalize_raw("Example.com/p?b=2&a=1#top").unwrap(),
            "example.com/p?a=1&b=2"
        );
    }

    #[test]
    fn schemeless_normalization_is_idempotent() {
        let once = normalize_raw("Example.com/x?b=2&a=1").unwrap();
        assert_eq!(normalize_raw(&once).unwrap(), once);
    }

    #[test]
    fn unparseable_input_keeps_the_first_error() {
        assert_eq!(
            normalize_raw("not a url").unwrap_err(),
            url::ParseError::RelativeUrlWithoutBase
        );
        assert_eq!(
            normalize_raw("/path/only").unwrap_err(),
            url::ParseError::RelativeUrlWithoutBase
        );
    }
}
