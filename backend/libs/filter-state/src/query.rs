use std::borrow::Cow;

/// Ordered `key=value` pairs of a URL query string.
///
/// Keys keep their first-seen position so rewriting one filter does not
/// shuffle the rest of the URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parse `a=1&b=two+words`. A leading `?` is ignored and `+` decodes to
    /// a space.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = query
            .split('&')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let (key, value) = part.split_once('=').unwrap_or((part, ""));
                (decode(key), decode(value))
            })
            .collect();
        Self { pairs }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replace the first `key` in place and drop any duplicates, or append.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter().position(|(k, _)| k == key) {
            Some(index) => {
                self.pairs[index].1 = value;
                let mut seen = 0;
                self.pairs.retain(|(k, _)| {
                    if k != key {
                        return true;
                    }
                    seen += 1;
                    seen == 1
                });
            }
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(Cow::Borrowed(s)) => s.to_string(),
        Ok(Cow::Owned(s)) => s,
        Err(_) => spaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_decodes() {
        let params = QueryParams::parse("?search=brand+identity&technologies=Rust%2CGo&flag");
        assert_eq!(params.get("search"), Some("brand identity"));
        assert_eq!(params.get("technologies"), Some("Rust,Go"));
        assert_eq!(params.get("flag"), Some(""));
        assert_eq!(params.get("missing"), None);
    }

    #[test]
    fn invalid_percent_sequences_are_kept_raw() {
        let params = QueryParams::parse("search=%E0%A4%A");
        assert_eq!(params.get("search"), Some("%E0%A4%A"));
    }

    #[test]
    fn set_keeps_position_and_collapses_duplicates() {
        let mut params = QueryParams::parse("a=1&tag=x&b=2&tag=y");
        params.set("tag", "z");
        assert_eq!(params.to_query_string(), "a=1&tag=z&b=2");

        params.set("c", "new value");
        assert_eq!(params.to_query_string(), "a=1&tag=z&b=2&c=new%20value");
    }

    #[test]
    fn remove_drops_every_occurrence() {
        let mut params = QueryParams::parse("page=2&page=3&x=1");
        params.remove("page");
        assert_eq!(params.to_query_string(), "x=1");
        params.remove("x");
        assert!(params.is_empty());
    }
}
