//! Recipient list parsing.

/// Ordered list of recipient addresses.
///
/// Entries are trimmed and blank entries dropped, so `"a@x.com, ,b@x.com,"`
/// yields two recipients and `" , ,"` yields none. Addresses are not
/// validated here; a malformed address surfaces as a transport failure.
///
/// # Examples
///
/// ```
/// use ziprelay_core::Recipients;
///
/// let recipients = Recipients::parse("a@example.com, b@example.com");
/// assert_eq!(recipients.len(), 2);
/// assert!(Recipients::parse(",,").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recipients(Vec<String>);

impl Recipients {
    /// Parses a comma-separated address list.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        Self::from_list(input.split(','))
    }

    /// Builds a recipient list from already split entries.
    pub fn from_list<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            entries
                .into_iter()
                .map(|entry| entry.as_ref().trim().to_string())
                .filter(|entry| !entry.is_empty())
                .collect(),
        )
    }

    /// Returns `true` if there is nobody to send to.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of recipients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over addresses in send order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Addresses in send order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Recipients {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_comma_separated() {
        let r = Recipients::parse("a@example.com,b@example.com,c@example.com");
        assert_eq!(
            r.as_slice(),
            ["a@example.com", "b@example.com", "c@example.com"]
        );
    }

    #[test]
    fn test_parse_trims_and_drops_blanks() {
        let r = Recipients::parse(" a@example.com , ,b@example.com,");
        assert_eq!(r.as_slice(), ["a@example.com", "b@example.com"]);
    }

    #[test]
    fn test_parse_only_separators_is_empty() {
        assert!(Recipients::parse("").is_empty());
        assert!(Recipients::parse(",,,").is_empty());
        assert!(Recipients::parse(" , \t, ").is_empty());
    }

    #[test]
    fn test_from_list_keeps_order_and_duplicates() {
        let r = Recipients::from_list(vec!["b@x.com", "", "a@x.com", "b@x.com"]);
        assert_eq!(r.len(), 3);
        assert_eq!(r.iter().collect::<Vec<_>>(), ["b@x.com", "a@x.com", "b@x.com"]);
    }

    #[test]
    fn test_into_iterator() {
        let r = Recipients::parse("a@x.com,b@x.com");
        let collected: Vec<&String> = (&r).into_iter().collect();
        assert_eq!(collected.len(), 2);
    }
}
