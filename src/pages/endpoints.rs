use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::form_urlencoded;

use crate::pages::types::ListOptions;

/// Relative to the client base url.
pub const API_ENDPOINT: &str = "api/pages";

/// Characters escaped inside a single path segment. Unreserved characters and
/// the sub-delimiters allowed in a segment stay as they are; `/`, `;`, `,`
/// and `?` are escaped.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b':')
    .remove(b'=')
    .remove(b'@');

pub fn escape_path_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Query string for a listing, keys in sorted order. Empty when no option is set.
pub fn list_query(options: Option<&ListOptions>) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if let Some(options) = options {
        if options.limit != 0 {
            query.append_pair("limit", &options.limit.to_string());
        }
        if options.skip != 0 {
            query.append_pair("skip", &options.skip.to_string());
        }
    }
    query.finish()
}

pub fn list_endpoint(project: &str, options: Option<&ListOptions>) -> String {
    let path = format!("{}/{}", API_ENDPOINT, escape_path_segment(project));
    let query = list_query(options);
    if query.is_empty() {
        path
    } else {
        format!("{}?{}", path, query)
    }
}

pub fn get_endpoint(project: &str, title: &str) -> String {
    format!(
        "{}/{}/{}",
        API_ENDPOINT,
        escape_path_segment(project),
        escape_path_segment(title)
    )
}

pub fn text_endpoint(project: &str, title: &str) -> String {
    get_endpoint(project, title) + "/text"
}

pub fn icon_endpoint(project: &str, title: &str) -> String {
    get_endpoint(project, title) + "/icon"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_terms(query: &str) -> Vec<&str> {
        let mut terms: Vec<&str> = query.split('&').filter(|t| !t.is_empty()).collect();
        terms.sort();
        terms
    }

    #[test]
    fn test_list_query() {
        let cases = [
            (ListOptions::new(), vec![]),
            (ListOptions::new().with_limit(100), vec!["limit=100"]),
            (ListOptions::new().with_skip(1), vec!["skip=1"]),
            (
                ListOptions::new().with_skip(1).with_limit(100),
                vec!["limit=100", "skip=1"],
            ),
        ];

        for (options, expected) in cases {
            let query = list_query(Some(&options));
            assert_eq!(query_terms(&query), expected, "options={:?}", options);
        }
        assert_eq!(list_query(None), "");
    }

    #[test]
    fn test_escape_path_segment() {
        assert_eq!(escape_path_segment("test te/s;t"), "test%20te%2Fs%3Bt");
        assert_eq!(escape_path_segment("a,b?c"), "a%2Cb%3Fc");
        assert_eq!(escape_path_segment("a&b=c+d@e:f$"), "a&b=c+d@e:f$");
        assert_eq!(escape_path_segment("日本"), "%E6%97%A5%E6%9C%AC");
        assert_eq!(escape_path_segment("100%"), "100%25");
    }

    #[test]
    fn test_list_endpoint() {
        assert_eq!(list_endpoint("test-project", None), "api/pages/test-project");
        assert_eq!(
            list_endpoint("test-project", Some(&ListOptions::new())),
            "api/pages/test-project"
        );
        assert_eq!(
            list_endpoint(
                "test-project",
                Some(&ListOptions::new().with_skip(1).with_limit(5))
            ),
            "api/pages/test-project?limit=5&skip=1"
        );
        assert_eq!(
            list_endpoint("test te/s;t", None),
            "api/pages/test%20te%2Fs%3Bt"
        );
    }

    #[test]
    fn test_page_endpoints() {
        assert_eq!(
            get_endpoint("test-project", "test-title"),
            "api/pages/test-project/test-title"
        );
        assert_eq!(
            get_endpoint("test te/s;t", "test te/s;t"),
            "api/pages/test%20te%2Fs%3Bt/test%20te%2Fs%3Bt"
        );
        assert_eq!(
            text_endpoint("test-project", "test-title"),
            "api/pages/test-project/test-title/text"
        );
        assert_eq!(
            icon_endpoint("test-project", "test-title"),
            "api/pages/test-project/test-title/icon"
        );
    }
}
