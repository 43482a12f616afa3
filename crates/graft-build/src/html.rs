use regex::Regex;

use crate::error::BuildError;

/// Mark the app's entry `<script>` tags in an HTML shell with an `entry`
/// attribute.
///
/// Hosts fetching a sub-application's HTML need to know which script among
/// the emitted chunks is the entry; vendor and split chunks must stay
/// untagged. A script counts as the entry when the final path segment of its
/// `src` is `{stem}.js` or `{stem}.{hash}.js`. Tags already carrying the
/// attribute are left alone, so re-processing emitted HTML is safe.
pub fn tag_entry_scripts(html: &str, entry_stem: &str) -> Result<String, BuildError> {
    let tag_re =
        Regex::new(r"<script\b[^>]*>").map_err(|e| BuildError::Pattern(e.to_string()))?;
    let src_re = Regex::new(r#"src\s*=\s*["']([^"']*)["']"#)
        .map_err(|e| BuildError::Pattern(e.to_string()))?;
    let entry_re = Regex::new(&format!(
        r"(?:^|/){}(\.\w+)?\.js$",
        regex::escape(entry_stem)
    ))
    .map_err(|e| BuildError::Pattern(e.to_string()))?;

    let mut tagged = 0usize;
    let out = tag_re.replace_all(html, |caps: &regex::Captures<'_>| {
        let tag = &caps[0];
        let Some(src) = src_re.captures(tag) else {
            return tag.to_string();
        };
        if !entry_re.is_match(&src[1]) || has_entry_attr(tag, &src[0]) {
            return tag.to_string();
        }
        tagged += 1;
        match tag.strip_suffix("/>") {
            Some(head) => format!("{head} entry/>"),
            None => match tag.strip_suffix('>') {
                Some(head) => format!("{head} entry>"),
                None => tag.to_string(),
            },
        }
    });
    tracing::debug!(tagged, entry_stem, "Tagged entry scripts");
    Ok(out.into_owned())
}

/// Whether the open tag already carries an `entry` attribute. The src span
/// is removed first so an `entry` path segment inside the URL cannot
/// false-positive.
fn has_entry_attr(tag: &str, src_span: &str) -> bool {
    let without_src = tag.replacen(src_span, "", 1);
    if let Ok(re) = Regex::new(r"\sentry(\s|=|/|>)") {
        re.is_match(&without_src)
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_plain_entry_script() {
        let html = r#"<body><script src="/shop.js"></script></body>"#;
        let out = tag_entry_scripts(html, "shop").unwrap();
        assert_eq!(out, r#"<body><script src="/shop.js" entry></script></body>"#);
    }

    #[test]
    fn tags_hashed_entry_script() {
        let html = r#"<script src="https://cdn.example.com/shop/shop.3f2a91.js"></script>"#;
        let out = tag_entry_scripts(html, "shop").unwrap();
        assert!(out.contains(r#"src="https://cdn.example.com/shop/shop.3f2a91.js" entry>"#));
    }

    #[test]
    fn vendor_chunks_stay_untagged() {
        let html = concat!(
            r#"<script src="/vendors.js"></script>"#,
            r#"<script src="/shop.chunk0.css.js"></script>"#,
            r#"<script src="/shop.js"></script>"#,
        );
        let out = tag_entry_scripts(html, "shop").unwrap();
        assert!(out.contains(r#"<script src="/vendors.js"></script>"#));
        assert!(out.contains(r#"<script src="/shop.js" entry>"#));
        // Two dotted segments before .js is not the entry pattern.
        assert!(out.contains(r#"<script src="/shop.chunk0.css.js"></script>"#));
    }

    #[test]
    fn stem_must_start_a_path_segment() {
        let html = r#"<script src="/workshop.js"></script>"#;
        let out = tag_entry_scripts(html, "shop").unwrap();
        assert_eq!(out, html);
    }

    #[test]
    fn already_tagged_scripts_are_untouched() {
        let html = r#"<script src="/shop.js" entry></script>"#;
        let out = tag_entry_scripts(html, "shop").unwrap();
        assert_eq!(out, html);
    }

    #[test]
    fn entry_inside_src_does_not_count_as_attribute() {
        let html = r#"<script src="/entry/shop.js"></script>"#;
        let out = tag_entry_scripts(html, "shop").unwrap();
        assert_eq!(out, r#"<script src="/entry/shop.js" entry></script>"#);
    }

    #[test]
    fn inline_scripts_are_skipped() {
        let html = r#"<script>window.shop = {};</script>"#;
        let out = tag_entry_scripts(html, "shop").unwrap();
        assert_eq!(out, html);
    }

    #[test]
    fn stem_with_regex_metacharacters_is_escaped() {
        let html = r#"<script src="/shop+plus.js"></script>"#;
        let out = tag_entry_scripts(html, "shop+plus").unwrap();
        assert!(out.contains(r#" entry>"#));
    }
}
