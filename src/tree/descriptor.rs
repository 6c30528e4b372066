//! JVM descriptor rewriting between namespaces.

/// Rewrite every `L<class>;` reference in `desc` through `map`.
///
/// Classes `map` does not know keep their original name. Primitive codes,
/// array markers and parentheses are copied unchanged.
pub fn remap_descriptor<F>(desc: &str, mut map: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    let mut out = String::with_capacity(desc.len());
    let mut rest = desc;

    while let Some(start) = rest.find('L') {
        out.push_str(&rest[..=start]);
        let tail = &rest[start + 1..];
        let Some(end) = tail.find(';') else {
            // Unterminated reference, copy verbatim.
            out.push_str(tail);
            return out;
        };
        let class = &tail[..end];
        match map(class) {
            Some(mapped) => out.push_str(&mapped),
            None => out.push_str(class),
        }
        out.push(';');
        rest = &tail[end + 1..];
    }
    out.push_str(rest);
    out
}
