use crate::{resolve::Parts, Uri};
use alloc::{string::String, vec::Vec};
use borrow_or_share::Bos;

impl<T: Bos<str>> Uri<T> {
    /// Normalizes the path of the URI by removing dot segments.
    ///
    /// Every `"."` segment is removed, and every `".."` segment is removed
    /// along with the preceding segment that is not `".."`. A leading `".."`
    /// that has nothing to cancel is kept. A removed `"."` or `".."` at the
    /// end leaves a trailing `'/'`. An absolute path never loses its leading `'/'`.
    /// If the normalized path has a `':'` in its first segment, `"./"` is
    /// prepended so that it is not mistaken for a scheme.
    ///
    /// An opaque URI is returned unchanged. This method is idempotent.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfc2396_uri::Uri;
    ///
    /// let uri = Uri::parse("http://user:pw@Example.COM:80/a/b/../c?q=1#f")?;
    /// assert_eq!(uri.normalize(), "http://user:pw@Example.COM:80/a/c?q=1#f");
    ///
    /// assert_eq!(Uri::parse("a/./b/../../../c/.")?.normalize(), "../c/");
    /// assert_eq!(Uri::parse("/../a")?.normalize(), "/../a");
    /// assert_eq!(Uri::parse("./a:b/c")?.normalize(), "./a:b/c");
    /// # Ok::<_, rfc2396_uri::ParseError>(())
    /// ```
    #[must_use]
    pub fn normalize(&self) -> Uri<String> {
        let uri = self.make_ref();
        let Some(path) = uri.path() else {
            return uri.to_owned();
        };

        let normalized = remove_dot_segments(path.as_str(), false);
        if normalized == path.as_str() {
            return uri.to_owned();
        }

        Parts {
            path: &normalized,
            ..Parts::of(uri)
        }
        .assemble()
    }
}

/// Removes dot segments from a path.
///
/// A `".."` segment that has nothing to cancel is kept if `discard_excess`
/// is `false` and dropped otherwise.
pub(crate) fn remove_dot_segments(path: &str, discard_excess: bool) -> String {
    let (absolute, rel) = match path.strip_prefix('/') {
        Some(rel) => (true, rel),
        None => (false, path),
    };

    let mut stack: Vec<&str> = Vec::new();
    let mut trailing_slash = false;

    let mut segs = rel.split('/').peekable();
    while let Some(seg) = segs.next() {
        let last = segs.peek().is_none();
        trailing_slash = false;
        match seg {
            "." => trailing_slash = last,
            ".." => match stack.last() {
                Some(&top) if top != ".." => {
                    stack.pop();
                    trailing_slash = last;
                }
                _ if discard_excess => trailing_slash = last,
                _ => stack.push(seg),
            },
            _ => stack.push(seg),
        }
    }

    let mut buf = String::with_capacity(path.len() + 2);
    if absolute {
        buf.push('/');
    }
    for (i, seg) in stack.iter().enumerate() {
        if i != 0 {
            buf.push('/');
        }
        buf.push_str(seg);
    }
    if trailing_slash && !stack.is_empty() {
        buf.push('/');
    }

    if buf.split('/').next().is_some_and(|seg| seg.contains(':')) {
        buf.insert_str(0, "./");
    }
    buf
}
