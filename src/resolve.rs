use crate::{
    internal::{AuthMeta, Meta, ServerMeta},
    normalize::remove_dot_segments,
    pct_enc::EStr,
    ParseError, Uri,
};
use alloc::string::String;
use borrow_or_share::Bos;
use core::num::NonZeroUsize;

/// Components of a hierarchical URI, to be assembled into a new one.
#[derive(Clone, Copy)]
pub(crate) struct Parts<'a> {
    pub(crate) scheme: Option<&'a str>,
    pub(crate) authority: Option<(&'a str, Option<ServerMeta>)>,
    pub(crate) path: &'a str,
    pub(crate) query: Option<&'a str>,
    pub(crate) fragment: Option<&'a str>,
}

impl<'a> Parts<'a> {
    /// Splits a hierarchical URI into its components.
    pub(crate) fn of(uri: Uri<&'a str>) -> Self {
        debug_assert!(!uri.is_opaque());
        let s = uri.val;
        let (path_start, path_end) = uri.meta.path_bounds;
        Parts {
            scheme: uri.meta.scheme_end.map(|i| &s[..i.get()]),
            authority: uri
                .meta
                .auth_meta
                .map(|m| (&s[m.bounds.0..m.bounds.1], m.server)),
            path: &s[path_start..path_end],
            query: uri.query().map(EStr::as_str),
            fragment: uri.fragment().map(EStr::as_str),
        }
    }

    /// Assembles the components into a URI, computing its metadata on the way.
    ///
    /// The components must already be validated and fit together, that is,
    /// a path must be empty or start with `'/'` if there is an authority,
    /// and must start with `'/'` if there is a scheme.
    pub(crate) fn assemble(&self) -> Uri<String> {
        // Close the loophole that a path starting with "//" would be
        // taken as an authority when there is none.
        let dot_prefix = self.authority.is_none() && self.path.starts_with("//");

        // Calculate the output length.
        let mut len = self.path.len();
        if let Some(scheme) = self.scheme {
            len += scheme.len() + 1;
        }
        if let Some((auth, _)) = self.authority {
            len += auth.len() + 2;
        }
        if dot_prefix {
            len += 2;
        }
        if let Some(query) = self.query {
            len += query.len() + 1;
        }
        if let Some(fragment) = self.fragment {
            len += fragment.len() + 1;
        }

        let mut buf = String::with_capacity(len);
        let mut meta = Meta::default();

        if let Some(scheme) = self.scheme {
            buf.push_str(scheme);
            meta.scheme_end = NonZeroUsize::new(buf.len());
            buf.push(':');
        }

        if let Some((auth, server)) = self.authority {
            buf.push_str("//");
            let start = buf.len();
            buf.push_str(auth);
            meta.auth_meta = Some(AuthMeta {
                bounds: (start, buf.len()),
                server,
            });
        }

        meta.path_bounds.0 = buf.len();
        if dot_prefix {
            buf.push_str("/.");
        }
        buf.push_str(self.path);
        meta.path_bounds.1 = buf.len();

        if let Some(query) = self.query {
            buf.push('?');
            buf.push_str(query);
            meta.query_end = NonZeroUsize::new(buf.len());
        }

        if let Some(fragment) = self.fragment {
            meta.fragment_start = Some(buf.len());
            buf.push('#');
            buf.push_str(fragment);
        }

        debug_assert_eq!(buf.len(), len);
        Uri::new(buf, meta)
    }
}

impl<T: Bos<str>> Uri<T> {
    /// Resolves the given reference against this URI.
    ///
    /// - If the reference is absolute or this URI is opaque,
    ///   the reference is returned as is.
    /// - If the reference has an authority, it is returned with
    ///   this URI's scheme.
    /// - If the reference is empty or only has a fragment, this URI is
    ///   returned with the reference's fragment.
    /// - Otherwise the paths are merged and dot segments removed, with
    ///   any `".."` that would climb above the root discarded. The result
    ///   has this URI's scheme and authority, along with the merged path
    ///   and the reference's query and fragment.
    ///
    /// When the result has an authority, a non-empty path is made to start
    /// with `'/'`.
    /// When it has none and its path would start with `"//"`, the string
    /// `"/."` is prepended to the path so that it is not mistaken for
    /// an authority.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfc2396_uri::Uri;
    ///
    /// let base = Uri::parse("http://a/b/c/d;p?q")?;
    ///
    /// assert_eq!(base.resolve(&Uri::parse("g")?), "http://a/b/c/g");
    /// assert_eq!(base.resolve(&Uri::parse("../g")?), "http://a/b/g");
    /// assert_eq!(base.resolve(&Uri::parse("../../../g")?), "http://a/g");
    /// assert_eq!(base.resolve(&Uri::parse("//g")?), "http://g");
    /// assert_eq!(base.resolve(&Uri::parse("#s")?), "http://a/b/c/d;p?q#s");
    /// # Ok::<_, rfc2396_uri::ParseError>(())
    /// ```
    pub fn resolve<U: Bos<str>>(&self, reference: &Uri<U>) -> Uri<String> {
        resolve(self.make_ref(), reference.make_ref())
    }

    /// Parses the given string as a URI and resolves it against this URI.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string is not a well-formed URI.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfc2396_uri::Uri;
    ///
    /// let base = Uri::parse("http://example.com/foo/bar")?;
    /// assert_eq!(base.resolve_str("baz?q")?, "http://example.com/foo/baz?q");
    /// assert!(base.resolve_str("%zz").is_err());
    /// # Ok::<_, rfc2396_uri::ParseError>(())
    /// ```
    pub fn resolve_str(&self, reference: &str) -> Result<Uri<String>, ParseError> {
        Ok(self.resolve(&Uri::parse(reference)?))
    }

    /// Computes a reference relative to this URI that resolves to the given target.
    ///
    /// The target is returned as is if either URI is opaque, if the schemes
    /// differ (ignoring case), if the raw authorities differ, or if the
    /// target's path is not under the directory of this URI's path.
    /// Both paths have their dot segments removed before they are compared.
    ///
    /// Otherwise the result is a relative reference holding the rest of the
    /// target's path, along with the target's query and fragment. It is
    /// empty when both paths are equal. A result whose first segment
    /// contains `':'`, or whose path would otherwise start with an empty
    /// segment below the directory, is prefixed with `"./"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfc2396_uri::Uri;
    ///
    /// let base = Uri::parse("http://a/b/c/d")?;
    ///
    /// assert_eq!(base.relativize(&Uri::parse("http://a/b/c/e/f?q")?), "e/f?q");
    /// assert_eq!(base.relativize(&Uri::parse("http://a/b/c/d#s")?), "#s");
    /// assert_eq!(base.relativize(&Uri::parse("http://a/b/x")?), "http://a/b/x");
    /// assert_eq!(base.relativize(&Uri::parse("http://a/b/c/g:h")?), "./g:h");
    /// # Ok::<_, rfc2396_uri::ParseError>(())
    /// ```
    pub fn relativize<U: Bos<str>>(&self, target: &Uri<U>) -> Uri<String> {
        relativize(self.make_ref(), target.make_ref())
    }
}

fn resolve(base: Uri<&str>, r: Uri<&str>) -> Uri<String> {
    if r.is_absolute() || base.is_opaque() {
        return r.to_owned();
    }

    let base_parts = Parts::of(base);
    let r_parts = Parts::of(r);

    if r_parts.authority.is_some() {
        return Parts {
            scheme: base_parts.scheme,
            ..r_parts
        }
        .assemble();
    }

    let r_path = r_parts.path;
    if r_path.is_empty() && r_parts.query.is_none() {
        return Parts {
            fragment: r_parts.fragment,
            ..base_parts
        }
        .assemble();
    }

    let mut merged = String::with_capacity(base_parts.path.len() + r_path.len() + 1);
    if r_path.starts_with('/') {
        merged.push_str(r_path);
    } else if r_path.is_empty() {
        merged.push_str(base_parts.path);
    } else {
        let dir_end = base_parts.path.rfind('/').map_or(0, |i| i + 1);
        merged.push_str(&base_parts.path[..dir_end]);
        merged.push_str(r_path);
    }

    let mut path = remove_dot_segments(&merged, true);
    if base_parts.authority.is_some() && !path.is_empty() && !path.starts_with('/') {
        // The colon guard is not needed once the path is absolute.
        let rel = path.strip_prefix("./").unwrap_or(&path);
        path = ["/", rel].concat();
    }
    Parts {
        path: &path,
        query: r_parts.query,
        fragment: r_parts.fragment,
        ..base_parts
    }
    .assemble()
}

fn relativize(base: Uri<&str>, target: Uri<&str>) -> Uri<String> {
    if base.is_opaque() || target.is_opaque() {
        return target.to_owned();
    }
    if base.scheme() != target.scheme() {
        return target.to_owned();
    }
    if base.authority().map(|a| a.as_str()) != target.authority().map(|a| a.as_str()) {
        return target.to_owned();
    }

    let base_parts = Parts::of(base);
    let target_parts = Parts::of(target);

    let base_path = remove_dot_segments(base_parts.path, false);
    let target_path = remove_dot_segments(target_parts.path, false);

    let (dir_end, rest) = if base_path == target_path {
        (0, "")
    } else {
        let dir_end = base_path.rfind('/').map_or(0, |i| i + 1);
        match target_path.strip_prefix(&base_path[..dir_end]) {
            Some(rest) => (dir_end, rest),
            None => return target.to_owned(),
        }
    };

    // An empty segment right below the directory must not make the path absolute.
    let first_seg = rest.split('/').next().unwrap_or_default();
    let path = if (dir_end != 0 && rest.starts_with('/')) || first_seg.contains(':') {
        let mut buf = String::with_capacity(rest.len() + 2);
        buf.push_str("./");
        buf.push_str(rest);
        buf
    } else {
        rest.into()
    };

    Parts {
        scheme: None,
        authority: None,
        path: &path,
        query: target_parts.query,
        fragment: target_parts.fragment,
    }
    .assemble()
}
