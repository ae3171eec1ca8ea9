use std::fmt;

/// The client-visible working directory, rooted at `/`.
///
/// Segments are always plain names, so joining a `VirtualPath` under a user's
/// home can never climb out of it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VirtualPath {
    segments: Vec<String>,
}

/// True when `name` can be used as a single path segment.
pub fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\', '\0'])
}

impl VirtualPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Path with the last segment removed, or `None` at the root.
    pub fn parent(&self) -> Option<VirtualPath> {
        if self.is_root() {
            return None;
        }
        let mut segments = self.segments.clone();
        segments.pop();
        Some(VirtualPath { segments })
    }

    /// Path with `name` appended, or `None` if `name` is not a plain name.
    pub fn child(&self, name: &str) -> Option<VirtualPath> {
        if !is_plain_name(name) {
            return None;
        }
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Some(VirtualPath { segments })
    }
}

impl fmt::Display for VirtualPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_display() {
        assert_eq!(VirtualPath::root().to_string(), "/");
        assert!(VirtualPath::root().is_root());
    }

    #[test]
    fn test_child_and_parent() {
        let sub = VirtualPath::root().child("sub").unwrap();
        let deeper = sub.child("deeper").unwrap();
        assert_eq!(deeper.to_string(), "/sub/deeper");
        assert_eq!(deeper.parent().unwrap(), sub);
        assert_eq!(sub.parent().unwrap(), VirtualPath::root());
        assert_eq!(VirtualPath::root().parent(), None);
    }

    #[test]
    fn test_child_rejects_traversal() {
        let root = VirtualPath::root();
        assert!(root.child("..").is_none());
        assert!(root.child(".").is_none());
        assert!(root.child("").is_none());
        assert!(root.child("a/b").is_none());
        assert!(root.child("..\\windows").is_none());
    }
}
