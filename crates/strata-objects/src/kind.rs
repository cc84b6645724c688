use serde::{Deserialize, Serialize};

/// The kind tag of a stored object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// Raw content (a file's data).
    Blob,
    /// Directory snapshot: name -> blob/tree id maps.
    Tree,
    /// A point in history referencing a tree and parent commits.
    Commit,
    /// Mutable named pointer to another object.
    Label,
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blob => write!(f, "blob"),
            Self::Tree => write!(f, "tree"),
            Self::Commit => write!(f, "commit"),
            Self::Label => write!(f, "label"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_serde_form() {
        for (kind, name) in [
            (ObjectKind::Blob, "blob"),
            (ObjectKind::Tree, "tree"),
            (ObjectKind::Commit, "commit"),
            (ObjectKind::Label, "label"),
        ] {
            assert_eq!(format!("{kind}"), name);
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{name}\""));
        }
    }
}
