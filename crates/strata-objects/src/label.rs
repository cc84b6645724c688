use serde::{Deserialize, Serialize};
use strata_types::ObjectId;

use crate::error::ObjectResult;

/// Mutable named pointer to another object, typically a commit.
///
/// A label is the only mutable entity in the model: it is created once per
/// name and its reference is rewritten in place every time the pointer
/// advances (on each commit, or after a sync). The label's name doubles as
/// its store id, so it is never content-hashed.
///
/// Two labels are equal iff both the name and the reference match.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    name: ObjectId,
    reference_id: Option<ObjectId>,
}

impl Label {
    /// Attribute names of the record form, in order.
    pub const FIELDS: &'static [&'static str] = &["name", "reference_id"];

    /// Create a label. Fails with [`ObjectError::UnnamedLabel`] on an empty
    /// name.
    ///
    /// [`ObjectError::UnnamedLabel`]: crate::error::ObjectError::UnnamedLabel
    pub fn new(name: impl Into<String>, reference_id: Option<ObjectId>) -> ObjectResult<Self> {
        let name = ObjectId::new(name)?;
        Ok(Self { name, reference_id })
    }

    /// The label's name, which is also its store id.
    pub fn name(&self) -> &ObjectId {
        &self.name
    }

    /// The id the label currently points to, if any.
    pub fn reference_id(&self) -> Option<&ObjectId> {
        self.reference_id.as_ref()
    }

    /// Advance the pointer.
    pub fn set_reference(&mut self, reference_id: ObjectId) {
        self.reference_id = Some(reference_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ObjectError;

    #[test]
    fn empty_name_is_rejected() {
        let err = Label::new("", None).unwrap_err();
        assert!(matches!(err, ObjectError::UnnamedLabel));
    }

    #[test]
    fn starts_unset_and_advances() {
        let mut label = Label::new("head", None).unwrap();
        assert!(label.reference_id().is_none());

        let target = ObjectId::from_hash([1; 32]);
        label.set_reference(target.clone());
        assert_eq!(label.reference_id(), Some(&target));
    }

    #[test]
    fn equality_covers_name_and_reference() {
        let target = ObjectId::from_hash([2; 32]);
        let a = Label::new("head", Some(target.clone())).unwrap();
        let b = Label::new("head", Some(target)).unwrap();
        let c = Label::new("head", None).unwrap();
        let d = Label::new("main", None).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(c, d);
    }
}
