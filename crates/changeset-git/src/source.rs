use crate::Result;

/// Supplies the raw tag names of a repository.
pub trait TagSource {
    /// # Errors
    ///
    /// Returns an error if the tag listing cannot be obtained.
    fn tag_names(&self) -> Result<Vec<String>>;
}

impl<T: TagSource + ?Sized> TagSource for &T {
    fn tag_names(&self) -> Result<Vec<String>> {
        (**self).tag_names()
    }
}

/// A fixed tag listing, standing in for a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryTags {
    tags: Vec<String>,
}

impl InMemoryTags {
    #[must_use]
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn push(&mut self, tag: impl Into<String>) {
        self.tags.push(tag.into());
    }
}

impl TagSource for InMemoryTags {
    fn tag_names(&self) -> Result<Vec<String>> {
        Ok(self.tags.clone())
    }
}
