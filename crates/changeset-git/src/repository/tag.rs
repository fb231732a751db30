use crate::Result;
use crate::source::TagSource;

use super::Repository;

impl TagSource for Repository {
    fn tag_names(&self) -> Result<Vec<String>> {
        let names = self.inner.tag_names(None)?;
        Ok(names.iter().flatten().map(str::to_string).collect())
    }
}
