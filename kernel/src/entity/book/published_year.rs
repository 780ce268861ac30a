use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BookPublishedYear(i32);

impl BookPublishedYear {
    pub fn new(year: impl Into<i32>) -> Self {
        Self(year.into())
    }
}
