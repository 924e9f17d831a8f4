use std::fmt;

use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Author {
    ComponentLab,
    Model,
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Author::ComponentLab => return write!(f, "ComponentLab"),
            Author::Model => return write!(f, "Model"),
        }
    }
}
