use crate::model::ResponseKind;

/// A recognized response section is missing a required piece or carries a
/// malformed value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructuralError {
    #[error("missing <{element} name=\"{name}\"> under <{parent}>")]
    MissingElement {
        parent: String,
        element: String,
        name: String,
    },

    #[error("missing attribute `{attribute}` on <{element}>")]
    MissingAttribute { element: String, attribute: String },

    #[error("invalid integer {value:?} for `{name}`")]
    InvalidInteger { name: String, value: String },

    #[error("invalid number {value:?} for `{name}`")]
    InvalidFloat { name: String, value: String },

    #[error("grouping clause `{0}` appears more than once")]
    DuplicateClause(String),

    #[error("expected a {expected:?} response, section parsers produced {found:?}")]
    KindMismatch {
        expected: ResponseKind,
        found: ResponseKind,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error("xml error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("structural error: {0}")]
    Structural(#[from] StructuralError),

    #[error("invalid {kind} value {value:?} in field `{field}`")]
    Field {
        field: String,
        kind: String,
        value: String,
    },
}
