#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error(
        "Transaction is not an agenda creation: expected exactly one AgendaCreated log, found {matches}"
    )]
    NotAnAgendaCreation { matches: usize },

    #[error("Unexpected call shape: {0}")]
    UnexpectedCallShape(String),

    #[error(
        "Ambiguous agenda payload encoding: {payload_len} bytes, layout A predicts {}, layout B predicts {}",
        describe_len(.layout_a),
        describe_len(.layout_b)
    )]
    AmbiguousEncoding { payload_len: usize, layout_a: Option<usize>, layout_b: Option<usize> },

    #[error("Agenda payload disagrees with its creation event: {0}")]
    InconsistentPayload(String),

    #[error("Decoded {field} is out of range")]
    ValueOutOfRange { field: &'static str },
}

fn describe_len(len: &Option<usize>) -> String {
    match len {
        Some(n) => format!("{n} bytes"),
        None => "nothing".to_string(),
    }
}
