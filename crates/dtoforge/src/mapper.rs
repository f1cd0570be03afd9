use thiserror::Error as ThisError;

///
/// MapError
///
/// Mapper failure surface. Absence of a required argument is the only
/// failure a generated mapper can produce; nested mapper calls propagate it
/// with `?`.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum MapError {
    #[error("missing required argument '{0}'")]
    MissingArgument(&'static str),
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_argument_names_the_parameter() {
        assert_eq!(
            MapError::MissingArgument("source").to_string(),
            "missing required argument 'source'"
        );
    }
}
